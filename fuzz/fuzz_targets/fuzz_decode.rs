#![no_main]
use libfuzzer_sys::fuzz_target;
use pixelgrid_bmp::{BmpPermissiveness, DecodeRequest, ImageInfo};

fuzz_target!(|data: &[u8]| {
    // Every permissiveness level must fail cleanly, never panic
    let _ = ImageInfo::from_bytes(data);
    for level in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_permissiveness(level)
            .decode(enough::Unstoppable);
    }
});
