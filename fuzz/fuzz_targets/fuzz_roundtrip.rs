#![no_main]
use libfuzzer_sys::fuzz_target;
use pixelgrid_bmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce an identical grid
    let Ok(decoded) = DecodeRequest::new(data)
        .with_permissiveness(BmpPermissiveness::Permissive)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    for order in [RowOrder::TopDown, RowOrder::BottomUp] {
        let Ok(reencoded) = EncodeRequest::new()
            .with_row_order(order)
            .encode(&decoded, enough::Unstoppable)
        else {
            return;
        };
        let Ok(decoded2) = DecodeRequest::new(&reencoded)
            .with_permissiveness(BmpPermissiveness::Strict)
            .decode(enough::Unstoppable)
        else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded, decoded2, "roundtrip grid mismatch");
    }
});
