use enough::Stop;

use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// Decode request: the input bytes plus optional limits and strictness.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    /// Reject images exceeding `limits` before allocating the grid.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode into a fully set grid. Nothing is returned on failure.
    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        crate::bmp::decode(self.data, self.limits, self.permissiveness, &stop)
    }
}

/// Decode BMP bytes with default settings.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}
