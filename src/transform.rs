//! Per-sample transformations applied after decoding

use image::RgbImage;

use crate::errors::PatchError;

/// A function from a decoded sample to an arbitrary output.
///
/// The error type must absorb [`PatchError`] so that index and decode
/// failures of the dataset share a channel with the transform's own
/// failures, which are passed through untouched.
pub trait Transform {
    /// The value returned for each sample
    type Output;
    /// The failure reported for each sample
    type Error: From<PatchError>;

    /// Transform one decoded image
    fn apply(&self, image: RgbImage) -> Result<Self::Output, Self::Error>;
}

/// Returns the decoded image as is
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transform for Identity {
    type Output = RgbImage;
    type Error = PatchError;

    fn apply(&self, image: RgbImage) -> Result<RgbImage, PatchError> {
        Ok(image)
    }
}

impl<F, O, E> Transform for F
where
    F: Fn(RgbImage) -> Result<O, E>,
    E: From<PatchError>,
{
    type Output = O;
    type Error = E;

    fn apply(&self, image: RgbImage) -> Result<O, E> {
        self(image)
    }
}
