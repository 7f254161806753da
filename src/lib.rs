//! Histopatch exposes slide-organized image patches on disk as an indexable
//! dataset of decoded RGB images.

extern crate glob;
extern crate image;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::time::{Duration, Instant};

pub mod config;
pub mod dataset;
pub mod dataset_patch;
pub mod errors;
pub mod transform;

pub use dataset::{load_rgb_image, resolve_index, Dataset, DatasetIter};
pub use dataset_patch::PatchDataset;
pub use errors::{PatchError, PatchResult};
pub use transform::{Identity, Transform};

pub(crate) struct Timer<F: Fn(Duration)> {
    start: Instant,
    f: F,
}

impl<F: Fn(Duration)> Timer<F> {
    pub(crate) fn new(f: F) -> Self {
        Self {
            start: Instant::now(),
            f,
        }
    }
}

impl<F: Fn(Duration)> Drop for Timer<F> {
    fn drop(&mut self) {
        (self.f)(self.start.elapsed())
    }
}
