//! Indexable sample collections and the shared image loader

use std::iter::FusedIterator;
use std::path::Path;

use image::RgbImage;

use crate::errors::{PatchError, PatchResult};

/// A collection with a length whose samples are retrieved by position.
///
/// Retrieval takes `&self`, so a dataset can be shared across threads and
/// read independently as long as the implementation is `Sync`.
pub trait Dataset {
    /// The value produced for each sample
    type Item;
    /// The failure produced by a retrieval
    type Error;

    /// Number of samples
    fn len(&self) -> usize;

    /// Whether the dataset holds no samples
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the sample at `index`, in `0..self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, Self::Error>;

    /// Iterate over all samples in index order, retrieving each lazily.
    fn iter(&self) -> DatasetIter<'_, Self>
    where
        Self: Sized,
    {
        DatasetIter {
            dataset: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl<D: Dataset + ?Sized> Dataset for Box<D> {
    type Item = D::Item;
    type Error = D::Error;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Result<Self::Item, Self::Error> {
        (**self).get(index)
    }
}

/// Iterator over the samples of a [`Dataset`]
pub struct DatasetIter<'a, D> {
    dataset: &'a D,
    next: usize,
    end: usize,
}

impl<'a, D: Dataset> Iterator for DatasetIter<'a, D> {
    type Item = Result<D::Item, D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let item = self.dataset.get(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, D: Dataset> ExactSizeIterator for DatasetIter<'a, D> {}

impl<'a, D: Dataset> FusedIterator for DatasetIter<'a, D> {}

/// Map a possibly negative index onto `0..len`.
///
/// Negative indices count from the end, so `-1` is the last sample. Anything
/// below `-len` or at or above `len` is out of range.
pub fn resolve_index(index: isize, len: usize) -> PatchResult<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize).filter(|&i| i < len)
    };
    resolved.ok_or(PatchError::IndexOutOfRange { index, len })
}

/// Open and decode the image at `path`, converted to 8-bit RGB.
///
/// The format is sniffed from the file content and falls back to the
/// extension. Grayscale, palette, alpha and 16-bit sources are all converted.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> PatchResult<RgbImage> {
    let path = path.as_ref();
    let _t = crate::Timer::new(|e| trace!("Decoding {:?} took {}ms", path, e.as_millis()));
    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?.into_rgb8())
}
