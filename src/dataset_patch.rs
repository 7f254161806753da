//! Slide-organized image patches on disk

use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use image::RgbImage;
use itertools::Itertools;

use crate::dataset::{load_rgb_image, resolve_index, Dataset};
use crate::errors::{PatchError, PatchResult};
use crate::transform::{Identity, Transform};

/// Image files laid out as `root/<slide>/<image>`.
///
/// Both listings are taken once at construction, so later changes on disk are
/// not observed. Every retrieval opens and decodes the file again.
#[derive(Clone)]
pub struct PatchDataset<T = Identity> {
    root: PathBuf,
    slides: Vec<PathBuf>,
    images: Vec<PathBuf>,
    transform: T,
}

impl PatchDataset {
    /// List the dataset under `root`, returning decoded RGB images.
    ///
    /// A missing or empty root yields an empty dataset.
    pub fn new<P: AsRef<Path>>(root: P) -> PatchResult<Self> {
        Self::with_transform(root, Identity)
    }
}

impl<T: Transform> PatchDataset<T> {
    /// List the dataset under `root`, passing every decoded image through
    /// `transform`.
    pub fn with_transform<P: AsRef<Path>>(root: P, transform: T) -> PatchResult<Self> {
        let root = normalize(root.as_ref());
        let slides = scan(&root, 1)?;
        let images = scan(&root, 2)?;
        debug!(
            "Listed {} images in {} slides under {:?}",
            images.len(),
            slides.len(),
            root
        );
        Ok(Self {
            root,
            slides,
            images,
            transform,
        })
    }

    /// Retrieve a sample, counting from the end for negative indices.
    pub fn get_signed(&self, index: isize) -> Result<T::Output, T::Error> {
        let index = resolve_index(index, self.images.len())?;
        self.get(index)
    }

    /// Decode every sample, returning how many failed.
    ///
    /// Failures are logged with their path. With `fail_fast` the first
    /// failure is returned instead.
    pub fn verify(&self, fail_fast: bool) -> Result<usize, T::Error>
    where
        T::Error: fmt::Display,
    {
        let mut failures = 0;
        for (index, result) in self.iter().enumerate() {
            if let Err(err) = result {
                if fail_fast {
                    return Err(err);
                }
                warn!("Failed to decode {}: {}", self.images[index].display(), err);
                failures += 1;
            }
        }
        Ok(failures)
    }
}

impl<T> PatchDataset<T> {
    /// The root directory, with redundant separators removed
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Direct children of the root, sorted
    pub fn slides(&self) -> &[PathBuf] {
        &self.slides
    }

    /// Children of the slides, sorted; the samples of this dataset
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// The file backing sample `index`
    pub fn path(&self, index: usize) -> PatchResult<&Path> {
        self.images
            .get(index)
            .map(PathBuf::as_path)
            .ok_or(PatchError::IndexOutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len: self.images.len(),
            })
    }

    /// The transform applied to every decoded sample
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Distinct file suffixes of the samples, including the leading dot
    pub fn extensions(&self) -> HashSet<String> {
        self.images.iter().map(|path| suffix(path)).collect()
    }
}

impl<T: Transform> Dataset for PatchDataset<T> {
    type Item = T::Output;
    type Error = T::Error;

    fn len(&self) -> usize {
        self.images.len()
    }

    fn get(&self, index: usize) -> Result<T::Output, T::Error> {
        let path = self.path(index)?;
        let image: RgbImage = load_rgb_image(path)?;
        self.transform.apply(image)
    }
}

impl<T> fmt::Display for PatchDataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset PatchDataset")?;
        write!(f, "\n  Root: {}", self.root.display())?;
        write!(f, "\n  Number of samples: {}", self.images.len())?;
        write!(f, "\n  Number of slides: {}", self.slides.len())?;
        write!(f, "\n  Image extensions: {}", self.extensions().iter().join(", "))
    }
}

impl<T> fmt::Debug for PatchDataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchDataset")
            .field("root", &self.root)
            .field("slides", &self.slides.len())
            .field("images", &self.images.len())
            .finish()
    }
}

/// Collect `root` into components, dropping a leading `.` unless it is all
/// there is.
fn normalize(root: &Path) -> PathBuf {
    let mut components = root.components();
    if components.clone().count() > 1 && components.clone().next() == Some(Component::CurDir) {
        components.next();
    }
    components.collect()
}

/// Sorted entries exactly `depth` levels below `root`.
fn scan(root: &Path, depth: usize) -> PatchResult<Vec<PathBuf>> {
    let mut pattern = match root.to_str() {
        Some("") => String::new(),
        Some(prefix) if root.components().next_back() == Some(Component::RootDir) => {
            Pattern::escape(prefix)
        }
        Some(prefix) => Pattern::escape(prefix) + "/",
        None => return Err(PatchError::NonUnicodeRoot(root.to_path_buf())),
    };
    pattern.push_str(&vec!["*"; depth].join("/"));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    // Unreadable entries are skipped rather than failing the listing
    let mut paths: Vec<PathBuf> = glob_with(&pattern, options)?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}

fn suffix(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext),
        _ => String::new(),
    }
}
