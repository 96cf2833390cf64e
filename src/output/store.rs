use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::RgbaImage;

use crate::foundation::core::View;
use crate::foundation::error::{SwatchfitError, SwatchfitResult};

/// Extension of every written mockup. PNG keeps the mask-derived alpha lossless.
pub const OUTPUT_EXTENSION: &str = "png";

/// Mode requested for written mockups, before the process umask applies.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Deterministic identity of one output image.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MockupName {
    /// Validated fabric reference.
    pub fabric_ref: String,
    /// Garment slug (`men-polo`).
    pub garment_slug: String,
    /// Rendered view.
    pub view: View,
}

impl MockupName {
    /// `{fabric_ref}_{garment_slug}_{view}.png`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.{OUTPUT_EXTENSION}",
            self.fabric_ref,
            self.garment_slug,
            self.view.tag()
        )
    }
}

/// Destination for composited mockups.
///
/// Implementations must be shareable across threads: batch generation persists from several
/// workers at once.
pub trait MockupStore: Send + Sync {
    /// Make the destination ready. Called once per request before any `persist`; an error here
    /// aborts the request.
    fn prepare(&self) -> SwatchfitResult<()>;

    /// Store `image` under `name` and return where it landed. Same name overwrites.
    fn persist(&self, name: &MockupName, image: &RgbaImage) -> SwatchfitResult<PathBuf>;
}

impl<T: MockupStore + ?Sized> MockupStore for std::sync::Arc<T> {
    fn prepare(&self) -> SwatchfitResult<()> {
        (**self).prepare()
    }

    fn persist(&self, name: &MockupName, img: &RgbaImage) -> SwatchfitResult<PathBuf> {
        (**self).persist(name, img)
    }
}

/// Writes PNG files into a directory, atomically per file.
#[derive(Clone, Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Store rooted at `dir`; the directory is created by [`MockupStore::prepare`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a given name is written to.
    pub fn path_for(&self, name: &MockupName) -> PathBuf {
        self.dir.join(name.file_name())
    }
}

impl MockupStore for DirStore {
    fn prepare(&self) -> SwatchfitResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SwatchfitError::io(&self.dir, e))
    }

    fn persist(&self, name: &MockupName, img: &RgbaImage) -> SwatchfitResult<PathBuf> {
        let dest = self.path_for(name);

        // Encode into a sibling temp file so a concurrent reader of `dest` only ever sees a
        // complete image.
        let mut builder = tempfile::Builder::new();
        builder.prefix(".swatchfit-").suffix(".tmp");
        // Temp files default to owner-only; the rename keeps that mode on the mockup.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            builder.permissions(std::fs::Permissions::from_mode(OUTPUT_MODE));
        }
        let tmp = builder
            .tempfile_in(&self.dir)
            .map_err(|e| SwatchfitError::io(&self.dir, e))?;
        {
            let mut w = BufWriter::new(tmp.as_file());
            img.write_to(&mut w, image::ImageFormat::Png)
                .map_err(|e| SwatchfitError::decode(&dest, e))?;
            w.flush().map_err(|e| SwatchfitError::io(tmp.path(), e))?;
        }
        tmp.persist(&dest)
            .map_err(|e| SwatchfitError::io(&dest, e.error))?;

        Ok(dest)
    }
}

/// Keeps mockups in memory; useful for tests and dry runs.
#[derive(Debug)]
pub struct InMemoryStore {
    root: PathBuf,
    images: Mutex<Vec<(MockupName, RgbaImage)>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store. Returned paths are virtual, under `mem://`.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("mem://"),
            images: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything persisted so far, in persist order.
    pub fn images(&self) -> anyhow::Result<Vec<(MockupName, RgbaImage)>> {
        let guard = self
            .images
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.clone())
    }
}

impl MockupStore for InMemoryStore {
    fn prepare(&self) -> SwatchfitResult<()> {
        Ok(())
    }

    fn persist(&self, name: &MockupName, img: &RgbaImage) -> SwatchfitResult<PathBuf> {
        let mut guard = self
            .images
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned while persisting"))?;
        guard.retain(|(n, _)| n != name);
        guard.push((name.clone(), img.clone()));
        Ok(self.root.join(name.file_name()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/store.rs"]
mod tests;
