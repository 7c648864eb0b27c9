//! Flash image files on disk.
//!
//! An image file holds the raw contents of the parameter flash region. A
//! missing file behaves like freshly erased flash.

use std::fs;
use std::path::{Path, PathBuf};

use escfw_params::{MemoryFlash, ParameterStore, StoreConfig};
use tracing::{debug, info};

use crate::error::CliError;

pub struct ImageFile {
    path: PathBuf,
    flash: MemoryFlash,
}

impl ImageFile {
    /// Open `path`, or start from erased flash if it does not exist.
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let flash = if path.exists() {
            let bytes = fs::read(path)?;
            debug!(path = %path.display(), len = bytes.len(), "Read flash image");
            MemoryFlash::from_bytes(bytes)
                .map_err(|e| CliError::Storage(format!("{}: {e}", path.display())))?
        } else {
            debug!(path = %path.display(), "No flash image, starting erased");
            MemoryFlash::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            flash,
        })
    }

    /// Startup table for this image.
    pub fn load(&mut self, config: &StoreConfig) -> ParameterStore {
        ParameterStore::load(&mut self.flash, config)
    }

    /// Persist `store` into the image and write the file.
    pub fn persist(&mut self, store: &ParameterStore, config: &StoreConfig) -> Result<(), CliError> {
        store.write_params(&mut self.flash, config)?;
        fs::write(&self.path, self.flash.as_bytes())?;
        info!(path = %self.path.display(), "Flash image saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
