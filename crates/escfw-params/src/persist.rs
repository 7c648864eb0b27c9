//! Persisting the working table and restoring it at startup.

use tracing::{debug, error, info, warn};

use crate::config::{Seed, StoreConfig};
use crate::error::{FlashResult, ParamError, ParamResult};
use crate::flash::ParamFlash;
use crate::image::IMAGE_LEN;
use crate::store::ParameterStore;

fn logged(step: &'static str, result: FlashResult<()>) -> FlashResult<()> {
    if let Err(e) = &result {
        error!(step, error = %e, "Flash operation failed");
    }
    result
}

impl ParameterStore {
    /// Write the working table to storage.
    ///
    /// Issues `protect(false)`, `erase`, `write`, `protect(true)` and nothing
    /// else. Protection is restored even when an earlier step fails, and a
    /// failed erase skips the write. There is no read-back: an interruption
    /// between erase and write leaves a blank or partial image, which
    /// [`load`](Self::load) rejects.
    ///
    /// # Errors
    ///
    /// [`ParamError::Config`](crate::ParamError::Config) if `config` is
    /// invalid (no storage call is made), otherwise
    /// [`ParamError::Storage`](crate::ParamError::Storage) carrying the first
    /// failed step.
    pub fn write_params<F: ParamFlash + ?Sized>(
        &self,
        flash: &mut F,
        config: &StoreConfig,
    ) -> ParamResult<()> {
        config.validate()?;
        let image = self.encode();

        let staged = logged("unprotect", flash.protect(false))
            .and_then(|()| logged("erase", flash.erase(config.region_base, config.erase_size)))
            .and_then(|()| logged("write", flash.write(config.region_base, &image)));
        let relocked = logged("protect", flash.protect(true));

        staged.and(relocked)?;
        debug!(
            region = config.region_base,
            bytes = IMAGE_LEN,
            "Parameters written to flash"
        );
        Ok(())
    }

    /// Read and validate the persisted table.
    ///
    /// # Errors
    ///
    /// [`ParamError::Config`](crate::ParamError::Config) for an invalid
    /// layout, [`ParamError::Storage`](crate::ParamError::Storage) if the read
    /// fails, [`ParamError::Image`](crate::ParamError::Image) if the stored
    /// bytes are not a valid image for this build.
    pub fn try_load<F: ParamFlash + ?Sized>(
        flash: &mut F,
        config: &StoreConfig,
    ) -> ParamResult<Self> {
        config.validate()?;
        let mut image = [0u8; IMAGE_LEN];
        flash.read(config.region_base, &mut image)?;
        Self::from_image(&image).map_err(ParamError::from)
    }

    /// Build the startup table according to `config.seed`.
    ///
    /// With [`Seed::Persisted`] the stored image is used when it validates;
    /// anything else, including blank flash on first boot, falls back to the
    /// compiled table with a warning.
    pub fn load<F: ParamFlash + ?Sized>(flash: &mut F, config: &StoreConfig) -> Self {
        match config.seed {
            Seed::Defaults => {
                debug!("Seeding parameters from compiled defaults");
                Self::new()
            }
            Seed::Persisted => match Self::try_load(flash, config) {
                Ok(store) => {
                    info!(region = config.region_base, "Loaded persisted parameters");
                    store
                }
                Err(e) => {
                    warn!(error = %e, "Persisted parameters unusable, using compiled defaults");
                    Self::new()
                }
            },
        }
    }
}
