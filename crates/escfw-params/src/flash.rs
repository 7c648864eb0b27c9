//! Storage collaborator interface.

use crate::error::FlashResult;

/// Non-volatile storage holding the parameter image.
///
/// The persistence sequence drives an implementation through:
///
/// ```text
/// Protected ──protect(false)──► Unprotected ──erase()──► Erased
///     ▲                                                     │
///     │                                                  write()
///     │                                                     ▼
///     └──────────────────protect(true)─────────────────  Written
/// ```
///
/// `protect(true)` is issued even when an earlier step failed, so an
/// implementation must accept it from any state.
///
/// # Implementation Requirements
///
/// 1. `erase` covers at least `size` bytes starting at `region`
/// 2. `write` targets must already be erased
/// 3. `read` has no side effects and works while protected
pub trait ParamFlash {
    /// Enable or disable write protection on the parameter region.
    ///
    /// # Errors
    ///
    /// Returns an error if the protection state could not be changed.
    fn protect(&mut self, enable: bool) -> FlashResult<()>;

    /// Erase `size` bytes starting at `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is protected, misaligned or out of range.
    fn erase(&mut self, region: u32, size: u32) -> FlashResult<()>;

    /// Program `data` at `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is protected, not erased, misaligned or
    /// out of range.
    fn write(&mut self, region: u32, data: &[u8]) -> FlashResult<()>;

    /// Fill `buf` from `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range lies outside the device.
    fn read(&mut self, region: u32, buf: &mut [u8]) -> FlashResult<()>;
}

impl<F: ParamFlash + ?Sized> ParamFlash for &mut F {
    fn protect(&mut self, enable: bool) -> FlashResult<()> {
        (**self).protect(enable)
    }

    fn erase(&mut self, region: u32, size: u32) -> FlashResult<()> {
        (**self).erase(region, size)
    }

    fn write(&mut self, region: u32, data: &[u8]) -> FlashResult<()> {
        (**self).write(region, data)
    }

    fn read(&mut self, region: u32, buf: &mut [u8]) -> FlashResult<()> {
        (**self).read(region, buf)
    }
}
