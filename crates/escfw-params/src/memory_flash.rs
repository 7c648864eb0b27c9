//! In-memory NOR flash simulation.
//!
//! [`MemoryFlash`] implements [`ParamFlash`] over a byte vector for tests and
//! host tools. It enforces the constraints real parts impose (protection,
//! erase-before-write, alignment) and journals every call so callers can
//! check ordering.

use core::ops::Range;

use serde::Serialize;

use crate::error::{FlashError, FlashResult};
use crate::flash::ParamFlash;
use crate::image::{ERASE_BLOCK_SIZE, WRITE_GRANULARITY};

/// Value of an erased cell.
pub const ERASED: u8 = 0xFF;

/// One journaled storage call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashOp {
    /// `protect(enable)`.
    Protect(bool),
    /// `erase(region, size)`.
    Erase {
        /// Start address.
        region: u32,
        /// Bytes erased.
        size: u32,
    },
    /// `write(region, data)`.
    Write {
        /// Start address.
        region: u32,
        /// Bytes written.
        len: usize,
    },
    /// `read(region, buf)`.
    Read {
        /// Start address.
        region: u32,
        /// Bytes read.
        len: usize,
    },
}

impl FlashOp {
    /// Kind of this call.
    #[must_use]
    pub fn kind(&self) -> FlashOpKind {
        match self {
            Self::Protect(_) => FlashOpKind::Protect,
            Self::Erase { .. } => FlashOpKind::Erase,
            Self::Write { .. } => FlashOpKind::Write,
            Self::Read { .. } => FlashOpKind::Read,
        }
    }
}

/// Storage call kinds, used to schedule injected faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashOpKind {
    /// [`ParamFlash::protect`].
    Protect,
    /// [`ParamFlash::erase`].
    Erase,
    /// [`ParamFlash::write`].
    Write,
    /// [`ParamFlash::read`].
    Read,
}

/// In-memory flash device.
///
/// Starts fully erased and write-protected.
///
/// # Example
///
/// ```rust
/// use escfw_params::{FlashOp, MemoryFlash, ParamFlash};
///
/// let mut flash = MemoryFlash::new(2048);
/// flash.protect(false)?;
/// flash.erase(0, 2048)?;
/// flash.write(0, &[1, 2, 3, 4])?;
/// flash.protect(true)?;
///
/// assert_eq!(flash.as_bytes().get(..4), Some([1, 2, 3, 4].as_slice()));
/// assert_eq!(flash.journal().len(), 4);
/// assert_eq!(flash.journal().last(), Some(&FlashOp::Protect(true)));
/// # Ok::<(), escfw_params::FlashError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFlash {
    cells: Vec<u8>,
    protected: bool,
    erase_block: u32,
    write_granularity: u32,
    erase_count: u32,
    journal: Vec<FlashOp>,
    faults: Vec<FlashOpKind>,
}

impl MemoryFlash {
    /// Create an erased device of `capacity` bytes with the default geometry.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self::with_geometry(capacity, ERASE_BLOCK_SIZE, WRITE_GRANULARITY)
    }

    /// Create an erased device with explicit erase block and write sizes.
    #[must_use]
    pub fn with_geometry(capacity: u32, erase_block: u32, write_granularity: u32) -> Self {
        Self {
            cells: vec![ERASED; capacity as usize],
            protected: true,
            erase_block,
            write_granularity,
            erase_count: 0,
            journal: Vec::new(),
            faults: Vec::new(),
        }
    }

    /// Wrap existing contents, e.g. an image file read from disk.
    ///
    /// # Errors
    ///
    /// [`FlashError::Misaligned`] if the length is not a non-zero multiple of
    /// the erase block, [`FlashError::OutOfRange`] if it exceeds the 32-bit
    /// address space.
    pub fn from_bytes(cells: Vec<u8>) -> FlashResult<Self> {
        let Ok(capacity) = u32::try_from(cells.len()) else {
            return Err(FlashError::OutOfRange {
                address: 0,
                len: cells.len(),
            });
        };
        if capacity == 0 || !capacity.is_multiple_of(ERASE_BLOCK_SIZE) {
            return Err(FlashError::Misaligned { address: capacity });
        }
        Ok(Self {
            cells,
            ..Self::new(0)
        })
    }

    /// Raw contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Consume the device, returning its contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.cells
    }

    /// Whether writes and erases are currently refused.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Successful erases since creation.
    #[must_use]
    pub fn erase_count(&self) -> u32 {
        self.erase_count
    }

    /// Every call made so far, failed ones included.
    #[must_use]
    pub fn journal(&self) -> &[FlashOp] {
        &self.journal
    }

    /// Forget recorded calls.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Make the next call of `kind` fail with a hardware error.
    ///
    /// Faults queue up; scheduling the same kind twice fails the next two
    /// calls of that kind.
    pub fn fail_next(&mut self, kind: FlashOpKind) {
        self.faults.push(kind);
    }

    fn record(&mut self, op: FlashOp) -> FlashResult<()> {
        let kind = op.kind();
        self.journal.push(op);
        match self.faults.iter().position(|&k| k == kind) {
            Some(pos) => {
                self.faults.remove(pos);
                Err(FlashError::hardware(format!("injected {kind:?} fault")))
            }
            None => Ok(()),
        }
    }

    fn span(&self, region: u32, len: usize) -> FlashResult<Range<usize>> {
        let start = region as usize;
        start
            .checked_add(len)
            .filter(|&end| end <= self.cells.len())
            .map(|end| start..end)
            .ok_or(FlashError::OutOfRange {
                address: region,
                len,
            })
    }

    fn check_aligned(region: u32, len: usize, unit: u32) -> FlashResult<()> {
        if !region.is_multiple_of(unit) {
            return Err(FlashError::Misaligned { address: region });
        }
        if !len.is_multiple_of(unit as usize) {
            return Err(FlashError::Misaligned { address: region });
        }
        Ok(())
    }
}

impl Default for MemoryFlash {
    fn default() -> Self {
        Self::new(ERASE_BLOCK_SIZE)
    }
}

impl ParamFlash for MemoryFlash {
    fn protect(&mut self, enable: bool) -> FlashResult<()> {
        self.record(FlashOp::Protect(enable))?;
        self.protected = enable;
        Ok(())
    }

    fn erase(&mut self, region: u32, size: u32) -> FlashResult<()> {
        self.record(FlashOp::Erase { region, size })?;
        if self.protected {
            return Err(FlashError::Protected);
        }
        Self::check_aligned(region, size as usize, self.erase_block)?;
        let span = self.span(region, size as usize)?;
        let cells = self.cells.get_mut(span).ok_or(FlashError::OutOfRange {
            address: region,
            len: size as usize,
        })?;
        cells.fill(ERASED);
        self.erase_count = self.erase_count.saturating_add(1);
        Ok(())
    }

    fn write(&mut self, region: u32, data: &[u8]) -> FlashResult<()> {
        self.record(FlashOp::Write {
            region,
            len: data.len(),
        })?;
        if self.protected {
            return Err(FlashError::Protected);
        }
        Self::check_aligned(region, data.len(), self.write_granularity)?;
        let span = self.span(region, data.len())?;
        let cells = self.cells.get_mut(span).ok_or(FlashError::OutOfRange {
            address: region,
            len: data.len(),
        })?;
        if let Some((address, _)) = (region..).zip(cells.iter()).find(|&(_, &b)| b != ERASED) {
            return Err(FlashError::NotErased { address });
        }
        cells.copy_from_slice(data);
        Ok(())
    }

    fn read(&mut self, region: u32, buf: &mut [u8]) -> FlashResult<()> {
        self.record(FlashOp::Read {
            region,
            len: buf.len(),
        })?;
        let span = self.span(region, buf.len())?;
        let cells = self.cells.get(span).ok_or(FlashError::OutOfRange {
            address: region,
            len: buf.len(),
        })?;
        buf.copy_from_slice(cells);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_starts_erased_and_protected() {
        let flash = MemoryFlash::new(4096);
        assert!(flash.is_protected());
        assert_eq!(flash.as_bytes().len(), 4096);
        assert!(flash.as_bytes().iter().all(|&b| b == ERASED));
        assert!(flash.journal().is_empty());
    }

    #[test]
    fn test_protected_refuses_erase_and_write() {
        let mut flash = MemoryFlash::new(2048);
        assert_eq!(flash.erase(0, 2048), Err(FlashError::Protected));
        assert_eq!(flash.write(0, &[0; 4]), Err(FlashError::Protected));
        assert_eq!(flash.erase_count(), 0);
    }

    #[test]
    fn test_write_requires_erased_target() -> TestResult {
        let mut flash = MemoryFlash::new(2048);
        flash.protect(false)?;
        flash.write(8, &[0xAA; 4])?;
        assert_eq!(
            flash.write(4, &[0x55; 8]),
            Err(FlashError::NotErased { address: 8 })
        );
        flash.erase(0, 2048)?;
        flash.write(4, &[0x55; 8])?;
        assert_eq!(flash.erase_count(), 1);
        Ok(())
    }

    #[test]
    fn test_alignment_and_range_checks() -> TestResult {
        let mut flash = MemoryFlash::new(2048);
        flash.protect(false)?;
        assert_eq!(flash.write(2, &[0; 4]), Err(FlashError::Misaligned { address: 2 }));
        assert_eq!(flash.write(0, &[0; 3]), Err(FlashError::Misaligned { address: 0 }));
        assert_eq!(flash.erase(0, 1024), Err(FlashError::Misaligned { address: 0 }));
        assert_eq!(
            flash.erase(2048, 2048),
            Err(FlashError::OutOfRange {
                address: 2048,
                len: 2048
            })
        );
        let mut buf = [0u8; 8];
        assert_eq!(
            flash.read(2044, &mut buf),
            Err(FlashError::OutOfRange {
                address: 2044,
                len: 8
            })
        );
        Ok(())
    }

    #[test]
    fn test_injected_fault_is_journaled() -> TestResult {
        let mut flash = MemoryFlash::new(2048);
        flash.fail_next(FlashOpKind::Protect);
        assert!(matches!(flash.protect(false), Err(FlashError::Hardware(_))));
        assert!(flash.is_protected());
        flash.protect(false)?;
        assert_eq!(
            flash.journal(),
            &[FlashOp::Protect(false), FlashOp::Protect(false)]
        );
        flash.clear_journal();
        assert!(flash.journal().is_empty());
        Ok(())
    }

    #[test]
    fn test_from_bytes_validates_length() -> TestResult {
        assert_eq!(
            MemoryFlash::from_bytes(vec![0; 100]).map(|f| f.as_bytes().len()),
            Err(FlashError::Misaligned { address: 100 })
        );
        assert_eq!(
            MemoryFlash::from_bytes(Vec::new()).map(|f| f.as_bytes().len()),
            Err(FlashError::Misaligned { address: 0 })
        );
        let flash = MemoryFlash::from_bytes(vec![0x11; 4096])?;
        assert!(flash.is_protected());
        assert_eq!(flash.into_bytes(), vec![0x11; 4096]);
        Ok(())
    }
}
