//! Fixed binary layout of the parameter table.
//!
//! Each record is [`RECORD_SIZE`] bytes, little-endian:
//!
//! ```text
//! +-------+-------------------+-------+---------+-----+-----+
//! | index | name (NUL-padded) | value | default | min | max |
//! |  u8   |     [u8; 27]      |  f32  |   f32   | f32 | f32 |
//! +-------+-------------------+-------+---------+-----+-----+
//! ```
//!
//! Records follow each other in index order with no header or padding.

use crate::error::ImageError;
use crate::parameter::Parameter;
use crate::store::ParameterStore;
use crate::table::{DEFAULT_TABLE, MAX_NAME_LEN, PARAM_COUNT};

/// Name field width, including room for the terminator.
pub const NAME_FIELD_LEN: usize = MAX_NAME_LEN + 1;

/// Encoded size of one record.
pub const RECORD_SIZE: usize = 1 + NAME_FIELD_LEN + 4 * 4;

/// Encoded size of the whole table.
pub const IMAGE_LEN: usize = PARAM_COUNT * RECORD_SIZE;

/// Smallest unit the storage medium can program, in bytes.
pub const WRITE_GRANULARITY: u32 = 4;

/// Erase block holding the image, in bytes.
pub const ERASE_BLOCK_SIZE: u32 = 2048;

const _: () = assert!(
    IMAGE_LEN.is_multiple_of(WRITE_GRANULARITY as usize),
    "image must be a whole number of flash words"
);
const _: () = assert!(
    IMAGE_LEN <= ERASE_BLOCK_SIZE as usize,
    "image must fit one erase block"
);

/// An encoded table.
pub type ParamImage = [u8; IMAGE_LEN];

fn name_field(name: &str) -> [u8; NAME_FIELD_LEN] {
    let mut field = [0u8; NAME_FIELD_LEN];
    for (dst, src) in field.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    field
}

fn encode_record(param: &Parameter) -> impl Iterator<Item = u8> {
    core::iter::once(param.index())
        .chain(name_field(param.name()))
        .chain(param.value().to_le_bytes())
        .chain(param.default_value().to_le_bytes())
        .chain(param.min_value().to_le_bytes())
        .chain(param.max_value().to_le_bytes())
}

struct RawRecord<'a> {
    index: u8,
    name: &'a [u8; NAME_FIELD_LEN],
    value: f32,
    default_value: f32,
    min_value: f32,
    max_value: f32,
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Option<&'a [u8; N]> {
        let (head, tail) = self.0.split_first_chunk::<N>()?;
        self.0 = tail;
        Some(head)
    }

    fn f32(&mut self) -> Option<f32> {
        self.take::<4>().map(|b| f32::from_le_bytes(*b))
    }
}

fn decode_record(record: &[u8; RECORD_SIZE]) -> Option<RawRecord<'_>> {
    let mut r = Reader(record);
    Some(RawRecord {
        index: u8::from_le_bytes(*r.take::<1>()?),
        name: r.take::<NAME_FIELD_LEN>()?,
        value: r.f32()?,
        default_value: r.f32()?,
        min_value: r.f32()?,
        max_value: r.f32()?,
    })
}

fn same_bits(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

impl ParameterStore {
    /// Encode the working table.
    #[must_use]
    pub fn encode(&self) -> ParamImage {
        let mut image = [0u8; IMAGE_LEN];
        for (dst, src) in image.iter_mut().zip(self.iter().flat_map(encode_record)) {
            *dst = src;
        }
        image
    }

    /// Decode and validate a persisted image.
    ///
    /// Every record must carry the index and name the compiled table holds at
    /// that position (NUL padding included), the compiled default and bounds
    /// bit for bit, and a value inside those bounds.
    ///
    /// # Errors
    ///
    /// The first [`ImageError`] found, scanning records in index order.
    pub fn from_image(bytes: &[u8]) -> Result<Self, ImageError> {
        let invalid_length = ImageError::InvalidLength {
            expected: IMAGE_LEN,
            actual: bytes.len(),
        };
        if bytes.len() != IMAGE_LEN {
            return Err(invalid_length);
        }

        let (records, _) = bytes.as_chunks::<RECORD_SIZE>();
        let mut params = DEFAULT_TABLE;

        for (position, (record, param)) in records.iter().zip(params.iter_mut()).enumerate() {
            let raw = decode_record(record).ok_or_else(|| invalid_length.clone())?;

            if raw.index != param.index() || *raw.name != name_field(param.name()) {
                return Err(ImageError::IdentityMismatch {
                    position,
                    expected: param.name(),
                });
            }
            if !same_bits(raw.default_value, param.default_value())
                || !same_bits(raw.min_value, param.min_value())
                || !same_bits(raw.max_value, param.max_value())
            {
                return Err(ImageError::BoundsMismatch { name: param.name() });
            }
            if !param.accepts(raw.value) {
                return Err(ImageError::ValueOutOfBounds {
                    name: param.name(),
                    value: raw.value,
                });
            }
            param.set_value(raw.value);
        }

        Ok(Self::from_params(params))
    }
}
