//! The parameter record.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::table::ParamId;

/// One named, bounded tunable.
///
/// Identity (`index`, `name`), the factory default and the bounds are fixed at
/// build time. Only [`ParameterStore`](crate::ParameterStore) can change
/// `value`, and only to something inside `[min_value, max_value]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    id: ParamId,
    name: &'static str,
    value: f32,
    default_value: f32,
    min_value: f32,
    max_value: f32,
}

impl Parameter {
    /// Build a compiled table entry.
    #[must_use]
    pub const fn new(
        id: ParamId,
        name: &'static str,
        value: f32,
        default_value: f32,
        min_value: f32,
        max_value: f32,
    ) -> Self {
        Self {
            id,
            name,
            value,
            default_value,
            min_value,
            max_value,
        }
    }

    /// Stable index, `0..PARAM_COUNT`.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.id.index()
    }

    /// Typed identifier for this record.
    #[must_use]
    pub const fn id(&self) -> ParamId {
        self.id
    }

    /// Protocol-facing name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Factory value.
    #[must_use]
    pub const fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min_value(&self) -> f32 {
        self.min_value
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Whether `value` lies inside `[min_value, max_value]`. NaN never does.
    #[must_use]
    pub fn accepts(&self, value: f32) -> bool {
        self.min_value <= value && value <= self.max_value
    }

    /// Whether the current value equals the factory value bit for bit.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.value.to_bits() == self.default_value.to_bits()
    }

    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = value;
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Parameter", 6)?;
        s.serialize_field("index", &self.index())?;
        s.serialize_field("name", self.name)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("default_value", &self.default_value)?;
        s.serialize_field("min_value", &self.min_value)?;
        s.serialize_field("max_value", &self.max_value)?;
        s.end()
    }
}
