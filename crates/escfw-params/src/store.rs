//! Working parameter table: lookup, validated mutation and reset.

use tracing::{debug, warn};

use crate::error::{ParamError, ParamResult};
use crate::parameter::Parameter;
use crate::table::{DEFAULT_TABLE, MAX_NAME_LEN, PARAM_COUNT, ParamId};

/// The working copy of the parameter table.
///
/// Construction copies the compiled defaults; nothing touches storage until
/// [`write_params`](ParameterStore::write_params) is called. The store holds
/// no locks: callers sharing it between a request handler and a control loop
/// must serialize access themselves, including across a persistence write.
///
/// # Example
///
/// ```rust
/// use escfw_params::{ParamError, ParamId, ParameterStore};
///
/// let mut store = ParameterStore::new();
/// store.set_by_name("motor_kv", 920.0)?;
/// assert_eq!(store.get_by_index(ParamId::MotorKv.index())?.name(), "motor_kv");
///
/// // Out-of-range writes are rejected, never clamped.
/// assert!(matches!(
///     store.set_by_name("motor_kv", 99.0),
///     Err(ParamError::InvalidValue { .. })
/// ));
/// # Ok::<(), escfw_params::ParamError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    params: [Parameter; PARAM_COUNT],
}

impl ParameterStore {
    /// Create a store seeded from the compiled defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: DEFAULT_TABLE,
        }
    }

    pub(crate) fn from_params(params: [Parameter; PARAM_COUNT]) -> Self {
        Self { params }
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        PARAM_COUNT
    }

    /// Always false; the table size is fixed at build time.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        PARAM_COUNT == 0
    }

    /// All records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Typed access; cannot fail.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "ParamId discriminants are exactly 0..PARAM_COUNT"
    )]
    pub fn get(&self, id: ParamId) -> &Parameter {
        &self.params[usize::from(id.index())]
    }

    /// Current value of `id`.
    #[must_use]
    pub fn value(&self, id: ParamId) -> f32 {
        self.get(id).value()
    }

    /// Record at `index`.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFoundIndex`] when `index >= PARAM_COUNT`.
    pub fn get_by_index(&self, index: u8) -> ParamResult<&Parameter> {
        self.params
            .get(usize::from(index))
            .ok_or(ParamError::NotFoundIndex(index))
    }

    /// Resolve `name` to an index.
    ///
    /// Matching is exact and case-sensitive. Empty names and names longer than
    /// [`MAX_NAME_LEN`] never match.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<u8> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return None;
        }
        self.params
            .iter()
            .find(|p| p.name() == name)
            .map(Parameter::index)
    }

    /// Record named `name`.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFoundName`] when no record matches.
    pub fn get_by_name(&self, name: &str) -> ParamResult<&Parameter> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ParamError::NotFoundName(name.to_owned()))?;
        self.get_by_index(index)
    }

    /// Set `id` to `value`.
    ///
    /// # Errors
    ///
    /// [`ParamError::InvalidValue`] when `value` is outside the bounds; the
    /// record is left unchanged.
    pub fn set(&mut self, id: ParamId, value: f32) -> ParamResult<()> {
        self.set_by_index(id.index(), value)
    }

    /// Set the record at `index` to `value`.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFoundIndex`] for an unknown index,
    /// [`ParamError::InvalidValue`] when `value` is outside the bounds. In both
    /// cases the table is unchanged.
    pub fn set_by_index(&mut self, index: u8, value: f32) -> ParamResult<()> {
        let param = self
            .params
            .get_mut(usize::from(index))
            .ok_or(ParamError::NotFoundIndex(index))?;

        if !param.accepts(value) {
            warn!(
                name = param.name(),
                value,
                min = param.min_value(),
                max = param.max_value(),
                "Rejected out-of-bounds parameter write"
            );
            return Err(ParamError::InvalidValue {
                name: param.name(),
                value,
                min: param.min_value(),
                max: param.max_value(),
            });
        }

        param.set_value(value);
        debug!(name = param.name(), value, "Parameter updated");
        Ok(())
    }

    /// Set the record named `name` to `value`.
    ///
    /// # Errors
    ///
    /// Same as [`set_by_index`](Self::set_by_index), with
    /// [`ParamError::NotFoundName`] for an unknown name.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> ParamResult<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ParamError::NotFoundName(name.to_owned()))?;
        self.set_by_index(index, value)
    }

    /// Restore the record at `index` to its factory value.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFoundIndex`] for an unknown index.
    pub fn reset_by_index(&mut self, index: u8) -> ParamResult<()> {
        let param = self
            .params
            .get_mut(usize::from(index))
            .ok_or(ParamError::NotFoundIndex(index))?;
        param.set_value(param.default_value());
        debug!(name = param.name(), value = param.value(), "Parameter reset");
        Ok(())
    }

    /// Restore the record named `name` to its factory value.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFoundName`] for an unknown name.
    pub fn reset_by_name(&mut self, name: &str) -> ParamResult<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ParamError::NotFoundName(name.to_owned()))?;
        self.reset_by_index(index)
    }

    /// Restore every record to its factory value.
    pub fn reset_to_defaults(&mut self) {
        for param in &mut self.params {
            param.set_value(param.default_value());
        }
        debug!(count = PARAM_COUNT, "All parameters reset to factory values");
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ParameterStore {
    type Item = &'a Parameter;
    type IntoIter = core::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_new_copies_compiled_table() {
        let store = ParameterStore::new();
        assert_eq!(store.len(), PARAM_COUNT);
        assert!(!store.is_empty());
        for (param, compiled) in store.iter().zip(DEFAULT_TABLE.iter()) {
            assert_eq!(param, compiled);
        }
    }

    #[test]
    fn test_initial_values_are_compiled_values_not_defaults() {
        let store = ParameterStore::new();
        let current = store.get(ParamId::MotorCurrentLimit);
        assert!((current.value() - 1.0).abs() < f32::EPSILON);
        assert!((current.default_value() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_name_lookup_is_case_sensitive() {
        let store = ParameterStore::new();
        assert_eq!(store.index_of("motor_kv"), Some(6));
        assert_eq!(store.index_of("MOTOR_KV"), None);
        assert_eq!(store.index_of("motor_k"), None);
        assert_eq!(store.index_of("motor_kv "), None);
    }

    #[test]
    fn test_name_lookup_rejects_overlong_names() {
        let store = ParameterStore::new();
        let overlong = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(store.index_of(&overlong), None);
        assert_eq!(store.index_of(""), None);
    }

    #[test]
    fn test_set_accepts_bounds_inclusive() -> TestResult {
        let mut store = ParameterStore::new();
        store.set(ParamId::MotorKv, 100.0)?;
        assert!((store.value(ParamId::MotorKv) - 100.0).abs() < f32::EPSILON);
        store.set(ParamId::MotorKv, 5000.0)?;
        assert!((store.value(ParamId::MotorKv) - 5000.0).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_rejected_write_is_logged() {
        let mut store = ParameterStore::new();
        let result = store.set_by_name("pwm_throttle_max", 2500.0);
        assert!(matches!(result, Err(ParamError::InvalidValue { .. })));
        assert!(logs_contain("Rejected out-of-bounds parameter write"));
    }

    #[test]
    fn test_set_nan_is_rejected() {
        let mut store = ParameterStore::new();
        let result = store.set(ParamId::ControlAccelGain, f32::NAN);
        assert!(matches!(result, Err(ParamError::InvalidValue { .. })));
        assert!((store.value(ParamId::ControlAccelGain) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset_restores_default() -> TestResult {
        let mut store = ParameterStore::new();
        store.reset_by_name("motor_current_limit")?;
        assert!((store.value(ParamId::MotorCurrentLimit) - 10.0).abs() < f32::EPSILON);

        store.set(ParamId::UavcanNodeId, 42.0)?;
        store.reset_to_defaults();
        assert!(store.iter().all(Parameter::is_default));
        Ok(())
    }

    #[test]
    fn test_reset_unknown_index() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.reset_by_index(22),
            Err(ParamError::NotFoundIndex(22))
        );
    }
}
