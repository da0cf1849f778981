use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::Comparator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Stop scheduling comparisons once this many mismatches are recorded.
    /// A compound member already in progress may overshoot it.
    pub max_diff_count: usize,
    /// Deepest nesting level compared. `0` means unlimited; branches past
    /// the limit are abandoned with a warning.
    pub max_depth: usize,
    /// Decimal digits floats are rounded to before comparison.
    pub float_precision: u16,
    /// Compare members that generic code may not read.
    pub compare_unexported_fields: bool,
    /// Emit diagnostics as `tracing` events.
    pub log_errors: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_diff_count: 10,
            max_depth: 0,
            float_precision: 10,
            compare_unexported_fields: false,
            log_errors: false,
        }
    }
}

impl DiffConfig {
    pub fn with_max_diff_count(mut self, max_diff_count: usize) -> Self {
        self.max_diff_count = max_diff_count;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_float_precision(mut self, float_precision: u16) -> Self {
        self.float_precision = float_precision;
        self
    }

    pub fn with_unexported_fields(mut self, compare: bool) -> Self {
        self.compare_unexported_fields = compare;
        self
    }

    pub fn with_log_errors(mut self, log_errors: bool) -> Self {
        self.log_errors = log_errors;
        self
    }
}
