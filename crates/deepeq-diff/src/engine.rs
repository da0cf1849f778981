//! The comparison walk.
//!
//! A [`Comparator`] holds a [`DiffConfig`]; every call opens a fresh
//! session that walks both values depth-first, tracks the current path and
//! records one string per mismatch:
//!
//! ```text
//! Service.replicas: 3 != 4
//! Service.labels.map[tier]: web != <does not have key>
//! Service.ports.slice[2]: <no value> != 8443
//! ```
//!
//! Mapping entries are visited in each mapping's own iteration order, so
//! the relative order of diffs under a `HashMap` is unspecified. The set of
//! diffs is not.

use std::fmt;

use deepeq_types::{is_nil, Kind, MapView, Record, Reflect, Sequence, Show};
use tracing::{debug, warn};

use crate::config::DiffConfig;
use crate::error::{DiffError, Warning};

const NIL_POINTER: &str = "<nil pointer>";
const NIL_MAP: &str = "<nil map>";
const NIL_SLICE: &str = "<nil slice>";
const MISSING_KEY: &str = "<does not have key>";
const NO_VALUE: &str = "<no value>";

/// The outcome of one comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Mismatches in discovery order.
    pub diffs: Vec<String>,
    /// Diagnostics raised along the way.
    pub warnings: Vec<Warning>,
}

impl Comparison {
    /// Returns `true` if no mismatch was recorded.
    pub fn is_equal(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Number of mismatches.
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    /// Same as [`Comparison::is_equal`].
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// The mismatches, or `None` when there are none.
    pub fn into_diffs(self) -> Option<Vec<String>> {
        if self.diffs.is_empty() {
            None
        } else {
            Some(self.diffs)
        }
    }
}

/// Structural comparison with a fixed configuration.
///
/// A comparator carries no per-call state and can be shared freely.
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    config: DiffConfig,
}

impl Comparator {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare `a` against `b`, returning diffs and warnings.
    pub fn compare(&self, a: &dyn Reflect, b: &dyn Reflect) -> Comparison {
        let mut session = Session::new(&self.config);

        match (is_nil(a), is_nil(b)) {
            (true, true) => {}
            (true, false) => session.record(NIL_POINTER, Show::new(b)),
            (false, true) => session.record(Show::new(a), NIL_POINTER),
            (false, false) => session.equals(Some(a), Some(b), 0),
        }

        debug!(
            diffs = session.diffs.len(),
            warnings = session.warnings.len(),
            "comparison finished"
        );
        session.finish()
    }

    /// Compare `a` against `b`. `None` means no difference.
    pub fn equal(&self, a: &dyn Reflect, b: &dyn Reflect) -> Option<Vec<String>> {
        self.compare(a, b).into_diffs()
    }
}

/// Compare `a` against `b` with the default configuration. `None` means no
/// difference.
///
/// ```
/// use deepeq_diff::equal;
///
/// assert_eq!(equal(&1.00000000001, &1.00000000002), None);
/// assert_eq!(
///     equal(&vec![1, 2], &vec![1, 2, 3]),
///     Some(vec!["slice[2]: <no value> != 3".to_string()]),
/// );
/// ```
pub fn equal(a: &dyn Reflect, b: &dyn Reflect) -> Option<Vec<String>> {
    Comparator::default().equal(a, b)
}

/// Per-call state: the mismatches found so far and the current path.
struct Session<'c> {
    config: &'c DiffConfig,
    diffs: Vec<String>,
    path: Vec<String>,
    warnings: Vec<Warning>,
}

impl<'c> Session<'c> {
    fn new(config: &'c DiffConfig) -> Self {
        Self {
            config,
            diffs: Vec::new(),
            path: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn finish(self) -> Comparison {
        Comparison {
            diffs: self.diffs,
            warnings: self.warnings,
        }
    }

    fn equals(&mut self, a: Option<&dyn Reflect>, b: Option<&dyn Reflect>, depth: usize) {
        let max_depth = self.config.max_depth;
        if max_depth > 0 && depth > max_depth {
            self.warn(DiffError::MaxRecursionExceeded { max_depth });
            return;
        }

        let (a, b) = match (a.filter(|v| !is_nil(*v)), b.filter(|v| !is_nil(*v))) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => return self.record(a.type_name(), NIL_POINTER),
            (None, Some(b)) => return self.record(NIL_POINTER, b.type_name()),
            (None, None) => return,
        };

        if a.type_name() != b.type_name() {
            self.record(a.type_name(), b.type_name());
            self.warn(DiffError::type_mismatch(a.type_name(), b.type_name()));
            return;
        }

        if let (Some(a_msg), Some(b_msg)) = (a.error_message(), b.error_message()) {
            if a_msg != b_msg {
                return self.record(a_msg, b_msg);
            }
        }

        match (a.reflect(), b.reflect()) {
            (Kind::Indirect(x), Kind::Indirect(y)) => self.equals(x, y, depth + 1),
            (Kind::Indirect(x), _) => self.equals(x, Some(b), depth + 1),
            (_, Kind::Indirect(y)) => self.equals(Some(a), y, depth + 1),
            (Kind::Record(x), Kind::Record(y)) => self.records(a, b, &x, &y, depth),
            (Kind::Map(x), Kind::Map(y)) => self.maps(a, b, x, y, depth),
            (Kind::Array(x), Kind::Array(y)) => self.arrays(x, y, depth),
            (Kind::Slice(x), Kind::Slice(y)) => self.slices(a, b, x, y, depth),
            (Kind::Float(x), Kind::Float(y)) => self.floats(a, b, x, y),
            (Kind::Bool(x), Kind::Bool(y)) => self.scalar(x, y),
            (Kind::Int(x), Kind::Int(y)) => self.scalar(x, y),
            (Kind::Uint(x), Kind::Uint(y)) => self.scalar(x, y),
            (Kind::Str(x), Kind::Str(y)) => self.scalar(x, y),
            (Kind::Opaque, Kind::Opaque) => self.warn(DiffError::UnsupportedKind {
                type_name: a.type_name().to_string(),
            }),
            // Same type name, different shape: only reachable through types
            // whose variants reflect differently, such as JSON numbers.
            (Kind::Int(x), Kind::Uint(y)) => self.scalar(i128::from(x), i128::from(y)),
            (Kind::Uint(x), Kind::Int(y)) => self.scalar(i128::from(x), i128::from(y)),
            (x, y) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => self.floats(a, b, x, y),
                _ => {
                    self.record(Show::new(a), Show::new(b));
                    self.warn(DiffError::type_mismatch(x.name(), y.name()));
                }
            },
        }
    }

    fn floats(&mut self, a: &dyn Reflect, b: &dyn Reflect, x: f64, y: f64) {
        let precision = usize::from(self.config.float_precision);
        if format!("{x:.precision$}") != format!("{y:.precision$}") {
            self.record(Show::new(a), Show::new(b));
        }
    }

    fn scalar<T: PartialEq + fmt::Display>(&mut self, a: T, b: T) {
        if a != b {
            self.record(a, b);
        }
    }

    fn records(
        &mut self,
        a: &dyn Reflect,
        b: &dyn Reflect,
        x: &Record<'_>,
        y: &Record<'_>,
        depth: usize,
    ) {
        if let Some(same) = a.equal_hook(b) {
            if !same {
                self.record(Show::new(a), Show::new(b));
            }
            return;
        }

        for (af, bf) in x.fields().iter().zip(y.fields()) {
            if !af.exported && !self.config.compare_unexported_fields {
                continue;
            }
            if af.excluded {
                continue;
            }

            self.path.push(af.name.to_string());
            self.equals(Some(af.value), Some(bf.value), depth + 1);
            self.path.pop();

            if self.capped() {
                break;
            }
        }
    }

    fn maps(
        &mut self,
        a: &dyn Reflect,
        b: &dyn Reflect,
        x: Option<&dyn MapView>,
        y: Option<&dyn MapView>,
        depth: usize,
    ) {
        let (x, y) = match (x, y) {
            (Some(x), Some(y)) => (x, y),
            (None, Some(_)) => return self.record(NIL_MAP, Show::new(b)),
            (Some(_), None) => return self.record(Show::new(a), NIL_MAP),
            (None, None) => return,
        };

        if x.storage() == y.storage() {
            return;
        }

        for (key, av) in x.entries() {
            self.path.push(format!("map[{key}]"));
            match y.lookup(key) {
                Some(bv) => self.equals(Some(av), Some(bv), depth + 1),
                None => self.record(Show::new(av), MISSING_KEY),
            }
            self.path.pop();

            if self.capped() {
                return;
            }
        }

        for (key, bv) in y.entries() {
            if x.lookup(key).is_some() {
                continue;
            }

            self.path.push(format!("map[{key}]"));
            self.record(MISSING_KEY, Show::new(bv));
            self.path.pop();

            if self.capped() {
                return;
            }
        }
    }

    fn arrays(&mut self, x: &dyn Sequence, y: &dyn Sequence, depth: usize) {
        for i in 0..x.len().min(y.len()) {
            self.path.push(format!("array[{i}]"));
            self.equals(x.get(i), y.get(i), depth + 1);
            self.path.pop();

            if self.capped() {
                break;
            }
        }
    }

    fn slices(
        &mut self,
        a: &dyn Reflect,
        b: &dyn Reflect,
        x: Option<&dyn Sequence>,
        y: Option<&dyn Sequence>,
        depth: usize,
    ) {
        let (x, y) = match (x, y) {
            (Some(x), Some(y)) => (x, y),
            (None, Some(_)) => return self.record(NIL_SLICE, Show::new(b)),
            (Some(_), None) => return self.record(Show::new(a), NIL_SLICE),
            (None, None) => return,
        };

        if x.storage() == y.storage() && x.len() == y.len() {
            return;
        }

        for i in 0..x.len().max(y.len()) {
            self.path.push(format!("slice[{i}]"));
            match (x.get(i), y.get(i)) {
                (Some(av), Some(bv)) => self.equals(Some(av), Some(bv), depth + 1),
                (Some(av), None) => self.record(Show::new(av), NO_VALUE),
                (None, Some(bv)) => self.record(NO_VALUE, Show::new(bv)),
                (None, None) => {}
            }
            self.path.pop();

            if self.capped() {
                break;
            }
        }
    }

    fn capped(&self) -> bool {
        self.diffs.len() >= self.config.max_diff_count
    }

    fn record(&mut self, a: impl fmt::Display, b: impl fmt::Display) {
        let diff = if self.path.is_empty() {
            format!("{a} != {b}")
        } else {
            format!("{}: {a} != {b}", self.path.join("."))
        };
        self.diffs.push(diff);
    }

    fn warn(&mut self, error: DiffError) {
        let path = self.path.join(".");
        if self.config.log_errors {
            warn!(path = %path, "{error}");
        }
        self.warnings.push(Warning { error, path });
    }
}
