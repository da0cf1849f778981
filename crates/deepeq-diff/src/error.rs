//! Diagnostics raised during a comparison.

/// Non-fatal conditions hit while walking two values.
///
/// None of these abort a comparison. `TypeMismatch` always comes with a
/// recorded diff; the other two mean a branch was not compared at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The depth guard tripped and the branch was abandoned.
    #[error("recursed to max depth {max_depth}")]
    MaxRecursionExceeded { max_depth: usize },

    /// The two values have different dynamic types or shapes.
    #[error("variables are different types: {left} != {right}")]
    TypeMismatch { left: String, right: String },

    /// The value has no comparison rule and was skipped.
    #[error("cannot compare values of type {type_name}")]
    UnsupportedKind { type_name: String },
}

impl DiffError {
    pub fn type_mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::TypeMismatch {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A diagnostic together with where it was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub error: DiffError,
    /// Dotted path of the branch, empty at the top level.
    pub path: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", self.path, self.error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            DiffError::MaxRecursionExceeded { max_depth: 3 }.to_string(),
            "recursed to max depth 3"
        );
        assert_eq!(
            DiffError::type_mismatch("i32", "u32").to_string(),
            "variables are different types: i32 != u32"
        );
    }

    #[test]
    fn warning_display_includes_path() {
        let warning = Warning {
            error: DiffError::UnsupportedKind {
                type_name: "fn()".into(),
            },
            path: "Handler.callback".into(),
        };
        assert_eq!(
            warning.to_string(),
            "Handler.callback: cannot compare values of type fn()"
        );
    }
}
