use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::Field;

/// A model constant that cannot be used.
///
/// Validation happens once, when a [`LeafWetness`] is built, so a
/// degenerate constant never reaches a division inside the per-row pipeline.
///
/// [`LeafWetness`]: crate::models::agronomy::leaf_wetness::LeafWetness
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConstantsError {
    /// A constant violates its numeric constraint.
    #[error("invalid constant `{name}`: {reason}")]
    Invalid {
        /// Configuration key of the offending constant.
        name: &'static str,
        reason: ConstraintError,
    },

    /// The canopy and reference heights do not define a usable wind profile.
    ///
    /// Raised when `Z_reference - D` is not positive, when the reference-height
    /// logarithm is zero, or when the empirical profile correction diverges.
    #[error(
        "degenerate wind profile: Z_reference={reference_height} cm, \
         Zc={canopy_height} cm, alpha={alpha}"
    )]
    WindProfile {
        reference_height: f64,
        canopy_height: f64,
        alpha: f64,
    },
}

/// What was wrong with an input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The row is not a record of named fields.
    NotAnObject,
    /// The field is absent.
    Missing,
    /// The field holds a non-numeric value; `found` names its type.
    NotNumeric { found: &'static str },
    /// The field is numeric but `NaN` or infinite.
    NotFinite,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("row is not an object"),
            Self::Missing => f.write_str("field is missing"),
            Self::NotNumeric { found } => write!(f, "expected a number, found {found}"),
            Self::NotFinite => f.write_str("value is not finite"),
        }
    }
}

/// A malformed input row.
///
/// Any such error aborts the whole batch; no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}{}: {issue}", field_suffix(.field))]
pub struct DataValidationError {
    /// Zero-based position of the row in the input.
    pub row: usize,
    /// The offending field, or `None` for row-level problems.
    pub field: Option<Field>,
    pub issue: ValidationIssue,
}

impl DataValidationError {
    pub(crate) fn field(row: usize, field: Field, issue: ValidationIssue) -> Self {
        Self {
            row,
            field: Some(field),
            issue,
        }
    }

    pub(crate) fn row(row: usize, issue: ValidationIssue) -> Self {
        Self {
            row,
            field: None,
            issue,
        }
    }
}

fn field_suffix(field: &Option<Field>) -> String {
    field.map(|field| format!(", field `{field}`")).unwrap_or_default()
}

/// Errors from a complete estimation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Constants(#[from] ConstantsError),

    #[error(transparent)]
    Validation(#[from] DataValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_row_and_field() {
        let error = DataValidationError::field(
            3,
            Field::DewPoint,
            ValidationIssue::NotNumeric { found: "string" },
        );
        assert_eq!(
            error.to_string(),
            "row 3, field `DEWPOINT_F`: expected a number, found string"
        );

        let error = DataValidationError::row(0, ValidationIssue::NotAnObject);
        assert_eq!(error.to_string(), "row 0: row is not an object");
    }

    #[test]
    fn constants_message_uses_config_key() {
        let error = ConstantsError::Invalid {
            name: "Zc",
            reason: ConstraintError::Zero,
        };
        assert_eq!(
            error.to_string(),
            "invalid constant `Zc`: value must not be zero"
        );
    }
}
