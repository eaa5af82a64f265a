use std::collections::BTreeSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::agronomy::leaf_wetness::{
    Constants, DataValidationError, Field, Observation, ValidationIssue,
};

/// Errors from decoding an input batch.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an array of records or an object of columns, found {found}")]
    Shape { found: &'static str },

    #[error("column `{field}` must be an array or an object of row values, found {found}")]
    Column { field: Field, found: &'static str },

    #[error(transparent)]
    Validation(#[from] DataValidationError),
}

/// Decodes a JSON batch of observations.
///
/// # Errors
///
/// Returns an [`InputError`] if the text is not JSON, has neither the
/// records nor the columns layout, or any row lacks a numeric field.
pub fn parse_observations(json: &str) -> Result<Vec<Observation>, InputError> {
    let value: Value = serde_json::from_str(json)?;
    observations_from_value(&value)
}

/// Decodes observations from an already parsed JSON value.
///
/// # Errors
///
/// See [`parse_observations`].
pub fn observations_from_value(value: &Value) -> Result<Vec<Observation>, InputError> {
    let observations = match value {
        Value::Array(rows) => from_records(rows)?,
        Value::Object(columns) => from_columns(columns)?,
        other => {
            return Err(InputError::Shape {
                found: type_name(other),
            });
        }
    };

    debug!(rows = observations.len(), "decoded observations");
    Ok(observations)
}

/// Decodes a partial constants override; missing keys keep their defaults.
///
/// # Errors
///
/// Returns an error for malformed JSON, unknown keys or non-numeric values.
pub fn parse_constants(json: &str) -> Result<Constants, serde_json::Error> {
    serde_json::from_str(json)
}

fn from_records(rows: &[Value]) -> Result<Vec<Observation>, DataValidationError> {
    rows.iter()
        .enumerate()
        .map(|(row, value)| {
            let record = value
                .as_object()
                .ok_or_else(|| DataValidationError::row(row, ValidationIssue::NotAnObject))?;
            read_row(row, |field| record.get(field.key()))
        })
        .collect()
}

fn from_columns(columns: &Map<String, Value>) -> Result<Vec<Observation>, InputError> {
    let mut resolved = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let column = match columns.get(field.key()) {
            Some(Value::Array(values)) => Column::Values(values),
            Some(Value::Object(labeled)) => Column::Labeled(labeled),
            Some(other) => {
                return Err(InputError::Column {
                    field,
                    found: type_name(other),
                });
            }
            None => {
                return Err(DataValidationError::field(0, field, ValidationIssue::Missing).into());
            }
        };
        resolved.push(column);
    }

    let observations = row_labels(&resolved)
        .iter()
        .enumerate()
        .map(|(row, label)| {
            read_row(row, |field| {
                let index = Field::ALL.iter().position(|&f| f == field)?;
                resolved[index].get(label)
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(observations)
}

/// One column of a columns-layout batch.
#[derive(Debug, Clone, Copy)]
enum Column<'a> {
    Values(&'a [Value]),
    Labeled(&'a Map<String, Value>),
}

impl<'a> Column<'a> {
    fn labels(self) -> Vec<String> {
        match self {
            Column::Values(values) => (0..values.len()).map(|i| i.to_string()).collect(),
            Column::Labeled(labeled) => labeled.keys().cloned().collect(),
        }
    }

    fn get(self, label: &str) -> Option<&'a Value> {
        match self {
            Column::Values(values) => label.parse::<usize>().ok().and_then(|i| values.get(i)),
            Column::Labeled(labeled) => labeled.get(label),
        }
    }
}

/// Row labels across all columns, numerically ordered when every label is
/// an integer and lexically ordered otherwise.
fn row_labels(columns: &[Column<'_>]) -> Vec<String> {
    let labels: Vec<String> = columns
        .iter()
        .flat_map(|column| column.labels())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let numeric: Option<Vec<i64>> = labels.iter().map(|label| label.parse().ok()).collect();
    match numeric {
        Some(keys) => {
            let mut keyed: Vec<_> = keys.into_iter().zip(labels).collect();
            keyed.sort_by_key(|(key, _)| *key);
            keyed.into_iter().map(|(_, label)| label).collect()
        }
        None => labels,
    }
}

fn read_row<'a>(
    row: usize,
    lookup: impl Fn(Field) -> Option<&'a Value>,
) -> Result<Observation, DataValidationError> {
    let mut values = [0.0; 5];
    for (slot, field) in values.iter_mut().zip(Field::ALL) {
        *slot = number(row, field, lookup(field))?;
    }
    Ok(Observation::from_fields(values))
}

fn number(row: usize, field: Field, value: Option<&Value>) -> Result<f64, DataValidationError> {
    let value =
        value.ok_or_else(|| DataValidationError::field(row, field, ValidationIssue::Missing))?;

    value.as_f64().ok_or_else(|| {
        DataValidationError::field(
            row,
            field,
            ValidationIssue::NotNumeric {
                found: type_name(value),
            },
        )
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[
        {"AIR_TEMP_F": 70, "DEWPOINT_F": 50, "WIND_SPEED_2M_MPH": 5,
         "RELATIVE_HUMIDITY_%": 50, "PRECIP_INCHES": 0, "STATION": "north"},
        {"AIR_TEMP_F": 41.5, "DEWPOINT_F": 40.9, "WIND_SPEED_2M_MPH": 0.0,
         "RELATIVE_HUMIDITY_%": 98.0, "PRECIP_INCHES": 0.02}
    ]"#;

    #[test]
    fn records_layout() {
        let observations = parse_observations(RECORDS).unwrap();

        assert_eq!(
            observations,
            vec![
                Observation::from_fields([70.0, 50.0, 5.0, 50.0, 0.0]),
                Observation::from_fields([41.5, 40.9, 0.0, 98.0, 0.02]),
            ]
        );
    }

    #[test]
    fn column_arrays_match_records() {
        let columns = r#"{
            "AIR_TEMP_F": [70, 41.5],
            "DEWPOINT_F": [50, 40.9],
            "WIND_SPEED_2M_MPH": [5, 0.0],
            "RELATIVE_HUMIDITY_%": [50, 98.0],
            "PRECIP_INCHES": [0, 0.02]
        }"#;

        assert_eq!(
            parse_observations(columns).unwrap(),
            parse_observations(RECORDS).unwrap()
        );
    }

    #[test]
    fn labeled_columns_order_numerically() {
        let columns = r#"{
            "AIR_TEMP_F": {"10": 3, "2": 2, "0": 1},
            "DEWPOINT_F": {"0": 1, "2": 2, "10": 3},
            "WIND_SPEED_2M_MPH": {"0": 0, "2": 0, "10": 0},
            "RELATIVE_HUMIDITY_%": {"0": 90, "2": 90, "10": 90},
            "PRECIP_INCHES": {"0": 0, "2": 0, "10": 0}
        }"#;

        let temps: Vec<_> = parse_observations(columns)
            .unwrap()
            .iter()
            .map(|observation| observation.air_temp_f)
            .collect();
        assert_eq!(temps, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn short_column_reports_missing_row() {
        let columns = r#"{
            "AIR_TEMP_F": [70, 71],
            "DEWPOINT_F": [50, 51],
            "WIND_SPEED_2M_MPH": [5, 5],
            "RELATIVE_HUMIDITY_%": [50],
            "PRECIP_INCHES": [0, 0]
        }"#;

        let Err(InputError::Validation(error)) = parse_observations(columns) else {
            panic!("expected a validation error");
        };
        assert_eq!(error.row, 1);
        assert_eq!(error.field, Some(Field::RelativeHumidity));
        assert_eq!(error.issue, ValidationIssue::Missing);
    }

    #[test]
    fn missing_and_non_numeric_fields() {
        let missing = r#"[{"AIR_TEMP_F": 70, "DEWPOINT_F": 50, "WIND_SPEED_2M_MPH": 5,
                           "RELATIVE_HUMIDITY_%": 50}]"#;
        let Err(InputError::Validation(error)) = parse_observations(missing) else {
            panic!("expected a validation error");
        };
        assert_eq!(error.field, Some(Field::Precipitation));
        assert_eq!(error.issue, ValidationIssue::Missing);

        let text = r#"[{"AIR_TEMP_F": 70, "DEWPOINT_F": "fifty", "WIND_SPEED_2M_MPH": 5,
                        "RELATIVE_HUMIDITY_%": 50, "PRECIP_INCHES": null}]"#;
        let Err(InputError::Validation(error)) = parse_observations(text) else {
            panic!("expected a validation error");
        };
        assert_eq!(error.field, Some(Field::DewPoint));
        assert_eq!(error.issue, ValidationIssue::NotNumeric { found: "string" });
    }

    #[test]
    fn null_is_not_a_number() {
        let text = r#"[{"AIR_TEMP_F": 70, "DEWPOINT_F": 50, "WIND_SPEED_2M_MPH": null,
                        "RELATIVE_HUMIDITY_%": 50, "PRECIP_INCHES": 0}]"#;
        let Err(InputError::Validation(error)) = parse_observations(text) else {
            panic!("expected a validation error");
        };
        assert_eq!(error.issue, ValidationIssue::NotNumeric { found: "null" });
    }

    #[test]
    fn row_that_is_not_an_object() {
        let Err(InputError::Validation(error)) = parse_observations("[[70, 50, 5, 50, 0]]") else {
            panic!("expected a validation error");
        };
        assert_eq!(error.row, 0);
        assert_eq!(error.field, None);
        assert_eq!(error.issue, ValidationIssue::NotAnObject);
    }

    #[test]
    fn unsupported_shapes() {
        assert!(matches!(
            parse_observations("42"),
            Err(InputError::Shape { found: "number" })
        ));
        assert!(matches!(
            parse_observations(r#"{"AIR_TEMP_F": 70}"#),
            Err(InputError::Column {
                field: Field::AirTemperature,
                found: "number"
            })
        ));
        assert!(matches!(
            parse_observations("[{"),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn empty_batch() {
        assert!(parse_observations("[]").unwrap().is_empty());
    }

    #[test]
    fn constants_override() {
        let constants = parse_constants(r#"{"critical_DPD": 2.5}"#).unwrap();
        assert_eq!(constants.critical_dew_point_depression, 2.5);
        assert!(parse_constants(r#"{"critical_dpd": 2.5}"#).is_err());
    }
}
