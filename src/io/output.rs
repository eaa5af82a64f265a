use std::io::Write;

use serde::{Serialize, ser::Error as _};
use serde_json::{Serializer, ser::PrettyFormatter};

use crate::models::agronomy::leaf_wetness::{Diagnostics, Estimate};

/// Indentation width of the published output format.
pub const DEFAULT_INDENT: usize = 6;

/// How estimates are rendered as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Spaces per nesting level, or `None` for single-line output.
    pub indent: Option<usize>,
    /// Append every intermediate quantity to each record.
    pub diagnostics: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            indent: Some(DEFAULT_INDENT),
            diagnostics: false,
        }
    }
}

impl OutputOptions {
    /// Single-line output without diagnostics.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: None,
            diagnostics: false,
        }
    }
}

/// One output record; field order and names are fixed.
#[derive(Debug, Serialize)]
struct Record<'a> {
    #[serde(rename = "AIR_TEMP_F")]
    air_temp_f: f64,
    #[serde(rename = "DEWPOINT_F")]
    dew_point_f: f64,
    #[serde(rename = "WIND_SPEED_2M_MPH")]
    wind_speed_mph: f64,
    #[serde(rename = "RELATIVE_HUMIDITY_%")]
    relative_humidity_pct: f64,
    #[serde(rename = "Potential condensation of dew (mm)")]
    condensation_mm: f64,
    #[serde(rename = "Estimated Leaf Wetness (mm)")]
    wetness_mm: f64,
    #[serde(flatten)]
    diagnostics: Option<&'a Diagnostics>,
}

impl<'a> Record<'a> {
    fn new(estimate: &'a Estimate, diagnostics: bool) -> Self {
        let observation = &estimate.observation;
        Self {
            air_temp_f: observation.air_temp_f,
            dew_point_f: observation.dew_point_f,
            wind_speed_mph: observation.wind_speed_mph,
            relative_humidity_pct: observation.relative_humidity_pct,
            condensation_mm: estimate.condensation_mm,
            wetness_mm: estimate.wetness_mm,
            diagnostics: diagnostics.then_some(&estimate.diagnostics),
        }
    }
}

/// Writes `estimates` as a JSON array of records.
///
/// Non-finite numbers are written as `null`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_json<W: Write>(
    writer: W,
    estimates: &[Estimate],
    options: &OutputOptions,
) -> serde_json::Result<()> {
    let records: Vec<_> = estimates
        .iter()
        .map(|estimate| Record::new(estimate, options.diagnostics))
        .collect();

    match options.indent {
        Some(width) => {
            let indent = vec![b' '; width];
            let mut serializer =
                Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
            records.serialize(&mut serializer)
        }
        None => serde_json::to_writer(writer, &records),
    }
}

/// Renders `estimates` as a JSON string.
///
/// # Errors
///
/// See [`write_json`].
pub fn to_json(estimates: &[Estimate], options: &OutputOptions) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, estimates, options)?;
    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;

    use crate::models::agronomy::leaf_wetness::{Constants, LeafWetness, Observation};

    fn estimates() -> Vec<Estimate> {
        LeafWetness::new(Constants::default())
            .unwrap()
            .estimate(&[Observation::from_fields([50.0, 50.0, 0.0, 100.0, 0.1])])
            .unwrap()
    }

    #[test]
    fn fields_in_published_order() {
        let json = to_json(&estimates(), &OutputOptions::compact()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"[{"AIR_TEMP_F":50.0,"DEWPOINT_F":50.0,"WIND_SPEED_2M_MPH":0.0,"#,
                r#""RELATIVE_HUMIDITY_%":100.0,"Potential condensation of dew (mm)":0.0,"#,
                r#""Estimated Leaf Wetness (mm)":0.6}]"#
            )
        );
    }

    #[test]
    fn six_space_indent_by_default() {
        let json = to_json(&estimates(), &OutputOptions::default()).unwrap();
        let lines: Vec<_> = json.lines().collect();

        assert_eq!(lines[0], "[");
        assert_eq!(lines[1], "      {");
        assert_eq!(lines[2], r#"            "AIR_TEMP_F": 50.0,"#);
        assert_eq!(lines.last(), Some(&"]"));
    }

    #[test]
    fn diagnostics_follow_the_published_fields() {
        let options = OutputOptions {
            diagnostics: true,
            ..OutputOptions::compact()
        };
        let json = to_json(&estimates(), &options).unwrap();

        let wetness = json.find("Estimated Leaf Wetness (mm)").unwrap();
        let dpd = json.find("\"DPD\"").unwrap();
        assert!(wetness < dpd);

        let value: Value = serde_json::from_str(&json).unwrap();
        let record = value[0].as_object().unwrap();
        assert_eq!(record.len(), 6 + 25);
        assert_eq!(record["Rain Interception (mm)"], 0.6);
        assert!(!record.contains_key("PRECIP_INCHES"));
    }

    #[test]
    fn non_finite_values_become_null() {
        let mut estimates = estimates();
        estimates[0].condensation_mm = f64::NAN;

        let json = to_json(&estimates, &OutputOptions::compact()).unwrap();
        assert!(json.contains(r#""Potential condensation of dew (mm)":null"#));
    }

    #[test]
    fn empty_batch_is_an_empty_array() {
        assert_eq!(to_json(&[], &OutputOptions::default()).unwrap(), "[]");
    }
}
