//! JSON framing for the command line and other batch callers.
//!
//! Input is a batch of observations in either of the two common JSON
//! layouts of tabular data:
//!
//! - **records**: `[{"AIR_TEMP_F": 70, ...}, ...]`
//! - **columns**: `{"AIR_TEMP_F": [70, ...], ...}` or
//!   `{"AIR_TEMP_F": {"0": 70, ...}, ...}`
//!
//! Output is always records, keyed by the field names downstream consumers
//! expect.

mod input;
mod output;

pub use input::{InputError, observations_from_value, parse_constants, parse_observations};
pub use output::{DEFAULT_INDENT, OutputOptions, to_json, write_json};
