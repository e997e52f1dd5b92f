pub mod decoder;
pub mod encoder;
pub mod json;
pub mod matrix;
pub mod options;
pub mod pipeline;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use decoder::{decode, normalize_status, OPTIMAL_STATUS};
pub use encoder::{encode, encode_validated, format_number, INFINITY_TOKEN};
pub use json::{parse_problem, parse_raw_solution, parse_request};
pub use matrix::{dense_rows, to_dense};
pub use options::{collect_option_diagnostics, validate_options};
pub use pipeline::{solve, CodecError, Solver};
pub use validate::{collect_diagnostics, validate, Diagnostic, ValidationError};
