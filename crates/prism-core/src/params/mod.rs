pub mod preamble;
pub mod schema;
pub mod types;

pub use preamble::build_preamble;
pub use schema::{apply_saved_values, pack_values, parse_schema, PARAM_BUFFER_FLOATS};
pub use types::{ParamDescriptor, ParamType};
