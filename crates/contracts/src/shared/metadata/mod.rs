//! Form metadata: field kinds, specifications and validation rules
//!
//! Field specs are constructed from the static category catalog; select
//! options are merged in after the option collaborators resolve, so a spec
//! with an empty option list is a normal intermediate state, not an error.

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldKind, InputFormat};
pub use types::{FieldSpec, SelectOption};
pub use validation::ValidationRules;
