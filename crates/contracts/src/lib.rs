pub mod domain;
pub mod error;
pub mod shared;

pub use error::{ComposerError, ComposerResult};
