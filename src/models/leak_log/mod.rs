pub mod types;
pub mod queries;
pub mod format;

pub use types::*;
pub use queries::*;
