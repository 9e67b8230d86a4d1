pub mod errors;
pub mod models;

pub use errors::{ApiError, ApiResult};
pub use models::*;
