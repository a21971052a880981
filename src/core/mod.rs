pub mod amount;
pub mod constants;
pub mod error;
pub mod tx;
pub mod types;

pub use error::{SdkError, SdkResult};
