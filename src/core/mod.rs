pub mod engine;

pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
