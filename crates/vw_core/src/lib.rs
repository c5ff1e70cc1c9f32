pub mod config;
pub mod error;
pub mod types;

pub use error::Error;
pub use types::{Article, GeneratedRecord};

pub type Result<T> = std::result::Result<T, Error>;
