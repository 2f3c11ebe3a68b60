pub mod cli;
pub mod error;
pub mod models;
pub mod services;

pub use cli::Cli;
pub use error::AppError;
pub use models::Config;
