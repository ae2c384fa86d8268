pub mod config;
pub mod convert;
pub mod error;
pub mod finder;
pub mod models;
pub mod output;
pub mod profile;
pub mod render;
pub mod utils;

// Re-export the types most callers need
pub use config::{Config, Options};
pub use convert::{convert, Summary};
pub use error::{ChromemarkError, Result, StderrWarnings, Warning, WarningSink};
