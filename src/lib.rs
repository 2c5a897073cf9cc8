pub mod boundary;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod hosting;
pub mod ui;

pub use error::{CleanupError, Result};
