pub mod auth;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod process;
pub mod prompt;

pub use error::{DevError, Result};
