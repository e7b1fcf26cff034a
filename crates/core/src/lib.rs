// Sequent Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal split)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
