#![forbid(unsafe_code)]

pub mod apply;
pub mod check;
pub mod cli;
pub mod error;
pub mod mode;
pub mod palette;
pub mod util;

pub use cli::run_from_env;
pub use error::{CliError, Result};
