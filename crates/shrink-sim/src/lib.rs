#![forbid(unsafe_code)]

//! Scripted gesture simulator for `shrink-core`.
//!
//! Plays a TOML script of drag, tap, wait and resize steps against an
//! in-memory host and prints every resulting transition.

pub mod cli;
pub mod error;
pub mod host;
pub mod runner;
pub mod script;

pub use cli::run_from_env;
pub use error::{Result, SimError};
pub use runner::{Report, Simulation, TraceLine, simulate};
pub use script::{Script, Step};
