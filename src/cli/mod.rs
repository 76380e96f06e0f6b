//! CLI command implementations
//!
//! - `process`: run a delimited response through the pipeline, and `compose`
//! - `validate`: check (and optionally fix) a block directory
//! - `config`: `schema` and `init`
//! - `util`: shared argument and output helpers

pub mod config;
pub mod process;
pub mod util;
pub mod validate;

pub use config::{cmd_init, cmd_schema};
pub use process::{cmd_compose, cmd_process};
pub use validate::cmd_validate;
