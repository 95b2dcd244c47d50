//! Core probe functionality: the run pipeline and its collaborators.

pub mod error;
pub mod render;
pub mod runner;
pub mod transport;

pub use error::{Error, Result};
pub use runner::{RunOutcome, run};
