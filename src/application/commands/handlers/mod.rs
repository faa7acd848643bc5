//! Command Handlers

mod assemble_handler;

pub use assemble_handler::{AssembleNarrationHandler, AssemblerConfig};
