//! Commands Module
//!
//! 命令定义及其处理器

mod assemble_commands;
pub mod handlers;

pub use assemble_commands::{AssembleNarration, AssembleNarrationResponse};
