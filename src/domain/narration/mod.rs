//! Narration Context - 朗读限界上下文
//!
//! 职责:
//! - 句子值对象（1 起始编号，已去除首尾空白，非空）
//! - 单次运行标识（用于临时文件命名）

mod errors;
mod value_objects;

pub use errors::NarrationError;
pub use value_objects::{RunId, Sentence};
