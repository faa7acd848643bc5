//! Source Adapter - 句子来源实现

mod file_sentence_source;

pub use file_sentence_source::FileSentenceSource;
