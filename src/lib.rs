//! # markconv
//!
//! 在播客/音频工具使用的几种文本标记格式之间转换章节：
//!
//! - 输入：Audacity 标签 (`.txt`)、LRC (`.lrc`)
//! - 输出：LRC、CUE、纯文本章节列表，以及 Audacity 标签本身
//!
//! 入口是 [`MarkerStore`]：加载一次，保存多次。

pub mod app_settings;
pub mod converter;
pub mod cue_generator;
pub mod error;
pub mod label_generator;
pub mod label_parser;
pub mod logger;
pub mod lrc_generator;
pub mod lrc_parser;
pub mod marker_store;
pub mod transcript_generator;
pub mod types;
pub mod utils;

pub use converter::{MarkerGenerator, MarkerParser, generator_for, parser_for};
pub use error::{MarkerError, Result};
pub use marker_store::MarkerStore;
pub use types::{Chapter, GenerationContext, MarkerFormat, ShowMetadata};
