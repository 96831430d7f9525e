//! 读取器与生成器的统一接口。
//!
//! 每种格式对应一个实现，通过 [`parser_for`] 和 [`generator_for`] 在调用处一次性选定。

use crate::cue_generator::CueGenerator;
use crate::error::{MarkerError, Result};
use crate::label_generator::LabelGenerator;
use crate::label_parser::LabelParser;
use crate::lrc_generator::LrcGenerator;
use crate::lrc_parser::LrcParser;
use crate::transcript_generator::TranscriptGenerator;
use crate::types::{Chapter, GenerationContext, MarkerFormat};

/// 把原始文本解析为按文件顺序排列的章节。
pub trait MarkerParser {
    fn parse(&self, content: &str) -> Result<Vec<Chapter>>;
}

/// 把章节 (以及格式支持的元数据) 渲染为文本。
pub trait MarkerGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String>;
}

/// 返回指定格式的读取器。CUE 和纯文本只能输出。
pub fn parser_for(format: MarkerFormat) -> Result<&'static dyn MarkerParser> {
    match format {
        MarkerFormat::Label => Ok(&LabelParser),
        MarkerFormat::Lrc => Ok(&LrcParser),
        MarkerFormat::Cue | MarkerFormat::Transcript => Err(MarkerError::UnsupportedFormat(
            format!("{format} 不能作为输入格式"),
        )),
    }
}

/// 返回指定格式的生成器。
pub fn generator_for(format: MarkerFormat) -> &'static dyn MarkerGenerator {
    match format {
        MarkerFormat::Label => &LabelGenerator,
        MarkerFormat::Lrc => &LrcGenerator,
        MarkerFormat::Cue => &CueGenerator,
        MarkerFormat::Transcript => &TranscriptGenerator,
    }
}
