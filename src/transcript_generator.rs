use std::fmt::Write as FmtWrite;

use chrono::NaiveTime;

use crate::converter::MarkerGenerator;
use crate::error::Result;
use crate::types::GenerationContext;
use crate::utils::ensure_no_image;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// 纯文本章节列表，每行 `HH:MM:SS - 文本`，不输出任何元数据。
pub struct TranscriptGenerator;

impl MarkerGenerator for TranscriptGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let mut output = String::new();
        for chapter in ctx.chapters {
            ensure_no_image(chapter)?;
            writeln!(
                output,
                "{} - {}",
                clock_time(chapter.start_ms).format("%H:%M:%S"),
                chapter.display_text()
            )?;
        }
        Ok(output)
    }
}

/// 把偏移量当作从午夜开始的时刻，超过 24 小时回绕。
fn clock_time(ms: u64) -> NaiveTime {
    let secs = (ms / 1000) % SECONDS_PER_DAY;
    NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0).unwrap_or(NaiveTime::MIN)
}
