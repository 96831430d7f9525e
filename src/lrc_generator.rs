use std::fmt::Write as FmtWrite;

use crate::converter::MarkerGenerator;
use crate::error::Result;
use crate::types::{GenerationContext, ShowMetadata};
use crate::utils::{ensure_no_image, format_lrc_time_ms};

pub struct LrcGenerator;

impl MarkerGenerator for LrcGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let mut lrc_output = String::new();

        if let Some(metadata) = ctx.metadata {
            write_lrc_metadata(&mut lrc_output, metadata)?;
        }

        for chapter in ctx.chapters {
            ensure_no_image(chapter)?;
            writeln!(
                lrc_output,
                "{}{}",
                format_lrc_time_ms(chapter.start_ms),
                chapter.display_text()
            )?;
        }

        Ok(lrc_output)
    }
}

/// 写入 `[ti:]`、`[ar:]`、`[al:]` 头部，顺序固定。
fn write_lrc_metadata(out: &mut String, metadata: &ShowMetadata) -> std::fmt::Result {
    writeln!(out, "[ti:{}]", metadata.title)?;
    writeln!(out, "[ar:{}]", metadata.artist)?;
    writeln!(out, "[al:{}]", metadata.album)
}
