//! # CUE 表单生成器
//!
//! 输出以 UTF-8 BOM 开头 (foobar2000 需要)，时间以 分:秒:帧 表示，每秒 75 帧。
//! 参见 <https://en.wikipedia.org/wiki/Cue_sheet_(computing)#Essential_commands>。

use std::fmt::Write as FmtWrite;

use crate::converter::MarkerGenerator;
use crate::error::{MarkerError, Result};
use crate::types::GenerationContext;
use crate::utils::{ensure_no_image, format_cue_time_ms};

const GENERATOR_COMMENT: &str = concat!(
    "Generated by ",
    env!("CARGO_PKG_NAME"),
    " v",
    env!("CARGO_PKG_VERSION")
);

pub struct CueGenerator;

impl MarkerGenerator for CueGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let media_filename = ctx.media_filename.ok_or(MarkerError::MissingMediaReference)?;

        let mut cue_output = String::from('\u{feff}');
        writeln!(cue_output, "REM COMMENT \"{GENERATOR_COMMENT}\"")?;
        writeln!(cue_output, "FILE \"{media_filename}\" MP3")?;

        if let Some(metadata) = ctx.metadata {
            writeln!(cue_output, "REM GENRE {}", metadata.genre)?;
            writeln!(cue_output, "TITLE \"{}\"", metadata.title)?;
            writeln!(cue_output, "PERFORMER \"{}\"", metadata.artist)?;
        }

        for (index, chapter) in ctx.chapters.iter().enumerate() {
            ensure_no_image(chapter)?;
            writeln!(cue_output, "  TRACK {:02} AUDIO", index + 1)?;
            // CUE 的引号无法转义
            writeln!(
                cue_output,
                "    TITLE \"{}\"",
                chapter.display_text().replace('"', "_")
            )?;
            writeln!(
                cue_output,
                "    INDEX 01 {}",
                format_cue_time_ms(chapter.start_ms)
            )?;
        }

        Ok(cue_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chapter, ShowMetadata};

    fn render(
        chapters: &[Chapter],
        metadata: Option<&ShowMetadata>,
        media_filename: Option<&str>,
    ) -> Result<String> {
        CueGenerator.generate(&GenerationContext {
            chapters,
            metadata,
            media_filename,
        })
    }

    #[test]
    fn test_full_sheet() {
        let chapters = vec![
            Chapter::new(0, 1234).with_text("Intro"),
            Chapter::new(1234, 125_999).with_text("Say \"hi\""),
        ];
        let metadata = ShowMetadata {
            title: "Episode \"12\"".into(),
            artist: "Hosts".into(),
            album: "The Show".into(),
            genre: "Podcast".into(),
        };
        let output = render(&chapters, Some(&metadata), Some("episode-12.mp3")).unwrap();
        let body = output.strip_prefix('\u{feff}').expect("缺少 BOM");
        let expected = format!(
            "REM COMMENT \"{GENERATOR_COMMENT}\"\n\
             FILE \"episode-12.mp3\" MP3\n\
             REM GENRE Podcast\n\
             TITLE \"Episode \"12\"\"\n\
             PERFORMER \"Hosts\"\n  \
             TRACK 01 AUDIO\n    \
             TITLE \"Intro\"\n    \
             INDEX 01 00:00:00\n  \
             TRACK 02 AUDIO\n    \
             TITLE \"Say _hi_\"\n    \
             INDEX 01 00:01:17\n"
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_without_metadata() {
        let chapters = vec![Chapter::new(61_000, 62_000).with_text("A")];
        let output = render(&chapters, None, Some("a.mp3")).unwrap();
        assert!(!output.contains("PERFORMER"));
        assert!(!output.contains("REM GENRE"));
        assert!(output.ends_with("    INDEX 01 01:01:00\n"));
    }

    #[test]
    fn test_missing_media_reference() {
        let chapters = vec![Chapter::new(0, 0).with_text("A")];
        assert!(matches!(
            render(&chapters, None, None),
            Err(MarkerError::MissingMediaReference)
        ));
    }

    #[test]
    fn test_image_chapter_fails() {
        let chapters = vec![Chapter::new(0, 0).with_text("A").with_image("a.png")];
        assert!(matches!(
            render(&chapters, None, Some("a.mp3")),
            Err(MarkerError::Unimplemented(_))
        ));
    }
}
