use std::fmt::Write as FmtWrite;

use crate::converter::MarkerGenerator;
use crate::error::Result;
use crate::types::GenerationContext;
use crate::utils::{ensure_no_image, format_label_seconds};

/// 写回 Audacity 标签，链接以 `|` 附加在文本末尾。
pub struct LabelGenerator;

impl MarkerGenerator for LabelGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let mut output = String::new();
        for chapter in ctx.chapters {
            ensure_no_image(chapter)?;
            write!(
                output,
                "{}\t{}\t{}",
                format_label_seconds(chapter.start_ms),
                format_label_seconds(chapter.end_ms),
                chapter.display_text()
            )?;
            if let Some(url) = &chapter.url {
                write!(output, "|{url}")?;
            }
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label_parser::parse_label_text;
    use crate::types::Chapter;

    #[test]
    fn test_round_trip_is_lossless() {
        let chapters = vec![
            Chapter::new(0, 12_345)
                .with_text("Intro")
                .with_url(Some("https://example.com".into())),
            Chapter::new(12_345, 12_345).with_text("Marker"),
        ];
        let output = LabelGenerator
            .generate(&GenerationContext {
                chapters: &chapters,
                metadata: None,
                media_filename: None,
            })
            .unwrap();
        assert_eq!(
            output,
            "0.000000\t12.345000\tIntro|https://example.com\n12.345000\t12.345000\tMarker\n"
        );

        let reparsed = parse_label_text(&output);
        assert_eq!(reparsed[0].start_ms, 0);
        assert_eq!(reparsed[0].end_ms, 12_345);
        assert_eq!(reparsed[0].display_text(), "Intro");
        assert_eq!(reparsed[0].url.as_deref(), Some("https://example.com"));
        assert_eq!(reparsed[1].display_text(), "Marker");
        assert_eq!(reparsed[1].url, None);
    }
}
