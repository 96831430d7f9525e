//! # 标记转换空间
//!
//! 从一个文件加载标记，然后可以多次保存为其他格式：
//!
//! ```no_run
//! use markconv::{MarkerFormat, MarkerStore};
//!
//! # fn main() -> markconv::Result<()> {
//! let mut store = MarkerStore::new(None, Some("episodes/fnt-200.mp3"));
//! store.load("fnt-200.txt")?;
//! store.save("fnt-200.lrc", MarkerFormat::Lrc)?;
//! store.save("fnt-200.cue", MarkerFormat::Cue)?;
//! # Ok(())
//! # }
//! ```
//!
//! 输入文件中的标记必须已经按时间排序，否则输出 (尤其是 LRC 推断的结束时间) 没有意义。

use std::fs;
use std::path::Path;

use crate::converter::{generator_for, parser_for};
use crate::error::{MarkerError, Result};
use crate::types::{Chapter, GenerationContext, MarkerFormat, ShowMetadata};

#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    metadata: Option<ShowMetadata>,
    /// 只保存文件名，不含目录
    media_filename: Option<String>,
    chapters: Vec<Chapter>,
    loaded: bool,
}

impl MarkerStore {
    /// 创建一个空的 `MarkerStore`。
    ///
    /// `media_filename` 只保留文件名部分，因为输出格式只引用文件名。
    pub fn new(metadata: Option<ShowMetadata>, media_filename: Option<impl AsRef<Path>>) -> Self {
        let media_filename = media_filename.map(|p| {
            let path = p.as_ref();
            path.file_name()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned()
        });
        Self {
            metadata,
            media_filename,
            chapters: Vec::new(),
            loaded: false,
        }
    }

    /// 加载标记文件，格式由扩展名决定 (`.txt` 为 Audacity 标签，`.lrc` 为 LRC)。
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = MarkerFormat::from_input_path(path)?;
        if self.loaded {
            return Err(MarkerError::AlreadyLoaded);
        }
        let content = fs::read_to_string(path)?;
        log::info!("[MarkerStore] 从 '{}' 读取 {format} 标记。", path.display());
        self.load_str(&content, format)
    }

    /// 从内存中的文本加载标记。
    pub fn load_str(&mut self, content: &str, format: MarkerFormat) -> Result<()> {
        if self.loaded {
            return Err(MarkerError::AlreadyLoaded);
        }
        let parser = parser_for(format)?;
        self.chapters = parser.parse(content)?;
        self.loaded = true;
        self.canonicalize();
        log::info!("[MarkerStore] 已加载 {} 个章节。", self.chapters.len());
        Ok(())
    }

    /// 按加载顺序为每个章节分配 `chp0`, `chp1`, ... 标识符。
    fn canonicalize(&mut self) {
        for (index, chapter) in self.chapters.iter_mut().enumerate() {
            chapter.set_id(format!("chp{index}"));
        }
    }

    /// 渲染为指定格式的文本，不写入文件。
    pub fn render(&self, format: MarkerFormat) -> Result<String> {
        let ctx = GenerationContext {
            chapters: &self.chapters,
            metadata: self.metadata.as_ref(),
            media_filename: self.media_filename.as_deref(),
        };
        generator_for(format).generate(&ctx)
    }

    /// 保存为指定格式。格式显式给出，与目标路径的扩展名无关。
    ///
    /// 先在内存中完成渲染，渲染失败时不会创建目标文件。
    pub fn save(&self, path: impl AsRef<Path>, format: MarkerFormat) -> Result<()> {
        let path = path.as_ref();
        let output = self.render(format)?;
        fs::write(path, output)?;
        log::info!(
            "[MarkerStore] 已将 {} 个章节保存为 {format}: '{}'",
            self.chapters.len(),
            path.display()
        );
        Ok(())
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn metadata(&self) -> Option<&ShowMetadata> {
        self.metadata.as_ref()
    }

    pub fn media_filename(&self) -> Option<&str> {
        self.media_filename.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// 需要出现在目录中的章节标识符，保持章节顺序。
    pub fn table_of_contents(&self) -> Vec<&str> {
        self.chapters
            .iter()
            .filter(|c| c.indexed)
            .filter_map(Chapter::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &str = "0.0\t10.0\tIntro\n10.0\t20.0\tNews|https://example.com/news\n20.0\t20.0\tEnd\n";

    fn loaded_store(media: Option<&str>) -> MarkerStore {
        let mut store = MarkerStore::new(None, media);
        store.load_str(LABELS, MarkerFormat::Label).unwrap();
        store
    }

    #[test]
    fn test_media_filename_is_basename() {
        let store = MarkerStore::new(None, Some("/srv/shows/episode 12.mp3"));
        assert_eq!(store.media_filename(), Some("episode 12.mp3"));
        let store = MarkerStore::new(None, None::<&str>);
        assert_eq!(store.media_filename(), None);
    }

    #[test]
    fn test_canonical_ids_in_load_order() {
        let store = loaded_store(None);
        let ids: Vec<_> = store.chapters().iter().filter_map(Chapter::id).collect();
        assert_eq!(ids, vec!["chp0", "chp1", "chp2"]);
    }

    #[test]
    fn test_ids_are_independent_of_output_format() {
        let store = loaded_store(Some("a.mp3"));
        for format in [MarkerFormat::Lrc, MarkerFormat::Cue, MarkerFormat::Transcript] {
            store.render(format).unwrap();
        }
        assert_eq!(store.chapters()[2].id(), Some("chp2"));
    }

    #[test]
    fn test_second_load_is_rejected() {
        let mut store = loaded_store(None);
        assert!(matches!(
            store.load_str(LABELS, MarkerFormat::Label),
            Err(MarkerError::AlreadyLoaded)
        ));
        assert_eq!(store.chapters().len(), 3);
    }

    #[test]
    fn test_output_only_formats_cannot_be_loaded() {
        let mut store = MarkerStore::new(None, None::<&str>);
        assert!(matches!(
            store.load_str("whatever", MarkerFormat::Cue),
            Err(MarkerError::UnsupportedFormat(_))
        ));
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_unknown_extension_fails_before_reading() {
        let mut store = MarkerStore::new(None, None::<&str>);
        assert!(matches!(
            store.load("does-not-exist.wav"),
            Err(MarkerError::UnsupportedFormat(ext)) if ext == "wav"
        ));
    }

    #[test]
    fn test_table_of_contents_skips_unindexed() {
        let mut store = loaded_store(None);
        store.chapters[1].indexed = false;
        assert_eq!(store.table_of_contents(), vec!["chp0", "chp2"]);
    }

    #[test]
    fn test_quotes_only_replaced_in_cue() {
        let mut store = MarkerStore::new(None, Some("a.mp3"));
        store
            .load_str("[00:01.00]Say \"hi\"\n", MarkerFormat::Lrc)
            .unwrap();
        assert!(store.render(MarkerFormat::Cue).unwrap().contains("TITLE \"Say _hi_\""));
        assert!(store.render(MarkerFormat::Lrc).unwrap().contains("Say \"hi\""));
        assert!(
            store
                .render(MarkerFormat::Transcript)
                .unwrap()
                .contains("Say \"hi\"")
        );
        assert!(store.render(MarkerFormat::Label).unwrap().contains("Say \"hi\""));
    }

    #[test]
    fn test_metadata_flows_to_lrc_header() {
        let metadata = ShowMetadata {
            title: "T".into(),
            artist: "A".into(),
            album: "B".into(),
            genre: "G".into(),
        };
        let mut store = MarkerStore::new(Some(metadata), None::<&str>);
        store.load_str(LABELS, MarkerFormat::Label).unwrap();
        let lrc = store.render(MarkerFormat::Lrc).unwrap();
        assert!(lrc.starts_with("[ti:T]\n[ar:A]\n[al:B]\n[00:00.00]Intro\n"));
    }

    #[test]
    fn test_chapter_serializes_with_id() {
        let store = loaded_store(None);
        let json = serde_json::to_value(&store.chapters()[1]).unwrap();
        assert_eq!(json["id"], "chp1");
        assert_eq!(json["start_ms"], 10_000);
        assert_eq!(json["url"], "https://example.com/news");
        assert_eq!(json["indexed"], true);
    }
}
