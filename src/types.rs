use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::error::MarkerError;

/// 一个章节标记。
///
/// 时间均为从录音开头算起的毫秒数。`start_ms == end_ms` 的零时长章节是合法的，
/// LRC 文件的最后一行就会产生这样的章节。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 由规范化步骤分配的标识符 (`chp0`, `chp1`, ...)。
    id: Option<String>,
    /// 开始时间 (毫秒)
    pub start_ms: u64,
    /// 结束时间 (毫秒)
    pub end_ms: u64,
    /// 显示文本
    pub text: Option<String>,
    /// 章节关联的链接
    pub url: Option<String>,
    /// 章节图片路径，目前所有输出格式都不支持。
    pub image: Option<PathBuf>,
    /// 是否出现在目录中
    pub indexed: bool,
}

impl Chapter {
    #[must_use]
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self {
            id: None,
            start_ms,
            end_ms,
            text: None,
            url: None,
            image: None,
            indexed: true,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// 规范化后的标识符，加载之前为 `None`。
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// 用于输出的文本，缺失时为空字符串。
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// 节目元数据，由调用方提供，读写过程中只读。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// 支持的标记格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum MarkerFormat {
    /// Audacity 标签 (制表符分隔的 开始/结束/文本)
    #[strum(serialize = "label", serialize = "audacity")]
    Label,
    /// LRC 歌词时间戳
    #[strum(serialize = "lrc")]
    Lrc,
    /// CUE 表单
    #[strum(serialize = "cue")]
    Cue,
    /// 纯文本章节列表 (`HH:MM:SS - 文本`)
    #[strum(serialize = "transcript", serialize = "simple")]
    Transcript,
}

impl MarkerFormat {
    /// 对应的文件扩展名。
    #[must_use]
    pub fn to_extension_str(self) -> &'static str {
        match self {
            MarkerFormat::Label | MarkerFormat::Transcript => "txt",
            MarkerFormat::Lrc => "lrc",
            MarkerFormat::Cue => "cue",
        }
    }

    /// 根据输入文件的扩展名选择读取格式。
    ///
    /// 只有 `.txt` (Audacity 标签) 和 `.lrc` 可以作为输入。
    pub fn from_input_path(path: &Path) -> Result<Self, MarkerError> {
        match extension_of(path) {
            Some("txt") => Ok(MarkerFormat::Label),
            Some("lrc") => Ok(MarkerFormat::Lrc),
            other => Err(MarkerError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// 根据输出文件的扩展名推断写入格式，命令行未指定 `--format` 时使用。
    pub fn from_output_path(path: &Path) -> Result<Self, MarkerError> {
        match extension_of(path) {
            Some("txt") => Ok(MarkerFormat::Label),
            Some("lrc") => Ok(MarkerFormat::Lrc),
            Some("cue") => Ok(MarkerFormat::Cue),
            other => Err(MarkerError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

impl fmt::Display for MarkerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerFormat::Label => write!(f, "Audacity 标签"),
            MarkerFormat::Lrc => write!(f, "LRC"),
            MarkerFormat::Cue => write!(f, "CUE"),
            MarkerFormat::Transcript => write!(f, "纯文本"),
        }
    }
}

/// 传给各个生成器的只读数据。
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub chapters: &'a [Chapter],
    pub metadata: Option<&'a ShowMetadata>,
    pub media_filename: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_input_format_from_extension() {
        assert_eq!(
            MarkerFormat::from_input_path(Path::new("show/markers.txt")).unwrap(),
            MarkerFormat::Label
        );
        assert_eq!(
            MarkerFormat::from_input_path(Path::new("markers.lrc")).unwrap(),
            MarkerFormat::Lrc
        );
        assert!(matches!(
            MarkerFormat::from_input_path(Path::new("markers.cue")),
            Err(MarkerError::UnsupportedFormat(ext)) if ext == "cue"
        ));
        assert!(matches!(
            MarkerFormat::from_input_path(Path::new("markers")),
            Err(MarkerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(
            MarkerFormat::from_output_path(Path::new("out.cue")).unwrap(),
            MarkerFormat::Cue
        );
        assert!(MarkerFormat::from_output_path(Path::new("out.mp3")).is_err());
    }

    #[test]
    fn test_format_names_parse_case_insensitive() {
        assert_eq!("LRC".parse::<MarkerFormat>().unwrap(), MarkerFormat::Lrc);
        assert_eq!(
            "Audacity".parse::<MarkerFormat>().unwrap(),
            MarkerFormat::Label
        );
        assert_eq!(
            "simple".parse::<MarkerFormat>().unwrap(),
            MarkerFormat::Transcript
        );
        assert!("ffmetadata".parse::<MarkerFormat>().is_err());
    }

    #[test]
    fn test_every_format_has_extension() {
        for format in MarkerFormat::iter() {
            assert!(!format.to_extension_str().is_empty());
        }
    }

    #[test]
    fn test_chapter_defaults() {
        let chapter = Chapter::new(0, 1000);
        assert!(chapter.indexed);
        assert_eq!(chapter.id(), None);
        assert_eq!(chapter.display_text(), "");
    }
}
