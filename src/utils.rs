use url::Url;

use crate::error::MarkerError;
use crate::types::Chapter;

const UTF8_BOM: char = '\u{feff}';

/// 去掉文本开头的 UTF-8 BOM (如果有)。
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// 将秒数转换为整数毫秒。
///
/// 舍入规则为四舍五入，恰好一半时远离零 (`f64::round`)，两个读取器统一使用此规则。
/// 负数或非有限值返回 `None`。
pub fn seconds_to_ms(seconds: f64) -> Option<u64> {
    let ms = (seconds * 1000.0).round();
    if ms.is_finite() && ms >= 0.0 {
        Some(ms as u64)
    } else {
        None
    }
}

/// 将标签拆分为文本和链接。
///
/// 以最后一个 `|` 为界，右侧为链接。没有 `|` 时链接为 `None`。
/// 链接不是绝对 URL 时只记录警告，原样保留。
pub fn split_url(label: &str) -> (String, Option<String>) {
    match label.rsplit_once('|') {
        Some((text, url)) => {
            if let Err(e) = Url::parse(url) {
                log::warn!("[标记处理] 标签 '{text}' 的链接 '{url}' 不是有效的绝对 URL: {e}");
            }
            (text.to_string(), Some(url.to_string()))
        }
        None => (label.to_string(), None),
    }
}

/// 章节图片目前不能写入任何格式。
pub fn ensure_no_image(chapter: &Chapter) -> Result<(), MarkerError> {
    match &chapter.image {
        Some(image) => Err(MarkerError::Unimplemented(format!(
            "章节 '{}' 带有图片 {}，暂不支持输出章节图片",
            chapter.display_text(),
            image.display()
        ))),
        None => Ok(()),
    }
}

/// 拆分毫秒时间为 (分钟, 秒, 剩余毫秒)。
pub fn split_ms(ms: u64) -> (u64, u64, u64) {
    let minutes = ms / 60000;
    let seconds = (ms % 60000) / 1000;
    let millis = ms % 1000;
    (minutes, seconds, millis)
}

/// 将毫秒时间格式化为 LRC 的 `[mm:ss.cc]`。
///
/// 厘秒部分是截断而不是舍入，以保持与已有文件的兼容。
pub fn format_lrc_time_ms(ms: u64) -> String {
    let (minutes, seconds, millis) = split_ms(ms);
    format!("[{:02}:{:02}.{:02}]", minutes, seconds, millis / 10)
}

/// 将毫秒时间格式化为 CUE 的 `mm:ss:ff`，每秒 75 帧。
pub fn format_cue_time_ms(ms: u64) -> String {
    let (minutes, seconds, millis) = split_ms(ms);
    let frames = (millis as f64 * 0.075).floor() as u64;
    format!("{minutes:02}:{seconds:02}:{frames:02}")
}

/// 将毫秒格式化为 Audacity 使用的六位小数秒数。
pub fn format_label_seconds(ms: u64) -> String {
    format!("{}.{:03}000", ms / 1000, ms % 1000)
}
