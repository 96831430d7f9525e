//! # LRC 格式解析器
//!
//! 每行只有一个时间戳，章节的结束时间取下一行的时间戳，最后一行生成零时长章节。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::converter::MarkerParser;
use crate::error::Result;
use crate::types::Chapter;
use crate::utils::{seconds_to_ms, split_url, strip_bom};

/// 匹配 `[mm:ss.ff]文本`，捕获分钟、秒 (含小数) 和文本
static LRC_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d+):(\d\d\.\d+)\](.*)$").expect("未能编译 LRC_LINE_REGEX")
});

/// 只识别并跳过这三种元数据标签
static LRC_METADATA_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(ti|ar|al):(.*)\]$").expect("未能编译 LRC_METADATA_TAG_REGEX"));

pub struct LrcParser;

impl MarkerParser for LrcParser {
    fn parse(&self, content: &str) -> Result<Vec<Chapter>> {
        Ok(parse_lrc_text(content))
    }
}

/// 一行已解析、但结束时间还未知的时间戳。
struct TimedEntry {
    start_ms: u64,
    text: String,
    url: Option<String>,
}

impl TimedEntry {
    fn into_chapter(self, end_ms: u64) -> Chapter {
        Chapter::new(self.start_ms, end_ms)
            .with_text(self.text)
            .with_url(self.url)
    }
}

/// 解析 LRC 文本为章节列表。
///
/// 输入必须已经按时间排序，这里不做排序也不去重。
pub fn parse_lrc_text(content: &str) -> Vec<Chapter> {
    let (mut chapters, pending) = strip_bom(content)
        .lines()
        .enumerate()
        .filter_map(|(line_num, line)| parse_timed_line(line_num, line))
        .fold(
            (Vec::new(), None::<TimedEntry>),
            |(mut chapters, pending), entry| {
                if let Some(previous) = pending {
                    chapters.push(previous.into_chapter(entry.start_ms));
                }
                (chapters, Some(entry))
            },
        );

    if let Some(last) = pending {
        let end_ms = last.start_ms;
        chapters.push(last.into_chapter(end_ms));
    }

    log::debug!("[LRC 解析] 共解析 {} 个章节。", chapters.len());
    chapters
}

fn parse_timed_line(line_num: usize, line: &str) -> Option<TimedEntry> {
    if LRC_METADATA_TAG_REGEX.is_match(line) {
        return None;
    }

    let Some(caps) = LRC_LINE_REGEX.captures(line) else {
        if !line.trim().is_empty() {
            log::debug!("[LRC 解析] 行 {}: 跳过未识别的行: '{}'", line_num + 1, line);
        }
        return None;
    };

    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: f64 = caps[2].parse().ok()?;
    let start_ms = minutes.checked_mul(60_000)?.checked_add(seconds_to_ms(seconds)?)?;
    let (text, url) = split_url(&caps[3]);

    Some(TimedEntry {
        start_ms,
        text,
        url,
    })
}
