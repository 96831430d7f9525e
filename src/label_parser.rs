//! # Audacity 标签解析器
//!
//! 每行三列，用制表符分隔：开始秒数、结束秒数、标签文本。
//! 标签末尾可以用 `|` 附加一个链接，例如 `Some Marker Name|https://example.com`。

use crate::converter::MarkerParser;
use crate::error::Result;
use crate::types::Chapter;
use crate::utils::{seconds_to_ms, split_url, strip_bom};

pub struct LabelParser;

impl MarkerParser for LabelParser {
    fn parse(&self, content: &str) -> Result<Vec<Chapter>> {
        Ok(parse_label_text(content))
    }
}

/// 解析 Audacity 标签文本。
///
/// 数值列无法解析的行 (例如表头、频谱选区行) 会被跳过；遇到空行即停止读取。
pub fn parse_label_text(content: &str) -> Vec<Chapter> {
    let mut chapters = Vec::new();

    for (line_num, line) in strip_bom(content).lines().enumerate() {
        if line.is_empty() {
            log::debug!("[标签解析] 行 {}: 空行，停止读取。", line_num + 1);
            break;
        }

        match parse_label_row(line) {
            Some(chapter) => chapters.push(chapter),
            None => log::debug!("[标签解析] 行 {}: 跳过非数据行: '{}'", line_num + 1, line),
        }
    }

    log::debug!("[标签解析] 共解析 {} 个章节。", chapters.len());
    chapters
}

fn parse_label_row(line: &str) -> Option<Chapter> {
    let mut fields = line.split('\t');
    let start = parse_seconds(fields.next()?)?;
    let end = parse_seconds(fields.next()?)?;
    let label = fields.next()?;

    let (text, url) = split_url(label);
    Some(Chapter::new(start, end).with_text(text).with_url(url))
}

fn parse_seconds(field: &str) -> Option<u64> {
    field.trim().parse::<f64>().ok().and_then(seconds_to_ms)
}
