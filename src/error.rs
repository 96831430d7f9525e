use std::{fmt, io};

use thiserror::Error;

/// 标记加载、转换和保存过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum MarkerError {
    /// 无法识别的输入扩展名，或该格式没有对应的读取器。
    #[error("不支持的标记文件格式: {0}")]
    UnsupportedFormat(String),
    /// 写入 CUE 时没有提供关联的媒体文件名。
    #[error("没有关联的媒体文件名，无法写入 CUE 文件。请在创建 MarkerStore 时传入 media_filename。")]
    MissingMediaReference,
    /// 尚未实现的功能，目前只有章节图片会触发。
    #[error("尚未实现: {0}")]
    Unimplemented(String),
    /// 同一个 `MarkerStore` 只能加载一次。
    #[error("标记已经加载过，MarkerStore 只能加载一次")]
    AlreadyLoaded,
    /// 字符串格式化错误。
    #[error("格式错误: {0}")]
    Format(#[from] fmt::Error),
    /// 文件读写等IO错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
}

impl From<MarkerError> for std::io::Error {
    fn from(err: MarkerError) -> Self {
        match err {
            MarkerError::Io(inner) => inner,
            other => std::io::Error::other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_passes_through_unchanged() {
        let original = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let converted: io::Error = MarkerError::from(original).into();
        assert_eq!(converted.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_domain_error_wraps_as_other() {
        let converted: io::Error = MarkerError::MissingMediaReference.into();
        assert_eq!(converted.kind(), io::ErrorKind::Other);
        assert!(converted.to_string().contains("CUE"));
    }
}
