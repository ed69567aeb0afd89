use std::path::PathBuf;
use thiserror::Error;

// 單次轉換的輸入，整個轉換期間不可變
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_archive: PathBuf,
    pub output_dir: PathBuf,
}

impl ConversionRequest {
    pub fn new(input_archive: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        ConversionRequest {
            input_archive: input_archive.into(),
            output_dir: output_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub output_path: PathBuf,
    pub packed_files: usize,
}

/// 進度事件，僅供觀察，不會持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        ProgressEvent {
            percent: percent.min(100),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArchive,
    MissingResourceDirectory,
    Write,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    /// 內含細節僅供日誌使用，原因固定為 `invalid archive format`
    #[error("invalid archive format")]
    InvalidArchive(String),
    #[error("missing resource directory: {}", .path.display())]
    MissingResourceDirectory { path: PathBuf },
    #[error("write error: {0}")]
    Write(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidArchive(_) => ErrorKind::InvalidArchive,
            ConversionError::MissingResourceDirectory { .. } => ErrorKind::MissingResourceDirectory,
            ConversionError::Write(_) => ErrorKind::Write,
            ConversionError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::Unexpected(err.to_string())
    }
}

/// Success 為 `Ok`，Failure 為 `Err`，原因即錯誤的 Display 字串
pub type ConversionResult = Result<ConversionOutput, ConversionError>;
