use thiserror::Error;
use crate::models::conversion::{ConversionRequest, ConversionResult, ProgressEvent};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    /// 接收端（例如已關閉的介面）不再接受更新
    #[error("進度接收端已關閉")]
    Closed,
}

// 進度回報接口，由呼叫端（介面層）實作
pub trait ProgressPort {
    /// 接收一個進度事件；回傳錯誤時轉換器會靜默忽略
    fn on_progress(&mut self, event: &ProgressEvent) -> Result<(), ProgressError>;
}

/// 什麼都不做的進度接收端
pub struct NoProgress;

impl ProgressPort for NoProgress {
    fn on_progress(&mut self, _event: &ProgressEvent) -> Result<(), ProgressError> {
        Ok(())
    }
}

/// 收集所有事件，方便檢查順序
impl ProgressPort for Vec<ProgressEvent> {
    fn on_progress(&mut self, event: &ProgressEvent) -> Result<(), ProgressError> {
        self.push(event.clone());
        Ok(())
    }
}

// 轉換服務接口
pub trait ConverterTrait {
    /// 將打包過的 Scratch 發佈檔轉回 .sb3
    /// # 參數
    /// - request: 輸入 ZIP 與輸出目錄
    /// - progress: 可選的進度接收端
    /// # 回傳
    /// - 成功時返回輸出檔路徑，失敗時返回分類後的錯誤；不會 panic
    fn convert(&self, request: &ConversionRequest, progress: Option<&mut dyn ProgressPort>) -> ConversionResult;
}
