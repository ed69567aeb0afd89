use std::io;
use crate::models::conversion::ConversionOutput;

// Facade 接口，介面層的指令處理入口
pub trait ConversionFacadeTrait {
    /// 讀取配置、記錄歷史並執行一次轉換
    /// # 回傳
    /// - 成功時返回輸出檔資訊，失敗時返回 IO 錯誤（內含轉換失敗原因）
    fn execute_conversion(&self) -> io::Result<ConversionOutput>;
}
