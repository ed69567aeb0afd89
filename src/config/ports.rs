use std::io;
use std::path::PathBuf;

// 應用配置結構體，封裝一次執行所需的參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings_path: PathBuf,
    pub no_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}
