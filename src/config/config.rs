use clap::Parser;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "exe2sb3",
    about = "將 Scratch 桌面打包版（exe 發佈 ZIP）還原為 .sb3 專案檔",
    long_about = "從打包過的 Scratch 桌面版發佈 ZIP 中取出 packaged-project/resources/app 目錄，重新打包成標準的 .sb3 專案檔。\n不帶任何參數執行時進入互動模式。\n使用 `--help` 查看詳細用法。"
)]
pub struct Cli {
    /// 輸入的 ZIP 檔案
    pub input: Option<String>,
    /// 輸出目錄；省略時使用上次的輸出目錄
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    /// 設定檔位置（預設為 ~/.exe2sb3.json）
    #[arg(long)]
    pub settings: Option<String>,
    /// 顯示最近使用的檔案後結束
    #[arg(long, default_value_t = false)]
    pub history: bool,
}

pub const SETTINGS_FILE_NAME: &str = ".exe2sb3.json";

pub fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE_NAME)
}

pub fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// 輸入必須是可讀取的 .zip 一般檔案
pub fn validate_zip_path(input: &str) -> io::Result<PathBuf> {
    let path = PathBuf::from(input);
    if !has_zip_extension(&path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("請選擇 ZIP 格式檔案：'{}'", input),
        ));
    }
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input),
        ));
    }
    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("輸入路徑 '{}' 不是檔案", input),
        ));
    }
    File::open(&path).map_err(|e| {
        io::Error::new(e.kind(), format!("檔案 '{}' 不可讀：{}", input, e))
    })?;
    Ok(path)
}

/// 輸出目錄不存在時會建立；必須可寫入
pub fn validate_output_dir(output: &str) -> io::Result<PathBuf> {
    let path = PathBuf::from(output);
    if !path.exists() {
        log::info!("建立輸出目錄：{}", output);
        fs::create_dir_all(&path)?;
    }
    let metadata = fs::metadata(&path)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("輸出路徑 '{}' 不是目錄", output),
        ));
    }
    if metadata.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("輸出目錄 '{}' 沒有寫入權限", output),
        ));
    }
    Ok(path)
}
