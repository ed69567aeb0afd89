use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct History {
    pub input: Option<String>,
    pub output: Option<String>,
    pub updated_at: Option<String>,
}

/// 跨次執行保存的使用者設定；轉換器本身不讀寫它
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub last_input_dir: Option<String>,
    pub last_output_dir: Option<String>,
    pub history: History,
}

impl Settings {
    /// 檔案不存在時回傳預設值；內容損壞時記錄警告並回傳預設值
    pub fn load(path: &Path) -> Settings {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                log::warn!("無法讀取設定檔 {}：{}，使用預設值", path.display(), e);
                return Settings::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("設定檔 {} 格式錯誤：{}，使用預設值", path.display(), e);
            Settings::default()
        })
    }

    /// 先寫入暫存檔再改名，避免留下寫到一半的設定檔
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        log::debug!("設定已儲存至：{}", path.display());
        Ok(())
    }

    pub fn remember_input(&mut self, input: &Path) {
        if let Some(parent) = input.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_input_dir = Some(parent.to_string_lossy().to_string());
        }
        self.history.input = Some(input.to_string_lossy().to_string());
        self.touch();
    }

    pub fn remember_output(&mut self, output: &Path) {
        let output = output.to_string_lossy().to_string();
        self.last_output_dir = Some(output.clone());
        self.history.output = Some(output);
        self.touch();
    }

    fn touch(&mut self) {
        self.history.updated_at = Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    }

    /// 僅回傳仍存在於磁碟上的上次輸入檔
    pub fn restored_input(&self) -> Option<PathBuf> {
        existing(self.history.input.as_deref())
    }

    /// 僅回傳仍存在於磁碟上的上次輸出目錄
    pub fn restored_output(&self) -> Option<PathBuf> {
        existing(self.history.output.as_deref())
            .or_else(|| existing(self.last_output_dir.as_deref()))
    }

    pub fn describe_history(&self) -> String {
        format!(
            "最近使用的檔案：\n輸入檔案：{}\n輸出目錄：{}\n更新時間：{}",
            self.history.input.as_deref().unwrap_or("無"),
            self.history.output.as_deref().unwrap_or("無"),
            self.history.updated_at.as_deref().unwrap_or("無"),
        )
    }
}

fn existing(path: Option<&str>) -> Option<PathBuf> {
    path.filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(&dir.path().join("none.json")), Settings::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg/settings.json");

        let mut settings = Settings::default();
        settings.remember_input(Path::new("/games/cat.zip"));
        settings.save(&path).unwrap();

        settings.remember_output(Path::new("/exports"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.last_input_dir.as_deref(), Some("/games"));
        assert_eq!(loaded.history.input.as_deref(), Some("/games/cat.zip"));
        assert_eq!(loaded.history.output.as_deref(), Some("/exports"));
        assert!(loaded.history.updated_at.is_some());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let mut settings = Settings::default();
        settings.remember_output(Path::new("/exports"));
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["lastOutputDir"], "/exports");
        assert_eq!(json["history"]["output"], "/exports");
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"lastInputDir":"/a"}"#).unwrap();
        assert_eq!(settings.last_input_dir.as_deref(), Some("/a"));
        assert_eq!(settings.history, History::default());
    }

    #[test]
    fn only_existing_paths_are_restored() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.remember_input(&dir.path().join("gone.zip"));
        settings.remember_output(dir.path());
        assert_eq!(settings.restored_input(), None);
        assert_eq!(settings.restored_output(), Some(dir.path().to_path_buf()));
    }
}
