use dialoguer::Input;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::config::{default_settings_path, validate_output_dir, validate_zip_path};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::config::settings::Settings;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::service::converter::Converter;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<Option<PathBuf>> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging("info")?;

    let settings_path = default_settings_path();
    let settings = Settings::load(&settings_path);
    if settings.history.input.is_some() || settings.history.output.is_some() {
        println!("{}", settings.describe_history());
    }

    let facade: Box<dyn ConversionFacadeTrait> = Box::new(ConversionFacade::new(
        Box::new(InteractiveConfigAdapter::new(settings_path, settings)),
        Box::new(Converter::new()),
    ));
    let output = facade.execute_conversion()?;
    Ok(Some(output.output_path))
}

// 互動式配置適配器，預設值取自歷史紀錄
pub struct InteractiveConfigAdapter {
    settings_path: PathBuf,
    settings: Settings,
}

impl InteractiveConfigAdapter {
    pub fn new(settings_path: PathBuf, settings: Settings) -> Self {
        InteractiveConfigAdapter { settings_path, settings }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let input = get_input_path(self.settings.restored_input().as_deref())?;
        let output = get_output_path(self.settings.restored_output().as_deref())?;
        Ok(AppConfig {
            input: validate_zip_path(&input)?,
            output: validate_output_dir(&output)?,
            settings_path: self.settings_path.clone(),
            no_progress: false,
            log_level: "info".to_string(),
        })
    }
}

pub fn get_input_path(remembered: Option<&Path>) -> io::Result<String> {
    let mut prompt = Input::<String>::new()
        .with_prompt("請輸入打包後的 ZIP 檔案路徑（例如：./Project.zip）")
        .validate_with(|input: &String| -> Result<(), String> {
            validate_zip_path(input).map(|_| ()).map_err(|e| e.to_string())
        });
    if let Some(path) = remembered {
        prompt = prompt.default(path.to_string_lossy().to_string());
    }
    prompt
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("輸入檔案選擇失敗: {}", e)))
}

pub fn get_output_path(remembered: Option<&Path>) -> io::Result<String> {
    let default = remembered
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    Input::<String>::new()
        .with_prompt("輸入輸出目錄")
        .default(default)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("輸出目錄選擇失敗: {}", e)))
}
