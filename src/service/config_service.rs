use std::io;
use std::path::PathBuf;
use crate::config::config::{default_settings_path, validate_output_dir, validate_zip_path, Cli};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::config::settings::Settings;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

pub fn settings_path_from(cli_value: Option<&str>) -> PathBuf {
    cli_value.map(PathBuf::from).unwrap_or_else(default_settings_path)
}

// 命令列參數適配器；未指定輸出目錄時沿用歷史紀錄
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let settings_path = settings_path_from(self.cli.settings.as_deref());
        let input = self.cli.input.as_deref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "請先指定輸入的 ZIP 檔案")
        })?;
        let input = validate_zip_path(input)?;

        let output = match self.cli.output.as_deref() {
            Some(output) => validate_output_dir(output)?,
            None => {
                let remembered = Settings::load(&settings_path).restored_output().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "請先指定輸出目錄（-o）")
                })?;
                log::info!("沿用上次的輸出目錄：{}", remembered.display());
                validate_output_dir(&remembered.to_string_lossy())?
            }
        };

        Ok(AppConfig {
            input,
            output,
            settings_path,
            no_progress: self.cli.no_progress,
            log_level: self.cli.log_level.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cli_adapter_validates_paths() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("game.zip");
        fs::write(&input, b"zip bytes").unwrap();
        let settings = dir.path().join("settings.json");
        let out = dir.path().join("out");

        let cli = Cli::parse_from([
            "exe2sb3",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
        ]);
        let config = ConfigService::new(Box::new(CliConfigAdapter::new(cli))).get_config().unwrap();
        assert_eq!(config.input, input);
        assert_eq!(config.output, out);
        assert_eq!(config.settings_path, settings);
        assert!(out.is_dir());
    }

    #[test]
    fn cli_adapter_falls_back_to_remembered_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("game.zip");
        fs::write(&input, b"zip bytes").unwrap();
        let settings_path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.remember_output(dir.path());
        settings.save(&settings_path).unwrap();

        let cli = Cli::parse_from([
            "exe2sb3",
            input.to_str().unwrap(),
            "--settings",
            settings_path.to_str().unwrap(),
        ]);
        let config = CliConfigAdapter::new(cli).get_config().unwrap();
        assert_eq!(config.output, dir.path().to_path_buf());
    }

    #[test]
    fn cli_adapter_requires_output_without_history() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("game.zip");
        fs::write(&input, b"zip bytes").unwrap();
        let cli = Cli::parse_from([
            "exe2sb3",
            input.to_str().unwrap(),
            "--settings",
            dir.path().join("none.json").to_str().unwrap(),
        ]);
        let err = CliConfigAdapter::new(cli).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
