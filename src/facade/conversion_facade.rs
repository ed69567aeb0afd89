use std::io;
use log::{info, warn};
use crate::config::ports::ConfigPort;
use crate::config::settings::Settings;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOutput, ConversionRequest};
use crate::service::config_service::ConfigService;
use crate::service::traits::i_service::ConverterTrait;
use crate::utils::utils::ProgressManager;

pub const FAILURE_HINT: &str = "轉換失敗，請檢查：\n1. 檔案是否為合法的 Scratch 打包專案\n2. 輸出目錄是否有寫入權限";

pub struct ConversionFacade {
    config_service: ConfigService,
    converter: Box<dyn ConverterTrait>,
}

impl ConversionFacade {
    pub fn new(config_port: Box<dyn ConfigPort>, converter: Box<dyn ConverterTrait>) -> Self {
        ConversionFacade {
            config_service: ConfigService::new(config_port),
            converter,
        }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self) -> io::Result<ConversionOutput> {
        let config = self.config_service.get_config()?;

        let mut settings = Settings::load(&config.settings_path);
        settings.remember_input(&config.input);
        settings.remember_output(&config.output);
        if let Err(e) = settings.save(&config.settings_path) {
            warn!("無法儲存歷史紀錄：{}", e);
        }

        let request = ConversionRequest::new(config.input.clone(), config.output.clone());
        let mut progress = ProgressManager::new(config.no_progress);
        let output = self
            .converter
            .convert(&request, Some(&mut progress))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{}\n{}", e, FAILURE_HINT)))?;

        info!("輸出檔案：{}", output.output_path.display());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ports::AppConfig;
    use crate::models::conversion::{ConversionError, ConversionResult};
    use crate::service::traits::i_service::ProgressPort;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct FixedConfig(AppConfig);

    impl ConfigPort for FixedConfig {
        fn get_config(&self) -> io::Result<AppConfig> {
            Ok(self.0.clone())
        }
    }

    struct FailingConverter;

    impl ConverterTrait for FailingConverter {
        fn convert(&self, _request: &ConversionRequest, _progress: Option<&mut dyn ProgressPort>) -> ConversionResult {
            Err(ConversionError::MissingResourceDirectory {
                path: PathBuf::from("/w/packaged-project/resources/app"),
            })
        }
    }

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            input: dir.join("game.zip"),
            output: dir.join("out"),
            settings_path: dir.join("settings.json"),
            no_progress: true,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn failure_carries_reason_and_hint_and_history_is_recorded() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let facade = ConversionFacade::new(Box::new(FixedConfig(config.clone())), Box::new(FailingConverter));

        let err = facade.execute_conversion().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("missing resource directory: "));
        assert!(message.contains(FAILURE_HINT));

        let settings = Settings::load(&config.settings_path);
        assert_eq!(settings.history.input, Some(config.input.to_string_lossy().to_string()));
        assert_eq!(settings.history.output, Some(config.output.to_string_lossy().to_string()));
    }
}
