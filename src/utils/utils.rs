use std::io;
use indicatif::{ProgressBar, ProgressStyle};
use crate::models::conversion::ProgressEvent;
use crate::service::converter::{PROGRESS_DONE, PROGRESS_FAILED};
use crate::service::traits::i_service::{ProgressError, ProgressPort};

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

/// 0–100 的終端機進度條
pub struct ProgressManager {
    pb: ProgressBar,
}

impl ProgressManager {
    pub fn new(no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(u64::from(PROGRESS_DONE));
            let style = ProgressStyle::default_bar()
                .template("[{bar:40}] {pos:>3}% {msg}")
                .map(|style| style.progress_chars("##-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style);
            pb
        };
        ProgressManager { pb }
    }

    pub fn is_closed(&self) -> bool {
        self.pb.is_finished()
    }
}

impl ProgressPort for ProgressManager {
    fn on_progress(&mut self, event: &ProgressEvent) -> Result<(), ProgressError> {
        if self.is_closed() {
            return Err(ProgressError::Closed);
        }
        match event.percent {
            PROGRESS_FAILED => self.pb.abandon_with_message(event.message.clone()),
            PROGRESS_DONE => {
                self.pb.set_position(u64::from(PROGRESS_DONE));
                self.pb.finish_with_message(event.message.clone());
            }
            percent => {
                self.pb.set_position(u64::from(percent));
                self.pb.set_message(event.message.clone());
            }
        }
        Ok(())
    }
}
