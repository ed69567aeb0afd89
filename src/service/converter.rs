use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, error, info};
use crate::models::conversion::{
    ConversionError, ConversionOutput, ConversionRequest, ConversionResult, ProgressEvent,
};
use crate::service::traits::i_service::{ConverterTrait, ProgressPort};
use crate::utils::file::{
    cleanup_workspace_with, discard_partial_output, prepare_workspace, remove_tree, sb3_target_path,
    workspace_path,
};
use crate::utils::path::normalize_path;
use crate::utils::zip::{extract_archive, pack_directory};

/// 打包發佈檔內，真正的專案檔案所在位置
pub const RESOURCE_SUBPATH: [&str; 3] = ["packaged-project", "resources", "app"];

pub const PROGRESS_EXTRACT: u8 = 10;
pub const PROGRESS_PACK: u8 = 50;
pub const PROGRESS_CLEANUP: u8 = 80;
pub const PROGRESS_DONE: u8 = 100;
pub const PROGRESS_FAILED: u8 = 0;

pub fn resource_dir(workspace: &Path) -> PathBuf {
    RESOURCE_SUBPATH
        .iter()
        .fold(workspace.to_path_buf(), |dir, part| dir.join(part))
}

// 轉發進度事件，接收端的錯誤一律吞掉
struct Reporter<'a> {
    port: Option<&'a mut dyn ProgressPort>,
}

impl<'a> Reporter<'a> {
    fn new(port: Option<&'a mut dyn ProgressPort>) -> Self {
        Reporter { port }
    }

    fn emit(&mut self, percent: u8, message: impl Into<String>) {
        let event = ProgressEvent::new(percent, message);
        if let Some(port) = self.port.as_mut() {
            if let Err(e) = port.on_progress(&event) {
                debug!("忽略進度更新 {}%：{}", event.percent, e);
            }
        }
    }
}

/// 無狀態的轉換器：解壓 → 檢查目錄 → 重新打包 → 清理
#[derive(Debug, Default, Clone, Copy)]
pub struct Converter;

impl Converter {
    pub fn new() -> Self {
        Converter
    }

    fn run_stages(
        &self,
        request: &ConversionRequest,
        workspace: &Path,
        reporter: &mut Reporter<'_>,
    ) -> ConversionResult {
        reporter.emit(PROGRESS_EXTRACT, "正在解壓檔案...");
        prepare_workspace(workspace)?;
        extract_archive(&request.input_archive, workspace)?;

        let workspace = normalize_path(workspace);
        let app_dir = resource_dir(&workspace);
        // 不跟隨符號連結：資源目錄必須是真正的目錄
        let is_real_dir = fs::symlink_metadata(&app_dir)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_real_dir {
            return Err(ConversionError::MissingResourceDirectory { path: app_dir });
        }
        info!("找到資源目錄：{}", app_dir.display());

        reporter.emit(PROGRESS_PACK, "正在打包 SB3 檔案...");
        let target = sb3_target_path(&request.input_archive, &request.output_dir);
        let packed_files = match pack_directory(&app_dir, &target) {
            Ok(count) => count,
            Err(e) => {
                discard_partial_output(&target);
                return Err(e);
            }
        };
        info!("生成 SB3：{}，共 {} 個檔案", target.display(), packed_files);

        Ok(ConversionOutput {
            output_path: target,
            packed_files,
        })
    }
}

impl ConverterTrait for Converter {
    fn convert(&self, request: &ConversionRequest, progress: Option<&mut dyn ProgressPort>) -> ConversionResult {
        let mut reporter = Reporter::new(progress);
        let workspace = workspace_path(&request.output_dir);
        info!(
            "開始轉換，輸入檔案：{}，輸出目錄：{}",
            request.input_archive.display(),
            request.output_dir.display()
        );

        let outcome = self.run_stages(request, &workspace, &mut reporter);
        conclude(outcome, &workspace, &mut reporter, remove_tree)
    }
}

// 回報最終進度並清理暫存目錄；清理結果不會改變轉換結果
fn conclude<F>(outcome: ConversionResult, workspace: &Path, reporter: &mut Reporter<'_>, remove: F) -> ConversionResult
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    match outcome {
        Ok(output) => {
            reporter.emit(PROGRESS_CLEANUP, "正在清理暫存檔案...");
            cleanup_workspace_with(workspace, remove);
            reporter.emit(PROGRESS_DONE, "轉換完成！");
            Ok(output)
        }
        Err(err) => {
            error!("轉換失敗：{:?}", err);
            reporter.emit(PROGRESS_FAILED, err.to_string());
            cleanup_workspace_with(workspace, remove);
            Err(err)
        }
    }
}
