use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use walkdir::WalkDir;

pub const WORKSPACE_DIR_NAME: &str = "temp_extract";
pub const SB3_EXTENSION: &str = "sb3";

pub fn workspace_path(output_dir: &Path) -> PathBuf {
    output_dir.join(WORKSPACE_DIR_NAME)
}

/// `<output_dir>/<輸入檔名去副檔名>.sb3`
pub fn sb3_target_path(input_archive: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_archive
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "project".to_string());
    output_dir.join(format!("{}.{}", stem, SB3_EXTENSION))
}

/// 建立空的暫存工作目錄；前次中斷留下的內容會先被移除
pub fn prepare_workspace(workspace: &Path) -> io::Result<()> {
    if workspace.exists() {
        warn!("發現殘留的暫存目錄，先行清除：{}", workspace.display());
        remove_tree(workspace)?;
    }
    fs::create_dir_all(workspace)
}

/// 由深至淺刪除：先檔案後目錄，最後刪除根目錄本身
pub fn remove_tree(root: &Path) -> io::Result<()> {
    let root_meta = fs::symlink_metadata(root)?;
    if !root_meta.is_dir() {
        return fs::remove_file(root);
    }
    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// 清除失敗只記錄，不影響轉換結果；回傳是否確實移除
pub fn cleanup_workspace(workspace: &Path) -> bool {
    cleanup_workspace_with(workspace, remove_tree)
}

pub fn cleanup_workspace_with<F>(workspace: &Path, remove: F) -> bool
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    if fs::symlink_metadata(workspace).is_err() {
        return true;
    }
    match remove(workspace) {
        Ok(()) => {
            info!("已清除暫存目錄：{}", workspace.display());
            true
        }
        Err(e) => {
            warn!("清理暫存目錄失敗：{}：{}", workspace.display(), e);
            false
        }
    }
}

/// 寫入失敗時移除不完整的輸出檔
pub fn discard_partial_output(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        warn!("無法移除不完整的輸出檔 {}：{}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn target_path_strips_only_last_extension() {
        let out = Path::new("/out");
        assert_eq!(sb3_target_path(Path::new("/in/game.zip"), out), PathBuf::from("/out/game.sb3"));
        assert_eq!(sb3_target_path(Path::new("my.game.ZIP"), out), PathBuf::from("/out/my.game.sb3"));
    }

    #[test]
    fn remove_tree_deletes_nested_content_and_root() {
        let dir = TempDir::new().unwrap();
        let ws = workspace_path(dir.path());
        fs::create_dir_all(ws.join("a/b/c")).unwrap();
        fs::write(ws.join("a/one.txt"), b"1").unwrap();
        fs::write(ws.join("a/b/c/two.txt"), b"2").unwrap();

        remove_tree(&ws).unwrap();
        assert!(!ws.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn prepare_workspace_clears_stale_content() {
        let dir = TempDir::new().unwrap();
        let ws = workspace_path(dir.path());
        fs::create_dir_all(ws.join("packaged-project")).unwrap();
        fs::write(ws.join("packaged-project/stale.txt"), b"old").unwrap();

        prepare_workspace(&ws).unwrap();
        assert!(ws.is_dir());
        assert_eq!(fs::read_dir(&ws).unwrap().count(), 0);
    }

    #[test]
    fn cleanup_of_missing_workspace_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        assert!(cleanup_workspace(&dir.path().join("nothing_here")));
    }

    #[test]
    fn cleanup_failure_is_only_reported() {
        let dir = TempDir::new().unwrap();
        let ws = workspace_path(dir.path());
        fs::create_dir_all(ws.join("packaged-project")).unwrap();

        let removed = cleanup_workspace_with(&ws, |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"))
        });
        assert!(!removed);
        assert!(ws.is_dir());

        assert!(cleanup_workspace(&ws));
        assert!(!ws.exists());
    }

    #[cfg(unix)]
    #[test]
    fn cleanup_removes_symlinks_without_following_them() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("keep.txt"), b"keep").unwrap();
        let ws = workspace_path(dir.path());
        fs::create_dir_all(&ws).unwrap();
        std::os::unix::fs::symlink(&outside, ws.join("link")).unwrap();

        assert!(cleanup_workspace(&ws));
        assert!(!ws.exists());
        assert!(outside.join("keep.txt").is_file());
    }
}
