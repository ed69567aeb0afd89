use std::path::{Component, Path, PathBuf};
use pathdiff::diff_paths;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("路徑 {} 不在 {} 之下", .path.display(), .root.display())]
    NotUnderRoot { path: PathBuf, root: PathBuf },
    #[error("無法作為壓縮檔內部路徑：{}", .path.display())]
    InvalidEntryName { path: PathBuf },
}

/// 以字面方式正規化路徑：去除 `.`、收合 `..`，不存取檔案系統。
/// 絕對路徑的 `..` 不會越過根目錄；相對路徑開頭多出的 `..` 會保留。
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::Prefix(_)) | Some(Component::RootDir) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// 計算 `path` 相對於 `root` 的路徑。`root` 必須是 `path` 以路徑段為單位的祖先，
/// 否則回傳 `PathError::NotUnderRoot`；`path == root` 時回傳空路徑。
pub fn relative_path(root: &Path, path: &Path) -> Result<PathBuf, PathError> {
    let root = normalize_path(root);
    let path = normalize_path(path);
    let not_under_root = || PathError::NotUnderRoot {
        path: path.clone(),
        root: root.clone(),
    };

    let relative = diff_paths(&path, &root).ok_or_else(not_under_root)?;
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(not_under_root());
    }
    Ok(relative)
}

/// 將相對路徑轉為壓縮檔內部名稱，一律以 `/` 分隔；非 UTF-8 名稱回傳錯誤
pub fn archive_entry_name(relative: &Path) -> Result<String, PathError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part.to_string()),
                None => {
                    return Err(PathError::InvalidEntryName {
                        path: relative.to_path_buf(),
                    })
                }
            },
            Component::CurDir => {}
            _ => {
                return Err(PathError::InvalidEntryName {
                    path: relative.to_path_buf(),
                })
            }
        }
    }
    if parts.is_empty() {
        return Err(PathError::InvalidEntryName {
            path: relative.to_path_buf(),
        });
    }
    Ok(parts.join("/"))
}
