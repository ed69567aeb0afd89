use std::fs::{self, File};
use std::io;
use std::path::Path;
use log::{debug, info, warn};
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};
use crate::models::conversion::ConversionError;
use crate::utils::path::{archive_entry_name, relative_path};

/// 將 ZIP 逐一解壓到 `dest`，回傳寫出的檔案數。
/// 符號連結條目一律拒絕，避免解壓後的目錄指向工作目錄以外的位置；
/// 名稱會跳出 `dest` 的條目則略過。
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize, ConversionError> {
    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ConversionError::InvalidArchive(e.to_string()))?;

    let mut count = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(classify_zip_error)?;
        if entry.unix_mode().map(is_symlink_mode).unwrap_or(false) {
            warn!("拒絕符號連結條目：{}", entry.name());
            return Err(ConversionError::InvalidArchive(format!(
                "symlink entry not allowed: {}",
                entry.name()
            )));
        }
        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                warn!("略過不安全的條目路徑：{}", entry.name());
                continue;
            }
        };

        let output_path = dest.join(&entry_path);
        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&output_path)?;
            // 校驗碼或壓縮資料損毀時，讀取端回報 InvalidData
            io::copy(&mut entry, &mut outfile).map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => ConversionError::InvalidArchive(e.to_string()),
                _ => ConversionError::Unexpected(e.to_string()),
            })?;
            count += 1;
        }
    }
    info!("解壓 {} 個檔案至：{}", count, dest.display());
    Ok(count)
}

fn is_symlink_mode(mode: u32) -> bool {
    mode & S_IFMT == S_IFLNK
}

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

// 解壓途中的 I/O 錯誤屬於環境問題，其餘皆視為壓縮檔格式錯誤
fn classify_zip_error(err: ZipError) -> ConversionError {
    match err {
        ZipError::Io(e) => ConversionError::Unexpected(e.to_string()),
        other => ConversionError::InvalidArchive(other.to_string()),
    }
}

/// 固定時間戳與檔名排序，相同輸入產生位元組相同的輸出
pub fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// 將 `root` 底下所有一般檔案寫入 `target`，內部路徑相對於 `root`。
/// `root` 本身是符號連結時直接失敗；其下的符號連結不跟隨也不寫入，只記錄警告。
/// 回傳寫入的檔案數。
pub fn pack_directory(root: &Path, target: &Path) -> Result<usize, ConversionError> {
    write_directory(root, target).map_err(|e| ConversionError::Write(e.to_string()))
}

fn write_directory(root: &Path, target: &Path) -> io::Result<usize> {
    if fs::symlink_metadata(root)?.file_type().is_symlink() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("資源目錄是符號連結：{}", root.display()),
        ));
    }

    let file = File::create(target)?;
    let mut writer = ZipWriter::new(file);
    let options = entry_options();
    let mut count = 0;

    for entry in WalkDir::new(root).follow_root_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            warn!("略過符號連結：{}", entry.path().display());
            continue;
        }
        if !file_type.is_file() {
            continue;
        }
        let relative = relative_path(root, entry.path())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let name = archive_entry_name(&relative)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        debug!("寫入條目：{}", name);
        writer.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
        count += 1;
    }

    writer.finish()?;
    Ok(count)
}
