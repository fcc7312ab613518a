//! 上传文件存储 - 基础设施层
//!
//! 上传的文件原样复制到按类别划分的目录，并以路径引用

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, StorageError, ValidationError};

/// 允许上传的文件类型
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// 上传文件的类别，对应数据目录下的子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Assignment,
    Submission,
}

impl UploadKind {
    fn dir_name(self) -> &'static str {
        match self {
            UploadKind::Assignment => "assignments",
            UploadKind::Submission => "submissions",
        }
    }
}

/// 表单上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// 只保留文件名部分，去掉客户端带来的目录
    pub fn safe_file_name(&self) -> String {
        Path::new(&self.file_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 校验文件类型
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ext = Path::new(&self.safe_file_name())
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFileType(self.file_name.clone()))
        }
    }
}

/// 读取上传文档的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    Text(String),
    Unreadable,
}

/// 上传文件存储
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 保存上传文件，返回保存路径
    pub async fn save(&self, kind: UploadKind, upload: &Upload) -> Result<String, AppError> {
        upload.validate()?;

        let dir = self.root.join(kind.dir_name());
        let display = dir.display().to_string();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::write_failed(&display, e))?;

        let path = dir.join(upload.safe_file_name());
        let path_str = path.to_string_lossy().to_string();
        fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| StorageError::write_failed(&path_str, e))?;

        info!("📎 已保存上传文件: {} ({} 字节)", path_str, upload.bytes.len());
        Ok(path_str)
    }

    /// 以 UTF-8 文本读取文档，失败时返回 [`DocumentContent::Unreadable`]
    pub async fn read_document(&self, path: &str) -> DocumentContent {
        match fs::read(path).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => DocumentContent::Text(text),
                Err(_) => {
                    warn!("⚠️ 文件不是 UTF-8 文本: {}", path);
                    DocumentContent::Unreadable
                }
            },
            Err(e) => {
                warn!("⚠️ 读取上传文件失败 {}: {}", path, e);
                DocumentContent::Unreadable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("assessor-uploads-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn rejects_unknown_extension() {
        let upload = Upload::new("essay.exe", vec![1, 2, 3]);
        assert_eq!(
            upload.validate(),
            Err(ValidationError::UnsupportedFileType("essay.exe".into()))
        );
        assert!(Upload::new("Essay.TXT", vec![]).validate().is_ok());
    }

    #[test]
    fn strips_client_directories() {
        let upload = Upload::new("../../etc/notes.txt", vec![]);
        assert_eq!(upload.safe_file_name(), "notes.txt");
    }

    #[tokio::test]
    async fn saved_text_can_be_read_back() {
        let store = UploadStore::new(temp_root());
        let path = store
            .save(UploadKind::Submission, &Upload::new("essay.txt", b"mi ensayo".to_vec()))
            .await
            .unwrap();

        assert!(path.contains("submissions"));
        assert_eq!(
            store.read_document(&path).await,
            DocumentContent::Text("mi ensayo".into())
        );
    }

    #[tokio::test]
    async fn binary_or_missing_documents_are_unreadable() {
        let store = UploadStore::new(temp_root());
        let path = store
            .save(UploadKind::Assignment, &Upload::new("scan.pdf", vec![0xff, 0xfe, 0x00]))
            .await
            .unwrap();

        assert_eq!(store.read_document(&path).await, DocumentContent::Unreadable);
        assert_eq!(store.read_document("/no/such/file.txt").await, DocumentContent::Unreadable);
    }
}
