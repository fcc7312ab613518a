//! JSON 集合文件 - 基础设施层
//!
//! 一个集合对应一个 JSON 文件（id → 文档），每次修改整文件重写。
//! 读取结果缓存在内存中，写入后失效。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StorageError;

type Documents<T> = BTreeMap<String, T>;

/// JSON 集合
///
/// 职责：
/// - 持有集合文件路径
/// - 提供 读取 / 插入 / 删除 能力
/// - 进程内写入串行化；跨进程不加锁，后写者覆盖
pub struct JsonCollection<T> {
    path: PathBuf,
    cache: Mutex<Option<Documents<T>>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部文档（文件不存在时为空）
    pub async fn load_all(&self) -> Result<Documents<T>, StorageError> {
        let mut cache = self.cache.lock().await;
        if let Some(docs) = cache.as_ref() {
            return Ok(docs.clone());
        }
        let docs = self.read_file().await?;
        *cache = Some(docs.clone());
        Ok(docs)
    }

    /// 按 id 读取单个文档
    pub async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(self.load_all().await?.remove(id))
    }

    /// 插入或覆盖文档
    pub async fn insert(&self, id: &str, doc: T) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().await;
        let mut docs = self.read_file().await?;
        docs.insert(id.to_string(), doc);
        self.write_file(&docs).await?;
        *cache = Some(docs);
        debug!("写入文档 {} → {}", id, self.path.display());
        Ok(())
    }

    /// 删除文档，返回是否存在
    pub async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut cache = self.cache.lock().await;
        let mut docs = self.read_file().await?;
        let existed = docs.remove(id).is_some();
        if existed {
            self.write_file(&docs).await?;
            info!("🗑️ 已删除文档 {} ({})", id, self.path.display());
        }
        *cache = Some(docs);
        Ok(existed)
    }

    async fn read_file(&self) -> Result<Documents<T>, StorageError> {
        let display = self.path.display().to_string();
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Documents::new()),
            Err(e) => return Err(StorageError::read_failed(display, e)),
        };
        if content.trim().is_empty() {
            return Ok(Documents::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::JsonParseFailed {
            path: display,
            source,
        })
    }

    async fn write_file(&self, docs: &Documents<T>) -> Result<(), StorageError> {
        let display = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::write_failed(&display, e))?;
        }
        let content = serde_json::to_string_pretty(docs).map_err(|source| StorageError::JsonEncodeFailed {
            path: display.clone(),
            source,
        })?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| StorageError::write_failed(display, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        tags: Vec<String>,
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("assessor-store-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let store: JsonCollection<Note> = JsonCollection::new(temp_path("notes.json"));
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_then_reload_from_disk() {
        let path = temp_path("notes.json");
        let note = Note {
            title: "uno".into(),
            tags: vec!["a".into(), "b".into()],
        };

        let store = JsonCollection::new(&path);
        store.insert("n1", note.clone()).await.unwrap();

        // 新实例没有缓存，必须从磁盘读取
        let reopened: JsonCollection<Note> = JsonCollection::new(&path);
        assert_eq!(reopened.get("n1").await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn remove_rewrites_file() {
        let path = temp_path("notes.json");
        let store = JsonCollection::new(&path);
        store
            .insert("n1", Note { title: "x".into(), tags: vec![] })
            .await
            .unwrap();

        assert!(store.remove("n1").await.unwrap());
        assert!(!store.remove("n1").await.unwrap());

        let reopened: JsonCollection<Note> = JsonCollection::new(&path);
        assert!(reopened.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path("notes.json");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "{not json").await.unwrap();

        let store: JsonCollection<Note> = JsonCollection::new(&path);
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StorageError::JsonParseFailed { .. }));
    }
}
