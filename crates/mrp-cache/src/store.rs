//! 文件快取（依文件類型保存最後一次成功解析的工作表）

use chrono::{DateTime, Utc};
use mrp_core::{DocumentType, Grid, MrpError, Result, TabularDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use uuid::Uuid;

/// 快取項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedDocument {
    /// 快取ID
    pub id: Uuid,

    /// 文件類型
    pub document_type: DocumentType,

    /// 選定的工作表名稱
    pub sheet_name: String,

    /// 原始資料
    pub grid: Grid,

    /// 寫入時間
    pub stored_at: DateTime<Utc>,
}

impl CachedDocument {
    /// 由選定的文件建立快取項目
    pub fn new(document_type: DocumentType, document: &TabularDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_type,
            sheet_name: document.sheet_name.clone(),
            grid: document.grid.clone(),
            stored_at: Utc::now(),
        }
    }

    /// 還原為表格文件
    pub fn to_document(&self) -> TabularDocument {
        TabularDocument::new(self.sheet_name.clone(), self.grid.clone())
    }
}

/// 文件快取介面
pub trait DocumentCache: Send + Sync {
    /// 讀取文件類型的快取
    fn get(&self, document_type: DocumentType) -> Result<Option<CachedDocument>>;

    /// 寫入（覆蓋同類型的舊快取）
    fn put(&self, entry: CachedDocument) -> Result<()>;

    /// 移除
    fn remove(&self, document_type: DocumentType) -> Result<()>;
}

/// 記憶體快取
#[derive(Debug, Default)]
pub struct MemoryDocumentCache {
    entries: RwLock<HashMap<DocumentType, CachedDocument>>,
}

impl MemoryDocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已快取的文件類型數量
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> MrpError {
    MrpError::Cache("快取鎖已損壞".to_string())
}

impl DocumentCache for MemoryDocumentCache {
    fn get(&self, document_type: DocumentType) -> Result<Option<CachedDocument>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&document_type).cloned())
    }

    fn put(&self, entry: CachedDocument) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(entry.document_type, entry);
        Ok(())
    }

    fn remove(&self, document_type: DocumentType) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(&document_type);
        Ok(())
    }
}

/// JSON 檔案快取（每個文件類型一個檔案）
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// 開啟快取目錄（不存在時建立）
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| MrpError::Cache(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// 快取目錄
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, document_type: DocumentType) -> PathBuf {
        self.dir.join(format!("{}.json", document_type.key()))
    }
}

fn io_error(path: &Path, err: impl std::fmt::Display) -> MrpError {
    MrpError::Cache(format!("{}: {}", path.display(), err))
}

impl DocumentCache for JsonFileCache {
    fn get(&self, document_type: DocumentType) -> Result<Option<CachedDocument>> {
        let path = self.path_for(document_type);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let entry = serde_json::from_str(&json).map_err(|e| io_error(&path, e))?;
        Ok(Some(entry))
    }

    fn put(&self, entry: CachedDocument) -> Result<()> {
        let path = self.path_for(entry.document_type);
        let json = serde_json::to_string_pretty(&entry).map_err(|e| io_error(&path, e))?;

        // 先寫暫存檔再改名，避免讀到寫一半的檔案
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| io_error(&staging, e))?;
        fs::rename(&staging, &path).map_err(|e| io_error(&path, e))?;

        tracing::debug!("{} 快取已寫入 {}", entry.document_type, path.display());
        Ok(())
    }

    fn remove(&self, document_type: DocumentType) -> Result<()> {
        let path = self.path_for(document_type);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_core::row;
    use rstest::rstest;

    fn sample() -> TabularDocument {
        TabularDocument::new(
            "BOM",
            vec![
                row!["Derived Material", "Child Part", "Quantity Per Kit"],
                row!["FG-1", "RM-1", 2.5],
            ],
        )
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryDocumentCache::new();
        assert!(cache.get(DocumentType::Bom).unwrap().is_none());

        cache
            .put(CachedDocument::new(DocumentType::Bom, &sample()))
            .unwrap();
        let cached = cache.get(DocumentType::Bom).unwrap().unwrap();
        assert_eq!(cached.to_document(), sample());
        assert_eq!(cache.len(), 1);

        cache.remove(DocumentType::Bom).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_replaces_previous_entry() {
        let cache = MemoryDocumentCache::new();
        let first = CachedDocument::new(DocumentType::Bom, &sample());
        let second = CachedDocument::new(DocumentType::Bom, &TabularDocument::empty("BOM v2"));
        cache.put(first).unwrap();
        cache.put(second.clone()).unwrap();

        assert_eq!(cache.get(DocumentType::Bom).unwrap(), Some(second));
    }

    #[test]
    fn test_json_file_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cache");
        let cache = JsonFileCache::open(&dir).unwrap();

        let entry = CachedDocument::new(DocumentType::Bom, &sample());
        cache.put(entry.clone()).unwrap();
        assert!(dir.join("bom.json").exists());

        // 重新開啟同一目錄
        let reopened = JsonFileCache::open(&dir).unwrap();
        assert_eq!(reopened.get(DocumentType::Bom).unwrap(), Some(entry));
        assert!(reopened.get(DocumentType::WeekPlan).unwrap().is_none());

        reopened.remove(DocumentType::Bom).unwrap();
        assert!(reopened.get(DocumentType::Bom).unwrap().is_none());
    }

    #[rstest]
    #[case(DocumentType::Bom, "bom.json")]
    #[case(DocumentType::MaterialMaster, "material_master.json")]
    #[case(DocumentType::ProductionPlan, "production_plan.json")]
    #[case(DocumentType::SupplierDetails, "supplier_details.json")]
    #[case(DocumentType::WeekPlan, "week_plan.json")]
    fn test_json_file_names(#[case] document_type: DocumentType, #[case] file_name: &str) {
        let cache = JsonFileCache {
            dir: PathBuf::from("cache"),
        };
        assert_eq!(cache.path_for(document_type), Path::new("cache").join(file_name));
    }

    #[test]
    fn test_json_file_cache_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::open(dir.path()).unwrap();
        fs::write(dir.path().join("material_master.json"), "{ not json").unwrap();

        let err = cache.get(DocumentType::MaterialMaster).unwrap_err();
        assert!(matches!(err, MrpError::Cache(_)));
    }
}
