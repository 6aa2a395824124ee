//! 文件來源：取得各文件類型最近一次上傳的檔案

use mrp_core::{DocumentType, MrpError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// 上傳的原始檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// 檔名（決定解析格式）
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// 文件來源介面
pub trait DocumentSource: Send + Sync {
    /// 最近一次上傳的檔案；沒有上傳過為 None
    fn latest(&self, document_type: DocumentType) -> Result<Option<SourceFile>>;
}

/// 記憶體來源
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<DocumentType, SourceFile>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入檔案（同類型覆蓋）
    pub fn with_file(
        mut self,
        document_type: DocumentType,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.files.insert(document_type, SourceFile::new(file_name, bytes));
        self
    }
}

impl DocumentSource for MemorySource {
    fn latest(&self, document_type: DocumentType) -> Result<Option<SourceFile>> {
        Ok(self.files.get(&document_type).cloned())
    }
}

/// 上傳目錄來源
///
/// 目錄結構為 `<root>/<文件類型鍵值>/<檔案>`，取修改時間最新的檔案。
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for DirectorySource {
    fn latest(&self, document_type: DocumentType) -> Result<Option<SourceFile>> {
        let dir = self.root.join(document_type.key());
        if !dir.is_dir() {
            return Ok(None);
        }

        let read_error =
            |e: std::io::Error| MrpError::WorkbookRead(format!("{}: {}", dir.display(), e));
        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in fs::read_dir(&dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let metadata = entry.metadata().map_err(read_error)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.as_ref().map_or(true, |(time, _)| modified > *time) {
                newest = Some((modified, entry.path()));
            }
        }

        let Some((_, path)) = newest else {
            return Ok(None);
        };
        let bytes = fs::read(&path).map_err(read_error)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Some(SourceFile { file_name, bytes }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new()
            .with_file(DocumentType::Bom, "bom.csv", b"a,b".to_vec())
            .with_file(DocumentType::Bom, "bom_v2.csv", b"c,d".to_vec());

        let latest = source.latest(DocumentType::Bom).unwrap().unwrap();
        assert_eq!(latest.file_name, "bom_v2.csv");
        assert!(source.latest(DocumentType::WeekPlan).unwrap().is_none());
    }

    #[test]
    fn test_directory_source() {
        let root = tempfile::tempdir().unwrap();
        let bom_dir = root.path().join("bom");
        fs::create_dir_all(&bom_dir).unwrap();
        fs::write(bom_dir.join("bom.csv"), "Derived Material,Child Part").unwrap();

        let source = DirectorySource::new(root.path());
        let latest = source.latest(DocumentType::Bom).unwrap().unwrap();
        assert_eq!(latest.file_name, "bom.csv");
        assert_eq!(latest.bytes, b"Derived Material,Child Part".to_vec());
        assert!(source.latest(DocumentType::SupplierDetails).unwrap().is_none());
    }
}
