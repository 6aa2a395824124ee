//! # MRP Cache
//!
//! 文件來源、快取與載入（最後一次成功解析的工作表可供離線計算）

pub mod loader;
pub mod source;
pub mod store;

// Re-export 主要類型
pub use loader::{DocumentLoader, DocumentOrigin, LoadedDocument, LoadedInputs, UploadPreview};
pub use source::{DirectorySource, DocumentSource, MemorySource, SourceFile};
pub use store::{CachedDocument, DocumentCache, JsonFileCache, MemoryDocumentCache};
