//! 文件載入：來源 → 解析 → 選擇工作表 → 寫入快取
//!
//! 來源沒有檔案或解析失敗時改用快取；兩者皆無則為空文件，由計算器判斷是否缺件。

use mrp_calc::{MrpCalculator, MrpInputs, MrpResult};
use mrp_core::{DocumentType, MrpSettings, PeriodWindow, Result, TabularDocument};
use mrp_sheet::{read_workbook, ResolvedSchema, SchemaResolver, SheetScore, SheetSelector};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::source::{DocumentSource, SourceFile};
use crate::store::{CachedDocument, DocumentCache};

/// 文件取得途徑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentOrigin {
    /// 最新上傳檔案
    Source,
    /// 先前的快取
    Cache,
    /// 無可用資料
    Missing,
}

/// 載入結果
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document_type: DocumentType,
    pub document: TabularDocument,
    pub origin: DocumentOrigin,
}

/// 所有文件的載入結果
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub inputs: MrpInputs,
    pub origins: Vec<(DocumentType, DocumentOrigin)>,
}

impl LoadedInputs {
    /// 文件類型的取得途徑
    pub fn origin(&self, document_type: DocumentType) -> DocumentOrigin {
        self.origins
            .iter()
            .find(|(t, _)| *t == document_type)
            .map_or(DocumentOrigin::Missing, |(_, origin)| *origin)
    }
}

/// 上傳預覽（計算前檢查工作表與欄位）
#[derive(Debug, Clone, Serialize)]
pub struct UploadPreview {
    pub scores: Vec<SheetScore>,
    pub schema: ResolvedSchema,
    pub missing_required: Vec<mrp_core::ColumnRole>,
}

/// 文件載入器
pub struct DocumentLoader {
    source: Arc<dyn DocumentSource>,
    cache: Arc<dyn DocumentCache>,
    settings: MrpSettings,
}

impl DocumentLoader {
    /// 創建載入器
    pub fn new(source: Arc<dyn DocumentSource>, cache: Arc<dyn DocumentCache>) -> Self {
        Self {
            source,
            cache,
            settings: MrpSettings::default(),
        }
    }

    /// 建構器模式：設置引擎設定
    pub fn with_settings(mut self, settings: MrpSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 載入單一文件類型（不回傳錯誤，失敗時降級）
    pub fn load(&self, document_type: DocumentType) -> LoadedDocument {
        match self.load_from_source(document_type) {
            Ok(Some(document)) => {
                let entry = CachedDocument::new(document_type, &document);
                if let Err(err) = self.cache.put(entry) {
                    tracing::warn!("{} 快取寫入失敗: {}", document_type, err);
                }
                return LoadedDocument {
                    document_type,
                    document,
                    origin: DocumentOrigin::Source,
                };
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("{} 來源讀取失敗，改用快取: {}", document_type, err),
        }

        match self.cache.get(document_type) {
            Ok(Some(entry)) => {
                tracing::debug!("{} 使用 {} 的快取", document_type, entry.stored_at);
                LoadedDocument {
                    document_type,
                    document: entry.to_document(),
                    origin: DocumentOrigin::Cache,
                }
            }
            Ok(None) => LoadedDocument {
                document_type,
                document: TabularDocument::empty(""),
                origin: DocumentOrigin::Missing,
            },
            Err(err) => {
                tracing::warn!("{} 快取讀取失敗: {}", document_type, err);
                LoadedDocument {
                    document_type,
                    document: TabularDocument::empty(""),
                    origin: DocumentOrigin::Missing,
                }
            }
        }
    }

    /// 來源最新檔案的選定工作表（選不到資料視為無檔案）
    fn load_from_source(&self, document_type: DocumentType) -> Result<Option<TabularDocument>> {
        let Some(SourceFile { file_name, bytes }) = self.source.latest(document_type)? else {
            return Ok(None);
        };

        let workbook = read_workbook(&file_name, &bytes)?;
        let document = SheetSelector::new(self.settings.scan).select(&workbook, document_type);
        if document.is_empty() {
            tracing::warn!("{} 檔案 '{}' 沒有可用的工作表", document_type, file_name);
            return Ok(None);
        }

        tracing::info!(
            "{} 載入 '{}' 工作表 '{}'",
            document_type,
            file_name,
            document.sheet_name
        );
        Ok(Some(document))
    }

    /// 並行載入所有文件類型
    pub fn load_inputs(&self) -> LoadedInputs {
        let loaded: Vec<LoadedDocument> = DocumentType::ALL
            .par_iter()
            .map(|document_type| self.load(*document_type))
            .collect();

        let origins = loaded
            .iter()
            .map(|doc| (doc.document_type, doc.origin))
            .collect();

        let mut inputs = MrpInputs::default();
        for doc in loaded {
            match doc.document_type {
                DocumentType::Bom => inputs.bom = doc.document,
                DocumentType::MaterialMaster => inputs.material_master = doc.document,
                DocumentType::ProductionPlan => inputs.production_plan = doc.document,
                DocumentType::SupplierDetails => inputs.supplier_details = doc.document,
                DocumentType::WeekPlan => {
                    if doc.origin != DocumentOrigin::Missing {
                        inputs.week_plan = Some(doc.document);
                    }
                }
            }
        }

        LoadedInputs { inputs, origins }
    }

    /// 載入所有文件並計算 MRP
    pub fn compute(&self, window: &PeriodWindow) -> Result<MrpResult> {
        let loaded = self.load_inputs();
        MrpCalculator::new(self.settings).calculate(&loaded.inputs, window)
    }

    /// 上傳預覽：工作表分數與選定工作表的欄位對應
    pub fn preview(
        &self,
        file_name: &str,
        bytes: &[u8],
        document_type: DocumentType,
    ) -> Result<UploadPreview> {
        let workbook = read_workbook(file_name, bytes)?;
        let selector = SheetSelector::new(self.settings.scan);
        let document = selector.select(&workbook, document_type);
        let schema = SchemaResolver::new(self.settings.scan).resolve(&document, document_type);

        Ok(UploadPreview {
            scores: selector.score_sheets(&workbook, document_type),
            missing_required: schema.missing_required(),
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::store::MemoryDocumentCache;
    use mrp_core::{row, MrpError};

    const BOM_CSV: &str = "Derived Material,Child Part,Quantity Per Kit\nFG-1,RM-1,2\n";

    struct FailingSource;

    impl DocumentSource for FailingSource {
        fn latest(&self, _: DocumentType) -> Result<Option<SourceFile>> {
            Err(MrpError::WorkbookRead("offline".to_string()))
        }
    }

    #[test]
    fn test_load_writes_through_cache() {
        let cache = Arc::new(MemoryDocumentCache::new());
        let source = MemorySource::new().with_file(DocumentType::Bom, "bom.csv", BOM_CSV);
        let loader = DocumentLoader::new(Arc::new(source), cache.clone());

        let loaded = loader.load(DocumentType::Bom);
        assert_eq!(loaded.origin, DocumentOrigin::Source);
        assert_eq!(loaded.document.sheet_name, "bom");
        assert!(cache.get(DocumentType::Bom).unwrap().is_some());

        let missing = loader.load(DocumentType::WeekPlan);
        assert_eq!(missing.origin, DocumentOrigin::Missing);
        assert!(missing.document.is_empty());
    }

    #[test]
    fn test_falls_back_to_cache() {
        let cache = Arc::new(MemoryDocumentCache::new());
        let cached = TabularDocument::new("BOM", vec![row!["Derived Material", "Child Part"]]);
        cache
            .put(CachedDocument::new(DocumentType::Bom, &cached))
            .unwrap();

        let offline = DocumentLoader::new(Arc::new(FailingSource), cache.clone());
        let loaded = offline.load(DocumentType::Bom);
        assert_eq!(loaded.origin, DocumentOrigin::Cache);
        assert_eq!(loaded.document, cached);

        let unparsable =
            MemorySource::new().with_file(DocumentType::Bom, "bom.pdf", b"%PDF".to_vec());
        let loader = DocumentLoader::new(Arc::new(unparsable), cache);
        assert_eq!(loader.load(DocumentType::Bom).origin, DocumentOrigin::Cache);
    }

    #[test]
    fn test_load_inputs_reports_origins() {
        let source = MemorySource::new().with_file(DocumentType::Bom, "bom.csv", BOM_CSV);
        let loader = DocumentLoader::new(Arc::new(source), Arc::new(MemoryDocumentCache::new()));

        let loaded = loader.load_inputs();
        assert_eq!(loaded.origin(DocumentType::Bom), DocumentOrigin::Source);
        assert_eq!(loaded.origin(DocumentType::ProductionPlan), DocumentOrigin::Missing);
        assert!(loaded.inputs.week_plan.is_none());
        assert_eq!(loaded.origins.len(), DocumentType::ALL.len());
    }

    #[test]
    fn test_compute_reports_missing_source() {
        let source = MemorySource::new().with_file(DocumentType::Bom, "bom.csv", BOM_CSV);
        let loader = DocumentLoader::new(Arc::new(source), Arc::new(MemoryDocumentCache::new()));

        let err = loader.compute(&PeriodWindow::full_year(2024)).unwrap_err();
        assert!(matches!(
            err,
            MrpError::MissingSource {
                document: DocumentType::ProductionPlan
            }
        ));
    }

    #[test]
    fn test_preview() {
        let loader = DocumentLoader::new(
            Arc::new(MemorySource::new()),
            Arc::new(MemoryDocumentCache::new()),
        );
        let preview = loader
            .preview("bom.csv", BOM_CSV.as_bytes(), DocumentType::Bom)
            .unwrap();

        assert_eq!(preview.scores.len(), 1);
        assert!(preview.missing_required.is_empty());
        assert_eq!(preview.schema.header_row, 0);
    }
}
