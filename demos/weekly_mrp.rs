//! 週別 MRP 計算示例
//!
//! 不帶參數時使用內建的範例活頁簿；帶上傳目錄時（`<dir>/<文件類型>/<檔案>`）
//! 從目錄讀取，並把解析結果快取到 `<dir>/.cache`。
//!
//! ```text
//! RUST_LOG=debug cargo run --example weekly_mrp -- ./uploads 2024 5 12
//! ```

use anyhow::Context;
use sheet_mrp::{
    DirectorySource, DocumentLoader, DocumentSource, DocumentType, JsonFileCache,
    MemoryDocumentCache, MemorySource, MrpSettings, PeriodWindow, WarningSeverity,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== 週別 MRP 計算示例 ===\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let window = match args.as_slice() {
        [_, year, start, end, ..] => PeriodWindow::new(
            year.parse().context("年份格式錯誤")?,
            start.parse().context("起始週格式錯誤")?,
            end.parse().context("結束週格式錯誤")?,
        ),
        _ => PeriodWindow::new(2024, 5, 8),
    };

    let loader = match args.first() {
        Some(dir) => {
            let root = PathBuf::from(dir);
            let cache = JsonFileCache::open(root.join(".cache"))
                .with_context(|| format!("無法開啟快取目錄 {}", root.display()))?;
            DocumentLoader::new(Arc::new(DirectorySource::new(root)), Arc::new(cache))
        }
        None => DocumentLoader::new(sample_source(), Arc::new(MemoryDocumentCache::new())),
    }
    .with_settings(MrpSettings::default());

    let loaded = loader.load_inputs();
    println!("文件來源:");
    for (document_type, origin) in &loaded.origins {
        println!("  - {}: {:?}", document_type, origin);
    }

    let result = loader.compute(&window).context("MRP 計算失敗")?;
    let plan = &result.plan;

    println!(
        "\n計劃視窗: {:?}（生產計劃共有 {} 個期別）",
        plan.selected_periods.iter().map(|p| p.key()).collect::<Vec<_>>(),
        plan.all_periods.len()
    );

    for row in &plan.rows {
        println!(
            "\n{} {} [{}] 供應商: {} 交期: {} 天 可抵用: {} 需求合計: {}",
            row.material,
            row.description,
            row.uom,
            row.vendor_name,
            row.lead_time_days,
            row.excess_qty,
            row.total_demand
        );
        for week in row.weekly.iter().filter(|w| w.needs_order()) {
            println!(
                "    {} 需求 {} → 訂購 {} ({:?}) 下單日 {}",
                week.period, week.demand, week.required_qty, week.rule, week.po_date
            );
        }
    }

    let warnings: Vec<_> = result.warnings_of(WarningSeverity::Warning).collect();
    if !warnings.is_empty() {
        println!("\n警告:");
        for warning in warnings {
            println!("  - {}: {}", warning.material, warning.message);
        }
    }

    if let Some(ms) = result.calculation_time_ms {
        println!("\n計算耗時: {} ms", ms);
    }

    Ok(())
}

/// 內建範例：兩款自行車的 CSV 匯出檔
fn sample_source() -> Arc<dyn DocumentSource> {
    let source = MemorySource::new()
        .with_file(
            DocumentType::Bom,
            "bom.csv",
            csv(&[
                &["Derived Material", "Child Part", "Quantity Per Kit", "UOM", "Child Description"],
                &["BIKE-001", "FRAME-01", "1", "PCS", "Aluminium frame"],
                &["BIKE-001", "WHEEL-26", "2", "PCS", "26 inch wheel"],
                &["BIKE-002", "WHEEL-26", "2", "PCS", "26 inch wheel"],
                &["BIKE-002", "BOLT-M6", "12", "PCS", "M6 bolt"],
            ]),
        )
        .with_file(
            DocumentType::MaterialMaster,
            "material_master.csv",
            csv(&[
                &["Material", "Description", "MPQ", "MOQ", "Reorder Point", "On Hand", "Pending PO"],
                &["FRAME-01", "", "0", "20", "0", "15", "5"],
                &["WHEEL-26", "", "10", "0", "0", "40", "0"],
                &["BOLT-M6", "", "500", "0", "0", "100", "0"],
            ]),
        )
        .with_file(
            DocumentType::ProductionPlan,
            "production_plan.csv",
            csv(&[
                &["Derived Material", "05.2024", "06.2024", "07.2024", "08.2024"],
                &["BIKE-001", "10", "12", "0", "15"],
                &["BIKE-002", "5", "0", "8", "8"],
            ]),
        )
        .with_file(
            DocumentType::SupplierDetails,
            "suppliers.csv",
            csv(&[
                &["Material", "Vendor Name", "Vendor Lead Time", "Transport Days"],
                &["FRAME-01", "ALU WORKS", "21", "7"],
                &["WHEEL-26", "ROUND CO", "10", "3"],
                &["WHEEL-26", "SPOKE LTD", "14", "0"],
                &["BOLT-M6", "FASTEN", "3", "1"],
            ]),
        )
        .with_file(
            DocumentType::WeekPlan,
            "week_plan.csv",
            csv(&[
                &["Week", "Start Date", "End Date"],
                &["5", "2024-01-29", "2024-02-04"],
                &["6", "2024-02-05", "2024-02-11"],
                &["7", "2024-02-12", "2024-02-18"],
                &["8", "2024-02-19", "2024-02-25"],
            ]),
        );

    Arc::new(source)
}

fn csv(rows: &[&[&str]]) -> String {
    rows.iter()
        .map(|cells| cells.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}
