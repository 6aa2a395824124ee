//! MRP 計算效能測試
//!
//! 合成資料：N 個成品 × 每成品 8 個子件，生產計劃 26 週

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrp_calc::{MrpCalculator, MrpInputs};
use mrp_core::{CellValue, Grid, MrpSettings, PeriodWindow, TabularDocument};

const WEEKS: u32 = 26;
const CHILDREN_PER_PARENT: usize = 8;

fn text(value: impl Into<String>) -> CellValue {
    CellValue::Text(value.into())
}

fn number(value: f64) -> CellValue {
    CellValue::Number(value)
}

/// 建立合成輸入
fn create_inputs(parent_count: usize) -> MrpInputs {
    let child_count = parent_count * 2;

    let mut bom: Grid = vec![vec![
        text("Derived Material"),
        text("Child Part"),
        text("Quantity Per Kit"),
        text("UOM"),
    ]];
    for p in 0..parent_count {
        for c in 0..CHILDREN_PER_PARENT {
            bom.push(vec![
                text(format!("FG-{p}")),
                text(format!("RM-{}", (p * 3 + c) % child_count)),
                number((c % 4 + 1) as f64),
                text("PCS"),
            ]);
        }
    }

    let mut master: Grid = vec![vec![
        text("Material"),
        text("MPQ"),
        text("MOQ"),
        text("Reorder Point"),
        text("On Hand"),
        text("Pending PO"),
    ]];
    let mut supplier: Grid = vec![vec![
        text("Material"),
        text("Vendor Name"),
        text("Vendor Lead Time"),
        text("Transport Days"),
    ]];
    for c in 0..child_count {
        master.push(vec![
            text(format!("RM-{c}")),
            number((c % 3 * 25) as f64),
            number((c % 5 * 50) as f64),
            number(0.0),
            number((c * 7 % 400) as f64),
            number((c * 3 % 100) as f64),
        ]);
        supplier.push(vec![
            text(format!("RM-{c}")),
            text(format!("VENDOR-{}", c % 12)),
            number((c % 21) as f64),
            number((c % 4) as f64),
        ]);
    }

    let mut header = vec![text("Derived Material")];
    header.extend((1..=WEEKS).map(|w| text(format!("{w:02}.2024"))));
    let mut plan: Grid = vec![header];
    for p in 0..parent_count {
        let mut row = vec![text(format!("FG-{p}"))];
        row.extend((1..=WEEKS).map(|w| number(((p as u32 + w) % 9 * 10) as f64)));
        plan.push(row);
    }

    MrpInputs {
        bom: TabularDocument::new("BOM", bom),
        material_master: TabularDocument::new("Material Master", master),
        production_plan: TabularDocument::new("Production Plan", plan),
        supplier_details: TabularDocument::new("Supplier", supplier),
        week_plan: None,
    }
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mrp_calculate");
    let window = PeriodWindow::new(2024, 1, WEEKS);

    for parent_count in [50, 250, 1000] {
        let inputs = create_inputs(parent_count);

        for parallel in [false, true] {
            let calculator = MrpCalculator::new(MrpSettings::default().with_parallel(parallel));
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(label, parent_count),
                &inputs,
                |b, inputs| b.iter(|| calculator.calculate(black_box(inputs), &window)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_calculate);
criterion_main!(benches);
