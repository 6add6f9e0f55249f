//! Benchmarks for reshaping, planning and rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pandex::chart::{ChartDescriptor, ChartKind};
use pandex::dashboard::Dashboard;
use pandex::layout::{GridLayoutPlanner, LayoutRow, Theme};
use pandex::table::{reshape, Table, Value};

fn create_test_table(rows: usize, cols: usize) -> Table {
    Table::from_columns((0..cols).map(|c| {
        let values = (0..rows).map(|r| Value::Float((r * cols + c) as f64 * 0.137)).collect();
        (format!("series_{}", c), values)
    }))
    .unwrap()
}

fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    for rows in [100, 1000, 10000] {
        let table = create_test_table(rows, 4);

        group.throughput(Throughput::Elements((rows * 4) as u64));

        group.bench_function(format!("reshape_{}x4", rows), |b| {
            b.iter(|| reshape(black_box(&table)).unwrap())
        });

        group.bench_function(format!("round_{}x4", rows), |b| {
            b.iter(|| black_box(&table).rounded(2))
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let table = create_test_table(10, 3);

    for row_count in [10, 100] {
        let rows: Vec<LayoutRow> = (0..row_count)
            .map(|r| {
                let width = r % 4 + 1;
                LayoutRow::new(
                    (0..width).map(|i| ChartDescriptor::simple(ChartKind::Line, format!("c{}", i), table.clone())),
                )
            })
            .collect();

        group.bench_function(format!("plan_{}_rows", row_count), |b| {
            let planner = GridLayoutPlanner::new(Theme::Dark);
            b.iter(|| planner.plan(black_box(&rows)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let dashboard = Dashboard::builder("Bench")
        .row(vec![
            ChartDescriptor::simple(ChartKind::Line, "Line", create_test_table(500, 3)),
            ChartDescriptor::simple(ChartKind::Bar, "Bar", create_test_table(50, 3)),
        ])
        .row(vec![ChartDescriptor::table("Table", create_test_table(200, 5))])
        .build();

    group.bench_function("render_page", |b| {
        b.iter(|| dashboard.render_page().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_reshape, bench_plan, bench_render);
criterion_main!(benches);
