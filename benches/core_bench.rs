use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use hexrail_engine::{HexCoord, HexGrid, RailMap, TrackTool};
use std::hint::black_box;

/// Baut einen synthetischen Gleisplan mit Linien in jeder n-ten Zelle.
fn build_synthetic_map(grid: &HexGrid, cell_stride: i32) -> RailMap {
    let mut map = RailMap::new();
    for r in (0..hexrail_engine::core::GRID_ROWS).step_by(cell_stride as usize) {
        for c in (0..hexrail_engine::core::GRID_COLS).step_by(cell_stride as usize) {
            let coord = HexCoord::new(c - r.div_euclid(2), r);
            let cell = *grid.cell(coord).expect("Zelle erwartet");
            for index in 0..3 {
                map.add(&cell, TrackTool::Line.build(&cell, index))
                    .expect("Commit erwartet");
            }
        }
    }
    map
}

fn build_query_points(count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let x = ((i * 37) % 400) as f32 + 0.37;
            let y = ((i * 17) % 300) as f32 + 0.63;
            Vec2::new(x, y)
        })
        .collect()
}

fn bench_add_throughput(c: &mut Criterion) {
    let grid = HexGrid::new();

    c.bench_function("railmap_add_full_grid", |b| {
        b.iter(|| {
            let map = build_synthetic_map(black_box(&grid), 2);
            black_box(map.len())
        })
    });
}

fn bench_spatial_queries(c: &mut Criterion) {
    let grid = HexGrid::new();
    let mut group = c.benchmark_group("spatial_queries");

    for &stride in &[2i32, 1i32] {
        let map = build_synthetic_map(&grid, stride);
        let query_points = build_query_points(256);

        group.bench_with_input(
            BenchmarkId::new("find_by_xy_batch", map.len()),
            &map,
            |b, map| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for point in &query_points {
                        hits += map.find_by_xy(black_box(*point)).len();
                    }
                    black_box(hits)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("nearest_connection_batch", map.len()),
            &map,
            |b, map| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for point in &query_points {
                        if map.nearest_connection(black_box(*point)).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_add_throughput, bench_spatial_queries);
criterion_main!(benches);
