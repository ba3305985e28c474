//! Benchmark pattern table builds, traversal queries and smoothing.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tantu::{
    CellTraversal, DEFAULT_PRECISION, GridCoord, PathSmoother, PatternTable, RayMarcher,
    WalkabilityGrid, WalkableGrid, Waypoint, WorldPoint,
};

/// Grid with staggered vertical walls, each with a single gap.
fn create_maze(size: usize) -> WalkabilityGrid {
    let mut grid = WalkabilityGrid::new(size, size, 0.05);
    let last = size as i32 - 1;

    for (i, x) in (4..last).step_by(6).enumerate() {
        let gap = if i % 2 == 0 { last - 2 } else { 2 };
        for y in 0..=last {
            if (y - gap).abs() > 1 {
                grid.set_blocked(GridCoord::new(x, y));
            }
        }
    }
    grid
}

/// Staircase path along the free columns and through each wall gap.
fn create_coarse_path(grid: &WalkabilityGrid) -> Vec<Waypoint> {
    let size = grid.width() as i32;
    let mut cells = Vec::new();
    let mut y = 1;

    for x in 1..size - 1 {
        let wall = (4..size - 1).step_by(6).position(|w| w == x + 1);
        if let Some(i) = wall {
            let gap = if i % 2 == 0 { size - 3 } else { 2 };
            while y != gap {
                cells.push(GridCoord::new(x, y));
                y += (gap - y).signum();
            }
        }
        cells.push(GridCoord::new(x, y));
    }

    cells
        .into_iter()
        .map(|c| Waypoint::from_plane(grid.grid_to_world(c), 0.0))
        .collect()
}

fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_table_build");
    group.sample_size(10);

    for width in [32usize, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| black_box(PatternTable::build(black_box(width), DEFAULT_PRECISION)))
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let grid = create_maze(128);
    let frame = grid.frame();
    let table = PatternTable::for_grid(&grid, DEFAULT_PRECISION).unwrap();

    for length in [4.0f32, 16.0, 64.0].iter() {
        let start = WorldPoint::new(0.3, 0.2);
        let end = start + WorldPoint::new(length * 0.05, length * 0.03);

        group.bench_with_input(BenchmarkId::new("ray_march", length), length, |b, _| {
            b.iter(|| black_box(RayMarcher.traverse(black_box(start), black_box(end), &frame)))
        });
        group.bench_with_input(BenchmarkId::new("pattern_table", length), length, |b, _| {
            b.iter(|| black_box(table.traverse(black_box(start), black_box(end), &frame)))
        });
    }

    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for size in [64, 128].iter() {
        let grid = create_maze(*size);
        let path = create_coarse_path(&grid);
        let table = PatternTable::for_grid(&grid, DEFAULT_PRECISION).unwrap();

        group.bench_with_input(BenchmarkId::new("ray_march", size), size, |b, _| {
            let smoother = PathSmoother::with_defaults(&grid, &RayMarcher);
            b.iter(|| black_box(smoother.smooth(black_box(&path))))
        });
        group.bench_with_input(BenchmarkId::new("pattern_table", size), size, |b, _| {
            let smoother = PathSmoother::with_defaults(&grid, &table);
            b.iter(|| black_box(smoother.smooth(black_box(&path))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table_build, bench_traversal, bench_smoothing);
criterion_main!(benches);
