//! 层次四叉树性能基准测试
//!
//! 对比按尺寸分桶的碰撞检测与逐对暴力检测
//! 当前测试规模：20,000 个圆

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hqtree::{Circle, HierarchicalQuadTree, Rectangle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BENCHMARK_SIZE: usize = 20_000;
const WORLD_SIZE: f64 = 1000.0;

/// 性能测试配置
struct BenchConfig {
    size: usize,
    capacity: usize,
    scale: f64,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: BENCHMARK_SIZE,
            capacity: 8,
            scale: 2.0,
            seed: 42,
        }
    }
}

fn world() -> Rectangle {
    Rectangle::new(0.0, 0.0, WORLD_SIZE, WORLD_SIZE).unwrap()
}

/// 生成测试数据：大部分为小圆，混入少量大圆
fn generate_test_data(count: usize, seed: u64) -> Vec<Circle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let radius = if i % 100 == 0 {
                rng.gen_range(20.0..60.0)
            } else {
                rng.gen_range(0.5..3.0)
            };
            Circle::new(
                rng.gen_range(0.0..WORLD_SIZE),
                rng.gen_range(0.0..WORLD_SIZE),
                radius,
            )
            .unwrap()
        })
        .collect()
}

fn build_tree(config: &BenchConfig, data: &[Circle]) -> HierarchicalQuadTree<Circle> {
    let mut tree = HierarchicalQuadTree::with_scale(world(), config.capacity, config.scale).unwrap();
    for circle in data {
        tree.insert(*circle).unwrap();
    }
    tree
}

/// 插入性能测试
fn bench_insert(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);

    c.bench_function("insert", |b| {
        b.iter_batched(
            || test_data.clone(),
            |data| build_tree(&config, &data),
            BatchSize::SmallInput,
        );
    });
}

/// 候选查询性能测试
fn bench_query(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);
    let tree = build_tree(&config, &test_data);
    let probes = generate_test_data(1_000, config.seed + 1000);

    c.bench_function("query_1000", |b| {
        b.iter(|| {
            let mut total_results = 0;
            for probe in &probes {
                total_results += tree.query(probe).len();
            }
            total_results
        });
    });
}

/// 碰撞检测性能测试，对比暴力检测
fn bench_collisions(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);
    let tree = build_tree(&config, &test_data);
    let probes = generate_test_data(1_000, config.seed + 2000);

    c.bench_function("does_collide_1000", |b| {
        b.iter(|| probes.iter().filter(|probe| tree.does_collide(probe)).count());
    });

    c.bench_function("find_collisions_1000", |b| {
        b.iter(|| {
            probes
                .iter()
                .map(|probe| tree.find_collisions(probe).len())
                .sum::<usize>()
        });
    });

    c.bench_function("brute_force_1000", |b| {
        b.iter(|| {
            probes
                .iter()
                .map(|probe| test_data.iter().filter(|c| c.collides_with(probe)).count())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_insert, bench_query, bench_collisions);
criterion_main!(benches);
