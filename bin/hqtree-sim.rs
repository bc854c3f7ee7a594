use clap::Parser;
use colored::*;
use hqtree::{Circle, HierarchicalQuadTree, HqtreeConfig, IndexError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scatter non-overlapping circles with a hierarchical quadtree", long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "hqtree.toml")]
    config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    generate_config: bool,

    /// Number of circles to try (overrides config file)
    #[arg(short, long)]
    objects: Option<usize>,

    /// Random seed (overrides config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (overrides config file)
    #[arg(long)]
    log_level: Option<String>,

    /// 将最终的树结构以JSON格式写入该文件
    #[arg(long)]
    dump_json: Option<String>,
}

/// 模拟结果
#[derive(Debug, Default)]
struct Outcome {
    placed: usize,
    overlapping: usize,
    rejected: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 生成默认配置文件
    if args.generate_config {
        let config = HqtreeConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = HqtreeConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(objects) = args.objects {
        config.simulation.objects = objects;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    config.validate()?;
    init_logging(&config.logging)?;

    info!("🚀 Starting hqtree scatter simulation...");
    info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    let mut tree = HierarchicalQuadTree::from_config(&config.tree)?;
    let started = Instant::now();
    let outcome = scatter(&mut tree, &config)?;
    let elapsed = started.elapsed();

    info!(
        "Simulation finished in {:.2?}: {} placed, {} overlapping, {} rejected",
        elapsed, outcome.placed, outcome.overlapping, outcome.rejected
    );
    print_report(&tree, &outcome);

    if let Some(path) = args.dump_json {
        std::fs::write(&path, tree.export_to_json()?)?;
        info!("💾 Tree structure written to {}", path);
    }

    Ok(())
}

/// 随机生成圆，仅在不与已有圆重叠时插入
fn scatter(tree: &mut HierarchicalQuadTree<Circle>, config: &HqtreeConfig) -> Result<Outcome> {
    let sim = &config.simulation;
    let world = *tree.boundary();
    let mut rng = StdRng::seed_from_u64(sim.seed);
    let mut outcome = Outcome::default();

    for _ in 0..sim.objects {
        let circle = Circle::new(
            rng.gen_range(world.x..world.right()),
            rng.gen_range(world.y..world.bottom()),
            rng.gen_range(sim.min_radius..sim.max_radius),
        )?;

        if tree.does_collide(&circle) {
            outcome.overlapping += 1;
            continue;
        }

        match tree.insert(circle) {
            Ok(()) => outcome.placed += 1,
            Err(err @ IndexError::DepthLimitExceeded { .. }) => {
                warn!("⚠️  {}", err);
                outcome.rejected += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(outcome)
}

fn print_report(tree: &HierarchicalQuadTree<Circle>, outcome: &Outcome) {
    println!();
    println!("{}", "=== Scatter Report ===".bold());
    println!("   Placed:      {}", outcome.placed.to_string().green());
    println!("   Overlapping: {}", outcome.overlapping.to_string().yellow());
    println!("   Rejected:    {}", outcome.rejected.to_string().red());
    println!("   Buckets:     {}", tree.bucket_count().to_string().cyan());
    println!();

    for (i, (interval, stats)) in tree.stats().iter().enumerate() {
        println!(
            "{} {:<32} items={} nodes={} leaves={} depth={} overflowed={}",
            format!("[{}]", i).blue(),
            interval.to_string(),
            stats.items,
            stats.nodes,
            stats.leaves,
            stats.depth,
            stats.overflowed_nodes
        );
    }
}

/// 初始化日志系统
fn init_logging(config: &hqtree::LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }

    Ok(())
}
