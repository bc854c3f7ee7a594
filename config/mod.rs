use crate::error::{IndexError, Result};
use crate::quadtree::{OverflowPolicy, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// hqtree 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HqtreeConfig {
    /// 索引结构配置
    #[serde(default)]
    pub tree: TreeConfig,

    /// 模拟程序配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 层次四叉树配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// 世界边界左上角 X
    #[serde(default)]
    pub x: f64,

    /// 世界边界左上角 Y
    #[serde(default)]
    pub y: f64,

    #[serde(default = "default_extent")]
    pub width: f64,

    #[serde(default = "default_extent")]
    pub height: f64,

    /// 每个节点细分前可容纳的对象数
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// 尺寸桶上下界比例，必须大于 1
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// 最大细分深度
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// 最深节点溢出策略：accept, reject
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

/// 随机散布模拟配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 尝试放置的圆数量
    #[serde(default = "default_objects")]
    pub objects: usize,

    #[serde(default = "default_min_radius")]
    pub min_radius: f64,

    #[serde(default = "default_max_radius")]
    pub max_radius: f64,

    /// 随机种子
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_extent() -> f64 {
    1000.0
}

fn default_capacity() -> usize {
    8
}

fn default_scale() -> f64 {
    2.0
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_objects() -> usize {
    10_000
}

fn default_min_radius() -> f64 {
    0.5
}

fn default_max_radius() -> f64 {
    20.0
}

fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: default_extent(),
            height: default_extent(),
            capacity: default_capacity(),
            scale: default_scale(),
            max_depth: default_max_depth(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            objects: default_objects(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            seed: default_seed(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            output: default_log_output(),
            log_file: None,
        }
    }
}

impl Default for HqtreeConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl HqtreeConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（HQTREE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use hqtree::config::HqtreeConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = HqtreeConfig::from_file("hqtree.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("HQTREE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查配置的合法性，包括：
    /// - 世界边界
    /// - 容量、比例与深度
    /// - 模拟半径范围
    /// - 日志级别与输出
    pub fn validate(&self) -> Result<()> {
        let tree = &self.tree;
        let finite = tree.width.is_finite() && tree.height.is_finite();
        if !finite || tree.width <= 0.0 || tree.height <= 0.0 {
            return Err(IndexError::InvalidConfig(format!(
                "World size {}x{} must be positive",
                tree.width, tree.height
            )));
        }
        if tree.capacity == 0 {
            return Err(IndexError::InvalidConfig("Capacity must be at least 1".to_string()));
        }
        if !tree.scale.is_finite() || tree.scale <= 1.0 {
            return Err(IndexError::InvalidConfig(format!(
                "Scale {} must be greater than 1",
                tree.scale
            )));
        }
        if tree.max_depth == 0 {
            return Err(IndexError::InvalidConfig("Max depth must be at least 1".to_string()));
        }

        let sim = &self.simulation;
        let ordered = sim.min_radius >= 0.0 && sim.min_radius < sim.max_radius;
        if !ordered || !sim.max_radius.is_finite() {
            return Err(IndexError::InvalidConfig(format!(
                "Invalid radius range: [{}, {})",
                sim.min_radius, sim.max_radius
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(IndexError::InvalidConfig(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        if self.logging.output == "file" && self.logging.log_file.is_none() {
            return Err(IndexError::InvalidConfig(
                "Log output is 'file' but log_file path is not specified".to_string(),
            ));
        }

        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("📋 hqtree Configuration:");
        println!(
            "   World:       ({}, {}) {}x{}",
            self.tree.x, self.tree.y, self.tree.width, self.tree.height
        );
        println!("   Capacity:    {}", self.tree.capacity);
        println!("   Scale:       {}", self.tree.scale);
        println!("   Max Depth:   {}", self.tree.max_depth);
        println!("   Overflow:    {:?}", self.tree.overflow_policy);
        println!();
        println!("   Objects:     {}", self.simulation.objects);
        println!(
            "   Radius:      [{}, {})",
            self.simulation.min_radius, self.simulation.max_radius
        );
        println!("   Seed:        {}", self.simulation.seed);
        println!();
        println!("   Log Level:   {}", self.logging.level);
        println!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            println!("   Log File:    {}", log_file.display());
        }
        println!();
    }
}
