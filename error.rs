use thiserror::Error;

/// 空间索引错误类型
#[derive(Debug, Error)]
pub enum IndexError {
    /// 对象位置不在树的根边界内
    #[error("Position ({x}, {y}) lies outside the tree boundary")]
    OutOfBounds { x: f64, y: f64 },

    /// 到达最大细分深度且溢出策略为拒绝
    #[error("Depth limit {depth} reached while inserting at ({x}, {y})")]
    DepthLimitExceeded { depth: usize, x: f64, y: f64 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// 对象尺寸非有限值或为负数
    #[error("Invalid object size: {0}")]
    InvalidSize(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
