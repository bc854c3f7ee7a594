//! # hqtree
//!
//! 面向变尺寸圆形对象的内存二维空间索引，支持插入、矩形范围查询和精确碰撞检测。
//!
//! 核心是按尺寸分层的四叉树森林 [`HierarchicalQuadTree`]：每个尺寸桶持有一棵
//! 容量受限的 [`QuadTree`]，查询时按各桶的尺寸上限扩大查询窗口，再做精确的
//! 圆-圆检测。
//!
//! ## 使用示例
//!
//! ```rust
//! use hqtree::{Circle, HierarchicalQuadTree, Rectangle};
//!
//! let world = Rectangle::new(0.0, 0.0, 100.0, 100.0)?;
//! let mut tree = HierarchicalQuadTree::new(world, 4)?;
//!
//! let a = Circle::new(10.0, 10.0, 5.0)?;
//! tree.insert(a)?;
//! tree.insert(Circle::new(80.0, 80.0, 3.0)?)?;
//!
//! // 插入前检测
//! assert!(tree.does_collide(&Circle::new(12.0, 12.0, 5.0)?));
//! assert!(!tree.does_collide(&Circle::new(50.0, 50.0, 5.0)?));
//! # Ok::<(), hqtree::IndexError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod quadtree;

// 重新导出主要的公共接口
pub use self::config::{HqtreeConfig, LoggingConfig, SimulationConfig, TreeConfig};
pub use error::{IndexError, Result};
pub use geometry::{Circle, Collider, Point, Rectangle, Shape, Spatial};
pub use hierarchy::{Bucket, HierarchicalQuadTree, QueryOptions, SizeInterval, DEFAULT_SCALE};
pub use quadtree::{OverflowPolicy, QuadTree, TreeStats, DEFAULT_MAX_DEPTH};
