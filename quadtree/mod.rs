pub mod algorithms;
pub mod node;
#[allow(clippy::module_inception)]
pub mod quadtree;

// 重新导出主要类型
pub use algorithms::debug::{NodeVisualization, TreeVisualization};
pub use node::{Node, NodeId, Quadrant};
pub use quadtree::{OverflowPolicy, QuadTree, TreeStats, DEFAULT_MAX_DEPTH};
