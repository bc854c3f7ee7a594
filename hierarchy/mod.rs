pub mod collision;
pub mod hierarchical;

// 重新导出主要类型
pub use collision::QueryOptions;
pub use hierarchical::{
    Bucket, BucketVisualization, HierarchicalQuadTree, HierarchyVisualization, SizeInterval,
    DEFAULT_SCALE,
};
