use crate::config::TreeConfig;
use crate::error::{IndexError, Result};
use crate::geometry::{Point, Rectangle, Spatial};
use crate::quadtree::{OverflowPolicy, QuadTree, TreeStats, TreeVisualization, DEFAULT_MAX_DEPTH};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 默认的尺寸桶上下界比例
pub const DEFAULT_SCALE: f64 = 2.0;

/// 尺寸区间 `(small, large]`
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "({}, {}]", small, large)]
pub struct SizeInterval {
    pub large: f64,
    pub small: f64,
}

impl SizeInterval {
    /// 以尺寸 `size` 为中心构造区间，使 `large / small == scale`
    pub fn around(size: f64, scale: f64) -> Self {
        let delta = size * (scale - 1.0) / (scale + 1.0);
        SizeInterval {
            large: size + delta,
            small: size - delta,
        }
    }

    /// 左开右闭：`small < size <= large`
    pub fn covers(&self, size: f64) -> bool {
        self.small < size && size <= self.large
    }

    pub fn ratio(&self) -> f64 {
        self.large / self.small
    }
}

/// 尺寸桶：一个尺寸区间及其专属四叉树
#[derive(Debug, Clone)]
pub struct Bucket<T> {
    pub interval: SizeInterval,
    pub tree: QuadTree<T>,
}

/// 用于JSON序列化的尺寸桶
#[derive(Debug, Serialize)]
pub struct BucketVisualization<'a, T> {
    pub interval: SizeInterval,
    pub tree: TreeVisualization<'a, T>,
}

/// 用于JSON序列化的层次结构
#[derive(Debug, Serialize)]
pub struct HierarchyVisualization<'a, T> {
    pub boundary: Rectangle,
    pub capacity: usize,
    pub scale: f64,
    pub buckets: Vec<BucketVisualization<'a, T>>,
}

/// 按尺寸分层的四叉树森林
///
/// 每个尺寸桶持有一棵覆盖相同边界的四叉树，使各棵树的单元大小与其中对象的
/// 尺寸相称。桶按首次出现的顺序创建，之后不会被重排、合并或删除。
#[derive(Debug, Clone)]
pub struct HierarchicalQuadTree<T> {
    boundary: Rectangle,
    capacity: usize,
    scale: f64,
    max_depth: usize,
    policy: OverflowPolicy,
    buckets: Vec<Bucket<T>>,
}

impl<T> HierarchicalQuadTree<T> {
    /// 使用默认比例 2.0 创建
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self> {
        Self::with_scale(boundary, capacity, DEFAULT_SCALE)
    }

    pub fn with_scale(boundary: Rectangle, capacity: usize, scale: f64) -> Result<Self> {
        Self::with_options(boundary, capacity, scale, DEFAULT_MAX_DEPTH, OverflowPolicy::default())
    }

    /// 使用完整参数创建，参数非法时返回 `InvalidConfig`
    pub fn with_options(
        boundary: Rectangle,
        capacity: usize,
        scale: f64,
        max_depth: usize,
        policy: OverflowPolicy,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(IndexError::InvalidConfig("capacity must be at least 1".to_string()));
        }
        if !scale.is_finite() || scale <= 1.0 {
            return Err(IndexError::InvalidConfig(format!(
                "scale must be a finite number greater than 1, got {}",
                scale
            )));
        }
        if max_depth == 0 {
            return Err(IndexError::InvalidConfig("max_depth must be at least 1".to_string()));
        }

        Ok(HierarchicalQuadTree {
            boundary,
            capacity,
            scale,
            max_depth,
            policy,
            buckets: Vec::new(),
        })
    }

    /// 从配置创建
    pub fn from_config(config: &TreeConfig) -> Result<Self> {
        let boundary = Rectangle::new(config.x, config.y, config.width, config.height)?;
        Self::with_options(
            boundary,
            config.capacity,
            config.scale,
            config.max_depth,
            config.overflow_policy,
        )
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// 所有桶，按创建顺序
    pub fn buckets(&self) -> &[Bucket<T>] {
        &self.buckets
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// 对象总数
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.tree.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.tree.is_empty())
    }

    /// 按创建顺序线性查找覆盖该尺寸的桶
    pub fn bucket_for_size(&self, size: f64) -> Option<usize> {
        self.buckets
            .iter()
            .position(|bucket| bucket.interval.covers(size))
    }

    /// 遍历所有对象：桶的创建顺序，桶内为 select 顺序
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.tree.iter())
    }

    pub fn stats(&self) -> Vec<(SizeInterval, TreeStats)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.interval, bucket.tree.stats()))
            .collect()
    }

    pub fn visualize(&self) -> HierarchyVisualization<'_, T> {
        HierarchyVisualization {
            boundary: self.boundary,
            capacity: self.capacity,
            scale: self.scale,
            buckets: self
                .buckets
                .iter()
                .map(|bucket| BucketVisualization {
                    interval: bucket.interval,
                    tree: bucket.tree.visualize(),
                })
                .collect(),
        }
    }

    fn create_bucket(&mut self, size: f64) -> usize {
        let interval = SizeInterval::around(size, self.scale);
        debug!(
            "Creating bucket #{} {} for object size {}",
            self.buckets.len(),
            interval,
            size
        );
        self.buckets.push(Bucket {
            interval,
            tree: QuadTree::with_options(self.boundary, self.capacity, self.max_depth, self.policy),
        });
        self.buckets.len() - 1
    }
}

impl<T: Serialize> HierarchicalQuadTree<T> {
    /// 导出所有桶的树结构为JSON格式，仅用于调试与可视化
    pub fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.visualize())?)
    }
}

impl<T: Spatial> HierarchicalQuadTree<T> {
    /// 插入对象，按尺寸路由到对应的桶，必要时新建桶
    ///
    /// 位置越界时返回 `OutOfBounds`，且不会创建空桶。
    pub fn insert(&mut self, object: T) -> Result<()> {
        let size = object.size();
        if !size.is_finite() || size < 0.0 {
            return Err(IndexError::InvalidSize(size));
        }

        let position = object.position();
        if !self.boundary.contains(&position) {
            return Err(IndexError::OutOfBounds {
                x: position.x,
                y: position.y,
            });
        }

        // 尺寸为 0 时区间会退化为空，按点的尺寸路由
        let size = size.max(Point::SIZE);
        let index = match self.bucket_for_size(size) {
            Some(index) => index,
            None => self.create_bucket(size),
        };
        self.buckets[index].tree.insert(object)
    }

    /// 收集可能与 `object` 重叠的候选对象（未做精确检测）
    ///
    /// 每个桶的查询窗口是以 `object` 位置为中心、半边长为
    /// `large + object.size()` 的正方形，因为树只按中心位置索引对象。
    pub fn query<S: Spatial + ?Sized>(&self, object: &S) -> Vec<&T> {
        let center = object.position();
        let size = object.size();

        self.buckets
            .iter()
            .flat_map(|bucket| {
                let window = Rectangle::from_center(center, bucket.interval.large + size);
                bucket.tree.select(&window)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Shape};

    fn world() -> Rectangle {
        Rectangle::new(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(x, y, r).unwrap()
    }

    #[test]
    fn test_creation_validates_parameters() {
        assert!(HierarchicalQuadTree::<Circle>::new(world(), 4).is_ok());
        assert!(HierarchicalQuadTree::<Circle>::new(world(), 0).is_err());
        assert!(HierarchicalQuadTree::<Circle>::with_scale(world(), 4, 1.0).is_err());
        assert!(HierarchicalQuadTree::<Circle>::with_scale(world(), 4, 0.5).is_err());
        assert!(HierarchicalQuadTree::<Circle>::with_scale(world(), 4, f64::NAN).is_err());
        assert!(HierarchicalQuadTree::<Circle>::with_options(
            world(),
            4,
            2.0,
            0,
            OverflowPolicy::Accept
        )
        .is_err());

        let tree = HierarchicalQuadTree::<Circle>::new(world(), 4).unwrap();
        assert_eq!(tree.scale(), DEFAULT_SCALE);
        assert_eq!(tree.bucket_count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_size_interval_ratio() {
        for &scale in &[1.5, 2.0, 3.0, 10.0] {
            for &size in &[0.001, 1.0, 5.0, 123.4] {
                let interval = SizeInterval::around(size, scale);
                assert!((interval.ratio() - scale).abs() < 1e-9 * scale);
                assert!(interval.covers(size));
                assert!(!interval.covers(interval.small));
                assert!(interval.covers(interval.large));
            }
        }
    }

    #[test]
    fn test_bucket_created_per_size_class() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        tree.insert(circle(10.0, 10.0, 6.0)).unwrap();
        assert_eq!(tree.bucket_count(), 1);
        let interval = tree.buckets()[0].interval;
        assert_eq!(interval, SizeInterval { large: 8.0, small: 4.0 });

        // 落在 (4, 8] 内，复用已有桶
        tree.insert(circle(20.0, 20.0, 7.5)).unwrap();
        tree.insert(circle(30.0, 30.0, 8.0)).unwrap();
        tree.insert(circle(40.0, 40.0, 4.1)).unwrap();
        assert_eq!(tree.bucket_count(), 1);

        // 下界不包含
        tree.insert(circle(50.0, 50.0, 4.0)).unwrap();
        assert_eq!(tree.bucket_count(), 2);
        // 大于已有的所有上界
        tree.insert(circle(60.0, 60.0, 9.0)).unwrap();
        assert_eq!(tree.bucket_count(), 3);

        assert_eq!(tree.len(), 6);
        assert_eq!(tree.buckets()[0].tree.len(), 4);
    }

    #[test]
    fn test_bucket_lookup_uses_creation_order() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        tree.insert(circle(10.0, 10.0, 3.0)).unwrap(); // (2, 4]
        tree.insert(circle(10.0, 10.0, 4.5)).unwrap(); // (3, 6]
        assert_eq!(tree.bucket_count(), 2);

        // 3.5 同时落在两个区间内，取先创建的桶
        assert_eq!(tree.bucket_for_size(3.5), Some(0));
        assert_eq!(tree.bucket_for_size(5.0), Some(1));
        assert_eq!(tree.bucket_for_size(7.0), None);
    }

    #[test]
    fn test_out_of_bounds_does_not_create_bucket() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        let err = tree.insert(circle(150.0, 10.0, 2.0)).unwrap_err();
        assert!(matches!(err, IndexError::OutOfBounds { .. }));
        assert_eq!(tree.bucket_count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        let bad = Circle { x: 1.0, y: 1.0, radius: f64::NAN };
        assert!(matches!(tree.insert(bad), Err(IndexError::InvalidSize(_))));
        let negative = Circle { x: 1.0, y: 1.0, radius: -2.0 };
        assert!(matches!(tree.insert(negative), Err(IndexError::InvalidSize(_))));
        assert_eq!(tree.bucket_count(), 0);
    }

    #[test]
    fn test_zero_sizes_share_a_bucket() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        tree.insert(circle(1.0, 1.0, 0.0)).unwrap();
        tree.insert(circle(2.0, 2.0, 0.0)).unwrap();
        tree.insert(circle(3.0, 3.0, 0.0)).unwrap();
        assert_eq!(tree.bucket_count(), 1);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_query_expands_window_by_bucket_size() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        let big = circle(50.0, 50.0, 20.0); // 桶 (13.33, 26.67]
        tree.insert(big).unwrap();

        // 圆心相距 25，窗口半边长 26.67 + 1 足以覆盖
        let probe = circle(50.0, 25.0, 1.0);
        assert_eq!(tree.query(&probe), vec![&big]);

        // 窗口半边长不足以覆盖
        let far_probe = circle(50.0, 95.0, 1.0);
        assert_eq!(tree.query(&far_probe).len(), 0);
    }

    #[test]
    fn test_query_order_follows_buckets() {
        let mut tree = HierarchicalQuadTree::new(world(), 4).unwrap();
        let small = circle(10.5, 10.5, 1.0);
        let large = circle(10.0, 10.0, 10.0);
        let medium = circle(11.0, 11.0, 3.0);
        tree.insert(small).unwrap();
        tree.insert(large).unwrap();
        tree.insert(medium).unwrap();

        let probe = Point::new(10.0, 10.0);
        assert_eq!(tree.query(&probe), vec![&small, &large, &medium]);
        let all: Vec<&Circle> = tree.iter().collect();
        assert_eq!(all, vec![&small, &large, &medium]);
    }

    #[test]
    fn test_mixed_shapes() {
        let mut tree: HierarchicalQuadTree<Shape> = HierarchicalQuadTree::new(world(), 2).unwrap();
        tree.insert(Point::new(5.0, 5.0).into()).unwrap();
        tree.insert(circle(20.0, 20.0, 3.0).into()).unwrap();
        tree.insert(Rectangle::new(40.0, 40.0, 10.0, 6.0).unwrap().into()).unwrap();

        assert_eq!(tree.bucket_count(), 3);
        let found = tree.query(&circle(6.0, 6.0, 1.0));
        assert_eq!(found, vec![&Shape::Point(Point::new(5.0, 5.0))]);
    }

    #[test]
    fn test_stats_and_export() {
        let mut tree = HierarchicalQuadTree::new(world(), 1).unwrap();
        tree.insert(circle(10.0, 10.0, 2.0)).unwrap();
        tree.insert(circle(80.0, 80.0, 2.0)).unwrap();
        tree.insert(circle(50.0, 50.0, 30.0)).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].1.items, 2);
        assert_eq!(stats[0].1.nodes, 5);
        assert_eq!(stats[1].1.items, 1);

        let json = tree.export_to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["buckets"].as_array().unwrap().len(), 2);
        assert_eq!(value["scale"], 2.0);
    }

    #[test]
    fn test_from_config() {
        let config = TreeConfig::default();
        let tree = HierarchicalQuadTree::<Circle>::from_config(&config).unwrap();
        assert_eq!(tree.capacity(), config.capacity);
        assert_eq!(tree.scale(), config.scale);
        assert_eq!(tree.max_depth(), config.max_depth);

        let broken = TreeConfig {
            width: -1.0,
            ..TreeConfig::default()
        };
        assert!(HierarchicalQuadTree::<Circle>::from_config(&broken).is_err());
    }
}
