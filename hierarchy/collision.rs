use super::hierarchical::HierarchicalQuadTree;
use crate::geometry::{Circle, Collider, Spatial};

/// 碰撞查询选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// 跳过位置与尺寸都和探测圆相同的候选对象
    ///
    /// 树中保存的是没有标识的值，已插入的探测圆只能按值识别。
    pub exclude_self: bool,
    /// 结果数量上限，0 表示无限制
    pub limit: usize,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclude_self(mut self, exclude_self: bool) -> Self {
        self.exclude_self = exclude_self;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn skips<T: Spatial>(&self, candidate: &T, probe: &Circle) -> bool {
        self.exclude_self
            && candidate.position() == probe.position()
            && candidate.size() == probe.size()
    }

    fn is_full(&self, found: usize) -> bool {
        self.limit > 0 && found >= self.limit
    }
}

/// 基于尺寸桶范围查询的碰撞检测
impl<T: Collider> HierarchicalQuadTree<T> {
    /// 判断探测圆是否与任何已插入对象重叠，遇到第一个命中即返回
    ///
    /// 不排除探测圆自身：如果它已被插入，结果总是 `true`（半径为 0 的圆除外）。
    pub fn does_collide(&self, circle: &Circle) -> bool {
        self.does_collide_with(circle, &QueryOptions::default())
    }

    pub fn does_collide_with(&self, circle: &Circle, options: &QueryOptions) -> bool {
        self.query(circle)
            .into_iter()
            .any(|candidate| {
                !options.skips(candidate, circle) && candidate.collides_with_circle(circle)
            })
    }

    /// 返回所有与探测圆精确重叠的对象，顺序与 `query` 一致
    pub fn find_collisions(&self, circle: &Circle) -> Vec<&T> {
        self.find_collisions_with(circle, &QueryOptions::default())
    }

    pub fn find_collisions_with(&self, circle: &Circle, options: &QueryOptions) -> Vec<&T> {
        let mut results = Vec::new();
        for candidate in self.query(circle) {
            if options.skips(candidate, circle) || !candidate.collides_with_circle(circle) {
                continue;
            }
            results.push(candidate);
            if options.is_full(results.len()) {
                break;
            }
        }
        results
    }
}
