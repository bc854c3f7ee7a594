use super::super::node::{NodeId, ROOT};
use super::super::quadtree::QuadTree;
use crate::geometry::{Rectangle, Spatial};

/// 搜索操作相关算法
impl<T: Spatial> QuadTree<T> {
    /// 返回位置落在 `range` 内的所有对象
    ///
    /// 结果顺序：本节点的对象优先，然后依次递归 NW, NE, SW, SE 子节点。
    /// 与 `range` 不相交的子树会被剪枝。
    pub fn select(&self, range: &Rectangle) -> Vec<&T> {
        let mut results = Vec::new();
        self.select_recursive(ROOT, range, &mut results);
        results
    }

    /// 统计位置落在 `range` 内的对象数量
    pub fn count_in(&self, range: &Rectangle) -> usize {
        self.select(range).len()
    }

    /// 递归搜索，递归深度受树的最大深度约束
    fn select_recursive<'a>(&'a self, id: NodeId, range: &Rectangle, results: &mut Vec<&'a T>) {
        let node = &self.nodes[id];
        if !node.boundary.intersects(range) {
            return;
        }

        results.extend(
            node.items
                .iter()
                .filter(|item| range.contains(&item.position())),
        );

        if let Some(children) = node.children {
            for child in children {
                self.select_recursive(child, range, results);
            }
        }
    }
}
