use super::node::{Node, NodeId, ROOT};
use crate::geometry::Rectangle;
use serde::{Deserialize, Serialize};

/// 默认最大细分深度
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// 节点到达最大深度后仍然溢出时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// 超出容量也存入最深节点
    #[default]
    Accept,
    /// 返回 `IndexError::DepthLimitExceeded`
    Reject,
}

/// 树的统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    pub items: usize,
    pub nodes: usize,
    pub leaves: usize,
    /// 层数（仅根节点时为 1）
    pub depth: usize,
    /// 超出容量的节点数量（仅在 Accept 策略下可能出现）
    pub overflowed_nodes: usize,
}

/// 容量受限的递归四叉树
///
/// 节点保存在一个扁平的内存池中，子节点通过下标引用。节点只会在首次溢出时
/// 细分一次，之后不会被合并或删除。
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    capacity: usize,
    max_depth: usize,
    policy: OverflowPolicy,
    pub(crate) len: usize,
}

impl<T> QuadTree<T> {
    /// 创建新的四叉树，使用默认最大深度
    pub fn new(boundary: Rectangle, capacity: usize) -> Self {
        Self::with_options(boundary, capacity, DEFAULT_MAX_DEPTH, OverflowPolicy::default())
    }

    /// 使用完整参数创建四叉树
    ///
    /// # Panics
    /// `capacity` 或 `max_depth` 为 0 时 panic。需要返回错误的调用方应使用
    /// `HierarchicalQuadTree::with_options`。
    pub fn with_options(
        boundary: Rectangle,
        capacity: usize,
        max_depth: usize,
        policy: OverflowPolicy,
    ) -> Self {
        assert!(capacity >= 1, "Capacity must be at least 1");
        assert!(max_depth >= 1, "Max depth must be at least 1");

        QuadTree {
            nodes: vec![Node::new(boundary, 0)],
            capacity,
            max_depth,
            policy,
            len: 0,
        }
    }

    /// 根节点边界
    pub fn boundary(&self) -> &Rectangle {
        &self.nodes[ROOT].boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// 已存储的对象数量
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 根节点是否已细分
    pub fn is_divided(&self) -> bool {
        self.nodes[ROOT].is_divided()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 获取树的层数
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth + 1).max().unwrap_or(1)
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    /// 先序遍历节点下标：本节点优先，然后依次为 NW, NE, SW, SE
    pub(crate) fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(children) = self.nodes[id].children {
                stack.extend(children.iter().rev());
            }
        }
        order
    }

    /// 按 select 的顺序遍历所有对象
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.preorder()
            .into_iter()
            .flat_map(move |id| self.nodes[id].items.iter())
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            items: self.len,
            nodes: self.nodes.len(),
            leaves: self.nodes.iter().filter(|node| node.is_leaf()).count(),
            depth: self.depth(),
            overflowed_nodes: self
                .nodes
                .iter()
                .filter(|node| node.items.len() > self.capacity)
                .count(),
        }
    }
}
