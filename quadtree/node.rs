use crate::geometry::Rectangle;
use serde::{Deserialize, Serialize};

/// 节点在树内存池中的下标
pub type NodeId = usize;

/// 根节点固定位于下标 0
pub const ROOT: NodeId = 0;

/// 子象限，顺序即子节点的存储与遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// 四叉树节点
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// 节点的空间边界
    pub boundary: Rectangle,
    /// 直接存放在本节点的对象（未细分时不超过容量）
    pub items: Vec<T>,
    /// 细分后的四个子节点，顺序为 NW, NE, SW, SE
    pub children: Option<[NodeId; 4]>,
    /// 节点层级（根节点为 0）
    pub depth: usize,
}

impl<T> Node<T> {
    pub fn new(boundary: Rectangle, depth: usize) -> Self {
        Node {
            boundary,
            items: Vec::new(),
            children: None,
            depth,
        }
    }

    /// 是否已细分
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// 获取指定象限的子节点
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children.map(|children| children[quadrant.index()])
    }
}
