use super::super::node::{Node, NodeId, ROOT};
use super::super::quadtree::{OverflowPolicy, QuadTree};
use crate::error::{IndexError, Result};
use crate::geometry::{Point, Spatial};
use tracing::{trace, warn};

/// 插入位置的定位结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// 节点尚有空位
    Vacant(NodeId),
    /// 节点已满且未细分，需要先细分
    Full(NodeId),
    /// 节点已满且位于最大深度
    Saturated(NodeId),
}

/// 插入操作相关算法
impl<T: Spatial> QuadTree<T> {
    /// 插入对象
    ///
    /// # 返回值
    /// - `Ok(())` - 插入成功
    /// - `Err(IndexError::OutOfBounds)` - 对象位置不在根边界内，树保持不变
    /// - `Err(IndexError::DepthLimitExceeded)` - 最深节点已满且策略为 `Reject`，树保持不变
    pub fn insert(&mut self, item: T) -> Result<()> {
        let position = item.position();
        if !self.boundary().contains(&position) {
            return Err(IndexError::OutOfBounds {
                x: position.x,
                y: position.y,
            });
        }

        let target = match self.locate(&position) {
            Slot::Vacant(id) => id,
            Slot::Full(id) => {
                let children = self.subdivide(id);
                children[self.nodes[id].boundary.quadrant_index(&position)]
            }
            Slot::Saturated(id) => {
                let depth = self.nodes[id].depth;
                match self.policy() {
                    OverflowPolicy::Reject => {
                        return Err(IndexError::DepthLimitExceeded {
                            depth,
                            x: position.x,
                            y: position.y,
                        });
                    }
                    OverflowPolicy::Accept => {
                        warn!(
                            "Node at depth {} exceeds capacity {} at ({}, {})",
                            depth,
                            self.capacity(),
                            position.x,
                            position.y
                        );
                        id
                    }
                }
            }
        };

        self.nodes[target].items.push(item);
        self.len += 1;
        Ok(())
    }

    /// 从根节点向下查找可容纳该位置的节点，不修改树
    ///
    /// 每下降一层深度加一，因此循环次数不超过 `max_depth + 1`。
    fn locate(&self, position: &Point) -> Slot {
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            if node.items.len() < self.capacity() {
                return Slot::Vacant(id);
            }
            match node.children {
                Some(children) => id = children[node.boundary.quadrant_index(position)],
                None if node.depth >= self.max_depth() => return Slot::Saturated(id),
                None => return Slot::Full(id),
            }
        }
    }

    /// 将节点四等分，子节点按 NW, NE, SW, SE 顺序追加到内存池
    ///
    /// 父节点中已有的对象保留在原处。调用方保证节点尚未细分。
    fn subdivide(&mut self, id: NodeId) -> [NodeId; 4] {
        debug_assert!(self.nodes[id].children.is_none(), "node {} already divided", id);

        let depth = self.nodes[id].depth + 1;
        let quadrants = self.nodes[id].boundary.quadrants();
        let first = self.nodes.len();
        self.nodes
            .extend(quadrants.into_iter().map(|boundary| Node::new(boundary, depth)));

        let children = [first, first + 1, first + 2, first + 3];
        self.nodes[id].children = Some(children);
        trace!("Subdivided node {} at depth {} into {:?}", id, depth - 1, children);
        children
    }
}
