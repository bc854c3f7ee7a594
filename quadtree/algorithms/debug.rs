use super::super::node::{NodeId, Quadrant, ROOT};
use super::super::quadtree::QuadTree;
use crate::error::Result;
use crate::geometry::Rectangle;
use serde::Serialize;
use std::fmt::Debug;

/// 用于JSON序列化的树结构
#[derive(Debug, Serialize)]
pub struct TreeVisualization<'a, T> {
    pub capacity: usize,
    pub max_depth: usize,
    pub len: usize,
    pub root: NodeVisualization<'a, T>,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize)]
pub struct NodeVisualization<'a, T> {
    /// 节点所在象限（根节点为空）
    pub quadrant: Option<Quadrant>,
    pub boundary: Rectangle,
    pub depth: usize,
    pub items: &'a [T],
    pub children: Vec<NodeVisualization<'a, T>>,
}

/// 四叉树调试功能实现
impl<T> QuadTree<T> {
    /// 构建用于可视化的树结构
    pub fn visualize(&self) -> TreeVisualization<'_, T> {
        TreeVisualization {
            capacity: self.capacity(),
            max_depth: self.max_depth(),
            len: self.len(),
            root: self.visualize_node(ROOT, None),
        }
    }

    fn visualize_node(&self, id: NodeId, quadrant: Option<Quadrant>) -> NodeVisualization<'_, T> {
        let node = &self.nodes[id];
        let children = match node.children {
            Some(children) => Quadrant::ALL
                .iter()
                .zip(children)
                .map(|(&q, child)| self.visualize_node(child, Some(q)))
                .collect(),
            None => Vec::new(),
        };

        NodeVisualization {
            quadrant,
            boundary: node.boundary,
            depth: node.depth,
            items: &node.items,
            children,
        }
    }
}

impl<T: Serialize> QuadTree<T> {
    /// 导出树结构为JSON格式，仅用于调试与可视化
    pub fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.visualize())?)
    }
}

impl<T: Debug> QuadTree<T> {
    /// 打印完整的树结构用于调试
    pub fn print_tree_structure_debug(&self) {
        fn print_node<T: Debug>(tree: &QuadTree<T>, id: NodeId, label: &str) {
            let node = &tree.nodes[id];
            let indent = "  ".repeat(node.depth);
            println!(
                "{}{} (depth={}, boundary=[{:.2},{:.2},{:.2},{:.2}], {} items):",
                indent,
                label,
                node.depth,
                node.boundary.x,
                node.boundary.y,
                node.boundary.width,
                node.boundary.height,
                node.items.len()
            );
            for (i, item) in node.items.iter().enumerate() {
                println!("{}  [{}] {:?}", indent, i, item);
            }
            if let Some(children) = node.children {
                for (q, child) in Quadrant::ALL.iter().zip(children) {
                    print_node(tree, child, &format!("{:?}", q));
                }
            }
        }

        println!("=== QuadTree Structure Debug ===");
        print_node(self, ROOT, "Root");
        println!("=== End Debug ===");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_debug_functions() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap(), 1);
        tree.print_tree_structure_debug();

        tree.insert(Point::new(1.0, 1.0)).unwrap();
        tree.insert(Point::new(8.0, 8.0)).unwrap();
        tree.print_tree_structure_debug();

        // 这个测试主要确保调试函数不会崩溃
        assert!(tree.is_divided());
    }

    #[test]
    fn test_json_export() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap(), 1);
        tree.insert(Point::new(1.0, 1.0)).unwrap();
        tree.insert(Point::new(8.0, 8.0)).unwrap();

        let json = tree.export_to_json().expect("Failed to export JSON");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["capacity"], 1);
        assert_eq!(value["len"], 2);
        assert_eq!(value["root"]["items"][0]["x"], 1.0);
        let children = value["root"]["children"].as_array().unwrap();
        assert_eq!(children.len(), 4);
        assert_eq!(children[3]["quadrant"], "SouthEast");
        assert_eq!(children[3]["items"][0]["y"], 8.0);
    }
}
