use super::point::Point;
use crate::error::{IndexError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 圆形对象 - 以圆心为索引位置，半径为尺寸
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "Circle({}, {}, r={})", x, y, radius)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    /// 创建新的圆，半径必须为非负有限值
    pub fn new(x: f64, y: f64, radius: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && radius.is_finite()) || radius < 0.0 {
            return Err(IndexError::InvalidGeometry(format!(
                "circle ({}, {}) with radius {} is not representable",
                x, y, radius
            )));
        }
        Ok(Circle { x, y, radius })
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// 精确碰撞检测：圆心距离严格小于半径之和
    ///
    /// 仅相切的两个圆不算碰撞。
    pub fn collides_with(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center().distance_squared(&other.center()) < reach * reach
    }
}
