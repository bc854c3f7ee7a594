use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 二维点
#[derive(Debug, Display, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// 点的固定尺寸（无量纲的极小值）
    pub const SIZE: f64 = f64::EPSILON;

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// 到另一点的距离平方
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
