use super::point::Point;
use crate::error::{IndexError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 轴对齐矩形 - 用作四叉树的空间边界和查询窗口
///
/// `(x, y)` 为左上角，`width`/`height` 均大于 0。
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "Rectangle({}, {}, {}x{})", x, y, width, height)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// 创建新的矩形
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(IndexError::InvalidGeometry(format!(
                "rectangle ({}, {}, {}, {}) has non-finite components",
                x, y, width, height
            )));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(IndexError::InvalidGeometry(format!(
                "rectangle size {}x{} must be positive",
                width, height
            )));
        }
        Ok(Rectangle { x, y, width, height })
    }

    /// 以中心点和半边长创建正方形窗口
    pub fn from_center(center: Point, half_extent: f64) -> Self {
        Rectangle {
            x: center.x - half_extent,
            y: center.y - half_extent,
            width: 2.0 * half_extent,
            height: 2.0 * half_extent,
        }
    }

    /// 右边界（不包含）
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// 下边界（不包含）
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// 计算矩形中心点
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 计算矩形面积
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// 判断点是否在矩形内（半开区间：左上边包含，右下边不包含）
    pub fn contains(&self, point: &Point) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// 判断当前矩形是否完整包含另一个矩形
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// 判断两个矩形是否相交，边缘接触也算相交
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// 四等分矩形，顺序为 NW, NE, SW, SE
    ///
    /// 东侧/南侧子矩形的宽高由父矩形的右/下边界推出，保证父矩形内的每个点
    /// 都落在 `quadrant_index` 选出的子矩形内。
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let mid_x = self.x + half_w;
        let mid_y = self.y + half_h;
        let east_w = span_to(mid_x, self.right());
        let south_h = span_to(mid_y, self.bottom());
        [
            Rectangle { x: self.x, y: self.y, width: half_w, height: half_h },
            Rectangle { x: mid_x, y: self.y, width: east_w, height: half_h },
            Rectangle { x: self.x, y: mid_y, width: half_w, height: south_h },
            Rectangle { x: mid_x, y: mid_y, width: east_w, height: south_h },
        ]
    }

    /// 点所属象限的下标（0=NW, 1=NE, 2=SW, 3=SE）
    ///
    /// 与 `quadrants()` 的半开划分一致：落在中线上的点归入东侧/南侧。
    pub fn quadrant_index(&self, point: &Point) -> usize {
        let east = (point.x >= self.x + self.width / 2.0) as usize;
        let south = (point.y >= self.y + self.height / 2.0) as usize;
        (south << 1) | east
    }

    /// 点到矩形最近点的距离平方（点在矩形内时为 0）
    pub fn distance_squared_to(&self, point: &Point) -> f64 {
        let nearest = Point::new(
            point.x.max(self.x).min(self.right()),
            point.y.max(self.y).min(self.bottom()),
        );
        nearest.distance_squared(point)
    }
}

/// 从 `start` 到 `end` 的跨度，满足 `start + span >= end`
fn span_to(start: f64, end: f64) -> f64 {
    let mut span = (end - start).max(0.0);
    while start + span < end {
        span = f64::from_bits(span.to_bits() + 1);
    }
    span
}
