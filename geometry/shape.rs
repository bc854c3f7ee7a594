//! Capabilities shared by everything the trees can index.
//!
//! The trees only ever need a position and a size scalar (`Spatial`); the
//! collision API additionally needs an exact test against a probe circle
//! (`Collider`). `Shape` is the closed set of built-in shapes.

use super::circle::Circle;
use super::point::Point;
use super::rectangle::Rectangle;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 可被索引的对象：提供位置与尺寸
pub trait Spatial {
    /// 索引位置
    fn position(&self) -> Point;

    /// 尺寸标量，用于选择尺寸桶和扩大查询窗口
    fn size(&self) -> f64;
}

/// 可与探测圆做精确碰撞检测的对象
pub trait Collider: Spatial {
    fn collides_with_circle(&self, circle: &Circle) -> bool;
}

impl<T: Spatial + ?Sized> Spatial for &T {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn size(&self) -> f64 {
        (**self).size()
    }
}

impl<T: Collider + ?Sized> Collider for &T {
    fn collides_with_circle(&self, circle: &Circle) -> bool {
        (**self).collides_with_circle(circle)
    }
}

impl Spatial for Point {
    fn position(&self) -> Point {
        *self
    }

    fn size(&self) -> f64 {
        Point::SIZE
    }
}

impl Collider for Point {
    fn collides_with_circle(&self, circle: &Circle) -> bool {
        self.distance_squared(&circle.center()) < circle.radius * circle.radius
    }
}

impl Spatial for Circle {
    fn position(&self) -> Point {
        self.center()
    }

    fn size(&self) -> f64 {
        self.radius
    }
}

impl Collider for Circle {
    fn collides_with_circle(&self, circle: &Circle) -> bool {
        self.collides_with(circle)
    }
}

impl Spatial for Rectangle {
    /// 矩形以中心点作为索引位置
    ///
    /// 矩形上任一点到中心的切比雪夫距离不超过 `size()`，查询窗口按尺寸扩展后
    /// 能覆盖所有可能与查询圆重叠的矩形。
    fn position(&self) -> Point {
        self.center()
    }

    /// 外接圆半径的近似值：较长边的一半
    fn size(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }
}

impl Collider for Rectangle {
    fn collides_with_circle(&self, circle: &Circle) -> bool {
        self.distance_squared_to(&circle.center()) < circle.radius * circle.radius
    }
}

/// 内置形状的封闭集合
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    #[display(fmt = "{}", _0)]
    Point(Point),
    #[display(fmt = "{}", _0)]
    Circle(Circle),
    #[display(fmt = "{}", _0)]
    Rectangle(Rectangle),
}

impl Spatial for Shape {
    fn position(&self) -> Point {
        match self {
            Shape::Point(p) => p.position(),
            Shape::Circle(c) => c.position(),
            Shape::Rectangle(r) => r.position(),
        }
    }

    fn size(&self) -> f64 {
        match self {
            Shape::Point(p) => p.size(),
            Shape::Circle(c) => c.size(),
            Shape::Rectangle(r) => r.size(),
        }
    }
}

impl Collider for Shape {
    fn collides_with_circle(&self, circle: &Circle) -> bool {
        match self {
            Shape::Point(p) => p.collides_with_circle(circle),
            Shape::Circle(c) => c.collides_with_circle(circle),
            Shape::Rectangle(r) => r.collides_with_circle(circle),
        }
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}
