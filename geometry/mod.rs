pub mod circle;
pub mod point;
pub mod rectangle;
pub mod shape;

// 重新导出主要类型
pub use circle::Circle;
pub use point::Point;
pub use rectangle::Rectangle;
pub use shape::{Collider, Shape, Spatial};
