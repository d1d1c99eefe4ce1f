//! 基础数学类型
//!
//! 点和向量直接使用 nalgebra 的双精度类型，包围盒为本模块自定义。

use serde::{Deserialize, Serialize};

/// 二维点（场景坐标）
pub type Point2 = nalgebra::Point2<f64>;

/// 二维向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-9;

/// 轴对齐包围盒
///
/// 空包围盒是一个特殊值：`min` 为 `+∞`，`max` 为 `-∞`，
/// 与任意点或包围盒合并后即成为有效包围盒。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    /// 由两个角点创建（自动规范化）
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// 空包围盒
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 由点集创建，点集为空时返回空包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// 扩展以包含指定点
    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &BoundingBox2) -> BoundingBox2 {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        BoundingBox2 {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// 点是否在包围盒内（含边界）
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 另一个包围盒是否完全在内
    pub fn contains_box(&self, other: &BoundingBox2) -> bool {
        !other.is_empty() && self.contains(&other.min) && self.contains(&other.max)
    }

    /// 是否相交（含边界接触）
    pub fn intersects(&self, other: &BoundingBox2) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// 以指定点为中心缩放
    pub fn scaled_about(&self, origin: &Point2, sx: f64, sy: f64) -> BoundingBox2 {
        if self.is_empty() {
            return *self;
        }
        let map = |p: &Point2| {
            Point2::new(
                origin.x + (p.x - origin.x) * sx,
                origin.y + (p.y - origin.y) * sy,
            )
        };
        BoundingBox2::new(map(&self.min), map(&self.max))
    }

    /// 平移
    pub fn translated(&self, delta: &Vector2) -> BoundingBox2 {
        if self.is_empty() {
            return *self;
        }
        BoundingBox2 {
            min: self.min + *delta,
            max: self.max + *delta,
        }
    }
}

impl Default for BoundingBox2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_union() {
        let empty = BoundingBox2::empty();
        assert!(empty.is_empty());

        let b = BoundingBox2::new(Point2::new(10.0, 5.0), Point2::new(0.0, 0.0));
        assert_eq!(empty.union(&b), b);
        assert_eq!(b.union(&empty), b);
        assert_eq!(b.min, Point2::new(0.0, 0.0));
        assert_eq!(b.max, Point2::new(10.0, 5.0));
    }

    #[test]
    fn test_union_and_contains() {
        let a = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        let b = BoundingBox2::new(Point2::new(5.0, -5.0), Point2::new(20.0, 5.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point2::new(0.0, -5.0));
        assert_eq!(u.max, Point2::new(20.0, 10.0));
        assert!(u.contains_box(&a));
        assert!(u.contains_box(&b));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&BoundingBox2::empty()));
    }

    #[test]
    fn test_scaled_about() {
        let b = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 4.0));
        let s = b.scaled_about(&Point2::new(5.0, 2.0), 2.0, 0.5);
        assert!((s.width() - 20.0).abs() < EPSILON);
        assert!((s.height() - 2.0).abs() < EPSILON);
        assert!((s.center() - b.center()).norm() < EPSILON);
    }
}
