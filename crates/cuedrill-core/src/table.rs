//! 球台装饰
//!
//! 四边库边和六个袋口。不属于场景、不可选中、不参与序列化，
//! 只在投影时作为底层绘制。

use crate::color::Color;
use crate::math::{BoundingBox2, Point2};
use crate::scene::{TABLE_HEIGHT, TABLE_WIDTH};
use crate::shape::{Circle, Rect, Shape, Style};

pub const RAIL_THICKNESS: f64 = 20.0;
pub const POCKET_RADIUS: f64 = 15.0;
pub const POCKET_COLOR: Color = Color::BLACK;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    pub width: f64,
    pub height: f64,
}

impl TableLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> BoundingBox2 {
        BoundingBox2::new(Point2::origin(), Point2::new(self.width, self.height))
    }

    /// 四角和两条长边中点
    pub fn pocket_centers(&self) -> [Point2; 6] {
        let (w, h) = (self.width, self.height);
        [
            Point2::new(0.0, 0.0),
            Point2::new(w / 2.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(0.0, h),
            Point2::new(w / 2.0, h),
            Point2::new(w, h),
        ]
    }

    /// 上、下、左、右库边
    fn rails(&self) -> [Rect; 4] {
        let (w, h, t) = (self.width, self.height, RAIL_THICKNESS);
        let rail = |x: f64, y: f64, width: f64, height: f64| Rect {
            origin: Point2::new(x, y),
            width,
            height,
            corner_radius: 0.0,
            style: Style::filled(Color::RAIL),
        };
        [
            rail(0.0, 0.0, w, t),
            rail(0.0, h - t, w, t),
            rail(0.0, 0.0, t, h),
            rail(w - t, 0.0, t, h),
        ]
    }

    /// 库边在下，袋口在上
    pub fn shape_tree(&self) -> Shape {
        let rails = self.rails().into_iter().map(Shape::Rect);
        let pockets = self.pocket_centers().into_iter().map(|center| {
            Shape::Circle(Circle {
                center,
                radius: POCKET_RADIUS,
                style: Style::filled(POCKET_COLOR),
            })
        });
        Shape::group(rails.chain(pockets).collect())
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::new(TABLE_WIDTH, TABLE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape_tree() {
        let table = TableLayout::default();
        let shape = table.shape_tree();
        let primitives = shape.primitives();
        assert_eq!(primitives.len(), 10);

        let pockets: Vec<_> = primitives
            .iter()
            .filter_map(|s| match s {
                Shape::Circle(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(pockets.len(), 6);
        assert!(pockets.iter().all(|c| c.radius == POCKET_RADIUS));
        assert_eq!(pockets[1].center, Point2::new(450.0, 0.0));

        // 袋口伸出台面边缘
        let bbox = shape.bounding_box();
        assert_eq!(bbox.min, Point2::new(-15.0, -15.0));
        assert_eq!(bbox.max, Point2::new(915.0, 465.0));
    }

    #[test]
    fn test_rails_follow_edges() {
        let table = TableLayout::new(200.0, 100.0);
        let rails = table.rails();
        assert_eq!(rails[1].origin, Point2::new(0.0, 80.0));
        assert_eq!(rails[3].origin, Point2::new(180.0, 0.0));
        assert!(rails.iter().all(|r| r.style.fill == Some(Color::RAIL)));
    }
}
