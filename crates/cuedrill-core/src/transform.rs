//! 二维仿射变换
//!
//! 采用 `[a, b, c, d, tx, ty]` 六参数表示：
//!
//! ```text
//! x' = a·x + c·y + tx
//! y' = b·x + d·y + ty
//! ```
//!
//! 本系统中的视口变换总是相似变换（等比缩放 + 平移），
//! 只有非锁定实体的用户缩放才会出现独立的X/Y缩放。

use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// 以指定点为不动点的缩放
    pub fn scale_about(origin: &Point2, sx: f64, sy: f64) -> Self {
        Self::new(
            sx,
            0.0,
            0.0,
            sy,
            origin.x - origin.x * sx,
            origin.y - origin.y * sy,
        )
    }

    /// 组合：先应用 `self`，再应用 `next`
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        AffineTransform::from_matrix(&(next.to_matrix() * self.to_matrix()))
    }

    pub fn apply(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// 变换向量（不受平移影响）
    pub fn apply_vector(&self, v: &Vector2) -> Vector2 {
        Vector2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// 逆变换，奇异矩阵返回 None
    pub fn inverse(&self) -> Option<AffineTransform> {
        self.to_matrix()
            .try_inverse()
            .map(|m| AffineTransform::from_matrix(&m))
    }

    pub fn scale_x(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    pub fn scale_y(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    /// 等效等比缩放因子（行列式绝对值的平方根）
    ///
    /// 圆形图元一律使用该值缩放半径，保证不会变成椭圆。
    pub fn uniform_scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    /// 是否为相似变换（无剪切，X/Y缩放相等）
    pub fn is_similarity(&self) -> bool {
        (self.scale_x() - self.scale_y()).abs() < 1e-6
            && (self.a * self.c + self.b * self.d).abs() < 1e-6
    }

    pub fn is_identity(&self) -> bool {
        let id = Self::IDENTITY;
        self.to_array()
            .iter()
            .zip(id.to_array().iter())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    /// 变换包围盒（取四个角点变换后的包围盒）
    pub fn transform_bbox(&self, bbox: &BoundingBox2) -> BoundingBox2 {
        if bbox.is_empty() {
            return *bbox;
        }
        BoundingBox2::from_points([
            self.apply(&bbox.min),
            self.apply(&Point2::new(bbox.max.x, bbox.min.y)),
            self.apply(&bbox.max),
            self.apply(&Point2::new(bbox.min.x, bbox.max.y)),
        ])
    }

    fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.a, self.c, self.tx, //
            self.b, self.d, self.ty, //
            0.0, 0.0, 1.0,
        )
    }

    fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self::new(m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)])
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
