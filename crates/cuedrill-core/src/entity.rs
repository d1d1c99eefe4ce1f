//! 实体定义
//!
//! 每个实体只保存语义参数（位置、球号、长度等），
//! 可视化的图形树由 [`crate::factory`] 按需生成。

use crate::error::{CoreError, CoreResult};
use crate::factory;
use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use crate::shape::Shape;
use crate::transform::AffineTransform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 实体唯一标识符（在所属场景内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// 生成新的随机ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// 从已有字符串创建（用于文件加载）
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::from_raw(value)
    }
}

/// 球号（0 = 母球，1-7 全色，8 = 黑八，9-15 花色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BallNumber(u8);

/// 球的配色类别，索引指向七色调色板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallSuit {
    Cue,
    Solid(usize),
    Eight,
    Stripe(usize),
}

impl BallNumber {
    pub const CUE: BallNumber = BallNumber(0);
    pub const MAX: u8 = 15;

    pub fn new(number: i64) -> CoreResult<Self> {
        if (0..=Self::MAX as i64).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(CoreError::InvalidParameter(format!(
                "ball number {} is outside 0..={}",
                number,
                Self::MAX
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn suit(&self) -> BallSuit {
        match self.0 {
            0 => BallSuit::Cue,
            8 => BallSuit::Eight,
            n @ 1..=7 => BallSuit::Solid(n as usize - 1),
            n => BallSuit::Stripe(n as usize - 9),
        }
    }
}

impl TryFrom<i64> for BallNumber {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        BallNumber::new(value)
    }
}

impl From<BallNumber> for i64 {
    fn from(number: BallNumber) -> Self {
        number.0 as i64
    }
}

/// 训练器上的靶标数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TargetCount {
    Three,
    Four,
    Five,
}

impl TargetCount {
    pub fn from_count(count: i64) -> CoreResult<Self> {
        match count {
            3 => Ok(TargetCount::Three),
            4 => Ok(TargetCount::Four),
            5 => Ok(TargetCount::Five),
            other => Err(CoreError::InvalidParameter(format!(
                "training aid target count {} is not one of 3, 4, 5",
                other
            ))),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            TargetCount::Three => 3,
            TargetCount::Four => 4,
            TargetCount::Five => 5,
        }
    }
}

impl TryFrom<i64> for TargetCount {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        TargetCount::from_count(value)
    }
}

impl From<TargetCount> for i64 {
    fn from(count: TargetCount) -> Self {
        count.count() as i64
    }
}

/// 实体类型及其语义参数
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    CueBall {
        center: Point2,
    },
    NumberedBall {
        center: Point2,
        number: BallNumber,
    },
    StraightLine {
        start: Point2,
        end: Point2,
    },
    ArrowLine {
        start: Point2,
        end: Point2,
    },
    CircleMarker {
        center: Point2,
        radius: f64,
    },
    RectangleMarker {
        center: Point2,
        width: f64,
        height: f64,
    },
    AlignmentRail {
        center: Point2,
        length: f64,
    },
    TrainingAid {
        center: Point2,
        target_count: TargetCount,
        body_length: f64,
    },
    TargetRings {
        center: Point2,
        ring_count: u8,
    },
    FreeformShape {
        points: Vec<Point2>,
    },
}

impl EntityKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::CueBall { .. } => "CueBall",
            EntityKind::NumberedBall { .. } => "NumberedBall",
            EntityKind::StraightLine { .. } => "StraightLine",
            EntityKind::ArrowLine { .. } => "ArrowLine",
            EntityKind::CircleMarker { .. } => "CircleMarker",
            EntityKind::RectangleMarker { .. } => "RectangleMarker",
            EntityKind::AlignmentRail { .. } => "AlignmentRail",
            EntityKind::TrainingAid { .. } => "TrainingAid",
            EntityKind::TargetRings { .. } => "TargetRings",
            EntityKind::FreeformShape { .. } => "FreeformShape",
        }
    }

    /// 锚点：圆形类为圆心，线类为起点，手绘为第一个点
    pub fn anchor(&self) -> Point2 {
        match self {
            EntityKind::CueBall { center }
            | EntityKind::NumberedBall { center, .. }
            | EntityKind::CircleMarker { center, .. }
            | EntityKind::RectangleMarker { center, .. }
            | EntityKind::AlignmentRail { center, .. }
            | EntityKind::TrainingAid { center, .. }
            | EntityKind::TargetRings { center, .. } => *center,
            EntityKind::StraightLine { start, .. } | EntityKind::ArrowLine { start, .. } => *start,
            EntityKind::FreeformShape { points } => {
                points.first().copied().unwrap_or_else(Point2::origin)
            }
        }
    }

    /// 是否为锁定比例的圆形实体
    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            EntityKind::CueBall { .. }
                | EntityKind::NumberedBall { .. }
                | EntityKind::CircleMarker { .. }
                | EntityKind::TargetRings { .. }
        )
    }

    /// 所有坐标和尺寸都是有限值
    pub fn is_finite(&self) -> bool {
        let point = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        match self {
            EntityKind::CueBall { center }
            | EntityKind::NumberedBall { center, .. }
            | EntityKind::TargetRings { center, .. } => point(center),
            EntityKind::StraightLine { start, end } | EntityKind::ArrowLine { start, end } => {
                point(start) && point(end)
            }
            EntityKind::CircleMarker { center, radius } => point(center) && radius.is_finite(),
            EntityKind::RectangleMarker {
                center,
                width,
                height,
            } => point(center) && width.is_finite() && height.is_finite(),
            EntityKind::AlignmentRail { center, length } => point(center) && length.is_finite(),
            EntityKind::TrainingAid {
                center,
                body_length,
                ..
            } => point(center) && body_length.is_finite(),
            EntityKind::FreeformShape { points } => points.iter().all(point),
        }
    }

    fn translate(&mut self, delta: &Vector2) {
        match self {
            EntityKind::CueBall { center }
            | EntityKind::NumberedBall { center, .. }
            | EntityKind::CircleMarker { center, .. }
            | EntityKind::RectangleMarker { center, .. }
            | EntityKind::AlignmentRail { center, .. }
            | EntityKind::TrainingAid { center, .. }
            | EntityKind::TargetRings { center, .. } => *center += *delta,
            EntityKind::StraightLine { start, end } | EntityKind::ArrowLine { start, end } => {
                *start += *delta;
                *end += *delta;
            }
            EntityKind::FreeformShape { points } => {
                for p in points.iter_mut() {
                    *p += *delta;
                }
            }
        }
    }
}

/// 场景中的一个可放置对象
///
/// 不直接实现序列化：文件加载必须经过工厂校验参数。
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    /// 用户缩放，以锚点为中心
    scale_x: f64,
    scale_y: f64,
}

impl Entity {
    /// 不做参数校验，仅供工厂使用
    pub(crate) fn from_parts(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn position(&self) -> Point2 {
        self.kind.anchor()
    }

    /// 锁定实体的X/Y缩放始终相等
    pub fn locked(&self) -> bool {
        self.kind.is_circular()
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// 设置缩放；锁定实体取两轴的几何平均值
    pub fn set_scale(&mut self, sx: f64, sy: f64) -> CoreResult<()> {
        if !(sx.is_finite() && sy.is_finite()) || sx <= EPSILON || sy <= EPSILON {
            return Err(CoreError::InvalidParameter(format!(
                "scale ({}, {}) must be positive and finite",
                sx, sy
            )));
        }
        if self.locked() {
            let uniform = (sx * sy).sqrt();
            self.scale_x = uniform;
            self.scale_y = uniform;
        } else {
            self.scale_x = sx;
            self.scale_y = sy;
        }
        Ok(())
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> CoreResult<Self> {
        self.set_scale(sx, sy)?;
        Ok(self)
    }

    /// 非有限位移被忽略
    pub fn translate(&mut self, delta: &Vector2) {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return;
        }
        self.kind.translate(delta);
    }

    /// 用户缩放对应的变换
    pub fn local_transform(&self) -> AffineTransform {
        AffineTransform::scale_about(&self.position(), self.scale_x, self.scale_y)
    }

    /// 生成图形树（已应用用户缩放）
    pub fn shape_tree(&self) -> Shape {
        let shape = factory::build_shape(&self.kind);
        if (self.scale_x - 1.0).abs() < EPSILON && (self.scale_y - 1.0).abs() < EPSILON {
            shape
        } else {
            shape.transformed(&self.local_transform())
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.shape_tree().bounding_box()
    }
}
