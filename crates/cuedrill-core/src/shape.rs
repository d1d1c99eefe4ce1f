//! 图形树
//!
//! 实体工厂把每个实体分解为若干基本图元，渲染端只需要按顺序绘制：
//! - 圆 (Circle)
//! - 矩形 (Rect，可带圆角)
//! - 线段 (Line，可带虚线)
//! - 多边形 (Polygon，闭合)
//! - 路径 (Path，开放折线)
//! - 条带 (Band，裁剪到圆盘内的水平色带)
//! - 文本 (Label)
//! - 组合 (Group)

use crate::color::Color;
use crate::math::{BoundingBox2, Point2};
use crate::transform::AffineTransform;
use serde::{Deserialize, Serialize};

/// 估算字符宽度与字号的比例
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// 描边/填充样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// None 表示透明
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// 虚线模式 [实线长度, 间隔长度]
    pub dash: Option<[f64; 2]>,
}

impl Style {
    pub fn filled(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
            dash: None,
        }
    }

    pub fn outlined(stroke: Color, stroke_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
            stroke_width,
            dash: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_dash(mut self, dash: [f64; 2]) -> Self {
        self.dash = Some(dash);
        self
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            stroke_width: self.stroke_width * factor,
            dash: self.dash.map(|[on, off]| [on * factor, off * factor]),
            ..*self
        }
    }

    fn recolored(&self, color: Color) -> Self {
        Self {
            fill: self.fill.map(|_| color),
            stroke: self.stroke.map(|_| color),
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// 左上角
    pub origin: Point2,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point2>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point2>,
    pub style: Style,
}

/// 花色球的水平色带
///
/// 以 `center` 为圆心、`radius` 为半径的圆盘裁剪，色带总高度为 `height`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub center: Point2,
    pub radius: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// 文本框左上角
    pub position: Point2,
    pub text: String,
    pub font_size: f64,
    pub color: Color,
    pub bold: bool,
    pub shadow: Option<Color>,
}

impl Label {
    /// 估算文本宽度
    pub fn estimated_width(&self) -> f64 {
        self.text.chars().count() as f64 * self.font_size * CHAR_WIDTH_RATIO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
    Line(Line),
    Polygon(Polygon),
    Path(Path),
    Band(Band),
    Label(Label),
    Group { children: Vec<Shape> },
}

impl Shape {
    pub fn group(children: Vec<Shape>) -> Self {
        Shape::Group { children }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "Circle",
            Shape::Rect(_) => "Rect",
            Shape::Line(_) => "Line",
            Shape::Polygon(_) => "Polygon",
            Shape::Path(_) => "Path",
            Shape::Band(_) => "Band",
            Shape::Label(_) => "Label",
            Shape::Group { .. } => "Group",
        }
    }

    /// 包围盒（仅几何，不含描边宽度）
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Shape::Circle(c) => BoundingBox2::new(
                Point2::new(c.center.x - c.radius, c.center.y - c.radius),
                Point2::new(c.center.x + c.radius, c.center.y + c.radius),
            ),
            Shape::Rect(r) => BoundingBox2::new(
                r.origin,
                Point2::new(r.origin.x + r.width, r.origin.y + r.height),
            ),
            Shape::Line(l) => BoundingBox2::from_points([l.start, l.end]),
            Shape::Polygon(p) => BoundingBox2::from_points(p.points.iter().copied()),
            Shape::Path(p) => BoundingBox2::from_points(p.points.iter().copied()),
            Shape::Band(b) => {
                let half = (b.height / 2.0).min(b.radius);
                BoundingBox2::new(
                    Point2::new(b.center.x - b.radius, b.center.y - half),
                    Point2::new(b.center.x + b.radius, b.center.y + half),
                )
            }
            Shape::Label(l) => BoundingBox2::new(
                l.position,
                Point2::new(l.position.x + l.estimated_width(), l.position.y + l.font_size),
            ),
            Shape::Group { children } => children
                .iter()
                .fold(BoundingBox2::empty(), |acc, child| {
                    acc.union(&child.bounding_box())
                }),
        }
    }

    /// 应用变换
    ///
    /// 点坐标使用完整变换；半径、圆角、线宽、字号统一使用等效等比缩放，
    /// 因此圆形在任何变换下都保持为圆。
    pub fn transformed(&self, t: &AffineTransform) -> Shape {
        let u = t.uniform_scale();
        match self {
            Shape::Circle(c) => Shape::Circle(Circle {
                center: t.apply(&c.center),
                radius: c.radius * u,
                style: c.style.scaled(u),
            }),
            Shape::Rect(r) => {
                let bbox = t.transform_bbox(&self.bounding_box());
                Shape::Rect(Rect {
                    origin: bbox.min,
                    width: bbox.width(),
                    height: bbox.height(),
                    corner_radius: r.corner_radius * u,
                    style: r.style.scaled(u),
                })
            }
            Shape::Line(l) => Shape::Line(Line {
                start: t.apply(&l.start),
                end: t.apply(&l.end),
                style: l.style.scaled(u),
            }),
            Shape::Polygon(p) => Shape::Polygon(Polygon {
                points: p.points.iter().map(|pt| t.apply(pt)).collect(),
                style: p.style.scaled(u),
            }),
            Shape::Path(p) => Shape::Path(Path {
                points: p.points.iter().map(|pt| t.apply(pt)).collect(),
                style: p.style.scaled(u),
            }),
            Shape::Band(b) => Shape::Band(Band {
                center: t.apply(&b.center),
                radius: b.radius * u,
                height: b.height * u,
                color: b.color,
            }),
            Shape::Label(l) => Shape::Label(Label {
                position: t.apply(&l.position),
                font_size: l.font_size * u,
                ..l.clone()
            }),
            Shape::Group { children } => Shape::Group {
                children: children.iter().map(|c| c.transformed(t)).collect(),
            },
        }
    }

    /// 统一替换可见的填充和描边颜色（文本保持原色）
    pub fn recolored(&self, color: Color) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(Circle {
                style: c.style.recolored(color),
                ..c.clone()
            }),
            Shape::Rect(r) => Shape::Rect(Rect {
                style: r.style.recolored(color),
                ..r.clone()
            }),
            Shape::Line(l) => Shape::Line(Line {
                style: l.style.recolored(color),
                ..l.clone()
            }),
            Shape::Polygon(p) => Shape::Polygon(Polygon {
                points: p.points.clone(),
                style: p.style.recolored(color),
            }),
            Shape::Path(p) => Shape::Path(Path {
                points: p.points.clone(),
                style: p.style.recolored(color),
            }),
            Shape::Band(b) => Shape::Band(Band { color, ..b.clone() }),
            Shape::Label(_) => self.clone(),
            Shape::Group { children } => Shape::Group {
                children: children.iter().map(|c| c.recolored(color)).collect(),
            },
        }
    }

    /// 按绘制顺序展开为叶子图元
    pub fn primitives(&self) -> Vec<&Shape> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    fn collect_primitives<'a>(&'a self, out: &mut Vec<&'a Shape>) {
        match self {
            Shape::Group { children } => {
                for child in children {
                    child.collect_primitives(out);
                }
            }
            _ => out.push(self),
        }
    }
}
