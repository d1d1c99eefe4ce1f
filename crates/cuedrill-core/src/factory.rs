//! 实体工厂
//!
//! 两类函数：
//! - `create_*`/便捷构造函数：校验并规范化参数，返回新实体（不插入场景）
//! - [`build_shape`]：由实体参数生成图形树，纯函数，相同参数总是得到相同结果
//!
//! 只有越界参数（球号、环数、点数等）会返回 [`CoreError::InvalidParameter`]，
//! 使用默认尺寸的便捷构造函数不会失败。

use crate::color::Color;
use crate::entity::{BallNumber, BallSuit, Entity, EntityId, EntityKind, TargetCount};
use crate::error::{CoreError, CoreResult};
use crate::math::{Point2, Vector2, EPSILON};
use crate::shape::{Band, Circle, Label, Line, Path, Polygon, Rect, Shape, Style};

// ---- 球 ----

pub const BALL_RADIUS: f64 = 12.0;
pub const BALL_OUTLINE_WIDTH: f64 = 2.0;
/// 花色球色带占直径的比例
pub const STRIPE_BAND_RATIO: f64 = 0.58;
pub const BALL_LABEL_SIZE: f64 = 14.0;

/// 1-7 号全色球（以及 9-15 号花色球）共用的调色板
pub const BALL_PALETTE: [Color; 7] = [
    Color::rgb(0xFF, 0xFF, 0x00), // 黄
    Color::rgb(0x00, 0x66, 0xFF), // 蓝
    Color::rgb(0xFF, 0x00, 0x00), // 红
    Color::rgb(0x80, 0x00, 0x80), // 紫
    Color::rgb(0xFF, 0x8C, 0x00), // 橙
    Color::rgb(0x00, 0x64, 0x00), // 绿
    Color::rgb(0x8B, 0x00, 0x00), // 褐红
];

// ---- 线 ----

pub const LINE_COLOR: Color = Color::YELLOW;
pub const LINE_WIDTH: f64 = 3.0;
pub const ARROWHEAD_LENGTH: f64 = 20.0;
pub const ARROWHEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

// ---- 标记 ----

pub const MARKER_COLOR: Color = Color::CYAN;
pub const MARKER_WIDTH: f64 = 3.0;
pub const CIRCLE_MARKER_RADIUS: f64 = 25.0;
pub const RECT_MARKER_WIDTH: f64 = 80.0;
pub const RECT_MARKER_HEIGHT: f64 = 60.0;

// ---- 瞄准尺 ----

pub const RAIL_LENGTH: f64 = 400.0;
pub const RAIL_WIDTH: f64 = 30.0;
pub const RAIL_MARK_SPACING: f64 = 50.0;
pub const RAIL_MARK_RADIUS: f64 = 4.0;
/// 约为设计画布对角线的两倍，同时限制标记点数量
pub const MAX_RAIL_LENGTH: f64 = 2000.0;
const RAIL_FILL: Color = Color::rgb(0x2A, 0x2A, 0x2A);
const RAIL_STROKE: Color = Color::rgb(0x1A, 0x1A, 0x1A);

// ---- 训练器 ----

pub const AID_LENGTH: f64 = 350.0;
/// 保证五个靶标也不会互相重叠的最小长度
pub const MIN_AID_LENGTH: f64 = 250.0;
pub const AID_WIDTH: f64 = 60.0;
/// 两端靶标中心到机身端点的距离
pub const AID_TARGET_INSET: f64 = 55.0;
const AID_FILL: Color = Color::rgb(0x1E, 0x40, 0xAF);
const AID_STROKE: Color = Color::rgb(0x1E, 0x3A, 0x8A);
const AID_GUIDE: Color = Color::rgb(0xFB, 0xBF, 0x24);
const AID_DOT: Color = Color::rgb(0xDC, 0x26, 0x26);
const AID_DASH: [f64; 2] = [10.0, 5.0];

// ---- 靶环 ----

/// 900 像素对应 100 英寸台面
pub const PIXELS_PER_INCH: f64 = 9.0;
/// 每一环的半径增量：2 英寸
pub const RING_UNIT: f64 = 2.0 * PIXELS_PER_INCH;
pub const DEFAULT_RING_COUNT: u8 = 3;
pub const MAX_RING_COUNT: u8 = 5;
const RING_COLORS: [Color; 3] = [
    Color::WHITE,
    Color::rgb(0x00, 0x66, 0xFF),
    Color::rgb(0xFF, 0x00, 0x00),
];

/// 校验参数并创建带新ID的实体
pub fn create_entity(kind: EntityKind) -> CoreResult<Entity> {
    create_entity_with_id(EntityId::new(), kind)
}

/// 使用指定ID创建实体（文件加载时保留原ID）
pub fn create_entity_with_id(id: EntityId, kind: EntityKind) -> CoreResult<Entity> {
    let kind = normalize(kind)?;
    Ok(Entity::from_parts(id, kind))
}

fn normalize(kind: EntityKind) -> CoreResult<EntityKind> {
    let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
    if !finite(&kind.anchor()) {
        return Err(CoreError::InvalidParameter(format!(
            "{} position must be finite",
            kind.type_name()
        )));
    }
    let positive = |name: &str, v: f64| {
        if v.is_finite() && v > 0.0 {
            Ok(())
        } else {
            Err(CoreError::InvalidParameter(format!(
                "{} must be positive, got {}",
                name, v
            )))
        }
    };

    match kind {
        EntityKind::StraightLine { end, .. } | EntityKind::ArrowLine { end, .. }
            if !finite(&end) =>
        {
            Err(CoreError::InvalidParameter("line end must be finite".into()))
        }
        EntityKind::CircleMarker { radius, .. } => {
            positive("circle radius", radius)?;
            Ok(kind)
        }
        EntityKind::RectangleMarker { width, height, .. } => {
            positive("rectangle width", width)?;
            positive("rectangle height", height)?;
            Ok(kind)
        }
        EntityKind::AlignmentRail { length, .. } => {
            positive("rail length", length)?;
            if length > MAX_RAIL_LENGTH {
                return Err(CoreError::InvalidParameter(format!(
                    "rail length {} exceeds {}",
                    length, MAX_RAIL_LENGTH
                )));
            }
            Ok(kind)
        }
        EntityKind::TrainingAid {
            center,
            target_count,
            body_length,
        } => {
            positive("training aid length", body_length)?;
            Ok(EntityKind::TrainingAid {
                center,
                target_count,
                body_length: body_length.max(MIN_AID_LENGTH),
            })
        }
        EntityKind::TargetRings { ring_count, .. } => {
            if (1..=MAX_RING_COUNT).contains(&ring_count) {
                Ok(kind)
            } else {
                Err(CoreError::InvalidParameter(format!(
                    "ring count {} is outside 1..={}",
                    ring_count, MAX_RING_COUNT
                )))
            }
        }
        EntityKind::FreeformShape { points } => {
            if points.len() < 2 {
                return Err(CoreError::InvalidParameter(
                    "freeform shape needs at least two points".into(),
                ));
            }
            if !points.iter().all(finite) {
                return Err(CoreError::InvalidParameter(
                    "freeform points must be finite".into(),
                ));
            }
            Ok(EntityKind::FreeformShape { points })
        }
        _ => Ok(kind),
    }
}

// 以下便捷构造使用固定的合法尺寸，不做坐标校验；
// 非有限坐标在 `Scene::add` 时被拒绝。

pub fn cue_ball(center: Point2) -> Entity {
    Entity::from_parts(EntityId::new(), EntityKind::CueBall { center })
}

/// 按球号创建球，0 号为母球
pub fn ball(center: Point2, number: i64) -> CoreResult<Entity> {
    let number = BallNumber::new(number)?;
    if number == BallNumber::CUE {
        return Ok(cue_ball(center));
    }
    create_entity(EntityKind::NumberedBall { center, number })
}

pub fn straight_line(start: Point2, end: Point2) -> Entity {
    Entity::from_parts(EntityId::new(), EntityKind::StraightLine { start, end })
}

pub fn arrow_line(start: Point2, end: Point2) -> Entity {
    Entity::from_parts(EntityId::new(), EntityKind::ArrowLine { start, end })
}

pub fn circle_marker(center: Point2) -> Entity {
    Entity::from_parts(
        EntityId::new(),
        EntityKind::CircleMarker {
            center,
            radius: CIRCLE_MARKER_RADIUS,
        },
    )
}

pub fn rectangle_marker(center: Point2) -> Entity {
    Entity::from_parts(
        EntityId::new(),
        EntityKind::RectangleMarker {
            center,
            width: RECT_MARKER_WIDTH,
            height: RECT_MARKER_HEIGHT,
        },
    )
}

pub fn alignment_rail(center: Point2) -> Entity {
    Entity::from_parts(
        EntityId::new(),
        EntityKind::AlignmentRail {
            center,
            length: RAIL_LENGTH,
        },
    )
}

pub fn training_aid(center: Point2, target_count: TargetCount) -> Entity {
    Entity::from_parts(
        EntityId::new(),
        EntityKind::TrainingAid {
            center,
            target_count,
            body_length: AID_LENGTH,
        },
    )
}

pub fn target_rings(center: Point2) -> Entity {
    Entity::from_parts(
        EntityId::new(),
        EntityKind::TargetRings {
            center,
            ring_count: DEFAULT_RING_COUNT,
        },
    )
}

pub fn freeform(points: Vec<Point2>) -> CoreResult<Entity> {
    create_entity(EntityKind::FreeformShape { points })
}

/// 由实体参数生成图形树
pub fn build_shape(kind: &EntityKind) -> Shape {
    match kind {
        EntityKind::CueBall { center } => ball_shape(center, BallNumber::CUE),
        EntityKind::NumberedBall { center, number } => ball_shape(center, *number),
        EntityKind::StraightLine { start, end } => Shape::Line(line_segment(start, end)),
        EntityKind::ArrowLine { start, end } => arrow_shape(start, end),
        EntityKind::CircleMarker { center, radius } => Shape::Circle(Circle {
            center: *center,
            radius: *radius,
            style: Style::outlined(MARKER_COLOR, MARKER_WIDTH),
        }),
        EntityKind::RectangleMarker {
            center,
            width,
            height,
        } => Shape::Rect(Rect {
            origin: Point2::new(center.x - width / 2.0, center.y - height / 2.0),
            width: *width,
            height: *height,
            corner_radius: 0.0,
            style: Style::outlined(MARKER_COLOR, MARKER_WIDTH),
        }),
        EntityKind::AlignmentRail { center, length } => rail_shape(center, *length),
        EntityKind::TrainingAid {
            center,
            target_count,
            body_length,
        } => training_aid_shape(center, *target_count, *body_length),
        EntityKind::TargetRings { center, ring_count } => rings_shape(center, *ring_count),
        EntityKind::FreeformShape { points } => Shape::Path(Path {
            points: points.clone(),
            style: Style::outlined(LINE_COLOR, LINE_WIDTH),
        }),
    }
}

fn ball_shape(center: &Point2, number: BallNumber) -> Shape {
    let disk = |fill: Color, stroke: Color| {
        Shape::Circle(Circle {
            center: *center,
            radius: BALL_RADIUS,
            style: Style::outlined(stroke, BALL_OUTLINE_WIDTH).with_fill(fill),
        })
    };

    let mut children = match number.suit() {
        BallSuit::Cue => return Shape::group(vec![disk(Color::WHITE, Color::BLACK)]),
        BallSuit::Solid(i) => vec![disk(BALL_PALETTE[i], Color::BLACK)],
        BallSuit::Eight => vec![disk(Color::BLACK, Color::BLACK)],
        BallSuit::Stripe(i) => vec![
            disk(Color::WHITE, BALL_PALETTE[i]),
            Shape::Band(Band {
                center: *center,
                radius: BALL_RADIUS,
                height: 2.0 * BALL_RADIUS * STRIPE_BAND_RATIO,
                color: BALL_PALETTE[i],
            }),
        ],
    };
    children.push(Shape::Label(ball_label(center, number)));
    Shape::group(children)
}

/// 球号文字，两位数向左多偏移一些以保持居中
fn ball_label(center: &Point2, number: BallNumber) -> Label {
    let text = number.value().to_string();
    let dx = if text.len() > 1 { 8.0 } else { 5.0 };
    Label {
        position: Point2::new(center.x - dx, center.y - 8.0),
        text,
        font_size: BALL_LABEL_SIZE,
        color: Color::WHITE,
        bold: true,
        shadow: Some(Color::BLACK),
    }
}

fn line_segment(start: &Point2, end: &Point2) -> Line {
    Line {
        start: *start,
        end: *end,
        style: Style::outlined(LINE_COLOR, LINE_WIDTH),
    }
}

/// 箭头三角形：[尖端, 左后顶点, 右后顶点]
pub fn arrowhead(start: &Point2, end: &Point2) -> [Point2; 3] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let back = |theta: f64| *end - Vector2::new(theta.cos(), theta.sin()) * ARROWHEAD_LENGTH;
    [
        *end,
        back(angle - ARROWHEAD_ANGLE),
        back(angle + ARROWHEAD_ANGLE),
    ]
}

fn arrow_shape(start: &Point2, end: &Point2) -> Shape {
    Shape::group(vec![
        Shape::Line(line_segment(start, end)),
        Shape::Polygon(Polygon {
            points: arrowhead(start, end).to_vec(),
            style: Style::outlined(LINE_COLOR, 1.0).with_fill(LINE_COLOR),
        }),
    ])
}

fn rail_shape(center: &Point2, length: f64) -> Shape {
    let left = center.x - length / 2.0;
    let mut children = vec![Shape::Rect(Rect {
        origin: Point2::new(left, center.y - RAIL_WIDTH / 2.0),
        width: length,
        height: RAIL_WIDTH,
        corner_radius: RAIL_WIDTH / 2.0,
        style: Style::outlined(RAIL_STROKE, 2.0).with_fill(RAIL_FILL),
    })];

    // 每 50 一个标记，右端不在整数倍上时补一个
    let steps = (length / RAIL_MARK_SPACING).floor() as usize;
    let mut offsets: Vec<f64> = (0..=steps).map(|i| i as f64 * RAIL_MARK_SPACING).collect();
    if length - steps as f64 * RAIL_MARK_SPACING > EPSILON {
        offsets.push(length);
    }
    children.extend(offsets.into_iter().map(|dx| {
        Shape::Circle(Circle {
            center: Point2::new(left + dx, center.y),
            radius: RAIL_MARK_RADIUS,
            style: Style::outlined(Color::WHITE, 1.0).with_fill(Color::WHITE),
        })
    }));
    Shape::group(children)
}

/// 靶标三环半径（外环, 内环, 中心点），靶标越多越小
pub fn target_radii(count: TargetCount) -> (f64, f64, f64) {
    match count {
        TargetCount::Three => (20.0, 8.0, 3.0),
        TargetCount::Four => (16.0, 6.5, 2.5),
        TargetCount::Five => (13.0, 5.0, 2.0),
    }
}

/// 各靶标中心相对机身中心的水平偏移
pub fn target_offsets(count: TargetCount, body_length: f64) -> Vec<f64> {
    let n = count.count();
    let span = body_length - 2.0 * AID_TARGET_INSET;
    let step = span / (n - 1) as f64;
    (0..n).map(|i| -span / 2.0 + i as f64 * step).collect()
}

fn training_aid_shape(center: &Point2, count: TargetCount, body_length: f64) -> Shape {
    let half = body_length / 2.0;
    let mut children = vec![
        Shape::Rect(Rect {
            origin: Point2::new(center.x - half, center.y - AID_WIDTH / 2.0),
            width: body_length,
            height: AID_WIDTH,
            corner_radius: AID_WIDTH / 2.0,
            style: Style::outlined(AID_STROKE, 2.0).with_fill(AID_FILL),
        }),
        Shape::Line(Line {
            start: Point2::new(center.x - half, center.y),
            end: Point2::new(center.x + half, center.y),
            style: Style::outlined(AID_GUIDE, 2.0).with_dash(AID_DASH),
        }),
    ];

    let (outer, inner, dot) = target_radii(count);
    for offset in target_offsets(count, body_length) {
        let c = Point2::new(center.x + offset, center.y);
        children.push(Shape::group(vec![
            Shape::Circle(Circle {
                center: c,
                radius: outer,
                style: Style::outlined(Color::WHITE, 3.0),
            }),
            Shape::Circle(Circle {
                center: c,
                radius: inner,
                style: Style::outlined(AID_FILL, 2.0).with_fill(Color::WHITE),
            }),
            Shape::Circle(Circle {
                center: c,
                radius: dot,
                style: Style::outlined(AID_DOT, 1.0).with_fill(AID_DOT),
            }),
        ]));
    }
    Shape::group(children)
}

/// 同心靶环，由外到内绘制
fn rings_shape(center: &Point2, ring_count: u8) -> Shape {
    let k = ring_count as usize;
    Shape::group(
        (0..k)
            .map(|i| {
                Shape::Circle(Circle {
                    center: *center,
                    radius: (k - i) as f64 * RING_UNIT,
                    style: Style::filled(RING_COLORS[i % RING_COLORS.len()]),
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    fn primitives_of(entity: &Entity) -> Vec<Shape> {
        entity
            .shape_tree()
            .primitives()
            .into_iter()
            .cloned()
            .collect()
    }

    #[test]
    fn test_stripe_ball_nine() {
        let ball = ball(Point2::new(100.0, 100.0), 9).unwrap();
        let parts = primitives_of(&ball);
        assert_eq!(parts.len(), 3);

        match &parts[0] {
            Shape::Circle(c) => {
                assert_eq!(c.style.fill, Some(Color::WHITE));
                assert_eq!(c.style.stroke, Some(BALL_PALETTE[0]));
            }
            other => panic!("expected disk, got {}", other.type_name()),
        }
        match &parts[1] {
            Shape::Band(b) => {
                assert_eq!(b.color, BALL_PALETTE[0]);
                assert!((b.height - 24.0 * STRIPE_BAND_RATIO).abs() < EPSILON);
            }
            other => panic!("expected band, got {}", other.type_name()),
        }
        match &parts[2] {
            Shape::Label(l) => {
                assert_eq!(l.text, "9");
                assert_eq!(l.color, Color::WHITE);
                assert_eq!(l.position, Point2::new(95.0, 92.0));
            }
            other => panic!("expected label, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_solid_eight_and_cue() {
        let solid = primitives_of(&ball(Point2::origin(), 3).unwrap());
        assert!(matches!(&solid[0], Shape::Circle(c) if c.style.fill == Some(BALL_PALETTE[2])));
        assert_eq!(solid.len(), 2);

        let eight = primitives_of(&ball(Point2::origin(), 8).unwrap());
        assert!(matches!(&eight[0], Shape::Circle(c) if c.style.fill == Some(Color::BLACK)));
        assert!(matches!(&eight[1], Shape::Label(l) if l.text == "8" && l.color == Color::WHITE));

        let cue = ball(Point2::origin(), 0).unwrap();
        assert_eq!(cue.type_name(), "CueBall");
        let parts = primitives_of(&cue);
        assert_eq!(parts.len(), 1);
        assert!(matches!(&parts[0], Shape::Circle(c) if c.style.fill == Some(Color::WHITE)));
    }

    #[test]
    fn test_two_digit_label_offset() {
        let parts = primitives_of(&ball(Point2::new(50.0, 50.0), 15).unwrap());
        match parts.last() {
            Some(Shape::Label(l)) => {
                assert_eq!(l.text, "15");
                assert_eq!(l.position, Point2::new(42.0, 42.0));
            }
            _ => panic!("expected label"),
        }
    }

    #[test]
    fn test_invalid_ball_number() {
        assert!(matches!(
            ball(Point2::origin(), 16),
            Err(CoreError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_arrowhead_geometry() {
        let arrow = arrow_line(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        let parts = primitives_of(&arrow);
        let head = match &parts[1] {
            Shape::Polygon(p) => p.points.clone(),
            other => panic!("expected polygon, got {}", other.type_name()),
        };
        let tip = Point2::new(100.0, 0.0);
        assert_eq!(head[0], tip);
        for back in &head[1..] {
            let v = *back - tip;
            assert!((v.norm() - ARROWHEAD_LENGTH).abs() < 1e-9);
            // 与反向轴线的夹角为 30°
            let angle = (v.y.abs()).atan2(-v.x);
            assert!((angle - std::f64::consts::PI / 6.0).abs() < 1e-9);
        }
        assert!(head[1].y > 0.0 && head[2].y < 0.0);
    }

    #[test]
    fn test_build_shape_is_deterministic() {
        let kind = EntityKind::TrainingAid {
            center: Point2::new(450.0, 225.0),
            target_count: TargetCount::Four,
            body_length: AID_LENGTH,
        };
        assert_eq!(build_shape(&kind), build_shape(&kind));
    }

    #[test]
    fn test_training_aid_targets() {
        for count in [TargetCount::Three, TargetCount::Four, TargetCount::Five] {
            let aid = training_aid(Point2::new(0.0, 0.0), count);
            let parts = primitives_of(&aid);
            // 机身 + 中线 + 每个靶标三环
            assert_eq!(parts.len(), 2 + 3 * count.count());
            assert!(matches!(&parts[1], Shape::Line(l) if l.style.dash == Some([10.0, 5.0])));

            let offsets = target_offsets(count, AID_LENGTH);
            let (outer, _, _) = target_radii(count);
            for pair in offsets.windows(2) {
                assert!(pair[1] - pair[0] > 2.0 * outer);
            }
            // 对称分布
            assert!((offsets[0] + offsets[offsets.len() - 1]).abs() < EPSILON);
        }
        assert_eq!(target_offsets(TargetCount::Three, AID_LENGTH), vec![-120.0, 0.0, 120.0]);
    }

    #[test]
    fn test_short_training_aid_is_clamped() {
        let aid = create_entity(EntityKind::TrainingAid {
            center: Point2::origin(),
            target_count: TargetCount::Five,
            body_length: 100.0,
        })
        .unwrap();
        match aid.kind() {
            EntityKind::TrainingAid { body_length, .. } => {
                assert_eq!(*body_length, MIN_AID_LENGTH)
            }
            other => panic!("unexpected kind {}", other.type_name()),
        }
        let offsets = target_offsets(TargetCount::Five, MIN_AID_LENGTH);
        let (outer, _, _) = target_radii(TargetCount::Five);
        assert!(offsets[1] - offsets[0] > 2.0 * outer);
    }

    #[test]
    fn test_target_rings_outer_first() {
        let rings = target_rings(Point2::new(10.0, 10.0));
        let radii: Vec<f64> = primitives_of(&rings)
            .iter()
            .map(|s| match s {
                Shape::Circle(c) => c.radius,
                _ => panic!("expected circles"),
            })
            .collect();
        assert_eq!(radii, vec![3.0 * RING_UNIT, 2.0 * RING_UNIT, RING_UNIT]);
        assert!(rings.locked());

        assert!(create_entity(EntityKind::TargetRings {
            center: Point2::origin(),
            ring_count: 0,
        })
        .is_err());
    }

    #[test]
    fn test_alignment_rail_marks() {
        let rail = alignment_rail(Point2::new(450.0, 225.0));
        let parts = primitives_of(&rail);
        assert_eq!(parts.len(), 1 + 9);
        let bbox = rail.bounding_box();
        // 两端标记点会超出机身
        assert!((bbox.width() - (RAIL_LENGTH + 2.0 * RAIL_MARK_RADIUS)).abs() < EPSILON);
        assert!((bbox.height() - RAIL_WIDTH).abs() < EPSILON);
    }

    #[test]
    fn test_rail_marks_cover_both_ends() {
        let rail = create_entity(EntityKind::AlignmentRail {
            center: Point2::new(100.0, 0.0),
            length: 120.0,
        })
        .unwrap();
        let marks: Vec<f64> = primitives_of(&rail)
            .iter()
            .filter_map(|s| match s {
                Shape::Circle(c) => Some(c.center.x),
                _ => None,
            })
            .collect();
        assert_eq!(marks, vec![40.0, 90.0, 140.0, 160.0]);
    }

    #[test]
    fn test_oversized_rail_rejected() {
        for length in [MAX_RAIL_LENGTH + 1.0, 5e7, 1e12] {
            assert!(matches!(
                create_entity(EntityKind::AlignmentRail {
                    center: Point2::origin(),
                    length,
                }),
                Err(CoreError::InvalidParameter(_))
            ));
        }
        assert!(create_entity(EntityKind::AlignmentRail {
            center: Point2::origin(),
            length: MAX_RAIL_LENGTH,
        })
        .is_ok());
    }

    #[test]
    fn test_freeform_needs_two_points() {
        assert!(freeform(vec![Point2::origin()]).is_err());
        let path = freeform(vec![Point2::origin(), Point2::new(5.0, 5.0)]).unwrap();
        assert_eq!(path.position(), Point2::origin());
    }
}
