//! 场景文档格式
//!
//! JSON 文档只保存实体的语义参数，加载时经过实体工厂重新校验和生成图形，
//! 因此格式升级后重新保存仍能得到正确的几何。
//!
//! ```json
//! {
//!   "version": 1,
//!   "background_color": "#8B0000",
//!   "width": 900.0,
//!   "height": 450.0,
//!   "entities": [
//!     { "id": "a1", "kind": "numbered_ball", "center": [100.0, 100.0], "number": 9 }
//!   ]
//! }
//! ```

use crate::error::FileError;
use cuedrill_core::color::Color;
use cuedrill_core::entity::{BallNumber, Entity, EntityId, EntityKind, TargetCount};
use cuedrill_core::factory;
use cuedrill_core::math::Point2;
use cuedrill_core::scene::{Scene, TABLE_HEIGHT, TABLE_WIDTH};
use serde::{Deserialize, Serialize};

/// 当前文档格式版本
pub const FORMAT_VERSION: u32 = 1;

/// 场景文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// 旧文档没有版本字段，按版本 1 处理
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_background")]
    pub background_color: Color,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    pub entities: Vec<EntityRecord>,
}

fn default_version() -> u32 {
    1
}

fn default_background() -> Color {
    Color::FELT
}

fn default_width() -> f64 {
    TABLE_WIDTH
}

fn default_height() -> f64 {
    TABLE_HEIGHT
}

fn default_scale() -> f64 {
    1.0
}

fn is_unit_scale(scale: &f64) -> bool {
    *scale == 1.0
}

/// 单个实体记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default = "default_scale", skip_serializing_if = "is_unit_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale", skip_serializing_if = "is_unit_scale")]
    pub scale_y: f64,
    #[serde(flatten)]
    pub kind: KindRecord,
}

/// 按 `kind` 字段区分的实体参数，坐标保存为 `[x, y]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindRecord {
    CueBall {
        center: [f64; 2],
    },
    NumberedBall {
        center: [f64; 2],
        number: BallNumber,
    },
    StraightLine {
        start: [f64; 2],
        end: [f64; 2],
    },
    ArrowLine {
        start: [f64; 2],
        end: [f64; 2],
    },
    CircleMarker {
        center: [f64; 2],
        radius: f64,
    },
    RectangleMarker {
        center: [f64; 2],
        width: f64,
        height: f64,
    },
    AlignmentRail {
        center: [f64; 2],
        length: f64,
    },
    TrainingAid {
        center: [f64; 2],
        target_count: TargetCount,
        body_length: f64,
    },
    TargetRings {
        center: [f64; 2],
        ring_count: u8,
    },
    FreeformShape {
        points: Vec<[f64; 2]>,
    },
}

fn pt(p: &Point2) -> [f64; 2] {
    [p.x, p.y]
}

fn point([x, y]: [f64; 2]) -> Point2 {
    Point2::new(x, y)
}

impl From<&EntityKind> for KindRecord {
    fn from(kind: &EntityKind) -> Self {
        match kind {
            EntityKind::CueBall { center } => KindRecord::CueBall { center: pt(center) },
            EntityKind::NumberedBall { center, number } => KindRecord::NumberedBall {
                center: pt(center),
                number: *number,
            },
            EntityKind::StraightLine { start, end } => KindRecord::StraightLine {
                start: pt(start),
                end: pt(end),
            },
            EntityKind::ArrowLine { start, end } => KindRecord::ArrowLine {
                start: pt(start),
                end: pt(end),
            },
            EntityKind::CircleMarker { center, radius } => KindRecord::CircleMarker {
                center: pt(center),
                radius: *radius,
            },
            EntityKind::RectangleMarker {
                center,
                width,
                height,
            } => KindRecord::RectangleMarker {
                center: pt(center),
                width: *width,
                height: *height,
            },
            EntityKind::AlignmentRail { center, length } => KindRecord::AlignmentRail {
                center: pt(center),
                length: *length,
            },
            EntityKind::TrainingAid {
                center,
                target_count,
                body_length,
            } => KindRecord::TrainingAid {
                center: pt(center),
                target_count: *target_count,
                body_length: *body_length,
            },
            EntityKind::TargetRings { center, ring_count } => KindRecord::TargetRings {
                center: pt(center),
                ring_count: *ring_count,
            },
            EntityKind::FreeformShape { points } => KindRecord::FreeformShape {
                points: points.iter().map(pt).collect(),
            },
        }
    }
}

impl From<KindRecord> for EntityKind {
    fn from(record: KindRecord) -> Self {
        match record {
            KindRecord::CueBall { center } => EntityKind::CueBall {
                center: point(center),
            },
            KindRecord::NumberedBall { center, number } => EntityKind::NumberedBall {
                center: point(center),
                number,
            },
            KindRecord::StraightLine { start, end } => EntityKind::StraightLine {
                start: point(start),
                end: point(end),
            },
            KindRecord::ArrowLine { start, end } => EntityKind::ArrowLine {
                start: point(start),
                end: point(end),
            },
            KindRecord::CircleMarker { center, radius } => EntityKind::CircleMarker {
                center: point(center),
                radius,
            },
            KindRecord::RectangleMarker {
                center,
                width,
                height,
            } => EntityKind::RectangleMarker {
                center: point(center),
                width,
                height,
            },
            KindRecord::AlignmentRail { center, length } => EntityKind::AlignmentRail {
                center: point(center),
                length,
            },
            KindRecord::TrainingAid {
                center,
                target_count,
                body_length,
            } => EntityKind::TrainingAid {
                center: point(center),
                target_count,
                body_length,
            },
            KindRecord::TargetRings { center, ring_count } => EntityKind::TargetRings {
                center: point(center),
                ring_count,
            },
            KindRecord::FreeformShape { points } => EntityKind::FreeformShape {
                points: points.into_iter().map(point).collect(),
            },
        }
    }
}

impl From<&Entity> for EntityRecord {
    fn from(entity: &Entity) -> Self {
        let (scale_x, scale_y) = entity.scale();
        Self {
            id: entity.id().to_string(),
            scale_x,
            scale_y,
            kind: KindRecord::from(entity.kind()),
        }
    }
}

impl EntityRecord {
    /// 经工厂校验重建实体，参数不合法时报告文档损坏
    pub fn into_entity(self) -> Result<Entity, FileError> {
        if self.id.trim().is_empty() {
            return Err(FileError::CorruptDocument("entity id is empty".into()));
        }
        let id = EntityId::from_raw(self.id);
        let corrupt = |e: cuedrill_core::error::CoreError| {
            FileError::CorruptDocument(format!("entity {}: {}", id, e))
        };

        factory::create_entity_with_id(id.clone(), self.kind.into())
            .and_then(|entity| entity.with_scale(self.scale_x, self.scale_y))
            .map_err(corrupt)
    }
}

impl SceneDocument {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            version: FORMAT_VERSION,
            background_color: scene.background_color(),
            width: scene.width(),
            height: scene.height(),
            entities: scene.iter().map(EntityRecord::from).collect(),
        }
    }

    /// 重建场景；任何一条记录失败则整体失败
    pub fn into_scene(self) -> Result<Scene, FileError> {
        if self.version > FORMAT_VERSION {
            return Err(FileError::UnsupportedVersion(format!(
                "Document version {} is newer than supported version {}",
                self.version, FORMAT_VERSION
            )));
        }
        if self.width != TABLE_WIDTH || self.height != TABLE_HEIGHT {
            tracing::warn!(
                "Document canvas {}x{} differs from {}x{}, using the fixed table size",
                self.width,
                self.height,
                TABLE_WIDTH,
                TABLE_HEIGHT
            );
        }

        let entities = self
            .entities
            .into_iter()
            .map(EntityRecord::into_entity)
            .collect::<Result<Vec<_>, _>>()?;
        let mut scene = Scene::from_entities(entities)
            .map_err(|e| FileError::CorruptDocument(e.to_string()))?;
        scene.set_background_color(self.background_color);
        Ok(scene)
    }
}

/// 场景 → 文档
pub fn serialize(scene: &Scene) -> SceneDocument {
    SceneDocument::from_scene(scene)
}

/// 文档 → 场景
pub fn deserialize(document: SceneDocument) -> Result<Scene, FileError> {
    document.into_scene()
}

/// 编码为 JSON 文本
pub fn to_json(scene: &Scene) -> Result<String, FileError> {
    let json = serde_json::to_string_pretty(&serialize(scene))?;
    tracing::info!("Encoded {} entities ({} bytes)", scene.len(), json.len());
    Ok(json)
}

/// 从 JSON 文本解码
///
/// 先检查版本再解析实体，新版本文档报告 `UnsupportedVersion` 而不是损坏。
pub fn from_json(json: &str) -> Result<Scene, FileError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| FileError::CorruptDocument(format!("malformed JSON: {}", e)))?;

    if let Some(version) = value.get("version").and_then(serde_json::Value::as_u64) {
        if version > u64::from(FORMAT_VERSION) {
            return Err(FileError::UnsupportedVersion(format!(
                "Document version {} is newer than supported version {}",
                version, FORMAT_VERSION
            )));
        }
    }

    let document: SceneDocument = serde_json::from_value(value)
        .map_err(|e| FileError::CorruptDocument(e.to_string()))?;
    let scene = deserialize(document)?;
    tracing::info!("Decoded {} entities", scene.len());
    Ok(scene)
}

/// 解码并替换目标场景；失败时目标保持不变
pub fn load_into(target: &mut Scene, json: &str) -> Result<(), FileError> {
    let scene = from_json(json)?;
    target.replace_with(scene);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(factory::cue_ball(Point2::new(100.0, 100.0))).unwrap();
        scene
            .add(factory::ball(Point2::new(150.0, 120.0), 9).unwrap())
            .unwrap();
        scene
            .add(factory::ball(Point2::new(180.0, 120.0), 8).unwrap())
            .unwrap();
        scene
            .add(factory::straight_line(
                Point2::new(0.0, 0.0),
                Point2::new(300.0, 200.0),
            ))
            .unwrap();
        scene
            .add(factory::arrow_line(
                Point2::new(10.0, 400.0),
                Point2::new(600.0, 50.0),
            ))
            .unwrap();
        scene
            .add(factory::circle_marker(Point2::new(700.0, 300.0)))
            .unwrap();
        scene
            .add(
                factory::rectangle_marker(Point2::new(400.0, 300.0))
                    .with_scale(2.0, 0.5)
                    .unwrap(),
            )
            .unwrap();
        scene
            .add(factory::alignment_rail(Point2::new(450.0, 50.0)))
            .unwrap();
        scene
            .add(factory::training_aid(
                Point2::new(450.0, 225.0),
                TargetCount::Four,
            ))
            .unwrap();
        scene
            .add(factory::target_rings(Point2::new(800.0, 100.0)))
            .unwrap();
        scene
            .add(
                factory::freeform(vec![
                    Point2::new(5.0, 5.0),
                    Point2::new(25.5, 40.25),
                    Point2::new(60.0, 10.0),
                ])
                .unwrap(),
            )
            .unwrap();
        scene.set_background_color(Color::rgb(0x1F, 0x4E, 0x3D));
        scene
    }

    #[test]
    fn test_roundtrip_preserves_entities_and_order() {
        let scene = full_scene();
        let json = to_json(&scene).unwrap();
        let decoded = from_json(&json).unwrap();

        assert_eq!(decoded.len(), scene.len());
        assert_eq!(decoded.all(), scene.all());
        assert_eq!(decoded.background_color(), scene.background_color());
        assert_eq!(decoded.bounding_box(), scene.bounding_box());
    }

    /// xorshift64，生成 [0, 1) 的伪随机数
    fn xorshift(state: &mut u64) -> f64 {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        (*state >> 11) as f64 / (1u64 << 53) as f64
    }

    #[test]
    fn test_roundtrip_arbitrary_coordinates() {
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = |scale: f64| xorshift(&mut state) * scale;

        let mut scene = Scene::new();
        for _ in 0..500 {
            scene
                .add(factory::straight_line(
                    Point2::new(next(900.0), next(450.0)),
                    Point2::new(next(900.0), next(450.0)),
                ))
                .unwrap();
        }
        scene
            .add(
                factory::rectangle_marker(Point2::new(next(900.0), next(450.0)))
                    .with_scale(0.5 + next(2.0), 0.5 + next(2.0))
                    .unwrap(),
            )
            .unwrap();
        scene
            .add(
                factory::target_rings(Point2::new(next(900.0), next(450.0)))
                    .with_scale(0.5 + next(2.0), 0.5 + next(2.0))
                    .unwrap(),
            )
            .unwrap();
        scene
            .add(factory::freeform((0..50).map(|_| Point2::new(next(900.0), next(450.0))).collect()).unwrap())
            .unwrap();

        let decoded = from_json(&to_json(&scene).unwrap()).unwrap();
        assert_eq!(decoded.all(), scene.all());
    }

    #[test]
    fn test_document_layout() {
        let mut scene = Scene::new();
        let ball = factory::create_entity_with_id(
            EntityId::from("b9"),
            EntityKind::NumberedBall {
                center: Point2::new(100.0, 100.0),
                number: BallNumber::new(9).unwrap(),
            },
        )
        .unwrap();
        scene.add(ball).unwrap();

        let value = serde_json::to_value(serialize(&scene)).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["background_color"], "#8B0000");
        let record = &value["entities"][0];
        assert_eq!(record["id"], "b9");
        assert_eq!(record["kind"], "numbered_ball");
        assert_eq!(record["number"], 9);
        assert_eq!(record["center"], serde_json::json!([100.0, 100.0]));
        assert!(record.get("scale_x").is_none());
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let json = r#"{
            "entities": [
                { "id": "a", "kind": "cue_ball", "center": [10, 20] },
                { "id": "b", "kind": "target_rings", "center": [50, 50], "ring_count": 2, "scale_x": 2, "scale_y": 2 }
            ]
        }"#;
        let scene = from_json(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.background_color(), Color::FELT);
        let rings = scene.get(&EntityId::from("b")).unwrap();
        assert_eq!(rings.scale(), (2.0, 2.0));
        assert_eq!(rings.position(), Point2::new(50.0, 50.0));
    }

    #[test]
    fn test_unknown_kind_leaves_target_untouched() {
        let mut target = Scene::new();
        let existing = target.add(factory::cue_ball(Point2::new(1.0, 1.0))).unwrap();

        let json = r#"{
            "version": 1,
            "entities": [
                { "id": "ok", "kind": "cue_ball", "center": [100, 100] },
                { "id": "bad", "kind": "laser_pointer", "center": [0, 0] }
            ]
        }"#;
        let result = load_into(&mut target, json);
        assert!(matches!(result, Err(FileError::CorruptDocument(_))));
        assert_eq!(target.len(), 1);
        assert!(target.contains(&existing));
        assert!(!target.contains(&EntityId::from("ok")));
    }

    #[test]
    fn test_corrupt_documents() {
        let cases = [
            // 缺少字段
            r#"{ "entities": [ { "id": "a", "kind": "numbered_ball", "center": [0, 0] } ] }"#,
            // 球号越界
            r#"{ "entities": [ { "id": "a", "kind": "numbered_ball", "center": [0, 0], "number": 16 } ] }"#,
            // 靶标数量不合法
            r#"{ "entities": [ { "id": "a", "kind": "training_aid", "center": [0, 0], "target_count": 6, "body_length": 350 } ] }"#,
            // 圈数超出范围
            r#"{ "entities": [ { "id": "a", "kind": "target_rings", "center": [0, 0], "ring_count": 9 } ] }"#,
            // 库边过长
            r#"{ "entities": [ { "id": "a", "kind": "alignment_rail", "center": [0, 0], "length": 5e7 } ] }"#,
            // 半径非正
            r#"{ "entities": [ { "id": "a", "kind": "circle_marker", "center": [0, 0], "radius": 0 } ] }"#,
            // 重复ID
            r#"{ "entities": [
                { "id": "a", "kind": "cue_ball", "center": [0, 0] },
                { "id": "a", "kind": "cue_ball", "center": [5, 5] } ] }"#,
            // 空ID
            r#"{ "entities": [ { "id": " ", "kind": "cue_ball", "center": [0, 0] } ] }"#,
            // 颜色无效
            r##"{ "background_color": "#XYZXYZ", "entities": [] }"##,
            // 不是 JSON
            "{ entities: ",
        ];
        for json in cases {
            assert!(
                matches!(from_json(json), Err(FileError::CorruptDocument(_))),
                "expected CorruptDocument for {}",
                json
            );
        }
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = r#"{ "version": 7, "entities": [ { "id": "x", "kind": "hologram" } ] }"#;
        assert!(matches!(
            from_json(json),
            Err(FileError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_locked_scale_normalized_on_load() {
        let json = r#"{ "entities": [
            { "id": "c", "kind": "circle_marker", "center": [10, 10], "radius": 25, "scale_x": 4, "scale_y": 1 }
        ] }"#;
        let scene = from_json(json).unwrap();
        assert_eq!(scene.get(&EntityId::from("c")).unwrap().scale(), (2.0, 2.0));
    }
}
