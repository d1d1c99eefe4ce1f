//! 场景
//!
//! 实体按插入顺序保存，顺序即绘制顺序（后插入的在上层）。
//! 场景按值拥有全部实体，渲染端只拿到只读视图；
//! 编辑器和投影各自持有独立的场景实例。

use crate::color::Color;
use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::math::{BoundingBox2, Point2, Vector2};
use std::collections::HashMap;

/// 设计画布宽度（9尺台 2:1 比例）
pub const TABLE_WIDTH: f64 = 900.0;
/// 设计画布高度
pub const TABLE_HEIGHT: f64 = 450.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    entities: Vec<Entity>,
    /// ID -> 在 `entities` 中的下标
    index: HashMap<EntityId, usize>,
    background_color: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            background_color: Color::FELT,
        }
    }

    /// 由实体序列创建，遇到重复ID则整体失败
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> CoreResult<Self> {
        let mut scene = Self::new();
        for entity in entities {
            scene.add(entity)?;
        }
        Ok(scene)
    }

    pub fn width(&self) -> f64 {
        TABLE_WIDTH
    }

    pub fn height(&self) -> f64 {
        TABLE_HEIGHT
    }

    /// 设计画布的包围盒
    pub fn canvas_bounds(&self) -> BoundingBox2 {
        BoundingBox2::new(Point2::origin(), Point2::new(TABLE_WIDTH, TABLE_HEIGHT))
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// 添加实体到最上层
    ///
    /// 含非有限坐标的实体被拒绝，否则无法写入文档。
    pub fn add(&mut self, entity: Entity) -> CoreResult<EntityId> {
        let id = entity.id().clone();
        if self.index.contains_key(&id) {
            return Err(CoreError::DuplicateEntity(id.to_string()));
        }
        if !entity.kind().is_finite() {
            return Err(CoreError::InvalidParameter(format!(
                "{} {} has non-finite geometry",
                entity.type_name(),
                id
            )));
        }
        tracing::debug!("Adding {} {} at z={}", entity.type_name(), id, self.entities.len());
        self.index.insert(id.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(id)
    }

    /// 删除实体；未知ID不做任何事
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let position = self.index.remove(id)?;
        let removed = self.entities.remove(position);
        self.reindex_from(position);
        tracing::debug!("Removed {} {}", removed.type_name(), id);
        Some(removed)
    }

    /// 恢复到初始空场景（包括背景色）
    pub fn clear(&mut self) {
        let count = self.entities.len();
        *self = Self::new();
        tracing::info!("Cleared scene ({} entities)", count);
    }

    /// 整体替换为另一个场景（加载练习）
    pub fn replace_with(&mut self, other: Scene) {
        *self = other;
    }

    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        let i = *self.index.get(id)?;
        self.entities.get_mut(i)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// 绘制层级（等于当前下标）
    pub fn z_order(&self, id: &EntityId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// 全部实体的包围盒；空场景返回空包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        self.entities
            .iter()
            .fold(BoundingBox2::empty(), |acc, e| acc.union(&e.bounding_box()))
    }

    /// 指定实体子集的包围盒，忽略未知ID
    pub fn bounding_box_of(&self, ids: &[EntityId]) -> BoundingBox2 {
        ids.iter()
            .filter_map(|id| self.get(id))
            .fold(BoundingBox2::empty(), |acc, e| acc.union(&e.bounding_box()))
    }

    /// 范围查询：包围盒与 `rect` 相交的实体，按绘制顺序
    pub fn query_rect(&self, rect: &BoundingBox2) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.bounding_box().intersects(rect))
            .collect()
    }

    /// 点击测试：返回最上层包含该点的实体
    pub fn hit_test(&self, point: &Point2) -> Option<&Entity> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.bounding_box().contains(point))
    }

    /// 移动实体（拖动）；非有限位移不做任何事
    pub fn translate(&mut self, id: &EntityId, delta: &Vector2) -> bool {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return false;
        }
        match self.index.get(id) {
            Some(&i) => {
                self.entities[i].translate(delta);
                true
            }
            None => false,
        }
    }

    /// 设置实体缩放；锁定实体自动保持等比
    pub fn set_scale(&mut self, id: &EntityId, sx: f64, sy: f64) -> CoreResult<bool> {
        match self.index.get(id) {
            Some(&i) => {
                self.entities[i].set_scale(sx, sy)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn bring_to_front(&mut self, id: &EntityId) -> bool {
        let Some(position) = self.index.get(id).copied() else {
            return false;
        };
        let entity = self.entities.remove(position);
        self.entities.push(entity);
        self.reindex_from(position);
        true
    }

    pub fn send_to_back(&mut self, id: &EntityId) -> bool {
        let Some(position) = self.index.get(id).copied() else {
            return false;
        };
        let entity = self.entities.remove(position);
        self.entities.insert(0, entity);
        self.reindex_from(0);
        true
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, entity) in self.entities.iter().enumerate().skip(start) {
            self.index.insert(entity.id().clone(), i);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    fn sample_scene() -> (Scene, Vec<EntityId>) {
        let mut scene = Scene::new();
        let ids = vec![
            scene.add(factory::cue_ball(Point2::new(100.0, 100.0))).unwrap(),
            scene
                .add(factory::ball(Point2::new(300.0, 200.0), 9).unwrap())
                .unwrap(),
            scene
                .add(factory::straight_line(
                    Point2::new(100.0, 100.0),
                    Point2::new(600.0, 300.0),
                ))
                .unwrap(),
        ];
        (scene, ids)
    }

    #[test]
    fn test_add_remove_and_order() {
        let (mut scene, ids) = sample_scene();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.z_order(&ids[2]), Some(2));

        assert!(scene.remove(&ids[0]).is_some());
        assert_eq!(scene.z_order(&ids[1]), Some(0));
        assert_eq!(scene.z_order(&ids[2]), Some(1));

        // 重复删除是空操作
        assert!(scene.remove(&ids[0]).is_none());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut scene = Scene::new();
        let ball = factory::cue_ball(Point2::new(10.0, 10.0));
        scene.add(ball.clone()).unwrap();
        assert!(matches!(
            scene.add(ball),
            Err(CoreError::DuplicateEntity(_))
        ));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_bounding_box_monotonic() {
        let mut scene = Scene::new();
        assert!(scene.bounding_box().is_empty());

        let first = scene.add(factory::cue_ball(Point2::new(100.0, 100.0))).unwrap();
        let before = scene.bounding_box();
        assert_eq!(before.min, Point2::new(88.0, 88.0));
        assert_eq!(before.max, Point2::new(112.0, 112.0));

        scene
            .add(factory::circle_marker(Point2::new(500.0, 300.0)))
            .unwrap();
        let after = scene.bounding_box();
        assert!(after.contains_box(&before));

        let mut only = Scene::new();
        only.add(factory::cue_ball(Point2::new(1.0, 1.0))).unwrap();
        let id = only.all()[0].id().clone();
        only.remove(&id);
        assert!(only.bounding_box().is_empty());
        assert!(scene.contains(&first));
    }

    #[test]
    fn test_bounding_box_of_subset() {
        let (scene, ids) = sample_scene();
        let bbox = scene.bounding_box_of(&[ids[1].clone(), EntityId::from("missing")]);
        assert_eq!(bbox.min, Point2::new(288.0, 188.0));
        assert_eq!(bbox.max, Point2::new(312.0, 212.0));
    }

    #[test]
    fn test_clear_resets_background() {
        let (mut scene, _) = sample_scene();
        scene.set_background_color(Color::BLACK);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.background_color(), Color::FELT);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let (mut scene, ids) = sample_scene();
        // 母球与线段起点重合，线段在上层
        let hit = scene.hit_test(&Point2::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.id(), &ids[2]);

        assert!(scene.bring_to_front(&ids[0]));
        let hit = scene.hit_test(&Point2::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.id(), &ids[0]);
        assert_eq!(scene.z_order(&ids[0]), Some(2));

        assert!(scene.send_to_back(&ids[0]));
        assert_eq!(scene.z_order(&ids[0]), Some(0));
        assert!(!scene.bring_to_front(&EntityId::from("missing")));
    }

    #[test]
    fn test_query_rect_and_translate() {
        let (mut scene, ids) = sample_scene();
        let area = BoundingBox2::new(Point2::new(280.0, 180.0), Point2::new(320.0, 220.0));
        let found: Vec<_> = scene.query_rect(&area).iter().map(|e| e.id().clone()).collect();
        assert_eq!(found, vec![ids[1].clone(), ids[2].clone()]);

        assert!(scene.translate(&ids[1], &Vector2::new(10.0, 0.0)));
        assert_eq!(scene.get(&ids[1]).unwrap().position(), Point2::new(310.0, 200.0));
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let mut scene = Scene::new();
        let cases = [
            factory::cue_ball(Point2::new(f64::NAN, 10.0)),
            factory::straight_line(Point2::origin(), Point2::new(f64::INFINITY, 0.0)),
            factory::arrow_line(Point2::new(0.0, f64::NEG_INFINITY), Point2::origin()),
            factory::circle_marker(Point2::new(f64::NAN, f64::NAN)),
        ];
        for entity in cases {
            assert!(matches!(
                scene.add(entity),
                Err(CoreError::InvalidParameter(_))
            ));
        }
        assert!(scene.is_empty());

        let id = scene.add(factory::cue_ball(Point2::new(10.0, 10.0))).unwrap();
        assert!(!scene.translate(&id, &Vector2::new(f64::NAN, 0.0)));
        assert_eq!(scene.get(&id).unwrap().position(), Point2::new(10.0, 10.0));
    }

    #[test]
    fn test_locked_scale_through_scene() {
        let (mut scene, ids) = sample_scene();
        assert!(scene.set_scale(&ids[1], 2.0, 0.5).unwrap());
        assert_eq!(scene.get(&ids[1]).unwrap().scale(), (1.0, 1.0));
        assert!(!scene.set_scale(&EntityId::from("missing"), 2.0, 2.0).unwrap());
    }
}
