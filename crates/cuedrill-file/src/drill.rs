//! 练习记录
//!
//! 一个练习 = 名称、分类和场景文档。存储、多用户访问由外部负责，
//! 这里只定义记录结构和批量导入导出格式。

use crate::document::{serialize, SceneDocument};
use crate::error::FileError;
use chrono::{DateTime, Utc};
use cuedrill_core::scene::Scene;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillCategory {
    Positioning,
    Breaking,
    #[default]
    Practice,
    Training,
    Other,
}

impl DrillCategory {
    pub const ALL: [DrillCategory; 5] = [
        DrillCategory::Positioning,
        DrillCategory::Breaking,
        DrillCategory::Practice,
        DrillCategory::Training,
        DrillCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DrillCategory::Positioning => "Positioning",
            DrillCategory::Breaking => "Breaking",
            DrillCategory::Practice => "Practice",
            DrillCategory::Training => "Training",
            DrillCategory::Other => "Other",
        }
    }
}

impl fmt::Display for DrillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: DrillCategory,
    pub scene_document: SceneDocument,
    /// 缩略图（data URL）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DrillRecord {
    /// 创建练习；名称去除首尾空白后不能为空
    pub fn new(
        name: &str,
        description: &str,
        category: DrillCategory,
        scene: &Scene,
    ) -> Result<Self, FileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FileError::InvalidDrill("drill name is empty".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.trim().to_string(),
            category,
            scene_document: serialize(scene),
            thumbnail: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_scene(&mut self, scene: &Scene) {
        self.scene_document = serialize(scene);
        self.updated_at = Utc::now();
    }

    /// 重建场景（经过完整校验）
    pub fn scene(&self) -> Result<Scene, FileError> {
        self.scene_document.clone().into_scene()
    }

    pub fn to_json(&self) -> Result<String, FileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FileError> {
        let record: DrillRecord = serde_json::from_str(json)
            .map_err(|e| FileError::CorruptDocument(e.to_string()))?;
        record.scene()?;
        Ok(record)
    }
}

/// 批量导出为 JSON 数组
pub fn export_drills(drills: &[DrillRecord]) -> Result<String, FileError> {
    let json = serde_json::to_string_pretty(drills)?;
    tracing::info!("Exported {} drills", drills.len());
    Ok(json)
}

/// 批量导入
///
/// 导入的练习重新分配ID，避免与已有练习冲突；任何一条场景无效则整体失败。
pub fn import_drills(json: &str) -> Result<Vec<DrillRecord>, FileError> {
    let mut drills: Vec<DrillRecord> = serde_json::from_str(json)
        .map_err(|e| FileError::CorruptDocument(e.to_string()))?;
    for drill in &mut drills {
        drill.scene()?;
        drill.id = Uuid::new_v4();
    }
    tracing::info!("Imported {} drills", drills.len());
    Ok(drills)
}
