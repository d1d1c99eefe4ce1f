//! 场景文件（.cuedrill.json）读写

use crate::document::{from_json, to_json};
use crate::error::FileError;
use cuedrill_core::scene::Scene;
use std::fs;
use std::path::Path;

/// 文件扩展名
pub const FILE_EXTENSION: &str = "cuedrill.json";

/// 保存场景到文件
pub fn save(scene: &Scene, path: &Path) -> Result<(), FileError> {
    let json = to_json(scene)?;
    fs::write(path, json.as_bytes())?;
    tracing::info!("Saved {} entities to {}", scene.len(), path.display());
    Ok(())
}

/// 从文件加载场景
pub fn load(path: &Path) -> Result<Scene, FileError> {
    let json = fs::read_to_string(path)?;
    let scene = from_json(&json)?;
    tracing::info!("Loaded {} entities from {}", scene.len(), path.display());
    Ok(scene)
}
