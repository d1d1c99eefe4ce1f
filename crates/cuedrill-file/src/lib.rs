//! CueDrill 文件格式处理
//!
//! 支持：
//! - 场景文档（JSON，经实体工厂校验加载）
//! - `.cuedrill.json` 场景文件
//! - 练习记录及批量导入导出

pub mod document;
pub mod drill;
pub mod error;
pub mod native;

pub use document::{
    deserialize, from_json, load_into, serialize, to_json, EntityRecord, KindRecord,
    SceneDocument, FORMAT_VERSION,
};
pub use drill::{export_drills, import_drills, DrillCategory, DrillRecord};
pub use error::FileError;
