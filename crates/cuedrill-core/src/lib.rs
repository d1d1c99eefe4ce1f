//! CueDrill 核心引擎
//!
//! 台球练习场景的实体模型和坐标变换。
//!
//! # 架构设计
//!
//! - `Entity`: 带唯一ID的台面对象（球、线、标记、训练器等）
//! - `factory`: 校验参数并把实体分解为图形树 (`Shape`)
//! - `Scene`: 按绘制顺序保存实体
//! - `viewport`: 把场景适配到任意尺寸的投影画面
//!
//! # 示例
//!
//! ```rust
//! use cuedrill_core::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.add(factory::cue_ball(Point2::new(100.0, 100.0))).unwrap();
//! scene.add(factory::ball(Point2::new(500.0, 300.0), 9).unwrap()).unwrap();
//!
//! // 适配到 1080p 画面
//! let transform = fit(&scene.bounding_box(), 1920.0, 1080.0, 1.0, 0.1);
//! println!("Scale: {}", transform.uniform_scale());
//! ```

pub mod color;
pub mod config;
pub mod entity;
pub mod error;
pub mod factory;
pub mod history;
pub mod math;
pub mod projector;
pub mod scene;
pub mod shape;
pub mod table;
pub mod transform;
pub mod viewport;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::color::Color;
    pub use crate::config::{Config, HistoryConfig, ViewportConfig};
    pub use crate::entity::{BallNumber, BallSuit, Entity, EntityId, EntityKind, TargetCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::factory;
    pub use crate::history::SceneHistory;
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::projector::{ProjectionBackground, Projector};
    pub use crate::scene::{Scene, TABLE_HEIGHT, TABLE_WIDTH};
    pub use crate::shape::{Shape, Style};
    pub use crate::table::TableLayout;
    pub use crate::transform::AffineTransform;
    pub use crate::viewport::{
        fit, project_entity, project_scene, FitMode, Placement, RenderItem, SurfaceSize,
        ViewportFitter,
    };
}
