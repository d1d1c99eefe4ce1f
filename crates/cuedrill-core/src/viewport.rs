//! 视口适配引擎
//!
//! 根据场景内容的包围盒、目标画面尺寸和缩放级别，计算把内容居中
//! 并等比缩放到画面内的变换。
//!
//! 引擎是纯函数：每次都从当前输入完整重算，不在上一次结果上累加，
//! 因此反复调整窗口大小不会产生漂移，重复调用也没有副作用。

use crate::config::ViewportConfig;
use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::math::{BoundingBox2, Point2, EPSILON};
use crate::scene::Scene;
use crate::shape::Shape;
use crate::transform::AffineTransform;
use serde::{Deserialize, Serialize};

/// 投影画面尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// 适配对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitMode {
    /// 按内容包围盒适配（带留白）
    #[default]
    Content,
    /// 按整个 900×450 设计画布适配（无留白）
    Table,
}

/// 单个实体的投影位置与缩放（逐实体重映射方式）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: EntityId,
    pub position: Point2,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// 交给渲染端的已变换图形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    /// 台面装饰没有ID
    pub id: Option<EntityId>,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportFitter {
    config: ViewportConfig,
}

impl ViewportFitter {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// 计算内容适配变换
    ///
    /// 空包围盒或无效画面尺寸返回单位变换；宽或高为零的内容
    /// 以 `min_content_extent` 代替，避免除零。
    pub fn fit(&self, bounds: &BoundingBox2, surface: SurfaceSize, zoom: f64) -> AffineTransform {
        self.fit_with_padding(bounds, surface, zoom, self.config.padding_ratio)
    }

    /// 按模式适配场景
    pub fn fit_scene(
        &self,
        scene: &Scene,
        surface: SurfaceSize,
        zoom: f64,
        mode: FitMode,
    ) -> AffineTransform {
        match mode {
            FitMode::Content => self.fit(&scene.bounding_box(), surface, zoom),
            FitMode::Table => self.fit_with_padding(&scene.canvas_bounds(), surface, zoom, 0.0),
        }
    }

    fn fit_with_padding(
        &self,
        bounds: &BoundingBox2,
        surface: SurfaceSize,
        zoom: f64,
        padding_ratio: f64,
    ) -> AffineTransform {
        if !surface.is_valid() {
            tracing::warn!(
                "Surface {}x{} is not drawable, using identity transform",
                surface.width,
                surface.height
            );
            return AffineTransform::identity();
        }

        let (content_width, content_height) = match measure(bounds) {
            Ok(extent) => extent,
            Err(e) if bounds.is_empty() => {
                tracing::debug!("{}, nothing to fit", e);
                return AffineTransform::identity();
            }
            Err(e) => {
                tracing::debug!("{}, substituting minimal extent", e);
                let min = self.config.min_content_extent;
                (bounds.width().max(min), bounds.height().max(min))
            }
        };

        let zoom = self.config.clamp_zoom(zoom);
        let usable = 1.0 - padding_ratio;
        let scale = (surface.width * usable / content_width)
            .min(surface.height * usable / content_height)
            * zoom;

        let content_center = bounds.center();
        let surface_center = surface.center();
        AffineTransform::new(
            scale,
            0.0,
            0.0,
            scale,
            surface_center.x - content_center.x * scale,
            surface_center.y - content_center.y * scale,
        )
    }
}

/// 测量内容尺寸，空或零面积时报告退化几何
fn measure(bounds: &BoundingBox2) -> CoreResult<(f64, f64)> {
    if bounds.is_empty() {
        return Err(CoreError::DegenerateGeometry("empty bounding box".into()));
    }
    let (w, h) = (bounds.width(), bounds.height());
    if w < EPSILON || h < EPSILON {
        return Err(CoreError::DegenerateGeometry(format!(
            "zero-area bounding box {}x{}",
            w, h
        )));
    }
    Ok((w, h))
}

/// 使用默认配置和指定留白比例计算适配变换
pub fn fit(
    bounds: &BoundingBox2,
    surface_width: f64,
    surface_height: f64,
    zoom: f64,
    padding_ratio: f64,
) -> AffineTransform {
    ViewportFitter::new(ViewportConfig::default().with_padding(padding_ratio)).fit(
        bounds,
        SurfaceSize::new(surface_width, surface_height),
        zoom,
    )
}

/// 逐实体重映射：锚点经过变换，缩放与全局缩放相乘
///
/// 锁定实体两轴始终使用同一个缩放因子。
pub fn project_entity(entity: &Entity, transform: &AffineTransform) -> Placement {
    let (sx, sy) = entity.scale();
    let (scale_x, scale_y) = if entity.locked() {
        let uniform = (sx * sy).sqrt() * transform.uniform_scale();
        (uniform, uniform)
    } else {
        (sx * transform.scale_x(), sy * transform.scale_y())
    };
    Placement {
        id: entity.id().clone(),
        position: transform.apply(&entity.position()),
        scale_x,
        scale_y,
    }
}

/// 把场景中所有实体的图形树变换到画面坐标，保持绘制顺序
pub fn project_scene(scene: &Scene, transform: &AffineTransform) -> Vec<RenderItem> {
    scene
        .iter()
        .map(|entity| RenderItem {
            id: Some(entity.id().clone()),
            shape: entity.shape_tree().transformed(transform),
        })
        .collect()
}
