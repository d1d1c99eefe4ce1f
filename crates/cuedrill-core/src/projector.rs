//! 投影
//!
//! 把一个练习场景按投影画面尺寸重新适配。投影持有场景的独立副本，
//! 编辑器后续的修改不会影响正在投影的画面。

use crate::color::Color;
use crate::config::ViewportConfig;
use crate::scene::Scene;
use crate::table::TableLayout;
use crate::transform::AffineTransform;
use crate::viewport::{project_scene, FitMode, RenderItem, SurfaceSize, ViewportFitter};
use serde::{Deserialize, Serialize};

/// 投影背景色，按 黑 → 白 → 绿 → 黑 循环
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionBackground {
    #[default]
    Black,
    White,
    Green,
}

impl ProjectionBackground {
    pub fn next(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Green,
            Self::Green => Self::Black,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Black => Color::BLACK,
            Self::White => Color::WHITE,
            Self::Green => Color::rgb(0x1F, 0x4E, 0x3D),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Green => "green",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projector {
    scene: Scene,
    fitter: ViewportFitter,
    surface: SurfaceSize,
    zoom: f64,
    mode: FitMode,
    background: ProjectionBackground,
    fullscreen: bool,
    show_table: bool,
    highlight: Option<Color>,
}

impl Projector {
    pub fn new(scene: &Scene, surface: SurfaceSize, config: ViewportConfig) -> Self {
        tracing::info!(
            "Projecting {} entities onto {}x{}",
            scene.len(),
            surface.width,
            surface.height
        );
        Self {
            scene: scene.clone(),
            fitter: ViewportFitter::new(config),
            surface,
            zoom: 1.0,
            mode: FitMode::Content,
            background: ProjectionBackground::default(),
            fullscreen: false,
            show_table: false,
            highlight: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// 替换为新的场景副本
    pub fn load_scene(&mut self, scene: &Scene) {
        tracing::info!("Loaded {} entities into projector", scene.len());
        self.scene = scene.clone();
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn resize(&mut self, surface: SurfaceSize) {
        tracing::debug!("Projector resized to {}x{}", surface.width, surface.height);
        self.surface = surface;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// 全屏切换只记录状态，实际尺寸由随后的 `resize` 提供
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.fitter.config().clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.fitter.config().zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * self.fitter.config().zoom_out_factor);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FitMode) {
        self.mode = mode;
    }

    pub fn background(&self) -> ProjectionBackground {
        self.background
    }

    pub fn cycle_background(&mut self) -> ProjectionBackground {
        self.background = self.background.next();
        self.background
    }

    pub fn set_show_table(&mut self, show: bool) {
        self.show_table = show;
    }

    /// 高亮模式：所有不透明的填充和描边改为同一颜色
    pub fn set_highlight(&mut self, color: Option<Color>) {
        self.highlight = color;
    }

    pub fn highlight(&self) -> Option<Color> {
        self.highlight
    }

    /// 当前变换，每次从场景、画面尺寸、缩放和模式重新计算
    pub fn transform(&self) -> AffineTransform {
        self.fitter
            .fit_scene(&self.scene, self.surface, self.zoom, self.mode)
    }

    /// 画面坐标下的绘制列表：可选的球台底层，然后按层级排列的实体
    pub fn render_list(&self) -> Vec<RenderItem> {
        let transform = self.transform();
        let mut items = Vec::with_capacity(self.scene.len() + 1);
        if self.show_table {
            items.push(RenderItem {
                id: None,
                shape: TableLayout::default().shape_tree().transformed(&transform),
            });
        }
        items.extend(project_scene(&self.scene, &transform));

        if let Some(color) = self.highlight {
            for item in items.iter_mut().filter(|item| item.id.is_some()) {
                item.shape = item.shape.recolored(color);
            }
        }
        items
    }
}
