//! 配置
//!
//! 所有字段都有默认值，配置文件中缺失的字段回退到默认值。

use serde::{Deserialize, Serialize};

/// 视口适配配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// 四周留白占画面的比例
    pub padding_ratio: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// 放大一级的倍率
    pub zoom_in_factor: f64,
    /// 缩小一级的倍率
    pub zoom_out_factor: f64,
    /// 内容宽或高为零时替代的最小尺寸
    pub min_content_extent: f64,
}

impl ViewportConfig {
    pub const MAX_PADDING: f64 = 0.5;

    /// 使用指定留白比例（超出范围时饱和）
    pub fn with_padding(mut self, padding_ratio: f64) -> Self {
        self.padding_ratio = padding_ratio;
        self.sanitized()
    }

    /// 修正不合法的配置值
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let padding_ratio = if self.padding_ratio.is_finite() {
            self.padding_ratio.clamp(0.0, Self::MAX_PADDING)
        } else {
            defaults.padding_ratio
        };
        let (min_zoom, max_zoom) = if self.min_zoom > 0.0 && self.max_zoom >= self.min_zoom {
            (self.min_zoom, self.max_zoom)
        } else {
            (defaults.min_zoom, defaults.max_zoom)
        };
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };

        Self {
            padding_ratio,
            min_zoom,
            max_zoom,
            zoom_in_factor: positive(self.zoom_in_factor, defaults.zoom_in_factor),
            zoom_out_factor: positive(self.zoom_out_factor, defaults.zoom_out_factor),
            min_content_extent: positive(self.min_content_extent, defaults.min_content_extent),
        }
    }

    /// 缩放饱和到允许范围；非数值回退为 1
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.1,
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            min_content_extent: 50.0,
        }
    }
}

/// 撤销历史配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// 最多保留的快照数
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// 应用配置（可从 JSON 文件加载）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: ViewportConfig,
    pub history: HistoryConfig,
}
