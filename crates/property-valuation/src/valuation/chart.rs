use std::fmt::Display;
use std::path::PathBuf;
use std::sync::OnceLock;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::{debug, info, warn};

use super::engine::ValuationResult;
use super::money::group_thousands;

const FONT_FAMILY: &str = "sans-serif";
pub const CHART_MEDIA_TYPE: &str = "image/png";

/// Encoded three-bar comparison image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl ChartArtifact {
    pub fn media_type(&self) -> &'static str {
        CHART_MEDIA_TYPE
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("valuation figures must be finite and ordered low <= average <= high")]
    UnorderedValues,
    #[error("chart backend failed: {0}")]
    Backend(String),
    #[error("failed to encode chart image: {0}")]
    Encode(#[from] image::ImageError),
}

fn backend_error<E: Display>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}

/// Turns a valuation into a chart image.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, result: &ValuationResult) -> Result<ChartArtifact, ChartError>;
}

#[derive(Debug, Clone)]
pub struct ChartBar {
    pub label: &'static str,
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub title: &'static str,
    pub y_axis_label: &'static str,
    pub bars: [ChartBar; 3],
}

impl ChartStyle {
    pub fn standard() -> Self {
        Self {
            width_px: 640,
            height_px: 480,
            title: "Valuation Price Range",
            y_axis_label: "Price (Rs.)",
            bars: [
                ChartBar {
                    label: "Lower",
                    color: RGBColor(0xff, 0x99, 0x99),
                },
                ChartBar {
                    label: "Average",
                    color: RGBColor(0x66, 0xb3, 0xff),
                },
                ChartBar {
                    label: "Higher",
                    color: RGBColor(0x99, 0xff, 0x99),
                },
            ],
        }
    }
}

/// Registers the first readable font for chart text. Runs once per process.
pub fn register_chart_font(candidates: &[PathBuf]) -> bool {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    *REGISTERED.get_or_init(|| {
        for path in candidates {
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "chart font unavailable");
                    continue;
                }
            };
            // plotters keeps registered faces for the life of the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            let registered = register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok()
                && register_font(FONT_FAMILY, FontStyle::Bold, bytes).is_ok();
            if registered {
                info!(path = %path.display(), "chart font registered");
                return true;
            }
            warn!(path = %path.display(), "chart font could not be parsed");
        }
        warn!("no chart font available; charts will be drawn without text");
        false
    })
}

/// Vertical bar chart drawn into an in-memory bitmap and encoded as PNG.
#[derive(Debug, Clone)]
pub struct BarChartRenderer {
    style: ChartStyle,
    labelled: bool,
}

impl BarChartRenderer {
    /// Renderer with text, falling back to bars only when no font loads.
    pub fn with_fonts(style: ChartStyle, font_candidates: &[PathBuf]) -> Self {
        let labelled = register_chart_font(font_candidates);
        Self { style, labelled }
    }

    /// Renderer that never draws text and needs no font.
    pub fn unlabelled(style: ChartStyle) -> Self {
        Self {
            style,
            labelled: false,
        }
    }

    pub fn is_labelled(&self) -> bool {
        self.labelled
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    fn draw_labelled(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        values: [f64; 3],
        y_max: f64,
    ) -> Result<(), ChartError> {
        let labels = self.style.bars.clone().map(|bar| bar.label);
        let mut chart = ChartBuilder::on(root)
            .caption(self.style.title, (FONT_FAMILY, 22))
            .margin(16)
            .x_label_area_size(36)
            .y_label_area_size(96)
            .build_cartesian_2d((0u32..3u32).into_segmented(), 0f64..y_max)
            .map_err(backend_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(self.style.y_axis_label)
            .x_labels(3)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(index) => labels
                    .get(*index as usize)
                    .map(|label| label.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|value| group_thousands(*value))
            .label_style((FONT_FAMILY, 14))
            .draw()
            .map_err(backend_error)?;

        chart
            .draw_series(self.style.bars.iter().zip(values).enumerate().map(
                |(index, (bar, value))| {
                    let index = index as u32;
                    let mut rect = Rectangle::new(
                        [
                            (SegmentValue::Exact(index), 0.0),
                            (SegmentValue::Exact(index + 1), value),
                        ],
                        bar.color.filled(),
                    );
                    rect.set_margin(0, 0, 18, 18);
                    rect
                },
            ))
            .map_err(backend_error)?;

        Ok(())
    }

    fn draw_plain(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        values: [f64; 3],
        y_max: f64,
    ) -> Result<(), ChartError> {
        let (width, height) = (self.style.width_px as i32, self.style.height_px as i32);
        let (left, right, top, bottom) = (60, width - 20, 30, height - 40);
        let plot_height = f64::from(bottom - top);
        let slot = (right - left) / 3;

        root.draw(&PathElement::new(
            vec![(left, top), (left, bottom), (right, bottom)],
            BLACK.stroke_width(1),
        ))
        .map_err(backend_error)?;

        for (index, (bar, value)) in self.style.bars.iter().zip(values).enumerate() {
            let bar_height = ((value / y_max) * plot_height).round() as i32;
            let x0 = left + slot * index as i32 + slot / 6;
            let x1 = left + slot * (index as i32 + 1) - slot / 6;
            root.draw(&Rectangle::new(
                [(x0, bottom - bar_height), (x1, bottom)],
                bar.color.filled(),
            ))
            .map_err(backend_error)?;
        }
        Ok(())
    }
}

impl ChartRenderer for BarChartRenderer {
    fn render(&self, result: &ValuationResult) -> Result<ChartArtifact, ChartError> {
        if !result.is_ordered() {
            return Err(ChartError::UnorderedValues);
        }

        let (width, height) = (self.style.width_px, self.style.height_px);
        let values = result.values();
        let y_max = if result.high > 0.0 {
            result.high * 1.1
        } else {
            1.0
        };

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(backend_error)?;
            if self.labelled {
                self.draw_labelled(&root, values, y_max)?;
            } else {
                self.draw_plain(&root, values, y_max)?;
            }
            root.present().map_err(backend_error)?;
        }

        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(&pixels, width, height, ColorType::Rgb8)?;
        debug!(bytes = bytes.len(), labelled = self.labelled, "chart rendered");

        Ok(ChartArtifact {
            bytes,
            width_px: width,
            height_px: height,
        })
    }
}
