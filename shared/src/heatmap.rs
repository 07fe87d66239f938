//! Rasterises heatmap bins into a paint list for a 2D canvas.

use serde::{Deserialize, Serialize};

use crate::dto::admin::HeatmapBin;
use crate::format::round_half_up;

/// Longest canvas side, in pixels, before the scale drops to 1.
pub const MAX_CANVAS_PX: i64 = 400;
pub const MIN_SCALE: i64 = 1;
pub const MAX_SCALE: i64 = 4;

pub const BACKGROUND: Rgb = Rgb::new(0x1a, 0x1a, 0x2e);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(r, g, b)` notation for canvas fill styles.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn channel(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 255.0) as u8
}

/// Four-band gradient: dark blue, teal, green-yellow, orange-red.
///
/// Intensity is clamped to `[0, 1]`; every band starts where the previous one ends.
pub fn heatmap_color(intensity: f64) -> Rgb {
    let intensity = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };

    if intensity < 0.25 {
        let t = intensity * 4.0;
        Rgb::new(channel(15.0 + t * 11.0), channel(52.0 + t * 43.0), channel(96.0 + t * 26.0))
    } else if intensity < 0.5 {
        let t = (intensity - 0.25) * 4.0;
        Rgb::new(channel(26.0 + t * 48.0), channel(95.0 + t * 78.0), channel(122.0 - t * 42.0))
    } else if intensity < 0.75 {
        let t = (intensity - 0.5) * 4.0;
        Rgb::new(channel(74.0 + t * 177.0), channel(173.0 + t * 18.0), channel(80.0 - t * 44.0))
    } else {
        let t = (intensity - 0.75) * 4.0;
        Rgb::new(channel(251.0 - t * 3.0), channel(191.0 - t * 78.0), channel(36.0 + t * 77.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintedCell {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub color: Rgb,
}

/// Everything a canvas needs to draw one heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapImage {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub background: Rgb,
    pub cells: Vec<PaintedCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min_x: i64,
    max_x: i64,
    min_z: i64,
    max_z: i64,
}

impl Bounds {
    fn of(bins: &[HeatmapBin]) -> Option<Self> {
        let first = bins.first()?;
        let seed = Bounds {
            min_x: first.chunk_x as i64,
            max_x: first.chunk_x as i64,
            min_z: first.chunk_z as i64,
            max_z: first.chunk_z as i64,
        };
        Some(bins.iter().fold(seed, |b, bin| Bounds {
            min_x: b.min_x.min(bin.chunk_x as i64),
            max_x: b.max_x.max(bin.chunk_x as i64),
            min_z: b.min_z.min(bin.chunk_z as i64),
            max_z: b.max_z.max(bin.chunk_z as i64),
        }))
    }

    fn width(&self) -> i64 {
        self.max_x - self.min_x + 1
    }

    fn height(&self) -> i64 {
        self.max_z - self.min_z + 1
    }
}

/// Integer pixels per chunk so the longer side fits in [`MAX_CANVAS_PX`].
pub fn pixel_scale(width: i64, height: i64) -> i64 {
    (MAX_CANVAS_PX / width.max(height).max(1)).clamp(MIN_SCALE, MAX_SCALE)
}

/// Lays out the bins on a canvas. `None` when there is nothing to draw.
pub fn rasterize(bins: &[HeatmapBin]) -> Option<HeatmapImage> {
    let bounds = Bounds::of(bins)?;
    let scale = pixel_scale(bounds.width(), bounds.height());
    let max_value = bins.iter().map(HeatmapBin::value).fold(0.0, f64::max);

    let cells = bins
        .iter()
        .map(|bin| {
            let intensity = if max_value > 0.0 {
                bin.value() / max_value
            } else {
                0.0
            };
            PaintedCell {
                x: ((bin.chunk_x as i64 - bounds.min_x) * scale) as u32,
                y: ((bin.chunk_z as i64 - bounds.min_z) * scale) as u32,
                size: scale as u32,
                color: heatmap_color(intensity),
            }
        })
        .collect();

    Some(HeatmapImage {
        width: (bounds.width() * scale) as u32,
        height: (bounds.height() * scale) as u32,
        scale: scale as u32,
        background: BACKGROUND,
        cells,
    })
}
