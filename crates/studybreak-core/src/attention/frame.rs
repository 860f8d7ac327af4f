//! Frame representation and per-frame image metrics.
//!
//! The detector never looks at a whole frame: metrics are computed over
//! a fixed central sub-region (the middle half of each dimension), which
//! is where a seated person's face lands for a desk-mounted camera.

use serde::{Deserialize, Serialize};

/// One captured color frame: tightly packed RGBA bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, R G B A per pixel.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame filled with a single color. Used by scripted sources and
    /// tests; a real camera never produces one of these.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }
}

/// Pixel rule approximating skin hue in RGB space.
///
/// R>95, G>40, B>20, R>G, R>B, R-G>15, R-B>15. This is a crude stand-in
/// for real face detection and misfires under colored lighting, so the
/// limits stay tunable rather than baked into the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinThresholds {
    pub min_r: u8,
    pub min_g: u8,
    pub min_b: u8,
    /// Required dominance of red over green.
    pub min_rg_gap: u8,
    /// Required dominance of red over blue.
    pub min_rb_gap: u8,
}

impl Default for SkinThresholds {
    fn default() -> Self {
        Self {
            min_r: 95,
            min_g: 40,
            min_b: 20,
            min_rg_gap: 15,
            min_rb_gap: 15,
        }
    }
}

impl SkinThresholds {
    /// Whether one pixel passes the skin rule. All comparisons strict.
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        r > self.min_r
            && g > self.min_g
            && b > self.min_b
            && r > g
            && r > b
            && r.saturating_sub(g) > self.min_rg_gap
            && r.saturating_sub(b) > self.min_rb_gap
    }
}

/// Aggregate metrics over the sampled sub-region of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMetrics {
    /// Mean of per-pixel channel averages, 0.0-255.0.
    pub brightness: f64,
    /// Fraction of region pixels passing the skin rule, 0.0-1.0.
    pub skin_ratio: f64,
}

/// Compute brightness and skin ratio over the central sub-region.
///
/// The region spans the middle half of each dimension. Frames too small
/// to contain a region yield zeroed metrics.
pub fn region_metrics(frame: &Frame, skin: &SkinThresholds) -> RegionMetrics {
    let x0 = frame.width / 4;
    let x1 = frame.width * 3 / 4;
    let y0 = frame.height / 4;
    let y1 = frame.height * 3 / 4;

    let mut brightness_sum = 0.0f64;
    let mut skin_count = 0u64;
    let mut pixel_count = 0u64;

    for y in y0..y1 {
        for x in x0..x1 {
            let idx = ((y * frame.width + x) * 4) as usize;
            let (r, g, b) = (frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]);
            brightness_sum += (r as f64 + g as f64 + b as f64) / 3.0;
            if skin.matches(r, g, b) {
                skin_count += 1;
            }
            pixel_count += 1;
        }
    }

    if pixel_count == 0 {
        return RegionMetrics {
            brightness: 0.0,
            skin_ratio: 0.0,
        };
    }
    RegionMetrics {
        brightness: brightness_sum / pixel_count as f64,
        skin_ratio: skin_count as f64 / pixel_count as f64,
    }
}
