use serde::Serialize;

use super::Bounds;

/// Dark violet palette the sweep cycles through.
pub const GRADIENT_COLORS: [&str; 8] = [
    "#0c0c18", "#100c20", "#140c28", "#180c30", "#1c0c38", "#200c40", "#240c48", "#280c50",
];

const BANDS: usize = 6;
/// Sweep phase advance per wall-clock millisecond.
const WAVE_SPEED: f64 = 0.00005;
const BAND_ALPHA: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: &'static str,
}

/// A translucent vertical strip filled with a diagonal linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientBand {
    /// Left edge of the strip; the strip spans the full height.
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Gradient line start and end points.
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: [GradientStop; 3],
    pub alpha: f64,
}

/// Sweep phase in `[0, 1)` at `now_ms`.
pub fn wave_phase(now_ms: u64) -> f64 {
    (now_ms as f64 * WAVE_SPEED).rem_euclid(1.0)
}

/// The gradient bands for one frame.
pub fn gradient_sweep(bounds: Bounds, now_ms: u64) -> Vec<GradientBand> {
    let phase = wave_phase(now_ms);
    let (w, h) = (bounds.width, bounds.height);
    (0..BANDS)
        .map(|i| {
            let progress = (i as f64 / BANDS as f64 + phase).rem_euclid(1.0);
            let x = progress * w * 2.0 - w * 0.5;
            let color = |shift: usize| GRADIENT_COLORS[(i + shift) % GRADIENT_COLORS.len()];
            GradientBand {
                x,
                width: w * 0.5,
                height: h,
                from: (x, 0.0),
                to: (x + w * 0.5, h * 0.8),
                stops: [
                    GradientStop {
                        offset: 0.0,
                        color: color(0),
                    },
                    GradientStop {
                        offset: 0.5,
                        color: color(2),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: color(4),
                    },
                ],
                alpha: BAND_ALPHA,
            }
        })
        .collect()
}
