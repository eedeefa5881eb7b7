//! Terminal rasterizer for [`Frame`]s.

use super::Frame;

/// Background shades by number of overlapping gradient bands.
const SHADES: [char; 4] = [' ', '░', '▒', '▓'];

fn particle_glyph(opacity: f64) -> char {
    if opacity > 0.3 {
        '●'
    } else if opacity > 0.15 {
        '•'
    } else {
        '·'
    }
}

/// Render `frame` onto a `cols` x `rows` character grid.
pub fn rasterize(frame: &Frame, cols: usize, rows: usize) -> Vec<String> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let (w, h) = (frame.bounds.width, frame.bounds.height);
    let cell_w = if w > 0.0 { w / cols as f64 } else { 1.0 };
    let cell_h = if h > 0.0 { h / rows as f64 } else { 1.0 };

    let row_shade: Vec<char> = (0..cols)
        .map(|col| {
            let center = (col as f64 + 0.5) * cell_w;
            let covered = frame
                .bands
                .iter()
                .filter(|b| center >= b.x && center < b.x + b.width)
                .count();
            SHADES[covered.min(SHADES.len() - 1)]
        })
        .collect();
    let mut grid: Vec<Vec<char>> = vec![row_shade; rows];

    for sprite in &frame.particles {
        if sprite.x < 0.0 || sprite.y < 0.0 {
            continue;
        }
        let col = (sprite.x / cell_w) as usize;
        let row = (sprite.y / cell_h) as usize;
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = particle_glyph(sprite.opacity);
        }
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{gradient_sweep, Bounds, ParticleSprite, FADE_FILL, PARTICLE_COLORS};

    fn frame(particles: Vec<ParticleSprite>) -> Frame {
        let bounds = Bounds::new(80.0, 40.0);
        Frame {
            bounds,
            fade: FADE_FILL,
            bands: gradient_sweep(bounds, 0),
            particles,
        }
    }

    fn sprite(x: f64, y: f64, opacity: f64) -> ParticleSprite {
        ParticleSprite {
            x,
            y,
            radius: 1.0,
            color: PARTICLE_COLORS[1],
            opacity,
            glow: 20.0,
        }
    }

    #[test]
    fn grid_has_requested_size() {
        let lines = rasterize(&frame(Vec::new()), 40, 10);
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn particles_land_in_their_cells() {
        let lines = rasterize(&frame(vec![sprite(10.0, 5.0, 0.4), sprite(79.0, 39.0, 0.1)]), 80, 40);
        assert_eq!(lines[5].chars().nth(10), Some('●'));
        assert_eq!(lines[39].chars().nth(79), Some('·'));
    }

    #[test]
    fn offscreen_particles_are_skipped() {
        let lines = rasterize(&frame(vec![sprite(-5.0, 3.0, 0.4), sprite(500.0, 3.0, 0.4)]), 20, 5);
        assert!(lines.iter().all(|l| !l.contains('●')));
    }

    #[test]
    fn empty_grid_for_zero_size() {
        assert!(rasterize(&frame(Vec::new()), 0, 5).is_empty());
    }
}
