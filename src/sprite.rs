//! Procedural sprite art.
//!
//! The wgpu overlay draws every particle as a textured quad. Images bring
//! their own pixels; glyphs are stamped with sprite art from this module
//! unless the host registers its own via
//! [`Overlay::with_glyph_art`](crate::Overlay::with_glyph_art).
//!
//! All art is white with an alpha channel, so the particle's opacity
//! attribute is the only thing that dims it.

/// Raw RGBA sprite pixels.
#[derive(Debug, Clone)]
pub struct SpriteArt {
    /// Tightly packed RGBA8 pixels, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SpriteArt {
    /// Create sprite art from raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Six-armed snowflake with soft alpha falloff.
    ///
    /// The default stamp for glyphs that have no registered art.
    pub fn snowflake(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let sector = std::f32::consts::PI / 3.0;

        for py in 0..size {
            for px in 0..size {
                let x = (px as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let y = (py as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let r = (x * x + y * y).sqrt();

                // Fold the point into one arm's sector, arm along +y.
                let mut angle = x.atan2(y).rem_euclid(sector);
                if angle > sector / 2.0 {
                    angle = sector - angle;
                }
                let folded = (r * angle.sin(), r * angle.cos());

                let mut alpha: f32 = 0.0;

                // Main arm: tapering spine from hub to tip.
                if folded.1 <= 0.95 {
                    let thickness = 0.10 * (1.0 - 0.6 * r);
                    alpha = alpha.max(coverage(folded.0, thickness));
                }

                // Side branches partway up the arm.
                for &(root, length) in &[(0.40f32, 0.28f32), (0.66, 0.18)] {
                    let tip = (length * 0.82, root + length * 0.57);
                    let d = segment_distance(folded, (0.0, root), tip);
                    alpha = alpha.max(coverage(d, 0.05));
                }

                // Center hub.
                alpha = alpha.max(coverage(r, 0.10));

                // Fade everything out toward the rim.
                alpha *= 1.0 - smoothstep(0.85, 1.0, r);

                let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
                data.extend_from_slice(&[255, 255, 255, a]);
            }
        }

        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Soft filled disc: solid core fading to a transparent rim.
    pub fn soft_disc(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);

        for py in 0..size {
            for px in 0..size {
                let x = (px as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let y = (py as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let r = (x * x + y * y).sqrt();

                let alpha = 1.0 - smoothstep(0.55, 1.0, r);
                let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
                data.extend_from_slice(&[255, 255, 255, a]);
            }
        }

        Self {
            data,
            width: size,
            height: size,
        }
    }
}

/// Antialiased coverage of a feature of the given half-width at distance `d`.
fn coverage(d: f32, half_width: f32) -> f32 {
    1.0 - smoothstep(half_width * 0.6, half_width, d.abs())
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let ab = (b.0 - a.0, b.1 - a.1);
    let ap = (p.0 - a.0, p.1 - a.1);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    let t = if len_sq > 0.0001 {
        ((ap.0 * ab.0 + ap.1 * ab.1) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = (a.0 + ab.0 * t, a.1 + ab.1 * t);
    let d = (p.0 - closest.0, p.1 - closest.1);
    (d.0 * d.0 + d.1 * d.1).sqrt()
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
