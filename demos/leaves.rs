//! # Falling Leaves
//!
//! Autumn preset: bigger, slower particles with strong sideways drift and a
//! lazy spin, stamped with soft-disc art instead of the snowflake.
//!
//! Run with: `cargo run --example leaves`

use driftfall::{FallConfig, Overlay, SpriteArt};

fn main() {
    env_logger::init();

    let config = FallConfig {
        max_items: 30,
        spawn_rate: 0.02,
        min_speed: 0.2,
        max_speed: 0.8,
        min_size: 14.0,
        max_size: 24.0,
        drift: 0.8,
        rotation_speed: 0.03,
        characters: vec!["🍂".into(), "🍁".into(), "🍃".into()],
        ..Default::default()
    };

    Overlay::new(config)
        .with_glyph_art("🍂", SpriteArt::soft_disc(64))
        .with_glyph_art("🍁", SpriteArt::soft_disc(64))
        .with_glyph_art("🍃", SpriteArt::soft_disc(48))
        .run()
        .expect("overlay failed");
}
