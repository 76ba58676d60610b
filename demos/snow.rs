//! # Snow
//!
//! The default preset: white flakes drifting down the screen in a
//! transparent click-through overlay. Pass a JSON config path to override
//! any setting.
//!
//! Run with: `cargo run --example snow [-- falling.json]`

use driftfall::{FallConfig, Overlay};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => FallConfig::from_json_file(&path).expect("failed to read config"),
        None => FallConfig::default(),
    };

    Overlay::new(config).run().expect("overlay failed");
}
