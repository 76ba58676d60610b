//! The particle animator: spawn, update, cull, render.
//!
//! [`Animator`] owns every piece of animation state (particle list, reuse
//! pool, clock, RNG) as instance fields, so multiple independent animators
//! can coexist and tests can drive one headlessly through
//! [`advance`](Animator::advance) and a recording [`Surface`].

use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec2;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::assets::LoadedImage;
use crate::config::FallConfig;
use crate::particle::{Particle, Visual, SPAWN_Y};
use crate::pool::ParticlePool;
use crate::surface::{ImageHandle, Placement, Surface};
use crate::time::FrameClock;

/// Base advance applied to the sway phase each frame, before the
/// per-particle drift speed multiplier.
const DRIFT_PHASE_RATE: f32 = 0.01;

/// Per-particle drift speed multiplier range.
const DRIFT_SPEED_RANGE: (f32, f32) = (0.5, 2.0);

/// How many particles seed the screen when the animation starts.
const INITIAL_SEED: usize = 8;

/// Seeded particles spread over this fraction of the viewport height.
const SEED_HEIGHT_FRACTION: f32 = 0.7;

/// Animation lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the image batch to settle.
    Loading,
    /// Stepping and drawing every frame.
    Running,
    /// Host is hidden; frames are not stepped.
    Paused,
}

/// A falling-particle animation over one viewport.
pub struct Animator {
    config: FallConfig,
    images: Vec<LoadedImage>,
    active: Vec<Particle>,
    pool: ParticlePool,
    clock: FrameClock,
    viewport: Vec2,
    phase: Phase,
    seeded: bool,
    rng: SmallRng,
}

impl Animator {
    /// Create an animator in the [`Phase::Loading`] state.
    ///
    /// `viewport` is the drawable area in pixels, y down.
    pub fn new(config: FallConfig, viewport: Vec2) -> Self {
        // Different each program execution, no reproducibility required.
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);

        Self {
            config,
            images: Vec::new(),
            active: Vec::new(),
            pool: ParticlePool::new(),
            clock: FrameClock::new(),
            viewport,
            phase: Phase::Loading,
            seeded: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Replace the RNG seed, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Register the settled image batch and move to [`Phase::Running`].
    ///
    /// An empty batch means glyph mode. Calling this twice is a no-op, so a
    /// host that initializes more than once still gets exactly one running
    /// animation.
    pub fn start(&mut self, images: Vec<LoadedImage>) {
        if self.phase != Phase::Loading {
            return;
        }
        if images.is_empty() {
            if self.config.characters.is_empty() {
                warn!("no glyphs configured and no images loaded; nothing will fall");
            } else {
                info!(
                    "falling animation running with {} glyph(s)",
                    self.config.characters.len()
                );
            }
        } else {
            info!("falling animation running with {} image(s)", images.len());
        }
        self.images = images;
        self.phase = Phase::Running;
    }

    /// Spawn the initial handful of particles, spread over the upper part
    /// of the viewport so the screen is not empty on the first frame.
    ///
    /// Does nothing before [`start`](Animator::start) and on repeat calls.
    pub fn seed_initial(&mut self) {
        if self.phase == Phase::Loading || self.seeded {
            return;
        }
        self.seeded = true;

        let budget = self.config.max_items.saturating_sub(self.active.len());
        let band = (self.viewport.y * SEED_HEIGHT_FRACTION).max(0.0);
        for _ in 0..INITIAL_SEED.min(budget) {
            if let Some(mut particle) = self.spawn_particle() {
                particle.position.y = self.rng.gen_range(0.0..=band);
                self.active.push(particle);
            }
        }
    }

    /// Stop stepping frames while the host is hidden.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Resume stepping after [`pause`](Animator::pause).
    ///
    /// Resets the clock baseline so the first resumed frame advances by one
    /// ordinary step rather than the whole hidden interval.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            self.clock.reset();
        }
    }

    /// Update the cached viewport dimensions.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Advance one frame of wall-clock time. No-op unless running.
    pub fn tick(&mut self, now: Instant) {
        if self.phase != Phase::Running {
            return;
        }
        let scale = self.clock.tick(now);
        self.advance(scale);
    }

    /// Advance one frame with an explicit time scale (`1.0` = one 60 fps
    /// frame). Headless hosts, tests, and benches drive the animation
    /// through this directly.
    pub fn advance(&mut self, time_scale: f32) {
        if self.phase != Phase::Running {
            return;
        }
        self.maybe_spawn();
        self.update_and_cull(time_scale);
    }

    /// Draw the current frame.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for particle in &self.active {
            let placement = Placement {
                center: particle.position,
                size: particle.size,
                rotation: particle.rotation,
                opacity: particle.opacity,
            };
            match particle.visual {
                Visual::Glyph(slot) => {
                    surface.draw_glyph(&self.config.characters[slot], placement)
                }
                Visual::Image(slot) => surface.draw_image(ImageHandle(slot), placement),
            }
        }
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of particles currently falling.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of retired records waiting in the reuse pool.
    #[inline]
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }

    /// The particles currently falling.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.active
    }

    /// The loaded images backing [`Visual::Image`] slots.
    #[inline]
    pub fn images(&self) -> &[LoadedImage] {
        &self.images
    }

    /// Current viewport dimensions in pixels.
    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// With probability `spawn_rate`, and only below the item cap, spawn
    /// one particle at the top edge.
    fn maybe_spawn(&mut self) {
        if self.active.len() >= self.config.max_items {
            return;
        }
        if self.rng.gen::<f32>() < self.config.spawn_rate {
            if let Some(particle) = self.spawn_particle() {
                self.active.push(particle);
            }
        }
    }

    /// Build a particle with randomized attributes, reusing a pooled record
    /// when one is available. `None` when no visual source exists.
    fn spawn_particle(&mut self) -> Option<Particle> {
        let visual = self.pick_visual()?;
        let (speed_lo, speed_hi) = self.config.speed_range();
        let (size_lo, size_hi) = self.config.size_range();
        let (opacity_lo, opacity_hi) = self.config.opacity_range();

        let mut particle = self.pool.acquire().unwrap_or_else(Particle::blank);
        particle.position = Vec2::new(
            self.rng.gen_range(0.0..=self.viewport.x.max(0.0)),
            SPAWN_Y,
        );
        particle.size = self.rng.gen_range(size_lo..=size_hi);
        particle.speed = self.rng.gen_range(speed_lo..=speed_hi);
        particle.opacity = self.rng.gen_range(opacity_lo..=opacity_hi);
        particle.rotation = self.rng.gen_range(0.0..TAU);
        particle.rotation_dir = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        particle.drift_phase = self.rng.gen_range(0.0..TAU);
        particle.drift_speed = self
            .rng
            .gen_range(DRIFT_SPEED_RANGE.0..DRIFT_SPEED_RANGE.1);
        particle.visual = visual;
        Some(particle)
    }

    /// Images take priority over glyphs whenever any loaded.
    fn pick_visual(&mut self) -> Option<Visual> {
        if !self.images.is_empty() {
            Some(Visual::Image(self.rng.gen_range(0..self.images.len())))
        } else if !self.config.characters.is_empty() {
            Some(Visual::Glyph(
                self.rng.gen_range(0..self.config.characters.len()),
            ))
        } else {
            None
        }
    }

    fn update_and_cull(&mut self, time_scale: f32) {
        let drift = self.config.drift;
        let rotation_speed = self.config.rotation_speed;
        let height = self.viewport.y;

        let mut i = 0;
        while i < self.active.len() {
            let particle = &mut self.active[i];

            particle.position.y += particle.speed * time_scale;
            particle.drift_phase += DRIFT_PHASE_RATE * particle.drift_speed * time_scale;
            particle.position.x += particle.drift_phase.sin() * drift * time_scale;
            particle.rotation += rotation_speed * particle.rotation_dir * time_scale;

            if particle.on_screen(height) {
                i += 1;
            } else {
                let retired = self.active.swap_remove(i);
                self.pool.release(retired);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        glyphs: Vec<(String, Placement)>,
        images: Vec<(ImageHandle, Placement)>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
        }

        fn draw_glyph(&mut self, glyph: &str, placement: Placement) {
            self.glyphs.push((glyph.to_string(), placement));
        }

        fn draw_image(&mut self, image: ImageHandle, placement: Placement) {
            self.images.push((image, placement));
        }
    }

    fn test_image() -> LoadedImage {
        LoadedImage {
            name: "test".into(),
            pixels: vec![255; 4],
            width: 1,
            height: 1,
        }
    }

    fn running(config: FallConfig, viewport: Vec2) -> Animator {
        let mut animator = Animator::new(config, viewport).with_seed(7);
        animator.start(Vec::new());
        animator
    }

    #[test]
    fn test_spawn_attributes_within_ranges() {
        let config = FallConfig {
            max_items: 64,
            spawn_rate: 1.0,
            min_speed: 0.5,
            max_speed: 2.5,
            min_size: 5.0,
            max_size: 9.0,
            min_opacity: 0.2,
            max_opacity: 0.9,
            characters: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));

        for _ in 0..200 {
            animator.advance(1.0);
        }

        assert!(animator.active_count() > 0);
        for particle in animator.particles() {
            assert!((0.5..=2.5).contains(&particle.speed));
            assert!((5.0..=9.0).contains(&particle.size));
            assert!((0.2..=0.9).contains(&particle.opacity));
            assert!((0.5..2.0).contains(&particle.drift_speed));
            assert!(particle.rotation_dir == 1.0 || particle.rotation_dir == -1.0);
            // Spawned in [0, 2pi), then advanced by at most 200 small steps.
            assert!(particle.rotation > -1.0 && particle.rotation < TAU + 1.0);
            match particle.visual {
                Visual::Glyph(slot) => assert!(slot < 2),
                Visual::Image(_) => panic!("no images were loaded"),
            }
        }
    }

    #[test]
    fn test_active_count_never_exceeds_max() {
        let config = FallConfig {
            max_items: 10,
            spawn_rate: 1.0,
            min_speed: 0.1,
            max_speed: 0.1,
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));
        animator.seed_initial();

        for _ in 0..200 {
            animator.advance(1.0);
            assert!(animator.active_count() <= 10);
        }
    }

    #[test]
    fn test_single_tick_from_empty_state() {
        let config = FallConfig {
            max_items: 1,
            spawn_rate: 1.0,
            min_speed: 1.0,
            max_speed: 1.0,
            min_size: 10.0,
            max_size: 10.0,
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));

        animator.advance(1.0);

        assert_eq!(animator.active_count(), 1);
        let particle = &animator.particles()[0];
        assert_eq!(particle.size, 10.0);
        assert_eq!(particle.position.y, SPAWN_Y + 1.0);
    }

    #[test]
    fn test_cull_boundary_and_pool_reuse() {
        let config = FallConfig {
            max_items: 1,
            spawn_rate: 1.0,
            min_speed: 1.0,
            max_speed: 1.0,
            ..Default::default()
        };
        // Zero-height viewport: the cull line sits at y = 30.
        let mut animator = running(config, Vec2::new(100.0, 0.0));

        // Spawn at -20, then fall 1 pixel per frame: y = 29 after 49 frames.
        for _ in 0..49 {
            animator.advance(1.0);
        }
        assert_eq!(animator.active_count(), 1);
        assert_eq!(animator.particles()[0].position.y, 29.0);
        assert_eq!(animator.pooled_count(), 0);

        // Frame 50 reaches the line and retires the particle.
        animator.advance(1.0);
        assert_eq!(animator.active_count(), 0);
        assert_eq!(animator.pooled_count(), 1);

        // The next spawn reuses the pooled record.
        animator.advance(1.0);
        assert_eq!(animator.active_count(), 1);
        assert_eq!(animator.pooled_count(), 0);
    }

    #[test]
    fn test_glyph_mode_draws_only_glyphs() {
        let config = FallConfig {
            max_items: 20,
            spawn_rate: 1.0,
            characters: vec!["X".into()],
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));
        let mut recorder = Recorder::default();

        for _ in 0..1000 {
            animator.advance(1.0);
            animator.render(&mut recorder);
        }

        assert_eq!(recorder.clears, 1000);
        assert!(!recorder.glyphs.is_empty());
        assert!(recorder.glyphs.iter().all(|(glyph, _)| glyph == "X"));
        assert!(recorder.images.is_empty());
    }

    #[test]
    fn test_images_take_priority_over_glyphs() {
        let config = FallConfig {
            max_items: 10,
            spawn_rate: 1.0,
            ..Default::default()
        };
        let mut animator = Animator::new(config, Vec2::new(800.0, 600.0)).with_seed(7);
        animator.start(vec![test_image()]);

        let mut recorder = Recorder::default();
        for _ in 0..50 {
            animator.advance(1.0);
        }
        animator.render(&mut recorder);

        assert!(recorder.glyphs.is_empty());
        assert!(!recorder.images.is_empty());
        assert!(recorder.images.iter().all(|(handle, _)| handle.index() == 0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut animator = Animator::new(FallConfig::default(), Vec2::new(800.0, 600.0));
        animator.start(vec![test_image()]);
        animator.seed_initial();
        let seeded = animator.active_count();
        assert!(seeded > 0);

        // A second init pass must not reset sources or reseed.
        animator.start(Vec::new());
        animator.seed_initial();
        assert_eq!(animator.phase(), Phase::Running);
        assert_eq!(animator.active_count(), seeded);
        assert_eq!(animator.images().len(), 1);
    }

    #[test]
    fn test_seed_respects_max_and_upper_band() {
        let config = FallConfig {
            max_items: 5,
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(200.0, 1000.0));
        animator.seed_initial();

        assert_eq!(animator.active_count(), 5);
        for particle in animator.particles() {
            assert!(particle.position.y >= 0.0);
            assert!(particle.position.y <= 700.0);
        }
    }

    #[test]
    fn test_seed_before_start_does_nothing() {
        let mut animator = Animator::new(FallConfig::default(), Vec2::new(800.0, 600.0));
        animator.seed_initial();
        assert_eq!(animator.active_count(), 0);

        // Still allowed to seed once running.
        animator.start(Vec::new());
        animator.seed_initial();
        assert!(animator.active_count() > 0);
    }

    #[test]
    fn test_pause_blocks_ticks_and_resume_resets_baseline() {
        use std::time::Duration;

        let config = FallConfig {
            max_items: 1,
            spawn_rate: 1.0,
            min_speed: 1.0,
            max_speed: 1.0,
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));
        let start = Instant::now();

        animator.tick(start);
        let y_before = animator.particles()[0].position.y;
        assert_eq!(y_before, SPAWN_Y + 1.0);

        animator.pause();
        assert_eq!(animator.phase(), Phase::Paused);
        animator.tick(start + Duration::from_secs(5));
        assert_eq!(animator.particles()[0].position.y, y_before);

        // The hidden interval must not be replayed: the first resumed
        // frame advances by exactly one baseline step.
        animator.resume();
        animator.tick(start + Duration::from_secs(10));
        assert_eq!(animator.particles()[0].position.y, y_before + 1.0);
    }

    #[test]
    fn test_no_sources_spawns_nothing() {
        let config = FallConfig {
            spawn_rate: 1.0,
            characters: Vec::new(),
            ..Default::default()
        };
        let mut animator = running(config, Vec2::new(800.0, 600.0));
        animator.seed_initial();

        for _ in 0..20 {
            animator.advance(1.0);
        }
        assert_eq!(animator.active_count(), 0);
    }
}
