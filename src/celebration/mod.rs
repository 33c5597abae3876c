//! Game-over confetti timing.
//!
//! When a game finishes with winners the renderer plays a short confetti
//! show: for four seconds, every 350 ms, one burst from the left and one
//! from the right. This module owns only the timing and burst parameters;
//! drawing is up to the host.
//!
//! A [`Celebration`] never sees the scorecard. The host feeds it the
//! scorecard's `celebrate()` flag through [`Celebration::sync`], which arms
//! the show on a rising edge and cancels it as soon as the flag drops.
//! Dropping the value (view torn down) releases everything.
//!
//! ```
//! use std::time::Duration;
//! use dutch_scorecard::celebration::Celebration;
//!
//! let mut show = Celebration::new(7);
//! show.sync(true);
//!
//! let bursts = show.advance(Duration::from_millis(350));
//! assert_eq!(bursts.len(), 2);
//!
//! show.sync(false);
//! assert!(show.advance(Duration::from_secs(1)).is_empty());
//! ```

use std::ops::Range;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Confetti colors.
pub const PALETTE: [&str; 5] = ["#FFD700", "#FFA500", "#FF4500", "#9370DB", "#BA55D3"];

/// Timing and burst shape.
#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationConfig {
    /// Total length of the show.
    pub duration: Duration,
    /// Time between burst pairs.
    pub interval: Duration,
    pub particle_count: u32,
    pub start_velocity: Range<f32>,
    pub spread: f32,
    /// Particle lifetime in animation frames.
    pub ticks: u32,
    pub gravity: f32,
    /// Horizontal origin range of the left burst (0..1 of the width).
    pub left_origin: Range<f32>,
    /// Horizontal origin range of the right burst.
    pub right_origin: Range<f32>,
    /// Vertical origin of both bursts.
    pub origin_y: f32,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(4000),
            interval: Duration::from_millis(350),
            particle_count: 35,
            start_velocity: 12.0..22.0,
            spread: 70.0,
            ticks: 120,
            gravity: 0.7,
            left_origin: 0.1..0.3,
            right_origin: 0.7..0.9,
            origin_y: 0.5,
        }
    }
}

/// One confetti burst for the renderer to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Burst {
    pub particle_count: u32,
    pub start_velocity: f32,
    pub spread: f32,
    pub ticks: u32,
    pub gravity: f32,
    /// `(x, y)` as fractions of the drawing area.
    pub origin: (f32, f32),
    pub colors: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { elapsed: Duration, fired: u32 },
    Finished,
}

/// Timer for the confetti show.
#[derive(Clone, Debug)]
pub struct Celebration {
    config: CelebrationConfig,
    rng: ChaCha8Rng,
    phase: Phase,
}

impl Celebration {
    /// Create an idle show with the default shape.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(CelebrationConfig::default(), seed)
    }

    /// Create an idle show with a custom shape.
    #[must_use]
    pub fn with_config(config: CelebrationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: Phase::Idle,
        }
    }

    /// Follow the scorecard's celebrate flag.
    ///
    /// Starts the show when the flag is set and the show is idle; a show
    /// that already ran stays finished until the flag drops. Clearing the
    /// flag cancels a running show. Returns true while running.
    pub fn sync(&mut self, celebrate: bool) -> bool {
        match (celebrate, self.phase) {
            (true, Phase::Idle) => {
                tracing::debug!("celebration started");
                self.phase = Phase::Running {
                    elapsed: Duration::ZERO,
                    fired: 0,
                };
            }
            (false, Phase::Running { .. }) => self.cancel(),
            (false, _) => self.phase = Phase::Idle,
            (true, _) => {}
        }
        self.is_running()
    }

    /// Stop immediately and return to idle.
    pub fn cancel(&mut self) {
        if self.is_running() {
            tracing::debug!("celebration cancelled");
        }
        self.phase = Phase::Idle;
    }

    /// True while bursts are still being produced.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// True once a show has played to the end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Advance the clock by `dt` and return the bursts that fell due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Burst> {
        let Phase::Running { elapsed, fired } = self.phase else {
            return Vec::new();
        };

        let elapsed = elapsed + dt;
        let interval = self.config.interval.as_nanos().max(1);
        let due = u32::try_from(elapsed.as_nanos() / interval).unwrap_or(u32::MAX);

        let mut bursts = Vec::new();
        let mut fired_now = fired;
        while fired_now < due {
            let at = self.config.interval * (fired_now + 1);
            if at >= self.config.duration {
                self.phase = Phase::Finished;
                return bursts;
            }
            bursts.push(self.burst(self.config.left_origin.clone()));
            bursts.push(self.burst(self.config.right_origin.clone()));
            fired_now += 1;
        }

        self.phase = Phase::Running {
            elapsed,
            fired: fired_now,
        };
        bursts
    }

    fn burst(&mut self, origin_x: Range<f32>) -> Burst {
        Burst {
            particle_count: self.config.particle_count,
            start_velocity: self.rng.gen_range(self.config.start_velocity.clone()),
            spread: self.config.spread,
            ticks: self.config.ticks,
            gravity: self.config.gravity,
            origin: (self.rng.gen_range(origin_x), self.config.origin_y),
            colors: &PALETTE,
        }
    }
}
