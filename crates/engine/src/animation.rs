//! Entry animation timing. Purely cosmetic; nothing interactive waits on it.

use std::time::Duration;

pub const COUNTER_DELAY: Duration = Duration::from_millis(1000);
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const CARD_STAGGER: Duration = Duration::from_millis(50);
pub const CARD_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    /// Overshoots by the given factor before settling.
    BackOut(f32),
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub delay: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(delay: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            ease,
        }
    }

    /// A tween that has already finished at any elapsed time.
    pub fn settled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Ease::Linear)
    }

    pub fn counter() -> Self {
        Self::new(COUNTER_DELAY, COUNTER_DURATION, Ease::Power2Out)
    }

    /// Card `index` of a freshly rendered grid, relative to the grid opening.
    pub fn card(index: usize) -> Self {
        Self::new(CARD_STAGGER * index as u32, CARD_DURATION, Ease::Power2Out)
    }

    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        if t >= 1.0 {
            1.0
        } else {
            self.ease.apply(t)
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }

    /// Integer value counted up towards `target`.
    pub fn count(&self, target: u64, elapsed: Duration) -> u64 {
        let value = (target as f32 * self.progress(elapsed)).round();
        (value.max(0.0) as u64).min(target)
    }
}
