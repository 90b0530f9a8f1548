//! Debounce filter for the blocked signal.
//!
//! The obstruction probe can flicker on and off rapidly near a surface edge.
//! Writing every raw result into the blend makes the avatar's arm jitter, so
//! the blocked signal is only allowed to change once per debounce window.

use std::time::Duration;

/// Default window during which blocked-signal writes are suppressed.
pub const DEFAULT_BLOCK_DEBOUNCE: Duration = Duration::from_millis(100);

/// Whether a debounce window is currently pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// No window pending; writes pass through.
    #[default]
    NoPending,
    /// A hit was observed at this instant (time since app start); writes
    /// are suppressed until the window elapses.
    PendingSince(Duration),
}

/// Rate limiter for the blocked signal.
///
/// [`observe`](BlockDebounce::observe) is called once per sample tick with
/// the current probe result and decides whether the signal write is allowed
/// this tick. Timestamps are durations since app start, so the filter can be
/// driven by a test clock.
#[derive(Debug, Clone)]
pub struct BlockDebounce {
    window: Duration,
    state: BlockState,
}

impl Default for BlockDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_DEBOUNCE)
    }
}

impl BlockDebounce {
    /// Create a filter with the given suppression window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: BlockState::NoPending,
        }
    }

    /// The configured suppression window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// The current pending state.
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Feed one probe result; returns whether the signal write is allowed.
    ///
    /// A hit while no window is pending starts a new window but still allows
    /// the write. While a window is pending every write is suppressed. Once
    /// the window elapses the write is allowed again and, if the hit
    /// persists, a fresh window starts on the same tick.
    pub fn observe(&mut self, now: Duration, did_hit: bool) -> bool {
        match self.state {
            BlockState::NoPending => {
                if did_hit {
                    self.state = BlockState::PendingSince(now);
                }
                true
            }
            BlockState::PendingSince(since) => {
                if now.saturating_sub(since) > self.window {
                    self.state = if did_hit {
                        BlockState::PendingSince(now)
                    } else {
                        BlockState::NoPending
                    };
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drop any pending window.
    pub fn reset(&mut self) {
        self.state = BlockState::NoPending;
    }
}
