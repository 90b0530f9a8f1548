//! Session state for the pointing controller.

use std::time::Duration;

use bevy::prelude::*;

use crate::debounce::BlockDebounce;

/// Lifecycle phase of the pointing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointingPhase {
    /// Not pointing; inputs may start a session.
    #[default]
    Idle,
    /// Start accepted; waiting for the animation asset to load.
    Starting,
    /// Pointing; the sampler drives the blend signals.
    Active,
}

/// What a stop call owes the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Session was idle; nothing to do.
    WasIdle,
    /// Start never completed; only local state was dropped, no teardown
    /// commands are owed.
    SamplerOnly,
    /// The task was attached; full teardown commands must be emitted.
    FullTeardown,
}

/// Singleton state for the locally controlled avatar's pointing session.
///
/// All mutation happens inside the plugin's systems, which Bevy schedules
/// without overlap; the phase field doubles as the reentrancy guard. The
/// generation counter ties an in-flight animation load to the start that
/// requested it, so a stop during the load abandons the attach instead of
/// leaving an untracked task behind.
#[derive(Resource, Debug)]
pub struct PointingSession {
    phase: PointingPhase,
    clean_start: bool,
    generation: u32,
    sample_timer: Option<Timer>,
    /// Debounce filter for the blocked signal; reset on each activation.
    pub debounce: BlockDebounce,
}

impl PointingSession {
    /// Create an idle session with the given blocked-signal debounce window.
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            phase: PointingPhase::Idle,
            clean_start: false,
            generation: 0,
            sample_timer: None,
            debounce: BlockDebounce::new(debounce_window),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PointingPhase {
        self.phase
    }

    /// Whether a session is underway (starting or active).
    pub fn is_active(&self) -> bool {
        self.phase != PointingPhase::Idle
    }

    /// Whether the task attach completed and teardown is owed on stop.
    pub fn clean_start(&self) -> bool {
        self.clean_start
    }

    /// Generation of the current (or most recent) start/stop edge.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Accept a start request.
    ///
    /// Returns the generation the start belongs to, or `None` if a session
    /// is already underway (reentrant starts are no-ops).
    pub fn begin_start(&mut self) -> Option<u32> {
        if self.is_active() {
            return None;
        }
        self.phase = PointingPhase::Starting;
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// Record a successful task attach for `generation` and arm the sampler.
    ///
    /// Returns false if the session has moved on since that start (a stop
    /// raced the animation load); the caller must not attach anything.
    pub fn attach_succeeded(&mut self, generation: u32, sample_period: Duration) -> bool {
        if self.phase != PointingPhase::Starting || generation != self.generation {
            return false;
        }
        self.clean_start = true;
        self.sample_timer = Some(Timer::new(sample_period, TimerMode::Repeating));
        self.debounce.reset();
        self.phase = PointingPhase::Active;
        true
    }

    /// Record a failed start for `generation`.
    ///
    /// The session stays active but degraded: no sampler runs and the next
    /// stop skips teardown. This mirrors the best-effort recovery the
    /// feature has always had rather than escalating the fault.
    pub fn attach_failed(&mut self, generation: u32) {
        if self.phase != PointingPhase::Starting || generation != self.generation {
            return;
        }
        self.clean_start = false;
        self.sample_timer = None;
        self.phase = PointingPhase::Active;
    }

    /// Stop the session, reporting what teardown the caller owes.
    pub fn stop(&mut self) -> StopOutcome {
        if !self.is_active() {
            return StopOutcome::WasIdle;
        }
        self.sample_timer = None;
        self.phase = PointingPhase::Idle;
        self.generation = self.generation.wrapping_add(1);
        if !self.clean_start {
            return StopOutcome::SamplerOnly;
        }
        self.clean_start = false;
        StopOutcome::FullTeardown
    }

    /// Advance the sampler; returns true when a sample is due this frame.
    pub fn sampler_due(&mut self, delta: Duration) -> bool {
        if self.phase != PointingPhase::Active {
            return false;
        }
        let Some(timer) = self.sample_timer.as_mut() else {
            return false;
        };
        timer.tick(delta).just_finished()
    }
}
