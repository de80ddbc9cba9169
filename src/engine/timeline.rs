//! Phase sequencing for the pour animation
//!
//! Three fixed phases run back to back on one clock: five seconds of
//! pouring, half a second of bounce, then the checkmark reveal. The
//! timeline does not own the clock. An external driver derives each
//! phase's progress from the published offsets and durations and reports
//! ticks here; the engine reads back ordering and completion.

use super::easing::Easing;

/// Animation phases in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Pour stream and rising wave surface.
    Filling,
    /// The liquid settles into a bouncing ball.
    Bouncing,
    /// Two-stroke checkmark reveal.
    Ticking,
}

impl Phase {
    /// All phases in playback order.
    pub const ALL: [Phase; 3] = [Phase::Filling, Phase::Bouncing, Phase::Ticking];

    /// Fixed timing and easing for this phase.
    pub fn spec(self) -> PhaseSpec {
        match self {
            Phase::Filling => PhaseSpec::FILLING,
            Phase::Bouncing => PhaseSpec::BOUNCING,
            Phase::Ticking => PhaseSpec::TICKING,
        }
    }
}

/// Fixed timing of one phase on the shared sequence clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpec {
    /// Offset from sequence start, in milliseconds.
    pub start_offset: u64,
    /// Nominal running time, in milliseconds.
    pub duration: u64,
    /// Curve applied to the raw elapsed-time fraction.
    pub easing: Easing,
}

impl PhaseSpec {
    pub const FILLING: Self = Self {
        start_offset: 0,
        duration: 5000,
        easing: Easing::FILL,
    };
    pub const BOUNCING: Self = Self {
        start_offset: 5000,
        duration: 500,
        easing: Easing::BOUNCE,
    };
    pub const TICKING: Self = Self {
        start_offset: 5500,
        duration: 800,
        easing: Easing::TICK,
    };

    /// Offset at which this phase's window ends.
    pub fn end_offset(&self) -> u64 {
        self.start_offset + self.duration
    }
}

/// Sequencer state: which phase is running and which have completed.
///
/// Idle until the first [`start`](Timeline::start). `Ticking` is
/// terminal; a fresh `start` is the only way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeline {
    phase: Option<Phase>,
    finished: [bool; 3],
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)enter the filling phase with all completion flags cleared.
    pub fn start(&mut self) {
        self.phase = Some(Phase::Filling);
        self.finished = [false; 3];
    }

    /// Currently running phase, `None` while idle.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase.is_none()
    }

    /// Whether `phase` has received its final tick.
    pub fn is_finished(&self, phase: Phase) -> bool {
        self.finished[phase as usize]
    }

    /// Record one driver tick for `phase`.
    ///
    /// Moves the running phase forward when a later phase first reports,
    /// and marks `phase` complete once its raw progress reaches 1.0.
    /// Returns false for ticks that cannot apply: while idle, or for a
    /// phase the sequence has already moved past.
    pub fn observe(&mut self, phase: Phase, raw_progress: f32) -> bool {
        let Some(current) = self.phase else {
            return false;
        };
        if phase < current {
            return false;
        }
        if phase > current {
            tracing::debug!(from = ?current, to = ?phase, "phase transition");
            self.phase = Some(phase);
        }
        if raw_progress >= 1.0 {
            self.finished[phase as usize] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_windows_are_back_to_back() {
        assert_eq!(PhaseSpec::FILLING.end_offset(), PhaseSpec::BOUNCING.start_offset);
        assert_eq!(PhaseSpec::BOUNCING.end_offset(), PhaseSpec::TICKING.start_offset);
        assert_eq!(PhaseSpec::TICKING.end_offset(), 6300);
    }

    #[test]
    fn idle_timeline_rejects_ticks() {
        let mut tl = Timeline::new();
        assert!(!tl.observe(Phase::Filling, 0.5));
        assert!(tl.is_idle());
        assert!(!tl.is_finished(Phase::Filling));
    }

    #[test]
    fn completion_needs_full_progress() {
        let mut tl = Timeline::new();
        tl.start();
        assert!(tl.observe(Phase::Filling, 0.99));
        assert!(!tl.is_finished(Phase::Filling));
        assert!(tl.observe(Phase::Filling, 1.0));
        assert!(tl.is_finished(Phase::Filling));
    }

    #[test]
    fn transitions_only_move_forward() {
        let mut tl = Timeline::new();
        tl.start();
        assert!(tl.observe(Phase::Bouncing, 0.1));
        assert_eq!(tl.phase(), Some(Phase::Bouncing));
        assert!(!tl.observe(Phase::Filling, 1.0), "stale ticks bounce off");
        assert!(!tl.is_finished(Phase::Filling));
    }

    #[test]
    fn ticking_is_terminal_until_restart() {
        let mut tl = Timeline::new();
        tl.start();
        tl.observe(Phase::Filling, 1.0);
        tl.observe(Phase::Bouncing, 1.0);
        tl.observe(Phase::Ticking, 1.0);
        assert_eq!(tl.phase(), Some(Phase::Ticking));
        assert!(tl.is_finished(Phase::Ticking));

        tl.start();
        assert_eq!(tl.phase(), Some(Phase::Filling));
        for phase in Phase::ALL {
            assert!(!tl.is_finished(phase), "restart clears {phase:?}");
        }
    }

    #[test]
    fn restarting_twice_matches_a_single_start() {
        let mut once = Timeline::new();
        once.start();
        let mut twice = Timeline::new();
        twice.start();
        twice.start();
        assert_eq!(once, twice);
    }
}
