//! L2 Organism Layer: Round/pause state machine
//!
//! Sequences `Idle → Delaying → Running → Pausing → Running … → Stopped` on
//! top of a [`ScrollAnimator`]. All transitions happen inside `mount`,
//! `tick`, or the explicit control calls; the host drives time by passing
//! `Instant`s, so nothing here sleeps or spawns.
//!
//! | phase    | trigger                         | next                                  |
//! |----------|---------------------------------|---------------------------------------|
//! | Idle     | `mount`                         | Delaying (or Running if no delay)     |
//! | Delaying | start timer fires               | Running, forward leg from 0           |
//! | Running  | leg completes, rounds remaining | Pausing (or Running if no pause)      |
//! | Running  | leg completes, limit reached    | Stopped (`Done`)                      |
//! | Pausing  | pause timer fires               | Running next leg, or Stopped if asked |
//! | any      | `stop` / `destroy`              | Stopped / Idle, timer cancelled       |

use std::time::{Duration, Instant};

use super::animator::{Completion, RunDirection, ScrollAnimator};
use crate::config::MarqueeConfig;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Delaying,
    Running,
    Pausing,
    Stopped,
}

/// Observable transitions, drained by the host after each call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeEvent {
    /// First leg began after the start delay
    Started,
    /// A leg reached its endpoint
    LegCompleted(RunDirection),
    /// Total rounds completed so far
    RoundCompleted(u32),
    /// Waiting before the next leg
    Paused,
    /// Next leg began after a pause
    Resumed,
    /// Round limit reached; fires once
    Done,
    /// Halted by an explicit stop request
    Stopped,
}

/// Timing and round settings taken from the marquee config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub bounce: bool,
    pub start_after: Duration,
    pub pause_after_round: Duration,
    pub number_of_rounds: Option<u32>,
}

impl RoundSettings {
    pub fn from_config(config: &MarqueeConfig) -> Self {
        Self {
            bounce: config.bounce(),
            start_after: config.start_after(),
            pause_after_round: config.pause_after_round(),
            number_of_rounds: config.number_of_rounds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPurpose {
    StartDelay,
    RoundPause,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    deadline: Instant,
    purpose: TimerPurpose,
}

/// Round/pause controller owning the scroll animator
#[derive(Debug, Clone)]
pub struct RoundController {
    animator: ScrollAnimator,
    settings: RoundSettings,
    phase: Phase,
    timer: Option<PendingTimer>,
    rounds_completed: u32,
    /// Leg to run when the current pause ends
    next_leg: RunDirection,
    /// Stop at the next round boundary instead of continuing
    stop_requested: bool,
    /// Cleared on teardown; every entry point checks it
    alive: bool,
    last_frame: Option<Instant>,
    events: Vec<MarqueeEvent>,
}

impl RoundController {
    pub fn new(animator: ScrollAnimator, settings: RoundSettings) -> Self {
        Self {
            animator,
            settings,
            phase: Phase::Idle,
            timer: None,
            rounds_completed: 0,
            next_leg: RunDirection::Forward,
            stop_requested: false,
            alive: true,
            last_frame: None,
            events: Vec::new(),
        }
    }

    /// Leave `Idle` and wait out the start delay
    pub fn mount(&mut self, now: Instant) {
        if !self.alive || self.phase != Phase::Idle {
            return;
        }

        if self.settings.start_after.is_zero() {
            self.begin_leg(now, RunDirection::Forward);
            self.events.push(MarqueeEvent::Started);
        } else {
            self.schedule(now + self.settings.start_after, TimerPurpose::StartDelay);
            self.set_phase(Phase::Delaying);
        }
    }

    /// Advance to `now`: fire a due timer or step the running leg
    pub fn tick(&mut self, now: Instant) {
        if !self.alive {
            tracing::trace!("Tick after teardown ignored");
            return;
        }

        match self.phase {
            Phase::Idle | Phase::Stopped => {}
            Phase::Delaying | Phase::Pausing => {
                if let Some(timer) = self.timer {
                    if timer.deadline <= now {
                        self.timer = None;
                        self.fire(timer);
                        // The leg began at the deadline; catch up to `now`
                        if self.phase == Phase::Running {
                            self.advance(now);
                        }
                    }
                }
            }
            Phase::Running => self.advance(now),
        }
    }

    /// Halt immediately, freezing the text where it is
    pub fn stop(&mut self) {
        if !self.alive || matches!(self.phase, Phase::Stopped) {
            return;
        }
        self.timer = None;
        self.animator.freeze();
        self.set_phase(Phase::Stopped);
        self.events.push(MarqueeEvent::Stopped);
    }

    /// Stop at the next round boundary
    ///
    /// A stop pending when a pause ends wins over the resume.
    pub fn finish_round(&mut self) {
        if !self.alive {
            return;
        }
        match self.phase {
            Phase::Idle | Phase::Delaying => self.stop(),
            Phase::Running | Phase::Pausing => self.stop_requested = true,
            Phase::Stopped => {}
        }
    }

    /// Reset rounds and start over from the start delay
    pub fn restart(&mut self, now: Instant) {
        if !self.alive {
            return;
        }
        self.timer = None;
        self.rounds_completed = 0;
        self.stop_requested = false;
        self.next_leg = RunDirection::Forward;
        self.last_frame = None;
        self.animator.reset();
        self.set_phase(Phase::Idle);
        self.mount(now);
    }

    /// Replace the animator and settings, then restart
    pub fn rebuild(&mut self, animator: ScrollAnimator, settings: RoundSettings, now: Instant) {
        if !self.alive {
            return;
        }
        self.animator = animator;
        self.settings = settings;
        self.restart(now);
    }

    /// Teardown: cancel the pending timer and ignore every later call
    pub fn destroy(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.timer = None;
        self.animator.freeze();
        self.phase = Phase::Idle;
        self.events.clear();
        tracing::debug!("Marquee controller torn down");
    }

    pub fn drain_events(&mut self) -> Vec<MarqueeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True only while a leg is visibly running
    pub fn is_animating(&self) -> bool {
        self.alive && self.phase == Phase::Running
    }

    /// The host should schedule another frame
    pub fn needs_frame(&self) -> bool {
        self.is_animating()
    }

    /// Deadline of the pending delay or pause, if any
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.timer.map(|timer| timer.deadline)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut ScrollAnimator {
        &mut self.animator
    }

    pub fn current_offset(&self) -> f64 {
        self.animator.current_offset()
    }

    fn fire(&mut self, timer: PendingTimer) {
        match timer.purpose {
            TimerPurpose::StartDelay => {
                self.begin_leg(timer.deadline, RunDirection::Forward);
                self.events.push(MarqueeEvent::Started);
            }
            TimerPurpose::RoundPause => {
                if self.stop_requested && self.at_round_boundary() {
                    self.halt_requested();
                    return;
                }
                let leg = self.next_leg;
                self.begin_leg(timer.deadline, leg);
                self.events.push(MarqueeEvent::Resumed);
            }
        }
    }

    /// Step the running leg by the time since the last frame
    fn advance(&mut self, now: Instant) {
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        if let Some(completion) = self.animator.tick(elapsed) {
            self.on_completion(now, completion);
        }
    }

    fn on_completion(&mut self, now: Instant, completion: Completion) {
        self.events.push(MarqueeEvent::LegCompleted(completion.direction));
        // Pauses and the next leg are measured from the endpoint itself
        let completed_at = now.checked_sub(completion.overshoot).unwrap_or(now);

        let round_done = !self.settings.bounce || completion.direction == RunDirection::Reverse;
        self.next_leg = if self.settings.bounce {
            completion.direction.flipped()
        } else {
            RunDirection::Forward
        };

        if round_done {
            self.rounds_completed += 1;
            self.events.push(MarqueeEvent::RoundCompleted(self.rounds_completed));
            tracing::debug!(rounds = self.rounds_completed, "Marquee round completed");

            if let Some(limit) = self.settings.number_of_rounds {
                if self.rounds_completed >= limit {
                    self.timer = None;
                    self.set_phase(Phase::Stopped);
                    self.events.push(MarqueeEvent::Done);
                    return;
                }
            }
            if self.stop_requested {
                self.halt_requested();
                return;
            }
        }

        if self.settings.pause_after_round.is_zero() {
            let leg = self.next_leg;
            self.begin_leg(completed_at, leg);
            // Less than a full cycle left over, so the new leg cannot also complete
            if completion.overshoot < self.animator.cycle() {
                self.advance(now);
            }
        } else {
            self.schedule(
                completed_at + self.settings.pause_after_round,
                TimerPurpose::RoundPause,
            );
            self.set_phase(Phase::Pausing);
            self.events.push(MarqueeEvent::Paused);
        }
    }

    fn begin_leg(&mut self, at: Instant, leg: RunDirection) {
        match leg {
            RunDirection::Forward => self.animator.start(0.0),
            RunDirection::Reverse => self.animator.reverse_from(1.0),
        }
        self.last_frame = Some(at);
        self.set_phase(Phase::Running);
    }

    fn halt_requested(&mut self) {
        self.stop_requested = false;
        self.timer = None;
        self.animator.freeze();
        self.set_phase(Phase::Stopped);
        self.events.push(MarqueeEvent::Stopped);
    }

    fn at_round_boundary(&self) -> bool {
        self.next_leg == RunDirection::Forward
    }

    fn schedule(&mut self, deadline: Instant, purpose: TimerPurpose) {
        self.timer = Some(PendingTimer { deadline, purpose });
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "Marquee phase change");
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::easing::EasingType;

    const SEC: Duration = Duration::from_secs(1);

    /// One-second cycle over a 100-unit extent
    fn controller(settings: RoundSettings) -> RoundController {
        let animator = ScrollAnimator::new(SEC, 100.0, EasingType::Linear, false);
        RoundController::new(animator, settings)
    }

    fn settings() -> RoundSettings {
        RoundSettings {
            bounce: false,
            start_after: Duration::ZERO,
            pause_after_round: Duration::ZERO,
            number_of_rounds: None,
        }
    }

    #[test]
    fn test_mount_without_delay_runs_immediately() {
        let t0 = Instant::now();
        let mut ctl = controller(settings());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(!ctl.is_animating());

        ctl.mount(t0);
        assert_eq!(ctl.phase(), Phase::Running);
        assert!(ctl.is_animating());
        assert_eq!(ctl.drain_events(), vec![MarqueeEvent::Started]);
    }

    #[test]
    fn test_start_delay() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            start_after: 2 * SEC,
            ..settings()
        });
        ctl.mount(t0);
        assert_eq!(ctl.phase(), Phase::Delaying);
        assert!(!ctl.needs_frame());
        assert_eq!(ctl.next_wakeup(), Some(t0 + 2 * SEC));

        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Delaying);

        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        assert_eq!(ctl.next_wakeup(), None);
        assert_eq!(ctl.current_offset(), 100.0);

        ctl.tick(t0 + 2 * SEC + SEC / 2);
        assert!((ctl.current_offset() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_rounds_with_pauses() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            pause_after_round: SEC,
            number_of_rounds: Some(3),
            ..settings()
        });
        ctl.mount(t0);

        // round 1 ends at t=1, pause until t=2
        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        assert_eq!(ctl.rounds_completed(), 1);
        assert!(!ctl.is_animating());

        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        ctl.tick(t0 + 3 * SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        assert_eq!(ctl.rounds_completed(), 2);

        ctl.tick(t0 + 4 * SEC);
        ctl.tick(t0 + 5 * SEC);
        // no pause after the final round
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(ctl.rounds_completed(), 3);
        assert_eq!(ctl.next_wakeup(), None);

        let events = ctl.drain_events();
        assert_eq!(
            events.iter().filter(|e| **e == MarqueeEvent::Paused).count(),
            2
        );
        assert_eq!(events.last(), Some(&MarqueeEvent::Done));

        // frozen at the last offset
        let offset = ctl.current_offset();
        ctl.tick(t0 + 10 * SEC);
        assert_eq!(ctl.current_offset(), offset);
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn test_zero_pause_restarts_same_turn() {
        let t0 = Instant::now();
        let mut ctl = controller(settings());
        ctl.mount(t0);
        ctl.drain_events();

        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        assert_eq!(ctl.rounds_completed(), 1);
        assert_eq!(ctl.current_offset(), 100.0);
        assert_eq!(
            ctl.drain_events(),
            vec![
                MarqueeEvent::LegCompleted(RunDirection::Forward),
                MarqueeEvent::RoundCompleted(1),
            ]
        );
    }

    #[test]
    fn test_late_start_timer_catches_up() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            start_after: SEC,
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);

        // Delay ended at t=1; first frame lands half a second into the leg
        ctl.tick(t0 + SEC + SEC / 2);
        assert_eq!(ctl.phase(), Phase::Running);
        assert!((ctl.current_offset() - 50.0).abs() < 1e-6);

        // Leg ends at t=2, pause until t=3; first frame 0.75s into leg two
        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        ctl.tick(t0 + Duration::from_millis(3750));
        assert_eq!(ctl.phase(), Phase::Running);
        assert!((ctl.current_offset() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_late_timer_can_complete_the_leg() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            start_after: SEC,
            number_of_rounds: Some(1),
            ..settings()
        });
        ctl.mount(t0);
        ctl.drain_events();

        ctl.tick(t0 + 5 * SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(
            ctl.drain_events(),
            vec![
                MarqueeEvent::Started,
                MarqueeEvent::LegCompleted(RunDirection::Forward),
                MarqueeEvent::RoundCompleted(1),
                MarqueeEvent::Done,
            ]
        );
    }

    #[test]
    fn test_pause_measured_from_endpoint() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);

        // Leg ended at t=1 but was only observed at t=1.25
        ctl.tick(t0 + SEC + SEC / 4);
        assert_eq!(ctl.phase(), Phase::Pausing);
        assert_eq!(ctl.next_wakeup(), Some(t0 + 2 * SEC));
    }

    #[test]
    fn test_zero_pause_carries_leftover_time() {
        let t0 = Instant::now();
        let mut ctl = controller(settings());
        ctl.mount(t0);

        // Frames that never land on a cycle boundary
        let step = Duration::from_millis(350);
        for i in 1..=10 {
            ctl.tick(t0 + step * i);
        }
        // 3.5s elapsed: three rounds done, halfway through the fourth
        assert_eq!(ctl.rounds_completed(), 3);
        assert!((ctl.animator().progress() - 0.5).abs() < 1e-6);
        assert_eq!(ctl.phase(), Phase::Running);
    }

    #[test]
    fn test_unbounded_never_stops() {
        let t0 = Instant::now();
        let mut ctl = controller(settings());
        ctl.mount(t0);
        for i in 1..=50 {
            ctl.tick(t0 + i * SEC);
        }
        assert_eq!(ctl.phase(), Phase::Running);
        assert_eq!(ctl.rounds_completed(), 50);
    }

    #[test]
    fn test_bounce_alternates_and_counts_pairs() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            bounce: true,
            number_of_rounds: Some(2),
            ..settings()
        });
        ctl.mount(t0);

        ctl.tick(t0 + SEC);
        assert_eq!(ctl.animator().direction(), RunDirection::Reverse);
        assert_eq!(ctl.rounds_completed(), 0);
        assert_eq!(ctl.current_offset(), 0.0);

        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.animator().direction(), RunDirection::Forward);
        assert_eq!(ctl.rounds_completed(), 1);
        assert_eq!(ctl.current_offset(), 100.0);

        ctl.tick(t0 + 3 * SEC);
        ctl.tick(t0 + 4 * SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(ctl.rounds_completed(), 2);
    }

    #[test]
    fn test_bounce_direction_switch_is_continuous() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            bounce: true,
            ..settings()
        });
        ctl.mount(t0);

        let mut prev = ctl.current_offset();
        for i in 1..=400 {
            ctl.tick(t0 + Duration::from_millis(10 * i));
            let offset = ctl.current_offset();
            assert!((offset - prev).abs() <= 1.0 + 1e-9, "jump from {} to {}", prev, offset);
            prev = offset;
        }
    }

    #[test]
    fn test_bounce_pauses_between_legs() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            bounce: true,
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);

        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        assert_eq!(ctl.animator().direction(), RunDirection::Reverse);
        ctl.tick(t0 + 3 * SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        assert_eq!(ctl.rounds_completed(), 1);
    }

    #[test]
    fn test_finish_round_beats_pending_resume() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);
        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);

        ctl.finish_round();
        ctl.drain_events();
        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(ctl.drain_events(), vec![MarqueeEvent::Stopped]);
    }

    #[test]
    fn test_finish_round_mid_bounce_completes_return_leg() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            bounce: true,
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);
        ctl.tick(t0 + SEC);
        ctl.finish_round();

        ctl.tick(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        ctl.tick(t0 + 3 * SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(ctl.rounds_completed(), 1);
    }

    #[test]
    fn test_stop_freezes_offset() {
        let t0 = Instant::now();
        let mut ctl = controller(settings());
        ctl.mount(t0);
        ctl.tick(t0 + SEC / 4);
        ctl.stop();
        let offset = ctl.current_offset();
        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);
        assert_eq!(ctl.current_offset(), offset);
    }

    #[test]
    fn test_restart_resets_rounds() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            number_of_rounds: Some(1),
            ..settings()
        });
        ctl.mount(t0);
        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Stopped);

        ctl.restart(t0 + 2 * SEC);
        assert_eq!(ctl.phase(), Phase::Running);
        assert_eq!(ctl.rounds_completed(), 0);
        assert_eq!(ctl.current_offset(), 100.0);
    }

    #[test]
    fn test_destroy_during_delay_cancels_timer() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            start_after: SEC,
            ..settings()
        });
        ctl.mount(t0);
        ctl.destroy();
        assert_eq!(ctl.next_wakeup(), None);

        ctl.tick(t0 + 5 * SEC);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(!ctl.is_animating());
        assert!(ctl.drain_events().is_empty());
        assert_eq!(ctl.animator().progress(), 0.0);
    }

    #[test]
    fn test_destroy_during_pause_is_final() {
        let t0 = Instant::now();
        let mut ctl = controller(RoundSettings {
            pause_after_round: SEC,
            ..settings()
        });
        ctl.mount(t0);
        ctl.tick(t0 + SEC);
        assert_eq!(ctl.phase(), Phase::Pausing);
        ctl.destroy();

        ctl.tick(t0 + 3 * SEC);
        ctl.restart(t0 + 3 * SEC);
        ctl.mount(t0 + 3 * SEC);
        ctl.stop();
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.rounds_completed(), 1);
        assert!(ctl.drain_events().is_empty());
    }
}
