//! Batting session: pitch timer and swing gate
//!
//! A pitch schedules two timers: the swing window opens at a fraction of the
//! flight, and the arrival timer calls the pitch if nobody swung. Whichever
//! of swing or arrival runs first takes the live pitch; the other finds
//! nothing and does nothing.

use rand_pcg::Pcg32;
use serde::Serialize;

use super::batting::{self, Pitch};
use super::outcome::PlayEvent;
use super::roll::{RngState, Roll};
use super::schedule::{Scheduler, TimerId};
use super::state::MatchState;
use crate::error::Rejected;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PitchTimer {
    WindowOpens,
    Arrives,
}

#[derive(Debug, Clone, Copy)]
struct LivePitch {
    pitch: Pitch,
    can_swing: bool,
    arrival: TimerId,
}

/// Read-only view for the rendering side
#[derive(Debug, Clone, Serialize)]
pub struct BattingSnapshot<'a> {
    pub state: &'a MatchState,
    pub pitch: Option<Pitch>,
    pub can_swing: bool,
}

/// One batting game
#[derive(Debug)]
pub struct BattingSession<R = Pcg32> {
    state: MatchState,
    tuning: Tuning,
    rolls: R,
    timers: Scheduler<PitchTimer>,
    live: Option<LivePitch>,
    /// Calls made while handling a swing, delivered by the next `advance`
    backlog: Vec<PlayEvent>,
}

impl BattingSession<Pcg32> {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rolls(RngState::new(seed).to_rng(), tuning)
    }
}

impl<R: Roll> BattingSession<R> {
    pub fn with_rolls(rolls: R, tuning: Tuning) -> Self {
        Self {
            state: MatchState::new(tuning.inning_limit),
            tuning,
            rolls,
            timers: Scheduler::new(),
            live: None,
            backlog: Vec::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pitch(&self) -> Option<Pitch> {
        self.live.map(|l| l.pitch)
    }

    pub fn can_swing(&self) -> bool {
        self.live.is_some_and(|l| l.can_swing)
    }

    pub fn snapshot(&self) -> BattingSnapshot<'_> {
        BattingSnapshot {
            state: &self.state,
            pitch: self.pitch(),
            can_swing: self.can_swing(),
        }
    }

    /// Throw a pitch at time `now`
    pub fn start_pitch(&mut self, now: u64) -> Result<Pitch, Rejected> {
        if self.state.game_over {
            return Err(Rejected::GameOver);
        }
        if self.live.is_some() {
            return Err(Rejected::PitchInFlight);
        }
        let b = &self.tuning.batting;
        let pitch = Pitch::generate(&mut self.rolls, b);
        let flight = pitch.kind.flight_ms(b);
        let opens = (flight as f64 * b.hittable_fraction) as u64;
        self.timers.schedule_at(now + opens, PitchTimer::WindowOpens);
        let arrival = self
            .timers
            .schedule_at(now + flight + b.arrival_grace_ms, PitchTimer::Arrives);

        log::debug!("Pitch {:?} ({} ms, in zone: {})", pitch.kind, flight, pitch.in_zone);
        self.live = Some(LivePitch {
            pitch,
            can_swing: false,
            arrival,
        });
        Ok(pitch)
    }

    /// Swing (or bunt) at the live pitch. Only legal while the window is open.
    pub fn swing(&mut self, now: u64, bunt: bool) -> Result<PlayEvent, Rejected> {
        // Timers due before the swing run first
        let called = self.run_timers(now);
        self.backlog.extend(called);
        let Some(live) = self.live else {
            return Err(Rejected::NoLivePitch);
        };
        if !live.can_swing {
            return Err(Rejected::SwingWindowClosed);
        }

        self.live = None;
        self.timers.cancel(live.arrival);

        let b = &self.tuning.batting;
        let outcome =
            batting::swing_outcome(live.pitch, bunt, self.state.strikes, &mut self.rolls, b);
        let event = batting::apply_outcome(&mut self.state, outcome, &mut self.rolls, b);
        log::debug!("Swing (bunt: {}) -> {}", bunt, event.outcome);
        Ok(event)
    }

    /// Run timers due by `now`; returns the call on any pitch left untouched
    pub fn advance(&mut self, now: u64) -> Vec<PlayEvent> {
        let mut events = std::mem::take(&mut self.backlog);
        events.extend(self.run_timers(now));
        events
    }

    fn run_timers(&mut self, now: u64) -> Vec<PlayEvent> {
        let mut events = Vec::new();
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                PitchTimer::WindowOpens => {
                    if let Some(live) = self.live.as_mut() {
                        live.can_swing = true;
                    }
                }
                PitchTimer::Arrives => {
                    if let Some(live) = self.live.take() {
                        let event = batting::take_pitch(&mut self.state, live.pitch);
                        log::debug!("Pitch taken -> {}", event.outcome);
                        events.push(event);
                    }
                }
            }
        }
        events
    }

    /// Start over; pending timers are dropped before the state is cleared
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.live = None;
        self.backlog.clear();
        self.state = MatchState::new(self.tuning.inning_limit);
        log::info!("Batting game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;
    use crate::sim::roll::ScriptedRolls;
    use crate::sim::state::Bases;

    // Fastball: window opens at 320 ms, called at 1200 ms
    const FASTBALL_STRIKE: [f64; 2] = [0.0, 0.1];
    const FASTBALL_BALL: [f64; 2] = [0.0, 0.9];

    fn scripted() -> BattingSession<ScriptedRolls> {
        BattingSession::with_rolls(ScriptedRolls::default(), Tuning::default())
    }

    fn push(session: &mut BattingSession<ScriptedRolls>, rolls: &[f64]) {
        for &r in rolls {
            session.rolls.push(r);
        }
    }

    #[test]
    fn test_swing_window() {
        let mut s = scripted();
        push(&mut s, &FASTBALL_STRIKE);
        s.start_pitch(0).unwrap();
        assert_eq!(s.swing(100, false), Err(Rejected::SwingWindowClosed));
        assert!(!s.can_swing());

        s.advance(320);
        assert!(s.can_swing());

        // perfect timing, homer
        push(&mut s, &[0.1, 0.05]);
        let event = s.swing(500, false).unwrap();
        assert_eq!(event.outcome, Outcome::HomeRun);
        assert_eq!(s.state().score.away, 1);
        assert!(s.pitch().is_none());

        // Arrival timer was cancelled with the swing
        assert!(s.advance(5000).is_empty());
        assert_eq!(s.state().strikes, 0);
    }

    #[test]
    fn test_untouched_pitch_is_called() {
        let mut s = scripted();
        push(&mut s, &FASTBALL_STRIKE);
        s.start_pitch(0).unwrap();
        assert!(s.advance(1199).is_empty());
        let events = s.advance(1200);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::Strike);
        assert_eq!(s.state().strikes, 1);
        assert_eq!(s.swing(1300, false), Err(Rejected::NoLivePitch));
    }

    #[test]
    fn test_late_swing_loses_to_arrival() {
        let mut s = scripted();
        push(&mut s, &FASTBALL_BALL);
        s.start_pitch(0).unwrap();
        // The arrival timer is due first, so the swing finds no pitch
        assert_eq!(s.swing(1250, false), Err(Rejected::NoLivePitch));
        assert_eq!(s.state().balls, 1);
        // The call is still reported
        let events = s.advance(1300);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::Ball);
        assert!(s.advance(1400).is_empty());
    }

    #[test]
    fn test_one_pitch_at_a_time() {
        let mut s = scripted();
        push(&mut s, &FASTBALL_STRIKE);
        let pitch = s.start_pitch(0).unwrap();
        assert_eq!(s.start_pitch(10), Err(Rejected::PitchInFlight));
        assert_eq!(s.pitch(), Some(pitch));
    }

    #[test]
    fn test_four_called_balls_walk() {
        let mut s = scripted();
        s.state.runners = Bases::LOADED;
        let mut t = 0;
        for _ in 0..4 {
            push(&mut s, &FASTBALL_BALL);
            s.start_pitch(t).unwrap();
            t += 2000;
            s.advance(t);
        }
        assert_eq!(s.state().score.away, 1);
        assert!(s.state().runners.is_loaded());
        assert_eq!(s.state().balls, 0);
    }

    #[test]
    fn test_reset_cancels_pending_call() {
        let mut s = scripted();
        push(&mut s, &FASTBALL_STRIKE);
        s.start_pitch(0).unwrap();
        s.reset();
        assert!(s.advance(5000).is_empty());
        assert_eq!(s.state(), &MatchState::default());
        assert!(s.pitch().is_none());
    }

    #[test]
    fn test_no_pitches_after_game_over() {
        let mut s = scripted();
        s.state.game_over = true;
        assert_eq!(s.start_pitch(0), Err(Rejected::GameOver));
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = BattingSession::new(2024);
        let mut b = BattingSession::new(2024);
        let mut t = 0;
        for i in 0..200 {
            for s in [&mut a, &mut b] {
                let _ = s.start_pitch(t);
                s.advance(t + 600);
                if i % 3 != 0 {
                    let _ = s.swing(t + 700, i % 7 == 0);
                }
                s.advance(t + 2000);
            }
            t += 2000;
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_snapshot_serializes() {
        let s = BattingSession::new(1);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["state"]["inning"], 1);
        assert_eq!(json["can_swing"], false);
    }
}
