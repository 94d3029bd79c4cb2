//! Fielding simulation
//!
//! A batted ball flies in a straight line toward its landing spot at a fixed
//! speed per frame. Each frame the ball moves, then it is caught if it is
//! within the catch radius of the glove, or missed once it has landed.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::outcome::{Outcome, PlayEvent};
use super::roll::{RngState, Roll};
use super::schedule::{Scheduler, TimerId};
use super::state::MatchState;
use crate::clamp_point;
use crate::error::Rejected;
use crate::tuning::{FieldingTuning, Tuning};

/// Batted ball trajectory class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallKind {
    Fly,
    Ground,
    Line,
}

impl BallKind {
    pub const ALL: [BallKind; 3] = [BallKind::Fly, BallKind::Ground, BallKind::Line];

    pub fn speed(&self, tuning: &FieldingTuning) -> f32 {
        match self {
            BallKind::Fly => tuning.fly_speed,
            BallKind::Ground => tuning.ground_speed,
            BallKind::Line => tuning.line_speed,
        }
    }
}

/// A live batted ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattedBall {
    pub id: u32,
    pub kind: BallKind,
    pub pos: Vec2,
    pub target: Vec2,
    /// Field units per frame
    pub speed: f32,
}

impl BattedBall {
    /// Random kind and landing spot, launched from home plate
    pub fn spawn(id: u32, rolls: &mut impl Roll, tuning: &FieldingTuning) -> Self {
        let kind = BallKind::ALL[rolls.pick(BallKind::ALL.len())];
        let x = rolls.span(tuning.target_x.0, tuning.target_x.1);
        let (lo, span) = match kind {
            BallKind::Fly => tuning.fly_target_y,
            BallKind::Ground | BallKind::Line => tuning.low_target_y,
        };
        let y = rolls.span(lo, span);
        Self {
            id,
            kind,
            pos: Vec2::from(tuning.home_plate),
            target: Vec2::new(x, y),
            speed: kind.speed(tuning),
        }
    }

    /// Move one frame toward the target; stays put once within `epsilon`
    pub fn step(&mut self, epsilon: f32) {
        let to_target = self.target - self.pos;
        let distance = to_target.length();
        if distance < epsilon {
            return;
        }
        self.pos += to_target / distance * self.speed.min(distance);
    }

    pub fn has_landed(&self, epsilon: f32) -> bool {
        self.pos.distance(self.target) < epsilon
    }
}

/// What happened to a ball this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallFate {
    InFlight,
    Caught,
    Missed,
}

/// Catch test first, then landing test
pub fn classify(ball: &BattedBall, glove: Vec2, tuning: &FieldingTuning) -> BallFate {
    if ball.pos.distance(glove) < tuning.catch_radius {
        BallFate::Caught
    } else if ball.has_landed(tuning.arrival_epsilon) {
        BallFate::Missed
    } else {
        BallFate::InFlight
    }
}

/// Result of resolving a catch
#[derive(Debug, Clone, PartialEq)]
pub struct CatchResult {
    pub event: PlayEvent,
    /// Runner on third will tag up and score shortly
    pub tag_up: bool,
}

/// Apply a caught ball to the match
pub fn resolve_catch(
    state: &mut MatchState,
    kind: BallKind,
    rolls: &mut impl Roll,
    tuning: &FieldingTuning,
) -> CatchResult {
    let roll = rolls.roll();
    match kind {
        BallKind::Fly => {
            let tag_up = state.runners.third && state.outs < 2 && roll < tuning.tag_up_chance;
            state.add_out();
            CatchResult {
                event: PlayEvent::new(Outcome::FlyoutCatch, "Fly ball caught, batter out", 0),
                tag_up,
            }
        }
        BallKind::Ground => {
            let event = if state.runners.first && state.outs < 2 && roll < tuning.double_play_chance {
                state.double_play();
                PlayEvent::new(Outcome::FieldedDoublePlay, "Double play turned", 0)
            } else {
                state.add_out();
                PlayEvent::new(Outcome::GroundBall, "Ground ball fielded, batter out", 0)
            };
            CatchResult { event, tag_up: false }
        }
        BallKind::Line => {
            state.add_out();
            CatchResult {
                event: PlayEvent::new(Outcome::LinedriveCatch, "Line drive snagged", 0),
                tag_up: false,
            }
        }
    }
}

/// Apply a ball that landed uncaught
pub fn resolve_miss(
    state: &mut MatchState,
    kind: BallKind,
    rolls: &mut impl Roll,
    tuning: &FieldingTuning,
) -> PlayEvent {
    match kind {
        BallKind::Ground => {
            let error = rolls.roll() < tuning.error_chance;
            let runs = state.batter_to_first_with_cascade();
            if error {
                PlayEvent::new(Outcome::Error, "Error! The batter reaches", runs)
            } else {
                PlayEvent::new(Outcome::HitAllowed, "Ground ball gets through for a hit", runs)
            }
        }
        BallKind::Fly | BallKind::Line => {
            // A missed fly leaves the batter off the bases; a missed liner puts them on third
            let runs = state.extra_base_miss(kind == BallKind::Line);
            PlayEvent::new(Outcome::ExtraBaseHit, "Ball drops in for extra bases", runs)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldTimer {
    TagUp,
}

/// Read-only view for the rendering side
#[derive(Debug, Clone, Serialize)]
pub struct FieldingSnapshot<'a> {
    pub state: &'a MatchState,
    pub ball: Option<BattedBall>,
    pub glove: Vec2,
    pub playing: bool,
    pub catches: u32,
    pub misses: u32,
}

/// One fielding game
#[derive(Debug)]
pub struct FieldingSession<R = Pcg32> {
    state: MatchState,
    tuning: Tuning,
    rolls: R,
    timers: Scheduler<FieldTimer>,
    /// Tag-up owed to the runner from the last catch
    pending_tag_up: Option<TimerId>,
    ball: Option<BattedBall>,
    glove: Vec2,
    playing: bool,
    catches: u32,
    misses: u32,
    next_ball_id: u32,
}

impl FieldingSession<Pcg32> {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rolls(RngState::new(seed).to_rng(), tuning)
    }
}

impl<R: Roll> FieldingSession<R> {
    pub fn with_rolls(rolls: R, tuning: Tuning) -> Self {
        Self {
            state: MatchState::new(tuning.inning_limit),
            glove: Vec2::from(tuning.fielding.glove_start),
            tuning,
            rolls,
            timers: Scheduler::new(),
            pending_tag_up: None,
            ball: None,
            playing: false,
            catches: 0,
            misses: 0,
            next_ball_id: 1,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn ball(&self) -> Option<&BattedBall> {
        self.ball.as_ref()
    }

    pub fn glove(&self) -> Vec2 {
        self.glove
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn catches(&self) -> u32 {
        self.catches
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn snapshot(&self) -> FieldingSnapshot<'_> {
        FieldingSnapshot {
            state: &self.state,
            ball: self.ball,
            glove: self.glove,
            playing: self.playing,
            catches: self.catches,
            misses: self.misses,
        }
    }

    pub fn start(&mut self) {
        if !self.state.game_over {
            self.playing = true;
        }
    }

    /// Stop play; frames do nothing until the next start
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Pointer or touch position in field units, clamped to the glove area
    pub fn move_glove(&mut self, x: f32, y: f32) -> Result<(), Rejected> {
        if !self.playing {
            return Err(Rejected::NotPlaying);
        }
        let f = &self.tuning.fielding;
        self.glove = clamp_point(Vec2::new(x, y), f.glove_min.into(), f.glove_max.into());
        Ok(())
    }

    /// Put a new ball in play
    pub fn hit(&mut self) -> Result<BattedBall, Rejected> {
        if self.state.game_over {
            return Err(Rejected::GameOver);
        }
        if !self.playing {
            return Err(Rejected::NotPlaying);
        }
        if self.ball.is_some() {
            return Err(Rejected::BallInFlight);
        }
        if self.pending_tag_up.is_some() {
            return Err(Rejected::PlayPending);
        }
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        let ball = BattedBall::spawn(id, &mut self.rolls, &self.tuning.fielding);
        log::debug!("Ball {} hit: {:?} toward {}", id, ball.kind, ball.target);
        self.ball = Some(ball);
        Ok(ball)
    }

    /// Advance one animation frame at time `now`
    pub fn frame(&mut self, now: u64) -> Vec<PlayEvent> {
        let mut events = Vec::new();
        if !self.playing {
            return events;
        }

        while let Some(FieldTimer::TagUp) = self.timers.pop_due(now) {
            self.pending_tag_up = None;
            if self.state.tag_up() {
                events.push(PlayEvent::new(Outcome::TagUp, "Runner tags up and scores", 1));
            }
        }

        let f = &self.tuning.fielding;
        let Some(ball) = self.ball.as_mut() else {
            return events;
        };
        ball.step(f.arrival_epsilon);
        let ball = *ball;

        match classify(&ball, self.glove, f) {
            BallFate::InFlight => {}
            BallFate::Caught => {
                self.ball = None;
                self.catches += 1;
                let result = resolve_catch(&mut self.state, ball.kind, &mut self.rolls, f);
                if result.tag_up {
                    let id = self.timers.schedule_at(now + f.tag_up_delay_ms, FieldTimer::TagUp);
                    self.pending_tag_up = Some(id);
                }
                events.push(result.event);
            }
            BallFate::Missed => {
                self.ball = None;
                self.misses += 1;
                events.push(resolve_miss(&mut self.state, ball.kind, &mut self.rolls, f));
            }
        }

        if self.state.game_over {
            self.playing = false;
        }
        events
    }

    /// Start over; the pending tag-up is dropped before the state is cleared
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.pending_tag_up = None;
        self.playing = false;
        self.ball = None;
        self.glove = Vec2::from(self.tuning.fielding.glove_start);
        self.catches = 0;
        self.misses = 0;
        self.state = MatchState::new(self.tuning.inning_limit);
        log::info!("Fielding game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::roll::ScriptedRolls;
    use crate::sim::state::{Bases, Half, Score};

    fn tuning() -> FieldingTuning {
        FieldingTuning::default()
    }

    fn ball(kind: BallKind, pos: Vec2, target: Vec2) -> BattedBall {
        BattedBall {
            id: 1,
            kind,
            pos,
            target,
            speed: kind.speed(&tuning()),
        }
    }

    fn with(outs: u32, runners: Bases) -> MatchState {
        MatchState {
            outs,
            runners,
            ..MatchState::default()
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.5]);
        let b = BattedBall::spawn(1, &mut rolls, &tuning());
        assert_eq!(b.kind, BallKind::Fly);
        assert_eq!(b.pos, Vec2::new(50.0, 5.0));
        assert!((b.target.x - 50.0).abs() < 1e-4);
        assert!((b.target.y - 65.0).abs() < 1e-4);
        assert_eq!(b.speed, 0.6);

        let mut rolls = ScriptedRolls::new([0.9, 0.0, 0.5]);
        let b = BattedBall::spawn(2, &mut rolls, &tuning());
        assert_eq!(b.kind, BallKind::Line);
        assert!((b.target.y - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_step_moves_at_speed_and_stops() {
        let mut b = ball(BallKind::Line, Vec2::new(50.0, 5.0), Vec2::new(50.0, 10.0));
        b.step(2.0);
        assert!((b.pos.y - 6.2).abs() < 1e-5);
        for _ in 0..10 {
            b.step(2.0);
        }
        assert!(b.has_landed(2.0));
        let landed = b.pos;
        b.step(2.0);
        assert_eq!(b.pos, landed);
    }

    #[test]
    fn test_classify() {
        let t = tuning();
        let b = ball(BallKind::Fly, Vec2::new(50.0, 60.0), Vec2::new(50.0, 70.0));
        assert_eq!(classify(&b, Vec2::new(55.0, 65.0), &t), BallFate::Caught);
        assert_eq!(classify(&b, Vec2::new(90.0, 30.0), &t), BallFate::InFlight);

        let landed = ball(BallKind::Fly, Vec2::new(50.0, 69.5), Vec2::new(50.0, 70.0));
        assert_eq!(classify(&landed, Vec2::new(90.0, 30.0), &t), BallFate::Missed);
        // Catch wins over landing in the same frame
        assert_eq!(classify(&landed, Vec2::new(50.0, 72.0), &t), BallFate::Caught);
    }

    #[test]
    fn test_fly_catch_flags_tag_up() {
        let mut state = with(1, Bases { third: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.29]);
        let result = resolve_catch(&mut state, BallKind::Fly, &mut rolls, &tuning());
        assert!(result.tag_up);
        assert_eq!(result.event.outcome, Outcome::FlyoutCatch);
        assert_eq!(state.outs, 2);
        // Run waits for the delayed tag-up
        assert_eq!(state.score.away, 0);

        let mut state = with(2, Bases { third: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.0]);
        assert!(!resolve_catch(&mut state, BallKind::Fly, &mut rolls, &tuning()).tag_up);
    }

    #[test]
    fn test_ground_catch_double_play() {
        let mut state = with(1, Bases { first: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.49]);
        let result = resolve_catch(&mut state, BallKind::Ground, &mut rolls, &tuning());
        assert_eq!(result.event.outcome, Outcome::FieldedDoublePlay);
        // Second out of the play was the third of the half
        assert_eq!(state.outs, 0);
        assert_eq!(state.half, Half::Bottom);
        assert!(state.runners.is_empty());

        let mut state = with(0, Bases { first: true, second: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.1]);
        resolve_catch(&mut state, BallKind::Ground, &mut rolls, &tuning());
        assert_eq!(state.outs, 2);
        assert_eq!(state.runners, Bases { second: true, ..Bases::EMPTY });

        let mut state = with(0, Bases { first: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.5]);
        let result = resolve_catch(&mut state, BallKind::Ground, &mut rolls, &tuning());
        assert_eq!(result.event.outcome, Outcome::GroundBall);
        assert_eq!(state.outs, 1);
        assert!(state.runners.first);
    }

    #[test]
    fn test_line_catch_is_one_out() {
        let mut state = with(0, Bases::LOADED);
        let mut rolls = ScriptedRolls::new([0.0]);
        let result = resolve_catch(&mut state, BallKind::Line, &mut rolls, &tuning());
        assert_eq!(result.event.outcome, Outcome::LinedriveCatch);
        assert_eq!(state.outs, 1);
        assert!(state.runners.is_loaded());
    }

    #[test]
    fn test_ground_miss_cascades() {
        let mut state = with(0, Bases { first: true, third: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.1]);
        let event = resolve_miss(&mut state, BallKind::Ground, &mut rolls, &tuning());
        assert_eq!(event.outcome, Outcome::Error);
        assert_eq!(event.runs, 1);
        assert_eq!(state.runners, Bases { first: true, second: true, third: false });

        let mut state = with(0, Bases { second: true, ..Bases::EMPTY });
        let mut rolls = ScriptedRolls::new([0.9]);
        let event = resolve_miss(&mut state, BallKind::Ground, &mut rolls, &tuning());
        assert_eq!(event.outcome, Outcome::HitAllowed);
        assert_eq!(state.runners, Bases { first: true, third: true, ..Bases::EMPTY });
    }

    #[test]
    fn test_fly_and_line_miss() {
        let mut state = with(0, Bases::LOADED);
        let mut rolls = ScriptedRolls::default();
        let event = resolve_miss(&mut state, BallKind::Fly, &mut rolls, &tuning());
        assert_eq!(event.outcome, Outcome::ExtraBaseHit);
        assert_eq!(event.runs, 2);
        assert_eq!(state.runners, Bases { second: true, ..Bases::EMPTY });

        let mut state = with(0, Bases::EMPTY);
        resolve_miss(&mut state, BallKind::Line, &mut rolls, &tuning());
        assert_eq!(state.runners, Bases { third: true, ..Bases::EMPTY });
    }

    fn session(rolls: &[f64]) -> FieldingSession<ScriptedRolls> {
        let mut s =
            FieldingSession::with_rolls(ScriptedRolls::new(rolls.iter().copied()), Tuning::default());
        s.start();
        s
    }

    #[test]
    fn test_session_catch_at_target() {
        // Ground ball to (50, 80)
        let mut s = session(&[0.5, 0.5, 0.5]);
        s.move_glove(50.0, 80.0).unwrap();
        s.hit().unwrap();
        assert_eq!(s.hit(), Err(Rejected::BallInFlight));

        s.rolls.push(0.9);
        let mut events = Vec::new();
        for t in 0..200 {
            events.extend(s.frame(t * 16));
            if s.ball().is_none() {
                break;
            }
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::GroundBall);
        assert_eq!(s.catches(), 1);
        assert_eq!(s.state().outs, 1);
        for r in [0.5, 0.5, 0.5] {
            s.rolls.push(r);
        }
        assert!(s.hit().is_ok());
    }

    #[test]
    fn test_session_miss() {
        // Line drive to (20, 70), glove parked far away
        let mut s = session(&[0.9, 0.0, 0.0]);
        s.move_glove(95.0, 30.0).unwrap();
        s.hit().unwrap();
        let mut events = Vec::new();
        for t in 0..200 {
            events.extend(s.frame(t * 16));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::ExtraBaseHit);
        assert_eq!(s.misses(), 1);
        assert!(s.state().runners.third);
    }

    #[test]
    fn test_tag_up_is_delayed() {
        // Fly ball to (50, 65), runner on third, one out
        let mut s = session(&[0.1, 0.5, 0.5, 0.0]);
        s.state.outs = 1;
        s.state.runners.third = true;
        s.move_glove(50.0, 65.0).unwrap();
        s.hit().unwrap();

        let mut t = 0;
        let mut caught_at = None;
        while caught_at.is_none() {
            let events = s.frame(t);
            if events.iter().any(|e| e.outcome == Outcome::FlyoutCatch) {
                caught_at = Some(t);
            }
            t += 16;
        }
        let caught_at = caught_at.unwrap();
        assert_eq!(s.state().outs, 2);
        assert_eq!(s.state().score.away, 0);

        assert!(s.frame(caught_at + 499).is_empty());
        let events = s.frame(caught_at + 500);
        assert_eq!(events[0].outcome, Outcome::TagUp);
        assert_eq!(s.state().score.away, 1);
        assert!(!s.state().runners.third);
    }

    #[test]
    fn test_next_ball_waits_for_tag_up() {
        // Fly ball to (50, 65) caught short at (50, 30), runner on third, one out
        let mut s = session(&[0.1, 0.5, 0.5, 0.0]);
        s.state.outs = 1;
        s.state.runners.third = true;
        s.move_glove(50.0, 30.0).unwrap();
        s.hit().unwrap();

        let mut t = 0;
        let mut events = Vec::new();
        while s.ball().is_some() {
            events.extend(s.frame(t));
            t += 8;
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::FlyoutCatch);
        let caught_at = t - 8;

        // Line drive to (20, 70) cannot be put in play until the runner has scored
        for r in [0.9, 0.0, 0.0] {
            s.rolls.push(r);
        }
        s.move_glove(95.0, 90.0).unwrap();
        while t < caught_at + 500 {
            assert_eq!(s.hit(), Err(Rejected::PlayPending));
            assert!(s.frame(t).is_empty());
            t += 8;
        }
        let events = s.frame(t);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::TagUp);
        assert_eq!(events[0].runs, 1);

        s.hit().unwrap();
        let mut events = Vec::new();
        while s.ball().is_some() {
            t += 8;
            events.extend(s.frame(t));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::ExtraBaseHit);
        assert_eq!(events[0].runs, 0);
        assert_eq!(s.state().score, Score { home: 0, away: 1 });
        assert_eq!(s.state().runners, Bases { third: true, ..Bases::EMPTY });

        // Nothing else is owed
        assert!(s.frame(t + 10_000).is_empty());
        assert_eq!(s.state().score.away, 1);
    }

    #[test]
    fn test_fielding_plays_are_frozen_after_game_over() {
        let finished = MatchState {
            inning: 3,
            half: Half::Bottom,
            outs: 3,
            runners: Bases::LOADED,
            game_over: true,
            ..MatchState::default()
        };
        for kind in BallKind::ALL {
            let mut state = finished.clone();
            let mut rolls = ScriptedRolls::new([0.0, 0.0]);
            resolve_catch(&mut state, kind, &mut rolls, &tuning());
            resolve_miss(&mut state, kind, &mut rolls, &tuning());
            assert_eq!(state, finished, "{kind:?} changed a finished game");
        }
    }

    #[test]
    fn test_reset_drops_pending_tag_up() {
        let mut s = session(&[0.1, 0.5, 0.5, 0.0]);
        s.state.runners.third = true;
        s.move_glove(50.0, 65.0).unwrap();
        s.hit().unwrap();
        let mut t = 0;
        while s.ball().is_some() {
            s.frame(t);
            t += 16;
        }
        s.reset();
        s.start();
        assert!(s.frame(t + 10_000).is_empty());
        assert_eq!(s.state(), &MatchState::default());
    }

    #[test]
    fn test_stopped_session_ignores_input() {
        let mut s = session(&[0.5, 0.5, 0.5]);
        s.hit().unwrap();
        s.stop();
        let before = *s.ball().unwrap();
        assert!(s.frame(100).is_empty());
        assert_eq!(*s.ball().unwrap(), before);
        assert_eq!(s.move_glove(10.0, 10.0), Err(Rejected::NotPlaying));
        assert_eq!(s.hit(), Err(Rejected::NotPlaying));
    }

    #[test]
    fn test_glove_is_clamped() {
        let mut s = session(&[]);
        s.move_glove(-20.0, 5.0).unwrap();
        assert_eq!(s.glove(), Vec2::new(5.0, 30.0));
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = FieldingSession::new(77);
        let mut b = FieldingSession::new(77);
        a.start();
        b.start();
        for t in 0..5_000u64 {
            for s in [&mut a, &mut b] {
                if s.ball().is_none() {
                    let _ = s.hit();
                }
                let x = 50.0 + 30.0 * ((t as f32) * 0.01).sin();
                let _ = s.move_glove(x, 70.0);
                s.frame(t * 16);
            }
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.catches(), b.catches());
    }
}
