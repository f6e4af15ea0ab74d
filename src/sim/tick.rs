//! Fixed-step simulation tick
//!
//! Core game loop that advances the match deterministically. One call is one
//! frame: paddle movement is a fixed 1 unit per tick with no delta-time scaling.

use super::collision::{approached_side, in_goal, paddle_hit, touches_wall, wall_limit};
use super::state::{MatchEvent, MatchState, Side, Wall};
use crate::consts::PADDLE_SPEED;

/// Controls held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub p1_up: bool,
    pub p1_down: bool,
    pub p2_up: bool,
    pub p2_down: bool,
}

impl TickInput {
    /// (up, down) for the paddle on `side`
    pub fn paddle(&self, side: Side) -> (bool, bool) {
        match side {
            Side::Left => (self.p1_up, self.p1_down),
            Side::Right => (self.p2_up, self.p2_down),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    state.ball.spin();

    move_paddles(state, input);
    deflect_off_paddle(state);

    // Integrate with the possibly just-reversed velocity
    state.ball.pos += state.ball.vel;

    bounce_off_walls(state);
    check_scoring(state);
}

/// Owned form of [`tick`]: consumes a state and returns its successor
pub fn update(mut state: MatchState, input: &TickInput) -> MatchState {
    tick(&mut state, input);
    state
}

/// Up is applied before down, so holding both nets to zero
fn move_paddles(state: &mut MatchState, input: &TickInput) {
    let area = state.area;
    for side in Side::ALL {
        let (up, down) = input.paddle(side);
        let player = state.player_mut(side);
        if up {
            player.move_by(-PADDLE_SPEED, &area);
        }
        if down {
            player.move_by(PADDLE_SPEED, &area);
        }
    }
}

/// Only the paddle the ball is heading toward is tested
fn deflect_off_paddle(state: &mut MatchState) {
    let side = approached_side(state.ball.vel.x);
    let Some(p) = paddle_hit(&state.ball, state.player(side), &state.area, side) else {
        return;
    };

    state.ball.vel.x = -state.ball.vel.x;
    // Cumulative: long rallies can keep steepening the angle
    state.ball.vel.y += p;
    state.events.push(MatchEvent::PaddleHit {
        side,
        deflection: p,
    });
}

/// Clamp-and-reflect; both walls are checked independently
fn bounce_off_walls(state: &mut MatchState) {
    for wall in [Wall::Top, Wall::Bottom] {
        if touches_wall(state.ball.pos.y, &state.area, wall) {
            state.ball.vel.y = -state.ball.vel.y;
            state.ball.pos.y = wall_limit(&state.area, wall);
            state.events.push(MatchEvent::WallBounce { wall });
        }
    }
}

/// A ball in the left goal is a point for the right player and vice versa
fn check_scoring(state: &mut MatchState) {
    if in_goal(state.ball.pos.x, &state.area, Side::Left) {
        state.award_point(Side::Right);
    }
    if in_goal(state.ball.pos.x, &state.area, Side::Right) {
        state.award_point(Side::Left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_SPIN_STEP;
    use crate::sim::geometry::Point;
    use proptest::prelude::*;

    fn rally_state() -> MatchState {
        let mut state = MatchState::new(12345);
        state.ball.pos = Point::new(284.0, 140.0);
        state.ball.vel = Point::new(2.0, 0.0);
        state.player_mut(Side::Right).pos.y = 125.0;
        state
    }

    fn scored(state: &MatchState) -> Vec<Side> {
        state
            .events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::Scored { side, .. } => Some(*side),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_right_paddle_hit() {
        let mut state = rally_state();
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel, Point::new(-2.0, 0.0));
        assert_eq!(state.ball.pos, Point::new(282.0, 140.0));
        assert_eq!(
            state.events,
            vec![MatchEvent::PaddleHit {
                side: Side::Right,
                deflection: 0.0
            }]
        );
    }

    #[test]
    fn test_right_paddle_miss_passes_through() {
        let mut state = rally_state();
        state.player_mut(Side::Right).pos.y = 160.0;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel, Point::new(2.0, 0.0));
        assert_eq!(state.ball.pos, Point::new(286.0, 140.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_left_paddle_hit_top_edge() {
        let mut state = MatchState::new(1);
        state.player_mut(Side::Left).pos.y = 100.0;
        state.ball.pos = Point::new(36.0, 100.0);
        state.ball.vel = Point::new(-1.0, 0.25);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel, Point::new(1.0, -0.25));
        assert_eq!(state.ball.pos, Point::new(37.0, 99.75));
    }

    #[test]
    fn test_deflection_accumulates() {
        let mut state = MatchState::new(1);
        state.player_mut(Side::Left).pos.y = 100.0;
        state.ball.pos = Point::new(36.0, 127.0);
        state.ball.vel = Point::new(-1.0, 0.4);
        tick(&mut state, &TickInput::default());

        // (127 - 100) / 30 - 0.5 = 0.4, added to the existing 0.4
        assert!((state.ball.vel.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_receding_ball_is_not_deflected() {
        let mut state = rally_state();
        state.ball.vel = Point::new(-2.0, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Point::new(282.0, 140.0));
        assert_eq!(state.ball.vel.x, -2.0);
    }

    #[test]
    fn test_ball_already_past_line_is_not_deflected() {
        let mut state = rally_state();
        state.ball.pos = Point::new(286.0, 140.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Point::new(288.0, 140.0));
        assert_eq!(state.ball.vel.x, 2.0);
    }

    #[test]
    fn test_bottom_wall_reflection() {
        let mut state = MatchState::new(5);
        state.ball.pos = Point::new(160.0, state.area.bottom() - 5.0);
        state.ball.vel = Point::new(1.0, 0.75);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.y, -0.75);
        assert_eq!(state.ball.pos.y, state.area.bottom() - 5.0);
        assert_eq!(
            state.events,
            vec![MatchEvent::WallBounce { wall: Wall::Bottom }]
        );
    }

    #[test]
    fn test_top_wall_reflection_snaps() {
        let mut state = MatchState::new(5);
        state.ball.pos = Point::new(160.0, 56.0);
        state.ball.vel = Point::new(1.0, -3.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.ball.pos.y, 55.0);
    }

    #[test]
    fn test_left_player_scores() {
        let mut state = MatchState::new(9);
        state.ball.pos = Point::new(304.0, 100.0);
        state.ball.vel = Point::new(1.0, 0.0);
        state.player_mut(Side::Right).pos.y = 200.0;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.round, 2);
        assert_eq!(state.scores(), [1, 0]);
        assert_eq!(state.ball.pos, state.area.center());
        assert_eq!(state.ball.vel.x, -1.0);
        assert!((-0.5..0.5).contains(&state.ball.vel.y));
        assert_eq!(scored(&state), vec![Side::Left]);
    }

    #[test]
    fn test_right_player_scores() {
        let mut state = MatchState::new(9);
        state.ball.pos = Point::new(16.0, 100.0);
        state.ball.vel = Point::new(-1.0, 0.0);
        state.player_mut(Side::Left).pos.y = 200.0;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.round, 2);
        assert_eq!(state.scores(), [0, 1]);
        assert_eq!(state.ball.pos, state.area.center());
        assert_eq!(state.ball.vel.x, 1.0);
        assert!((-0.5..0.5).contains(&state.ball.vel.y));
    }

    #[test]
    fn test_paddle_moves_one_unit() {
        let mut state = MatchState::new(1);
        let input = TickInput {
            p1_up: true,
            p2_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player(Side::Left).pos.y, 139.0);
        assert_eq!(state.player(Side::Right).pos.y, 141.0);
        // x never moves
        assert_eq!(state.player(Side::Left).pos.x, 30.0);
        assert_eq!(state.player(Side::Right).pos.x, 290.0);
    }

    #[test]
    fn test_up_and_down_cancel() {
        let mut state = MatchState::new(1);
        let both = TickInput {
            p1_up: true,
            p1_down: true,
            p2_up: true,
            p2_down: true,
        };
        tick(&mut state, &both);
        assert_eq!(state.player(Side::Left).pos.y, 140.0);
        assert_eq!(state.player(Side::Right).pos.y, 140.0);
    }

    #[test]
    fn test_up_and_down_at_top_edge() {
        // Up clamps first, then down moves off the edge
        let mut state = MatchState::new(1);
        state.player_mut(Side::Left).pos.y = state.area.top();
        let both = TickInput {
            p1_up: true,
            p1_down: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.player(Side::Left).pos.y, state.area.top() + 1.0);
    }

    #[test]
    fn test_rotation_advances() {
        let mut state = MatchState::new(1);
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert!((state.ball.rotation - 2.0 * BALL_SPIN_STEP).abs() < 1e-12);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_update_is_owned_tick() {
        let a = rally_state();
        let mut b = a.clone();
        let a = update(a, &TickInput::default());
        tick(&mut b, &TickInput::default());
        assert_eq!(a.ball, b.ball);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = MatchState::new(99999);
        let mut state2 = MatchState::new(99999);
        let inputs = [
            TickInput {
                p1_up: true,
                ..Default::default()
            },
            TickInput {
                p2_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..5000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.round, state2.round);
        assert_eq!(state1.scores(), state2.scores());
        assert_eq!(state1.ball, state2.ball);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(p1_up, p1_down, p2_up, p2_down)| TickInput {
                p1_up,
                p1_down,
                p2_up,
                p2_down,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_field(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..400),
        ) {
            let mut state = MatchState::new(seed);
            for input in &inputs {
                tick(&mut state, input);
                for p in &state.players {
                    prop_assert!(p.pos.y >= state.area.top());
                    prop_assert!(p.pos.y <= state.area.bottom() - p.height);
                }
            }
        }

        #[test]
        fn prop_at_most_one_point_per_tick(
            seed in any::<u64>(),
            x in 0.0f64..320.0,
            y in 60.0f64..220.0,
            vx in -6.0f64..6.0,
            vy in -3.0f64..3.0,
        ) {
            let mut state = MatchState::new(seed);
            state.ball.pos = Point::new(x, y);
            state.ball.vel = Point::new(vx, vy);
            let before = state.round;
            tick(&mut state, &TickInput::default());
            prop_assert!(scored(&state).len() <= 1);
            prop_assert!(state.round - before <= 1);
        }

        #[test]
        fn prop_round_tracks_total_score(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..2000),
        ) {
            let mut state = MatchState::new(seed);
            for input in &inputs {
                tick(&mut state, input);
            }
            let [a, b] = state.scores();
            prop_assert_eq!(state.round, 1 + a + b);
        }
    }
}
