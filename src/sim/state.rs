//! Match state and core simulation types
//!
//! Everything the update step reads or writes lives in `MatchState`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Area, Point};
use crate::consts::*;

/// Number of players in a match
pub const PLAYER_COUNT: usize = 2;

/// Which half of the field a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; PLAYER_COUNT] = [Side::Left, Side::Right];

    /// Index into `MatchState::players`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Horizontal field boundary the ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Ball deflected by a paddle; `deflection` was added to its vertical velocity
    PaddleHit { side: Side, deflection: f64 },
    /// Ball reflected off a wall
    WallBounce { wall: Wall },
    /// `side` scored; `round` is the round that just started
    Scored { side: Side, round: u32 },
}

/// One of the two players and their paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    /// Paddle anchor; y is the paddle top, x never changes after setup
    pub pos: Point,
    pub height: f64,
}

impl Player {
    /// Place a player on `side` with the paddle top at the field's vertical center
    pub fn new(name: impl Into<String>, side: Side, area: &Area) -> Self {
        let x = match side {
            Side::Left => area.left() + PADDLE_INSET,
            Side::Right => area.right() - PADDLE_INSET,
        };
        Self {
            name: name.into(),
            score: 0,
            pos: Point::new(x, area.center_y()),
            height: PADDLE_HEIGHT,
        }
    }

    /// Half-open vertical extent test: the top edge hits, the bottom edge misses
    #[inline]
    pub fn spans(&self, y: f64) -> bool {
        y >= self.pos.y && y < self.pos.y + self.height
    }

    /// Lowest allowed paddle top inside `area`
    #[inline]
    pub fn max_y(&self, area: &Area) -> f64 {
        area.bottom() - self.height
    }

    /// Shift the paddle vertically and clamp it into `area`
    pub fn move_by(&mut self, dy: f64, area: &Area) {
        let y = self.pos.y + dy;
        self.pos.y = y.max(area.top()).min(self.max_y(area));
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Point,
    pub vel: Point,
    /// Cosmetic spin for rendering, no effect on physics
    pub rotation: f64,
}

impl Ball {
    pub fn new(pos: Point, vel: Point) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
        }
    }

    /// Advance the cosmetic spin by one tick
    pub fn spin(&mut self) {
        self.rotation += BALL_SPIN_STEP;
        if self.rotation > BALL_SPIN_WRAP {
            self.rotation -= BALL_SPIN_WRAP;
        }
    }

    /// Put the ball back on the center spot with a new velocity
    pub fn serve(&mut self, area: &Area, vel: Point) {
        self.pos = area.center();
        self.vel = vel;
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    /// Current round, starting at 1
    pub round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Left player at index 0, right player at index 1
    pub players: [Player; PLAYER_COUNT],
    pub ball: Ball,
    pub area: Area,
    /// Serve angle source
    rng: Pcg32,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Create a new match on the standard field with default player names
    pub fn new(seed: u64) -> Self {
        Self::with_names(seed, ["Player 1".to_string(), "Player 2".to_string()])
    }

    /// Create a new match on the standard field
    pub fn with_names(seed: u64, names: [String; PLAYER_COUNT]) -> Self {
        let area = Area::new(
            Point::new(FIELD_LEFT, FIELD_TOP),
            Point::new(FIELD_RIGHT, FIELD_BOTTOM),
        );
        let [left, right] = names;
        let mut rng = Pcg32::seed_from_u64(seed);

        // The opening serve only ever angles downward; later serves are symmetric
        let vel = Point::new(SERVE_SPEED, rng.random::<f64>());

        Self {
            seed,
            round: 1,
            time_ticks: 0,
            players: [
                Player::new(left, Side::Left, &area),
                Player::new(right, Side::Right, &area),
            ],
            ball: Ball::new(area.center(), vel),
            area,
            rng,
            events: Vec::new(),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        [self.players[0].score, self.players[1].score]
    }

    /// Award a point to `scorer`, start the next round and re-serve toward them
    pub(crate) fn award_point(&mut self, scorer: Side) {
        self.player_mut(scorer).score += 1;
        self.round += 1;

        let dir = match scorer {
            Side::Left => -SERVE_SPEED,
            Side::Right => SERVE_SPEED,
        };
        let vy = self.rng.random::<f64>() - 0.5;
        let area = self.area;
        self.ball.serve(&area, Point::new(dir, vy));

        self.events.push(MatchEvent::Scored {
            side: scorer,
            round: self.round,
        });
    }
}
