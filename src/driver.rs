//! The frame loop
//!
//! `poll -> tick -> render -> pace`, once per tick, on a single thread. The
//! renderer only ever sees a shared borrow of the match, after the tick for
//! that frame has finished.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::HostError;
use crate::platform::Pacer;
use crate::renderer::Renderer;
use crate::sim::{MatchEvent, MatchState, PLAYER_COUNT, TickInput, tick};

/// Supplies the held controls for each tick
pub trait InputSource {
    /// `None` ends the session
    fn poll(&mut self) -> Result<Option<TickInput>, HostError>;
}

/// No controls held, forever
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> Result<Option<TickInput>, HostError> {
        Ok(Some(TickInput::default()))
    }
}

/// Plays back a fixed list of inputs, then ends the session
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Option<TickInput>, HostError> {
        Ok(self.inputs.pop_front())
    }
}

/// Where a session ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub round: u32,
    pub names: [String; PLAYER_COUNT],
    pub scores: [u32; PLAYER_COUNT],
}

impl RunSummary {
    fn new(state: &MatchState, ticks: u64) -> Self {
        Self {
            seed: state.seed,
            ticks,
            round: state.round,
            names: state.players.clone().map(|p| p.name),
            scores: state.scores(),
        }
    }
}

/// Run the match until input ends or `limit` ticks have elapsed
pub fn run<I, R>(
    state: &mut MatchState,
    input: &mut I,
    renderer: &mut R,
    pacer: &mut Pacer,
    limit: Option<u64>,
) -> Result<RunSummary, HostError>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    let mut ticks = 0;
    loop {
        if limit.is_some_and(|limit| ticks >= limit) {
            break;
        }
        let Some(keys) = input.poll()? else {
            break;
        };

        tick(state, &keys);
        ticks += 1;
        log_events(state);

        renderer.render(state)?;
        pacer.wait();
    }

    log::info!(
        "Session ended after {} ticks in round {} ({}-{})",
        ticks,
        state.round,
        state.players[0].score,
        state.players[1].score
    );
    Ok(RunSummary::new(state, ticks))
}

fn log_events(state: &MatchState) {
    for event in &state.events {
        match *event {
            MatchEvent::PaddleHit { side, deflection } => {
                log::debug!("{side:?} paddle hit, deflection {deflection:+.3}");
            }
            MatchEvent::WallBounce { wall } => log::debug!("Bounce off {wall:?} wall"),
            MatchEvent::Scored { side, round } => {
                let player = state.player(side);
                log::info!(
                    "{} scores ({}-{}), round {}",
                    player.name,
                    state.players[0].score,
                    state.players[1].score,
                    round
                );
            }
        }
    }
}
