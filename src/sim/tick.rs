//! Per-tick update
//!
//! One call moves the snake a single cell, then applies the first matching
//! transition from [`TRANSITIONS`]. Order matters: eating the beneficial item
//! beats self-collision, which beats eating the harmful item.

use super::direction::Direction;
use super::item::ItemKind;
use super::state::{GameState, TickEvent};
use crate::error::SimError;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn requests in arrival order
    pub turns: Vec<Direction>,
}

impl TickInput {
    pub fn turn(direction: Direction) -> Self {
        Self {
            turns: vec![direction],
        }
    }
}

/// A guarded state change. Only the first transition whose guard holds runs.
struct Transition {
    event: TickEvent,
    guard: fn(&GameState) -> bool,
    apply: fn(&mut GameState) -> Result<(), SimError>,
}

const TRANSITIONS: [Transition; 3] = [
    Transition {
        event: TickEvent::AteBeneficial,
        guard: head_on_beneficial,
        apply: eat_beneficial,
    },
    Transition {
        event: TickEvent::SelfCollision,
        guard: head_on_body,
        apply: restart,
    },
    Transition {
        event: TickEvent::AteHarmful,
        guard: head_on_harmful,
        apply: eat_harmful,
    },
];

fn head_on_beneficial(state: &GameState) -> bool {
    state.snake.head() == state.beneficial.position
}

fn head_on_body(state: &GameState) -> bool {
    state.snake.self_collided()
}

fn head_on_harmful(state: &GameState) -> bool {
    state.snake.head() == state.harmful.position
}

fn eat_beneficial(state: &mut GameState) -> Result<(), SimError> {
    state.snake.grow();
    state.add_score(1);
    state.relocate_item(ItemKind::Beneficial)?;
    Ok(())
}

fn restart(state: &mut GameState) -> Result<(), SimError> {
    state.restart_snake();
    state.relocate_item(ItemKind::Beneficial)?;
    state.relocate_item(ItemKind::Harmful)?;
    Ok(())
}

fn eat_harmful(state: &mut GameState) -> Result<(), SimError> {
    state.snake.shrink();
    state.add_score(-1);
    state.relocate_item(ItemKind::Harmful)?;
    Ok(())
}

/// Move any item left on a snake cell, and split the items if they share one
fn settle_items(state: &mut GameState) -> Result<(), SimError> {
    if state.snake.occupies(state.beneficial.position) {
        state.relocate_item(ItemKind::Beneficial)?;
    }
    if state.snake.occupies(state.harmful.position)
        || state.harmful.position == state.beneficial.position
    {
        state.relocate_item(ItemKind::Harmful)?;
    }
    Ok(())
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<TickEvent, SimError> {
    for &turn in &input.turns {
        state.buffer_direction(turn);
    }

    state.time_ticks += 1;
    state.snake.tick(&state.grid);

    let mut event = TickEvent::Moved;
    for transition in &TRANSITIONS {
        if (transition.guard)(state) {
            (transition.apply)(state)?;
            event = transition.event;
            break;
        }
    }

    settle_items(state)?;

    log::trace!(
        "tick {}: {:?}, length {}, score {}",
        state.time_ticks,
        event,
        state.snake.len(),
        state.score
    );
    Ok(event)
}
