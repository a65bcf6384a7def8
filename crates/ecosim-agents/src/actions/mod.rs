//! Action dispatch for agent turns.
//!
//! Every [`Action`] maps to one handler. Handlers never fail: an empty cell,
//! an absent prey, a missing mate, or a cell with no neighbours turns the
//! action into a no-op.
//!
//! # Submodules
//!
//! - [`handlers`] -- Execution logic for each action.

pub mod handlers;

use ecosim_types::{Action, AgentId, Position};
use rand::Rng;

use crate::death::Death;
use crate::lifecycle::StepContext;
use crate::reproduction::{self, Birth};

/// The observable effect of executing one action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The agent moved to a neighbouring cell.
    Moved {
        /// Cell before the move.
        from: Position,
        /// Cell after the move.
        to: Position,
    },
    /// The agent ate from its cell.
    Ate {
        /// Energy actually gained after capping.
        gained: u32,
    },
    /// The agent killed a co-located prey.
    Hunted(Death),
    /// The agent produced an offspring.
    Reproduced(Birth),
    /// The action had no effect.
    Nothing,
}

/// Execute `action` for agent `id`.
pub fn execute(
    ctx: &mut StepContext<'_>,
    id: AgentId,
    action: Action,
    rng: &mut impl Rng,
) -> ActionOutcome {
    match action {
        Action::Evade | Action::Move => handlers::move_random(ctx, id, rng),
        Action::Eat => handlers::eat(ctx, id),
        Action::Hunt => handlers::hunt(ctx, id, rng),
        Action::Reproduce => {
            reproduction::reproduce(ctx, id, rng).map_or(ActionOutcome::Nothing, ActionOutcome::Reproduced)
        }
    }
}
