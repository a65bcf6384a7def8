//! Enumeration types for the ecosystem simulation.
//!
//! Agent kinds, the action vocabulary, the concept vocabulary of the fuzzy
//! cognitive map, resource kinds, and death causes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent kinds
// ---------------------------------------------------------------------------

/// The kind of an animal agent. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// Grazes grass, flees predators.
    Herbivore,
    /// Hunts herbivores, scavenges meat.
    Predator,
}

/// Actions available to herbivores.
const HERBIVORE_ACTIONS: [Action; 4] = [Action::Evade, Action::Eat, Action::Reproduce, Action::Move];

/// Actions available to predators.
const PREDATOR_ACTIONS: [Action; 4] = [Action::Hunt, Action::Eat, Action::Reproduce, Action::Move];

/// Concepts registered in a herbivore's decision engine.
const HERBIVORE_CONCEPTS: [Concept; 11] = [
    Concept::Bias,
    Concept::Satiety,
    Concept::Threat,
    Concept::Food,
    Concept::Hunger,
    Concept::Fear,
    Concept::Drive,
    Concept::Evade,
    Concept::Eat,
    Concept::Reproduce,
    Concept::Move,
];

/// Concepts registered in a predator's decision engine.
const PREDATOR_CONCEPTS: [Concept; 10] = [
    Concept::Bias,
    Concept::Satiety,
    Concept::Prey,
    Concept::Meat,
    Concept::Hunger,
    Concept::Drive,
    Concept::Hunt,
    Concept::Eat,
    Concept::Reproduce,
    Concept::Move,
];

impl AgentKind {
    /// The fixed action set this kind chooses from each step.
    pub const fn actions(self) -> &'static [Action] {
        match self {
            Self::Herbivore => &HERBIVORE_ACTIONS,
            Self::Predator => &PREDATOR_ACTIONS,
        }
    }

    /// The concepts a freshly built decision engine of this kind registers.
    pub const fn concepts(self) -> &'static [Concept] {
        match self {
            Self::Herbivore => &HERBIVORE_CONCEPTS,
            Self::Predator => &PREDATOR_CONCEPTS,
        }
    }

    /// The kind this kind hunts, if any.
    pub const fn prey(self) -> Option<Self> {
        match self {
            Self::Herbivore => None,
            Self::Predator => Some(Self::Herbivore),
        }
    }

    /// The kind that hunts this kind, if any.
    pub const fn threat(self) -> Option<Self> {
        match self {
            Self::Herbivore => Some(Self::Predator),
            Self::Predator => None,
        }
    }

    /// The resource this kind consumes with [`Action::Eat`].
    pub const fn diet(self) -> ResourceKind {
        match self {
            Self::Herbivore => ResourceKind::Food,
            Self::Predator => ResourceKind::Meat,
        }
    }
}

impl core::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Herbivore => write!(f, "herbivore"),
            Self::Predator => write!(f, "predator"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An action an agent can take during its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Flee to a random neighbouring cell.
    Evade,
    /// Wander to a random neighbouring cell.
    Move,
    /// Consume the kind's resource at the current cell.
    Eat,
    /// Kill a co-located prey agent.
    Hunt,
    /// Mate with a co-located agent of the same kind.
    Reproduce,
}

impl Action {
    /// The motor concept whose activation weights this action.
    pub const fn concept(self) -> Concept {
        match self {
            Self::Evade => Concept::Evade,
            Self::Move => Concept::Move,
            Self::Eat => Concept::Eat,
            Self::Hunt => Concept::Hunt,
            Self::Reproduce => Concept::Reproduce,
        }
    }
}

// ---------------------------------------------------------------------------
// Concepts
// ---------------------------------------------------------------------------

/// Partition of concepts by how their activation is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ConceptRole {
    /// Overwritten from perception every step.
    Sensory,
    /// Recomputed by propagation; models internal drives.
    Internal,
    /// Recomputed by propagation; weights action selection.
    Motor,
}

/// A named node of an agent's fuzzy cognitive map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Concept {
    // --- Sensory ---
    /// Constant 1.0 input, lets a genome express unconditional tendencies.
    Bias,
    /// Current energy as a fraction of the kind's maximum.
    Satiety,
    /// Noisy proximity of predators.
    Threat,
    /// Noisy proximity of prey.
    Prey,
    /// Grass at the current cell as a fraction of the cap.
    Food,
    /// Meat at the current cell as a fraction of the cap.
    Meat,

    // --- Internal ---
    /// Urge to feed.
    Hunger,
    /// Urge to flee.
    Fear,
    /// Reproductive drive.
    Drive,

    // --- Motor ---
    /// Weight of [`Action::Evade`].
    Evade,
    /// Weight of [`Action::Move`].
    Move,
    /// Weight of [`Action::Eat`].
    Eat,
    /// Weight of [`Action::Hunt`].
    Hunt,
    /// Weight of [`Action::Reproduce`].
    Reproduce,
}

impl Concept {
    /// Which partition this concept belongs to.
    pub const fn role(self) -> ConceptRole {
        match self {
            Self::Bias | Self::Satiety | Self::Threat | Self::Prey | Self::Food | Self::Meat => {
                ConceptRole::Sensory
            }
            Self::Hunger | Self::Fear | Self::Drive => ConceptRole::Internal,
            Self::Evade | Self::Move | Self::Eat | Self::Hunt | Self::Reproduce => {
                ConceptRole::Motor
            }
        }
    }

    /// Whether this concept is set directly from perception.
    pub const fn is_sensory(self) -> bool {
        matches!(self.role(), ConceptRole::Sensory)
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A renewable per-cell resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Grass, grows back over time.
    Food,
    /// Carcass meat, decays over time.
    Meat,
}

// ---------------------------------------------------------------------------
// Death
// ---------------------------------------------------------------------------

/// The cause of an agent's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DeathCause {
    /// Energy reached zero.
    Starvation,
    /// Age exceeded the kind's maximum.
    OldAge,
    /// Killed by a hunting predator.
    Predation,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::OldAge => write!(f, "old_age"),
            Self::Predation => write!(f, "predation"),
        }
    }
}
