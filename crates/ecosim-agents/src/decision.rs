//! The decision engine: a fuzzy cognitive map over named concepts.
//!
//! Each step runs one synchronous transition:
//!
//! 1. **Intake** -- sensory concepts are overwritten from the [`Perception`].
//! 2. **Propagation** -- every non-sensory concept becomes
//!    `squash(sum(activation[c] * weight[c -> concept]))` computed from the
//!    post-intake vector. A concept with no incoming edge squashes to 0.5.
//! 3. **Commit** -- all new values replace the old ones at once.
//!
//! [`DecisionEngine::select_action`] then samples an action with weights
//! taken from the matching motor concepts. It is a weighted random choice,
//! not an argmax.

use std::collections::BTreeMap;

use ecosim_types::{Action, AgentKind, Concept};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::genome::Genome;
use crate::perception::Perception;

/// Logistic squashing function mapping the reals onto `(0, 1)`.
///
/// Saturates to exactly 0.0 or 1.0 for very large magnitudes.
pub fn squash(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Concept activations driven by a [`Genome`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionEngine {
    genome: Genome,
    activations: BTreeMap<Concept, f64>,
}

impl DecisionEngine {
    /// An engine with the given genome and starting activations.
    ///
    /// Activations are clamped into `[0, 1]`.
    pub fn new(genome: Genome, activations: BTreeMap<Concept, f64>) -> Self {
        let activations = activations
            .into_iter()
            .map(|(c, v)| (c, clamp_unit(v)))
            .collect();
        Self { genome, activations }
    }

    /// An engine over the kind's concepts with every activation at 0.5.
    pub fn neutral(kind: AgentKind, genome: Genome) -> Self {
        Self::new(genome, kind.concepts().iter().map(|&c| (c, 0.5)).collect())
    }

    /// A jittered seed genome with uniformly random activations.
    pub fn random(kind: AgentKind, jitter: f64, rng: &mut impl Rng) -> Self {
        let genome = Genome::random(kind, jitter, rng);
        let activations = kind
            .concepts()
            .iter()
            .map(|&c| (c, rng.random::<f64>()))
            .collect();
        Self { genome, activations }
    }

    /// The influence graph this engine runs.
    pub const fn genome(&self) -> &Genome {
        &self.genome
    }

    /// All current activations.
    pub const fn activations(&self) -> &BTreeMap<Concept, f64> {
        &self.activations
    }

    /// Current activation of a concept, if registered.
    pub fn activation(&self, concept: Concept) -> Option<f64> {
        self.activations.get(&concept).copied()
    }

    /// Run one intake / propagate / commit transition.
    ///
    /// Perceived values for concepts this engine does not register are
    /// ignored.
    pub fn update(&mut self, perception: &Perception) {
        for (concept, value) in perception.iter() {
            if let Some(slot) = self.activations.get_mut(&concept) {
                *slot = clamp_unit(value);
            }
        }

        let prior = &self.activations;
        let next: BTreeMap<Concept, f64> = prior
            .iter()
            .map(|(&concept, &current)| {
                if concept.is_sensory() {
                    return (concept, current);
                }
                let sum: f64 = self
                    .genome
                    .incoming(concept)
                    .map(|(from, w)| prior.get(&from).copied().unwrap_or(0.0) * w)
                    .sum();
                (concept, squash(sum))
            })
            .collect();

        self.activations = next;
    }

    /// Sample one of `actions`, weighted by each action's motor activation.
    ///
    /// An action whose concept is not registered gets a uniform random
    /// weight. Zero-weight actions are never drawn unless every weight is
    /// zero, in which case the choice is uniform.
    pub fn select_action(&self, actions: &[Action], rng: &mut impl Rng) -> Action {
        let weighted: Vec<(Action, f64)> = actions
            .iter()
            .map(|&action| {
                let w = self
                    .activation(action.concept())
                    .unwrap_or_else(|| rng.random::<f64>());
                (action, w.max(0.0))
            })
            .collect();

        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        if total <= 0.0 || !total.is_finite() {
            return actions.choose(rng).copied().unwrap_or(Action::Move);
        }

        let draw = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        for &(action, w) in &weighted {
            if w <= 0.0 {
                continue;
            }
            cumulative += w;
            if cumulative >= draw {
                return action;
            }
        }

        // Rounding left the walk just short of the draw.
        weighted
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map_or(Action::Move, |&(action, _)| action)
    }

    /// Per-concept mean of two engines' activations.
    ///
    /// Concepts registered in only one engine keep that engine's value.
    pub fn blend_activations(a: &Self, b: &Self) -> BTreeMap<Concept, f64> {
        let mut out = a.activations.clone();
        for (&concept, &vb) in &b.activations {
            out.entry(concept)
                .and_modify(|va| *va = (*va + vb) / 2.0)
                .or_insert(vb);
        }
        out
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
