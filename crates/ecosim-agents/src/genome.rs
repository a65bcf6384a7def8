//! Genomes: the weighted influence graph of a fuzzy cognitive map.
//!
//! A [`Genome`] maps an ordered `(from, to)` concept pair to a real weight.
//! Genomes are values: simulation logic never edits one in place, it builds
//! new ones through [`mutate`] and [`crossover`]. [`distance`] is the sole
//! signal used to decide speciation.
//!
//! Seed genomes start from a per-kind template of signed influences that
//! encode sensible instincts (fear of predators, hunger when depleted,
//! drive when well fed) and are then jittered so that initial populations
//! are diverse.

use std::collections::{BTreeMap, BTreeSet};

use ecosim_types::{AgentKind, Concept};
use rand::Rng;

/// One weighted edge of a template.
type Edge = (Concept, Concept, f64);

/// Instincts of a freshly created herbivore.
const HERBIVORE_TEMPLATE: [Edge; 14] = [
    (Concept::Threat, Concept::Fear, 0.9),
    (Concept::Fear, Concept::Evade, 0.9),
    (Concept::Fear, Concept::Eat, -0.4),
    (Concept::Fear, Concept::Reproduce, -0.6),
    (Concept::Bias, Concept::Hunger, 0.5),
    (Concept::Satiety, Concept::Hunger, -0.9),
    (Concept::Hunger, Concept::Eat, 0.8),
    (Concept::Food, Concept::Eat, 0.6),
    (Concept::Hunger, Concept::Drive, -0.5),
    (Concept::Satiety, Concept::Drive, 0.8),
    (Concept::Drive, Concept::Reproduce, 0.7),
    (Concept::Bias, Concept::Move, 0.2),
    (Concept::Food, Concept::Move, -0.4),
    (Concept::Hunger, Concept::Move, 0.3),
];

/// Instincts of a freshly created predator.
const PREDATOR_TEMPLATE: [Edge; 12] = [
    (Concept::Prey, Concept::Hunt, 0.9),
    (Concept::Hunger, Concept::Hunt, 0.7),
    (Concept::Bias, Concept::Hunger, 0.5),
    (Concept::Satiety, Concept::Hunger, -0.9),
    (Concept::Meat, Concept::Eat, 0.7),
    (Concept::Hunger, Concept::Eat, 0.5),
    (Concept::Hunger, Concept::Drive, -0.5),
    (Concept::Satiety, Concept::Drive, 0.8),
    (Concept::Drive, Concept::Reproduce, 0.7),
    (Concept::Bias, Concept::Move, 0.2),
    (Concept::Prey, Concept::Move, -0.5),
    (Concept::Hunger, Concept::Move, 0.3),
];

/// Weighted directed edges between concepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genome {
    weights: BTreeMap<(Concept, Concept), f64>,
}

impl Genome {
    /// A genome with exactly the given edges.
    pub fn from_edges(edges: impl IntoIterator<Item = ((Concept, Concept), f64)>) -> Self {
        Self {
            weights: edges.into_iter().collect(),
        }
    }

    /// This genome with one edge added or replaced.
    #[must_use]
    pub fn with_edge(mut self, from: Concept, to: Concept, weight: f64) -> Self {
        self.weights.insert((from, to), weight);
        self
    }

    /// The unjittered instinct template for a kind.
    pub fn template(kind: AgentKind) -> Self {
        let edges: &[Edge] = match kind {
            AgentKind::Herbivore => &HERBIVORE_TEMPLATE,
            AgentKind::Predator => &PREDATOR_TEMPLATE,
        };
        Self::from_edges(edges.iter().map(|&(from, to, w)| ((from, to), w)))
    }

    /// The kind's template with every weight moved by a uniform value in
    /// `[-jitter, jitter]` and clamped back into `[-1, 1]`.
    pub fn random(kind: AgentKind, jitter: f64, rng: &mut impl Rng) -> Self {
        let mut genome = Self::template(kind);
        if jitter > 0.0 {
            for w in genome.weights.values_mut() {
                *w = (*w + rng.random_range(-jitter..=jitter)).clamp(-1.0, 1.0);
            }
        }
        genome
    }

    /// Weight of the `from -> to` edge, if present.
    pub fn weight(&self, from: Concept, to: Concept) -> Option<f64> {
        self.weights.get(&(from, to)).copied()
    }

    /// Edges pointing at `to`, as `(from, weight)`.
    pub fn incoming(&self, to: Concept) -> impl Iterator<Item = (Concept, f64)> + '_ {
        self.weights
            .iter()
            .filter(move |((_, target), _)| *target == to)
            .map(|(&(from, _), &w)| (from, w))
    }

    /// All edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = ((Concept, Concept), f64)> + '_ {
        self.weights.iter().map(|(&k, &w)| (k, w))
    }

    /// All edge keys.
    pub fn keys(&self) -> impl Iterator<Item = (Concept, Concept)> + '_ {
        self.weights.keys().copied()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the genome has no edges.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Perturb each weight independently with probability `rate` by a uniform
/// value in `[-strength, strength]`.
///
/// Keys are never added or removed.
pub fn mutate(genome: &Genome, rate: f64, strength: f64, rng: &mut impl Rng) -> Genome {
    let mut out = genome.clone();
    for w in out.weights.values_mut() {
        if rng.random::<f64>() < rate && strength > 0.0 {
            *w += rng.random_range(-strength..=strength);
        }
    }
    out
}

/// Recombine two parents and mutate the result.
///
/// Every key in either parent is kept; its value comes from a fair coin
/// flip between the parents, reading 0 when the chosen parent lacks it.
pub fn crossover(a: &Genome, b: &Genome, rate: f64, strength: f64, rng: &mut impl Rng) -> Genome {
    let keys: BTreeSet<(Concept, Concept)> = a.keys().chain(b.keys()).collect();
    let mut child = Genome::default();
    for key in keys {
        let parent = if rng.random_bool(0.5) { a } else { b };
        let w = parent.weights.get(&key).copied().unwrap_or(0.0);
        child.weights.insert(key, w);
    }
    mutate(&child, rate, strength, rng)
}

/// Sum of absolute weight differences over the union of keys, absent keys
/// reading as 0.
pub fn distance(a: &Genome, b: &Genome) -> f64 {
    let keys: BTreeSet<(Concept, Concept)> = a.keys().chain(b.keys()).collect();
    keys.into_iter()
        .map(|key| {
            let wa = a.weights.get(&key).copied().unwrap_or(0.0);
            let wb = b.weights.get(&key).copied().unwrap_or(0.0);
            (wa - wb).abs()
        })
        .sum()
}
