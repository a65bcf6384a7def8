//! Simulation loop runner.
//!
//! [`run`] drives [`Ecosystem::step`] until one of the run bounds is hit:
//!
//! - **Bounded simulation**: stop after `max_ticks` (0 runs until extinction)
//! - **Extinction**: stop once no agent is alive
//!
//! The scheduler itself never special-cases an empty world; stopping on
//! extinction is a driver decision made here.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::scheduler::Ecosystem;
use crate::tick::TickSummary;

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// All agents are dead.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Drivers use this to sample populations for plotting, log progress, and
/// so on. The callback sees the summary and the ecosystem read-only.
pub trait TickCallback {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, ecosystem: &Ecosystem);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _ecosystem: &Ecosystem) {}
}

/// Logs a population summary every `interval` ticks.
#[derive(Debug, Clone, Copy)]
pub struct LoggingCallback {
    interval: u64,
}

impl LoggingCallback {
    /// Log every `interval` ticks; 0 disables logging.
    pub const fn new(interval: u64) -> Self {
        Self { interval }
    }
}

impl TickCallback for LoggingCallback {
    fn on_tick(&mut self, summary: &TickSummary, _ecosystem: &Ecosystem) {
        if summary.tick.checked_rem(self.interval) != Some(0) {
            return;
        }
        info!(
            tick = summary.tick,
            herbivores = summary.herbivores,
            predators = summary.predators,
            species_alive = summary.species_alive,
            births = summary.births.len(),
            deaths = summary.deaths.len(),
            total_food = summary.total_food,
            total_meat = summary.total_meat,
            "Tick summary"
        );
    }
}

/// Run the simulation loop until a termination condition is met.
///
/// Extinction is checked before the first tick and after every tick, so an
/// ecosystem that starts empty ends immediately with no ticks executed.
pub fn run(ecosystem: &mut Ecosystem, max_ticks: u64, callback: &mut dyn TickCallback) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks,
        seed = ecosystem.seed(),
        agents = ecosystem.agents().len(),
        "Simulation starting"
    );

    let end_reason = loop {
        if ecosystem.is_extinct() {
            info!(tick = ecosystem.tick(), "All agents dead -- extinction");
            break SimulationEndReason::Extinction;
        }
        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(max_ticks, "Max ticks reached");
            break SimulationEndReason::MaxTicksReached;
        }

        let summary = ecosystem.step();
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, ecosystem);
        last_summary = Some(summary);
    };

    SimulationResult {
        end_reason,
        final_summary: last_summary,
        total_ticks,
    }
}

/// Log the final result of a simulation run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_agents_alive = result.final_summary.as_ref().map(TickSummary::agents_alive),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            herbivores = summary.herbivores,
            predators = summary.predators,
            species_alive = summary.species_alive,
            total_food = summary.total_food,
            total_meat = summary.total_meat,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Records the tick number of every summary it sees.
    struct Recorder(Vec<u64>);

    impl TickCallback for Recorder {
        fn on_tick(&mut self, summary: &TickSummary, ecosystem: &Ecosystem) {
            assert_eq!(summary.tick, ecosystem.tick());
            self.0.push(summary.tick);
        }
    }

    #[test]
    fn stops_at_max_ticks() {
        let mut eco = Ecosystem::new(10, 10, 0, 5, Some(11)).unwrap();
        let mut recorder = Recorder(Vec::new());
        let result = run(&mut eco, 5, &mut recorder);
        // Five fed herbivores cannot all starve in five ticks.
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(recorder.0, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.final_summary.unwrap().tick, 5);
    }

    #[test]
    fn empty_world_ends_immediately() {
        let mut eco = Ecosystem::new(4, 4, 0, 0, Some(2)).unwrap();
        let result = run(&mut eco, 100, &mut NoOpCallback);
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        assert_eq!(eco.tick(), 0);
    }

    #[test]
    fn unbounded_run_ends_on_extinction() {
        // No grass growth and no reproduction: everyone starves or ages out.
        let mut config = crate::config::SimulationConfig::default();
        config.world.width = 6;
        config.world.height = 6;
        config.world.seed = Some(5);
        config.population.initial_herbivores = 4;
        config.population.initial_predators = 2;
        config.resources.grass_growth_probability = 0.0;
        config.resources.grass_spread_probability = 0.0;
        config.agents.herbivore.min_reproduction_age = u32::MAX;
        config.agents.predator.min_reproduction_age = u32::MAX;
        let mut eco = Ecosystem::initialize(&config).unwrap();

        let result = run(&mut eco, 0, &mut LoggingCallback::new(10));
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert!(eco.is_extinct());
        assert_eq!(result.final_summary.as_ref().unwrap().agents_alive(), 0);
        log_simulation_end(&result);
    }
}
