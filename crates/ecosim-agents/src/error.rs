//! Error types for the ecosim-agents crate.
//!
//! Agent behaviour itself never fails: an empty cell, a missing mate, or an
//! absent prey is a no-op. Errors only come from rejected configuration and
//! from bookkeeping misuse of the [`Population`](crate::population::Population).

use ecosim_types::AgentId;

/// Errors that can occur while configuring or registering agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// An agent parameter is out of its valid range.
    #[error("invalid agent parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter, dotted by section (`predator.max_energy`).
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An agent with this ID is already registered.
    #[error("agent already registered: {0}")]
    DuplicateAgent(AgentId),
}
