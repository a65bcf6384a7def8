//! Type-safe identifier wrappers around sequential `u64` counters.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are allocated
//! from monotonically increasing counters owned by the population and the
//! species allocator, so the same seed always yields the same IDs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw counter value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner counter value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Return the identifier that follows this one.
            ///
            /// Saturates at `u64::MAX`; a run would need to mint 2^64 ids to
            /// get there.
            #[must_use]
            pub const fn successor(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent. Never reused within a run.
    AgentId
}

define_id! {
    /// Lineage identifier shared by an agent and its descendants until a
    /// speciation event mints a fresh one.
    SpeciesId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_increments() {
        let id = AgentId::new(7);
        assert_eq!(id.successor(), AgentId::new(8));
        assert!(id.successor() > id);
    }

    #[test]
    fn successor_saturates() {
        let id = SpeciesId::new(u64::MAX);
        assert_eq!(id.successor(), id);
    }

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(format!("{}", SpeciesId::new(42)), "42");
    }

    #[test]
    fn serialize_as_plain_number() {
        let json = serde_json::to_string(&AgentId::new(3)).unwrap_or_default();
        assert_eq!(json, "3");
    }
}
