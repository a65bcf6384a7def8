//! Error types for the `ecosim-world` crate.
//!
//! Only construction can fail. Once a grid and resource field exist, every
//! operation on them is total: coordinates wrap and quantities clamp.

/// Errors that can occur while building the world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Grid width or height was zero.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The grid has more cells than this platform can index.
    #[error("grid {width}x{height} is too large to index")]
    GridTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A resource parameter is out of its valid range.
    #[error("invalid resource parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
