//! Data models for roiboard
//!
//! Re-exported from `roiboard-types` so frontends can depend on the models
//! without pulling in the parser stack.

pub use roiboard_types::models::*;
