//! Common type aliases used throughout the engine.

/// Search depth in plies. A pass consumes a ply.
pub type Depth = u32;

/// Heuristic score, always from the perspective of the side being evaluated.
pub type Scoref = f32;
