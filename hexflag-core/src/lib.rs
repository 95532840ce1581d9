//! HEXFLAG Core - move decisions for hex-grid capture the flag
//!
//! This crate provides everything an agent needs to pick one move per turn:
//! - Board geometry (odd-q offset grid, axial math, six directions)
//! - Shortest paths (BFS, A*, weighted A*) and distance fields
//! - Entity interpretation and flag-carry inference
//! - Interception prediction and score-ratio evaluation
//! - The strategy family and the `Agent` that runs one of them
//! - An offline arena for playing agents against each other

pub mod error;
pub mod board;
pub mod entity;
pub mod path;
pub mod field;
pub mod carry;
pub mod intercept;
pub mod eval;
pub mod strategy;
pub mod config;
pub mod agent;
pub mod arena;

// Re-exports for convenient access
pub use error::HexflagError;
pub use board::{hex_distance, AxialCoord, Cell, CellKind, Direction, Grid, OffsetCoord, DIRECTIONS};
pub use entity::{Entity, EntityKind, Roles, Score, Snapshot, TeamColor};
pub use path::{astar, astar_route, bfs, distance, weighted_astar, Route};
pub use field::DistanceField;
pub use carry::{CaptureRule, CarryState, FlagCarryTracker};
pub use intercept::{find_intercept, Intercept};
pub use eval::{projected_ratio, Coefficients, RatioWeights};
pub use strategy::intercept::InterceptConfig;
pub use strategy::StrategyKind;
pub use config::AgentConfig;
pub use agent::{Agent, AgentState};
pub use arena::{play_match, Arena, MatchOutcome, TurnEvents};
