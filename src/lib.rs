// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod core;
pub mod data;
pub mod rules;
pub mod simulation;
pub mod systems;

// Expose the main Game wrapper and the types needed for interaction
pub use crate::core::world::{ActionIntent, CharacterSpec, Game, PendingEventView, Snapshot};
pub use crate::simulation::actions::ActionKind;
pub use crate::simulation::creation::CreationError;
