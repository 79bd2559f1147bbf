//! Core game module containing shared components, resources, events, constants
//! and the rules engine.

mod components;
mod constants;
mod events;
mod resources;
mod state;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use state::*;
