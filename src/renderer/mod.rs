//! Draw command assembly
//!
//! The simulation never talks to a GPU. Each frame [`scene::queue_frame`]
//! flattens the game state into an ordered command list that a host
//! backend replays against whatever graphics API it carries.

pub mod queue;
pub mod scene;

pub use queue::{DrawCommand, DrawQueue};
