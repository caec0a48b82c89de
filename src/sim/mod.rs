//! Deterministic game simulation.
//!
//! Pure logic - no rendering or platform dependencies. Every field of
//! [`state::GameState`] must be reproducible from (seed, tuning, inputs).

pub mod bounds;
pub mod clock;
pub mod mesh;
pub mod ring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::{BoundingBox, bodies_collide};
pub use clock::{GameClock, TimerGate, time_elapsed};
pub use mesh::{MeshId, MeshRegistry, Topology};
pub use ring::EntityRing;
pub use state::GameState;
pub use tick::{TickInput, tick};
