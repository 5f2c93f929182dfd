//! Session domain: transcript model, registry, and state machine.

pub mod engine;
pub mod model;
pub mod registry;
pub mod turn;

pub use engine::{SessionEngine, SessionStarted, TurnOutcome};
pub use model::Session;
pub use registry::{SessionHandle, SessionRegistry};
pub use turn::{SenderRole, Turn};
