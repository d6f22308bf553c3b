//! Grimoire — Storyteller context.
//!
//! Holds the reference game state (the grimoire), the storyteller that
//! applies op batches to it, the transports that carry text to and from the
//! human players, and table setup: role allocation and dealing.

pub mod application;
pub mod domain;
pub mod rng;

pub use application::channel::{ChannelTransport, Delivery, PendingQuestion, TransportHandle};
pub use application::cli::CliTransport;
pub use application::storyteller::GrimoireStoryteller;
pub use application::transport::Transport;
pub use domain::allocator::StaticAllocator;
pub use domain::dealing::deal_roles;
pub use domain::grimoire::{Grimoire, SharedGrimoire};
pub use rng::SeededRng;
