//! Core trait abstractions: storage, collaborators and time.

pub mod clock;
pub mod directory;
pub mod renderer;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use directory::ParticipantDirectory;
pub use renderer::CertificateRenderer;
pub use store::{ApplyFn, EngagementStore};
