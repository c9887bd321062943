// HTTP routes
pub mod attendance;
pub mod certificates;
pub mod engagements;
pub mod health;
pub mod invitations;

pub use health::*;
