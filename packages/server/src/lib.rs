// Engagement Lifecycle - API Core
//
// HTTP surface over the `engagements` crate: admins create and publish
// engagements, invite participants, review excuses, lock attendance and
// issue certificates. Participants accept or excuse themselves.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
