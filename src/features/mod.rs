//! Typed wrappers over the tracker's REST resources. Every call goes through
//! the authenticated [`ApiClient`](crate::gateway::ApiClient).

pub mod admin;
pub mod auth;
pub mod common;
pub mod credits;
pub mod torrents;
pub mod users;
