pub mod avatar;
pub mod client;
pub mod types;
