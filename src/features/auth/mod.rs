pub mod client;
pub mod state;
pub mod types;

pub use state::AuthState;
