pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod tui;

pub use application::store;
pub use domain::types;
pub use infrastructure::gateway;
