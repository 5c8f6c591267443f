pub mod bounds;
pub mod config;
pub mod constants;
pub mod focus;
pub mod geo;
pub mod session;
pub mod viewport;
