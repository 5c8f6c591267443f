pub mod layer;
pub mod scheduler;
pub mod style;
