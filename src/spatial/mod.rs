pub mod culling;
pub mod index;
