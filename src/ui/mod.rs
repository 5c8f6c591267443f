pub mod selection;

pub use selection::{SelectionRecord, SelectionState};
