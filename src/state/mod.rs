//! State Management Layer
//!
//! Unidirectional data flow:
//!
//! ```text
//! Consumer Action → SelectionManager method → ClientStore call → state update → watch notify → Consumer refresh
//! ```

mod selection;

pub use selection::*;
