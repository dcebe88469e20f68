//! Persistent history of replacement values entered at the prompt.
//!
//! Values are remembered per namespace and offered as the suggestion the next
//! time the same replacement is resolved.

pub mod store;

pub use store::{InputHistory, NAMESPACE_KEY};
