//! Persistence
//!
//! Serialize/deserialize logic for the flat text image the tree is saved to
//! at shutdown and loaded from at startup.

pub mod text;

pub use text::{deserialize_tree, load_from_path, save_to_path, serialize_tree};
