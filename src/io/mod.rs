//! Persistenz: JSON-Snapshots des Gleisplans.

pub mod layout;

pub use layout::{read_layout, write_layout, LayoutSnapshot, LAYOUT_VERSION};
