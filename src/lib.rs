//! Hexrail Engine.
//! Geometrie- und Topologie-Kern eines Hex-Raster-Gleisplan-Editors:
//! Gleisgeometrie aus Hexzellen, Verbindungsgraph, Selektion und Blöcke,
//! Trefferprüfung sowie Weichen-/Join-Ableitung.

pub mod core;
pub mod io;

pub use crate::core::{
    create_join_from_selection, create_switch_from_selection, find_join_by_id, find_switch_by_id,
    set_switch_route, Connection, ConnectionPruning, Decoration, HexCell, HexCoord, HexGrid, Join,
    RailMap, Switch, SwitchRoute, TrackKind, TrackMeta, TrackPrimitive, TrackTool, Viewport,
    MIN_DISTANCE,
};
pub use crate::core::{ConnectionIndex, SpatialMatch};
pub use crate::io::{read_layout, write_layout, LayoutSnapshot, LAYOUT_VERSION};
