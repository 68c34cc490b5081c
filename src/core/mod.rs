//! Kern-Domänentypen: Hexraster, Gleis-Primitive, Gleisplan, Topologie.

pub mod connection;
pub mod geometry;
pub mod hex;
pub mod junction;
pub mod rail_map;
pub mod scenery;
pub mod spatial;
pub mod spatial_index;
pub mod track;
pub mod viewport;

pub use connection::{Connection, MIN_DISTANCE};
pub use geometry::{infini_line, line, long_arc, short_arc, short_arc2, TrackTool};
pub use hex::{HexCell, HexCoord, HexGrid, GRID_COLS, GRID_ROWS, HEX_SIZE};
pub use junction::{
    create_join_from_selection, create_switch_from_selection, find_join_by_id, find_switch_by_id,
    set_switch_route, Join, Switch, SwitchRoute,
};
pub use rail_map::{ConnectionPruning, RailMap};
pub use scenery::Decoration;
pub use spatial::{hit_arc, hit_line, hit_primitive, rect_min_max, HIT_THRESHOLD};
pub use spatial_index::{ConnectionIndex, SpatialMatch};
pub use track::{TrackKind, TrackMeta, TrackPrimitive};
pub use viewport::Viewport;
