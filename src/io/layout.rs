//! Lesen und Schreiben von Gleisplan-Snapshots (JSON).
//!
//! Der Snapshot ist das Austauschformat zum Persistenz-Kollaborateur:
//! IDs, Blöcke, Selektions-Flags und sämtliche Geometriefelder müssen
//! verlustfrei durch einen Schreib-/Lese-Zyklus gehen.

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::rail_map::ConnectionPruning;
use crate::core::spatial_index::ConnectionIndex;
use crate::core::{Connection, Decoration, Join, RailMap, Switch, TrackPrimitive};

/// Aktuelle Snapshot-Formatversion.
pub const LAYOUT_VERSION: u32 = 1;

/// Vollständiger, serialisierbarer Zustand eines Gleisplans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Formatversion.
    pub version: u32,
    /// Nächste Segment-ID.
    pub next_id: u64,
    /// Nächste Block-ID.
    pub next_block: u64,
    /// Nächste Dekorations-ID.
    pub next_decoration_id: u64,
    /// Lösch-Verhalten des Verbindungsgraphen.
    pub pruning: ConnectionPruning,
    /// Alle Segmente mit Metadaten, in Einfügereihenfolge.
    pub tracks: Vec<TrackPrimitive>,
    /// Alle Verbindungspunkte, in Einfügereihenfolge.
    pub connections: Vec<Connection>,
    /// Aufgezeichnete Joins.
    pub joins: Vec<Join>,
    /// Aufgezeichnete Weichen.
    pub switches: Vec<Switch>,
    /// Dekorationsobjekte.
    pub decorations: Vec<Decoration>,
}

impl LayoutSnapshot {
    /// Erfasst den vollständigen Zustand eines Gleisplans.
    pub fn capture(map: &RailMap) -> Self {
        Self {
            version: LAYOUT_VERSION,
            next_id: map.next_id,
            next_block: map.next_block,
            next_decoration_id: map.next_decoration_id,
            pruning: map.pruning,
            tracks: map.iter().copied().collect(),
            connections: map.connections_iter().cloned().collect(),
            joins: map.joins.clone(),
            switches: map.switches.clone(),
            decorations: map.decorations.clone(),
        }
    }

    /// Stellt den Gleisplan aus dem Snapshot wieder her.
    pub fn restore(self) -> Result<RailMap> {
        if self.version != LAYOUT_VERSION {
            bail!(
                "Snapshot-Version {} wird nicht unterstützt (erwartet {})",
                self.version,
                LAYOUT_VERSION
            );
        }

        let mut tracks = IndexMap::with_capacity(self.tracks.len());
        for track in self.tracks {
            let meta = track
                .meta
                .context("Snapshot enthält Segment ohne Metadaten")?;
            tracks.insert(meta.id, track);
        }

        let mut connections = IndexMap::with_capacity(self.connections.len());
        for conn in self.connections {
            connections.insert(conn.key, conn);
        }
        let connection_index = ConnectionIndex::from_connections(&connections);

        log::info!(
            "Snapshot geladen: {} Segmente, {} Verbindungen",
            tracks.len(),
            connections.len()
        );

        Ok(RailMap {
            tracks,
            connections,
            joins: self.joins,
            switches: self.switches,
            decorations: self.decorations,
            pruning: self.pruning,
            next_id: self.next_id,
            next_block: self.next_block,
            next_decoration_id: self.next_decoration_id,
            connection_index,
        })
    }
}

/// Schreibt den Gleisplan als JSON-Snapshot.
pub fn write_layout(map: &RailMap, writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(writer, &LayoutSnapshot::capture(map))
        .context("Snapshot konnte nicht geschrieben werden")
}

/// Liest einen JSON-Snapshot und stellt den Gleisplan wieder her.
pub fn read_layout(reader: impl Read) -> Result<RailMap> {
    let snapshot: LayoutSnapshot =
        serde_json::from_reader(reader).context("Snapshot konnte nicht gelesen werden")?;
    snapshot.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::line;
    use crate::core::HexGrid;
    use crate::HexCoord;

    #[test]
    fn capture_restore_preserves_counters() {
        let grid = HexGrid::new();
        let cell = *grid.cell(HexCoord::new(0, 0)).unwrap();
        let mut map = RailMap::new();
        map.add(&cell, line(&cell, 0)).unwrap();

        let restored = LayoutSnapshot::capture(&map).restore().unwrap();
        assert_eq!(restored.next_id, map.next_id);
        assert_eq!(restored.next_block, map.next_block);
    }

    #[test]
    fn restore_rejects_unknown_version() {
        let map = RailMap::new();
        let mut snapshot = LayoutSnapshot::capture(&map);
        snapshot.version = 99;
        assert!(snapshot.restore().is_err());
    }

    #[test]
    fn restore_rejects_uncommitted_tracks() {
        let map = RailMap::new();
        let mut snapshot = LayoutSnapshot::capture(&map);
        snapshot.tracks.push(TrackPrimitive::new(
            crate::TrackKind::Line {
                start: glam::Vec2::ZERO,
                end: glam::Vec2::ONE,
            },
            0x10,
        ));
        assert!(snapshot.restore().is_err());
    }
}
