//! Der zentrale Gleisplan: Segmente, Verbindungsgraph, Selektion und Blöcke.

use std::collections::HashSet;

use anyhow::{bail, Result};
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::connection::{Connection, MIN_DISTANCE};
use super::hex::{HexCell, HexCoord};
use super::junction::{Join, Switch};
use super::scenery::Decoration;
use super::spatial::{self, rect_min_max};
use super::spatial_index::{ConnectionIndex, SpatialMatch};
use super::track::{TrackMeta, TrackPrimitive};

/// Verhalten des Verbindungsgraphen beim Löschen von Segmenten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionPruning {
    /// IDs gelöschter Segmente werden aus den Verbindungen entfernt,
    /// leer gewordene Verbindungen verworfen.
    #[default]
    Prune,
    /// Historisches Verhalten: Verbindungen behalten gelöschte IDs
    /// (kompatibel mit alten gespeicherten Plänen).
    Legacy,
}

/// Container für das gesamte Gleisnetz.
///
/// Einzige Autorität über committete Segmente, deren Metadaten und den
/// Verbindungsgraphen. Alle Mutationen laufen synchron und vollständig
/// innerhalb eines Aufrufs; während einer laufenden Iteration darf nicht
/// mutiert werden.
#[derive(Debug, Clone)]
pub struct RailMap {
    /// Alle committeten Segmente, indexiert nach ID, in Einfügereihenfolge.
    pub(crate) tracks: IndexMap<u64, TrackPrimitive>,
    /// Verbindungspunkte, Schlüssel = floor der zuerst registrierten Position.
    pub(crate) connections: IndexMap<(i64, i64), Connection>,
    /// Abgeleitete Stoßstellen.
    pub joins: Vec<Join>,
    /// Abgeleitete Weichen.
    pub switches: Vec<Switch>,
    /// Dekorationsobjekte.
    pub decorations: Vec<Decoration>,
    /// Lösch-Verhalten des Verbindungsgraphen.
    pub pruning: ConnectionPruning,
    pub(crate) next_id: u64,
    pub(crate) next_block: u64,
    pub(crate) next_decoration_id: u64,
    /// Persistenter Spatial-Index über Verbindungspunkte.
    pub(crate) connection_index: ConnectionIndex,
}

impl RailMap {
    /// Erstellt einen leeren Gleisplan mit Standard-Löschverhalten.
    pub fn new() -> Self {
        Self::with_pruning(ConnectionPruning::default())
    }

    /// Erstellt einen leeren Gleisplan mit explizitem Löschverhalten.
    pub fn with_pruning(pruning: ConnectionPruning) -> Self {
        Self {
            tracks: IndexMap::new(),
            connections: IndexMap::new(),
            joins: Vec::new(),
            switches: Vec::new(),
            decorations: Vec::new(),
            pruning,
            next_id: 1,
            next_block: 1,
            next_decoration_id: 1,
            connection_index: ConnectionIndex::empty(),
        }
    }

    // ── Commit ───────────────────────────────────────────────────

    /// Committet ein Segment: ID und Block vergeben, Endpunkte in den
    /// Verbindungsgraphen integrieren, in die Sammlung aufnehmen.
    ///
    /// Bricht ohne jeden Teileffekt ab, wenn ein Endpunkt eine neue
    /// Verbindung auf einem bereits belegten Ganzzahl-Schlüssel anlegen
    /// müsste (geometrische Inkonsistenz der Eingabe).
    pub fn add(&mut self, cell: &HexCell, primitive: TrackPrimitive) -> Result<u64> {
        self.validate_endpoints(&primitive)?;

        let id = self.next_id;
        self.next_id += 1;
        let block = self.next_block;
        self.next_block += 1;

        let mut primitive = primitive;
        primitive.meta = Some(TrackMeta {
            id,
            block,
            cell: cell.coord,
            selected: false,
        });

        self.create_connections(id, &primitive);
        self.tracks.insert(id, primitive);
        self.rebuild_connection_index();

        log::debug!("Segment {id} committet (Block {block})");
        Ok(id)
    }

    /// Committet eine Liste von Segmenten; eine leere Liste ist ein No-op.
    ///
    /// Atomarität gilt pro Segment: bricht ein Commit ab, bleiben zuvor
    /// committete Segmente der Liste bestehen.
    pub fn add_all(
        &mut self,
        cell: &HexCell,
        primitives: Vec<TrackPrimitive>,
    ) -> Result<Vec<u64>> {
        let mut ids = Vec::with_capacity(primitives.len());
        for primitive in primitives {
            ids.push(self.add(cell, primitive)?);
        }
        Ok(ids)
    }

    /// Prüft beide Endpunkte gegen den Graphen, bevor mutiert wird.
    fn validate_endpoints(&self, primitive: &TrackPrimitive) -> Result<()> {
        let (start, end) = primitive.endpoints();
        for point in [start, end] {
            if self.find_connection(point).is_none() {
                let key = Connection::key_of(point);
                if self.connections.contains_key(&key) {
                    bail!(
                        "Verbindungsschlüssel {key:?} bereits belegt, Punkt \
                         ({:.2}, {:.2}) liegt aber außerhalb MIN_DISTANCE",
                        point.x,
                        point.y
                    );
                }
            }
        }
        Ok(())
    }

    /// Integriert beide Endpunkte eines Segments in den Graphen.
    fn create_connections(&mut self, id: u64, primitive: &TrackPrimitive) {
        let (start, end) = primitive.endpoints();
        for point in [start, end] {
            if let Some(conn) = self
                .connections
                .values_mut()
                .find(|c| c.position.distance(point) < MIN_DISTANCE)
            {
                conn.add_item(id);
            } else {
                let conn = Connection::new(id, point);
                self.connections.insert(conn.key, conn);
            }
        }
    }

    // ── Lookup und Iteration ─────────────────────────────────────

    /// Segment nach ID, O(1).
    pub fn get(&self, id: u64) -> Option<&TrackPrimitive> {
        self.tracks.get(&id)
    }

    /// Restartbarer Iterator über alle Segmente in Einfügereihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &TrackPrimitive> {
        self.tracks.values()
    }

    /// Anzahl committeter Segmente.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Gibt `true` zurück, wenn keine Segmente committet sind.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// IDs aller selektierten Segmente in Einfügereihenfolge.
    pub fn selected_ids(&self) -> Vec<u64> {
        self.tracks
            .values()
            .filter(|t| t.is_selected())
            .filter_map(|t| t.id())
            .collect()
    }

    // ── Verbindungsgraph ─────────────────────────────────────────

    /// Erster Verbindungspunkt innerhalb `MIN_DISTANCE` des Punkts,
    /// in Einfügereihenfolge.
    pub fn find_connection(&self, point: Vec2) -> Option<&Connection> {
        self.connections
            .values()
            .find(|c| c.position.distance(point) < MIN_DISTANCE)
    }

    /// Iterator über alle Verbindungspunkte (read-only).
    pub fn connections_iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Anzahl der Verbindungspunkte.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Nächstgelegener Verbindungspunkt zur Weltposition (KD-Tree).
    pub fn nearest_connection(&self, point: Vec2) -> Option<SpatialMatch> {
        self.connection_index.nearest(point)
    }

    /// Alle Verbindungspunkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn connections_within_radius(&self, point: Vec2, radius: f32) -> Vec<SpatialMatch> {
        self.connection_index.within_radius(point, radius)
    }

    /// Alle Verbindungspunkte innerhalb eines Rechtecks.
    pub fn connections_within_rect(&self, a: Vec2, b: Vec2) -> Vec<(i64, i64)> {
        let (min, max) = rect_min_max(a, b);
        self.connection_index.within_rect(min, max)
    }

    /// Baut den persistenten Verbindungs-Index neu auf.
    pub(crate) fn rebuild_connection_index(&mut self) {
        self.connection_index = ConnectionIndex::from_connections(&self.connections);
    }

    // ── Räumliche Abfragen ───────────────────────────────────────

    /// IDs aller Segmente, deren beide (Sehnen-)Endpunkte strikt im
    /// normalisierten Rechteck liegen.
    ///
    /// Bögen werden nur über ihre Sehnen-Endpunkte geprüft: ein weit
    /// ausbauchender Bogen mit Endpunkten im Rechteck zählt als Treffer.
    pub fn find_by_rect(&self, a: Vec2, b: Vec2) -> Vec<u64> {
        let (min, max) = rect_min_max(a, b);
        self.tracks
            .values()
            .filter(|t| {
                let (s, e) = t.endpoints();
                spatial::point_strictly_inside(s, min, max)
                    && spatial::point_strictly_inside(e, min, max)
            })
            .filter_map(|t| t.id())
            .collect()
    }

    /// IDs aller Segmente, die der Punkt trifft (Überlappungen erlaubt).
    pub fn find_by_xy(&self, point: Vec2) -> Vec<u64> {
        self.tracks
            .values()
            .filter(|t| spatial::hit_primitive(t, point))
            .filter_map(|t| t.id())
            .collect()
    }

    // ── Selektion und Blöcke ─────────────────────────────────────

    /// Hebt die Selektion aller Segmente auf.
    pub fn deselect_all(&mut self) {
        for track in self.tracks.values_mut() {
            if let Some(meta) = track.meta.as_mut() {
                meta.selected = false;
            }
        }
    }

    /// Selektiert die angegebenen Segmente (unbekannte IDs werden ignoriert).
    pub fn select(&mut self, ids: &[u64]) {
        for id in ids {
            if let Some(meta) = self.tracks.get_mut(id).and_then(|t| t.meta.as_mut()) {
                meta.selected = true;
            }
        }
    }

    /// Selektiert die Segmente und zusätzlich alle weiteren, die sich
    /// einen Block mit einem der Seeds teilen.
    ///
    /// Ein einziger Propagationsdurchlauf: Blöcke bereits selektierter
    /// Fremd-Segmente werden nicht transitiv eingesammelt.
    pub fn select_group(&mut self, ids: &[u64]) {
        self.select(ids);
        let blocks: HashSet<u64> = ids
            .iter()
            .filter_map(|id| self.tracks.get(id))
            .filter_map(|t| t.block())
            .collect();
        for track in self.tracks.values_mut() {
            if let Some(meta) = track.meta.as_mut() {
                if blocks.contains(&meta.block) {
                    meta.selected = true;
                }
            }
        }
    }

    /// Vereinigt alle selektierten Segmente in einem frischen Block.
    pub fn group(&mut self) {
        let block = self.next_block;
        self.next_block += 1;
        for track in self.tracks.values_mut() {
            if let Some(meta) = track.meta.as_mut() {
                if meta.selected {
                    meta.block = block;
                }
            }
        }
    }

    /// Gibt jedem selektierten Segment einen eigenen frischen Block und
    /// hebt anschließend die Selektion auf.
    pub fn ungroup(&mut self) {
        for track in self.tracks.values_mut() {
            if let Some(meta) = track.meta.as_mut() {
                if meta.selected {
                    meta.block = self.next_block;
                    self.next_block += 1;
                }
            }
        }
        self.deselect_all();
    }

    // ── Löschen ──────────────────────────────────────────────────

    /// Entfernt alle selektierten Segmente; gibt die Anzahl zurück.
    ///
    /// Verbindungsgraph-Bereinigung gemäß `pruning`; aufgezeichnete
    /// Joins und Weichen bleiben bis zur expliziten Entfernung bestehen.
    pub fn delete_selected(&mut self) -> usize {
        let doomed = self.selected_ids();
        if doomed.is_empty() {
            return 0;
        }

        for id in &doomed {
            self.tracks.shift_remove(id);
        }

        if self.pruning == ConnectionPruning::Prune {
            for conn in self.connections.values_mut() {
                conn.items.retain(|id| !doomed.contains(id));
            }
            self.connections.retain(|_, conn| !conn.items.is_empty());
            self.rebuild_connection_index();
        }

        log::debug!("{} Segmente gelöscht", doomed.len());
        doomed.len()
    }

    // ── Dekorationen ─────────────────────────────────────────────

    /// Platziert ein Dekorationsobjekt auf einer Zelle.
    pub fn add_decoration(&mut self, cell: HexCoord, kind: u32, name: impl Into<String>) -> u64 {
        let id = self.next_decoration_id;
        self.next_decoration_id += 1;
        self.decorations.push(Decoration::new(id, cell, kind, name));
        id
    }

    /// Entfernt ein Dekorationsobjekt; gibt `true` zurück, falls gefunden.
    pub fn remove_decoration(&mut self, id: u64) -> bool {
        let before = self.decorations.len();
        self.decorations.retain(|d| d.id != id);
        self.decorations.len() < before
    }

    /// Alle Dekorationsobjekte auf einer Zelle.
    pub fn decorations_at(&self, cell: HexCoord) -> Vec<&Decoration> {
        self.decorations.iter().filter(|d| d.cell == cell).collect()
    }
}

impl Default for RailMap {
    fn default() -> Self {
        Self::new()
    }
}
