//! Spatial-Index (KD-Tree) für schnelle Verbindungspunkt-Abfragen.

use std::collections::HashMap;

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::Connection;

/// Ergebnis einer Distanzabfrage gegen den Verbindungs-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Schlüssel des gefundenen Verbindungspunkts.
    pub key: (i64, i64),
    /// Euklidische Distanz zum Suchpunkt.
    pub distance: f32,
}

/// Read-only Spatial-Index über allen Verbindungspunkten eines Gleisplans.
///
/// Ergänzt die geordnete `find_connection`-Suche (Erster-Treffer-Semantik)
/// um echte Nächster-Punkt-Abfragen für das interaktive Picking.
#[derive(Debug, Clone)]
pub struct ConnectionIndex {
    tree: KdTree<f64, 2>,
    keys: Vec<(i64, i64)>,
    positions: HashMap<(i64, i64), Vec2>,
}

impl ConnectionIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            keys: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Baut einen neuen Index aus der Verbindungs-Map.
    pub fn from_connections(connections: &IndexMap<(i64, i64), Connection>) -> Self {
        let keys: Vec<(i64, i64)> = connections.keys().copied().collect();

        let entries: Vec<[f64; 2]> = connections
            .values()
            .map(|conn| [conn.position.x as f64, conn.position.y as f64])
            .collect();

        let tree: KdTree<f64, 2> = (&entries).into();

        let positions = connections
            .iter()
            .map(|(key, conn)| (*key, conn.position))
            .collect();

        Self {
            tree,
            keys,
            positions,
        }
    }

    /// Anzahl indexierter Verbindungspunkte.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Gibt `true` zurück, wenn der Index leer ist.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Findet den nächsten Verbindungspunkt zur Weltposition.
    pub fn nearest(&self, query: Vec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let key = *self.keys.get(result.item as usize)?;

        Some(SpatialMatch {
            key,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Verbindungspunkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let key = *self.keys.get(entry.item as usize)?;
                Some(SpatialMatch {
                    key,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }

    /// Findet alle Verbindungspunkte innerhalb eines axis-aligned Rechtecks.
    ///
    /// KD-Tree-Vorfilter über den umschließenden Kreis, danach exakte
    /// Rechteck-Prüfung.
    pub fn within_rect(&self, min: Vec2, max: Vec2) -> Vec<(i64, i64)> {
        if self.is_empty() {
            return Vec::new();
        }

        let center_x = (min.x + max.x) as f64 * 0.5;
        let center_y = (min.y + max.y) as f64 * 0.5;
        let half_w = (max.x - min.x) as f64 * 0.5;
        let half_h = (max.y - min.y) as f64 * 0.5;
        let radius_sq = half_w * half_w + half_h * half_h;

        self.tree
            .within::<SquaredEuclidean>(&[center_x, center_y], radius_sq)
            .into_iter()
            .filter_map(|entry| {
                let key = *self.keys.get(entry.item as usize)?;
                let pos = self.positions.get(&key)?;
                if pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y {
                    Some(key)
                } else {
                    None
                }
            })
            .collect()
    }
}
