//! Verbindungspunkte: aggregierte Segment-IDs an gemeinsamen Endpunkten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Euklidischer Schwellwert (Welt-Einheiten), unterhalb dessen zwei
/// Endpunkte als derselbe Verbindungspunkt gelten.
pub const MIN_DISTANCE: f32 = 5.0;

/// Ein Verbindungspunkt des Gleisnetzes.
///
/// Jeder Endpunkt jedes committeten Segments gehört zu genau einem
/// Verbindungspunkt. Bis zu 2 Segmente sind ein gewöhnlicher Stoß,
/// mehr als 2 ein Weichen-Kandidat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Ganzzahliger Schlüssel: floor der zuerst registrierten Position.
    pub key: (i64, i64),
    /// Exakte Position des zuerst registrierten Endpunkts.
    pub position: Vec2,
    /// IDs aller anliegenden Segmente, aufsteigend sortiert, ohne Duplikate.
    pub items: Vec<u64>,
}

impl Connection {
    /// Erstellt einen Verbindungspunkt mit erstem Segment.
    pub fn new(id: u64, position: Vec2) -> Self {
        Self {
            key: Self::key_of(position),
            position,
            items: vec![id],
        }
    }

    /// Ganzzahliger Schlüssel zu einer Position.
    pub fn key_of(position: Vec2) -> (i64, i64) {
        (position.x.floor() as i64, position.y.floor() as i64)
    }

    /// Fügt eine Segment-ID hinzu (idempotent) und hält `items` sortiert.
    pub fn add_item(&mut self, id: u64) {
        if !self.items.contains(&id) {
            self.items.push(id);
            self.items.sort_unstable();
        }
    }

    /// Entfernt eine Segment-ID; gibt `true` zurück, falls vorhanden.
    pub fn remove_item(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|&item| item != id);
        self.items.len() < before
    }

    /// Gewöhnlicher Stoß (≤ 2 Segmente) statt Weichen-Kandidat?
    pub fn is_simple(&self) -> bool {
        self.items.len() <= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_floored_position() {
        let conn = Connection::new(7, Vec2::new(12.7, -3.2));
        assert_eq!(conn.key, (12, -4));
        assert_eq!(conn.items, vec![7]);
    }

    #[test]
    fn add_item_keeps_items_sorted_and_unique() {
        let mut conn = Connection::new(9, Vec2::ZERO);
        conn.add_item(3);
        conn.add_item(9);
        conn.add_item(3);
        conn.add_item(12);
        assert_eq!(conn.items, vec![3, 9, 12]);
    }

    #[test]
    fn simple_connection_threshold() {
        let mut conn = Connection::new(1, Vec2::ZERO);
        assert!(conn.is_simple());
        conn.add_item(2);
        assert!(conn.is_simple());
        conn.add_item(3);
        assert!(!conn.is_simple());
    }

    #[test]
    fn remove_item_reports_presence() {
        let mut conn = Connection::new(1, Vec2::ZERO);
        conn.add_item(2);
        assert!(conn.remove_item(1));
        assert!(!conn.remove_item(1));
        assert_eq!(conn.items, vec![2]);
    }
}
