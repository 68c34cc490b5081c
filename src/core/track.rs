//! Gleis-Primitive: Linien- und Bogensegmente mit Editor-Metadaten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hex::HexCoord;

/// Geometrie eines Gleissegments als explizite Variante.
///
/// Bögen sind normalisiert: `radius ≥ 0`, `a1 ∈ [0, 2π)`, `a2 ≥ a1`; der
/// gezeichnete Bogen ist der Sweep von a1 nach a2 in positiver Winkelrichtung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Gerades Segment von `start` nach `end`.
    Line { start: Vec2, end: Vec2 },
    /// Kreisbogen um `center`.
    Arc {
        center: Vec2,
        radius: f32,
        a1: f32,
        a2: f32,
    },
}

/// Vom `RailMap` beim Commit vergebene Metadaten.
///
/// Gehören exklusiv dem Store; `selected` und `block` werden nur über
/// dessen Operationen mutiert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackMeta {
    /// Eindeutige, über die Prozesslebenszeit monoton steigende ID.
    pub id: u64,
    /// Block-ID für Gruppierung (initial eigener Block pro Segment).
    pub block: u64,
    /// Zelle, in der das Segment erzeugt wurde.
    pub cell: HexCoord,
    /// Selektions-Flag.
    pub selected: bool,
}

/// Ein Gleissegment.
///
/// Ohne `meta` wurde das Segment noch nie committet; alle Abfragen des
/// Stores arbeiten ausschließlich auf committeten Segmenten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPrimitive {
    /// Geometrie-Variante.
    pub kind: TrackKind,
    /// Stil-Tag (Werkzeugfamilie + Orientierungsindex), rein visuell.
    pub style: u32,
    /// Commit-Metadaten, `None` vor dem Einfügen in den Store.
    pub meta: Option<TrackMeta>,
}

impl TrackPrimitive {
    /// Erstellt ein noch nicht committetes Segment.
    pub fn new(kind: TrackKind, style: u32) -> Self {
        Self {
            kind,
            style,
            meta: None,
        }
    }

    /// Beide Endpunkte; für Bögen die Sehnen-Endpunkte bei a1/a2.
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        match self.kind {
            TrackKind::Line { start, end } => (start, end),
            TrackKind::Arc {
                center,
                radius,
                a1,
                a2,
            } => (
                center + radius * Vec2::new(a1.cos(), a1.sin()),
                center + radius * Vec2::new(a2.cos(), a2.sin()),
            ),
        }
    }

    /// ID des committeten Segments.
    pub fn id(&self) -> Option<u64> {
        self.meta.map(|m| m.id)
    }

    /// Block-ID des committeten Segments.
    pub fn block(&self) -> Option<u64> {
        self.meta.map(|m| m.block)
    }

    /// Gibt `true` zurück, wenn das Segment committet und selektiert ist.
    pub fn is_selected(&self) -> bool {
        self.meta.is_some_and(|m| m.selected)
    }
}
