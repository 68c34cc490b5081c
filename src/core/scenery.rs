//! Dekorationsobjekte (Gebäude, Szenerie) auf Rasterzellen.

use serde::{Deserialize, Serialize};

use super::hex::HexCoord;

/// Ein auf einer Zelle platziertes Dekorationsobjekt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    /// Eindeutige ID (eigener Zähler, unabhängig von Segment-IDs).
    pub id: u64,
    /// Zelle, auf der das Objekt steht.
    pub cell: HexCoord,
    /// Objektart (Atlas-Index des Renderers, rein visuell).
    pub kind: u32,
    /// Anzeigename.
    pub name: String,
}

impl Decoration {
    /// Erstellt ein Dekorationsobjekt.
    pub fn new(id: u64, cell: HexCoord, kind: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            cell,
            kind,
            name: name.into(),
        }
    }
}
