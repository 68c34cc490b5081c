//! Geometrie-Generatoren: Hex-Zelle + Orientierungsindex → Gleis-Primitiv.
//!
//! Reine Funktionen ohne Zustand; gleiche Eingaben liefern bitidentische
//! Ausgaben. Die Generatoren arbeiten auf den drei Dreiecksecken der Zelle
//! (`HexCell::triangle`).

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hex::{HexCell, HEX_SIZE};
use super::track::{TrackKind, TrackPrimitive};

/// Stil-Basis gerader Segmente (auch für verlängerte Linien).
pub const STYLE_LINE: u32 = 0x10;
/// Stil-Basis langer Bögen.
pub const STYLE_LONG_ARC: u32 = 0x20;
/// Stil-Basis kurzer Bögen (Variante A).
pub const STYLE_SHORT_ARC: u32 = 0x30;
/// Stil-Basis kurzer Bögen (Variante B, außen liegend).
pub const STYLE_SHORT_ARC2: u32 = 0x40;

/// Eckenpaare (Dreiecksindizes) gerader Segmente, indexiert mit `index % 3`.
const LINE_CORNER_PAIRS: [[usize; 2]; 3] = [[1, 0], [2, 0], [2, 1]];

/// Basis-Ecke pro Orientierung für innen liegende Bögen.
const ARC_CORNER_INNER: [usize; 6] = [1, 0, 2, 1, 0, 2];

/// Basis-Ecke pro Orientierung für außen liegende Bögen.
const ARC_CORNER_OUTER: [usize; 6] = [2, 2, 0, 0, 1, 1];

const SQRT_3: f32 = 1.732_050_8;

/// Radius der kurzen Bögen: halbe Dreiecksseite bei Kantenlänge 7.
const SHORT_ARC_RADIUS: f32 = 3.5 * SQRT_3;

/// Halber Öffnungswinkel der kurzen Bögen (Radiant).
const SHORT_ARC_ANGLE: f32 = 0.380_251_2;

/// Gerades Segment zwischen zwei Dreiecksecken.
pub fn line(cell: &HexCell, index: u32) -> TrackPrimitive {
    let tri = cell.triangle();
    let [a, b] = LINE_CORNER_PAIRS[(index % 3) as usize];
    TrackPrimitive::new(
        TrackKind::Line {
            start: tri[a],
            end: tri[b],
        },
        STYLE_LINE + index,
    )
}

/// Gerades Segment, dessen Ende 10-fach über das Eckenpaar hinaus
/// extrapoliert ist: Näherung einer unbegrenzten Linie für Anzeige
/// und Snapping.
pub fn infini_line(cell: &HexCell, index: u32) -> TrackPrimitive {
    let tri = cell.triangle();
    let [a, b] = LINE_CORNER_PAIRS[(index % 3) as usize];
    TrackPrimitive::new(
        TrackKind::Line {
            start: tri[a],
            end: tri[b] + 10.0 * (tri[b] - tri[a]),
        },
        STYLE_LINE + index,
    )
}

/// Langer Bogen (Radius 6 Kantenlängen, 60° Öffnung).
pub fn long_arc(cell: &HexCell, index: u32) -> TrackPrimitive {
    arc(cell, index, 6.0 * HEX_SIZE, FRAC_PI_3, STYLE_LONG_ARC, true)
}

/// Kurzer Bogen, Variante A (innen liegend).
pub fn short_arc(cell: &HexCell, index: u32) -> TrackPrimitive {
    arc(
        cell,
        index,
        SHORT_ARC_RADIUS,
        SHORT_ARC_ANGLE,
        STYLE_SHORT_ARC,
        true,
    )
}

/// Kurzer Bogen, Variante B (außen liegend).
pub fn short_arc2(cell: &HexCell, index: u32) -> TrackPrimitive {
    arc(
        cell,
        index,
        SHORT_ARC_RADIUS,
        SHORT_ARC_ANGLE,
        STYLE_SHORT_ARC2,
        false,
    )
}

/// Gemeinsame Bogen-Routine aller Bogenfamilien.
///
/// Pro Orientierung wird eine Basis-Ecke und ein Drittel-Drehwinkel
/// {0, 0, 120°, 120°, 240°, 240°} gewählt; gerade Indizes enden an der
/// Basis-Ecke, ungerade beginnen dort. a1 wird nach [0, 2π) normalisiert,
/// a2 = a1 + Öffnungswinkel.
fn arc(
    cell: &HexCell,
    index: u32,
    radius: f32,
    half_angle: f32,
    style_base: u32,
    inner: bool,
) -> TrackPrimitive {
    let idx = (index % 6) as usize;
    let tri = cell.triangle();
    let corner = if inner {
        tri[ARC_CORNER_INNER[idx]]
    } else {
        tri[ARC_CORNER_OUTER[idx]]
    };

    let sign = if inner { 1.0 } else { -1.0 };
    let rot = sign * (idx / 2) as f32 * (TAU / 3.0);

    let center = corner + sign * radius * Vec2::new(rot.sin(), -rot.cos());
    let base_angle = sign * FRAC_PI_2 + rot;

    let raw_a1 = if idx % 2 == 0 {
        base_angle - half_angle
    } else {
        base_angle
    };
    let a1 = raw_a1.rem_euclid(TAU);
    let a2 = a1 + half_angle;

    TrackPrimitive::new(
        TrackKind::Arc {
            center,
            radius,
            a1,
            a2,
        },
        style_base + index,
    )
}

/// Werkzeugfamilien des Editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackTool {
    /// Gerades Segment (3 ungerichtete Orientierungen).
    Line,
    /// Verlängertes gerades Segment.
    InfiniLine,
    /// Langer Bogen.
    LongArc,
    /// Kurzer Bogen, Variante A.
    ShortArc,
    /// Kurzer Bogen, Variante B.
    ShortArc2,
}

impl TrackTool {
    /// Baut das Kandidaten-Primitiv für Zelle und Orientierungsindex.
    pub fn build(self, cell: &HexCell, index: u32) -> TrackPrimitive {
        match self {
            TrackTool::Line => line(cell, index),
            TrackTool::InfiniLine => infini_line(cell, index),
            TrackTool::LongArc => long_arc(cell, index),
            TrackTool::ShortArc => short_arc(cell, index),
            TrackTool::ShortArc2 => short_arc2(cell, index),
        }
    }
}
