//! Hex-Raster: Zellen mit Ecken-Cache und Welt→Zelle-Konvertierung.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kantenlänge eines Hexfelds in Welt-Einheiten.
///
/// Bei s = 7 entspricht die halbe Dreiecksseite (√3·s/2) exakt dem festen
/// Radius der kurzen Bögen (3.5·√3), siehe `core::geometry`.
pub const HEX_SIZE: f32 = 7.0;

/// Spaltenanzahl des rechteckigen Rasters.
pub const GRID_COLS: i32 = 40;

/// Zeilenanzahl des rechteckigen Rasters.
pub const GRID_ROWS: i32 = 30;

/// Axiale Zellkoordinaten (q, r) im rechteckigen Hex-Raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    /// Erstellt eine Zellkoordinate.
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

/// Eine Rasterzelle mit vorgerechnetem Mittelpunkt und den 6 Eckpunkten.
///
/// Spitze-oben-Orientierung, Y-Achse nach unten (Screen-Konvention):
/// Ecke k liegt bei Winkel −90° + k·60°, Ecke 0 ist also die obere Spitze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexCell {
    /// Zellkoordinate im Raster.
    pub coord: HexCoord,
    /// Mittelpunkt in Welt-Koordinaten.
    pub center: Vec2,
    corners: [Vec2; 6],
}

impl HexCell {
    fn new(coord: HexCoord) -> Self {
        let center = Vec2::new(
            HEX_SIZE * 3f32.sqrt() * (coord.q as f32 + coord.r as f32 / 2.0),
            HEX_SIZE * 1.5 * coord.r as f32,
        );

        let mut corners = [Vec2::ZERO; 6];
        for (k, corner) in corners.iter_mut().enumerate() {
            let angle = -std::f32::consts::FRAC_PI_2 + k as f32 * std::f32::consts::FRAC_PI_3;
            *corner = center + HEX_SIZE * Vec2::new(angle.cos(), angle.sin());
        }

        Self {
            coord,
            center,
            corners,
        }
    }

    /// Alle 6 Eckpunkte in Welt-Koordinaten.
    pub fn corners(&self) -> &[Vec2; 6] {
        &self.corners
    }

    /// Die drei Dreiecksecken (jede zweite Hex-Ecke): 0 = rechts, 1 = links, 2 = oben.
    ///
    /// Auf diesen Punkten arbeiten die Geometrie-Generatoren.
    pub fn triangle(&self) -> [Vec2; 3] {
        [self.corners[2], self.corners[4], self.corners[0]]
    }
}

/// Das rechteckige Hex-Raster mit Ecken-Cache pro Zelle.
#[derive(Debug, Clone)]
pub struct HexGrid {
    cells: HashMap<HexCoord, HexCell>,
}

impl HexGrid {
    /// Baut das W×H-Raster und berechnet alle Eckpunkte vor.
    ///
    /// Muss vor allen Geometrie- und Abfrage-Operationen einmal erfolgen.
    pub fn new() -> Self {
        let mut cells = HashMap::with_capacity((GRID_COLS * GRID_ROWS) as usize);
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                // Rechteckiger Ausschnitt der axialen Ebene: q pro Zeile versetzt
                let coord = HexCoord::new(col - row.div_euclid(2), row);
                cells.insert(coord, HexCell::new(coord));
            }
        }
        Self { cells }
    }

    /// Zelle zu einer Koordinate, falls im Raster.
    pub fn cell(&self, coord: HexCoord) -> Option<&HexCell> {
        self.cells.get(&coord)
    }

    /// Anzahl der Zellen.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Gibt `true` zurück, wenn das Raster leer ist.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Zelle, in deren Fläche der Weltpunkt liegt, oder `None` außerhalb des Rasters.
    pub fn point_to_hex(&self, world: Vec2) -> Option<&HexCell> {
        let q = (3f32.sqrt() / 3.0 * world.x - world.y / 3.0) / HEX_SIZE;
        let r = (2.0 / 3.0 * world.y) / HEX_SIZE;
        self.cells.get(&axial_round(q, r))
    }

    /// Iterator über alle Zellen (unbestimmte Reihenfolge).
    pub fn cells_iter(&self) -> impl Iterator<Item = &HexCell> {
        self.cells.values()
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Rundet fraktionale Axialkoordinaten auf die nächste Zelle (Cube-Rounding).
fn axial_round(q: f32, r: f32) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_has_full_lattice() {
        let grid = HexGrid::new();
        assert_eq!(grid.len(), (GRID_COLS * GRID_ROWS) as usize);
        assert_eq!(grid.cells_iter().count(), grid.len());
        assert!(!grid.is_empty());
        assert!(grid.cell(HexCoord::new(0, 0)).is_some());
    }

    #[test]
    fn point_at_cell_center_resolves_to_cell() {
        let grid = HexGrid::new();
        for coord in [HexCoord::new(0, 0), HexCoord::new(3, 2), HexCoord::new(5, 7)] {
            let cell = grid.cell(coord).expect("Zelle erwartet");
            let hit = grid.point_to_hex(cell.center).expect("Treffer erwartet");
            assert_eq!(hit.coord, coord);
        }
    }

    #[test]
    fn point_outside_lattice_returns_none() {
        let grid = HexGrid::new();
        assert!(grid.point_to_hex(Vec2::new(-500.0, -500.0)).is_none());
        assert!(grid.point_to_hex(Vec2::new(1e6, 1e6)).is_none());
    }

    #[test]
    fn triangle_side_matches_alternate_corner_distance() {
        let grid = HexGrid::new();
        let cell = grid.cell(HexCoord::new(0, 0)).unwrap();
        let tri = cell.triangle();
        // Abstand übernächster Ecken = √3 · Kantenlänge
        assert_relative_eq!(
            tri[0].distance(tri[1]),
            3f32.sqrt() * HEX_SIZE,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            tri[1].distance(tri[2]),
            3f32.sqrt() * HEX_SIZE,
            epsilon = 1e-4
        );
    }

    #[test]
    fn triangle_orientation_right_left_top() {
        let grid = HexGrid::new();
        let cell = grid.cell(HexCoord::new(2, 2)).unwrap();
        let [right, left, top] = cell.triangle();
        assert!(right.x > cell.center.x);
        assert!(left.x < cell.center.x);
        // Y-Achse zeigt nach unten: "oben" ist kleineres y
        assert!(top.y < cell.center.y);
        assert_relative_eq!(top.x, cell.center.x, epsilon = 1e-4);
    }

    #[test]
    fn corner_cache_is_deterministic() {
        let a = HexGrid::new();
        let b = HexGrid::new();
        let ca = a.cell(HexCoord::new(4, 1)).unwrap();
        let cb = b.cell(HexCoord::new(4, 1)).unwrap();
        assert_eq!(ca.corners(), cb.corners());
    }
}
