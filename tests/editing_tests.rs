//! Integrationstests für den Editier-Kern:
//! - Raster → Werkzeug → Store → Verbindungsgraph
//! - Selektion, Blöcke, Löschen
//! - Join-/Weichen-Ableitung aus der Selektion

use glam::Vec2;
use hexrail_engine::{
    create_join_from_selection, find_join_by_id, HexCoord, HexGrid, RailMap, TrackTool,
    MIN_DISTANCE,
};

/// Baut ein Raster plus leeren Gleisplan.
fn grid_and_map() -> (HexGrid, RailMap) {
    (HexGrid::new(), RailMap::new())
}

// ─── Platzieren über die Eingabe-Grenze ──────────────────────────────────────

#[test]
fn test_platzieren_ueber_pixel_aufloesung() {
    let (grid, mut map) = grid_and_map();

    // Eingabe-Schicht: Weltpunkt → Zelle → Werkzeug → Commit
    let cell = *grid
        .point_to_hex(grid.cell(HexCoord::new(3, 2)).unwrap().center)
        .expect("Zelle erwartet");
    let candidate = TrackTool::Line.build(&cell, 0);
    assert!(candidate.meta.is_none(), "Kandidat ist noch nicht committet");

    let id = map.add(&cell, candidate).expect("Commit erwartet");
    let track = map.get(id).expect("Segment auffindbar");
    assert_eq!(track.meta.unwrap().cell, cell.coord);
}

#[test]
fn test_alle_werkzeugfamilien_committen() {
    let (grid, mut map) = grid_and_map();

    // Zellen weit auseinander, damit keine Endpunkte zusammenfallen
    let placements = [
        (TrackTool::Line, HexCoord::new(0, 0), 0),
        (TrackTool::InfiniLine, HexCoord::new(10, 0), 1),
        (TrackTool::LongArc, HexCoord::new(0, 10), 2),
        (TrackTool::ShortArc, HexCoord::new(10, 10), 3),
        (TrackTool::ShortArc2, HexCoord::new(20, 20), 4),
    ];

    for (tool, coord, index) in placements {
        let cell = *grid.cell(coord).unwrap();
        let id = map.add(&cell, tool.build(&cell, index)).unwrap();
        assert!(map.get(id).is_some());
    }

    assert_eq!(map.len(), 5);
    // Jedes Segment hat zwei Endpunkte mit je genau einer Verbindung
    for track in map.iter() {
        let (s, e) = track.endpoints();
        assert!(map.find_connection(s).is_some());
        assert!(map.find_connection(e).is_some());
    }
}

// ─── Verbindungsgraph ────────────────────────────────────────────────────────

#[test]
fn test_geteilte_ecke_aggregiert_verbindung() {
    let (grid, mut map) = grid_and_map();

    // Zwei Linien derselben Zelle teilen die rechte Dreiecksecke
    let cell = *grid.cell(HexCoord::new(5, 5)).unwrap();
    let a = map.add(&cell, TrackTool::Line.build(&cell, 0)).unwrap();
    let b = map.add(&cell, TrackTool::Line.build(&cell, 1)).unwrap();

    let shared = map
        .connections_iter()
        .find(|c| c.items.len() == 2)
        .expect("geteilte Verbindung erwartet");
    assert_eq!(shared.items, vec![a, b]);
    assert!(shared.is_simple());

    // Nächster-Punkt-Abfrage findet denselben Verbindungspunkt
    let near = map
        .nearest_connection(shared.position + Vec2::splat(MIN_DISTANCE / 2.0))
        .expect("Treffer erwartet");
    assert_eq!(near.key, shared.key);
}

// ─── Selektion und Blöcke ────────────────────────────────────────────────────

#[test]
fn test_rechteck_selektion_und_gruppierung() {
    let (grid, mut map) = grid_and_map();
    let cell = *grid.cell(HexCoord::new(8, 8)).unwrap();

    let ids = map
        .add_all(
            &cell,
            vec![
                TrackTool::Line.build(&cell, 0),
                TrackTool::Line.build(&cell, 1),
                TrackTool::Line.build(&cell, 2),
            ],
        )
        .unwrap();

    // Rechteck großzügig um die ganze Zelle: alle drei Segmente
    let hits = map.find_by_rect(cell.center - Vec2::splat(20.0), cell.center + Vec2::splat(20.0));
    assert_eq!(hits.len(), 3);

    map.select(&hits);
    map.group();
    map.deselect_all();

    // Gruppenselektion über ein einzelnes Segment zieht den ganzen Block
    map.select_group(&[ids[0]]);
    assert_eq!(map.selected_ids(), ids);
}

#[test]
fn test_loeschen_entfernt_nur_selektierte() {
    let (grid, mut map) = grid_and_map();
    let c1 = *grid.cell(HexCoord::new(0, 0)).unwrap();
    let c2 = *grid.cell(HexCoord::new(12, 12)).unwrap();

    let keep = map.add(&c1, TrackTool::Line.build(&c1, 0)).unwrap();
    let doomed = map.add(&c2, TrackTool::Line.build(&c2, 0)).unwrap();

    map.select(&[doomed]);
    assert_eq!(map.delete_selected(), 1);

    assert!(map.get(keep).is_some());
    assert!(map.get(doomed).is_none());
    assert_eq!(map.iter().count(), 1);
}

// ─── Join-Ableitung ──────────────────────────────────────────────────────────

#[test]
fn test_join_aus_zellnachbarn() {
    let (grid, mut map) = grid_and_map();
    let cell = *grid.cell(HexCoord::new(4, 4)).unwrap();

    // line(0) und line(1) teilen die rechte Ecke
    let a = map.add(&cell, TrackTool::Line.build(&cell, 0)).unwrap();
    let b = map.add(&cell, TrackTool::Line.build(&cell, 1)).unwrap();

    map.select(&[a, b]);
    let join = create_join_from_selection(&mut map).expect("Join erwartet");
    assert_eq!((join.a, join.b), (a.min(b), a.max(b)));
    assert!(map.selected_ids().is_empty());
    assert!(find_join_by_id(&map, a).is_some());
    assert!(find_join_by_id(&map, 999).is_none());
}
