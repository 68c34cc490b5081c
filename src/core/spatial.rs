//! Punkt- und Rechteck-Trefferprüfung gegen Gleis-Primitive.

use std::f32::consts::TAU;

use glam::Vec2;

use super::track::{TrackKind, TrackPrimitive};

/// Trefferschwelle für Punktabfragen (Welt-Einheiten).
pub const HIT_THRESHOLD: f32 = 10.0;

/// Achsen-aligniertes Min/Max-Rechteck aus zwei Eckpunkten.
pub fn rect_min_max(a: Vec2, b: Vec2) -> (Vec2, Vec2) {
    (
        Vec2::new(a.x.min(b.x), a.y.min(b.y)),
        Vec2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Punkt strikt im Inneren des Rechtecks (Rand zählt nicht).
pub fn point_strictly_inside(p: Vec2, min: Vec2, max: Vec2) -> bool {
    min.x < p.x && p.x < max.x && min.y < p.y && p.y < max.y
}

/// Trefferprüfung gegen ein gerades Segment.
///
/// Historisches Editor-Verhalten: Punkt und Endpunkt werden relativ zum
/// Segmentstart nur mit cos(Segmentwinkel) skaliert statt echt rotiert
/// (Sinus-Term fehlt). Das ist der etablierte Vertrag und wird
/// unverändert beibehalten.
pub fn hit_line(start: Vec2, end: Vec2, p: Vec2) -> bool {
    let delta = end - start;
    let cos_angle = delta.y.atan2(delta.x).cos();
    let rp = (p - start) * cos_angle;
    let re = delta * cos_angle;
    0.0 <= rp.x && rp.x <= re.x && 0.0 <= rp.y && rp.y <= re.y + HIT_THRESHOLD * 0.5
}

/// Trefferprüfung gegen einen Bogen.
///
/// Treffer, wenn der Winkel vom Zentrum zum Punkt strikt zwischen a1 und
/// a2 liegt und der radiale Abstand weniger als `HIT_THRESHOLD` vom
/// Radius abweicht. a2 darf 2π überschreiten (normalisierter Sweep).
pub fn hit_arc(center: Vec2, radius: f32, a1: f32, a2: f32, p: Vec2) -> bool {
    let delta = p - center;
    let angle = delta.y.atan2(delta.x).rem_euclid(TAU);
    let in_sweep = (a1 < angle && angle < a2) || (a1 < angle + TAU && angle + TAU < a2);
    in_sweep && (delta.length() - radius).abs() < HIT_THRESHOLD
}

/// Trefferprüfung gegen ein Segment beliebiger Variante.
pub fn hit_primitive(track: &TrackPrimitive, p: Vec2) -> bool {
    match track.kind {
        TrackKind::Line { start, end } => hit_line(start, end, p),
        TrackKind::Arc {
            center,
            radius,
            a1,
            a2,
        } => hit_arc(center, radius, a1, a2, p),
    }
}
