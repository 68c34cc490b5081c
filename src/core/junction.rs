//! Abgeleitete Topologie: Joins (Stoßstellen) und Weichen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rail_map::RailMap;
use super::track::TrackPrimitive;

/// Zwei Segmente, die an einem Verbindungspunkt als durchgehend gelten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    /// Kleinere Segment-ID.
    pub a: u64,
    /// Größere Segment-ID.
    pub b: u64,
}

impl Join {
    /// Erstellt einen Join mit aufsteigend sortierten IDs.
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
        }
    }

    /// Gibt `true` zurück, wenn die ID zu diesem Join gehört.
    pub fn contains(&self, id: u64) -> bool {
        self.a == id || self.b == id
    }
}

/// Aktiver Fahrweg durch eine Weiche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwitchRoute {
    /// Gerader Strang.
    #[default]
    Through,
    /// Abzweigender Strang.
    Branch,
}

/// Weiche aus vier Segmenten an zwei Verbindungspunkten.
///
/// Beide Schenkelpaare teilen sich je einen Verbindungspunkt; das
/// geradere Paar ist der durchgehende Strang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    /// Durchgehender Strang (IDs aufsteigend).
    pub through: (u64, u64),
    /// Abzweigender Strang (IDs aufsteigend).
    pub branch: (u64, u64),
    /// Aktuell gestellter Fahrweg.
    pub active: SwitchRoute,
}

impl Switch {
    /// Alle vier Schenkel-IDs.
    pub fn legs(&self) -> [u64; 4] {
        [self.through.0, self.through.1, self.branch.0, self.branch.1]
    }

    /// Gibt `true` zurück, wenn die ID zu einem Schenkel gehört.
    pub fn contains(&self, id: u64) -> bool {
        self.legs().contains(&id)
    }
}

/// Leitet einen Join aus der aktuellen Selektion ab.
///
/// Erfordert genau zwei selektierte Segmente, deren IDs gemeinsam an
/// einem Verbindungspunkt anliegen. Bei Erfolg wird der Join
/// aufgezeichnet und die Selektion geleert; sonst passiert nichts.
pub fn create_join_from_selection(map: &mut RailMap) -> Option<Join> {
    let selected = map.selected_ids();
    if selected.len() != 2 {
        log::debug!(
            "Join verworfen: {} Segmente selektiert statt 2",
            selected.len()
        );
        return None;
    }

    let (a, b) = (selected[0], selected[1]);
    let shared = map
        .connections_iter()
        .any(|conn| conn.items.contains(&a) && conn.items.contains(&b));
    if !shared {
        log::debug!("Join verworfen: {a} und {b} teilen keinen Verbindungspunkt");
        return None;
    }

    let join = Join::new(a, b);
    map.joins.push(join);
    map.deselect_all();
    log::debug!("Join {}–{} aufgezeichnet", join.a, join.b);
    Some(join)
}

/// Erster Join, an dem die Segment-ID beteiligt ist.
pub fn find_join_by_id(map: &RailMap, id: u64) -> Option<&Join> {
    map.joins.iter().find(|join| join.contains(id))
}

/// Leitet eine Weiche aus der aktuellen Selektion ab.
///
/// Erfordert genau vier selektierte Segmente, die von genau zwei
/// Verbindungspunkten in zwei disjunkte Paare zerlegt werden. Das Paar,
/// dessen ferne Sehnen-Endpunkte am gemeinsamen Punkt den gestreckteren
/// Winkel aufspannen, wird der durchgehende Strang. Bei Erfolg wird die
/// Weiche mit aktivem geraden Strang aufgezeichnet und die Selektion
/// geleert.
pub fn create_switch_from_selection(map: &mut RailMap) -> Option<Switch> {
    let selected = map.selected_ids();
    if selected.len() != 4 {
        log::debug!(
            "Weiche verworfen: {} Segmente selektiert statt 4",
            selected.len()
        );
        return None;
    }

    // Verbindungspunkte mit mindestens zwei anliegenden selektierten Segmenten
    let mut shared: Vec<(Vec2, Vec<u64>)> = Vec::new();
    for conn in map.connections_iter() {
        let legs: Vec<u64> = selected
            .iter()
            .copied()
            .filter(|id| conn.items.contains(id))
            .collect();
        if legs.len() >= 2 {
            shared.push((conn.position, legs));
        }
    }

    if shared.len() != 2 {
        log::debug!(
            "Weiche verworfen: {} geteilte Verbindungspunkte statt 2",
            shared.len()
        );
        return None;
    }
    let (pos_a, legs_a) = &shared[0];
    let (pos_b, legs_b) = &shared[1];
    if legs_a.len() != 2 || legs_b.len() != 2 || legs_a.iter().any(|id| legs_b.contains(id)) {
        log::debug!("Weiche verworfen: Schenkelpaare nicht disjunkt");
        return None;
    }

    let spread_a = pair_spread(map, *pos_a, legs_a[0], legs_a[1])?;
    let spread_b = pair_spread(map, *pos_b, legs_b[0], legs_b[1])?;

    let pair = |legs: &[u64]| (legs[0].min(legs[1]), legs[0].max(legs[1]));
    let (through, branch) = if spread_a >= spread_b {
        (pair(legs_a), pair(legs_b))
    } else {
        (pair(legs_b), pair(legs_a))
    };

    let switch = Switch {
        through,
        branch,
        active: SwitchRoute::Through,
    };
    map.switches.push(switch);
    map.deselect_all();
    log::debug!(
        "Weiche aufgezeichnet: gerade {:?}, abzweigend {:?}",
        switch.through,
        switch.branch
    );
    Some(switch)
}

/// Erste Weiche, an deren Schenkeln die Segment-ID beteiligt ist.
pub fn find_switch_by_id(map: &RailMap, id: u64) -> Option<&Switch> {
    map.switches.iter().find(|switch| switch.contains(id))
}

/// Stellt den aktiven Fahrweg der Weiche mit dem gegebenen Index.
pub fn set_switch_route(map: &mut RailMap, index: usize, route: SwitchRoute) -> bool {
    if let Some(switch) = map.switches.get_mut(index) {
        switch.active = route;
        true
    } else {
        false
    }
}

/// Winkel zwischen den vom Verbindungspunkt wegführenden Sehnen beider
/// Segmente, in [0, π]; π bedeutet exakt gestreckt.
fn pair_spread(map: &RailMap, at: Vec2, a: u64, b: u64) -> Option<f32> {
    let da = far_endpoint(map.get(a)?, at) - at;
    let db = far_endpoint(map.get(b)?, at) - at;
    Some(da.perp_dot(db).atan2(da.dot(db)).abs())
}

/// Der vom Bezugspunkt weiter entfernte Sehnen-Endpunkt des Segments.
fn far_endpoint(track: &TrackPrimitive, from: Vec2) -> Vec2 {
    let (s, e) = track.endpoints();
    if s.distance_squared(from) >= e.distance_squared(from) {
        s
    } else {
        e
    }
}
