//! Affine Screen↔Welt-Transformation über Pan und Zoom.

use glam::Vec2;

/// Sichttransformation des Editors: screen = world·zoom + pan.
///
/// `zoom > 0` ist Vertrag des aufrufenden View-Layers und wird hier nicht
/// validiert; `screen_to_world` mit zoom = 0 dividiert durch null.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Verschiebung in Screen-Pixeln.
    pub pan: Vec2,
    /// Zoom-Faktor (1.0 = normal).
    pub zoom: f32,
}

impl Viewport {
    /// Minimaler Zoom-Faktor für `zoom_by`.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor für `zoom_by`.
    pub const ZOOM_MAX: f32 = 100.0;

    /// Erstellt eine Sicht ohne Verschiebung bei Zoom 1.0.
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Verschiebt die Sicht (Pan).
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Ändert den Zoom-Faktor, begrenzt auf [ZOOM_MIN, ZOOM_MAX].
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Konvertiert Welt- zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.pan
    }

    /// Konvertiert Screen- zu Welt-Koordinaten.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
