//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Map Surface Colors
// ============================================================================

/// Background color of the map plane (pale paper tone)
pub const MAP_BACKGROUND: Color = Color::srgb(0.93, 0.93, 0.89);

/// Semi-transparent grey graticule lines
pub const GRATICULE_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.25);

/// Slightly stronger lines on whole-minute graticule marks
pub const GRATICULE_MAJOR_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.45);

// ============================================================================
// Sign Glyph Colors
// ============================================================================

/// Yellow fill of the priority-road diamond
pub const SIGN_PRIORITY_FILL: Color = Color::srgb(1.0, 0.8, 0.0);

/// White border around the priority diamond
pub const SIGN_PRIORITY_BORDER: Color = Color::srgb(1.0, 1.0, 1.0);

/// Red fill of the stop octagon
pub const SIGN_STOP_FILL: Color = Color::srgb(0.8, 0.05, 0.1);

/// Red ring of the 30 km/h zone entry sign
pub const SIGN_ZONE_RING: Color = Color::srgb(0.8, 0.05, 0.1);

/// White face shared by the zone entry and zone end signs
pub const SIGN_ZONE_FACE: Color = Color::srgb(0.97, 0.97, 0.97);

/// Grey ring and strike bar of the zone end sign
pub const SIGN_ZONE_END: Color = Color::srgb(0.35, 0.35, 0.35);

/// Fallback glyph for unrecognized sign kinds
pub const SIGN_UNKNOWN: Color = Color::srgb(0.55, 0.55, 0.55);

/// Faint halo drawn under a hovered sign
pub const SIGN_HOVER_HALO: Color = Color::srgba(0.2, 0.6, 1.0, 0.35);

// ============================================================================
// Route Path Colors
// ============================================================================

/// Committed route polyline stroke (map-blue)
pub const PATH_STROKE: Color = Color::srgb(0.2, 0.53, 1.0);

/// In-progress draft polyline, drawn at half opacity
pub const PATH_DRAFT: Color = Color::srgba(0.2, 0.53, 1.0, 0.5);

/// Vertex handles shown while a path is being edited
pub const PATH_VERTEX: Color = Color::srgb(1.0, 1.0, 1.0);

/// Hovered vertex handle highlight
pub const PATH_VERTEX_HOVER: Color = Color::srgb(0.2, 0.6, 1.0);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background (tool settings bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// White for selected button borders
    pub const SELECTED_BORDER: egui::Color32 = egui::Color32::WHITE;

    /// Dark grey for unselected button borders
    pub const UNSELECTED_BORDER: egui::Color32 = egui::Color32::DARK_GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Amber banner shown while the annotation is locked after a save
    pub const LOCKED_BANNER: egui::Color32 = egui::Color32::from_rgb(230, 170, 60);

    /// Red face of the hover-revealed delete badges
    pub const DELETE_BADGE: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);

    /// White cross glyph on the delete badges
    pub const DELETE_BADGE_CROSS: egui::Color32 = egui::Color32::WHITE;

    /// Green confirmation text after a successful save
    pub const SAVED_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        255,
    )
}

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}
