//! Theme and styling for the UI

use egui::{Color32, Rounding, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Success color
    pub success: Color32,
    /// Warning color
    pub warning: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Recording indicator color
    pub recording: Color32,

    /// Chat bubble fills
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    pub system_bubble: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    pub spacing: f32,
    pub spacing_lg: f32,
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(99, 102, 241),   // Indigo
            success: Color32::from_rgb(34, 197, 94),    // Green
            warning: Color32::from_rgb(234, 179, 8),    // Yellow
            error: Color32::from_rgb(239, 68, 68),      // Red

            bg_primary: Color32::from_rgb(17, 24, 39),
            bg_secondary: Color32::from_rgb(31, 41, 55),
            bg_tertiary: Color32::from_rgb(55, 65, 81),

            text_primary: Color32::from_rgb(249, 250, 251),
            text_secondary: Color32::from_rgb(209, 213, 219),
            text_muted: Color32::from_rgb(156, 163, 175),

            recording: Color32::from_rgb(239, 68, 68),

            user_bubble: Color32::from_rgb(55, 48, 163),
            assistant_bubble: Color32::from_rgb(55, 65, 81),
            system_bubble: Color32::from_rgb(69, 26, 3),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply the theme to the egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_primary;
        visuals.extreme_bg_color = self.bg_tertiary;
        visuals.widgets.noninteractive.rounding = self.card_rounding;
        visuals.widgets.inactive.rounding = self.button_rounding;
        visuals.widgets.hovered.rounding = self.button_rounding;
        visuals.widgets.active.rounding = self.button_rounding;
        ctx.set_visuals(visuals);
    }
}
