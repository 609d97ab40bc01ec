use eframe::egui::{self, Color32};

use crate::controller::events::StatusSeverity;

// Canvas
pub const CANVAS_BG: Color32 = Color32::from_rgb(13, 13, 13);
pub const RING: Color32 = Color32::from_rgb(0, 100, 30);
pub const TICK_MAJOR: Color32 = Color32::from_rgb(0, 220, 70);
pub const TICK_MINOR: Color32 = Color32::from_rgb(0, 80, 30);
pub const ZERO_MARK: Color32 = Color32::from_rgb(255, 50, 100);
pub const ZERO_FLASH: Color32 = Color32::from_rgb(255, 255, 100);
pub const LABEL: Color32 = Color32::from_rgb(0, 200, 70);
pub const POINTER: Color32 = Color32::from_rgb(0, 255, 100);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 200, 50);

// Controls
pub const TRACK: Color32 = Color32::from_rgb(30, 50, 30);
pub const TRACK_FILL: Color32 = Color32::from_rgb(0, 180, 70);
pub const PLAY_IDLE: Color32 = Color32::from_rgb(0, 180, 60);
pub const PLAY_ACTIVE: Color32 = Color32::from_rgb(255, 150, 50);
pub const STEP_FILL: Color32 = Color32::from_rgb(0, 140, 55);
pub const RESET_FILL: Color32 = Color32::from_rgb(120, 50, 50);
pub const SLIDER_HANDLE: Color32 = Color32::from_rgb(0, 220, 100);
pub const SLIDER_HANDLE_ACTIVE: Color32 = Color32::from_rgb(0, 255, 150);
pub const DIM_TEXT: Color32 = Color32::from_rgb(0, 100, 40);

pub fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 {
        let (a, b) = (a as f32, b as f32);
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
        mix(from.a(), to.a()),
    )
}

pub fn status_color(severity: StatusSeverity) -> Color32 {
    match severity {
        StatusSeverity::Info => LABEL,
        StatusSeverity::Success => POINTER,
        StatusSeverity::Error => Color32::from_rgb(255, 85, 85),
    }
}

pub fn terminal_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(170, 235, 180));
    visuals.window_fill = Color32::from_rgb(16, 20, 16);
    visuals.panel_fill = Color32::from_rgb(10, 14, 10);
    visuals.extreme_bg_color = Color32::from_rgb(4, 8, 4);
    visuals.faint_bg_color = Color32::from_rgb(22, 30, 22);
    visuals.selection.bg_fill = STEP_FILL;
    visuals.hyperlink_color = POINTER;
    visuals.widgets.inactive.bg_fill = TRACK;
    visuals.widgets.hovered.bg_fill = STEP_FILL.gamma_multiply(0.85);
    visuals.widgets.active.bg_fill = STEP_FILL;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, RING);
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp_color(ZERO_MARK, ZERO_FLASH, 0.0), ZERO_MARK);
        assert_eq!(lerp_color(ZERO_MARK, ZERO_FLASH, 1.0), ZERO_FLASH);
        assert_eq!(lerp_color(ZERO_MARK, ZERO_FLASH, 7.0), ZERO_FLASH);
    }

    #[test]
    fn lerp_midpoint_blends_channels() {
        let mid = lerp_color(Color32::from_rgb(0, 0, 0), Color32::from_rgb(200, 100, 50), 0.5);
        assert_eq!((mid.r(), mid.g(), mid.b()), (100, 50, 25));
    }
}
