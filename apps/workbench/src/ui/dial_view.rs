//! Interactive canvas for a dial history.
//!
//! Geometry is derived from the allocated rect on every frame, so resizing
//! the window never touches playback state. Pointer handling is a small
//! hit-test layer over [`DialLayout`]; the playback itself lives in
//! [`dial::playback::Playback`].

use std::sync::Arc;

use dial::{
    playback::{Playback, SpeedSetting},
    Simulation, DIAL_SIZE,
};
use eframe::egui::{self, pos2, vec2, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke};
use shared::domain::Part;

use crate::ui::theme;

pub const MIN_WIDTH: f32 = 500.0;
pub const MIN_HEIGHT: f32 = 480.0;

const MARGIN: f32 = 15.0;
const CONTROLS_FROM_BOTTOM: f32 = 90.0;
const BUTTON_HEIGHT: f32 = 26.0;
const SLIDER_LEFT: f32 = 190.0;
const SLIDER_RIGHT_GAP: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    ProgressBar,
    SpeedSlider,
    PlayPause,
    Step,
    Reset,
}

impl HitTarget {
    pub fn is_draggable(self) -> bool {
        matches!(self, HitTarget::ProgressBar | HitTarget::SpeedSlider)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLayout {
    pub canvas: Rect,
    pub center: Pos2,
    pub radius: f32,
    pub progress_bar: Rect,
    pub play_button: Rect,
    pub step_button: Rect,
    pub reset_button: Rect,
    pub speed_track: Rect,
    /// Taller than the track so the slider is easy to grab.
    pub speed_hit: Rect,
}

impl DialLayout {
    pub fn compute(canvas: Rect) -> Self {
        let origin = canvas.min;
        let (w, h) = (canvas.width(), canvas.height());

        let center = origin + vec2(w / 2.0, h / 2.0 - 50.0);
        let radius = w.min(h - 140.0).max(0.0) * 0.30;

        let controls_y = origin.y + h - CONTROLS_FROM_BOTTOM;
        let progress_bar = Rect::from_min_size(
            pos2(origin.x + MARGIN, controls_y),
            vec2((w - 2.0 * MARGIN).max(0.0), 12.0),
        );

        let button_y = controls_y + 22.0;
        let button = |x: f32, width: f32| {
            Rect::from_min_size(pos2(origin.x + x, button_y), vec2(width, BUTTON_HEIGHT))
        };

        let slider_x = origin.x + SLIDER_LEFT;
        let slider_w = (w - SLIDER_LEFT - SLIDER_RIGHT_GAP).max(1.0);
        let track_y = button_y + 14.0;
        let speed_track = Rect::from_min_size(pos2(slider_x, track_y), vec2(slider_w, 7.0));
        let speed_hit = Rect::from_min_max(
            pos2(slider_x, track_y - 6.0),
            pos2(slider_x + slider_w, track_y + 13.0),
        );

        Self {
            canvas,
            center,
            radius,
            progress_bar,
            play_button: button(15.0, 55.0),
            step_button: button(78.0, 42.0),
            reset_button: button(127.0, 48.0),
            speed_track,
            speed_hit,
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> Option<HitTarget> {
        [
            (self.progress_bar, HitTarget::ProgressBar),
            (self.speed_hit, HitTarget::SpeedSlider),
            (self.play_button, HitTarget::PlayPause),
            (self.step_button, HitTarget::Step),
            (self.reset_button, HitTarget::Reset),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, target)| target)
    }

    pub fn progress_ratio_at(&self, x: f32) -> f32 {
        fraction_along(self.progress_bar, x)
    }

    pub fn speed_value_at(&self, x: f32) -> f32 {
        fraction_along(self.speed_track, x)
    }

    /// Point at `distance` from the center, pointing at dial `position`.
    /// Position 0 is at twelve o'clock and values grow clockwise.
    pub fn point_at(&self, position: f32, distance: f32) -> Pos2 {
        let angle = dial_angle(position);
        self.center + vec2(angle.cos(), angle.sin()) * distance
    }
}

fn fraction_along(rect: Rect, x: f32) -> f32 {
    if rect.width() <= 0.0 {
        return 0.0;
    }
    ((x - rect.left()) / rect.width()).clamp(0.0, 1.0)
}

fn dial_angle(position: f32) -> f32 {
    (position * 360.0 / DIAL_SIZE as f32 - 90.0).to_radians()
}

pub struct DialView {
    playback: Playback,
    part: Part,
    dragging: Option<HitTarget>,
}

impl DialView {
    pub fn new(simulation: Arc<Simulation>, part: Part, speed: SpeedSetting) -> Self {
        tracing::debug!(
            steps = simulation.history.len(),
            %part,
            "dial visualization created"
        );
        Self {
            playback: Playback::new(simulation, speed),
            part,
            dragging: None,
        }
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn speed(&self) -> SpeedSetting {
        self.playback.speed()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let size = vec2(available.x.max(MIN_WIDTH), available.y.max(MIN_HEIGHT));
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        let layout = DialLayout::compute(rect);

        if response.is_pointer_button_down_on() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (just_pressed, origin) =
                    ui.input(|i| (i.pointer.primary_pressed(), i.pointer.press_origin()));
                let start = if just_pressed || response.drag_started() {
                    Some(origin.unwrap_or(pos))
                } else {
                    None
                };
                self.pointer_down(&layout, pos, start);
            }
        } else {
            self.pointer_released();
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.click(layout.hit_test(pos));
            }
        }

        if response.hovered() {
            if let Some(pos) = response.hover_pos() {
                if layout.hit_test(pos).is_some() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }
        }

        self.playback.tick();
        self.paint(&ui.painter_at(rect), &layout);

        if self.playback.is_animating() || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }
    }

    /// Pointer held at `pos`. `press_start` is set on the frame the press
    /// began and decides which control, if any, is being dragged.
    pub fn pointer_down(&mut self, layout: &DialLayout, pos: Pos2, press_start: Option<Pos2>) {
        if let Some(start) = press_start {
            if self.dragging.is_none() {
                self.dragging = layout.hit_test(start).filter(|t| t.is_draggable());
            }
        }
        match self.dragging {
            Some(HitTarget::ProgressBar) => self.playback.seek(layout.progress_ratio_at(pos.x)),
            Some(HitTarget::SpeedSlider) => self.playback.set_speed(layout.speed_value_at(pos.x)),
            _ => {}
        }
    }

    pub fn pointer_released(&mut self) {
        self.dragging = None;
    }

    pub fn click(&mut self, target: Option<HitTarget>) {
        match target {
            Some(HitTarget::PlayPause) => self.playback.toggle_play(),
            Some(HitTarget::Step) => self.playback.step(),
            Some(HitTarget::Reset) => self.playback.reset(),
            _ => {}
        }
    }

    fn paint(&self, painter: &egui::Painter, layout: &DialLayout) {
        painter.rect_filled(layout.canvas, CornerRadius::ZERO, theme::CANVAS_BG);
        self.paint_dial(painter, layout);
        self.paint_info(painter, layout);
        self.paint_controls(painter, layout);
    }

    fn paint_dial(&self, painter: &egui::Painter, layout: &DialLayout) {
        let radius = layout.radius;
        let flash = self.playback.flash();

        painter.circle_stroke(layout.center, radius, Stroke::new(3.0, theme::RING));

        for tick in 0..DIAL_SIZE {
            let major = tick % 10 == 0;
            let inner = if major { radius - 18.0 } else { radius - 10.0 };
            let stroke = if tick == 0 {
                Stroke::new(
                    4.0,
                    theme::lerp_color(theme::ZERO_MARK, theme::ZERO_FLASH, flash),
                )
            } else if major {
                Stroke::new(2.0, theme::TICK_MAJOR)
            } else {
                Stroke::new(1.0, theme::TICK_MINOR)
            };
            let position = tick as f32;
            painter.line_segment(
                [
                    layout.point_at(position, inner),
                    layout.point_at(position, radius),
                ],
                stroke,
            );
        }

        for label in (0..DIAL_SIZE).step_by(10) {
            let color = if label == 0 {
                theme::ZERO_MARK
            } else {
                theme::LABEL
            };
            painter.text(
                layout.point_at(label as f32, radius - 32.0),
                Align2::CENTER_CENTER,
                label.to_string(),
                FontId::monospace(13.0),
                color,
            );
        }

        let position = self.playback.display_position();
        let angle = dial_angle(position);
        let dir = vec2(angle.cos(), angle.sin());
        let normal = vec2(-dir.y, dir.x);
        painter.line_segment(
            [layout.center, layout.center + dir * (radius - 45.0)],
            Stroke::new(4.0, theme::POINTER),
        );
        painter.add(egui::Shape::convex_polygon(
            vec![
                layout.center + dir * (radius - 40.0),
                layout.center + dir * (radius - 55.0) - normal * 8.0,
                layout.center + dir * (radius - 55.0) + normal * 8.0,
            ],
            theme::POINTER,
            Stroke::NONE,
        ));
        painter.circle_filled(layout.center, 6.0, theme::LABEL);

        if flash > 0.0 {
            let alpha = (flash * 200.0).round().clamp(0.0, 255.0) as u8;
            painter.circle_stroke(
                layout.center,
                radius * 1.15,
                Stroke::new(
                    flash * 15.0,
                    Color32::from_rgba_unmultiplied(255, 50, 100, alpha),
                ),
            );
        }
    }

    fn paint_info(&self, painter: &egui::Painter, layout: &DialLayout) {
        let origin = layout.canvas.min;
        let entry = self.playback.current_entry();
        let font = FontId::monospace(12.0);
        let shown_position = self.playback.display_position().round() as u64 % DIAL_SIZE;

        let lines = [
            format!(
                "Step: {} / {}",
                self.playback.current_step(),
                self.playback.last_step()
            ),
            format!("Instruction: {}", entry.label()),
            format!("Position: {shown_position}"),
        ];
        for (row, text) in lines.into_iter().enumerate() {
            painter.text(
                origin + vec2(MARGIN, 8.0 + 16.0 * row as f32),
                Align2::LEFT_TOP,
                text,
                font.clone(),
                theme::POINTER,
            );
        }
        if entry.zeros_this_step > 0 {
            painter.text(
                origin + vec2(MARGIN, 56.0),
                Align2::LEFT_TOP,
                format!("Passed through 0: {}x", entry.zeros_this_step),
                font,
                theme::HIGHLIGHT,
            );
        }

        let right = layout.canvas.right() - MARGIN;
        let counters = [
            (Part::One, format!("Part 1 (ends at 0): {}", entry.part1_zeros), theme::ZERO_MARK),
            (Part::Two, format!("Part 2 (all zeros): {}", entry.part2_zeros), theme::HIGHLIGHT),
        ];
        for (row, (part, text, color)) in counters.into_iter().enumerate() {
            let size = if part == self.part { 15.0 } else { 13.0 };
            painter.text(
                pos2(right, origin.y + 8.0 + 18.0 * row as f32),
                Align2::RIGHT_TOP,
                text,
                FontId::monospace(size),
                color,
            );
        }
    }

    fn paint_controls(&self, painter: &egui::Painter, layout: &DialLayout) {
        let bar = layout.progress_bar;
        let progress = self.playback.progress_ratio();
        painter.rect_filled(bar, CornerRadius::same(6), theme::TRACK);
        painter.rect_filled(
            Rect::from_min_size(bar.min, vec2(bar.width() * progress, bar.height())),
            CornerRadius::same(6),
            theme::LABEL,
        );
        painter.circle_filled(
            pos2(bar.left() + bar.width() * progress, bar.center().y),
            7.0,
            theme::POINTER,
        );

        let playing = self.playback.is_playing();
        let buttons = [
            (
                layout.play_button,
                if playing { "PAUSE" } else { "PLAY" },
                if playing {
                    theme::PLAY_ACTIVE
                } else {
                    theme::PLAY_IDLE
                },
                Color32::BLACK,
            ),
            (layout.step_button, "STEP", theme::STEP_FILL, Color32::WHITE),
            (layout.reset_button, "RESET", theme::RESET_FILL, Color32::WHITE),
        ];
        for (rect, label, fill, text_color) in buttons {
            painter.rect_filled(rect, CornerRadius::same(5), fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::monospace(10.0),
                text_color,
            );
        }

        let track = layout.speed_track;
        let speed = self.playback.speed();
        let label_y = layout.play_button.top() + 4.0;
        painter.text(
            pos2(track.left(), label_y),
            Align2::LEFT_CENTER,
            "SPEED",
            FontId::monospace(9.0),
            theme::DIM_TEXT,
        );
        painter.rect_filled(track, CornerRadius::same(3), theme::TRACK);
        painter.rect_filled(
            Rect::from_min_size(track.min, vec2(track.width() * speed.value(), track.height())),
            CornerRadius::same(3),
            theme::TRACK_FILL,
        );
        let handle_color = if self.dragging == Some(HitTarget::SpeedSlider) {
            theme::SLIDER_HANDLE_ACTIVE
        } else {
            theme::SLIDER_HANDLE
        };
        painter.circle_filled(
            pos2(track.left() + track.width() * speed.value(), track.center().y),
            6.0,
            handle_color,
        );
        painter.text(
            pos2(layout.canvas.right() - MARGIN, label_y),
            Align2::RIGHT_CENTER,
            speed.label(),
            FontId::monospace(9.0),
            theme::TRACK_FILL,
        );
    }
}

impl Drop for DialView {
    fn drop(&mut self) {
        tracing::debug!(
            step = self.playback.current_step(),
            "dial visualization disposed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "L68 L30 R48 L5 R60 L55 L1 L99 R14 L82";

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(600.0, 500.0))
    }

    fn view() -> DialView {
        DialView::new(
            Arc::new(dial::solve(EXAMPLE)),
            Part::One,
            SpeedSetting::new(0.3),
        )
    }

    #[test]
    fn layout_places_controls_from_the_bottom() {
        let layout = DialLayout::compute(canvas());
        assert_eq!(layout.progress_bar.min, pos2(15.0, 410.0));
        assert_eq!(layout.progress_bar.width(), 570.0);
        assert_eq!(layout.play_button.min, pos2(15.0, 432.0));
        assert_eq!(layout.speed_track.min, pos2(190.0, 446.0));
        assert_eq!(layout.speed_track.width(), 360.0);
        assert_eq!(layout.center, pos2(300.0, 200.0));
        assert_eq!(layout.radius, 360.0 * 0.30);
    }

    #[test]
    fn layout_follows_canvas_origin_and_size() {
        let moved = Rect::from_min_size(pos2(100.0, 40.0), vec2(900.0, 700.0));
        let layout = DialLayout::compute(moved);
        assert_eq!(layout.progress_bar.min, pos2(115.0, 650.0));
        assert_eq!(layout.center, pos2(550.0, 340.0));
        assert!(layout.radius > DialLayout::compute(canvas()).radius);
    }

    #[test]
    fn hit_test_finds_each_control() {
        let layout = DialLayout::compute(canvas());
        let cases = [
            (layout.progress_bar.center(), Some(HitTarget::ProgressBar)),
            (layout.speed_track.center(), Some(HitTarget::SpeedSlider)),
            (layout.play_button.center(), Some(HitTarget::PlayPause)),
            (layout.step_button.center(), Some(HitTarget::Step)),
            (layout.reset_button.center(), Some(HitTarget::Reset)),
            (layout.center, None),
        ];
        for (pos, expected) in cases {
            assert_eq!(layout.hit_test(pos), expected, "pos={pos:?}");
        }
    }

    #[test]
    fn fractions_clamp_outside_the_track() {
        let layout = DialLayout::compute(canvas());
        assert_eq!(layout.progress_ratio_at(-50.0), 0.0);
        assert_eq!(layout.progress_ratio_at(5_000.0), 1.0);
        assert_eq!(layout.progress_ratio_at(15.0 + 285.0), 0.5);
        assert_eq!(layout.speed_value_at(190.0), 0.0);
    }

    #[test]
    fn zero_points_straight_up() {
        let layout = DialLayout::compute(canvas());
        let top = layout.point_at(0.0, 100.0);
        assert!((top.x - layout.center.x).abs() < 1e-3);
        assert!((top.y - (layout.center.y - 100.0)).abs() < 1e-3);
        let right = layout.point_at(25.0, 100.0);
        assert!((right.x - (layout.center.x + 100.0)).abs() < 1e-3);
    }

    #[test]
    fn pressing_progress_bar_scrubs_until_release() {
        let layout = DialLayout::compute(canvas());
        let mut view = view();
        let bar = layout.progress_bar;

        let press = pos2(bar.left() + bar.width() * 0.5, bar.center().y);
        view.pointer_down(&layout, press, Some(press));
        assert_eq!(view.playback().current_step(), 5);

        // Dragging off the bar keeps scrubbing horizontally.
        view.pointer_down(&layout, pos2(bar.right() + 40.0, 20.0), None);
        assert_eq!(view.playback().current_step(), 10);

        view.pointer_released();
        view.pointer_down(&layout, press, None);
        assert_eq!(view.playback().current_step(), 10);
    }

    #[test]
    fn dragging_speed_slider_sets_speed() {
        let layout = DialLayout::compute(canvas());
        let mut view = view();
        let track = layout.speed_track;

        view.pointer_down(&layout, track.center(), Some(track.center()));
        assert_eq!(view.speed().value(), 0.5);
        view.pointer_down(&layout, pos2(track.right() + 100.0, 0.0), None);
        assert_eq!(view.speed().value(), 1.0);
        assert_eq!(view.playback().current_step(), 0);
    }

    #[test]
    fn press_on_button_does_not_start_a_drag() {
        let layout = DialLayout::compute(canvas());
        let mut view = view();
        let button = layout.play_button.center();
        view.pointer_down(&layout, button, Some(button));
        view.pointer_down(&layout, layout.progress_bar.right_center(), None);
        assert_eq!(view.playback().current_step(), 0);
    }

    #[test]
    fn button_clicks_drive_playback() {
        let mut view = view();
        view.click(Some(HitTarget::Step));
        view.click(Some(HitTarget::Step));
        assert_eq!(view.playback().current_step(), 2);

        view.click(Some(HitTarget::PlayPause));
        assert!(view.playback().is_playing());
        view.click(Some(HitTarget::PlayPause));
        assert!(!view.playback().is_playing());

        view.click(Some(HitTarget::Reset));
        assert_eq!(view.playback().current_step(), 0);

        view.click(None);
        view.click(Some(HitTarget::ProgressBar));
        assert_eq!(view.playback().current_step(), 0);
    }

    #[test]
    fn resizing_keeps_playback_state() {
        let mut view = view();
        view.click(Some(HitTarget::Step));
        view.click(Some(HitTarget::Step));
        view.click(Some(HitTarget::Step));

        let small = DialLayout::compute(canvas());
        let large =
            DialLayout::compute(Rect::from_min_size(pos2(0.0, 0.0), vec2(1400.0, 900.0)));
        assert_ne!(small, large);

        view.pointer_down(&large, large.center, Some(large.center));
        view.pointer_released();
        assert_eq!(view.playback().current_step(), 3);
    }
}
