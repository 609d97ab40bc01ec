use std::{fs, path::Path};

use anyhow::Context;
use dial::playback::SpeedSetting;
use eframe::egui;
use puzzles::{Registry, Visualization};
use shared::{
    domain::{DayId, Part},
    protocol::PuzzleSummary,
};

use crate::config::Settings;
use crate::controller::events::{StatusLog, UiError, UiEvent};
use crate::controller::orchestration::{execute_run, RunRequest};
use crate::ui::{dial_view::DialView, theme};

/// What the central panel currently shows. At most one dial view exists.
pub enum ActiveView {
    Idle,
    Dial(DialView),
    Placeholder(String),
}

pub struct WorkbenchApp {
    registry: Registry,
    puzzles: Vec<PuzzleSummary>,
    selected_day: DayId,
    selected_part: Part,
    input: String,
    answer: String,
    status: StatusLog,
    view: ActiveView,
    speed: SpeedSetting,
}

impl WorkbenchApp {
    pub fn new(settings: &Settings, initial_input: Option<String>) -> Self {
        Self::with_registry(Registry::default(), settings, initial_input)
    }

    pub fn with_registry(
        registry: Registry,
        settings: &Settings,
        initial_input: Option<String>,
    ) -> Self {
        let puzzles = registry.days();
        let selected_day = if registry.get(settings.default_day).is_some() {
            settings.default_day
        } else {
            puzzles
                .first()
                .map(|p| p.day)
                .unwrap_or(settings.default_day)
        };

        let mut status = StatusLog::default();
        status.info(format!("System: {} puzzle(s) registered.", puzzles.len()));
        let input = match initial_input {
            Some(text) => {
                status.info("System: Input loaded from settings.");
                text
            }
            None => String::new(),
        };

        Self {
            registry,
            puzzles,
            selected_day,
            selected_part: settings.default_part,
            input,
            answer: String::new(),
            status,
            view: ActiveView::Idle,
            speed: SpeedSetting::new(settings.initial_speed),
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::DaySelected(day) => self.selected_day = day,
            UiEvent::PartSelected(part) => self.selected_part = part,
            UiEvent::RunRequested => self.run_selected(),
            UiEvent::LoadFileRequested => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Puzzle input", &["txt", "in"])
                    .pick_file()
                {
                    self.handle_event(UiEvent::InputFileChosen(path));
                }
            }
            UiEvent::InputFileChosen(path) => self.load_input_file(&path),
        }
    }

    fn run_selected(&mut self) {
        let request = RunRequest {
            day: self.selected_day,
            part: self.selected_part,
        };
        match execute_run(&self.registry, request, &self.input, &mut self.status) {
            Ok(solution) => {
                self.answer = solution.answer.to_string();
                self.clear_view();
                self.view = match solution.visualization {
                    Visualization::Dial(simulation) => {
                        ActiveView::Dial(DialView::new(simulation, request.part, self.speed))
                    }
                    Visualization::Placeholder(text) => ActiveView::Placeholder(text),
                };
            }
            Err(err) if err.leaves_state_untouched() => {}
            Err(_) => {
                self.answer.clear();
                self.clear_view();
            }
        }
    }

    /// Disposes of the current view, keeping its speed for the next one.
    fn clear_view(&mut self) {
        if let ActiveView::Dial(view) = &self.view {
            self.speed = view.speed();
        }
        self.view = ActiveView::Idle;
    }

    fn load_input_file(&mut self, path: &Path) {
        let loaded = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()));
        match loaded {
            Ok(text) => {
                tracing::debug!(path = %path.display(), bytes = text.len(), "input file loaded");
                self.input = text;
                self.status
                    .info(format!("System: Loaded input from {}.", path.display()));
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "input file not loaded");
                self.status
                    .error(UiError::io(format!("{err:#}")).status_text());
            }
        }
    }

    fn selected_title(&self) -> &str {
        self.puzzles
            .iter()
            .find(|p| p.day == self.selected_day)
            .map(|p| p.title.as_str())
            .unwrap_or("")
    }

    fn header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new("ADVENT OF CODE // WORKBENCH")
                    .monospace()
                    .color(theme::POINTER),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "Day {} - {} / Part {}",
                    self.selected_day,
                    self.selected_title(),
                    self.selected_part
                ))
                .monospace()
                .color(theme::DIM_TEXT),
            );
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.label(egui::RichText::new("DAY").monospace().color(theme::DIM_TEXT));
        egui::ComboBox::from_id_salt("day_select")
            .width(ui.available_width())
            .selected_text(format!("Day {} - {}", self.selected_day, self.selected_title()))
            .show_ui(ui, |ui| {
                for puzzle in &self.puzzles {
                    let label = format!("Day {} - {}", puzzle.day, puzzle.title);
                    if ui
                        .selectable_label(puzzle.day == self.selected_day, label)
                        .clicked()
                    {
                        events.push(UiEvent::DaySelected(puzzle.day));
                    }
                }
            });

        ui.add_space(6.0);
        ui.label(egui::RichText::new("PART").monospace().color(theme::DIM_TEXT));
        ui.horizontal(|ui| {
            for part in Part::ALL {
                if ui
                    .selectable_label(self.selected_part == part, format!("Part {part}"))
                    .clicked()
                {
                    events.push(UiEvent::PartSelected(part));
                }
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("INPUT").monospace().color(theme::DIM_TEXT));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Load file…").clicked() {
                    events.push(UiEvent::LoadFileRequested);
                }
            });
        });
        egui::ScrollArea::vertical()
            .id_salt("input_scroll")
            .max_height((ui.available_height() - 120.0).max(120.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.input)
                        .code_editor()
                        .desired_rows(18)
                        .desired_width(f32::INFINITY)
                        .hint_text("Paste puzzle input here"),
                );
            });

        ui.add_space(8.0);
        let run = egui::Button::new(egui::RichText::new("RUN").monospace().strong())
            .fill(theme::PLAY_IDLE)
            .min_size(egui::vec2(ui.available_width(), 28.0));
        if ui.add(run).on_hover_text("Ctrl+Enter").clicked() {
            events.push(UiEvent::RunRequested);
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new("ANSWER").monospace().color(theme::DIM_TEXT));
        let mut answer = self.answer.as_str();
        ui.add(
            egui::TextEdit::singleline(&mut answer)
                .font(egui::TextStyle::Monospace)
                .text_color(theme::HIGHLIGHT)
                .desired_width(f32::INFINITY),
        );
    }

    fn status_log(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("status_scroll")
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in self.status.lines() {
                    ui.label(
                        egui::RichText::new(format!(
                            "[{}] {}",
                            line.at.format("%H:%M:%S"),
                            line.message
                        ))
                        .monospace()
                        .color(theme::status_color(line.severity)),
                    );
                }
            });
    }

    fn visualization(&mut self, ui: &mut egui::Ui) {
        match &mut self.view {
            ActiveView::Dial(view) => {
                egui::ScrollArea::both()
                    .id_salt("dial_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| view.show(ui));
            }
            ActiveView::Placeholder(text) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(text.as_str())
                            .monospace()
                            .size(18.0)
                            .color(theme::DIM_TEXT),
                    );
                });
            }
            ActiveView::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Select a day, paste the input and press RUN.")
                            .monospace()
                            .color(theme::DIM_TEXT),
                    );
                });
            }
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter)) {
            events.push(UiEvent::RunRequested);
        }

        egui::TopBottomPanel::top("workbench_header").show(ctx, |ui| self.header(ui));

        egui::TopBottomPanel::bottom("status_log")
            .resizable(true)
            .default_height(130.0)
            .min_height(60.0)
            .show(ctx, |ui| self.status_log(ui));

        egui::SidePanel::left("puzzle_controls")
            .resizable(true)
            .default_width(320.0)
            .min_width(260.0)
            .show(ctx, |ui| self.controls(ui, &mut events));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::CANVAS_BG))
            .show(ctx, |ui| self.visualization(ui));

        for event in events {
            self.handle_event(event);
        }
    }
}
