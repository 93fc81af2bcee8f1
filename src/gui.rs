use std::time::Duration;

use eframe::egui;

use crate::config::AppContext;
use crate::editor::{Effect, FormEditor, InputIntent, Mode, Severity, TextInput};
use crate::error::AppError;
use crate::probe::{ProbeMsg, ProbeSystem, ProviderProbe, StatusProber};
use crate::schema::{self, FieldKind};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xa8, 0x55, 0xf7);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(0x22, 0xc5, 0x5e);
const ERR_RED: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);
const WARN_AMBER: egui::Color32 = egui::Color32::from_rgb(0xf5, 0x9e, 0x0b);
const ICE: egui::Color32 = egui::Color32::from_rgb(0x5e, 0xb8, 0xd4);

/// Windowed front end. Same state machine and intent set as the terminal
/// renderer; widget interactions and raw key events are translated into
/// `InputIntent`s, nothing else mutates the editor.
pub fn run(ctx: AppContext) -> Result<(), AppError> {
    let editor = FormEditor::new(ctx);

    let probe = match ProbeSystem::start() {
        Ok(system) => {
            system.request(editor.cfg().clone());
            Some(system)
        }
        Err(err) => {
            log::warn!("probe worker unavailable, checks will run inline: {err}");
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Prism-Relay Settings")
            .with_inner_size([620.0, 500.0])
            .with_min_inner_size([480.0, 380.0]),
        ..Default::default()
    };

    let app = GuiApp {
        editor,
        probe,
        awaiting_summary: false,
    };
    eframe::run_native(
        "Prism-Relay Settings",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| AppError::Message(format!("failed to start the windowed UI: {e}")))
}

struct GuiApp {
    editor: FormEditor,
    probe: Option<ProbeSystem>,
    awaiting_summary: bool,
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(probe) = self.probe.as_ref() {
            while let Some(ProbeMsg::Finished { result }) = probe.try_recv() {
                if self.awaiting_summary {
                    self.editor.apply_probe_results(result);
                    self.awaiting_summary = false;
                } else {
                    self.editor.set_probe_results(result);
                }
            }
        }

        if self.editor.mode() == Mode::EditingText {
            self.forward_edit_keys(ctx);
        }

        // Closing the window is a Quit: unsaved changes are persisted first.
        if ctx.input(|i| i.viewport().close_requested()) && !self.editor.should_quit() {
            let _ = self.editor.handle(InputIntent::Quit);
        }

        egui::TopBottomPanel::bottom("actions")
            .show(ctx, |ui| self.draw_actions(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.separator();
            self.draw_tabs(ui);
            ui.separator();
            self.draw_fields(ui);
        });

        if self.editor.should_quit() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Keep polling so probe results land without input events.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

impl GuiApp {
    fn forward_edit_keys(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::Text(text) => {
                    for c in text.chars() {
                        let _ = self.editor.handle(InputIntent::InsertChar(c));
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => {
                    let intent = match key {
                        egui::Key::Enter => InputIntent::Confirm,
                        egui::Key::Escape => InputIntent::Cancel,
                        egui::Key::Backspace => InputIntent::Backspace,
                        egui::Key::Delete => InputIntent::Delete,
                        egui::Key::ArrowLeft => InputIntent::CursorLeft,
                        egui::Key::ArrowRight => InputIntent::CursorRight,
                        egui::Key::Home => InputIntent::Home,
                        egui::Key::End => InputIntent::End,
                        _ => continue,
                    };
                    let _ = self.editor.handle(intent);
                }
                _ => {}
            }
        }
    }

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("PRISM-RELAY").color(ACCENT).strong());
            ui.label(egui::RichText::new("MCP Settings").weak());
        });

        ui.horizontal_wrapped(|ui| match self.editor.probe_results() {
            Some(results) => {
                for result in results {
                    let (dot, color) = if result.healthy {
                        ("●", OK_GREEN)
                    } else {
                        ("○", ERR_RED)
                    };
                    ui.label(
                        egui::RichText::new(format!(
                            "{dot} {}: {}",
                            result.provider, result.detail
                        ))
                        .color(color)
                        .small(),
                    );
                }
            }
            None => {
                ui.label(egui::RichText::new("checking providers...").weak().small());
            }
        });
    }

    fn draw_tabs(&mut self, ui: &mut egui::Ui) {
        let active = self.editor.tab_idx();
        let mut clicked = None;
        ui.horizontal(|ui| {
            for (i, tab) in schema::tabs().iter().enumerate() {
                if ui.selectable_label(i == active, tab.title).clicked() {
                    clicked = Some(i);
                }
            }
        });
        if let Some(target) = clicked {
            self.focus_tab(target);
        }
    }

    fn draw_fields(&mut self, ui: &mut egui::Ui) {
        let tab = self.editor.current_tab();
        let editing = self.editor.mode() == Mode::EditingText;

        egui::Grid::new("fields")
            .num_columns(2)
            .spacing([18.0, 12.0])
            .show(ui, |ui| {
                for (i, field) in tab.fields.iter().enumerate() {
                    let selected = i == self.editor.field_idx();
                    let label = if selected {
                        egui::RichText::new(field.label).color(ACCENT).strong()
                    } else {
                        egui::RichText::new(field.label)
                    };
                    ui.label(label);

                    match field.kind {
                        FieldKind::Choice => {
                            ui.horizontal(|ui| {
                                if ui.small_button("◀").clicked() {
                                    self.focus_field(i);
                                    let _ = self.editor.handle(InputIntent::CycleLeft);
                                }
                                ui.label(
                                    egui::RichText::new(self.editor.display_value(field))
                                        .color(ICE),
                                );
                                if ui.small_button("▶").clicked() {
                                    self.focus_field(i);
                                    let _ = self.editor.handle(InputIntent::CycleRight);
                                }
                            });
                        }
                        FieldKind::Text | FieldKind::Secret => {
                            if editing && selected {
                                ui.label(
                                    egui::RichText::new(buffer_with_cursor(self.editor.input()))
                                        .monospace()
                                        .color(ICE)
                                        .underline(),
                                );
                            } else {
                                let set = !self.editor.field_value(field).is_empty();
                                let color = if set { ICE } else { ERR_RED };
                                let value = egui::RichText::new(self.editor.display_value(field))
                                    .monospace()
                                    .color(color);
                                let response = ui
                                    .add(egui::Label::new(value).sense(egui::Sense::click()))
                                    .on_hover_text("Click to edit");
                                if response.clicked() {
                                    self.focus_field(i);
                                    let _ = self.editor.handle(InputIntent::Activate);
                                }
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn draw_actions(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Test Providers").clicked() {
                if self.editor.handle(InputIntent::TestProviders) == Effect::RunProbe {
                    self.run_probe();
                }
            }
            let reveal = self.editor.reveal_secrets();
            if ui.selectable_label(reveal, "Reveal Secrets").clicked() {
                let _ = self.editor.handle(InputIntent::ToggleRevealSecrets);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(egui::RichText::new("Save & Close").color(ACCENT).strong())
                    .clicked()
                {
                    let _ = self.editor.handle(InputIntent::Save);
                    let _ = self.editor.handle(InputIntent::Quit);
                }
                if ui.button("Save").clicked() {
                    let _ = self.editor.handle(InputIntent::Save);
                }
            });
        });

        if let Some(status) = self.editor.status() {
            let color = match status.severity {
                Severity::Info => ICE,
                Severity::Ok => OK_GREEN,
                Severity::Warn => WARN_AMBER,
            };
            ui.label(egui::RichText::new(status.message.as_str()).color(color).small());
        }
        ui.add_space(4.0);
    }

    fn run_probe(&mut self) {
        match self.probe.as_ref() {
            Some(probe) => {
                self.awaiting_summary = true;
                probe.request(self.editor.cfg().clone());
            }
            None => {
                let results = StatusProber::default().probe(self.editor.cfg());
                self.editor.apply_probe_results(results);
            }
        }
    }

    /// Reach a tab through the intent enumeration; bounded by the tab count.
    fn focus_tab(&mut self, target: usize) {
        for _ in 0..schema::tabs().len() {
            if self.editor.tab_idx() == target {
                break;
            }
            let _ = self.editor.handle(InputIntent::NextTab);
        }
    }

    /// Reach a field row through MoveUp/MoveDown; bounded by the field count.
    fn focus_field(&mut self, target: usize) {
        let len = self.editor.current_tab().fields.len();
        for _ in 0..len {
            let current = self.editor.field_idx();
            if current == target {
                break;
            }
            let intent = if current > target {
                InputIntent::MoveUp
            } else {
                InputIntent::MoveDown
            };
            let _ = self.editor.handle(intent);
        }
    }
}

fn buffer_with_cursor(input: &TextInput) -> String {
    let mut chars: Vec<char> = input.value.chars().collect();
    let idx = input.cursor.min(chars.len());
    chars.insert(idx, '▏');
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_marker_lands_on_the_char_boundary() {
        let mut input = TextInput::new("héllo");
        input.move_home();
        input.move_right();
        assert_eq!(buffer_with_cursor(&input), "h▏éllo");

        input.move_end();
        assert_eq!(buffer_with_cursor(&input), "héllo▏");
    }
}
