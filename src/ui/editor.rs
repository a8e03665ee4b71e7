//! Document editor panel: title, save status and the block editor

use std::time::Instant;

use eframe::egui;

use super::block_editor::{BlockEditorStyle, BlockEditorView};
use crate::app::FlashpadApp;
use crate::core::document::UNTITLED;
use crate::core::session::SaveStatus;

/// Central editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut FlashpadApp) {
        let Some(session) = app.state.session() else {
            Self::show_welcome(ui, app);
            return;
        };
        let now = Instant::now();
        let mut title = session.title().to_string();
        let status = session.status();

        ui.horizontal(|ui| {
            let status_width = 120.0;
            let response = ui.add(
                egui::TextEdit::singleline(&mut title)
                    .hint_text(UNTITLED)
                    .font(egui::FontId::proportional(26.0))
                    .frame(false)
                    .desired_width(ui.available_width() - status_width),
            );
            if response.changed() {
                app.state.set_title(title.clone(), now);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                Self::show_status(ui, status);
            });
        });
        ui.separator();

        let placeholder = app.state.config.editor.placeholder.clone();
        let style = BlockEditorStyle {
            font_size: app.state.config.editor.font_size,
            placeholder: &placeholder,
        };

        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let Some(session) = app.state.session_mut() else {
                    return;
                };
                let focus = session.editor_mut().take_focus_request();
                let events = BlockEditorView::show(
                    ui,
                    session.editor(),
                    focus,
                    &mut app.commonmark_cache,
                    &style,
                );
                for event in events {
                    app.state.edit(event, now);
                }
            });
    }

    fn show_status(ui: &mut egui::Ui, status: SaveStatus) {
        let color = match status {
            SaveStatus::Saved => ui.visuals().weak_text_color(),
            SaveStatus::Dirty | SaveStatus::Saving => ui.visuals().warn_fg_color,
            SaveStatus::Error => ui.visuals().error_fg_color,
        };
        if status == SaveStatus::Saving {
            ui.spinner();
        }
        ui.colored_label(color, status.label());
    }

    /// Show welcome screen when no document is open
    fn show_welcome(ui: &mut egui::Ui, app: &mut FlashpadApp) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading("Welcome to Flashpad");
            ui.add_space(20.0);

            ui.label("Select a document in the sidebar or create a new one.");
            ui.add_space(10.0);

            if app.state.credentials().is_authenticated() && ui.button("New document").clicked() {
                app.new_document();
            }
            ui.add_space(20.0);

            ui.label("Keyboard shortcuts:");
            ui.label("  Ctrl+S - Save");
            ui.label("  Ctrl+B - Toggle sidebar");
            ui.label("  Enter - New line");
            ui.label("  Backspace on an empty line - Delete it");
        });
    }
}
