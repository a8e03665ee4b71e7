//! Line-per-block editor view
//!
//! Each line of the [`BlockEditor`] is shown either as a single-line text
//! field (edit mode) or as rendered markdown (preview mode). The view never
//! mutates the editor itself: it reports what the user did as
//! [`EditorEvent`]s, which the caller feeds back through the session.

use eframe::egui::{self, text::CCursor, text::CCursorRange, FontId, Key, Sense, TextEdit, Ui};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::core::block_editor::{BlockEditor, CursorPlacement, EditorEvent, FocusRequest};
use crate::core::line::{Line, LineMode};

/// Presentation settings for the block editor
pub struct BlockEditorStyle<'a> {
    pub font_size: f32,
    pub placeholder: &'a str,
}

pub struct BlockEditorView;

impl BlockEditorView {
    /// Show all lines. `focus` is the pending focus request of the editor, if
    /// any; it is applied to the matching text field this frame.
    pub fn show(
        ui: &mut Ui,
        editor: &BlockEditor,
        focus: Option<FocusRequest>,
        cache: &mut CommonMarkCache,
        style: &BlockEditorStyle<'_>,
    ) -> Vec<EditorEvent> {
        let mut events = Vec::new();

        for (index, line) in editor.lines().iter().enumerate() {
            ui.push_id(index, |ui| match line.mode() {
                LineMode::Edit => {
                    let request = focus.filter(|f| f.line == index);
                    Self::show_edit(ui, index, line, request, style, &mut events);
                }
                LineMode::Preview => {
                    Self::show_preview(ui, index, line, cache, &mut events);
                }
            });
        }

        events
    }

    fn show_edit(
        ui: &mut Ui,
        index: usize,
        line: &Line,
        focus: Option<FocusRequest>,
        style: &BlockEditorStyle<'_>,
        events: &mut Vec<EditorEvent>,
    ) {
        let id = ui.make_persistent_id("line_edit");
        let mut text = line.raw_text().to_string();

        let mut edit = TextEdit::singleline(&mut text)
            .id(id)
            .font(FontId::proportional(style.font_size))
            .frame(false)
            .desired_width(f32::INFINITY)
            .margin(egui::Margin::symmetric(0, 2));
        if line.placeholder_visible() {
            edit = edit.hint_text(style.placeholder);
        }
        let mut output = edit.show(ui);
        let response = output.response.clone();

        if let Some(request) = focus {
            response.request_focus();
            let position = match request.cursor {
                CursorPlacement::Start => 0,
                CursorPlacement::End => text.chars().count(),
            };
            output
                .state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(position))));
            output.state.store(ui.ctx(), id);
        }

        if response.gained_focus() {
            events.push(EditorEvent::Focus(index));
        }
        if response.changed() {
            events.push(EditorEvent::Input {
                line: index,
                text: text.clone(),
            });
        }

        let (enter, backspace) =
            ui.input(|i| (i.key_pressed(Key::Enter), i.key_pressed(Key::Backspace)));
        if response.lost_focus() {
            if enter {
                events.push(EditorEvent::Enter(index));
            } else {
                events.push(EditorEvent::Blur(index));
            }
        } else if response.has_focus()
            && backspace
            && line.raw_text().is_empty()
            && text.is_empty()
        {
            events.push(EditorEvent::Backspace(index));
        }
    }

    fn show_preview(
        ui: &mut Ui,
        index: usize,
        line: &Line,
        cache: &mut CommonMarkCache,
        events: &mut Vec<EditorEvent>,
    ) {
        let frame = egui::Frame::new()
            .inner_margin(egui::Margin::symmetric(0, 2))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                CommonMarkViewer::new().show(ui, cache, line.raw_text());
            });

        let response = ui
            .interact(frame.response.rect, ui.id().with("line_preview"), Sense::click())
            .on_hover_cursor(egui::CursorIcon::Text);
        if response.clicked() {
            events.push(EditorEvent::ClickPreview(index));
        }
    }
}
