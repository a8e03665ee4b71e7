//! Line-oriented block editor
//!
//! The editor owns an ordered list of [`Line`]s and the focus transitions
//! between them. Every user interaction arrives as an [`EditorEvent`], so the
//! whole edit/preview state machine runs without a rendering surface.

use super::line::{Line, LineMode};

/// Where the text cursor goes when a line receives focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPlacement {
    Start,
    End,
}

/// A focus change the UI still has to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub line: usize,
    pub cursor: CursorPlacement,
}

/// Input events produced by the UI for a given line index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The line's input surface gained focus
    Focus(usize),
    /// The line's input surface lost focus
    Blur(usize),
    /// The raw text of the line was edited
    Input { line: usize, text: String },
    /// Line-break key pressed while editing
    Enter(usize),
    /// Deletion key pressed at the start of the line
    Backspace(usize),
    /// The rendered preview was clicked
    ClickPreview(usize),
}

/// Ordered collection of lines, never empty
#[derive(Debug, Clone)]
pub struct BlockEditor {
    lines: Vec<Line>,
    focus: Option<FocusRequest>,
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEditor {
    /// Create an editor holding a single empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            focus: None,
        }
    }

    /// Create an editor from serialized content
    pub fn from_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.load(text);
        editor
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw text of every line, in order
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(Line::raw_text).collect()
    }

    /// Take the pending focus change so the UI applies it only once
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.focus.take()
    }

    /// Apply one UI event. Returns `true` when the document content changed.
    pub fn handle(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::Focus(index) | EditorEvent::ClickPreview(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.enter_edit_mode();
                }
                if matches!(event, EditorEvent::ClickPreview(_)) && index < self.lines.len() {
                    self.focus = Some(FocusRequest {
                        line: index,
                        cursor: CursorPlacement::End,
                    });
                }
                false
            }
            EditorEvent::Blur(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.exit_edit_mode();
                }
                false
            }
            EditorEvent::Input { line, text } => match self.lines.get_mut(line) {
                Some(target) if target.mode() == LineMode::Edit => {
                    if target.raw_text() == text {
                        return false;
                    }
                    target.set_raw_text(text);
                    true
                }
                _ => false,
            },
            EditorEvent::Enter(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.render();
                }
                self.insert_line_after(index).is_some()
            }
            EditorEvent::Backspace(index) => self.delete_line(index),
        }
    }

    /// Insert an empty line right after `index` and focus it.
    ///
    /// Returns the index of the new line.
    pub fn insert_line_after(&mut self, index: usize) -> Option<usize> {
        if index >= self.lines.len() {
            return None;
        }

        let at = index + 1;
        let mut line = Line::new();
        line.enter_edit_mode();
        self.lines.insert(at, line);
        self.focus = Some(FocusRequest {
            line: at,
            cursor: CursorPlacement::Start,
        });
        tracing::debug!("Inserted line {} ({} lines)", at, self.lines.len());
        Some(at)
    }

    /// Remove the empty line at `index` and move focus to the end of the
    /// previous line. The first line is never removed.
    pub fn delete_line(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.lines.len() {
            return false;
        }
        if !self.lines[index].raw_text().is_empty() {
            return false;
        }

        self.lines.remove(index);
        let previous = index - 1;
        self.lines[previous].enter_edit_mode();
        self.focus = Some(FocusRequest {
            line: previous,
            cursor: CursorPlacement::End,
        });
        tracing::debug!("Deleted line {} ({} lines)", index, self.lines.len());
        true
    }

    /// Join the raw text of all lines with `\n`, blank lines included
    pub fn serialize(&self) -> String {
        self.texts().join("\n")
    }

    /// Whether any line holds non-blank text
    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|line| !line.is_empty())
    }

    /// Replace all lines with the content of `text`, rendering non-blank lines
    pub fn load(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|piece| {
                let mut line = Line::with_text(piece);
                if !line.is_empty() {
                    line.render();
                }
                line
            })
            .collect();
        self.focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(texts: &[&str]) -> BlockEditor {
        BlockEditor::from_text(&texts.join("\n"))
    }

    #[test]
    fn test_new_editor_has_one_empty_line() {
        let editor = BlockEditor::new();
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.serialize(), "");
        assert!(!editor.has_content());
    }

    #[test]
    fn test_load_empty_string_yields_one_line() {
        let mut editor = editor_with(&["a", "b"]);
        editor.load("");
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.line(0).unwrap().mode(), LineMode::Edit);
    }

    #[test]
    fn test_load_prerenders_non_blank_lines() {
        let editor = editor_with(&["# Title", "", "body"]);
        assert_eq!(editor.line(0).unwrap().mode(), LineMode::Preview);
        assert_eq!(editor.line(1).unwrap().mode(), LineMode::Edit);
        assert_eq!(editor.line(2).unwrap().mode(), LineMode::Preview);
        assert!(editor.line(0).unwrap().rendered_html().contains("<h1>"));
    }

    #[test]
    fn test_serialize_keeps_blank_lines() {
        let editor = editor_with(&["a", "", "  ", "b"]);
        assert_eq!(editor.serialize(), "a\n\n  \nb");
        assert!(editor.has_content());
    }

    #[test]
    fn test_blank_only_document_has_no_content() {
        let editor = editor_with(&["", "   ", ""]);
        assert!(!editor.has_content());
        assert_eq!(editor.serialize(), "\n   \n");
    }

    #[test]
    fn test_insert_line_after_shifts_following_lines() {
        let mut editor = editor_with(&["a", "b"]);
        assert_eq!(editor.insert_line_after(0), Some(1));
        assert_eq!(editor.texts(), vec!["a", "", "b"]);
        assert_eq!(
            editor.take_focus_request(),
            Some(FocusRequest {
                line: 1,
                cursor: CursorPlacement::Start
            })
        );
        assert_eq!(editor.line(1).unwrap().mode(), LineMode::Edit);
        assert_eq!(editor.take_focus_request(), None);
    }

    #[test]
    fn test_insert_line_after_out_of_range() {
        let mut editor = BlockEditor::new();
        assert_eq!(editor.insert_line_after(3), None);
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_delete_line_rules() {
        let mut editor = editor_with(&["a", "", "b"]);

        // first line is never deleted
        assert!(!editor.delete_line(0));
        // non-empty line is kept
        assert!(!editor.delete_line(2));
        assert_eq!(editor.len(), 3);

        assert!(editor.delete_line(1));
        assert_eq!(editor.texts(), vec!["a", "b"]);
        assert_eq!(
            editor.take_focus_request(),
            Some(FocusRequest {
                line: 0,
                cursor: CursorPlacement::End
            })
        );
        assert_eq!(editor.line(0).unwrap().mode(), LineMode::Edit);
    }

    #[test]
    fn test_delete_whitespace_line_is_refused() {
        let mut editor = editor_with(&["a", " "]);
        assert!(!editor.delete_line(1));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_single_line_document_is_never_emptied() {
        let mut editor = BlockEditor::new();
        assert!(!editor.handle(EditorEvent::Backspace(0)));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_enter_renders_and_inserts() {
        let mut editor = BlockEditor::new();
        editor.handle(EditorEvent::Focus(0));
        assert!(editor.handle(EditorEvent::Input {
            line: 0,
            text: "**hi**".into()
        }));
        assert!(editor.handle(EditorEvent::Enter(0)));

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.line(0).unwrap().raw_text(), "**hi**");
        assert_eq!(editor.line(0).unwrap().mode(), LineMode::Preview);
        assert_eq!(editor.take_focus_request().map(|f| f.line), Some(1));
    }

    #[test]
    fn test_input_ignored_while_previewing() {
        let mut editor = editor_with(&["hello"]);
        assert!(!editor.handle(EditorEvent::Input {
            line: 0,
            text: "changed".into()
        }));
        assert_eq!(editor.serialize(), "hello");

        editor.handle(EditorEvent::ClickPreview(0));
        assert_eq!(editor.line(0).unwrap().mode(), LineMode::Edit);
        assert!(editor.handle(EditorEvent::Input {
            line: 0,
            text: "changed".into()
        }));
        assert_eq!(editor.serialize(), "changed");
    }

    #[test]
    fn test_blur_on_empty_line_stays_in_edit() {
        let mut editor = BlockEditor::new();
        for _ in 0..3 {
            editor.handle(EditorEvent::Focus(0));
            editor.handle(EditorEvent::Blur(0));
            assert_eq!(editor.line(0).unwrap().mode(), LineMode::Edit);
        }
    }

    #[test]
    fn test_events_for_missing_lines_are_ignored() {
        let mut editor = BlockEditor::new();
        assert!(!editor.handle(EditorEvent::Focus(9)));
        assert!(!editor.handle(EditorEvent::Blur(9)));
        assert!(!editor.handle(EditorEvent::Input {
            line: 9,
            text: "x".into()
        }));
        assert!(!editor.handle(EditorEvent::Enter(9)));
        assert_eq!(editor.len(), 1);
    }
}
