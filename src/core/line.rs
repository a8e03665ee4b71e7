//! A single editable line of the block editor

use super::markdown::{self, RenderKind};

/// Whether a line shows its raw text or its rendered preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    #[default]
    Edit,
    Preview,
}

/// One editable unit of a document
#[derive(Debug, Clone, Default)]
pub struct Line {
    raw_text: String,
    rendered_html: String,
    render_kind: Option<RenderKind>,
    is_empty: bool,
    mode: LineMode,
    placeholder_visible: bool,
    /// Raw text changed since the last render
    stale: bool,
}

impl Line {
    /// Create an empty line in edit mode with its placeholder showing
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a line holding `text`, still in edit mode
    pub fn with_text(text: impl Into<String>) -> Self {
        let raw_text = text.into();
        let is_empty = raw_text.trim().is_empty();
        Self {
            placeholder_visible: raw_text.is_empty(),
            stale: !is_empty,
            raw_text,
            rendered_html: String::new(),
            render_kind: None,
            is_empty,
            mode: LineMode::Edit,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn rendered_html(&self) -> &str {
        &self.rendered_html
    }

    pub fn render_kind(&self) -> Option<RenderKind> {
        self.render_kind
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn mode(&self) -> LineMode {
        self.mode
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Replace the raw text. The preview is left as-is until the next render.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.is_empty = self.raw_text.trim().is_empty();
        self.placeholder_visible = self.raw_text.is_empty();
        self.stale = true;
    }

    /// Focus moved into the line
    pub fn enter_edit_mode(&mut self) {
        self.mode = LineMode::Edit;
        self.placeholder_visible = false;
    }

    /// Focus left the line
    pub fn exit_edit_mode(&mut self) {
        self.render();
    }

    /// Recompute the preview. Blank lines stay editable with their placeholder.
    pub fn render(&mut self) {
        match markdown::render_line(&self.raw_text) {
            Some((kind, html)) => {
                self.rendered_html = html;
                self.render_kind = Some(kind);
                self.mode = LineMode::Preview;
                self.placeholder_visible = false;
            }
            None => {
                self.mode = LineMode::Edit;
                self.placeholder_visible = true;
            }
        }
        self.stale = false;
    }
}
