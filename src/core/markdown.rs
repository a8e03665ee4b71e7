//! Markdown rendering for editor lines
//!
//! A line is rendered as inline markdown unless it starts with a block-level
//! marker, in which case the full block renderer is used so that headings,
//! lists and quotes come out with their block markup.

use std::sync::OnceLock;

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use regex_lite::Regex;

/// How a line was rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Inline,
    Block,
}

/// Parser options shared by both render paths (GFM flavour)
fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn ordered_list_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("ordered list pattern is valid"))
}

/// Decide which renderer a (trimmed) line needs
pub fn render_kind(text: &str) -> RenderKind {
    let text = text.trim();
    let block = text.starts_with('#')
        || text.starts_with('-')
        || text.starts_with('*')
        || text.starts_with('>')
        || text.starts_with("```")
        || ordered_list_marker().is_match(text);

    if block {
        RenderKind::Block
    } else {
        RenderKind::Inline
    }
}

/// Render a single editor line to HTML.
///
/// Returns `None` for blank text: blank lines never get a preview.
pub fn render_line(text: &str) -> Option<(RenderKind, String)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let kind = render_kind(text);
    let html = match kind {
        RenderKind::Inline => render_inline(text),
        RenderKind::Block => render_block(text),
    };
    Some((kind, html))
}

/// Render markdown with block structure (headings, lists, quotes, code)
pub fn render_block(text: &str) -> String {
    let parser = Parser::new_ext(text, options()).map(hard_breaks);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Render only the inline markup of `text`, dropping every block wrapper
pub fn render_inline(text: &str) -> String {
    let parser = Parser::new_ext(text, options())
        .filter(|event| match event {
            Event::Start(tag) => is_inline_tag(tag),
            Event::End(end) => is_inline_end(end),
            _ => true,
        })
        .map(hard_breaks);

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}

fn hard_breaks(event: Event<'_>) -> Event<'_> {
    match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    }
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}
