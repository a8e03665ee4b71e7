//! Import and export of documents as local files

use std::path::Path;

use anyhow::{Context, Result};

use super::block_editor::BlockEditor;
use super::document::UNTITLED;
use super::markdown;

/// Build a standalone HTML page from the editor lines.
///
/// Every line goes through the same rendering rule as the live preview;
/// blank lines become empty paragraphs so vertical spacing is kept.
/// Lines whose preview is current reuse it.
pub fn to_html(title: &str, editor: &BlockEditor) -> String {
    let title = if title.trim().is_empty() { UNTITLED } else { title };
    let mut body = String::new();

    for line in editor.lines() {
        let rendered = match line.render_kind() {
            Some(kind) if !line.is_stale() && !line.is_empty() => {
                Some((kind, line.rendered_html().to_string()))
            }
            _ => markdown::render_line(line.raw_text()),
        };
        match rendered {
            Some((markdown::RenderKind::Block, html)) => body.push_str(&html),
            Some((markdown::RenderKind::Inline, html)) => {
                body.push_str("<p>");
                body.push_str(&html);
                body.push_str("</p>\n");
            }
            None => body.push_str("<p></p>\n"),
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Write the serialized markdown of `editor` to `path`
pub fn export_markdown(path: &Path, editor: &BlockEditor) -> Result<()> {
    std::fs::write(path, editor.serialize())
        .with_context(|| format!("Failed to export: {}", path.display()))?;
    tracing::info!("Exported markdown to: {}", path.display());
    Ok(())
}

/// Write the HTML rendering of `editor` to `path`
pub fn export_html(path: &Path, title: &str, editor: &BlockEditor) -> Result<()> {
    std::fs::write(path, to_html(title, editor))
        .with_context(|| format!("Failed to export: {}", path.display()))?;
    tracing::info!("Exported HTML to: {}", path.display());
    Ok(())
}

/// Read a markdown/text file, returning the title derived from its name and
/// its content with line endings normalized to `\n`
pub fn import_file(path: &Path) -> Result<(String, String)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok((title, content.replace("\r\n", "\n")))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    if let Err(e) = pulldown_cmark_escape::escape_html(&mut escaped, text) {
        tracing::warn!("Failed to escape title: {}", e);
    }
    escaped
}
