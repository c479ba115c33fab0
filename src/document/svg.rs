use std::ops::Range;
use std::path::Path;

use anyhow::Context as _;
use roxmltree::{Node, ParsingOptions};

use crate::document::drawing::Drawing;
use crate::document::style::StylePatch;
use crate::foundation::error::{WobbleError, WobbleResult};

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Text(String),
    Path(usize),
    Style,
}

enum Slot {
    Path,
    Style,
}

/// SVG text split around its editable parts.
///
/// Editable parts are the `d` attribute of every `<path>` element, in document order, and the
/// content of the first `<style>` element. Only real elements count: markup inside comments or
/// CDATA sections is plain text. Everything else round-trips byte for byte.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    pieces: Vec<Piece>,
    paths: Vec<String>,
    style: Option<String>,
}

impl SvgDocument {
    /// Split SVG text. Text that is not well-formed XML is a [`WobbleError::Document`];
    /// markup without paths simply has no shapes.
    pub fn parse(text: &str) -> WobbleResult<Self> {
        let opts = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| WobbleError::document(format!("malformed SVG: {e}")))?;

        let mut slots: Vec<(Range<usize>, Slot)> = Vec::new();
        let mut style_seen = false;
        for node in xml.descendants().filter(|n| n.is_element()) {
            if node.has_tag_name("path") {
                if let Some(d) = node.attribute_node("d") {
                    slots.push((d.range_value(), Slot::Path));
                }
            } else if !style_seen && node.has_tag_name("style") {
                style_seen = true;
                if let Some(content) = element_content(text, node) {
                    slots.push((content, Slot::Style));
                }
            }
        }

        slots.sort_by_key(|(r, _)| r.start);

        let mut pieces = Vec::with_capacity(slots.len() * 2 + 1);
        let mut paths = Vec::new();
        let mut style = None;
        let mut cursor = 0;
        for (range, slot) in slots {
            if range.start < cursor {
                continue;
            }
            pieces.push(Piece::Text(text[cursor..range.start].to_string()));
            let value = text[range.clone()].to_string();
            match slot {
                Slot::Path => {
                    pieces.push(Piece::Path(paths.len()));
                    paths.push(value);
                }
                Slot::Style => {
                    pieces.push(Piece::Style);
                    style = Some(value);
                }
            }
            cursor = range.end;
        }
        pieces.push(Piece::Text(text[cursor..].to_string()));

        Ok(Self {
            pieces,
            paths,
            style,
        })
    }

    /// Read and split an SVG file.
    pub fn from_path(path: &Path) -> WobbleResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read document '{}'", path.display()))?;
        Self::parse(&text).map_err(|e| match e {
            WobbleError::Document(msg) => {
                WobbleError::document(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Reassemble the SVG text with the current geometry and style text.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(t) => out.push_str(t),
                Piece::Path(i) => out.push_str(&self.paths[*i]),
                Piece::Style => out.push_str(self.style.as_deref().unwrap_or_default()),
            }
        }
        out
    }

    /// Write the reassembled SVG text, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> WobbleResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.to_svg_string())
            .with_context(|| format!("write document '{}'", path.display()))?;
        Ok(())
    }

    /// Content of the first `<style>` element, if any.
    pub fn style_text(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Apply a stylesheet patch to the first `<style>` element.
    ///
    /// Returns `false` (and leaves the document alone) when there is no `<style>` element.
    pub fn apply_style(&mut self, patch: &StylePatch) -> bool {
        match &mut self.style {
            Some(css) => {
                *css = patch.apply_to_element_text(css);
                true
            }
            None => {
                tracing::warn!("document has no <style> element; stylesheet patch skipped");
                false
            }
        }
    }
}

/// Byte span between an element's start and end tags. `None` for a self-closing element.
fn element_content(text: &str, node: Node<'_, '_>) -> Option<Range<usize>> {
    let outer = node.range();
    let end = outer.start + text[outer.clone()].rfind("</")?;
    let start = node.first_child().map_or(end, |c| c.range().start);
    Some(start..end)
}

impl Drawing for SvgDocument {
    fn shape_count(&self) -> usize {
        self.paths.len()
    }

    fn geometry(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    fn set_geometry(&mut self, index: usize, d: &str) -> WobbleResult<()> {
        let slot = self
            .paths
            .get_mut(index)
            .ok_or_else(|| WobbleError::document(format!("no <path> at index {index}")))?;
        d.clone_into(slot);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/svg.rs"]
mod tests;
