use crate::error::{ChromemarkError, Result, Warning, WarningSink};
use crate::models::bookmark::{BookmarkDocument, BookmarkNode};
use std::io::Write;
use std::path::Path;

/// Deepest folder nesting the renderer will follow before giving up
pub const MAX_RENDER_DEPTH: usize = 256;

/// Default indent unit, one tab per level
pub const DEFAULT_INDENT: &str = "\t";

/// Opening lines of every generated document
pub const DOCUMENT_HEADER: &str = concat!(
    "# Chrome bookmarks\n",
    "\n",
    "> This document was automatically generated by chromemark ",
    env!("CARGO_PKG_VERSION"),
    ".\n",
    "\n",
);

/// Writes bookmark trees as nested markdown lists
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    indent: String,
    max_depth: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl MarkdownRenderer {
    pub fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
            max_depth: MAX_RENDER_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn write_header(&self, w: &mut dyn Write) -> Result<()> {
        w.write_all(DOCUMENT_HEADER.as_bytes())?;
        Ok(())
    }

    /// Render one profile section: heading, one bullet per node, blank line.
    ///
    /// `source` only labels warnings and errors.
    pub fn render_profile(
        &self,
        w: &mut dyn Write,
        doc: &BookmarkDocument,
        profile: &str,
        source: &Path,
        warnings: &mut dyn WarningSink,
    ) -> Result<()> {
        if !doc.is_supported_version() {
            warnings.warn(Warning::UnknownVersion {
                path: source.to_path_buf(),
                version: doc.version,
            });
        }

        writeln!(w, "## Profile {}", profile)?;
        for (key, root) in doc.ordered_roots() {
            log::debug!("Rendering root '{}' of profile '{}'", key, profile);
            self.render_node(w, root, "", 0, source)?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_node(
        &self,
        w: &mut dyn Write,
        node: &BookmarkNode,
        prefix: &str,
        depth: usize,
        source: &Path,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(ChromemarkError::TooDeep {
                path: source.to_path_buf(),
                limit: self.max_depth,
            });
        }

        if node.is_link() {
            writeln!(w, "{}- [{}]({})", prefix, node.name, node.url)?;
        } else {
            writeln!(w, "{}- {}", prefix, node.name)?;
        }

        if node.children.is_empty() {
            return Ok(());
        }

        let child_prefix = format!("{}{}", prefix, self.indent);
        for child in &node.children {
            self.render_node(w, child, &child_prefix, depth + 1, source)?;
        }
        Ok(())
    }

    /// Convenience wrapper returning the section as a string
    #[cfg(test)]
    pub fn render_to_string(
        &self,
        doc: &BookmarkDocument,
        profile: &str,
        source: &Path,
        warnings: &mut dyn WarningSink,
    ) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.render_profile(&mut buf, doc, profile, source, warnings)?;
        String::from_utf8(buf).map_err(|e| ChromemarkError::InvalidInput(e.to_string()))
    }
}
