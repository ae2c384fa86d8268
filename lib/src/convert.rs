use crate::config::Options;
use crate::error::{Result, WarningSink};
use crate::finder::find_bookmark_files;
use crate::models::bookmark::BookmarkDocument;
use crate::profile::profile_name;
use crate::render::MarkdownRenderer;
use log::{debug, info};
use std::io::Write;

/// What a conversion run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Bookmark files found under the input directory
    pub discovered: usize,
    /// Profiles that passed the filter and were written
    pub rendered: usize,
}

/// Discover, parse and render every profile under `options.input` into `out`.
///
/// Nothing at all is written when no bookmark file is found. The first file
/// that cannot be read or decoded aborts the run.
pub fn convert(
    options: &Options,
    out: &mut dyn Write,
    warnings: &mut dyn WarningSink,
) -> Result<Summary> {
    let mut files = find_bookmark_files(&options.input, options.max_depth, warnings)?;
    files.sort();

    let mut summary = Summary {
        discovered: files.len(),
        rendered: 0,
    };
    if files.is_empty() {
        info!("No bookmark files under {}", options.input.display());
        return Ok(summary);
    }

    let renderer = MarkdownRenderer::new(&options.indent);
    renderer.write_header(out)?;

    for file in &files {
        let profile = profile_name(&options.input, file);
        if !options.profiles.matches(&profile) {
            debug!("Skipping profile '{}'", profile);
            continue;
        }

        let doc = BookmarkDocument::load(file)?;
        info!(
            "Rendering profile '{}' ({} nodes) from {}",
            profile,
            doc.node_count(),
            file.display()
        );
        renderer.render_profile(out, &doc, &profile, file, warnings)?;
        summary.rendered += 1;
    }

    Ok(summary)
}
