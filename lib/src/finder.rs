use crate::error::{ChromemarkError, Result, Warning, WarningSink};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name Chromium-based browsers use for each profile's bookmark store
pub const BOOKMARKS_FILE_NAME: &str = "Bookmarks";

/// How many directory levels below the discovery root are searched
pub const DEFAULT_SEARCH_DEPTH: usize = 25;

/// Find every `Bookmarks` file under `root`, descending at most `max_depth`
/// directory levels.
///
/// Failing to list `root` itself is fatal. Failing to list a nested
/// directory is reported to `warnings` and that subtree is skipped. The
/// returned order is whatever the filesystem yields; callers sort.
pub fn find_bookmark_files(
    root: &Path,
    max_depth: usize,
    warnings: &mut dyn WarningSink,
) -> Result<Vec<PathBuf>> {
    let entries = list_dir(root).map_err(|e| ChromemarkError::io(root, e))?;

    let mut walker = Walker {
        warnings,
        found: Vec::new(),
        skipped: 0,
    };
    walker.visit(root, entries, max_depth);

    if walker.skipped > 0 {
        debug!(
            "Skipped {} unreadable director{} under {}",
            walker.skipped,
            if walker.skipped == 1 { "y" } else { "ies" },
            root.display()
        );
    }
    debug!(
        "Found {} bookmark file(s) under {}",
        walker.found.len(),
        root.display()
    );

    Ok(walker.found)
}

struct Walker<'a> {
    warnings: &'a mut dyn WarningSink,
    found: Vec<PathBuf>,
    skipped: usize,
}

struct Entry {
    name: std::ffi::OsString,
    is_dir: bool,
}

impl Walker<'_> {
    fn visit(&mut self, dir: &Path, entries: Vec<Entry>, depth: usize) {
        if depth == 0 {
            if let Some(entry) = entries
                .iter()
                .find(|e| !e.is_dir && e.name == BOOKMARKS_FILE_NAME)
            {
                self.found.push(dir.join(&entry.name));
            }
            return;
        }

        for entry in entries {
            let path = dir.join(&entry.name);
            if entry.is_dir {
                match list_dir(&path) {
                    Ok(children) => self.visit(&path, children, depth - 1),
                    Err(source) => {
                        self.skipped += 1;
                        self.warnings
                            .warn(Warning::UnreadableDirectory { path, source });
                    }
                }
            } else if entry.name == BOOKMARKS_FILE_NAME {
                self.found.push(path);
            }
        }
    }
}

fn list_dir(dir: &Path) -> io::Result<Vec<Entry>> {
    fs::read_dir(dir)?
        .map(|entry| {
            let entry = entry?;
            Ok(Entry {
                name: entry.file_name(),
                is_dir: entry.file_type()?.is_dir(),
            })
        })
        .collect()
}
