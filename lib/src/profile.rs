use crate::finder::BOOKMARKS_FILE_NAME;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, MAIN_SEPARATOR};

/// Name of the profile a bookmark file belongs to: its directory relative to
/// the discovery root, with `/` between components on every platform.
///
/// A file sitting directly in the root takes the root directory's own name.
/// Roots without one (`.`, `/`) are resolved on disk first, and `Bookmarks`
/// is the last resort.
pub fn profile_name(root: &Path, bookmarks_file: &Path) -> String {
    let dir = bookmarks_file.parent().unwrap_or(bookmarks_file);

    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => root_name(root),
        Ok(rel) => join_components(rel),
        Err(_) => join_components(dir),
    }
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            fs::canonicalize(root)
                .ok()?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| BOOKMARKS_FILE_NAME.to_string())
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a comma separated profile list, turning platform separators into
/// `/`. Entries are not trimmed: profile directories may contain spaces.
pub fn split_profile_list(list: &str) -> Vec<String> {
    let normalized = if MAIN_SEPARATOR == '/' {
        list.to_string()
    } else {
        list.replace(MAIN_SEPARATOR, "/")
    };

    normalized.split(',').map(str::to_string).collect()
}

/// Which profiles make it into the output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl ProfileFilter {
    /// Parse a comma separated list such as `Default,Profile 1`.
    ///
    /// Platform separators become `/` and separators hugging a comma are
    /// dropped, so `Work\Profile 1\,Default` selects `Work/Profile 1` and
    /// `Default`. An empty list selects every profile.
    #[cfg(test)]
    pub fn parse(list: &str) -> Self {
        Self::from_names(split_profile_list(list))
    }

    /// Build a filter from individual names; empty names are ignored
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim_matches('/').to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if set.is_empty() {
            ProfileFilter::All
        } else {
            ProfileFilter::Only(set)
        }
    }

    /// Exact match against a derived profile name
    pub fn matches(&self, profile: &str) -> bool {
        match self {
            ProfileFilter::All => true,
            ProfileFilter::Only(names) => names.contains(profile),
        }
    }
}
