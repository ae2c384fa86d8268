use crate::error::{ChromemarkError, Result};
use crate::render::MAX_RENDER_DEPTH;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The only bookmark file format version this tool knows about
pub const SUPPORTED_VERSION: i64 = 1;

/// Root categories in the order the browser shows them
pub const CANONICAL_ROOTS: [&str; 4] = ["bookmark_bar", "other", "synced", "mobile"];

/// Deepest `{`/`[` nesting accepted in a bookmark file. Every folder level
/// costs two (the node object and its `children` array), on top of the
/// document and `roots` objects and small extras like `meta_info`.
pub const MAX_JSON_NESTING: usize = 2 * MAX_RENDER_DEPTH + 8;

/// One parsed `Bookmarks` file
///
/// Unknown fields such as `checksum` or `sync_metadata` are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BookmarkDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roots: BTreeMap<String, BookmarkNode>,
}

/// Declared node type; only a hint, see [`BookmarkNode::is_link`]
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Url,
    #[default]
    Folder,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BookmarkNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: NodeKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<BookmarkNode>,
}

/// `null` reads the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BookmarkNode {
    pub fn folder(name: &str, children: Vec<BookmarkNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Folder,
            url: String::new(),
            children,
        }
    }

    pub fn link(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Url,
            url: url.to_string(),
            children: Vec::new(),
        }
    }

    /// A node is rendered as a link exactly when it carries a url,
    /// whatever its declared kind says.
    pub fn is_link(&self) -> bool {
        !self.url.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(BookmarkNode::count).sum::<usize>()
    }
}

impl BookmarkDocument {
    /// Decode a document from raw bytes. The buffer is used as scratch space.
    ///
    /// Decoding recurses once per nesting level; untrusted input goes
    /// through [`BookmarkDocument::load`], which bounds it first.
    pub(crate) fn from_slice(bytes: &mut [u8]) -> std::result::Result<Self, simd_json::Error> {
        simd_json::serde::from_slice(bytes)
    }

    /// Read and decode a `Bookmarks` file
    ///
    /// Files nested deeper than [`MAX_JSON_NESTING`] are rejected with
    /// [`ChromemarkError::TooDeep`] before decoding starts.
    pub fn load(path: &Path) -> Result<Self> {
        let mut content = fs::read(path).map_err(|e| ChromemarkError::io(path, e))?;
        if exceeds_nesting(&content, MAX_JSON_NESTING) {
            return Err(ChromemarkError::TooDeep {
                path: path.to_path_buf(),
                limit: MAX_RENDER_DEPTH,
            });
        }
        Self::from_slice(&mut content).map_err(|e| ChromemarkError::json(path, e))
    }

    pub fn is_supported_version(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }

    /// Roots in a stable order: the canonical categories first, then any
    /// other keys alphabetically.
    pub fn ordered_roots(&self) -> Vec<(&str, &BookmarkNode)> {
        let mut ordered: Vec<(&str, &BookmarkNode)> = CANONICAL_ROOTS
            .iter()
            .filter_map(|key| self.roots.get_key_value(*key))
            .map(|(k, v)| (k.as_str(), v))
            .collect();

        ordered.extend(
            self.roots
                .iter()
                .filter(|(k, _)| !CANONICAL_ROOTS.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v)),
        );

        ordered
    }

    /// Total number of nodes across every root
    pub fn node_count(&self) -> usize {
        self.roots.values().map(BookmarkNode::count).sum()
    }
}

/// Whether `{`/`[` nesting in `bytes` goes past `limit`. Brackets inside
/// strings don't count; malformed input is left for the decoder to report.
fn exceeds_nesting(bytes: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in bytes {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> BookmarkDocument {
        let mut bytes = serde_json::to_vec(&value).unwrap();
        BookmarkDocument::from_slice(&mut bytes).unwrap()
    }

    #[test]
    fn test_parse_chrome_export() {
        let doc = parse(json!({
            "checksum": "e68417696614de65818e666d48227636",
            "roots": {
                "bookmark_bar": {
                    "children": [
                        {
                            "date_added": "13245678900000000",
                            "id": "1",
                            "name": "Google",
                            "type": "url",
                            "url": "https://www.google.com/"
                        }
                    ],
                    "id": "1",
                    "name": "Bookmarks Bar",
                    "type": "folder"
                },
                "other": { "children": [], "name": "Other Bookmarks", "type": "folder" }
            },
            "version": 1
        }));

        assert!(doc.is_supported_version());
        assert_eq!(doc.roots.len(), 2);
        let bar = &doc.roots["bookmark_bar"];
        assert_eq!(bar.name, "Bookmarks Bar");
        assert_eq!(bar.kind, NodeKind::Folder);
        assert_eq!(bar.children[0].url, "https://www.google.com/");
        assert_eq!(doc.node_count(), 3);
    }

    #[test]
    fn test_missing_fields_default() {
        let doc = parse(json!({ "roots": { "x": { "type": "separator" } } }));
        assert_eq!(doc.version, 0);
        assert!(!doc.is_supported_version());
        let node = &doc.roots["x"];
        assert_eq!(node.kind, NodeKind::Unknown);
        assert!(node.name.is_empty());
        assert!(node.children.is_empty());
        assert!(!node.is_link());
    }

    #[test]
    fn test_url_overrides_declared_kind() {
        let node = BookmarkNode {
            name: "odd".to_string(),
            kind: NodeKind::Folder,
            url: "https://example.com".to_string(),
            children: Vec::new(),
        };
        assert!(node.is_link());

        let empty = BookmarkNode {
            kind: NodeKind::Url,
            ..BookmarkNode::default()
        };
        assert!(!empty.is_link());
    }

    #[test]
    fn test_ordered_roots_canonical_then_alphabetical() {
        let mut doc = BookmarkDocument::default();
        for key in ["zeta", "synced", "alpha", "other", "bookmark_bar"] {
            doc.roots
                .insert(key.to_string(), BookmarkNode::folder(key, Vec::new()));
        }

        let keys: Vec<&str> = doc.ordered_roots().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["bookmark_bar", "other", "synced", "alpha", "zeta"]);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let mut bytes = br#"{"version":1,"roots":{"#.to_vec();
        assert!(BookmarkDocument::from_slice(&mut bytes).is_err());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let doc = parse(json!({
            "version": 1,
            "roots": {
                "other": { "name": null, "type": null, "url": null, "children": null },
                "synced": { "name": "Synced", "url": null, "children": [{ "name": null }] }
            }
        }));
        let other = &doc.roots["other"];
        assert!(other.name.is_empty());
        assert_eq!(other.kind, NodeKind::Folder);
        assert!(!other.is_link());
        assert!(other.children.is_empty());

        let synced = &doc.roots["synced"];
        assert_eq!(synced.name, "Synced");
        assert_eq!(synced.children, vec![BookmarkNode::default()]);
        assert_eq!(doc.node_count(), 3);
    }

    /// A document whose `other` root holds `levels` nested folders above one link
    fn nested_bookmarks(levels: usize) -> String {
        let mut s = String::from(r#"{"version":1,"roots":{"other":"#);
        for _ in 0..levels {
            s.push_str(r#"{"name":"a","type":"folder","children":["#);
        }
        s.push_str(r#"{"name":"leaf","type":"url","url":"https://leaf"}"#);
        for _ in 0..levels {
            s.push_str("]}");
        }
        s.push_str("}}");
        s
    }

    #[test]
    fn test_load_rejects_deep_nesting_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        fs::write(&path, nested_bookmarks(10_000)).unwrap();

        match BookmarkDocument::load(&path) {
            Err(ChromemarkError::TooDeep { path: reported, limit }) => {
                assert_eq!(reported, path);
                assert_eq!(limit, MAX_RENDER_DEPTH);
            }
            other => panic!("expected TooDeep, got {:?}", other),
        }
    }

    #[test]
    fn test_load_accepts_moderate_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        fs::write(&path, nested_bookmarks(64)).unwrap();

        let doc = BookmarkDocument::load(&path).unwrap();
        assert_eq!(doc.node_count(), 65);
    }

    #[test]
    fn test_nesting_scan_ignores_brackets_in_strings() {
        let name = "[{".repeat(1_000);
        let text = format!(r#"{{"roots":{{"other":{{"name":"{}\"[{{"}}}}}}"#, name);
        assert!(!exceeds_nesting(text.as_bytes(), 3));
        assert!(exceeds_nesting(text.as_bytes(), 2));
        assert!(exceeds_nesting(b"[[[[", 3));
        assert!(!exceeds_nesting(b"[[[]]]", 3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BookmarkDocument::load(&dir.path().join("Bookmarks")).unwrap_err();
        assert!(matches!(err, ChromemarkError::Io { .. }));
    }
}
