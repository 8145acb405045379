use crate::error::{DecodeError, ProfileError};
use crate::model::ProfileList;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read-only view of the client's most-recently-used profile list.
///
/// Every call reads the file afresh; nothing is cached between refreshes.
pub struct ProfileStore {
    path: Option<PathBuf>,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store for a user without a home directory. Always empty.
    pub fn unlocated() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current profile list. Any failure degrades to an empty list.
    pub fn load_entries(&self) -> ProfileList {
        match self.read() {
            Ok(entries) => {
                debug!(count = entries.len(), "loaded recent profiles");
                entries
            }
            Err(e) => {
                warn!(error = %e, "no recent profiles");
                Vec::new()
            }
        }
    }

    pub fn read(&self) -> Result<ProfileList, ProfileError> {
        let path = self.path.as_deref().ok_or(ProfileError::NoHome)?;
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode(&text).map_err(|source| ProfileError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Decodes MRU text: a JSON array whose elements are all strings.
pub fn decode(text: &str) -> Result<ProfileList, DecodeError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        other => return Err(DecodeError::NotAnArray(kind_of(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(path) => Ok(path),
            _ => Err(DecodeError::NonStringEntry { index }),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mru.tsc");
        fs::write(&path, contents).unwrap();
        (dir, ProfileStore::new(path))
    }

    #[test]
    fn returns_paths_in_file_order() {
        let (_dir, store) = store_with(
            r#"["/home/u/.tsclient/work.rdp", "/home/u/.tsclient/home.rdp", "/a.rdp"]"#,
        );
        assert_eq!(
            store.load_entries(),
            vec![
                "/home/u/.tsclient/work.rdp",
                "/home/u/.tsclient/home.rdp",
                "/a.rdp"
            ]
        );
    }

    #[test]
    fn keeps_duplicates_and_multiline_layout() {
        let (_dir, store) = store_with("[\n  \"/b.rdp\",\n  \"/a.rdp\",\n  \"/b.rdp\"\n]\n");
        assert_eq!(store.load_entries(), vec!["/b.rdp", "/a.rdp", "/b.rdp"]);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("mru.tsc"));

        assert!(store.load_entries().is_empty());
        assert!(matches!(store.read(), Err(ProfileError::Io { .. })));
    }

    #[test]
    fn invalid_json_is_empty() {
        let (_dir, store) = store_with("{not json");

        assert!(store.load_entries().is_empty());
        assert!(matches!(
            store.read(),
            Err(ProfileError::Decode {
                source: DecodeError::Json(_),
                ..
            })
        ));
    }

    #[test]
    fn non_array_json_is_empty() {
        let (_dir, store) = store_with(r#"{"a":1}"#);

        assert!(store.load_entries().is_empty());
        assert!(matches!(
            store.read(),
            Err(ProfileError::Decode {
                source: DecodeError::NotAnArray("an object"),
                ..
            })
        ));
    }

    #[test]
    fn non_string_element_rejects_whole_list() {
        let (_dir, store) = store_with(r#"["/ok.rdp", 42, "/also-ok.rdp"]"#);

        assert!(store.load_entries().is_empty());
        assert!(matches!(
            store.read(),
            Err(ProfileError::Decode {
                source: DecodeError::NonStringEntry { index: 1 },
                ..
            })
        ));
    }

    #[test]
    fn empty_array_is_empty() {
        let (_dir, store) = store_with("[]");
        assert!(store.load_entries().is_empty());
    }

    #[test]
    fn legacy_line_format_is_not_accepted() {
        let (_dir, store) = store_with("server1\nserver2\n");
        assert!(store.load_entries().is_empty());
    }

    #[test]
    fn leading_bom_is_ignored() {
        assert_eq!(decode("\u{feff}[\"/p1\"]").unwrap(), vec!["/p1"]);
    }

    #[test]
    fn unlocated_store_is_empty() {
        let store = ProfileStore::unlocated();
        assert!(store.path().is_none());
        assert!(store.load_entries().is_empty());
        assert!(matches!(store.read(), Err(ProfileError::NoHome)));
    }

    #[test]
    fn reads_fresh_contents_each_time() {
        let (dir, store) = store_with(r#"["/first.rdp"]"#);
        assert_eq!(store.load_entries(), vec!["/first.rdp"]);

        fs::write(dir.path().join("mru.tsc"), r#"["/second.rdp"]"#).unwrap();
        assert_eq!(store.load_entries(), vec!["/second.rdp"]);
    }
}
