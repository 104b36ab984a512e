//! Source directory loading and ordering
//!
//! Files are read in lexicographic path order; records keep file order.
//! The final sort is stable on the lowercased `name`, so equal names stay
//! in load order.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::errors::{AggregateError, AggregateResult};
use crate::emit::type_name;
use crate::observability::{log_event_with_fields, Event};

/// Lists regular, non-hidden files in `dir` whose extension is one of
/// `extensions`, sorted by path.
pub fn list_source_files(dir: &Path, extensions: &[String]) -> AggregateResult<Vec<PathBuf>> {
    let read_dir_err = |source| AggregateError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(true, |n| n.starts_with('.'));
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| extensions.iter().any(|x| x == e));

        if !hidden && wanted && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads one source file: a mapping yields one record, a sequence of
/// mappings yields each of them. Anything else is fatal.
pub fn load_source_file(path: &Path) -> AggregateResult<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|source| AggregateError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|source| AggregateError::ParseSource {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = |found| AggregateError::InvalidShape {
        path: path.to_path_buf(),
        found,
    };

    match value {
        Value::Mapping(_) => Ok(vec![value]),
        Value::Sequence(items) => {
            if let Some(bad) = items.iter().find(|item| !item.is_mapping()) {
                return Err(invalid(type_name(bad)));
            }
            Ok(items)
        }
        other => Err(invalid(type_name(&other))),
    }
}

/// Loads every source file under `dir` and returns all records sorted.
pub fn load_entries(dir: &Path, extensions: &[String]) -> AggregateResult<Vec<Value>> {
    let mut entries = Vec::new();

    for path in list_source_files(dir, extensions)? {
        let records = load_source_file(&path)?;
        let shown = path.display().to_string();
        let count = records.len().to_string();
        log_event_with_fields(
            Event::SourceFileLoaded,
            &[("path", shown.as_str()), ("records", count.as_str())],
        );
        entries.extend(records);
    }

    sort_entries(&mut entries);
    let count = entries.len().to_string();
    log_event_with_fields(Event::EntriesSorted, &[("entries", count.as_str())]);

    Ok(entries)
}

/// Stable sort by lowercased name.
pub fn sort_entries(entries: &mut [Value]) {
    entries.sort_by_cached_key(sort_key);
}

/// Lowercased `name`; missing or null names sort as the empty string.
pub fn sort_key(entry: &Value) -> String {
    match entry.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => type_name(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["yaml".to_string()]
    }

    fn names(entries: &[Value]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e.get("name").and_then(Value::as_str).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_lists_only_matching_visible_files_in_order() {
        let dir = TempDir::new().unwrap();
        for name in ["b.yaml", "a.yaml", ".hidden.yaml", "notes.txt", "c.yml"] {
            fs::write(dir.path().join(name), "name: x\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.yaml")).unwrap();

        let files = list_source_files(dir.path(), &exts()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_mapping_and_list_files_flatten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zed.yaml"), "name: Zed's\n").unwrap();
        fs::write(dir.path().join("ana.yaml"), "- name: Ana's Cafe\n").unwrap();

        let entries = load_entries(dir.path(), &exts()).unwrap();
        assert_eq!(names(&entries), vec!["Ana's Cafe", "Zed's"]);
    }

    #[test]
    fn test_empty_list_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.yaml"), "[]\n").unwrap();
        assert!(load_entries(dir.path(), &exts()).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "just text\n").unwrap();

        let err = load_source_file(&path).unwrap_err();
        assert!(matches!(err, AggregateError::InvalidShape { found: "string", .. }));
    }

    #[test]
    fn test_empty_document_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.yaml");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            load_source_file(&path),
            Err(AggregateError::InvalidShape { found: "null", .. })
        ));
    }

    #[test]
    fn test_list_with_non_mapping_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.yaml");
        fs::write(&path, "- name: ok\n- 7\n").unwrap();

        assert!(matches!(
            load_source_file(&path),
            Err(AggregateError::InvalidShape { found: "int", .. })
        ));
    }

    #[test]
    fn test_unparsable_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "name: [unclosed\n").unwrap();

        assert!(matches!(
            load_source_file(&path),
            Err(AggregateError::ParseSource { .. })
        ));
    }

    #[test]
    fn test_sort_is_case_insensitive_and_missing_name_first() {
        let mut entries: Vec<Value> = serde_yaml::from_str(
            "- name: banana\n- name: Apple\n- town: Nowhere\n- name: cherry\n- name: null\n",
        )
        .unwrap();
        sort_entries(&mut entries);
        assert_eq!(names(&entries), vec!["", "", "Apple", "banana", "cherry"]);
        assert_eq!(entries[0].get("town").and_then(Value::as_str), Some("Nowhere"));
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut entries: Vec<Value> = serde_yaml::from_str(
            "- {name: Diner, town: first}\n- {name: DINER, town: second}\n- {name: diner, town: third}\n",
        )
        .unwrap();
        sort_entries(&mut entries);
        let towns: Vec<_> = entries
            .iter()
            .map(|e| e.get("town").and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(towns, vec!["first", "second", "third"]);
    }
}
