//! Aggregation Invariant Tests
//!
//! - Output length equals the total record count across source files
//! - Output is sorted by case-insensitive name
//! - Re-aggregating the output reproduces it
//! - Text is escaped in the YAML output and in the HTML table
//! - The HTML step never fails a run

use std::fs;
use std::path::Path;

use restaurant_data::aggregate::{
    self, load_entries, sort_key, AggregateOptions, HtmlOutcome, HtmlSkipReason,
};
use restaurant_data::config::Config;
use serde_yaml::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_repo(files: &[(&str, &str)]) -> (TempDir, Config) {
    let tmp = TempDir::new().unwrap();
    let sources = tmp.path().join("data").join("restaurants");
    fs::create_dir_all(&sources).unwrap();
    fs::create_dir_all(tmp.path().join("docs")).unwrap();
    for (name, content) in files {
        fs::write(sources.join(name), content).unwrap();
    }
    let config = Config::default().resolve(tmp.path());
    (tmp, config)
}

fn read_output(path: &Path) -> Vec<Value> {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn names(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.get("name").and_then(Value::as_str).unwrap_or("").to_string())
        .collect()
}

fn exts() -> Vec<String> {
    vec!["yaml".to_string()]
}

// =============================================================================
// Count and Order
// =============================================================================

/// Output holds every record from every file.
#[test]
fn test_output_length_equals_total_records() {
    let (_tmp, config) = setup_repo(&[
        ("one.yaml", "name: Solo\n"),
        ("many.yaml", "- name: First\n- name: second\n- name: Third\n"),
        ("none.yaml", "[]\n"),
    ]);

    let report = aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert_eq!(report.entries, 4);
    assert_eq!(read_output(&config.aggregate_path).len(), 4);
}

/// Adjacent outputs are in non-decreasing lowercased name order.
#[test]
fn test_output_sorted_case_insensitively() {
    let (_tmp, config) = setup_repo(&[
        ("a.yaml", "- name: delta\n- name: Bravo\n"),
        ("b.yaml", "- name: alpha\n- name: CHARLIE\n- town: Nameless\n"),
    ]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    let entries = read_output(&config.aggregate_path);

    for pair in entries.windows(2) {
        assert!(sort_key(&pair[0]) <= sort_key(&pair[1]));
    }
    assert_eq!(names(&entries), vec!["", "alpha", "Bravo", "CHARLIE", "delta"]);
}

/// Mapping file and list file merge into name order.
#[test]
fn test_single_record_and_list_files() {
    let (_tmp, config) = setup_repo(&[
        ("zed.yaml", "name: Zed's\ncuisine: Diner\n"),
        ("ana.yaml", "- name: Ana's Cafe\n  cuisine: Cafe\n"),
    ]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert_eq!(
        names(&read_output(&config.aggregate_path)),
        vec!["Ana's Cafe", "Zed's"]
    );
}

/// Records with equal names keep file order, then in-file order.
#[test]
fn test_equal_names_keep_load_order() {
    let (_tmp, config) = setup_repo(&[
        ("b.yaml", "- {name: Same, town: b1}\n- {name: same, town: b2}\n"),
        ("a.yaml", "name: SAME\ntown: a1\n"),
    ]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    let towns: Vec<_> = read_output(&config.aggregate_path)
        .iter()
        .map(|e| e.get("town").and_then(Value::as_str).unwrap().to_string())
        .collect();
    assert_eq!(towns, vec!["a1", "b1", "b2"]);
}

// =============================================================================
// Idempotence
// =============================================================================

/// Feeding the output back as a single source file reproduces it exactly.
#[test]
fn test_reaggregation_is_idempotent() {
    let (_tmp, config) = setup_repo(&[
        ("x.yaml", "- name: Étoile\n  town: Montréal\n  tags: [yes, no, '2024-01-01']\n"),
        ("y.yaml", "- name: bistro\n  price: $$\n  notes: \"a: b # c\"\n"),
        ("z.yaml", "name: Aardvark\nhours:\n  mon: closed\n  tue: 9:00-17:00\n"),
    ]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    let first_text = fs::read_to_string(&config.aggregate_path).unwrap();
    let first = read_output(&config.aggregate_path);

    let second_src = TempDir::new().unwrap();
    fs::write(second_src.path().join("all.yaml"), &first_text).unwrap();
    let second = load_entries(second_src.path(), &exts()).unwrap();

    assert_eq!(second, first);

    let second_text = restaurant_data::emit::sequence_to_yaml(&second).unwrap();
    assert_eq!(second_text, first_text);
}

// =============================================================================
// Output Encoding
// =============================================================================

/// Non-ASCII text is escaped on disk and restored on read.
#[test]
fn test_non_ascii_escaped_in_output() {
    let (_tmp, config) = setup_repo(&[("cafe.yaml", "name: Café Ñandú\nkey order: kept\n")]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    let text = fs::read_to_string(&config.aggregate_path).unwrap();

    assert!(text.is_ascii());
    assert!(text.contains("\\xE9"));
    assert_eq!(names(&read_output(&config.aggregate_path)), vec!["Café Ñandú"]);
    assert!(text.find("name:").unwrap() < text.find("key order:").unwrap());
}

/// Both YAML outputs carry identical bytes.
#[test]
fn test_docs_copy_matches_canonical() {
    let (_tmp, config) = setup_repo(&[("a.yaml", "name: A\n")]);

    aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert_eq!(
        fs::read(&config.aggregate_path).unwrap(),
        fs::read(&config.docs_path).unwrap()
    );
}

// =============================================================================
// HTML Table
// =============================================================================

/// Record text is escaped when inserted into the page.
#[test]
fn test_html_cells_are_escaped() {
    let (tmp, config) = setup_repo(&[(
        "ab.yaml",
        "name: A & B\ntown: <script>\nneighborhood: \"O'Hare\"\ncategories: [Pub, Grill]\ncuisine: American\nprice: $$\n",
    )]);
    let page = tmp.path().join("docs").join("index.html");
    fs::write(
        &page,
        "<body>\n<!-- restaurants:start -->\n<!-- restaurants:end -->\n</body>\n",
    )
    .unwrap();

    let report = aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert!(matches!(report.html, HtmlOutcome::Written { rows: 1, .. }));

    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains(
        "<tr><td>A &amp; B</td><td>&lt;script&gt;</td><td>O&#39;Hare</td><td>Pub, Grill</td><td>American</td><td>$$</td></tr>"
    ));
    assert!(!html.contains("A & B"));
    assert!(html.starts_with("<body>\n<!-- restaurants:start -->\n"));
    assert!(html.ends_with("<!-- restaurants:end -->\n</body>\n"));
}

/// A page without the marker pair is left alone and the run succeeds.
#[test]
fn test_html_without_markers_is_skipped() {
    let (tmp, config) = setup_repo(&[("a.yaml", "name: A\n")]);
    let page = tmp.path().join("docs").join("index.html");
    fs::write(&page, "<!-- restaurants:start --> only\n").unwrap();

    let report = aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert!(matches!(report.html, HtmlOutcome::Skipped { .. }));
    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        "<!-- restaurants:start --> only\n"
    );
}

/// A page that is not UTF-8 is skipped; the YAML outputs still stand.
#[test]
fn test_unreadable_html_page_does_not_fail_run() {
    let (tmp, config) = setup_repo(&[("a.yaml", "name: A\n")]);
    let page = tmp.path().join("docs").join("index.html");
    fs::write(&page, b"<p>caf\xe9</p>\n").unwrap();

    let report = aggregate::run(&config, AggregateOptions::default()).unwrap();
    assert!(matches!(
        report.html,
        HtmlOutcome::Skipped { reason: HtmlSkipReason::Unreadable, .. }
    ));
    assert!(report.lines().last().unwrap().contains("could not be read"));
    assert_eq!(read_output(&config.aggregate_path).len(), 1);
    assert_eq!(fs::read(&page).unwrap(), b"<p>caf\xe9</p>\n");
}
