use std::fs;
use std::path::Path;

use djson::{DJson, Options, Value};
use rstest::rstest;
use tempfile::TempDir;

fn write_document(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(format!("{name}.json")), contents).expect("Failed to write document");
}

fn dump_of(dir: &Path, name: &str) -> String {
    DJson::new(dir.join(name), Options::default())
        .expect("Failed to scan")
        .dump()
}

#[test]
fn empty_target_dumps_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert_eq!(dump_of(dir.path(), "empty_file"), "");
}

#[rstest]
#[case::single_file_object(
    r#"{"name1": "value1", "name2": "value2", "name3": "value3"}"#,
    ". name1: value1\n. name2: value2\n. name3: value3\n"
)]
#[case::single_file_objarr(
    r#"{"name1": "value1", "name2": "value2", "name3": "value3",
        "arr": ["element1", "element2", "element3"]}"#,
    ". name1: value1\n. name2: value2\n. name3: value3\n. arr: \n. . #0: element1\n. . #1: element2\n. . #2: element3\n"
)]
#[case::single_file_array(
    r#"["element1", "element2", "element3"]"#,
    ". #0: element1\n. #1: element2\n. #2: element3\n"
)]
#[case::single_file_arrobj(
    r#"[{"name": "object1", "title": "Object one"},
        {"name": "object1", "title": "Object two"},
        {"name": "object3", "title": "Object three"}]"#,
    ". #0: \n. . name: object1\n. . title: Object one\n. #1: \n. . name: object1\n. . title: Object two\n. #2: \n. . name: object3\n. . title: Object three\n"
)]
#[case::single_file_literals(
    r#"{"on": true, "off": false, "missing": null, "ratio": 1.0, "count": -3}"#,
    ". on: true\n. off: false\n. missing: null\n. ratio: 1.0\n. count: -3\n"
)]
fn single_document_dumps(#[case] contents: &str, #[case] expected: &str) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_document(dir.path(), "document", contents);

    assert_eq!(dump_of(dir.path(), "document"), expected);
}

#[test]
fn directory_dump_nests_files_under_their_names() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_document(dir.path(), "index", r#"{"title": "catalog"}"#);
    fs::create_dir(dir.path().join("items")).expect("Failed to create items dir");
    write_document(&dir.path().join("items"), "first", r#"{"price": 10}"#);
    write_document(&dir.path().join("items"), "second", r#"{"price": 2.5}"#);

    let djson = DJson::new(dir.path(), Options::default()).expect("Failed to scan");
    assert_eq!(
        djson.dump(),
        ". title: catalog\n. items: \n. . first: \n. . . price: 10\n. . second: \n. . . price: 2.5\n"
    );
    assert_eq!(djson.dump(), djson.dump());
}

#[test]
fn round_trip_through_plain_values() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_document(dir.path(), "index", r#"{"_aliases": {"p": "items.first.price"}}"#);
    fs::create_dir(dir.path().join("items")).expect("Failed to create items dir");
    write_document(&dir.path().join("items"), "first", r#"{"price": 10, "tags": ["a"]}"#);

    let scanned = DJson::new(dir.path(), Options::default()).expect("Failed to scan");
    let plain = scanned.to_dict(true);

    let mut restored = DJson::default();
    restored.load_dict(&plain);

    assert_eq!(restored.to_dict(true), plain);
    assert_eq!(restored.get_value("items.first.tags.0"), Some(&Value::from("a")));
    assert_eq!(restored.alias("p"), scanned.alias("p"));
}

#[test]
fn sequence_bounds_are_respected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_document(dir.path(), "data", r#"{"path": [1, 2, 3]}"#);

    let djson = DJson::new(dir.path().join("data"), Options::default()).expect("Failed to scan");
    assert_eq!(djson.get_value("path.2"), Some(&Value::from(3i64)));
    assert_eq!(djson.get_value("path.3"), None);
    assert_eq!(djson.get_value("path.-1"), None);
    assert_eq!(djson.get_value("a.b.c"), None);
}
