use serde_json::json;
use vedudb::{Error, Store};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("vedudb_test_{}.json", name))
}

// ---- construction -----------------------------------------------------------

#[test]
fn open_missing_file_creates_empty_object() {
    let path = temp_path("create_empty");
    let _ = std::fs::remove_file(&path);

    let db = Store::open(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    assert_eq!(db.count().unwrap(), 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn open_adopts_existing_content() {
    let path = temp_path("adopt");
    let _ = std::fs::remove_file(&path);
    std::fs::write(&path, r#"{"a":1,"b":"two"}"#).unwrap();

    let db = Store::open(&path).unwrap();
    assert_eq!(db.fetch("a").unwrap(), Some(json!(1)));
    assert_eq!(db.fetch("b").unwrap(), Some(json!("two")));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn path_accessor() {
    let path = temp_path("path_acc");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path).unwrap();
    assert_eq!(db.path(), path.as_path());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_names_are_rejected() {
    for name in ["data.txt", ".json", "json", "", "j.son"] {
        assert!(
            matches!(Store::open(name), Err(Error::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn loose_name_rule_accepts_json_anywhere_past_a_word_char() {
    // the name rule only requires "json" preceded (two chars back) by a
    // word character, not a literal ".json" suffix
    let path = std::env::temp_dir().join("vedudb_test_loose_jsonish");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path).unwrap();
    db.set("k", 1).unwrap();
    assert_eq!(db.fetch("k").unwrap(), Some(json!(1)));
    let _ = std::fs::remove_file(&path);
}

// ---- deferred validation ----------------------------------------------------

#[test]
fn garbage_content_fails_on_first_use_not_at_open() {
    let path = temp_path("garbage");
    let _ = std::fs::remove_file(&path);
    std::fs::write(&path, "this is not json").unwrap();

    let db = Store::open(&path).unwrap();
    assert!(matches!(db.fetch("k"), Err(Error::Corrupt(_))));
    assert!(matches!(db.set("k", 1), Err(Error::Corrupt(_))));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn non_object_top_level_is_corrupt() {
    let path = temp_path("top_array");
    let _ = std::fs::remove_file(&path);
    std::fs::write(&path, "[1,2,3]").unwrap();

    let db = Store::open(&path).unwrap();
    assert!(matches!(db.fetch_all(), Err(Error::Corrupt(_))));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_file_reads_as_empty_document() {
    let path = temp_path("empty_file");
    let _ = std::fs::remove_file(&path);
    std::fs::write(&path, "").unwrap();

    let db = Store::open(&path).unwrap();
    assert_eq!(db.count().unwrap(), 0);
    assert_eq!(db.fetch("k").unwrap(), None);
    let _ = std::fs::remove_file(&path);
}

// ---- persistence ------------------------------------------------------------

#[test]
fn mutations_are_visible_to_a_second_handle() {
    let path = temp_path("two_handles");
    let _ = std::fs::remove_file(&path);
    let writer = Store::open(&path).unwrap();
    let reader = Store::open(&path).unwrap();

    writer.set("shared", "yes").unwrap();
    assert_eq!(reader.fetch("shared").unwrap(), Some(json!("yes")));

    writer.remove("shared").unwrap();
    assert_eq!(reader.fetch("shared").unwrap(), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn persist_and_reload_roundtrip() {
    let path = temp_path("roundtrip");
    let _ = std::fs::remove_file(&path);
    {
        let db = Store::open(&path).unwrap();
        db.set("k1", "v1").unwrap();
        db.set("k2", 2).unwrap();
    }
    let db = Store::open(&path).unwrap();
    assert_eq!(db.fetch("k1").unwrap(), Some(json!("v1")));
    assert_eq!(db.fetch("k2").unwrap(), Some(json!(2)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn no_temp_file_left_behind() {
    let path = temp_path("tmp_cleanup");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path).unwrap();

    db.set("k", 1).unwrap();
    let tmp = path.with_extension("json.tmp");
    assert!(!tmp.exists());
    let _ = std::fs::remove_file(&path);
}

// ---- formatting -------------------------------------------------------------

#[test]
fn default_output_is_compact() {
    let path = temp_path("compact");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path).unwrap();

    db.set("hello", 1).unwrap();
    db.set("world", 2).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn builder_pretty_output_is_indented() {
    let path = temp_path("pretty");
    let _ = std::fs::remove_file(&path);
    let db = Store::builder(&path).pretty(true).build().unwrap();

    db.set("hello", 1).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains('\n'));
    assert!(raw.contains("  "));
    let _ = std::fs::remove_file(&path);
}

// ---- debug ------------------------------------------------------------------

#[test]
fn debug_impls_dont_panic() {
    let path = temp_path("debug");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path).unwrap();

    let dbg_store = format!("{:?}", db);
    assert!(dbg_store.contains("Store"));
    assert!(dbg_store.contains("path"));

    let builder = Store::builder(&path);
    assert!(format!("{:?}", builder).contains("StoreBuilder"));
    let _ = std::fs::remove_file(&path);
}
