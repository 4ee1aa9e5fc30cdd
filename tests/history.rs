use std::path::PathBuf;

use otter_debug::{
    debug::history::{load_history, save_history},
    names::Names,
    structures::literal::{CLiteral, Literal},
    types::err::HistoryError,
};

fn names() -> Names {
    let mut names = Names::default();
    for (atom, name) in [(1, "a"), (2, "p(x, y)"), (3, "_debug1"), (4, "q(\"with space\")")] {
        names.insert_name(atom, name).unwrap();
    }
    names
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("otter_debug_{}_{name}", std::process::id()))
}

#[test]
fn file_round_trip() {
    let names = names();
    let assertions = vec![
        CLiteral::new(2, true),
        CLiteral::new(1, false),
        CLiteral::new(4, false),
    ];

    let path = temp_path("round_trip");
    assert!(save_history(&path, &assertions, &names).is_ok());
    assert_eq!(load_history(&path, &names), Ok(assertions));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn saving_replaces() {
    let names = names();
    let path = temp_path("replaces");

    assert!(save_history(&path, &[CLiteral::new(1, true), CLiteral::new(2, true)], &names).is_ok());
    assert!(save_history(&path, &[CLiteral::new(3, false)], &names).is_ok());
    assert_eq!(load_history(&path, &names), Ok(vec![CLiteral::new(3, false)]));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn bad_file_loads_nothing() {
    let names = names();
    let path = temp_path("bad");

    assert!(std::fs::write(&path, "a true\np(x, y) false\n_debug1 perhaps\n").is_ok());
    assert_eq!(
        load_history(&path, &names),
        Err(HistoryError::UnknownValue(3, "perhaps".to_string()))
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file() {
    let names = names();
    let path = temp_path("missing");
    let _ = std::fs::remove_file(&path);

    assert_eq!(
        load_history(&path, &names),
        Err(HistoryError::Read(std::io::ErrorKind::NotFound))
    );
}
