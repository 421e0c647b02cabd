use crate::utils::{ALICE_LINE, Workspace, sample_employees};
use employee_store::{FileStore, MalformedLinePolicy, RecordStore, StoreError};

/// A store over a file that does not exist yet loads nothing
#[test]
fn test_missing_file_loads_empty() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let outcome = FileStore::new(ws.data_file()).load()?;
    assert!(outcome.records.is_empty());
    assert!(outcome.skipped.is_empty());
    assert!(!ws.data_file().exists());
    Ok(())
}

/// Saving writes one line per record in collection order
#[test]
fn test_save_writes_line_format() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut store = FileStore::new(ws.data_file());
    store.save(&sample_employees())?;

    let text = ws.read_data();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], ALICE_LINE);
    assert!(lines[2].starts_with("Nom: Chloé Bernard, "));

    assert_eq!(store.load()?.records, sample_employees());
    Ok(())
}

/// In-place and atomic writes produce the same file
#[test]
fn test_in_place_writes_match_atomic_writes() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut atomic = FileStore::new(ws.path("atomic.txt"));
    let mut in_place = FileStore::new(ws.path("in_place.txt")).with_atomic_writes(false);
    atomic.save(&sample_employees())?;
    in_place.save(&sample_employees())?;

    assert_eq!(
        crate::utils::read(atomic.path()),
        crate::utils::read(in_place.path())
    );
    // No temporary file is left behind
    let names: Vec<_> = std::fs::read_dir(ws.dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2, "unexpected files: {names:?}");
    Ok(())
}

/// Blank lines are ignored and malformed lines follow the policy
#[test]
fn test_malformed_lines_policy() -> employee_store::Result<()> {
    let ws = Workspace::new();
    ws.write_data(&format!(
        "{ALICE_LINE}\n\nthis is not a record\nNom: Bob, CIN: CD654321, Année: soon, ID: EMP-2024-002\n"
    ));

    let skipping = FileStore::new(ws.data_file()).load()?;
    assert_eq!(skipping.records.len(), 1);
    let skipped_lines: Vec<_> = skipping.skipped.iter().map(|s| s.line).collect();
    assert_eq!(skipped_lines, vec![3, 4]);

    let err = FileStore::new(ws.data_file())
        .with_policy(MalformedLinePolicy::Abort)
        .load()
        .unwrap_err();
    assert!(matches!(err, StoreError::Format { line: 3, .. }), "{err}");
    Ok(())
}

/// Values containing ": " survive a reload
#[test]
fn test_key_separator_inside_value() -> employee_store::Result<()> {
    let ws = Workspace::new();
    ws.write_data("Nom: Dr: House, CIN: AB123456, Année: 1960, ID: EMP-1990-001\n");

    let outcome = FileStore::new(ws.data_file()).load()?;
    assert_eq!(outcome.records[0].name, "Dr: House");
    Ok(())
}
