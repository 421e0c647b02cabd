use std::time::{Duration, Instant};

use crate::utils::{ALICE_LINE, Workspace, sample_employees};
use employee_store::{Autosave, EmployeeField, RecordFilter, StoreError, ViewQuery};

/// Adding a record appends exactly one line and reloads identically
#[test]
fn test_add_appends_one_line() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    session.add_form(["Alice Dupont", "AB123456", "1990", "EMP-2024-001"])?;
    assert_eq!(ws.read_data(), format!("{ALICE_LINE}\n"));

    session.add_form(["  Bruno Martin ", "CD654321", " 1985", "EMP-2024-002"])?;
    let text = ws.read_data();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with(ALICE_LINE));

    let reopened = ws.session();
    assert_eq!(reopened.records(), session.records());
    assert_eq!(reopened.records()[1].name, "Bruno Martin");
    Ok(())
}

/// A rejected form leaves both memory and file untouched
#[test]
fn test_invalid_form_changes_nothing() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    session.add_form(["Alice Dupont", "AB123456", "1990", "EMP-2024-001"])?;
    let before = ws.read_data();

    for values in [
        ["", "AB123456", "1990", "EMP-2024-001"],
        ["Bob", "ab123456", "1990", "EMP-2024-001"],
        ["Bob", "AB123456", "1899", "EMP-2024-001"],
        ["Bob", "AB123456", "2007", "EMP-2024-001"],
        ["Bob", "AB123456", "19x0", "EMP-2024-001"],
        ["Bob", "AB123456", "1990", "EMP-24-001"],
    ] {
        let err = session.add_form(values).unwrap_err();
        assert!(err.is_validation(), "{values:?}: {err}");
    }

    assert_eq!(session.len(), 1);
    assert_eq!(ws.read_data(), before);
    Ok(())
}

/// Deleting the only record leaves an existing, empty file
#[test]
fn test_delete_last_record_empties_file() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    session.add_form(["Alice Dupont", "AB123456", "1990", "EMP-2024-001"])?;

    let removed = session.delete(0)?;
    assert_eq!(removed.employee_id, "EMP-2024-001");
    assert!(ws.data_file().exists());
    assert_eq!(ws.read_data(), "");
    assert!(ws.session().is_empty());
    Ok(())
}

/// Editing rewrites the record in place
#[test]
fn test_update_rewrites_record() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    for employee in sample_employees() {
        session.add(employee)?;
    }

    let mut changed = session.records()[1].clone();
    changed.birth_year = 1986;
    session.update(1, changed)?;

    let lines: Vec<_> = ws.read_data().lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Année: 1986"));

    assert!(matches!(
        session.update(7, sample_employees().remove(0)),
        Err(StoreError::IndexOutOfRange { index: 7, len: 3 })
    ));
    Ok(())
}

/// Search, filter and sort work on what was loaded
#[test]
fn test_queries_after_reload() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    for employee in sample_employees() {
        session.add(employee)?;
    }
    let session = ws.session();

    assert_eq!(session.search("emp-2024-00").count(), 3);
    assert_eq!(session.search("MARTIN").count(), 1);
    assert_eq!(session.search("").count(), 3);

    let by_year = session.view(&ViewQuery {
        filter: RecordFilter::year(2000),
        ..ViewQuery::default()
    });
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].name, "Chloé Bernard");

    let sorted = session.view(&ViewQuery {
        sort: Some(EmployeeField::BirthYear),
        ..ViewQuery::default()
    });
    let years: Vec<_> = sorted.iter().map(|e| e.birth_year).collect();
    assert_eq!(years, vec![1985, 1990, 2000]);
    Ok(())
}

/// Autosave writes the collection when the interval elapses
#[test]
fn test_autosave_tick_rewrites_file() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let start = Instant::now();
    let mut session = ws
        .session()
        .with_autosave(Autosave::new(Duration::from_secs(60), start));
    session.add_form(["Alice Dupont", "AB123456", "1990", "EMP-2024-001"])?;

    std::fs::remove_file(ws.data_file()).unwrap();
    assert!(!session.tick(start + Duration::from_secs(30))?);
    assert!(!ws.data_file().exists());

    assert!(session.tick(start + Duration::from_secs(61))?);
    assert_eq!(ws.read_data(), format!("{ALICE_LINE}\n"));
    Ok(())
}

/// A zero interval disables autosave
#[test]
fn test_disabled_autosave_never_saves() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let start = Instant::now();
    let mut session = ws
        .session()
        .with_autosave(Autosave::new(Duration::ZERO, start));
    assert!(!session.tick(start + Duration::from_secs(3600))?);
    assert!(!ws.data_file().exists());
    Ok(())
}

/// Statistics over loaded birth years that were never re-validated
#[test]
fn test_statistics_with_out_of_range_birth_year() {
    let ws = Workspace::new();
    ws.write_data(&format!(
        "{ALICE_LINE}\nNom: Old, CIN: CD654321, Année: -2147483648, ID: EMP-2024-002\n"
    ));

    let session = ws.session();
    assert_eq!(session.len(), 2);
    let stats = session.statistics(2024);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.min_age, Some(34));
    assert_eq!(stats.max_age, Some(34));
}
