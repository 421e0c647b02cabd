use std::fs;

use crate::utils::{LATEST_BIRTH_YEAR, Workspace, read, sample_employees};
use employee_store::{export_csv, import_csv};

/// Export writes a header and one row per record
#[test]
fn test_export_layout() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let path = ws.path("export.csv");
    let rows = export_csv(&path, &sample_employees())?;
    assert_eq!(rows, 3);

    let text = read(&path);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Nom,CIN,Année,ID");
    assert_eq!(lines[1], "Alice Dupont,AB123456,1990,EMP-2024-001");
    assert_eq!(lines.len(), 4);
    Ok(())
}

/// An export imports back into an equal collection
#[test]
fn test_export_then_import() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let path = ws.path("export.csv");
    export_csv(&path, &sample_employees())?;

    let outcome = import_csv(&path, LATEST_BIRTH_YEAR)?;
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.records, sample_employees());
    Ok(())
}

/// Names with commas are quoted in CSV but cannot be stored as lines
#[test]
fn test_import_reports_rejected_rows() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let path = ws.path("import.csv");
    fs::write(
        &path,
        "Nom,CIN,Année,ID\n\
         Alice Dupont,AB123456,1990,EMP-2024-001\n\
         Bad Cin,ab123456,1990,EMP-2024-002\n\
         \"Dupont, Alice\",CD654321,1990,EMP-2024-003\n\
         Too Few,EF111111\n",
    )
    .unwrap();

    let mut session = ws.session();
    let outcome = session.import_csv(&path)?;
    assert_eq!(outcome.records.len(), 1);
    let rejected: Vec<_> = outcome.rejected.iter().map(|r| r.line).collect();
    assert_eq!(rejected, vec![3, 4, 5]);

    assert_eq!(session.len(), 1);
    assert_eq!(ws.read_data().lines().count(), 1);
    Ok(())
}

/// A quoted multi-line value is rejected instead of splitting the data file
#[test]
fn test_import_rejects_line_breaks() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let path = ws.path("import.csv");
    fs::write(
        &path,
        "Nom,CIN,Année,ID\n\"Alice\nDupont\",AB123456,1990,EMP-2024-001\n",
    )
    .unwrap();

    let mut session = ws.session();
    let outcome = session.import_csv(&path)?;
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.rejected.len(), 1);
    assert!(session.is_empty());

    session.add_form(["Bruno Martin", "CD654321", "1985", "EMP-2024-002"])?;
    let reopened = ws.session();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.skipped().is_empty());
    Ok(())
}
