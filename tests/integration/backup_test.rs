use chrono::NaiveDate;

use crate::utils::{ALICE_LINE, Workspace, read};
use employee_store::{BackupManager, StoreError};

fn manager(ws: &Workspace) -> BackupManager {
    BackupManager::from_config(&ws.config())
}

/// Backups copy the data file under a timestamped name
#[test]
fn test_create_and_list_backups() -> employee_store::Result<()> {
    let ws = Workspace::new();
    ws.write_data(&format!("{ALICE_LINE}\n"));
    let backups = manager(&ws);
    assert!(backups.list()?.is_empty());

    let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    let first = backups.create(day.and_hms_opt(9, 0, 0).unwrap())?;
    let second = backups.create(day.and_hms_opt(17, 30, 5).unwrap())?;
    assert_eq!(read(&first), read(&ws.data_file()));

    let listed = backups.list()?;
    let names: Vec<_> = listed.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "employes_backup_20240314_173005.txt",
            "employes_backup_20240314_090000.txt"
        ]
    );
    assert_eq!(listed[0].path, second);
    assert_eq!(listed[0].taken_at, day.and_hms_opt(17, 30, 5));
    Ok(())
}

/// Backing up a missing data file fails
#[test]
fn test_backup_without_data_file() {
    let ws = Workspace::new();
    let err = manager(&ws).create_now().unwrap_err();
    assert!(matches!(err, StoreError::NoData(_)));
}

/// Restoring replaces the data file and the session reloads it
#[test]
fn test_restore_reloads_session() -> employee_store::Result<()> {
    let ws = Workspace::new();
    let mut session = ws.session();
    session.add_form(["Alice Dupont", "AB123456", "1990", "EMP-2024-001"])?;

    let backups = manager(&ws);
    let backup = backups.create_now()?;
    let name = backup.file_name().unwrap().to_string_lossy().into_owned();

    session.add_form(["Bruno Martin", "CD654321", "1985", "EMP-2024-002"])?;
    assert_eq!(session.len(), 2);

    session.restore(&backups, &name)?;
    assert_eq!(session.len(), 1);
    assert_eq!(ws.read_data(), format!("{ALICE_LINE}\n"));
    Ok(())
}

/// Unknown or path-like backup names are refused
#[test]
fn test_restore_rejects_bad_names() {
    let ws = Workspace::new();
    ws.write_data(&format!("{ALICE_LINE}\n"));
    let backups = manager(&ws);

    assert!(matches!(
        backups.restore("employes_backup_20000101_000000.txt"),
        Err(StoreError::BackupNotFound(_))
    ));
    assert!(matches!(
        backups.restore("../employes.txt"),
        Err(StoreError::InvalidBackupName(_))
    ));
    assert!(matches!(
        backups.restore("other.txt"),
        Err(StoreError::InvalidBackupName(_))
    ));
    assert_eq!(ws.read_data(), format!("{ALICE_LINE}\n"));
}
