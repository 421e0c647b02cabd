use std::fs;
use std::path::{Path, PathBuf};

use employee_store::{Employee, FileStore, Session, StoreConfig};
use tempfile::TempDir;

/// Youngest birth year accepted by test sessions
pub const LATEST_BIRTH_YEAR: i32 = 2006;

/// Line for the first sample employee, as persisted
pub const ALICE_LINE: &str = "Nom: Alice Dupont, CIN: AB123456, Année: 1990, ID: EMP-2024-001";

/// Temporary workspace holding a data file and a backup directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Create an empty workspace
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of the data file
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("employes.txt")
    }

    /// Path of a file inside the workspace
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Configuration pointing at this workspace
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            data_file: self.data_file(),
            backup_dir: self.dir.path().join("backups"),
            ..StoreConfig::default()
        }
    }

    /// Write raw text to the data file
    pub fn write_data(&self, text: &str) {
        fs::write(self.data_file(), text).expect("write data file");
    }

    /// Raw text of the data file
    #[must_use]
    pub fn read_data(&self) -> String {
        read(&self.data_file())
    }

    /// Open a session on the data file
    #[must_use]
    pub fn session(&self) -> Session<FileStore> {
        let config = self.config();
        Session::open(FileStore::from_config(&config), &config)
            .expect("open session")
            .with_latest_birth_year(LATEST_BIRTH_YEAR)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file that must exist
#[must_use]
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Three valid employees
#[must_use]
pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new("Alice Dupont", "AB123456", 1990, "EMP-2024-001"),
        Employee::new("Bruno Martin", "CD654321", 1985, "EMP-2024-002"),
        Employee::new("Chloé Bernard", "EF111111", 2000, "EMP-2024-003"),
    ]
}
