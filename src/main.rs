use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};

use employee_store::filter::{Department, RecordFilter, ViewQuery};
use employee_store::models::validation;
use employee_store::utils::logging::print_records;
use employee_store::{
    BackupManager, Employee, EmployeeField, FileStore, Session, StoreConfig, find_duplicates,
};

fn init_logging(verbosity: i8) {
    // Map -q/-v to log levels; default INFO
    let level = match verbosity {
        i8::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let opts = Opts::parse();
    init_logging(opts.verbose as i8 - opts.quiet as i8);

    if let Err(e) = run(opts) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(opts: &Opts) -> anyhow::Result<StoreConfig> {
    let mut config = match &opts.config {
        Some(path) => StoreConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(data_file) = &opts.data_file {
        config.data_file.clone_from(data_file);
    }
    if let Some(backup_dir) = &opts.backup_dir {
        config.backup_dir.clone_from(backup_dir);
    }
    Ok(config)
}

fn run(opts: Opts) -> anyhow::Result<()> {
    let config = load_config(&opts)?;
    let backups = BackupManager::from_config(&config);
    let mut session = Session::open(FileStore::from_config(&config), &config)
        .with_context(|| format!("opening {}", config.data_file.display()))?;
    if !session.skipped().is_empty() {
        warn!(
            "{} malformed lines were skipped and will be dropped on the next save",
            session.skipped().len()
        );
    }

    match opts.command {
        Command::Add {
            name,
            cin,
            year,
            id,
        } => {
            let employee = session.add_form([&name, &cin, &year, &id])?.clone();
            println!("{}", session.status_line(&format!("added {}", employee.employee_id)));
        }
        Command::List { sort } => {
            let query = ViewQuery {
                sort,
                ..ViewQuery::default()
            };
            print_records(&session.view(&query));
        }
        Command::Search { term, sort } => {
            let query = ViewQuery {
                term: Some(term),
                sort,
                ..ViewQuery::default()
            };
            print_records(&session.view(&query));
        }
        Command::Filter {
            year,
            department,
            sort,
        } => {
            let query = ViewQuery {
                filter: RecordFilter {
                    year,
                    department: department.unwrap_or_default(),
                },
                sort,
                ..ViewQuery::default()
            };
            print_records(&session.view(&query));
        }
        Command::Edit {
            index,
            name,
            cin,
            year,
            id,
        } => {
            let Some(current) = session.get(index).cloned() else {
                bail!("no employee at index {index} ({} records)", session.len());
            };
            let year = year.unwrap_or_else(|| current.birth_year.to_string());
            let values = [
                name.as_deref().unwrap_or(&current.name),
                cin.as_deref().unwrap_or(&current.national_id),
                year.as_str(),
                id.as_deref().unwrap_or(&current.employee_id),
            ];
            let employee =
                Employee::from_form(values, session.latest_birth_year())?;
            session.update(index, employee)?;
            println!("{}", session.status_line(&format!("updated row {index}")));
        }
        Command::Delete { index, id } => match (index, id) {
            (Some(index), None) => {
                let removed = session.delete(index)?;
                println!("{}", session.status_line(&format!("deleted {}", removed.employee_id)));
            }
            (None, Some(id)) => {
                let removed = session.delete_by_id(&id)?;
                println!(
                    "{}",
                    session.status_line(&format!("deleted {} record(s) with ID {id}", removed.len()))
                );
            }
            _ => bail!("give either an index or --id"),
        },
        Command::Validate { field, value } => {
            match config.field_violation(field, &value, validation::current_year()) {
                None => println!("{field} '{value}' is valid"),
                Some(reason) => bail!("{field} '{value}' {reason}"),
            }
        }
        Command::ExportCsv { path } => {
            let rows = session.export_csv(&path)?;
            println!("Exported {rows} records to {}", path.display());
        }
        Command::ImportCsv { path } => {
            let outcome = session.import_csv(&path)?;
            for rejected in &outcome.rejected {
                println!("line {}: {}", rejected.line, rejected.reason);
            }
            println!(
                "{}",
                session.status_line(&format!(
                    "imported {}, rejected {}",
                    outcome.records.len(),
                    outcome.rejected.len()
                ))
            );
        }
        Command::Backup => {
            let path = backups.create_now()?;
            println!("Backup created: {}", path.display());
        }
        Command::Backups => {
            let entries = backups.list()?;
            if entries.is_empty() {
                println!("No backups in {}", backups.backup_dir().display());
            }
            for entry in entries {
                match entry.taken_at {
                    Some(at) => println!("{}  ({})", entry.name, at.format("%d/%m/%Y %H:%M:%S")),
                    None => println!("{}", entry.name),
                }
            }
        }
        Command::Restore { name } => {
            let source = session.restore(&backups, &name)?;
            println!(
                "{}",
                session.status_line(&format!("restored from {}", source.display()))
            );
        }
        Command::Stats => {
            print!("{}", session.statistics(validation::current_year()).summary());
        }
        Command::Duplicates => {
            let groups = find_duplicates(session.records());
            if groups.is_empty() {
                println!("No duplicate identifiers");
            }
            for group in groups {
                println!("{} {} shared by rows {:?}", group.field, group.value, group.indices);
            }
        }
        Command::Shell => run_shell(&mut session)?,
    }

    Ok(())
}

const SHELL_HELP: &str = "\
commands:
  list [field]                 show all records, optionally sorted
  search <term>                case-insensitive search
  year <year>                  records born in <year>
  add <name>|<cin>|<year>|<id> add a record
  delete <index>               delete a record
  stats                        summary statistics
  save                         write the data file now
  quit                         save and leave";

fn run_shell(session: &mut Session<FileStore>) -> anyhow::Result<()> {
    info!(
        "Interactive shell on {}, autosave every {:?}",
        session.store().path().display(),
        session.autosave().interval()
    );
    println!("{}", session.status_line("type 'help' for commands"));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let (command, rest) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        let rest = rest.trim();
        let result: anyhow::Result<()> = match command {
            "" => Ok(()),
            "help" => {
                println!("{SHELL_HELP}");
                Ok(())
            }
            "quit" | "exit" => break,
            "list" if rest.is_empty() => {
                print_records(session.records());
                Ok(())
            }
            "list" => rest
                .parse::<EmployeeField>()
                .map(|field| {
                    print_records(&session.view(&ViewQuery {
                        sort: Some(field),
                        ..ViewQuery::default()
                    }));
                })
                .map_err(anyhow::Error::msg),
            "search" => {
                let found: Vec<_> = session.search(rest).cloned().collect();
                print_records(&found);
                Ok(())
            }
            "year" => rest
                .parse::<i32>()
                .map(|year| {
                    print_records(&session.view(&ViewQuery {
                        filter: RecordFilter::year(year),
                        ..ViewQuery::default()
                    }));
                })
                .map_err(|e| anyhow::anyhow!("invalid year '{rest}': {e}")),
            "add" => {
                let parts: Vec<&str> = rest.split('|').collect();
                match <[&str; 4]>::try_from(parts) {
                    Ok(values) => session.add_form(values).map(|_| ()).map_err(Into::into),
                    Err(_) => Err(anyhow::anyhow!("usage: add <name>|<cin>|<year>|<id>")),
                }
            }
            "delete" => rest
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("invalid index '{rest}': {e}"))
                .and_then(|index| session.delete(index).map(|_| ()).map_err(Into::into)),
            "stats" => {
                print!("{}", session.statistics(validation::current_year()).summary());
                Ok(())
            }
            "save" => session.save().map_err(Into::into),
            other => Err(anyhow::anyhow!("unknown command '{other}', try 'help'")),
        };

        match result {
            Ok(()) => println!("{}", session.status_line("ok")),
            Err(e) => println!("error: {e:#}"),
        }

        if let Err(e) = session.tick(Instant::now()) {
            warn!("Autosave failed: {e}");
        }
    }

    session.save().context("saving on exit")?;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Employee record store")]
pub struct Opts {
    /// Increase verbosity (-v, -vv). Default INFO.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Decrease verbosity (-q). Each -q reduces level by one step.
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
    /// JSON configuration file
    #[arg(long, env = "EMPLOYEE_STORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,
    /// Data file, overrides the configuration
    #[arg(long, env = "EMPLOYEE_STORE_DATA", global = true)]
    pub data_file: Option<PathBuf>,
    /// Backup directory, overrides the configuration
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an employee
    Add {
        /// Full name
        #[arg(long)]
        name: String,
        /// National ID, e.g. AB123456
        #[arg(long)]
        cin: String,
        /// Birth year
        #[arg(long)]
        year: String,
        /// Employee ID, e.g. EMP-2024-001
        #[arg(long)]
        id: String,
    },
    /// List all employees
    List {
        /// Column to sort on (name, cin, year, id)
        #[arg(long)]
        sort: Option<EmployeeField>,
    },
    /// Case-insensitive search over whole records
    Search {
        term: String,
        #[arg(long)]
        sort: Option<EmployeeField>,
    },
    /// Filter by birth year and department
    Filter {
        #[arg(long)]
        year: Option<i32>,
        /// Department, or "all"
        #[arg(long)]
        department: Option<Department>,
        #[arg(long)]
        sort: Option<EmployeeField>,
    },
    /// Change fields of the employee at a row index
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cin: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete by row index or by employee ID
    Delete {
        index: Option<usize>,
        #[arg(long, conflicts_with = "index")]
        id: Option<String>,
    },
    /// Check one field value against its rule
    Validate { field: EmployeeField, value: String },
    /// Export all employees to CSV
    ExportCsv { path: PathBuf },
    /// Append employees from a CSV file with a header row
    ImportCsv { path: PathBuf },
    /// Copy the data file into the backup directory
    Backup,
    /// List backups, newest first
    Backups,
    /// Restore a backup by file name
    Restore { name: String },
    /// Head count and age distribution
    Stats,
    /// Employee IDs and national IDs used more than once
    Duplicates,
    /// Interactive shell with periodic autosave
    Shell,
}
