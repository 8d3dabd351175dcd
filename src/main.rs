use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use sis::config::{Config, DEFAULT_DATA_DIR, DEFAULT_FILE_NAME};
use sis::console::{self, ConsoleResult, EditorForm, NoForm, OutputMode};
use sis::record::{Storage, TableFile};
use sis::store::RecordStore;

/// Student Information System: add, view, filter, modify and delete student records.
#[derive(Parser, Debug)]
#[command(name = "sis", version)]
struct Cli {
    /// Directory holding the student table (created if missing).
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// File name of the student table inside the data directory.
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    file: String,

    /// Execute a command non-interactively (can be repeated).
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(self.data_dir.clone(), self.file.clone())
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn open_store(config: &Config) -> ConsoleResult<RecordStore> {
    let path = config.prepare()?;
    log::debug!("Using student table {}", path.display());
    Ok(RecordStore::open(TableFile::new(path))?)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let mut store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "Cannot open student table {}: {e}",
                config.data_file().display()
            );
            process::exit(1);
        }
    };

    let mode = cli.output_mode();
    if !cli.exec.is_empty() {
        let lines = cli.exec.iter().cloned().map(Ok);
        process::exit(run_batch(&mut store, lines, &mode));
    } else if !io::stdin().is_terminal() {
        let stdin = io::stdin();
        process::exit(run_batch(&mut store, stdin.lock().lines(), &mode));
    } else {
        run_repl(&mut store);
    }
}

/// Run commands without a form (exec and pipe modes).
///
/// Returns exit code: 0 = all succeeded or EXIT reached, 1 = first error.
fn run_batch<S, I>(store: &mut RecordStore<S>, lines: I, mode: &OutputMode) -> i32
where
    S: Storage,
    I: IntoIterator<Item = io::Result<String>>,
{
    for line in lines {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                console::render_error(&e, mode);
                return 1;
            }
        };
        if console::is_blank(&line) {
            continue;
        }

        match console::run_line(store, &line, &mut NoForm) {
            Ok(result) => {
                if !console::render(&result, mode) {
                    return 0;
                }
            }
            Err(e) => {
                console::render_error(&e, mode);
                return 1;
            }
        }
    }

    0
}

/// Interactive REPL mode.
fn run_repl(store: &mut RecordStore) {
    println!("Student Information System");
    println!("Type HELP for available commands.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize line editor: {e}");
            process::exit(1);
        }
    };

    loop {
        match rl.readline("sis> ") {
            Ok(line) => {
                if console::is_blank(&line) {
                    continue;
                }
                let _ = rl.add_history_entry(line.trim());

                let mut form = EditorForm::new(&mut rl);
                match console::run_line(store, &line, &mut form) {
                    Ok(result) => {
                        if !console::render(&result, &OutputMode::Pretty) {
                            break;
                        }
                    }
                    Err(e) => console::render_error(&e, &OutputMode::Pretty),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!();
            }
            Err(ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {e}");
                break;
            }
        }
    }
}
