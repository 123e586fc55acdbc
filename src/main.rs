use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::cursor::MoveToColumn;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use lessprune::analysis::{DetectOptions, PruneRequest, Pruner};
use lessprune::export::{self, ExportData, ExportFormat, FileReport};
use lessprune::files::find_less_files;
use lessprune::logging::init_tracing;
use lessprune::parser::NodeLessParser;
use lessprune::tree::{self, trace::node_to_line_string, NodeKind, WalkAction, WalkOptions};

#[derive(Parser)]
#[command(name = "lessprune")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Finds and removes unused @import statements from LESS stylesheets", long_about = None)]
struct Cli {
    /// Node executable used to run less.js
    #[arg(long, global = true, env = "LESSPRUNE_NODE", default_value = "node")]
    node: PathBuf,

    /// less.js module to load, as a package name or path
    #[arg(long, global = true, env = "LESSPRUNE_LESS_MODULE")]
    less_module: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove unused imports from every .less file under a directory
    Prune {
        /// Directory to search for .less files
        dir: PathBuf,

        /// Extra directory to search for imports (repeatable)
        #[arg(short = 'I', long = "import-dir")]
        import_dirs: Vec<PathBuf>,

        /// Report what would be removed without writing, exit 1 if anything would change
        #[arg(long)]
        check: bool,

        /// Continue with the next file when one fails
        #[arg(long)]
        keep_going: bool,

        /// Only remove (reference) imports
        #[arg(long)]
        reference_only: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,
    },
    /// List the unused imports of one file
    Unused {
        /// The .less file to analyze
        file: PathBuf,

        /// Extra directory to search for imports (repeatable)
        #[arg(short = 'I', long = "import-dir")]
        import_dirs: Vec<PathBuf>,

        /// Only report (reference) imports
        #[arg(long)]
        reference_only: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,
    },
    /// Show the names a file exports and the names it references
    Names {
        /// The .less file to analyze
        file: PathBuf,

        /// Extra directory to search for imports (repeatable)
        #[arg(short = 'I', long = "import-dir")]
        import_dirs: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,
    },
    /// Print the syntax tree of a file, one node per line
    Nodes {
        /// The .less file to parse
        file: PathBuf,

        /// Extra directory to search for imports (repeatable)
        #[arg(short = 'I', long = "import-dir")]
        import_dirs: Vec<PathBuf>,

        /// Only print nodes of this kind, e.g. MixinCall
        #[arg(long)]
        kind: Option<NodeKind>,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut parser = NodeLessParser::new().with_node_binary(&cli.node);
    if let Some(module) = &cli.less_module {
        parser = parser.with_less_module(module.clone());
    }

    match cli.command {
        Some(Commands::Prune {
            dir,
            import_dirs,
            check,
            keep_going,
            reference_only,
            format,
        }) => {
            let pruner = Pruner::new(parser).with_options(DetectOptions { reference_only });
            prune(&pruner, &dir, &import_dirs, check, keep_going, format)
        }
        Some(Commands::Unused {
            file,
            import_dirs,
            reference_only,
            format,
        }) => {
            ensure_dirs(&import_dirs)?;
            let pruner = Pruner::new(parser).with_options(DetectOptions { reference_only });
            let request = PruneRequest::for_file(&file, import_dirs);
            let unused = pruner.unused_imports(&request)?;
            write_report(format, &ExportData::new(vec![FileReport::unused(file, unused)]))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Names {
            file,
            import_dirs,
            format,
        }) => {
            ensure_dirs(&import_dirs)?;
            let names = Pruner::new(parser).file_names(&file, &import_dirs)?;
            write_report(format, &ExportData::new(vec![FileReport::names(file, names)]))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Nodes {
            file,
            import_dirs,
            kind,
        }) => {
            ensure_dirs(&import_dirs)?;
            print_nodes(&Pruner::new(parser), &file, &import_dirs, kind)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Version) => {
            println!("lessprune v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("lessprune - Unused LESS import remover");
            println!("Run 'lessprune prune <DIR>' to remove unused imports");
            println!("Run 'lessprune --help' for more information");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Processes every file under `dir`, one at a time.
fn prune(
    pruner: &Pruner<NodeLessParser>,
    dir: &Path,
    import_dirs: &[PathBuf],
    check: bool,
    keep_going: bool,
    format: ExportFormat,
) -> Result<ExitCode> {
    if !dir.is_dir() {
        bail!(
            "First argument must be a valid directory to search in. Got \"{}\"",
            dir.display()
        );
    }
    ensure_dirs(import_dirs)?;

    let files = find_less_files(dir)
        .with_context(|| format!("Failed to list .less files in {}", dir.display()))?;
    tracing::debug!(count = files.len(), dir = %dir.display(), "found less files");

    let progress = Progress::new(files.len());
    let mut reports = Vec::with_capacity(files.len());

    for (i, file) in files.iter().enumerate() {
        progress.update(i + 1)?;

        let request = PruneRequest::for_file(file, import_dirs.to_vec());
        let result = if check {
            pruner.unused_imports(&request).map(|unused| FileReport {
                changed: !unused.is_empty(),
                ..FileReport::unused(file, unused)
            })
        } else {
            pruner
                .remove_and_write_unused_imports(&request)
                .map(FileReport::from)
        };

        match result {
            Ok(report) => reports.push(report),
            Err(err) if keep_going => {
                tracing::warn!(file = %file.display(), error = %err, "skipping file");
                reports.push(FileReport::failed(file, err.to_string()));
            }
            Err(err) => {
                progress.finish()?;
                return Err(err).with_context(|| format!("Failed to process {}", file.display()));
            }
        }
    }
    progress.finish()?;

    let data = ExportData {
        files: reports,
        check_only: check,
    };
    write_report(format, &data)?;

    if data.failed_count() > 0 || (check && data.changed_count() > 0) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_nodes(
    pruner: &Pruner<NodeLessParser>,
    file: &Path,
    import_dirs: &[PathBuf],
    kind: Option<NodeKind>,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let root = pruner.parse_file(&source, file, import_dirs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut result = Ok(());
    tree::walk(&root, WalkOptions::default(), |node| {
        if kind.map_or(true, |k| k == node.kind()) {
            let index = node.index.map_or_else(|| "-".to_string(), |i| i.to_string());
            let line = node_to_line_string(node).unwrap_or_else(|_| "(no leaf)".to_string());
            result = writeln!(out, "{:>6}  {:<16} {}", index, node.kind(), line);
        }
        if result.is_ok() {
            WalkAction::Continue
        } else {
            WalkAction::Stop
        }
    });
    Ok(result?)
}

fn ensure_dirs(dirs: &[PathBuf]) -> Result<()> {
    for dir in dirs {
        if !dir.is_dir() {
            bail!("Could not find import dir \"{}\"", dir.display());
        }
    }
    Ok(())
}

fn write_report(format: ExportFormat, data: &ExportData) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    export::export(format, data, &mut out).context("Failed to write report")?;
    Ok(())
}

/// `Processing i / n`, redrawn in place on stderr when it is a terminal.
struct Progress {
    total: usize,
    enabled: bool,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            enabled: io::stderr().is_terminal(),
        }
    }

    fn update(&self, current: usize) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut err = io::stderr();
        err.queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?;
        write!(err, "Processing {} / {}", current, self.total)?;
        err.flush()
    }

    fn finish(&self) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut err = io::stderr();
        err.queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?;
        err.flush()
    }
}
