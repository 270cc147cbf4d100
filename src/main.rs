use clap::{ArgAction, ArgGroup, Args as ClapArgs, Parser, Subcommand};
use filetools::{
    ActionStatus, HashAlgorithm, JsonStyle, RenameEngine, RenameMode, RenameReport,
    RenameRequest, format_json, hash_file, hash_string, read_text_input, write_output,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Small file utilities: bulk rename, hashing and JSON formatting
#[derive(Parser, Debug)]
#[command(name = "filetools")]
#[command(version)]
#[command(about = "Bulk rename, hashing and JSON formatting tools", long_about = None)]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// File management tools
    Filemgr {
        #[command(subcommand)]
        command: FilemgrCommand,
    },
    /// Compute the digest of a file or a string
    Hash(HashArgs),
    /// Validate and format JSON
    Json(JsonArgs),
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
enum FilemgrCommand {
    /// Rename files and directories by replacing part of their names
    ///
    /// Every entry whose name contains OLD has all occurrences replaced by NEW.
    /// An empty NEW deletes the occurrences.
    Rename(RenameArgs),
}

#[derive(ClapArgs, Debug)]
struct RenameArgs {
    /// Target file or directory
    #[arg(short, long)]
    path: PathBuf,

    /// Literal text to replace in entry names
    #[arg(short, long)]
    old: String,

    /// Replacement text (empty deletes the match)
    #[arg(short, long, default_value = "")]
    new: String,

    /// Also process subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Only show what would be renamed
    #[arg(long)]
    preview: bool,

    /// Output the report as JSON instead of human-readable lines
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "string"])))]
struct HashArgs {
    /// Hash algorithm (md5, sha1, sha256, blake3, xxhash)
    #[arg(short = 't', long = "type", default_value = "md5")]
    hash_type: String,

    /// File to hash
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// String to hash
    #[arg(short, long)]
    string: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct JsonArgs {
    /// JSON text (omit to read from stdin)
    input: Option<String>,

    /// Print on a single line instead of indenting
    #[arg(long)]
    compact: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let rust_log = std::env::var("RUST_LOG").ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level, verbosity > 0, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// `RUST_LOG` is used as given unless `-v` was passed, which overrides its
/// global level. Without a usable `RUST_LOG` the `-v` level applies.
fn log_filter(level: Level, explicit: bool, rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(EnvFilter::try_new) {
        Some(Ok(filter)) if explicit => filter.add_directive(level.into()),
        Some(Ok(filter)) => filter,
        _ => EnvFilter::default().add_directive(level.into()),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Filemgr {
            command: FilemgrCommand::Rename(rename),
        } => run_rename(rename),
        Command::Hash(hash) => run_hash(hash),
        Command::Json(json) => run_json(json),
        Command::Version => {
            println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_rename(args: RenameArgs) -> CliResult {
    let request = RenameRequest::new(args.path, args.old, args.new)?
        .with_recursive(args.recursive)
        .with_preview(args.preview);
    let engine = RenameEngine::new(request);

    let report = engine.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, engine.request());
    }
    Ok(())
}

/// Human-readable rename output
fn print_report(report: &RenameReport, request: &RenameRequest) {
    let deleting = request.replacement.is_empty();

    match report.mode {
        RenameMode::Preview => println!("=== Rename preview ==="),
        RenameMode::Execute => println!("Starting bulk rename..."),
    }
    println!("Path: {}", request.root_path.display());
    if deleting {
        println!("Delete: '{}'", request.match_string);
    } else {
        println!("Replace: '{}' -> '{}'", request.match_string, request.replacement);
    }
    println!("Recursive: {}", request.recursive);
    println!("==================");

    let suffix = if deleting {
        format!(" (delete '{}')", request.match_string)
    } else {
        String::new()
    };

    for action in &report.actions {
        let plan = &action.plan;
        let from = plan.original_path.display();
        let to = plan.target_path.display();
        match &action.status {
            ActionStatus::Planned => {
                let kind = if plan.is_directory { "directory" } else { "file" };
                println!("[preview] {}: {} -> {}{}", kind, from, to, suffix);
            }
            ActionStatus::Renamed => println!("Renamed: {} -> {}{}", from, to, suffix),
            ActionStatus::Failed { error } => println!("Failed: {}", error),
        }
    }

    for skipped in &report.skipped_directories {
        println!("Skipped directory {}: {}", skipped.path.display(), skipped.error);
    }

    if report.is_empty() {
        println!("No names contain '{}'", request.match_string);
    }

    match report.mode {
        RenameMode::Preview => {
            println!();
            println!("Note: this is only a preview, nothing was renamed.");
            println!("Remove --preview to apply the changes.");
        }
        RenameMode::Execute => println!(
            "Bulk rename finished: {} renamed, {} failed",
            report.renamed_count(),
            report.failed_count()
        ),
    }
}

fn run_hash(args: HashArgs) -> CliResult {
    let algorithm: HashAlgorithm = args.hash_type.parse()?;

    if let Some(path) = &args.file {
        let digest = hash_file(path, algorithm)?;
        println!("{} ({}): {}", path.display(), algorithm, digest);
    } else if let Some(input) = &args.string {
        let digest = hash_string(input, algorithm);
        println!("string '{}' ({}): {}", input, algorithm, digest);
    }
    Ok(())
}

fn run_json(args: JsonArgs) -> CliResult {
    let text = read_text_input(args.input.as_deref())?;
    let style = if args.compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    };

    let formatted = format_json(&text, style)?;

    match &args.output {
        Some(path) => {
            write_output(path, formatted.as_bytes())?;
            println!("Saved result to: {}", path.display());
        }
        None => println!("{}", formatted),
    }
    Ok(())
}
