use anyhow::{Context, Result};
use cairn::areas::repository::Repository;
use cairn::artifacts::diff::hunk::DEFAULT_CONTEXT;
use cairn::artifacts::objects::object_type::ObjectType;
use clap::{ArgAction, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cairn",
    version = "0.1.0",
    about = "A minimal content-addressable storage engine",
    long_about = "Stores file contents as zlib-compressed objects named by their SHA-1, \
    keeps a git-compatible staging index, and reports how the working tree differs from it.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object store"
    )]
    HashObject {
        #[arg(short = 't', long = "type", default_value = "blob", help = "The object type")]
        kind: ObjectType,
        #[arg(short, long, help = "Write the object to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Display an object",
        long_about = "Display an object named by a (possibly abbreviated) ID. \
        MODE is one of commit, tree, blob (print raw content, checking the type), \
        size, type or pretty."
    )]
    CatFile {
        #[arg(index = 1)]
        mode: String,
        #[arg(index = 2, help = "The object ID or a prefix of at least 2 characters")]
        object: String,
    },
    #[command(name = "ls-files", about = "List the files in the index")]
    LsFiles {
        #[arg(short, long, help = "Show mode, object ID and stage number")]
        stage: bool,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "diff", about = "Show changes between the index and the working tree")]
    Diff {
        #[arg(
            short = 'U',
            long = "unified",
            default_value_t = DEFAULT_CONTEXT,
            help = "Number of context lines"
        )]
        context: usize,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(name = "write-tree", about = "Create a tree object from the index")]
    WriteTree,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cairn={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::new(path, Box::new(std::io::stdout()))
        .with_context(|| format!("unable to open repository at {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    colored::control::set_override(std::io::stdout().is_terminal());

    let pwd = std::env::current_dir().context("unable to determine the current directory")?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().unwrap_or(&pwd);
            open_repository(path)?.init()?
        }
        Commands::HashObject { kind, write, file } => {
            open_repository(&pwd)?.hash_object(file, *kind, *write)?
        }
        Commands::CatFile { mode, object } => open_repository(&pwd)?.cat_file(mode, object)?,
        Commands::LsFiles { stage } => open_repository(&pwd)?.ls_files(*stage)?,
        Commands::Status => open_repository(&pwd)?.status()?,
        Commands::Diff { context } => open_repository(&pwd)?.diff(*context)?,
        Commands::Add { paths } => open_repository(&pwd)?
            .add(paths)
            .context("unable to stage files")?,
        Commands::WriteTree => open_repository(&pwd)?.write_tree()?,
    }

    Ok(())
}
