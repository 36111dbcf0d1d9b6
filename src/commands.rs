// src/commands.rs

use anyhow::{
    bail,
    Context,
    Result
};
use clap::Parser;
use std::{
    io::{self, Write},
    path::{
        Path,
        PathBuf
    },
};
use tracing_subscriber::EnvFilter;
use crate::{
    render::{
        self,
        IndexFormat
    },
    scan,
};

/// Build a flat CODE_INDEX of source files and their header snippets.
///
/// Walks ROOT, keeps script/markup/stylesheet sources, and writes one section
/// per file with its leading comment (or first lines) as a quick reference.
#[derive(Parser, Debug)]
#[command(name = "code-index", version)]
pub struct Cli {
    /// Directory to index
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Index file to write; relative paths resolve against ROOT
    #[arg(short, long, default_value = render::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = IndexFormat::Markdown)]
    pub format: IndexFormat,

    /// Write the index to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

pub fn run(cli: &Cli) -> Result<()> {
    let root = resolve_root(&cli.root)?;

    if cli.stdout {
        let records = scan::index_project(&root);
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        render::render(&records, cli.format, &mut lock).context("writing index to stdout")?;
        eprintln!("Wrote {} entries to stdout", records.len());
        return Ok(());
    }

    let out = output_path(&root, &cli.output);
    let n = scan::scan_and_write_index(&root, &out, cli.format)
        .with_context(|| format!("indexing {}", root.display()))?;
    println!("Wrote {} entries to {}", n, display_out(&cli.root, &cli.output, &out).display());
    io::stdout().flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        bail!("root {} is not a directory", root.display());
    }
    Ok(root.to_path_buf())
}

fn output_path(root: &Path, output: &Path) -> PathBuf {
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        root.join(output)
    }
}

/// Keep the summary line short in the default case (`CODE_INDEX.md`, not `./CODE_INDEX.md`).
fn display_out<'a>(root_arg: &Path, output_arg: &'a Path, resolved: &'a Path) -> &'a Path {
    if root_arg == Path::new(".") && output_arg.is_relative() {
        output_arg
    } else {
        resolved
    }
}

/* ================================== Tests ================================== */
