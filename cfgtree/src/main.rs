//! cfgtree - query network device configuration dumps as a tree
//!
//! This is the main entry point for the cfgtree CLI.

mod report;

use anyhow::Context;
use cfgtree_core::config::{ConfigLoader, ParserConfig};
use cfgtree_core::{Anomaly, DataPath};
use cfgtree_parser::{ConfigParser, Dialect};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// cfgtree - rebuild and query the configuration tree of a device dump
#[derive(Parser)]
#[command(name = "cfgtree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the configuration tree of a dump
    Parse {
        #[command(flatten)]
        input: Input,

        /// Only print the sub-trees matching this path, e.g. /configure/router
        #[arg(short, long)]
        path: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// List the path of every node of the tree
    Paths {
        #[command(flatten)]
        input: Input,
    },

    /// Print the dialect of a dump
    Detect {
        /// Path to the configuration dump
        file: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct Input {
    /// Path to the configuration dump
    file: PathBuf,

    /// Dump dialect
    #[arg(short, long, value_enum, default_value_t = DialectArg::Auto)]
    dialect: DialectArg,

    /// Parser settings file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    Auto,
    Terminated,
    Indented,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Parse { input, path, format } => {
            let parser = load(&input, cli.verbose)?;
            let path = path.map(|p| p.parse::<DataPath>()).transpose()?;

            match (format, path) {
                (Format::Json, None) => {
                    println!("{}", serde_json::to_string_pretty(&parser.to_nested_map())?);
                }
                (Format::Json, Some(path)) => {
                    println!("{}", serde_json::to_string_pretty(&parser.query(&path))?);
                }
                (Format::Text, None) => println!("{}", parser.dumps()),
                (Format::Text, Some(path)) => {
                    if let Some(tree) = parser.tree() {
                        for token in tree.query(&path) {
                            println!("{}", token.to_text(tree.indent_step()));
                        }
                    }
                }
            }
        }

        Commands::Paths { input } => {
            let parser = load(&input, cli.verbose)?;
            for path in parser.get_paths() {
                println!("{}", path);
            }
        }

        Commands::Detect { file } => {
            let source = read(&file)?;
            match Dialect::detect(&source) {
                Some(dialect) => println!("{}", dialect),
                None => {
                    eprintln!("❌ Unknown dialect: {}", file.display());
                    std::process::exit(1);
                }
            }
        }

        Commands::Version => {
            println!("cfgtree v{}", cfgtree_core::VERSION);
        }
    }

    Ok(())
}

fn read(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Read, detect and parse a dump, reporting anomalies on stderr
fn load(input: &Input, verbose: bool) -> anyhow::Result<Box<dyn ConfigParser>> {
    let source = read(&input.file)?;

    let config = match &input.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ParserConfig::default(),
    };

    let dialect = match input.dialect {
        DialectArg::Terminated => Dialect::Terminated,
        DialectArg::Indented => Dialect::Indented,
        DialectArg::Auto => Dialect::detect(&source)
            .with_context(|| format!("Cannot tell the dialect of {}, pass --dialect", input.file.display()))?,
    };
    tracing::info!(file = %input.file.display(), %dialect, "Parsing dump");

    let mut parser = dialect.parser(&config);
    parser.parse_str(&source)?;

    if let Some(tree) = parser.tree() {
        // a stray terminator is routine in these dumps, only show it on request
        let shown: Vec<Anomaly> = tree
            .anomalies()
            .iter()
            .filter(|a| verbose || !matches!(a, Anomaly::UnmatchedTerminator { .. }))
            .cloned()
            .collect();
        let name = input.file.display().to_string();
        report::print(&name, &source, &shown);

        if !tree.is_complete() {
            eprintln!("⚠️ {} looks truncated, the tree may be partial", name);
        }
    }

    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
