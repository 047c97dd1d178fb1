//! navcrumbs CLI
//!
//! Resolves admin dashboard paths into breadcrumb trails and inspects the
//! navigation tree they are resolved against.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use navcrumbs_core::{
    format_report, format_trail, format_tree, BreadcrumbResolver, NavigationConfig, OutputFormat,
    ResolveOptions,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Breadcrumb resolution for the admin dashboard
#[derive(Parser)]
#[command(name = "navcrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve admin dashboard paths into breadcrumb trails")]
#[command(long_about = r#"
navcrumbs: Breadcrumb Resolution for the Admin Dashboard

Maps URL paths such as /admin/procesos/tareas onto the navigation tree and
prints the breadcrumb trail (title, url, current page) for each of them.
Unknown trailing segments shorten the trail; the landing page has none.

Navigation tree:
  - built-in admin dashboard tree (default)
  - --config navigation.toml | .yaml | .json

Output formats:
  - JSON (default) - entries as {title, url, isCurrentPage}
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - Titles joined with ' > '
  - HTML - <nav> breadcrumb markup

Examples:
  navcrumbs resolve /admin/procesos/tareas       # Single path
  navcrumbs resolve --from-file paths.txt        # One path per line
  navcrumbs --format ansi tree                   # Show the navigation tree
  navcrumbs --config navigation.toml check       # Validate a tree
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Navigation tree file (default: built-in tree)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the landing page of the tree
    #[arg(long, global = true)]
    pub landing: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormatArg::Json)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Number of threads for batch resolution (default: auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve paths into breadcrumb trails
    Resolve {
        /// Paths to resolve
        paths: Vec<String>,

        /// Read newline-separated paths from a file ('-' for stdin)
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Print the navigation tree
    Tree,

    /// Validate the navigation tree
    Check,
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
    Html,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
            OutputFormatArg::Html => OutputFormat::Html,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match &args.command {
        Commands::Resolve { paths, from_file } => run_resolve(paths, from_file.as_deref(), &args),
        Commands::Tree => run_tree(&args),
        Commands::Check => run_check(&args),
    }
}

/// Log to stderr, honoring RUST_LOG
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load the navigation tree named by the arguments
fn load_config(args: &Args) -> Result<NavigationConfig> {
    let config = match &args.config {
        Some(path) => NavigationConfig::from_path(path)
            .with_context(|| format!("Failed to load navigation tree from {}", path.display()))?,
        None => NavigationConfig::builtin().context("Built-in navigation tree is invalid")?,
    };

    match &args.landing {
        Some(landing) => config
            .with_landing(landing)
            .context("Invalid --landing value"),
        None => Ok(config),
    }
}

fn build_resolver(args: &Args) -> Result<BreadcrumbResolver> {
    let config = load_config(args)?;

    let mut options = ResolveOptions::default();
    if let Some(threads) = args.threads {
        options = options.with_threads(threads);
    }

    Ok(BreadcrumbResolver::with_options(config, options))
}

fn run_resolve(paths: &[String], from_file: Option<&Path>, args: &Args) -> Result<()> {
    let resolver = build_resolver(args)?;

    let mut all_paths = paths.to_vec();
    if let Some(source) = from_file {
        all_paths.extend(read_paths(source)?);
    }

    if all_paths.is_empty() {
        anyhow::bail!("No paths given; pass them as arguments or with --from-file");
    }

    let format: OutputFormat = args.format.clone().into();

    // A single path prints just its trail.
    let output = if let [path] = all_paths.as_slice() {
        let trail = resolver.resolve(path);
        debug!(path = %path, entries = trail.len(), "resolved single path");
        format_trail(&trail, format)?
    } else {
        let report = resolver
            .resolve_all(&all_paths)
            .context("Failed to resolve paths")?;
        info!(
            paths = report.stats.total_paths,
            duration_ms = report.metadata.duration_ms,
            "resolved batch"
        );
        format_report(&report, format)?
    };

    write_output(&output, args.output.as_ref())
}

fn run_tree(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let output = format_tree(&config, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_check(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let stats = config.stats();

    let source = args
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    let output = format!(
        "{} {}\n  landing: {}\n  roots: {}\n  nodes: {} ({} dynamic)\n  depth: {}",
        "✓".green().bold(),
        source.bold(),
        config.landing(),
        stats.roots,
        stats.total_nodes,
        stats.dynamic_nodes,
        stats.max_depth
    );

    write_output(&output, args.output.as_ref())
}

/// Read one path per line, skipping blanks and `#` comments
fn read_paths(source: &Path) -> Result<Vec<String>> {
    let content = if source == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read paths from stdin")?;
        buf
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read paths from {}", source.display()))?
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_args() {
        let args = Args::try_parse_from([
            "navcrumbs",
            "resolve",
            "/admin/procesos/tareas",
            "--format",
            "summary",
            "--threads",
            "2",
        ])
        .unwrap();

        assert!(matches!(args.format, OutputFormatArg::Summary));
        assert_eq!(args.threads, Some(2));
        match args.command {
            Commands::Resolve { paths, from_file } => {
                assert_eq!(paths, vec!["/admin/procesos/tareas".to_string()]);
                assert!(from_file.is_none());
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_load_builtin_with_landing_override() {
        let args = Args::try_parse_from(["navcrumbs", "--landing", "/", "check"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.landing(), "/");
    }

    #[test]
    fn test_invalid_landing_is_an_error() {
        let args = Args::try_parse_from(["navcrumbs", "--landing", "admin", "tree"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
