//! CLI command definitions, routing, and tracing setup.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use citescout_core::pipeline::{self, GenerateConfig, GenerateResult, ProgressReporter};
use citescout_shared::{AppConfig, init_config, load_config, validate_engines};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// CiteScout — turn a reference spreadsheet into a retrieval checklist.
#[derive(Parser)]
#[command(
    name = "citescout",
    version,
    about = "Turn a reference spreadsheet into a self-contained HTML retrieval checklist.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the checklist page (the default when no subcommand is given).
    Generate(GenerateArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for the `generate` command.
#[derive(clap::Args, Default)]
pub(crate) struct GenerateArgs {
    /// Input spreadsheet (defaults to the configured name in the working directory).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory (defaults to the working directory).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Output file name prefix.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Open the generated page in the default browser without asking.
    #[arg(long, conflicts_with = "no_open")]
    pub open: bool,

    /// Never open the browser.
    #[arg(long)]
    pub no_open: bool,

    /// Non-interactive: accept the default answer for every prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "citescout=info",
        1 => "citescout=debug",
        _ => "citescout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli
        .command
        .unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
    {
        Command::Generate(args) => cmd_generate(args),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config()?;
    validate_engines(&config.engines)?;

    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;

    let input_path = args
        .input
        .clone()
        .unwrap_or_else(|| cwd.join(&config.defaults.input_file));
    let output_dir = args.out_dir.clone().unwrap_or_else(|| cwd.clone());
    let output_prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config.defaults.output_prefix.clone());

    let generate_config = GenerateConfig {
        input_path: input_path.clone(),
        output_dir,
        output_prefix,
        page_title: config.defaults.page_title.clone(),
        excerpt_len: config.defaults.excerpt_len,
        batch_open_size: config.defaults.batch_open_size,
        columns: config.columns.clone(),
        engines: config.engines.clone(),
    };

    info!(input = %input_path.display(), "generating checklist page");

    let reporter = CliProgress::new();
    let result = match pipeline::generate(&generate_config, &reporter) {
        Ok(result) => result,
        Err(e) => {
            reporter.clear();
            eprintln!();
            eprintln!("  No output was produced.");
            eprintln!("  Check that:");
            eprintln!("  1. the spreadsheet is in the current working directory");
            eprintln!(
                "  2. its name matches the expected input ({})",
                input_path.display()
            );
            eprintln!("  3. the file is a valid .xlsx/.xls/.ods export");
            eprintln!();
            return Err(e.into());
        }
    };

    // Print summary
    println!();
    println!("  Checklist page generated!");
    println!("  References: {}", result.record_count);
    if result.summary.skipped > 0 {
        println!("  Skipped:    {} rows without a title", result.summary.skipped);
    }
    for (doc_type, count) in &result.summary.by_doc_type {
        println!("    {doc_type}: {count}");
    }
    println!("  Path:       {}", result.output_path.display());
    println!("  Time:       {:.1}s", result.elapsed.as_secs_f64());
    println!();

    maybe_open(&result, &args)?;
    maybe_pause(&args);

    Ok(())
}

/// Decide whether to launch the browser, prompting if nothing decided it.
fn maybe_open(result: &GenerateResult, args: &GenerateArgs) -> Result<()> {
    let open = if args.no_open {
        false
    } else if args.open || args.yes {
        true
    } else if std::io::stdin().is_terminal() {
        prompt_yes_no("Open the generated page in your browser now?", true)?
    } else {
        false
    };

    if !open {
        println!("  Open {} in a browser to start.", result.output_path.display());
        return Ok(());
    }

    let absolute = std::fs::canonicalize(&result.output_path)?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| eyre!("cannot build file:// URL for {}", absolute.display()))?;

    webbrowser::open(url.as_str()).map_err(|e| eyre!("failed to open browser: {e}"))?;
    println!("  Opened in your default browser.");

    Ok(())
}

/// Keep a double-clicked console window readable before it closes.
fn maybe_pause(args: &GenerateArgs) {
    if args.yes || !std::io::stdin().is_terminal() {
        return;
    }

    print!("Press Enter to exit...");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

fn prompt_yes_no(question: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    print!("{question} ({hint}): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    })
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_rendered(&self, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendering [{current}/{total}]"));
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
