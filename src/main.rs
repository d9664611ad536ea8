#![forbid(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use tw_theme::config::{document, loader, ColorValue, Format, ThemeConfig};
use tw_theme::constants::config::{BUILTIN_DOCUMENT, LOG_LEVEL_ENV};
use tw_theme::{content, query};

#[derive(Parser)]
#[command(name = "tw-theme")]
#[command(about = "Validate and inspect the utility-class theme configuration", long_about = None)]
struct Cli {
    /// Config file (defaults to $TW_THEME_CONFIG, then ./tailwind.config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the config and report errors and warnings
    Check,
    /// Print the value at a key path, e.g. `theme.screens.md`
    Get { key: String },
    /// Print the normalized config
    Dump {
        #[arg(long, value_enum, default_value_t = DumpFormat::Toml)]
        format: DumpFormat,
    },
    /// List the files each content pattern matches
    Files,
    /// Write the default config, or backfill missing sections with --fill
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
        /// Add missing optional sections to an existing TOML config
        #[arg(long, conflicts_with = "force")]
        fill: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Toml,
    Json,
}

fn load(path: &Path) -> Result<ThemeConfig> {
    ThemeConfig::load(path)
        .with_context(|| format!("Failed to load theme config from {}", path.display()))
}

fn log_palette(palette: &IndexMap<String, ColorValue>, prefix: &str) {
    for (name, value) in palette {
        let name = if prefix.is_empty() { name.clone() } else { format!("{prefix}-{name}") };
        match value {
            ColorValue::Color(color) => match color.hex() {
                Some(hex) => debug!(color = %name, value = %color, normalized = %hex.to_hex_string(), alpha = hex.alpha, "palette entry"),
                None => debug!(color = %name, value = %color, "palette entry"),
            },
            ColorValue::Palette(shades) => log_palette(shades, &name),
        }
    }
}

fn run_check(path: &Path) -> Result<()> {
    let report = loader::load(path)
        .with_context(|| format!("Failed to load theme config from {}", path.display()))?;

    for warning in &report.warnings {
        warn!(path = %path.display(), "{warning}");
    }

    let config = &report.config;
    info!(
        content = config.content.len(),
        font_roles = config.theme.font_family.as_ref().map_or(0, |f| f.len()),
        screens = config.theme.screens.as_ref().map_or(0, |s| s.len()),
        colors = config.theme.extend.colors.len(),
        plugins = config.plugins.len(),
        "Theme config is valid"
    );
    log_palette(&config.theme.extend.colors, "");

    println!("{}: ok, {} warning(s)", path.display(), report.warnings.len());
    Ok(())
}

fn run_get(path: &Path, key: &str) -> Result<()> {
    let config = load(path)?;
    match query::lookup(&config, key)? {
        serde_json::Value::String(s) => println!("{s}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}

fn run_dump(path: &Path, format: DumpFormat) -> Result<()> {
    let config = load(path)?;
    let text = match format {
        DumpFormat::Toml => config.to_toml_string()?,
        DumpFormat::Json => config.to_json_string()?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn run_files(path: &Path) -> Result<()> {
    let config = load(path)?;
    let root = loader::project_root(path);

    for matched in content::resolve(&root, &config.content) {
        println!("{}", matched.pattern);
        if matched.files.is_empty() {
            println!("  (no files)");
        }
        for file in &matched.files {
            println!("  {}", file.display());
        }
    }
    Ok(())
}

fn run_init(path: &Path, force: bool, fill: bool) -> Result<()> {
    let format = Format::from_path(path)?;

    if fill {
        if format != Format::Toml {
            bail!("--fill only supports TOML configs, got {}", path.display());
        }
        let added = document::fill_file(path)?;
        if added.is_empty() {
            println!("{}: nothing to add", path.display());
        } else {
            println!("{}: added {}", path.display(), added.join(", "));
        }
        return Ok(());
    }

    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", path.display());
    }

    let contents = match format {
        Format::Toml => BUILTIN_DOCUMENT.to_string(),
        Format::Json => ThemeConfig::builtin()?.to_json_string()? + "\n",
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    info!(path = %path.display(), "Wrote default theme config");
    println!("{}: written", path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // Logs go to stderr so `get` and `dump` output stays pipeable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let path = loader::config_path(cli.config.as_deref());
    debug!(path = %path.display(), "Resolved config path");

    match cli.command {
        Commands::Check => run_check(&path),
        Commands::Get { key } => run_get(&path, &key),
        Commands::Dump { format } => run_dump(&path, format),
        Commands::Files => run_files(&path),
        Commands::Init { force, fill } => run_init(&path, force, fill),
    }
}
