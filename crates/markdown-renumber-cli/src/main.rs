use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use markdown_renumber_config::Config;
use markdown_renumber_engine::{Document, Engine, Settings};
use std::io::Write;
use std::{fs, path::PathBuf, process};

#[derive(Parser, Debug)]
#[command(name = "markdown-renumber")]
#[command(about = "Renumber ordered lists in a markdown file", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["check", "write"])))]
struct Cli {
    /// Only report the lines that would change; exit with 1 if there are any
    #[arg(long)]
    check: bool,

    /// Rewrite the file in place instead of printing it
    #[arg(long)]
    write: bool,

    /// Config file to use (default: ~/.config/markdown-renumber/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Markdown file to renumber
    file: PathBuf,
}

/// A document whose lists needed renumbering
#[derive(Debug, Clone, PartialEq, Eq)]
struct Renumbered {
    bytes: Vec<u8>,
    /// Zero-based lines whose text changed
    lines: Vec<usize>,
}

fn load_settings(config: Option<&str>) -> Result<Settings> {
    let loaded = match config {
        Some(path) => {
            let loaded = Config::load_from_user_path(path)?;
            if loaded.is_none() {
                anyhow::bail!("Config file not found: {path}");
            }
            loaded
        }
        None => Config::load()?,
    };

    match loaded {
        Some(config) => Ok(config.settings),
        None => {
            log::debug!(
                "No config file at {}, using defaults",
                Config::config_path().display()
            );
            Ok(Settings::default())
        }
    }
}

/// Renumber every list in `bytes`; `None` when nothing needed changing.
fn renumber(bytes: &[u8], settings: Settings) -> Result<Option<Renumbered>> {
    let mut doc = Document::from_bytes(bytes)?;
    let mut engine = Engine::new(settings);
    if !engine.renumber_document(&mut doc)? {
        return Ok(None);
    }

    let lines = doc
        .last_patch()
        .map(|patch| patch.changed_lines.clone())
        .unwrap_or_default();
    Ok(Some(Renumbered {
        bytes: doc.to_bytes(),
        lines,
    }))
}

fn run(cli: &Cli) -> Result<bool> {
    let settings = load_settings(cli.config.as_deref())?;
    let bytes = fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let renumbered = renumber(&bytes, settings)?;
    match &renumbered {
        Some(r) => log::info!("{}: {} lines renumbered", cli.file.display(), r.lines.len()),
        None => log::info!("{}: already consistent", cli.file.display()),
    }
    let changed = renumbered.is_some();

    if cli.check {
        if let Some(r) = &renumbered {
            for line in &r.lines {
                println!("{}:{}: list number out of sequence", cli.file.display(), line + 1);
            }
        }
    } else if cli.write {
        if let Some(r) = renumbered {
            fs::write(&cli.file, r.bytes)
                .with_context(|| format!("Failed to write {}", cli.file.display()))?;
        }
    } else {
        let output = renumbered.map(|r| r.bytes).unwrap_or(bytes);
        std::io::stdout().write_all(&output)?;
    }

    Ok(changed)
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) if cli.check => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }
}
