//! Planet Wars bot.
//!
//! Speaks the game protocol on stdin/stdout; logs go to stderr or `--log-file`.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use pw_bot::{Bot, BotConfig};

#[derive(Parser)]
#[command(name = "pw-bot")]
#[command(about = "Behavior-tree Planet Wars bot", version)]
struct Cli {
    /// Strategy configuration (YAML). Built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the behavior tree and exit
    #[arg(long)]
    print_tree: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = BotConfig::load_or_default(cli.config.as_deref())?;
    let mut bot = Bot::new(&config.strategy);

    let tree = bot.policy().root().render_tree();
    if cli.print_tree {
        print!("{tree}");
        return Ok(());
    }
    tracing::info!("behavior tree:\n{tree}");

    let stdin = io::stdin();
    let stdout = io::stdout();
    bot.run(stdin.lock(), stdout.lock())
}

fn init_logging(cli: &Cli) -> Result<()> {
    // stdout belongs to the game protocol.
    let writer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(cli.log_file.is_none())
        .with_writer(writer);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
