// SPDX-License-Identifier: PMPL-1.0-or-later

//! idiom-match: play the idiom/proverb matching game in a terminal, and
//! inspect or deal from its catalogs.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use idiom_match::catalog::{self, EntryCatalog};
use idiom_match::config::{load_config, GameConfig};
use idiom_match::i18n::{parse_language, supported_codes};
use idiom_match::report::{self, OutputFormat, PlayTui, ReportFormatter};
use idiom_match::round;
use idiom_match::session::{Game, GameSettings, SessionContext, SystemClock};
use idiom_match::types::StoryMode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "idiom-match")]
#[command(version)]
#[command(about = "Match idioms with proverbs across six Indian languages")]
#[command(long_about = None)]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds interactively in the terminal
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Save the session summary (JSON, or YAML for .yaml/.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report data-quality findings for a catalog
    Inspect {
        #[command(flatten)]
        game: GameArgs,

        /// Inspect this catalog file instead of the mode's
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the inspection as JSON or YAML instead of text
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Deal a single round and print it
    Deal {
        #[command(flatten)]
        game: GameArgs,

        /// Print the round as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GameArgs {
    /// Config file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the catalog files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Story mode
    #[arg(short, long, value_enum)]
    mode: Option<StoryModeArg>,

    /// Language code or name (en, hi, te, ta, kn, sa)
    #[arg(short, long)]
    lang: Option<String>,

    /// Idiom slots per round
    #[arg(short, long)]
    slots: Option<usize>,

    /// RNG seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,
}

// CLI argument types
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StoryModeArg {
    Ramayan,
    Mahabharat,
    Casual,
}

impl From<StoryModeArg> for StoryMode {
    fn from(arg: StoryModeArg) -> Self {
        match arg {
            StoryModeArg::Ramayan => StoryMode::Ramayan,
            StoryModeArg::Mahabharat => StoryMode::Mahabharat,
            StoryModeArg::Casual => StoryMode::Casual,
        }
    }
}

impl GameArgs {
    /// Config file values, overridden by any flags given.
    fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(raw) = &self.lang {
            config.language = parse_language(raw).ok_or_else(|| {
                anyhow!("unsupported language '{}' (supported: {})", raw, supported_codes())
            })?;
        }
        if let Some(slots) = self.slots {
            config.slot_count = slots;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("idiom_match={}", default_level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load(config: &GameConfig) -> Result<EntryCatalog> {
    catalog::load_catalog(&config.data_dir, config.mode).with_context(|| {
        format!(
            "loading {} catalog from {}",
            config.mode,
            config.data_dir.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play { game, output } => {
            let config = game.resolve()?;
            let catalog = load(&config)?;
            let source = catalog.source().to_path_buf();

            let mut game = Game::new(
                catalog,
                GameSettings::from(&config),
                SystemClock::new(),
                SessionContext::new(config.language),
            )
            .context("setting up the first round")?;

            let context = PlayTui::run(&mut game)?;
            let summary = report::generate_summary(&context, Some(config.mode), &source);
            report::print_summary(&summary);

            if let Some(output_path) = output {
                report::save_summary(&summary, output_path)?;
            }
        }

        Commands::Inspect { game, file, format } => {
            let config = game.resolve()?;
            let catalog = match file {
                Some(path) => catalog::load_catalog_file(&path)
                    .with_context(|| format!("loading catalog {}", path.display()))?,
                None => load(&config)?,
            };

            let inspection = catalog::inspect_catalog(&catalog, config.language);
            match format {
                Some(format) => println!("{}", format.serialize(&inspection)?),
                None => ReportFormatter::new().print_inspection(&inspection),
            }
        }

        Commands::Deal { game, json } => {
            let config = game.resolve()?;
            let catalog = load(&config)?;
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let dealt = round::build_round(&catalog, config.slot_count, config.language, &mut rng)?;

            if json {
                let idioms: Vec<&str> = (0..dealt.slot_count())
                    .filter_map(|slot| dealt.idiom_text(slot))
                    .collect();
                let payload = serde_json::json!({
                    "mode": config.mode,
                    "language": config.language,
                    "idioms": idioms,
                    "proverbs": dealt.proverb_options(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "Dealt {} slots from {} ({})",
                    dealt.slot_count(),
                    config.mode,
                    dealt.language()
                );
                println!();
                ReportFormatter::new().print_round(&dealt);
            }
        }
    }

    Ok(())
}
