//! axelari CLI: take timed assessments, read results and talk to the study assistant.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use axelari_core::trend::DEFAULT_THRESHOLD;

mod commands;

#[derive(Parser)]
#[command(name = "axelari", version, about = "Timed learning-style assessments")]
struct Cli {
    /// Session state file (overrides `state_file` from the config)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List assessment sections and their status
    Sections,

    /// Take a section interactively
    Take {
        /// Section id
        #[arg(long)]
        section: u32,
    },

    /// Show the learning profile and section results
    Results {
        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show completed tests, or compare the two latest attempts of one test
    History {
        /// Test name to compare
        #[arg(long)]
        compare: Option<String>,

        /// Changes of at most this many points count as unchanged
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u8,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Ask the study assistant a single question
    Ask {
        /// The question
        prompt: String,
    },

    /// Chat with the study assistant
    Chat,

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        question_bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "axelari=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        config: cli.config,
        state: cli.state,
    };

    let result = match cli.command {
        Commands::Sections => commands::sections::execute(&paths),
        Commands::Take { section } => commands::take::execute(&paths, section).await,
        Commands::Results { format, output } => commands::results::execute(&paths, format, output),
        Commands::History {
            compare,
            threshold,
            format,
        } => commands::history::execute(&paths, compare, threshold, format),
        Commands::Ask { prompt } => commands::ask::execute(&paths, prompt).await,
        Commands::Chat => commands::chat::execute(&paths).await,
        Commands::Validate { question_bank } => commands::validate::execute(question_bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
