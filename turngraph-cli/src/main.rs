//! turngraph binary: parse the subcommand, load `.env` config, set up logging and run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use turngraph_cli::{
    classify_command, debate_command, debate_log_file, draw_command, init_tracing, Error,
    GraphKind, RunConfig, RunOptions, CLASSIFY_LOG_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "turngraph")]
#[command(about = "Self-healing classification and Scientist vs Philosopher debate")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify sentiment; asks for clarification when confidence is low
    Classify {
        /// Text to classify; omit for an interactive loop (blank line quits)
        #[arg(short, long, value_name = "TEXT")]
        text: Option<String>,
        /// Confidence threshold in (0, 1); overrides CONFIDENCE_THRESHOLD
        #[arg(long, value_name = "X")]
        threshold: Option<f32>,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
        /// Log node enter/exit
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run an eight-turn debate and a judge verdict
    Debate {
        /// Debate topic; overrides DEBATE_TOPIC
        #[arg(short, long, value_name = "TOPIC")]
        topic: Option<String>,
        /// Print the verdict and transcript as JSON
        #[arg(long)]
        json: bool,
        /// Log node enter/exit
        #[arg(short, long)]
        verbose: bool,
    },
    /// Write a pipeline topology as Graphviz DOT into ARTIFACTS_DIR
    Draw {
        #[arg(value_enum)]
        graph: GraphKind,
        /// Output file (relative paths land in ARTIFACTS_DIR)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

async fn run(cli: Cli) -> Result<(), Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;

    match cli.command {
        Command::Classify {
            text,
            threshold,
            json,
            verbose,
        } => {
            config.apply_options(&RunOptions {
                threshold,
                json,
                verbose,
                ..RunOptions::default()
            })?;
            init_tracing(&config.log_dir, CLASSIFY_LOG_FILE, config.verbose)?;
            classify_command(&config, text).await
        }
        Command::Debate {
            topic,
            json,
            verbose,
        } => {
            config.apply_options(&RunOptions {
                topic,
                json,
                verbose,
                ..RunOptions::default()
            })?;
            let log = init_tracing(
                &config.log_dir,
                &debate_log_file(chrono::Local::now()),
                config.verbose,
            )?;
            debate_command(&config, &log).await
        }
        Command::Draw { graph, output } => {
            init_tracing(&config.log_dir, CLASSIFY_LOG_FILE, false)?;
            let path = draw_command(&config, graph, output.as_deref())?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
