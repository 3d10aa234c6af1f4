//! mbti-predictor CLI
//!
//! Answer the questionnaire from the command line, inspect the catalog, or
//! evaluate the fallback classifier on the configured corpus.

use clap::{Parser, Subcommand};
use mbti_predictor::classifier::evaluate;
use mbti_predictor::{load_corpus, Config, Predictor, QuestionCatalog};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mbti-predictor")]
#[command(author, version, about = "Predict an MBTI type from questionnaire answers")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict a type from answers, one per question in catalog order
    Predict {
        /// Answer texts
        answers: Vec<String>,

        /// Read answers from a JSON array of strings instead
        #[arg(long, conflicts_with = "answers")]
        answers_file: Option<PathBuf>,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the question catalog
    Questions {
        #[arg(long)]
        json: bool,
    },

    /// Train on a seeded split of the corpus and report accuracy
    Evaluate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %cli.config.display(), error = %e, "invalid configuration");
            eprintln!("Error: {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let outcome = match cli.command {
        Command::Predict {
            answers,
            answers_file,
            json,
        } => run_predict(&config, answers, answers_file, json),
        Command::Questions { json } => run_questions(&config, json),
        Command::Evaluate => run_evaluate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_predict(
    config: &Config,
    answers: Vec<String>,
    answers_file: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let answers = match answers_file {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str::<Vec<String>>(&content)?
        }
        None => answers,
    };

    let predictor = Predictor::from_config(config)?;
    let prediction = predictor.predict(&answers);

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    println!("\n===================================================================");
    println!("  MBTI Prediction");
    println!("===================================================================\n");
    println!("Answers: {}/{}", answers.len(), predictor.catalog().len());
    println!("\n{}", prediction);
    println!("\n===================================================================\n");
    Ok(())
}

fn run_questions(config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let catalog = match &config.data.questions_path {
        Some(path) => QuestionCatalog::load(path)?,
        None => QuestionCatalog::builtin()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for question in catalog.questions() {
        println!("{}. {}", question.id, question.text);
        for option in &question.options {
            println!("   [{}] {}", option.tag.as_char(), option.text);
        }
        println!();
    }
    Ok(())
}

fn run_evaluate(config: &Config) -> Result<(), Box<dyn Error>> {
    println!("\n===================================================================");
    println!("  MBTI Classifier: Evaluation");
    println!("===================================================================\n");

    println!("Loading data...");
    let records = load_corpus(&config.data.csv_path)?;
    println!("  ✓ {} records from {}\n", records.len(), config.data.csv_path);

    println!(
        "Training ({:.0}% split, seed {})...",
        config.evaluation.train_split * 100.0,
        config.evaluation.seed
    );
    let report = evaluate(&records, config)?;

    println!("\n===================================================================");
    println!("{}", report);
    println!("===================================================================\n");
    Ok(())
}
