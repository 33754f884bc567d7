use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use camp_core::{BmiSource, EvaluationConfig, Gender, ReferenceRanges, Summary};
use camp_vitals::{summarize_fields, FormFields};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "camp-cli",
    about = "Classify health-camp vital readings against reference ranges."
)]
struct Cli {
    /// Log omitted metrics and summary details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one form submission.
    Evaluate(EvaluateArgs),
    /// Print the reference-range table as JSON.
    Ranges,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON submission file; use `-` for stdin. Flags below override its fields.
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(long)]
    weight: Option<String>,
    /// Height in cm.
    #[arg(long)]
    height: Option<String>,
    #[arg(long)]
    bmi: Option<String>,
    #[arg(long)]
    spo2: Option<String>,
    /// Blood pressure as `systolic/diastolic`.
    #[arg(long)]
    bp: Option<String>,
    #[arg(long)]
    blood_sugar: Option<String>,
    #[arg(long)]
    ppbs: Option<String>,
    #[arg(long)]
    hb: Option<String>,
    #[arg(long)]
    gender: Option<String>,

    #[arg(long, value_enum, default_value_t = BmiSourceArg::PreferDerived)]
    bmi_source: BmiSourceArg,
    /// Gender assumed for hemoglobin when the submission has none.
    #[arg(long, value_enum)]
    default_gender: Option<GenderArg>,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BmiSourceArg {
    PreferDerived,
    Derived,
    Submitted,
}

impl From<BmiSourceArg> for BmiSource {
    fn from(arg: BmiSourceArg) -> Self {
        match arg {
            BmiSourceArg::PreferDerived => BmiSource::PreferDerived,
            BmiSourceArg::Derived => BmiSource::Derived,
            BmiSourceArg::Submitted => BmiSource::Submitted,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Evaluate(evaluate) => run_evaluate(evaluate),
        Command::Ranges => {
            let ranges = serde_json::to_string_pretty(&ReferenceRanges::STANDARD)
                .context("Could not serialize reference ranges")?;
            println!("{ranges}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let mut fields = match &args.input {
        Some(path) => read_submission(path)?,
        None => FormFields::default(),
    };
    fields.merge(FormFields {
        weight: args.weight,
        height: args.height,
        bmi: args.bmi,
        spo2: args.spo2,
        bp: args.bp,
        blood_sugar: args.blood_sugar,
        ppbs: args.ppbs,
        hb: args.hb,
        gender: args.gender,
    });

    let config = EvaluationConfig {
        bmi_source: args.bmi_source.into(),
        default_gender: args.default_gender.map(Gender::from),
    };
    tracing::debug!(?config, "evaluating submission");
    let summary = summarize_fields(&fields, &config);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Could not serialize summary")?;
        println!("{rendered}");
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn read_submission(path: &Path) -> anyhow::Result<FormFields> {
    let data = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Could not read submission from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Could not read file {:?}", path))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&data).with_context(|| format!("Invalid JSON in {:?}", path))?;
    Ok(FormFields::from_value(&value)?)
}

fn print_summary(summary: &Summary) {
    if summary.metrics.is_empty() {
        println!("No readings could be evaluated.");
    }

    for metric in &summary.metrics {
        let value = if metric.unit.is_empty() {
            metric.value.clone()
        } else {
            format!("{} {}", metric.value, metric.unit)
        };
        println!(
            "{:<15} {:<12} {:<10} [{}] {}",
            metric.label,
            value,
            metric.status().as_str(),
            metric.verdict.status_text,
            metric.verdict.note
        );
    }

    println!("\n{}", summary.advisory().message());
}
