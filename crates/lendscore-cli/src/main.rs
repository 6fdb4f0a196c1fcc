mod display;
mod input;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lendscore_ai::{DEFAULT_MODEL_PATH, Predictor};

#[derive(Parser)]
#[command(
    name = "lendscore",
    version,
    about = "Predict loan default from applicant and loan details"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every input field with its labels or accepted range.
    Fields,

    /// Encode an application and print its feature record.
    Encode {
        #[command(flatten)]
        input: InputArgs,

        /// Print the record as an Arrow table instead of a card.
        #[arg(long)]
        table: bool,
    },

    /// Predict whether an applicant is a defaulter.
    Predict {
        /// Classifier artifact (.json tree ensemble or .onnx).
        #[arg(long, env = "LENDSCORE_MODEL", default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON object of field values, e.g. {"Gender": "Male", "loan_amount": 200000}.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Set or override one field (repeatable): --set "Gender=Female".
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    tracing::debug!("lendscore v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Fields => display::print_fields(),
        Command::Encode { input: args, table } => {
            let inputs = input::read_inputs(args.input.as_deref(), &args.set)?;
            let record = lendscore_core::encode(&inputs).context("encoding application")?;
            if table {
                display::print_table(&record)?;
            } else {
                display::print_record(&record);
            }
        }
        Command::Predict {
            model,
            input: args,
            json,
        } => {
            // The artifact is loaded before any input is read; failure is fatal.
            let predictor = Predictor::try_load(&model)
                .with_context(|| format!("loading model {}", model.display()))?;

            let inputs = input::read_inputs(args.input.as_deref(), &args.set)?;
            let record = lendscore_core::encode(&inputs).context("encoding application")?;
            let verdict = predictor.predict(&record).context("running prediction")?;

            if json {
                display::print_verdict_json(verdict)?;
            } else {
                display::print_verdict(verdict);
            }
        }
    }

    Ok(())
}
