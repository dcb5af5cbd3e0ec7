//! thyra: thyroid nodule analysis CLI
//!
//! Classify an ultrasound image and produce the clinical report, the
//! narration text, or the HTML summary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::LazyLock;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use thyra::config::Config;
use thyra::{
    Analyzer, ClassificationResult, ClassifierHandle, ConfidenceChart, ConfidenceTier,
    DecodedImage, InterpretationBand, PatientInfo, ReportFormat, ThyraError,
};

const MODEL_MISSING: &str = "Model files not found. Please ensure 'cnn_thyroid_model.onnx' and \
'label_encoder.json' are in the model directory (set THYRA_MODEL_DIR or [model] in the config).\n\
Cannot proceed without model files. Please check your setup.";

static VERSION: LazyLock<String> = LazyLock::new(thyra::version_string);

/// Thyra CLI
#[derive(Parser)]
#[command(name = "thyra")]
#[command(version = VERSION.as_str())]
#[command(about = "AI thyroid nodule classification and reporting")]
struct Cli {
    /// Config file (default: ~/.thyra/config.toml, then /etc/thyra/config.toml)
    #[arg(short, long, env = "THYRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify an image and print the results
    Analyze {
        /// Ultrasound image (JPEG or PNG)
        image: PathBuf,
        /// Print result and chart data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify an image and write the clinical report
    Report {
        /// Ultrasound image (JPEG or PNG)
        image: PathBuf,
        #[command(flatten)]
        patient: PatientArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Pdf)]
        format: FormatArg,
        /// Output file (default: generated name in the configured output dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the spoken-style summary
    Narrate {
        image: PathBuf,
        /// Patient name to address
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the HTML summary fragment
    Summary {
        image: PathBuf,
        /// Patient name to show
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Args)]
struct PatientArgs {
    /// Patient name (required)
    #[arg(long)]
    name: String,
    #[arg(long)]
    patient_id: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Scan date, YYYY-MM-DD
    #[arg(long)]
    scan_date: Option<NaiveDate>,
    /// Referring physician
    #[arg(long)]
    physician: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl PatientArgs {
    fn into_patient(self) -> PatientInfo {
        let mut patient = PatientInfo::new(self.name);
        if let Some(id) = self.patient_id {
            patient = patient.patient_id(id);
        }
        if let Some(age) = self.age {
            patient = patient.age(age);
        }
        if let Some(gender) = self.gender {
            patient = patient.gender(gender);
        }
        if let Some(date) = self.scan_date {
            patient = patient.scan_date(date);
        }
        if let Some(physician) = self.physician {
            patient = patient.physician(physician);
        }
        if let Some(notes) = self.notes {
            patient = patient.clinical_notes(notes);
        }
        patient
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Text,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => ReportFormat::Pdf,
            FormatArg::Text => ReportFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = %*VERSION, "thyra starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ThyraError::ModelUnavailable { artifact, reason }) => {
            eprintln!("{MODEL_MISSING}");
            tracing::warn!(%artifact, %reason, "model unavailable");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> thyra::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let handle = ClassifierHandle::load(&config.model_config()?)?;
    let analyzer = Analyzer::new(handle);

    match cli.command {
        Command::Analyze { image, json } => {
            let (decoded, result) = analyze_file(&analyzer, &image)?;
            let chart = analyzer.chart(&result);
            if json {
                let payload = serde_json::json!({
                    "image": decoded.details,
                    "result": result,
                    "chart": chart,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_analysis(&decoded, &result, &chart);
            }
        }

        Command::Report {
            image,
            patient,
            format,
            out,
        } => {
            let patient = patient.into_patient();
            // Refuse before spending an inference on a nameless report.
            patient.require_name()?;
            let (_, result) = analyze_file(&analyzer, &image)?;
            let report = analyzer.generate_report(&result, &patient, format.into())?;
            let path = out.unwrap_or_else(|| config.report.output_dir.join(&report.file_name));
            std::fs::write(&path, &report.bytes).map_err(|e| {
                ThyraError::Rendering(format!("Failed to write report {path:?}: {e}"))
            })?;
            println!("report {} written to {}", report.report_id, path.display());
        }

        Command::Narrate { image, name } => {
            let (_, result) = analyze_file(&analyzer, &image)?;
            println!("{}", analyzer.narrate(&result, name.as_deref()));
        }

        Command::Summary { image, name } => {
            let (_, result) = analyze_file(&analyzer, &image)?;
            let patient = name.map(PatientInfo::new);
            println!("{}", analyzer.summary(&result, patient.as_ref()));
        }
    }

    Ok(())
}

fn analyze_file(
    analyzer: &Analyzer,
    path: &Path,
) -> thyra::Result<(DecodedImage, ClassificationResult)> {
    let bytes = std::fs::read(path)
        .map_err(|e| ThyraError::ImageDecode(format!("Failed to read {path:?}: {e}")))?;
    analyzer.analyze_bytes(&bytes)
}

fn print_analysis(decoded: &DecodedImage, result: &ClassificationResult, chart: &ConfidenceChart) {
    let details = &decoded.details;
    println!(
        "image: {}x{} {} ({})",
        details.width,
        details.height,
        details.format.as_deref().unwrap_or("unknown"),
        details.mode
    );
    println!(
        "prediction: {} ({:.1}% confidence)",
        thyra::report::headline(result.predicted_label()),
        result.confidence()
    );
    println!(
        "confidence level: {}",
        ConfidenceTier::from_percent(result.confidence())
    );
    println!(
        "{}",
        InterpretationBand::from_percent(result.confidence()).message()
    );
    for tile in &chart.metrics {
        println!("{}: {} ({})", tile.label, tile.value, tile.delta);
    }
}
