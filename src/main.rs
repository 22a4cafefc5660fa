use std::{
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use ocrlines::{
    records::{self, LinesResponse, NO_TEXT_MESSAGE},
    Detection, LineReconstructorBuilder, DEFAULT_THRESHOLD,
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Rebuild text lines from OCR detections
#[derive(Parser, Debug)]
#[command(name = "ocrlines")]
struct Args {
    /// JSON file of detection records, or `-` for stdin
    input: Option<PathBuf>,

    /// Maximum vertical distance between a detection and the first detection of its line
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    threshold: f32,

    /// Print a JSON body instead of plain lines
    #[arg(long)]
    json: bool,
}

fn read_detections(input: Option<&PathBuf>) -> Result<Vec<Detection>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Detections file not found: {}", path.display()))?;
            records::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse detections in {}", path.display()))
        }
        _ => records::from_reader(std::io::stdin().lock())
            .context("Failed to parse detections from stdin"),
    }
}

/// Writes `lines` the way the caller asked for: a JSON body, or plain text with a header.
fn render(lines: Vec<String>, json: bool, mut out: impl Write) -> Result<()> {
    if json {
        serde_json::to_writer(&mut out, &LinesResponse::from(lines))?;
        writeln!(out)?;
    } else if lines.is_empty() {
        writeln!(out, "{NO_TEXT_MESSAGE}")?;
    } else {
        writeln!(out, "Extracted text:")?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn run(args: &Args, out: impl Write) -> Result<()> {
    let detections = read_detections(args.input.as_ref())?;
    let reconstructor = LineReconstructorBuilder::new()
        .threshold(args.threshold)
        .build()?;

    let start = Instant::now();
    let lines = reconstructor.reconstruct(&detections)?;
    log::debug!("{:?}", start.elapsed());

    render(lines, args.json, out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args, std::io::stdout().lock())
}
