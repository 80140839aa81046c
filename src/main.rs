//! genexamples — generate Go examples for the Elasticsearch reference docs.
//!
//! Reads the JSON list of console examples and, for every example whose
//! source file is enabled, writes:
//!
//! - `<output>/src/<chapter>_<digest>_test.go` — a runnable `go test` function
//! - `<output>/doc/<digest>.asciidoc` — the listing embedded in the docs
//!
//! With `-o -` the generated test source is printed to stdout instead.

use anyhow::{bail, Context, Result};
use clap::Parser;
use genexamples::generate::{self, Generator, Status};
use genexamples::{EnabledFiles, Example};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "genexamples",
    about = "Generate the Go examples for documentation"
)]
struct Cli {
    /// Path to a JSON file with the examples
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output directory, or "-" to print to stdout
    #[arg(short = 'o', long)]
    output: String,

    /// Output format: all (default), src, doc
    #[arg(short = 'f', long, default_value = "all")]
    format: String,

    /// Documentation files to process (glob patterns supported, repeatable).
    /// Replaces the built-in list.
    #[arg(short = 'e', long = "enable")]
    enable: Vec<String>,

    /// Process examples from every documentation file
    #[arg(long, conflicts_with = "enable")]
    all: bool,

    /// Stop at the first example that fails to translate
    #[arg(long)]
    fail_fast: bool,

    /// Print the generated source to stderr
    #[arg(short = 'd', long)]
    debug: bool,
}

/// Per-run counters reported at the end.
#[derive(Debug, Default)]
struct Summary {
    processed: usize,
    skipped: usize,
    untranslated: usize,
    failed: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("genexamples=info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let enabled = if cli.all {
        EnabledFiles::all()
    } else if cli.enable.is_empty() {
        EnabledFiles::default()
    } else {
        EnabledFiles::new(&cli.enable).context("invalid --enable pattern")?
    };

    let to_stdout = cli.output == "-";
    // stdout mode always prints the test source, whatever --format says
    let generators = if to_stdout {
        generate::create_generators("src")?
    } else {
        generate::create_generators(&cli.format)?
    };

    if !to_stdout {
        for generator in &generators {
            let dir = Path::new(&cli.output).join(generator.directory());
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        }
    }

    let examples = read_examples(&cli.input)?;
    let mut summary = Summary::default();

    for example in &examples {
        if !example.is_enabled(&enabled) {
            summary.skipped += 1;
            continue;
        }

        info!(example = %example.id(), digest = %example.digest(), "processing example");
        let mut status = Status::Translated;
        for generator in &generators {
            // Every generator translates the same commands, so the first outcome stands
            let current = process_example(cli, generator.as_ref(), example)?;
            if matches!(status, Status::Translated) {
                status = current;
            }
        }
        match status {
            Status::Translated => {}
            Status::Untranslated => {
                debug!(example = %example.id(), "no rule to translate the example");
                summary.untranslated += 1;
            }
            Status::Failed(err) => {
                if cli.fail_fast {
                    bail!("error processing example {}: {}", example.id(), err);
                }
                warn!(example = %example.id(), error = %err, "failed to translate example");
                summary.failed += 1;
            }
        }
        summary.processed += 1;
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        untranslated = summary.untranslated,
        failed = summary.failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "processed {} examples, skipped {}",
        summary.processed,
        summary.skipped
    );

    Ok(())
}

fn read_examples(path: &Path) -> Result<Vec<Example>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to decode input: {}", path.display()))
}

/// Render one example with one generator and write the result.
fn process_example(cli: &Cli, generator: &dyn Generator, example: &Example) -> Result<Status> {
    let rendered = generator.render(example);

    if cli.debug {
        eprintln!("{}", rendered.content);
    }

    if cli.output == "-" {
        io::stdout()
            .write_all(rendered.content.as_bytes())
            .context("failed to write output")?;
        return Ok(rendered.status);
    }

    let path = Path::new(&cli.output)
        .join(generator.directory())
        .join(generator.file_name(example));
    fs::write(&path, &rendered.content)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(rendered.status)
}
