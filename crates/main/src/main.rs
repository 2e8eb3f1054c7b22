use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use call_report::input::load_record;
use call_report::model::{FinishingType, Location, PaymentMethod, UnitType};
use call_report::{format_report, web, AppConfig, RenderOptions, ReportRenderer};

/// Client call reports for real-estate sales: web form and PDF renderer.
///
/// Rendering needs a TrueType font family. Put the four `Roboto-*.ttf` files under
/// `assets/fonts`, point `--fonts-dir` / `CALL_REPORT_FONTS_DIR` at them, or install
/// Liberation Sans.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "CALL_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the report fonts; overrides the configuration file.
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the data-entry form over HTTP.
    Serve {
        /// Address to listen on, e.g. `0.0.0.0:8501`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Render a record file (TOML, or JSON by extension) to PDF.
    Render {
        #[arg(long, short)]
        input: PathBuf,

        /// Output file; defaults to a timestamped name in the configured output directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the text of the report a record file would produce.
    Preview {
        #[arg(long, short)]
        input: PathBuf,
    },

    /// List the fixed choices accepted by the selection fields.
    Options,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::resolve(cli.config.as_deref())?;
    if let Some(fonts_dir) = cli.fonts_dir {
        config.fonts.directory = Some(fonts_dir);
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
            runtime.block_on(web::serve(config))?;
        }
        Commands::Render { input, output } => render(&config, &input, output)?,
        Commands::Preview { input } => {
            let record = load_record(&input)?;
            let document = format_report(&record, &config.branding, Local::now().date_naive());
            for line in document.visible_text() {
                println!("{line}");
            }
        }
        Commands::Options => print_options(),
    }

    Ok(())
}

fn render(config: &AppConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let record = load_record(input)?;
    let now = Local::now().naive_local();
    let document = format_report(&record, &config.branding, now.date());
    let pdf = ReportRenderer::new(RenderOptions::from_config(config))
        .render(&document, now)
        .with_context(|| format!("rendering {}", input.display()))?;

    let output_path = match output {
        Some(path) => path,
        None => {
            fs::create_dir_all(&config.output.directory).with_context(|| {
                format!("creating {}", config.output.directory.display())
            })?;
            config.output.directory.join(&pdf.file_name)
        }
    };

    fs::write(&output_path, &pdf.bytes)
        .with_context(|| format!("writing {}", output_path.display()))?;
    println!(
        "Generated {} ({} bytes)",
        output_path.display(),
        pdf.bytes.len()
    );
    Ok(())
}

fn print_options() {
    print_choices("Unit Type", UnitType::ALL.iter().map(|c| c.label()));
    print_choices("Finishing Type", FinishingType::ALL.iter().map(|c| c.label()));
    print_choices("Location", Location::ALL.iter().map(|c| c.label()));
    print_choices("Payment Method", PaymentMethod::ALL.iter().map(|c| c.label()));
}

fn print_choices<'a>(title: &str, labels: impl Iterator<Item = &'a str>) {
    println!("{title}:");
    for label in labels {
        println!("  {label}");
    }
}
