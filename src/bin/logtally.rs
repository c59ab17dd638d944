use clap::Parser;
use logtally::chart::{ChartRenderer, TextCharts};
use logtally::{AnalyzeError, AnalyzeOpts};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logtally", version, about = "Access-log traffic and failed-login summary")]
struct Cli {
    /// Access log to analyze
    file: PathBuf,

    /// Failed logins above this count mark an IP as suspicious
    #[arg(long = "threshold", default_value_t = 10)]
    threshold: usize,

    /// Where to write the CSV report (overwritten if present)
    #[arg(long = "output-csv", short = 'o', default_value = "results.csv")]
    output_csv: PathBuf,

    /// Number of IPs and endpoints in the ranked lists
    #[arg(long = "top-n", default_value_t = 5)]
    top_n: usize,

    /// Skip drawing the charts
    #[arg(long = "no-charts", default_value_t = false)]
    no_charts: bool,

    /// Also print the full analysis as JSON
    #[arg(long = "json", default_value_t = false)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        let not_found = e
            .downcast_ref::<AnalyzeError>()
            .is_some_and(AnalyzeError::is_not_found);
        if not_found {
            eprintln!("Log file not found.");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let opts = AnalyzeOpts::new(cli.threshold, cli.top_n)?;
    let mut charts = TextCharts::new(io::stdout());
    let renderer: Option<&mut dyn ChartRenderer> = if cli.no_charts { None } else { Some(&mut charts) };

    let result = logtally::run(&cli.file, &cli.output_csv, &opts, renderer)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    println!("\nResults saved to {}", cli.output_csv.display());
    Ok(())
}
