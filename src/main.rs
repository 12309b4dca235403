mod fetch;
mod output;
mod parser;

use clap::Parser;

#[derive(Parser)]
#[command(name = "fandom_scraper", about = "Extract a structured record from one Fandom item page")]
struct Cli {
    /// Page URL to extract from
    url: String,

    /// Emit the record as a single-line JSON payload instead of a report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only the record.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let url = cli.url.trim();

    let html = fetch::fetch_html(url).await?;
    let record = parser::process_page(&html);

    if cli.json {
        output::print_json(&record)?;
    } else {
        output::print_report(&record)?;
    }

    Ok(())
}
