use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "zone-cli")]
#[command(about = "Management CLI for the zone tracker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8008")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current threshold levels
    Levels,
    /// Replace all four threshold levels
    #[command(allow_negative_numbers = true)]
    SetLevels {
        green: f64,
        yellow: f64,
        red: f64,
        max: f64,
    },
    /// Show transition counters and last zone
    State,
    /// Record a zone (GREEN, YELLOW, RED or MAX)
    Record { label: String },
    /// Classify a dB reading and record its zone
    #[command(allow_negative_numbers = true)]
    Measure { db: f64 },
    /// Zero all counters
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Levels => client.get(format!("{base}/api/levels")).send().await?,
        Commands::SetLevels { green, yellow, red, max } => {
            client
                .post(format!("{base}/api/levels"))
                .json(&json!({ "GREEN": green, "YELLOW": yellow, "RED": red, "MAX": max }))
                .send()
                .await?
        }
        Commands::State => client.get(format!("{base}/api/state")).send().await?,
        Commands::Record { label } => {
            client
                .post(format!("{base}/api/state"))
                .json(&json!({ "label": label }))
                .send()
                .await?
        }
        Commands::Measure { db } => {
            client
                .post(format!("{base}/api/measure"))
                .json(&json!({ "db": db }))
                .send()
                .await?
        }
        Commands::Reset => client.post(format!("{base}/api/reset")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: zone tracker returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
