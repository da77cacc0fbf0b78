//! Terminal chat front end for the consultation API.
//!
//! Usage: `chat [BASE_URL]` (default `$SYMPTOMATE_URL`, then
//! `http://127.0.0.1:3001`). Type `quit` to exit.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use symptomate::client::{ConsultationClient, DEFAULT_BASE_URL};
use symptomate::consult::IntakeSession;

const WELCOME: &str = "Hello! I'm your medical consultation assistant. I can help analyze your symptoms and suggest potential conditions, recommended tests, and treatment options.\n\nPlease describe your symptoms in detail. This is for informational purposes only and should not replace professional medical advice.";

#[tokio::main]
async fn main() -> Result<()> {
    symptomate::init_tracing("warn");

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SYMPTOMATE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = ConsultationClient::new(base_url)?;

    if let Err(e) = client.health().await {
        eprintln!("warning: {} is not responding ({:#})", client.base_url(), e);
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = IntakeSession::new();

    stdout.write_all(format!("{}\n\n> ", WELCOME).as_bytes()).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }
        if message.is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let reply = client.send_message(&mut session, message).await;
        stdout.write_all(format!("\n{}\n\n> ", reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
