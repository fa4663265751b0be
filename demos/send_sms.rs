use std::io;

use beem::{Auth, BeemClient, Message};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = std::env::var("BEEM_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_PHONE environment variable is required",
        )
    })?;
    let sender = std::env::var("BEEM_SENDER").unwrap_or_else(|_| "INFO".to_owned());
    let region = std::env::var("BEEM_REGION").unwrap_or_else(|_| "TZ".to_owned());
    let text = std::env::var("BEEM_MESSAGE")
        .unwrap_or_else(|_| "Hello from the beem demo.".to_owned());

    let client = BeemClient::new(Auth::from_env()?)?;
    let mut message = Message::new(sender, text)?;
    let recipient = message.add_recipient(&phone, None, Some(region.as_str()))?;
    println!("recipient {} -> {}", recipient.id().as_str(), recipient.destination());

    let data = client.send(message).await?;
    println!("accepted: {data}");

    Ok(())
}
