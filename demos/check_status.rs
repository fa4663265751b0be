use std::io;

use beem::{Auth, BeemClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let request_id = std::env::var("BEEM_REQUEST_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_REQUEST_ID environment variable is required",
        )
    })?;
    let phone = std::env::var("BEEM_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_PHONE environment variable is required",
        )
    })?;
    let region = std::env::var("BEEM_REGION").unwrap_or_default();

    let client = BeemClient::new(Auth::from_env()?)?;
    let status = client.check_status(&request_id, &phone, &region).await?;
    println!(
        "destination: {}, status: {}, known: {:?}",
        status.destination,
        status.status.as_str(),
        status.status.known()
    );

    Ok(())
}
