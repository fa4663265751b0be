use beem::{Auth, BeemClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BeemClient::new(Auth::from_env()?)?;
    let balance = client.get_balance().await?;
    println!("credit balance: {}", balance.as_str());

    Ok(())
}
