// Simple test to verify a console answers PS3MAPI requests
//
// Usage: cargo run --example connect -- 192.168.1.20

use ps3mapi_client::{ClientConfig, Ps3Mapi, Session};

fn main() -> anyhow::Result<()> {
    // Enable tracing
    tracing_subscriber::fmt()
        .with_env_filter("ps3mapi_client=debug")
        .init();

    let host = std::env::args().nth(1).unwrap_or_else(|| "192.168.1.20".to_string());

    println!("Connecting to PS3MAPI at {}...", host);

    let client = Ps3Mapi::http(&ClientConfig::default())?;
    let session = Session::with_host(&host)?;
    client.connect(&session)?;

    println!("✓ Connected, banner shown on screen");
    println!("Session: {:?}", session);

    Ok(())
}
