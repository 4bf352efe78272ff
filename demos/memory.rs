// Read, write and read back a memory location in the running game
//
// Usage: cargo run --example memory -- <host> <address> [value]

use ps3mapi_client::{ClientConfig, Ps3Mapi, Session};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("ps3mapi_client=debug")
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "192.168.1.20".to_string());
    let address = args.next().unwrap_or_else(|| "10000000".to_string());
    let value = args.next();

    let client = Ps3Mapi::http(&ClientConfig::default())?;
    let mut session = Session::with_host(&host)?;

    let process_id = client.attach(&mut session)?;
    println!("✓ Attached to process {}", process_id);

    let length = value.as_ref().map(|v| (v.len() / 2).max(1) as u32).unwrap_or(4);
    let before = client.get_memory(&session, &address, length)?;
    println!("{} ({} bytes): {}", address, length, before);

    if let Some(value) = value {
        client.set_memory(&session, &address, &value)?;
        let after = client.get_memory(&session, &address, length)?;
        println!("{} after write: {}", address, after);
    }

    Ok(())
}
