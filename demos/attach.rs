// List console processes and attach to the running game

use ps3mapi_client::{ClientConfig, Ps3Mapi, Session};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("ps3mapi_client=info")
        .init();

    let host = std::env::args().nth(1).unwrap_or_else(|| "192.168.1.20".to_string());

    let client = Ps3Mapi::http(&ClientConfig::default())?;
    let mut session = Session::with_host(&host)?;

    println!("Processes on {}:", host);
    for process in client.list_processes(&session)? {
        let marker = if process.is_eboot() { "  <- EBOOT" } else { "" };
        println!("  {:>10}  {}{}", process.id, process.label, marker);
    }

    match client.attach(&mut session) {
        Ok(process_id) => println!("\n✓ Attached to process {}", process_id),
        Err(e) => println!("\n✗ Could not attach ({:?}): {}", e.kind(), e),
    }

    Ok(())
}
