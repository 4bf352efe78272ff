// Exercise the console's LED, buzzer and notification commands

use ps3mapi_client::{BuzzerMode, ClientConfig, LightColor, LightMode, Ps3Mapi, Session};
use std::thread::sleep;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("ps3mapi_client=info")
        .init();

    let host = std::env::args().nth(1).unwrap_or_else(|| "192.168.1.20".to_string());

    let client = Ps3Mapi::http(&ClientConfig::default())?;
    let session = Session::with_host(&host)?;
    client.connect(&session)?;

    client.notify(&session, "Hello from ps3mapi-client")?;
    println!("✓ Notification sent");

    for color in [LightColor::Red, LightColor::Green, LightColor::Yellow] {
        client.set_lights(&session, color, LightMode::BlinkFast)?;
        println!("  LED {:?} blinking", color);
        sleep(Duration::from_secs(2));
        client.set_lights(&session, color, LightMode::Off)?;
    }
    client.set_lights(&session, LightColor::Green, LightMode::On)?;

    client.ring_buzzer(&session, BuzzerMode::Double)?;
    println!("✓ Buzzer rang");

    Ok(())
}
