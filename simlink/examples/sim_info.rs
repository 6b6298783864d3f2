//! Print the identity of the SIM in a phoenix reader.
//!
//! Usage:
//!   cargo run -p simlink --example sim_info --features serial -- /dev/ttyUSB0 [baud]

use std::time::Duration;

use anyhow::Context;
use simlink::{DeviceBuilder, utils};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let port = args.next().context("usage: sim_info <port> [baud]")?;
    let baud = match args.next() {
        Some(b) => b.parse().context("baud rate must be a number")?,
        None => simlink::device::DEFAULT_BAUD_RATE,
    };

    let device = DeviceBuilder::new().build_serial(&port, baud)?;
    println!("Waiting for a card on {port} ...");
    let mut device = device.wait_for_card(Some(Duration::from_secs(30)), false)?;
    println!("ATR: {}", utils::bytes_to_hex_spaced(&device.atr().raw));

    let mut card = device.card();
    let info = card.sim_info()?;
    println!("{info}");

    match card.chv_status() {
        Ok(status) => {
            println!(
                "CHV1:   {} ({} tries left)",
                if status.chv1.enabled { "enabled" } else { "disabled" },
                status.chv1.tries_left
            );
            if let Some(chv2) = status.chv2 {
                println!("CHV2:   {} tries left", chv2.tries_left);
            }
        }
        Err(e) => println!("CHV status unavailable: {e}"),
    }
    Ok(())
}
