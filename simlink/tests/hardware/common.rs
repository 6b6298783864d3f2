#![cfg(feature = "serial")]
#![allow(dead_code)]

//! 共通: 実機テスト用ヘルパー
//!
//! `--features serial` でコンパイルされる実機テスト向け。
//! `SIMLINK_PORT` が未設定の環境（CI 等）では `Ok(None)` を返す。

use std::time::Duration;

use simlink::{Device, DeviceBuilder, Initialized, Result};

pub const PORT_ENV: &str = "SIMLINK_PORT";
pub const BAUD_ENV: &str = "SIMLINK_BAUD";

fn port() -> Option<String> {
    std::env::var(PORT_ENV).ok().filter(|p| !p.is_empty())
}

fn baud() -> u32 {
    std::env::var(BAUD_ENV)
        .ok()
        .and_then(|b| b.parse().ok())
        .unwrap_or(simlink::device::DEFAULT_BAUD_RATE)
}

/// Open the reader named by `SIMLINK_PORT` and wait for a card.
///
/// - Ok(Some(device)) : a card answered reset
/// - Ok(None) : no port configured
/// - Err(e) : anything else
pub fn open_and_wait_for_card() -> Result<Option<Device<Initialized>>> {
    let Some(port) = port() else {
        return Ok(None);
    };
    let device = DeviceBuilder::new().build_serial(&port, baud())?;
    let initialized = device.wait_for_card(Some(Duration::from_secs(10)), false)?;
    Ok(Some(initialized))
}
