// Shared helpers for the integration tests. Each test module pulls this in
// with `#[path = "../common/mod.rs"] mod common;`.
#![allow(dead_code)]

pub mod helpers;

/// Route `log` output through env_logger (RUST_LOG=debug to see exchanges).
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
