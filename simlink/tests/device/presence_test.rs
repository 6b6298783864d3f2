#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use simlink::channel::{MockChannel, Rx};
use simlink::device::Device;
use simlink::test_support::{TEST_ATR, fast_config};
use simlink::Error;

fn device(mock: &MockChannel) -> Device {
    Device::new_with_channel(Box::new(mock.clone())).with_config(fast_config())
}

#[test]
fn alternating_absent_present_within_timeout() {
    common::init_logger();
    let mock = MockChannel::new();
    mock.queue_no_card();
    mock.queue_no_card();
    mock.queue_atr(&TEST_ATR);

    let timeout = Duration::from_millis(200);
    let interval = Duration::from_millis(fast_config().poll_interval_ms);
    let start = Instant::now();
    let device = device(&mock).wait_for_card(Some(timeout), false).unwrap();
    assert!(start.elapsed() < timeout + interval);
    assert_eq!(device.atr().raw, TEST_ATR.to_vec());
    assert_eq!(mock.resets(), 3);
}

#[test]
fn new_card_only_waits_for_a_swap() {
    let mock = MockChannel::new();
    mock.queue_atr(&TEST_ATR);
    mock.queue_atr(&TEST_ATR);
    mock.queue_no_card();
    mock.queue_atr(&[0x3B, 0x00]);

    let device = device(&mock)
        .wait_for_card(Some(Duration::from_secs(1)), true)
        .unwrap();
    assert_eq!(device.atr().raw, vec![0x3B, 0x00]);
    assert_eq!(mock.resets(), 4);
}

#[test]
fn half_inserted_card_is_tolerated_twice() {
    let garbage = vec![Rx::Byte(0x00)];
    let mock = MockChannel::new();
    mock.queue_no_card();
    mock.queue_atr_script(garbage.clone());
    mock.queue_atr_script(garbage.clone());
    mock.queue_atr(&TEST_ATR);
    assert!(device(&mock)
        .wait_for_card(Some(Duration::from_secs(1)), false)
        .is_ok());

    let mock = MockChannel::new();
    mock.queue_no_card();
    for _ in 0..3 {
        mock.queue_atr_script(garbage.clone());
    }
    assert!(matches!(
        device(&mock).wait_for_card(Some(Duration::from_secs(1)), false),
        Err(Error::MalformedAnswer(_))
    ));
}

#[test]
fn garbage_on_first_reset_is_raised() {
    let mock = MockChannel::new();
    mock.queue_atr_script(vec![Rx::Byte(0x00)]);
    mock.queue_atr(&TEST_ATR);
    assert!(matches!(
        device(&mock).wait_for_card(Some(Duration::from_secs(1)), false),
        Err(Error::MalformedAnswer(_))
    ));
    assert_eq!(mock.resets(), 1);
}

#[test]
fn running_session_waits_for_reinsertion() {
    let (mock, mut device) = simlink::test_support::initialized_mock_device().unwrap();
    mock.queue_atr(&TEST_ATR);
    mock.queue_no_card();
    mock.queue_atr(&[0x3B, 0x00]);

    let atr = device
        .wait_for_card(Some(Duration::from_secs(1)), true)
        .unwrap();
    assert_eq!(atr.raw, vec![0x3B, 0x00]);
}

#[test]
fn no_card_times_out() {
    let mock = MockChannel::new();
    let timeout = Duration::from_millis(30);
    let start = Instant::now();
    assert!(matches!(
        device(&mock).wait_for_card(Some(timeout), false),
        Err(Error::PresenceTimeout)
    ));
    assert!(start.elapsed() >= timeout);
}
