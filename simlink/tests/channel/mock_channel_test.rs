#[path = "../common/mod.rs"]
mod common;

use simlink::channel::{ByteChannel, MockChannel, Rx};
use simlink::protocol::{ExchangeConfig, transmit};
use simlink::{ControlLine, Error, ResetPin};

fn byte_mode() -> ExchangeConfig {
    ExchangeConfig {
        read_timeout_ms: 10,
        wait_timeout_ms: 100,
        burst: false,
    }
}

#[test]
fn boxed_channel_shares_state_with_handle() {
    common::init_logger();
    let mock = MockChannel::new();
    let mut boxed: Box<dyn ByteChannel> = Box::new(mock.clone());
    mock.push_rx(&[0x90, 0x00]);

    boxed.write(&[0xA0, 0xF2]).unwrap();
    assert_eq!(boxed.read_bytes(2, 10).unwrap(), vec![0xA0, 0xF2]);
    assert_eq!(boxed.read_bytes(4, 10).unwrap(), vec![0x90, 0x00]);
    assert_eq!(mock.writes(), vec![vec![0xA0, 0xF2]]);
    assert_eq!(mock.pending_rx(), 0);
}

#[test]
fn clear_input_drops_only_echo() {
    let mut mock = MockChannel::new();
    mock.push_rx(&[0x3B]);
    mock.write(&[0x01, 0x02]).unwrap();
    mock.clear_input().unwrap();

    assert_eq!(mock.flushes(), 1);
    assert_eq!(mock.read_byte(10).unwrap(), Some(0x3B));
}

#[test]
fn idle_byte_repeats_when_script_runs_dry() {
    let mut mock = MockChannel::new();
    mock.set_idle_byte(Some(0x60));
    mock.push_script(&[Rx::Byte(0x01), Rx::Silence]);
    assert_eq!(mock.read_byte(10).unwrap(), Some(0x01));
    assert_eq!(mock.read_byte(10).unwrap(), None);
    for _ in 0..3 {
        assert_eq!(mock.read_byte(10).unwrap(), Some(0x60));
    }
}

#[test]
fn inverted_reset_pin_releases_on_high() {
    let mut mock = MockChannel::with_reset_pin(ResetPin::new(ControlLine::Dtr, false));
    mock.queue_atr(&[0x3B, 0x00]);

    mock.set_control_line(ControlLine::Dtr, false).unwrap();
    mock.set_control_line(ControlLine::Dtr, true).unwrap();
    assert_eq!(mock.resets(), 1);
    assert_eq!(
        mock.control_events(),
        vec![(ControlLine::Dtr, false), (ControlLine::Dtr, true)]
    );
    assert_eq!(mock.read_bytes(2, 10).unwrap(), vec![0x3B, 0x00]);
}

#[test]
fn transmit_byte_mode_writes_one_byte_at_a_time() {
    let mut mock = MockChannel::new();
    transmit(&mut mock, &[0xA0, 0xA4, 0x00], &byte_mode()).unwrap();
    assert_eq!(mock.writes(), vec![vec![0xA0], vec![0xA4], vec![0x00]]);
}

#[test]
fn transmit_without_echo_fails_on_first_byte() {
    let mut mock = MockChannel::new();
    mock.set_echo(false);
    match transmit(&mut mock, &[0xA0, 0xA4], &byte_mode()) {
        Err(Error::EchoMismatch {
            position,
            expected,
            observed,
        }) => {
            assert_eq!(position, 0);
            assert_eq!(expected, 0xA0);
            assert_eq!(observed, None);
        }
        other => panic!("expected EchoMismatch, got: {:?}", other),
    }
}
