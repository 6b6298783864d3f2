#[path = "../common/mod.rs"]
mod common;

use simlink::channel::MockChannel;
use simlink::protocol::{CommandPdu, ExchangeConfig, send, send_raw};
use simlink::{Error, StatusWord};

fn cfg(burst: bool) -> ExchangeConfig {
    ExchangeConfig {
        read_timeout_ms: 10,
        wait_timeout_ms: 50,
        burst,
    }
}

fn update_record() -> CommandPdu {
    CommandPdu::from_hex("a0dc010403aabbcc").unwrap()
}

#[test]
fn altered_echo_reports_header_position() {
    common::init_logger();
    let header = update_record().header();
    for burst in [true, false] {
        for position in 0..5 {
            let mut mock = MockChannel::new();
            mock.corrupt_echo(position, header[position] ^ 0xFF);
            match send_raw(&mut mock, &update_record(), &cfg(burst)) {
                Err(Error::EchoMismatch {
                    position: p,
                    expected,
                    observed,
                }) => {
                    assert_eq!(p, position, "burst={burst}");
                    assert_eq!(expected, header[position]);
                    assert_eq!(observed, Some(header[position] ^ 0xFF));
                }
                other => panic!("expected EchoMismatch, got: {:?}", other),
            }
        }
    }
}

#[test]
fn altered_echo_in_data_field() {
    let mut mock = MockChannel::new();
    mock.push_rx(&[0xDC]);
    // tx index 5 is the first data byte
    mock.corrupt_echo(6, 0x00);
    match send_raw(&mut mock, &update_record(), &cfg(true)) {
        Err(Error::EchoMismatch { position, .. }) => assert_eq!(position, 1),
        other => panic!("expected EchoMismatch, got: {:?}", other),
    }
}

#[test]
fn wait_bytes_before_ack_are_transparent() {
    let mut outcomes = Vec::new();
    for waits in 0..=5 {
        let mut mock = MockChannel::new();
        mock.push_rx(&vec![0x60; waits]);
        mock.push_rx(&[0xDC, 0x90, 0x00]);
        mock.push_silence();
        let r = send_raw(&mut mock, &update_record(), &cfg(true)).unwrap();
        outcomes.push((r, mock.written()));
    }
    assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(outcomes[0].0.status(), StatusWord::SUCCESS);
}

#[test]
fn endless_wait_bytes_time_out() {
    let mut mock = MockChannel::new();
    mock.set_idle_byte(Some(0x60));
    assert!(matches!(
        send_raw(&mut mock, &update_record(), &cfg(true)),
        Err(Error::Timeout)
    ));
}

#[test]
fn early_status_leaves_data_unsent() {
    let mut mock = MockChannel::new();
    mock.push_rx(&[0x67, 0x00]);
    mock.push_silence();
    let r = send_raw(&mut mock, &update_record(), &cfg(true)).unwrap();
    assert_eq!(r.status(), StatusWord::new(0x67, 0x00));
    assert_eq!(mock.written(), update_record().header().to_vec());
}

#[test]
fn get_response_after_run_gsm() {
    let mut mock = MockChannel::new();
    mock.push_rx(&[0x88, 0x9F, 0x0C]);
    mock.push_silence();
    mock.push_rx(&[0xC0]);
    mock.push_rx(&common::fixtures::GSM_AUTH_RESULT);
    mock.push_rx(&[0x90, 0x00]);
    mock.push_silence();

    let cmd = CommandPdu::with_data(0xA0, 0x88, 0x00, 0x00, common::fixtures::RAND.to_vec()).unwrap();
    let r = send(&mut mock, &cmd, &cfg(true)).unwrap();
    assert_eq!(r.data(), &common::fixtures::GSM_AUTH_RESULT);
    assert_eq!(&mock.writes()[2], &hex::decode("a0c000000c").unwrap());
}
