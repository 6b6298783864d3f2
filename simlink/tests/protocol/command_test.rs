#[path = "../common/mod.rs"]
mod common;

use simlink::protocol::{CommandPdu, ResponsePdu};
use simlink::{Error, StatusKind, StatusWord};

#[test]
fn parse_and_render_hex() {
    let cmd: CommandPdu = "A0DC0104020102".parse().unwrap();
    assert_eq!(cmd.to_string(), "a0dc0104020102");
    assert_eq!(cmd.p3() as usize, cmd.data().len());
    assert_eq!(
        cmd,
        CommandPdu::with_data(0xA0, 0xDC, 0x01, 0x04, vec![0x01, 0x02]).unwrap()
    );
    // P3 announces 28 bytes, only 2 follow
    assert!("A0DC01041C0102".parse::<CommandPdu>().is_err());
}

#[test]
fn length_mismatch_fails_before_anything_is_sent() {
    match CommandPdu::from_hex("a0d6000004aabbcc") {
        Err(Error::InvalidLength { expected, actual }) => {
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("expected InvalidLength, got: {:?}", other),
    }
    assert!(matches!(
        CommandPdu::from_hex("a0d6zz"),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn header_only_p3_is_expected_length() {
    let cmd = CommandPdu::new(0xA0, 0xB0, 0x00, 0x04, 0x05);
    assert_eq!(cmd.encode(), hex::decode("a0b0000405").unwrap());
    assert_eq!(cmd.expected_response_len(), 7);
}

#[test]
fn response_hex_ends_with_status() {
    let r = ResponsePdu::from_raw(hex::decode("0102039000").unwrap()).unwrap();
    assert_eq!(r.to_hex(), "0102039000");
    assert_eq!(r.data_hex(), "010203");

    let r = ResponsePdu::from_raw(vec![0x98, 0x40]).unwrap();
    assert_eq!(r.status().kind(), StatusKind::ChvBlocked);
    match r.check() {
        Err(e) => assert_eq!(e.status(), Some(StatusWord::new(0x98, 0x40))),
        Ok(_) => panic!("9840 must be rejected"),
    }
}
