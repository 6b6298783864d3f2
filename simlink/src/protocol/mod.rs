// simlink/src/protocol/mod.rs

//! ATR parsing and the T=0 command/response exchange.

pub mod atr;
/// Command PDU
pub mod command;
pub mod exchange;
pub mod parser;
pub mod response;

pub use atr::{CapabilityDescriptor, Convention, InterfaceGroup};
pub use command::CommandPdu;
pub use exchange::{ExchangeConfig, send, send_and_check, send_raw, transmit};
pub use response::ResponsePdu;
