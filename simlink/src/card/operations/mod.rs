// simlink/src/card/operations/mod.rs

//! GSM 11.11 commands as free functions over an initialized device.
//! `SimCard` wraps them as methods.

pub mod binary;
pub mod chv;
pub mod gsm;
pub mod query;
pub mod record;
pub mod select;

pub use binary::{read_binary, read_binary_all, update_binary};
pub use chv::{change, disable, enable, pad_chv, unblock, verify};
pub use gsm::{read_sms, run_gsm, terminal_profile};
pub use query::{chv_status, iccid, imsi, location_area, msisdn, phase, sim_info, status};
pub use record::{read_record, read_records, record_count, record_size, update_record};
pub use select::{select, select_descriptor};
