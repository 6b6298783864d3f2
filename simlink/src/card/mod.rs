// simlink/src/card/mod.rs

//! GSM 11.11 file system, CHV and identity commands.

use crate::constants::GSM_RAND_LEN;
use crate::device::{Device, Initialized};
use crate::types::FilePath;
use crate::Result;

mod descriptor;
mod info;
pub use descriptor::{FileDescriptor, FileStructure, FileType};
pub use info::{
    ChvSlot, ChvStatus, Phase, SimInfo, SmsRecord, SmsStatus, decode_dialling_number,
    decode_iccid, decode_imsi, decode_location_area,
};

/// Command functions
pub mod operations;

/// GSM command layer on top of an initialized device.
///
/// Every path is absolute and selected anew by each call, so no state is
/// kept between calls.
pub struct SimCard<'d> {
    device: &'d mut Device<Initialized>,
}

impl<'d> SimCard<'d> {
    /// Borrow `device` for GSM commands
    pub fn new(device: &'d mut Device<Initialized>) -> Self {
        Self { device }
    }

    /// Underlying device, for raw exchanges between commands
    pub fn device(&mut self) -> &mut Device<Initialized> {
        &mut *self.device
    }

    /// Select each element of `path`; one answer per element.
    pub fn select(&mut self, path: &FilePath) -> Result<Vec<Vec<u8>>> {
        operations::select(self.device, path)
    }

    /// Select `path` and decode its descriptor.
    pub fn select_descriptor(&mut self, path: &FilePath) -> Result<FileDescriptor> {
        operations::select_descriptor(self.device, path)
    }

    /// STATUS of the current directory
    pub fn status(&mut self) -> Result<Vec<u8>> {
        operations::status(self.device)
    }

    /// Single READ BINARY of `length` bytes (default: rest of the file).
    pub fn read_binary(
        &mut self,
        path: &FilePath,
        length: Option<usize>,
        offset: u16,
    ) -> Result<Vec<u8>> {
        operations::read_binary(self.device, path, length, offset)
    }

    /// Whole transparent file
    pub fn read_binary_all(&mut self, path: &FilePath) -> Result<Vec<u8>> {
        operations::read_binary_all(self.device, path)
    }

    /// Write `data` at `offset`
    pub fn update_binary(&mut self, path: &FilePath, data: &[u8], offset: u16) -> Result<()> {
        operations::update_binary(self.device, path, data, offset)
    }

    /// Record `index` (1-based)
    pub fn read_record(&mut self, path: &FilePath, index: u8) -> Result<Vec<u8>> {
        operations::read_record(self.device, path, index)
    }

    /// Every record, in order
    pub fn read_records(&mut self, path: &FilePath) -> Result<Vec<Vec<u8>>> {
        operations::read_records(self.device, path)
    }

    /// Overwrite record `index`; see [`operations::update_record`].
    pub fn update_record(
        &mut self,
        path: &FilePath,
        index: u8,
        data: &[u8],
        force_length: bool,
    ) -> Result<()> {
        operations::update_record(self.device, path, index, data, force_length)
    }

    /// Record length of the file
    pub fn record_size(&mut self, path: &FilePath) -> Result<u8> {
        operations::record_size(self.device, path)
    }

    /// Number of records in the file
    pub fn record_count(&mut self, path: &FilePath) -> Result<usize> {
        operations::record_count(self.device, path)
    }

    /// VERIFY CHV `chv`
    pub fn verify(&mut self, chv: u8, code: &str) -> Result<()> {
        operations::verify(self.device, chv, code)
    }

    /// CHANGE CHV `chv` from `old` to `new`
    pub fn change(&mut self, chv: u8, old: &str, new: &str) -> Result<()> {
        operations::change(self.device, chv, old, new)
    }

    /// DISABLE CHV1
    pub fn disable(&mut self, code: &str) -> Result<()> {
        operations::disable(self.device, code)
    }

    /// ENABLE CHV1
    pub fn enable(&mut self, code: &str) -> Result<()> {
        operations::enable(self.device, code)
    }

    /// UNBLOCK CHV `chv` and set `new_code`
    pub fn unblock(&mut self, chv: u8, unblock_code: &str, new_code: &str) -> Result<()> {
        operations::unblock(self.device, chv, unblock_code, new_code)
    }

    /// CHV1/CHV2 state
    pub fn chv_status(&mut self) -> Result<ChvStatus> {
        operations::chv_status(self.device)
    }

    /// Identity summary
    pub fn sim_info(&mut self) -> Result<SimInfo> {
        operations::sim_info(self.device)
    }

    /// LAI from EF_LOCI
    pub fn location_area(&mut self) -> Result<String> {
        operations::location_area(self.device)
    }

    /// Own number, if set
    pub fn msisdn(&mut self) -> Result<Option<String>> {
        operations::msisdn(self.device)
    }

    /// ICCID
    pub fn iccid(&mut self) -> Result<String> {
        operations::iccid(self.device)
    }

    /// IMSI without the parity nibble
    pub fn imsi(&mut self) -> Result<String> {
        operations::imsi(self.device)
    }

    /// SIM phase
    pub fn phase(&mut self) -> Result<Phase> {
        operations::phase(self.device)
    }

    /// SRES followed by Kc for `rand`
    pub fn run_gsm(&mut self, rand: &[u8; GSM_RAND_LEN]) -> Result<Vec<u8>> {
        operations::run_gsm(self.device, rand)
    }

    /// TERMINAL PROFILE
    pub fn terminal_profile(&mut self, profile: &[u8]) -> Result<()> {
        operations::terminal_profile(self.device, profile)
    }

    /// All EF_SMS records
    pub fn read_sms(&mut self) -> Result<Vec<SmsRecord>> {
        operations::read_sms(self.device)
    }
}
