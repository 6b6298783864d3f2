// simlink/src/channel/mock.rs

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::Result;
use crate::channel::traits::ByteChannel;
use crate::types::{ControlLine, ResetPin};

/// One scripted receive event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rx {
    /// One card byte
    Byte(u8),
    /// The line stays quiet for one full read timeout
    Silence,
}

#[derive(Debug, Default)]
struct MockState {
    reset_pin: ResetPin,
    echo_enabled: bool,
    echo: VecDeque<u8>,
    rx: VecDeque<Rx>,
    /// One entry per card reset; an empty script means no card
    atr_scripts: VecDeque<Vec<Rx>>,
    idle: Option<u8>,
    echo_overrides: HashMap<usize, u8>,
    tx_count: usize,
    writes: Vec<Vec<u8>>,
    control_events: Vec<(ControlLine, bool)>,
    line_levels: HashMap<ControlLine, bool>,
    resets: usize,
    flushes: usize,
}

/// Scripted serial line for unit tests.
///
/// Every write is echoed back ahead of the scripted card bytes, like a
/// reader with TX and RX tied together. Clones share the same state, so a
/// test can box one handle into a `Device` and keep another for assertions.
///
/// The scripted receive queue models what the card *will* send, so
/// `clear_input` only drops echo bytes still pending. Answers to reset are
/// queued separately and released each time the reset line goes back to
/// its inactive level.
#[derive(Debug, Clone)]
pub struct MockChannel {
    state: Rc<RefCell<MockState>>,
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChannel {
    /// Mock with the default reset pin.
    pub fn new() -> Self {
        Self::with_reset_pin(ResetPin::default())
    }

    /// Mock whose reset line is `reset_pin`.
    pub fn with_reset_pin(reset_pin: ResetPin) -> Self {
        let state = MockState {
            reset_pin,
            echo_enabled: true,
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Queue card bytes
    pub fn push_rx(&self, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .rx
            .extend(bytes.iter().map(|&b| Rx::Byte(b)));
    }

    /// Queue one read timeout
    pub fn push_silence(&self) {
        self.state.borrow_mut().rx.push_back(Rx::Silence);
    }

    /// Queue a mixed script of bytes and silences
    pub fn push_script(&self, script: &[Rx]) {
        self.state.borrow_mut().rx.extend(script.iter().copied());
    }

    /// The next reset finds a card answering with `atr`.
    pub fn queue_atr(&self, atr: &[u8]) {
        let script = atr.iter().map(|&b| Rx::Byte(b)).collect();
        self.state.borrow_mut().atr_scripts.push_back(script);
    }

    /// The next reset finds no card.
    pub fn queue_no_card(&self) {
        self.state.borrow_mut().atr_scripts.push_back(Vec::new());
    }

    /// The next reset plays `script`.
    pub fn queue_atr_script(&self, script: Vec<Rx>) {
        self.state.borrow_mut().atr_scripts.push_back(script);
    }

    /// Byte returned forever once the receive queue runs dry.
    pub fn set_idle_byte(&self, idle: Option<u8>) {
        self.state.borrow_mut().idle = idle;
    }

    /// Turn the TX echo on or off
    pub fn set_echo(&self, enabled: bool) {
        self.state.borrow_mut().echo_enabled = enabled;
    }

    /// Echo `replacement` instead of the byte at absolute transmit index
    /// `tx_index` (counted across all writes, starting at 0).
    pub fn corrupt_echo(&self, tx_index: usize, replacement: u8) {
        self.state
            .borrow_mut()
            .echo_overrides
            .insert(tx_index, replacement);
    }

    /// All transmitted bytes, concatenated
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().writes.concat()
    }

    /// Transmitted bytes, one entry per `write` call
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    /// Forget transmitted bytes
    pub fn clear_written(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Every control line change, in order
    pub fn control_events(&self) -> Vec<(ControlLine, bool)> {
        self.state.borrow().control_events.clone()
    }

    /// Number of completed reset pulses
    pub fn resets(&self) -> usize {
        self.state.borrow().resets
    }

    /// Number of `clear_input` calls
    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }

    /// Scripted card bytes/silences not consumed yet
    pub fn pending_rx(&self) -> usize {
        self.state.borrow().rx.len()
    }
}

impl ByteChannel for MockChannel {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut st = self.state.borrow_mut();
        for &b in data {
            let idx = st.tx_count;
            st.tx_count += 1;
            if st.echo_enabled {
                let echoed = st.echo_overrides.get(&idx).copied().unwrap_or(b);
                st.echo.push_back(echoed);
            }
        }
        st.writes.push(data.to_vec());
        Ok(())
    }

    fn read_byte(&mut self, _timeout_ms: u64) -> Result<Option<u8>> {
        let mut st = self.state.borrow_mut();
        if let Some(b) = st.echo.pop_front() {
            return Ok(Some(b));
        }
        match st.rx.pop_front() {
            Some(Rx::Byte(b)) => Ok(Some(b)),
            Some(Rx::Silence) => Ok(None),
            None => Ok(st.idle),
        }
    }

    fn set_control_line(&mut self, line: ControlLine, level: bool) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.control_events.push((line, level));
        let previous = st.line_levels.insert(line, level);

        let pin = st.reset_pin;
        let released = line == pin.line
            && level == pin.inactive_level()
            && previous == Some(pin.active_level);
        if released {
            st.resets += 1;
            if let Some(script) = st.atr_scripts.pop_front() {
                st.rx.extend(script);
            }
        }
        Ok(())
    }

    fn clear_input(&mut self) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.echo.clear();
        st.flushes += 1;
        Ok(())
    }
}
