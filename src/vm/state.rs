//! VM state register: `MST`, `IPC`, `STATUS`, and the loaded bytecode
//! buffer (§3).
//!
//! Plain fields plus read-then-advance fetch helpers and bit-flag assign
//! helpers, generalized to a two-bit `HALTED`/`FAULT` `StatusFlags` word
//! rather than a single `halted: bool`, since `FAULT ⇒ HALTED` must be
//! representable as a real invariant, not folded into one boolean.

use crate::status::StatusFlags;

/// The executor's state register plus its owned bytecode buffer.
#[derive(Debug, Clone, Default)]
pub struct VmState {
    bytecode: Vec<u8>,
    mst: usize,
    ipc: usize,
    status: StatusFlags,
}

impl VmState {
    pub fn new() -> Self {
        VmState::default()
    }

    pub fn ipc(&self) -> usize {
        self.ipc
    }

    pub fn mst(&self) -> usize {
        self.mst
    }

    pub fn status(&self) -> StatusFlags {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status.contains(StatusFlags::HALTED)
    }

    pub fn is_fault(&self) -> bool {
        self.status.contains(StatusFlags::FAULT)
    }

    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }

    /// Installs a new bytecode buffer and resets execution state (`load`
    /// implies a fresh `reset`, matching the base executor's behavior in
    /// the source: loading always starts from `MST`).
    pub fn load(&mut self, bytecode: Vec<u8>) {
        self.bytecode = bytecode;
        self.reset();
    }

    /// Restores `IPC = MST = 0` and clears `STATUS` to `ZERO` (§8: "`load`
    /// followed by `reset` restores `IPC = MST = 0` and clears `FAULT`").
    pub fn reset(&mut self) {
        self.mst = 0;
        self.ipc = self.mst;
        self.status = StatusFlags::ZERO;
    }

    /// Sets a clean halt: `HALTED` set, `FAULT` clear.
    pub fn halt_clean(&mut self) {
        self.status.remove(StatusFlags::FAULT);
        self.status.insert(StatusFlags::HALTED);
    }

    /// Sets a faulting halt: both `HALTED` and `FAULT` set.
    pub fn halt_faulting(&mut self) {
        self.status.insert(StatusFlags::HALTED | StatusFlags::FAULT);
    }

    /// Reads one byte at `IPC` and advances `IPC` by one. Returns `None`
    /// without mutating `IPC` if the read would run past the end of the
    /// buffer.
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.bytecode.get(self.ipc)?;
        self.ipc += 1;
        Some(byte)
    }

    /// Reads 8 little-endian bytes at `IPC`, reinterpreted as a signed
    /// 64-bit integer (per §9's open-question resolution: a bit-preserving
    /// reinterpretation of the same 8 bytes an unsigned read would
    /// consume), and advances `IPC` by 8. Returns `None` (without mutating
    /// `IPC`) on underflow.
    pub fn read_i64(&mut self) -> Option<i64> {
        let bytes: [u8; 8] = self.bytecode.get(self.ipc..self.ipc + 8)?.try_into().ok()?;
        self.ipc += 8;
        Some(i64::from_le_bytes(bytes))
    }

    /// Reads 8 little-endian bytes at `IPC` as an IEEE 754 binary64 and
    /// advances `IPC` by 8.
    pub fn read_f64(&mut self) -> Option<f64> {
        let bytes: [u8; 8] = self.bytecode.get(self.ipc..self.ipc + 8)?.try_into().ok()?;
        self.ipc += 8;
        Some(f64::from_le_bytes(bytes))
    }

    /// Reads two consecutive signed 64-bit fields (`POSITION`, `DRAW`).
    pub fn read_i64_pair(&mut self) -> Option<(i64, i64)> {
        let a = self.read_i64()?;
        let b = self.read_i64()?;
        Some((a, b))
    }
}
