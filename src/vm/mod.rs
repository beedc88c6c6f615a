//! The VQsX executor facade (§4.1, §4.3): [`Vm`] wraps [`VmState`] — a thin
//! owner that holds the register file plus the collaborators that observe
//! it, and exposes `step`/`run`/`load`/`reset` as its public surface.

mod dispatch;
mod observer;
mod state;
mod table;

pub use observer::{ObserverHandle, StubObserver, VqsxObserver};
pub use state::VmState;

use observer::ObserverSet;

/// What opcode `0x00` (`NULL`) does, fixed when the VM is constructed
/// (§3, §4.3, §9 "Null-opcode policy"). Never changes mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Treated as a no-op; execution continues to the next instruction.
    Noop,
    /// Halts cleanly (`HALTED` set, `FAULT` clear).
    Halt,
    /// Halts faulting (`HALTED` and `FAULT` both set).
    Fault,
}

/// The VQsX executor: state register plus its bytecode and observers.
///
/// Construction fixes the [`NullPolicy`]; everything else (`load`, `reset`,
/// `step`, `run`) is mutation through `&mut self`.
pub struct Vm {
    state: VmState,
    null_policy: NullPolicy,
    observers: ObserverSet,
}

impl Vm {
    pub fn new(null_policy: NullPolicy) -> Self {
        Vm {
            state: VmState::new(),
            null_policy,
            observers: ObserverSet::new(),
        }
    }

    /// Installs a new bytecode buffer and resets execution state. Does not
    /// touch registered observers.
    pub fn load(&mut self, bytecode: impl Into<Vec<u8>>) {
        self.state.load(bytecode.into());
    }

    /// Restores `IPC = MST = 0`, clears `STATUS`, and notifies `RESET`.
    pub fn reset(&mut self) {
        self.state.reset();
        self.observers.notify_reset();
    }

    /// Executes a single instruction. A no-op if already halted.
    pub fn step(&mut self) {
        dispatch::step(self);
    }

    /// Resets, then steps until `HALTED` is set (§4.3).
    pub fn run(&mut self) {
        dispatch::run(self);
    }

    /// Registers an observer. The caller must keep the handle alive for
    /// the observer to keep receiving events (§4.4); returns `false` if
    /// this exact handle was already registered.
    pub fn register_observer(&mut self, observer: &ObserverHandle) -> bool {
        self.observers.register(observer)
    }

    /// Deregisters a previously registered observer. Returns whether a
    /// matching handle was found (by pointer identity).
    pub fn deregister_observer(&mut self, observer: &ObserverHandle) -> bool {
        self.observers.deregister(observer)
    }

    pub fn status(&self) -> crate::status::StatusFlags {
        self.state.status()
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn is_fault(&self) -> bool {
        self.state.is_fault()
    }

    pub fn ipc(&self) -> usize {
        self.state.ipc()
    }

    pub fn mst(&self) -> usize {
        self.state.mst()
    }

    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }
}
