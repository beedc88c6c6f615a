#![doc = r#"
VQsX library crate.

This crate exposes the VQsX stack-pen bytecode VM, its builder, its VQsXi
image container, and the observer protocol the VM reports execution
through.

Modules:
- opcode: the 34-instruction opcode table and operand-shape metadata
- color: the named palette a `COLOR` opcode index resolves through
- status: the `STATUS` flag register and its stringifier
- error: structured container/builder error types
- builder: append-only bytecode emitter, one method per opcode
- container: VQsXi image parsing
- vm: the executor (`Vm`), its observer protocol, and its state register
- forth: an inert front-end shell (no grammar implemented)
"#]

pub mod builder;
pub mod color;
pub mod container;
pub mod error;
pub mod forth;
pub mod opcode;
pub mod status;
pub mod vm;

pub use builder::Builder;
pub use color::{palette_color, ColorName, RgbColor, PALETTE, PALETTE_LEN};
pub use container::VqsxiImage;
pub use error::{AssemblerError, BuilderError, ContainerError};
pub use forth::ForthInterpreter;
pub use opcode::{
    mnemonic_for, MnemonicEntry, Opcode, OperandShape, SetOrigin, MNEMONIC_TABLE, VQSXI_MAGIC,
};
pub use status::{status_stringify, StatusFlags};
pub use vm::{NullPolicy, ObserverHandle, StubObserver, Vm, VqsxObserver};
