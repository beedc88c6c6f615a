//! Structured error taxonomy (§7).
//!
//! VM execution faults are deliberately *not* represented here: per §7 and
//! §4.3, operand underflow, unknown opcodes, reserved-opcode encounters, and
//! `NULL` under the `FAULT` policy all transition the VM to
//! `HALTED|FAULT` and notify `HALT(true)` rather than returning an `Err`.
//! Only the container parser and the builder report via `Result`.

use crate::opcode::Opcode;

/// Failures parsing a VQsXi container (§4.5).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("invalid VQsXi magic: {magic:02X?}")]
    InvalidMagic { magic: Vec<u8> },

    #[error("VQsXi header field `{field}` is truncated")]
    BadField { field: &'static str },

    #[error("VQsXi bytecode underflow: expected {expected} bytes, found {actual}")]
    BytecodeUnderflow { expected: u64, actual: u64 },
}

/// Failures building bytecode (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("value {value} out of range for {opcode:?}'s operand (0..={max})")]
    ValueOutOfRange { opcode: Opcode, value: u8, max: u8 },
}

/// Reserved for a textual assembler, which is out of core (§1, §7, §9).
/// No path in this crate constructs these variants; they exist so the
/// error kind is typed ahead of that component's eventual implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblerError {
    #[error("assembler error: {0}")]
    General(String),

    #[error("invalid label `{offender}` at line {line}")]
    InvalidLabel { offender: String, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_errors_carry_diagnostic_fields() {
        let e = ContainerError::BytecodeUnderflow {
            expected: 8,
            actual: 0,
        };
        assert_eq!(e.to_string(), "VQsXi bytecode underflow: expected 8 bytes, found 0");
    }

    #[test]
    fn builder_error_names_the_offending_opcode() {
        let e = BuilderError::ValueOutOfRange {
            opcode: Opcode::SetOrigin,
            value: 9,
            max: 2,
        };
        assert!(e.to_string().contains("SetOrigin"));
    }
}
