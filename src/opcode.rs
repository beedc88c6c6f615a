//! Opcode table and packed-layout constants.
//!
//! The encoding here is authoritative: every instruction is one opcode byte
//! followed by its operand bytes, in the order given by [`Opcode::shape`].
//! There are no prefixes and no variable-length fields; all multi-byte
//! operands are little-endian.

/// Five-byte magic that opens a VQsXi container.
pub const VQSXI_MAGIC: [u8; 5] = *b"VQsXi";

/// One of the 34 defined VQsX instructions, `0x00..=0x21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Null = 0x00,
    Position = 0x01,
    Center = 0x02,
    Origin = 0x03,
    SetOrigin = 0x04,
    Brightness = 0x05,
    Scale = 0x06,
    Color = 0x07,
    Draw = 0x08,
    Forward = 0x09,
    Backwards = 0x0A,
    DrawForward = 0x0B,
    DrawBackwards = 0x0C,
    RotateDeg = 0x0D,
    RotateRad = 0x0E,
    RotateRDeg = 0x0F,
    RotateRRad = 0x10,
    RotateOrigin = 0x11,
    RotateSetOrigin = 0x12,
    StPush = 0x13,
    StPop = 0x14,
    PsPush = 0x15,
    PsPop = 0x16,
    Initialize = 0x17,
    Jump = 0x18,
    Call = 0x19,
    JumpIpc = 0x1A,
    CallIpc = 0x1B,
    JumpMst = 0x1C,
    CallMst = 0x1D,
    Return = 0x1E,
    Halt = 0x1F,
    WaitNext = 0x20,
    Noop = 0x21,
}

/// Classifies an opcode's operand block by byte width, independent of the
/// signed/typed interpretation individual opcodes give those bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    /// No operand bytes.
    None,
    /// One byte.
    U8,
    /// Eight bytes (signed or unsigned 64-bit integer; the opcode table in
    /// §6 prescribes which).
    Wide,
    /// Eight bytes, IEEE 754 binary64.
    F64,
    /// Two one-byte fields. Declared for completeness; no current opcode
    /// uses this shape.
    U8Pair,
    /// Two eight-byte fields (e.g. `POSITION`, `DRAW`).
    WidePair,
}

impl OperandShape {
    /// Number of operand bytes following the opcode byte for this shape.
    pub const fn byte_len(self) -> usize {
        match self {
            OperandShape::None => 0,
            OperandShape::U8 => 1,
            OperandShape::Wide => 8,
            OperandShape::F64 => 8,
            OperandShape::U8Pair => 2,
            OperandShape::WidePair => 16,
        }
    }
}

impl Opcode {
    /// Decodes a raw byte into a defined opcode, or `None` if it falls
    /// outside `0x00..=0x21`.
    pub const fn from_u8(raw: u8) -> Option<Opcode> {
        use Opcode::*;
        Some(match raw {
            0x00 => Null,
            0x01 => Position,
            0x02 => Center,
            0x03 => Origin,
            0x04 => SetOrigin,
            0x05 => Brightness,
            0x06 => Scale,
            0x07 => Color,
            0x08 => Draw,
            0x09 => Forward,
            0x0A => Backwards,
            0x0B => DrawForward,
            0x0C => DrawBackwards,
            0x0D => RotateDeg,
            0x0E => RotateRad,
            0x0F => RotateRDeg,
            0x10 => RotateRRad,
            0x11 => RotateOrigin,
            0x12 => RotateSetOrigin,
            0x13 => StPush,
            0x14 => StPop,
            0x15 => PsPush,
            0x16 => PsPop,
            0x17 => Initialize,
            0x18 => Jump,
            0x19 => Call,
            0x1A => JumpIpc,
            0x1B => CallIpc,
            0x1C => JumpMst,
            0x1D => CallMst,
            0x1E => Return,
            0x1F => Halt,
            0x20 => WaitNext,
            0x21 => Noop,
            _ => return None,
        })
    }

    /// Raw opcode byte.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Operand byte-width classification, per §6.
    pub const fn shape(self) -> OperandShape {
        use Opcode::*;
        use OperandShape::*;
        match self {
            Null | Center | Origin | RotateOrigin | StPush | StPop | PsPush | PsPop
            | Initialize | Jump | Call | JumpIpc | CallIpc | JumpMst | CallMst | Return
            | Halt | WaitNext | Noop => None,
            SetOrigin | Brightness | Scale | Color | RotateSetOrigin => U8,
            Forward | Backwards | DrawForward | DrawBackwards => Wide,
            RotateDeg | RotateRad | RotateRDeg | RotateRRad => F64,
            Position | Draw => WidePair,
        }
    }

    /// True for `JUMP/CALL/JUMPIPC/CALLIPC/JUMPMST/CALLMST/RETURN/WAITNEXT`:
    /// opcodes that decode successfully but are not implemented and must
    /// faulting-halt rather than execute (§4.3, §9 "Reserved opcodes").
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Opcode::Jump
                | Opcode::Call
                | Opcode::JumpIpc
                | Opcode::CallIpc
                | Opcode::JumpMst
                | Opcode::CallMst
                | Opcode::Return
                | Opcode::WaitNext
        )
    }

    /// Whether this opcode behaves as a no-op, optionally counting `NULL`
    /// as one under a `NOOP`-policy executor. Diagnostic helper, not
    /// consulted by the dispatcher itself (which branches on `NullPolicy`
    /// directly); mirrors the source's `is_noop(inst, isnull_noop)`.
    pub const fn is_noop(self, null_is_noop: bool) -> bool {
        matches!(self, Opcode::Noop) || (null_is_noop && matches!(self, Opcode::Null))
    }

    /// Whether this opcode behaves as a halt, optionally counting `NULL`
    /// as one under a `HALT`/`FAULT`-policy executor. Mirrors the source's
    /// `is_halt(inst, isnull_halt)`.
    pub const fn is_halt(self, null_is_halt: bool) -> bool {
        matches!(self, Opcode::Halt) || (null_is_halt && matches!(self, Opcode::Null))
    }
}

/// Enumerated values for `SETORIGIN`/`ROTATESETORIGIN`'s `u8` operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SetOrigin {
    TopLeft = 0,
    Center = 1,
    BottomLeft = 2,
}

impl SetOrigin {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(raw: u8) -> Option<SetOrigin> {
        match raw {
            0 => Some(SetOrigin::TopLeft),
            1 => Some(SetOrigin::Center),
            2 => Some(SetOrigin::BottomLeft),
            _ => None,
        }
    }
}

/// A diagnostic-only record pairing an opcode with its name and a short
/// mnemonic. Used by debuggers/disassemblers; never consulted by the
/// executor or builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MnemonicEntry {
    pub opcode: Opcode,
    pub name: &'static str,
    pub mnemonic: &'static str,
}

/// The complete 34-entry mnemonic table. The retrieved source only
/// populated entries through `COLOR`; the remaining 26 are filled in here
/// following the same abbreviation style (see SPEC_FULL.md §3.1).
pub const MNEMONIC_TABLE: [MnemonicEntry; 34] = {
    macro_rules! entry {
        ($op:ident, $name:literal, $mnemonic:literal) => {
            MnemonicEntry {
                opcode: Opcode::$op,
                name: $name,
                mnemonic: $mnemonic,
            }
        };
    }
    [
        entry!(Null, "null", "nul"),
        entry!(Position, "position", "pos"),
        entry!(Center, "center", "ctr"),
        entry!(Origin, "origin", "org"),
        entry!(SetOrigin, "setorigin", "sor"),
        entry!(Brightness, "brightness", "brt"),
        entry!(Scale, "scale", "scl"),
        entry!(Color, "color", "clr"),
        entry!(Draw, "draw", "drw"),
        entry!(Forward, "forward", "fwd"),
        entry!(Backwards, "backwards", "bck"),
        entry!(DrawForward, "drawforward", "dfw"),
        entry!(DrawBackwards, "drawbackwards", "dbk"),
        entry!(RotateDeg, "rotatedeg", "rtd"),
        entry!(RotateRad, "rotaterad", "rtr"),
        entry!(RotateRDeg, "rotaterdeg", "rrd"),
        entry!(RotateRRad, "rotaterrad", "rrr"),
        entry!(RotateOrigin, "rotateorigin", "rto"),
        entry!(RotateSetOrigin, "rotatesetorigin", "rso"),
        entry!(StPush, "statepush", "stp"),
        entry!(StPop, "statepop", "stq"),
        entry!(PsPush, "penstatepush", "psp"),
        entry!(PsPop, "penstatepop", "psq"),
        entry!(Initialize, "initialize", "ini"),
        entry!(Jump, "jump", "jmp"),
        entry!(Call, "call", "cal"),
        entry!(JumpIpc, "jumpipc", "jpi"),
        entry!(CallIpc, "callipc", "cpi"),
        entry!(JumpMst, "jumpmst", "jpm"),
        entry!(CallMst, "callmst", "cpm"),
        entry!(Return, "return", "ret"),
        entry!(Halt, "halt", "hlt"),
        entry!(WaitNext, "waitnext", "wnx"),
        entry!(Noop, "noop", "nop"),
    ]
};

/// Looks up an opcode's diagnostic [`MnemonicEntry`]. Mirrors the source's
/// `inst_to_name`; unlike that revision's partial table, every defined
/// opcode resolves here (§3.1).
pub fn mnemonic_for(opcode: Opcode) -> &'static MnemonicEntry {
    MNEMONIC_TABLE
        .iter()
        .find(|e| e.opcode == opcode)
        .expect("MNEMONIC_TABLE covers every defined opcode")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_range_matches_table() {
        for raw in 0x00u8..=0x21 {
            assert!(Opcode::from_u8(raw).is_some(), "0x{raw:02X} should decode");
        }
        assert!(Opcode::from_u8(0x22).is_none());
        assert!(Opcode::from_u8(0xFF).is_none());
    }

    #[test]
    fn round_trip_opcode_byte() {
        for raw in 0x00u8..=0x21 {
            let op = Opcode::from_u8(raw).unwrap();
            assert_eq!(op.as_u8(), raw);
        }
    }

    #[test]
    fn position_and_draw_are_wide_pairs() {
        assert_eq!(Opcode::Position.shape(), OperandShape::WidePair);
        assert_eq!(Opcode::Draw.shape(), OperandShape::WidePair);
        assert_eq!(Opcode::Position.shape().byte_len(), 16);
    }

    #[test]
    fn reserved_opcodes_have_no_operand_bytes() {
        for op in [
            Opcode::Jump,
            Opcode::Call,
            Opcode::JumpIpc,
            Opcode::CallIpc,
            Opcode::JumpMst,
            Opcode::CallMst,
            Opcode::Return,
            Opcode::WaitNext,
        ] {
            assert!(op.is_reserved());
            assert_eq!(op.shape(), OperandShape::None);
        }
        assert!(!Opcode::Noop.is_reserved());
    }

    #[test]
    fn mnemonic_table_covers_every_opcode() {
        assert_eq!(MNEMONIC_TABLE.len(), 34);
        for raw in 0x00u8..=0x21 {
            let op = Opcode::from_u8(raw).unwrap();
            assert!(MNEMONIC_TABLE.iter().any(|e| e.opcode == op));
        }
    }

    #[test]
    fn set_origin_round_trips_and_rejects_out_of_range() {
        assert_eq!(SetOrigin::from_u8(0), Some(SetOrigin::TopLeft));
        assert_eq!(SetOrigin::from_u8(1), Some(SetOrigin::Center));
        assert_eq!(SetOrigin::from_u8(2), Some(SetOrigin::BottomLeft));
        assert_eq!(SetOrigin::from_u8(3), None);
        assert_eq!(SetOrigin::TopLeft.to_u8(), 0);
    }

    #[test]
    fn is_noop_respects_null_policy() {
        assert!(Opcode::Noop.is_noop(false));
        assert!(Opcode::Noop.is_noop(true));
        assert!(!Opcode::Null.is_noop(false));
        assert!(Opcode::Null.is_noop(true));
        assert!(!Opcode::Halt.is_noop(true));
    }

    #[test]
    fn is_halt_respects_null_policy() {
        assert!(Opcode::Halt.is_halt(false));
        assert!(Opcode::Halt.is_halt(true));
        assert!(!Opcode::Null.is_halt(false));
        assert!(Opcode::Null.is_halt(true));
        assert!(!Opcode::Noop.is_halt(true));
    }

    #[test]
    fn mnemonic_for_finds_every_opcode() {
        for raw in 0x00u8..=0x21 {
            let op = Opcode::from_u8(raw).unwrap();
            assert_eq!(mnemonic_for(op).opcode, op);
        }
        assert_eq!(mnemonic_for(Opcode::Color).mnemonic, "clr");
    }
}
