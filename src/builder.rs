//! Append-only bytecode emitter (§4.2).
//!
//! `Builder` cannot undo a mistake: each opcode method appends exactly
//! `1 + sizeof(signature)` bytes and returns `&mut Self` so calls chain,
//! matching the source's fluent `Builder().nop().position(...)...` usage
//! (see `testpacker.py`'s `megapack`/`tinypack`). `dump()` copies the
//! current buffer; the builder itself remains usable afterwards.

use crate::error::BuilderError;
use crate::opcode::Opcode;

/// A growing byte buffer with one emitter method per opcode.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    buf: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder { buf: Vec::new() }
    }

    /// Clears the buffer back to empty. This is the only way to remove
    /// previously emitted bytes; individual instructions cannot be undone.
    pub fn reset(&mut self) -> &mut Self {
        self.buf.clear();
        self
    }

    /// Returns a copy of the bytes emitted so far. The builder remains
    /// usable: further calls keep appending to the same internal buffer.
    pub fn dump(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Runs `f` against a fresh builder and returns its dump once `f`
    /// returns, modeling the scope-guarded acquisition/release §4.2 and §5
    /// require: the builder (and its buffer) exist only for the closure's
    /// extent.
    pub fn scoped<F>(f: F) -> Vec<u8>
    where
        F: FnOnce(&mut Builder),
    {
        let mut builder = Builder::new();
        f(&mut builder);
        builder.dump()
    }

    fn push_opcode(&mut self, op: Opcode) {
        self.buf.push(op.as_u8());
    }

    fn push_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn push_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn no_operand(&mut self, op: Opcode) -> &mut Self {
        self.push_opcode(op);
        self
    }

    fn range_checked_u8(
        &mut self,
        op: Opcode,
        value: u8,
        max: u8,
    ) -> Result<&mut Self, BuilderError> {
        if value > max {
            return Err(BuilderError::ValueOutOfRange {
                opcode: op,
                value,
                max,
            });
        }
        self.push_opcode(op);
        self.push_u8(value);
        Ok(self)
    }

    // -- 0x00 --------------------------------------------------------

    /// `NULL` (0x00). Behaves per the executor's configured null policy;
    /// the builder itself has no opinion about that policy.
    pub fn null(&mut self) -> &mut Self {
        self.no_operand(Opcode::Null)
    }

    // -- 0x01..0x03 ---------------------------------------------------

    pub fn position(&mut self, x: i64, y: i64) -> &mut Self {
        self.push_opcode(Opcode::Position);
        self.push_i64(x);
        self.push_i64(y);
        self
    }

    pub fn center(&mut self) -> &mut Self {
        self.no_operand(Opcode::Center)
    }

    pub fn origin(&mut self) -> &mut Self {
        self.no_operand(Opcode::Origin)
    }

    // -- 0x04 ----------------------------------------------------------

    /// `SETORIGIN` (0x04). `mode` must be `0` (TOPLEFT), `1` (CENTER), or
    /// `2` (BOTTOMLEFT); any other value is rejected before any bytes are
    /// appended.
    pub fn setorigin(&mut self, mode: u8) -> Result<&mut Self, BuilderError> {
        self.range_checked_u8(Opcode::SetOrigin, mode, 2)
    }

    // -- 0x05..0x07 ---------------------------------------------------

    pub fn brightness(&mut self, level: u8) -> &mut Self {
        self.push_opcode(Opcode::Brightness);
        self.push_u8(level);
        self
    }

    pub fn scale(&mut self, scale: u8) -> &mut Self {
        self.push_opcode(Opcode::Scale);
        self.push_u8(scale);
        self
    }

    pub fn color(&mut self, index: u8) -> &mut Self {
        self.push_opcode(Opcode::Color);
        self.push_u8(index);
        self
    }

    // -- 0x08..0x0C -----------------------------------------------------

    pub fn draw(&mut self, dx: i64, dy: i64) -> &mut Self {
        self.push_opcode(Opcode::Draw);
        self.push_i64(dx);
        self.push_i64(dy);
        self
    }

    pub fn forward(&mut self, dist: i64) -> &mut Self {
        self.push_opcode(Opcode::Forward);
        self.push_i64(dist);
        self
    }

    pub fn backward(&mut self, dist: i64) -> &mut Self {
        self.push_opcode(Opcode::Backwards);
        self.push_i64(dist);
        self
    }

    pub fn drawforward(&mut self, dist: i64) -> &mut Self {
        self.push_opcode(Opcode::DrawForward);
        self.push_i64(dist);
        self
    }

    pub fn drawbackward(&mut self, dist: i64) -> &mut Self {
        self.push_opcode(Opcode::DrawBackwards);
        self.push_i64(dist);
        self
    }

    // -- 0x0D..0x12 -------------------------------------------------------

    pub fn rotatedeg(&mut self, angle: f64) -> &mut Self {
        self.push_opcode(Opcode::RotateDeg);
        self.push_f64(angle);
        self
    }

    pub fn rotaterad(&mut self, angle: f64) -> &mut Self {
        self.push_opcode(Opcode::RotateRad);
        self.push_f64(angle);
        self
    }

    pub fn rotaterdeg(&mut self, angle: f64) -> &mut Self {
        self.push_opcode(Opcode::RotateRDeg);
        self.push_f64(angle);
        self
    }

    pub fn rotaterrad(&mut self, angle: f64) -> &mut Self {
        self.push_opcode(Opcode::RotateRRad);
        self.push_f64(angle);
        self
    }

    pub fn rotateorigin(&mut self) -> &mut Self {
        self.no_operand(Opcode::RotateOrigin)
    }

    /// `ROTATESETORIGIN` (0x12). Same domain as [`Builder::setorigin`].
    pub fn rotatesetorigin(&mut self, mode: u8) -> Result<&mut Self, BuilderError> {
        self.range_checked_u8(Opcode::RotateSetOrigin, mode, 2)
    }

    // -- 0x13..0x17 ------------------------------------------------------

    pub fn statepush(&mut self) -> &mut Self {
        self.no_operand(Opcode::StPush)
    }

    pub fn statepop(&mut self) -> &mut Self {
        self.no_operand(Opcode::StPop)
    }

    pub fn pspush(&mut self) -> &mut Self {
        self.no_operand(Opcode::PsPush)
    }

    pub fn pspop(&mut self) -> &mut Self {
        self.no_operand(Opcode::PsPop)
    }

    pub fn initialize(&mut self) -> &mut Self {
        self.no_operand(Opcode::Initialize)
    }

    // -- 0x18..0x20: reserved, still encodable ----------------------------

    pub fn jump(&mut self) -> &mut Self {
        self.no_operand(Opcode::Jump)
    }

    pub fn call(&mut self) -> &mut Self {
        self.no_operand(Opcode::Call)
    }

    pub fn jumpipc(&mut self) -> &mut Self {
        self.no_operand(Opcode::JumpIpc)
    }

    pub fn callipc(&mut self) -> &mut Self {
        self.no_operand(Opcode::CallIpc)
    }

    pub fn jumpmst(&mut self) -> &mut Self {
        self.no_operand(Opcode::JumpMst)
    }

    pub fn callmst(&mut self) -> &mut Self {
        self.no_operand(Opcode::CallMst)
    }

    pub fn r#return(&mut self) -> &mut Self {
        self.no_operand(Opcode::Return)
    }

    pub fn halt(&mut self) -> &mut Self {
        self.no_operand(Opcode::Halt)
    }

    pub fn waitnext(&mut self) -> &mut Self {
        self.no_operand(Opcode::WaitNext)
    }

    // -- 0x21 --------------------------------------------------------------

    /// `NOOP` (0x21), the explicit no-op (distinct from `NULL`, whose
    /// no-op-ness depends on the executor's null policy).
    pub fn nop(&mut self) -> &mut Self {
        self.no_operand(Opcode::Noop)
    }
}
