//! A placeholder front-end, not a Forth implementation (§11 / §1 Non-goals).
//!
//! The source this system was distilled from carries a Forth-like
//! compiler — a `words` dictionary and grammar sitting on top of its
//! builder, compiling source text straight to opcodes with no jumps or
//! calls (consistent with `JUMP`/`CALL` being reserved here too). That
//! grammar is out of scope; what survives is the shape around it: a
//! front-end owns a [`Builder`], and `reset`/`dump` proxy straight through
//! to it. Wiring an actual word dictionary in here is future work, not
//! started by this stub.
use crate::builder::Builder;

/// An inert front-end shell. Holds a [`Builder`] and nothing else; there is
/// no word dictionary and no `compile` method yet.
#[derive(Debug, Default)]
pub struct ForthInterpreter {
    builder: Builder,
}

impl ForthInterpreter {
    pub fn new() -> Self {
        ForthInterpreter {
            builder: Builder::new(),
        }
    }

    /// Clears the underlying builder back to empty.
    pub fn reset(&mut self) {
        self.builder.reset();
    }

    /// Returns a copy of whatever bytecode the underlying builder holds.
    pub fn dump(&self) -> Vec<u8> {
        self.builder.dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_interpreter_dumps_empty() {
        let interp = ForthInterpreter::new();
        assert!(interp.dump().is_empty());
    }

    #[test]
    fn reset_clears_the_underlying_builder() {
        let mut interp = ForthInterpreter::new();
        interp.builder.nop();
        assert!(!interp.dump().is_empty());
        interp.reset();
        assert!(interp.dump().is_empty());
    }
}
