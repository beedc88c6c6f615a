//! The `STATUS` flag register and its public stringifier.

bitflags::bitflags! {
    /// VM status word. Only these bits are ever defined; `STATUS` never
    /// contains undefined bits (§3 invariant).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const HALTED = 0b001;
        const NEXT   = 0b010;
        const FAULT  = 0b100;
    }
}

impl StatusFlags {
    /// The named `0` value: running, nothing set.
    pub const ZERO: StatusFlags = StatusFlags::empty();
}

/// Renders a status value the way debuggers expect: `"ZERO"` for the empty
/// value, otherwise the set bits' names joined by `|` in the fixed order
/// `HALT`, `NEXT`, `FAULT` (§4.6, §8).
///
/// Note the stringified name `HALT` differs from the flag's field name
/// `HALTED`; that is spec-mandated, not a typo.
pub fn status_stringify(status: StatusFlags) -> String {
    if status.is_empty() {
        return "ZERO".to_string();
    }
    let mut parts = Vec::with_capacity(3);
    if status.contains(StatusFlags::HALTED) {
        parts.push("HALT");
    }
    if status.contains(StatusFlags::NEXT) {
        parts.push("NEXT");
    }
    if status.contains(StatusFlags::FAULT) {
        parts.push("FAULT");
    }
    parts.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stringifies_to_zero() {
        assert_eq!(status_stringify(StatusFlags::ZERO), "ZERO");
    }

    #[test]
    fn single_bits_use_the_shortened_halt_name() {
        assert_eq!(status_stringify(StatusFlags::HALTED), "HALT");
        assert_eq!(status_stringify(StatusFlags::NEXT), "NEXT");
        assert_eq!(status_stringify(StatusFlags::FAULT), "FAULT");
    }

    #[test]
    fn combinations_join_in_fixed_order() {
        let s = StatusFlags::FAULT | StatusFlags::HALTED;
        assert_eq!(status_stringify(s), "HALT|FAULT");
        let s = StatusFlags::NEXT | StatusFlags::FAULT | StatusFlags::HALTED;
        assert_eq!(status_stringify(s), "HALT|NEXT|FAULT");
    }

    #[test]
    fn fault_implies_halted_is_representable_and_distinct_from_halted_alone() {
        let faulting = StatusFlags::HALTED | StatusFlags::FAULT;
        assert_ne!(status_stringify(faulting), status_stringify(StatusFlags::HALTED));
    }
}
