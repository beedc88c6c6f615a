//! Optional table-driven dispatch (`table_dispatch` feature).
//!
//! Rather than the classic dispatcher's one-arm-per-opcode match, this path
//! groups opcodes by [`OperandShape`] (the same metadata the builder and
//! round-trip tests consult), reads the shared byte shape once, then
//! sub-matches only within opcodes that share it. It claims every
//! fully-specified opcode; it returns `None` for `NULL`/`NOOP`/`HALT` (those
//! are classification-level concerns, handled by the caller) and for
//! reserved opcodes (which the classic match also simply faulting-halts, so
//! falling back for them is never observably different).

use crate::opcode::{Opcode, OperandShape, SetOrigin};

use super::Vm;

#[cfg(feature = "table_dispatch")]
pub(super) fn try_table_step(vm: &mut Vm, opcode: Opcode) -> Option<bool> {
    if opcode.is_reserved() || matches!(opcode, Opcode::Null | Opcode::Noop | Opcode::Halt) {
        return None;
    }

    Some(match opcode.shape() {
        OperandShape::None => {
            dispatch_zero_operand(vm, opcode);
            true
        }
        OperandShape::U8 => vm
            .state
            .read_u8()
            .map(|raw| dispatch_u8_operand(vm, opcode, raw))
            .unwrap_or(false),
        OperandShape::Wide => vm
            .state
            .read_i64()
            .map(|value| dispatch_wide_operand(vm, opcode, value))
            .unwrap_or(false),
        OperandShape::F64 => vm
            .state
            .read_f64()
            .map(|value| dispatch_f64_operand(vm, opcode, value))
            .unwrap_or(false),
        OperandShape::WidePair => vm
            .state
            .read_i64_pair()
            .map(|(a, b)| dispatch_wide_pair_operand(vm, opcode, a, b))
            .unwrap_or(false),
        OperandShape::U8Pair => false, // no defined opcode uses this shape
    })
}

#[cfg(not(feature = "table_dispatch"))]
pub(super) fn try_table_step(_vm: &mut Vm, _opcode: Opcode) -> Option<bool> {
    None
}

#[cfg(feature = "table_dispatch")]
fn dispatch_zero_operand(vm: &mut Vm, opcode: Opcode) {
    match opcode {
        Opcode::Center => vm.observers.notify_center(),
        Opcode::Origin => vm.observers.notify_origin(),
        Opcode::RotateOrigin => vm.observers.notify_rotateorigin(),
        Opcode::StPush => vm.observers.notify_statepush(),
        Opcode::StPop => vm.observers.notify_statepop(),
        Opcode::PsPush => vm.observers.notify_pspush(),
        Opcode::PsPop => vm.observers.notify_pspop(),
        Opcode::Initialize => vm.observers.notify_initialize(),
        _ => unreachable!("only zero-operand opcodes reach this arm"),
    }
}

#[cfg(feature = "table_dispatch")]
fn dispatch_u8_operand(vm: &mut Vm, opcode: Opcode, raw: u8) -> bool {
    match opcode {
        Opcode::SetOrigin => SetOrigin::from_u8(raw)
            .map(|mode| vm.observers.notify_setorigin(mode))
            .is_some(),
        Opcode::RotateSetOrigin => SetOrigin::from_u8(raw)
            .map(|mode| vm.observers.notify_rotatesetorigin(mode))
            .is_some(),
        Opcode::Brightness => {
            vm.observers.notify_brightness(raw);
            true
        }
        Opcode::Scale => {
            vm.observers.notify_scale(raw);
            true
        }
        Opcode::Color => {
            let rgb = crate::color::palette_color(raw);
            vm.observers.notify_color(raw, rgb);
            true
        }
        _ => unreachable!("only u8-shaped opcodes reach this arm"),
    }
}

#[cfg(feature = "table_dispatch")]
fn dispatch_wide_operand(vm: &mut Vm, opcode: Opcode, value: i64) -> bool {
    match opcode {
        Opcode::Forward => vm.observers.notify_forward(value),
        Opcode::Backwards => vm.observers.notify_backward(value),
        Opcode::DrawForward => vm.observers.notify_drawforward(value),
        Opcode::DrawBackwards => vm.observers.notify_drawbackward(value),
        _ => unreachable!("only wide-shaped opcodes reach this arm"),
    }
    true
}

#[cfg(feature = "table_dispatch")]
fn dispatch_f64_operand(vm: &mut Vm, opcode: Opcode, value: f64) -> bool {
    match opcode {
        Opcode::RotateDeg => vm.observers.notify_rotatedeg(value),
        Opcode::RotateRad => vm.observers.notify_rotaterad(value),
        Opcode::RotateRDeg => vm.observers.notify_rotaterdeg(value),
        Opcode::RotateRRad => vm.observers.notify_rotaterrad(value),
        _ => unreachable!("only f64-shaped opcodes reach this arm"),
    }
    true
}

#[cfg(feature = "table_dispatch")]
fn dispatch_wide_pair_operand(vm: &mut Vm, opcode: Opcode, a: i64, b: i64) -> bool {
    match opcode {
        Opcode::Position => vm.observers.notify_position(a, b),
        Opcode::Draw => vm.observers.notify_draw(a, b),
        _ => unreachable!("only wide-pair-shaped opcodes reach this arm"),
    }
    true
}
