//! The fetch/decode/dispatch loop (§4.3): this module is the orchestrator,
//! mirroring the nine numbered steps exactly.
//!
//! When the `table_dispatch` feature is enabled, step 7's "otherwise" branch
//! first offers the opcode to [`super::table::try_table_step`]; that
//! alternate path either claims the opcode or returns `None`, in which case
//! this module's own per-opcode match (below) handles it. With the feature
//! off, the match is the only path.

use crate::opcode::{Opcode, SetOrigin};

use super::Vm;

/// Executes one instruction. No-op (and no notifications at all) if the VM
/// is already halted.
pub(super) fn step(vm: &mut Vm) {
    if vm.state.is_halted() {
        return;
    }

    vm.observers.notify_onstep(false);

    let raw = match vm.state.read_u8() {
        Some(byte) => byte,
        None => {
            log::warn!("operand/fetch underflow at end of bytecode: faulting halt");
            vm.state.halt_faulting();
            vm.observers.notify_halt(true);
            return;
        }
    };
    vm.observers.notify_fetchinst(raw);

    let opcode = match Opcode::from_u8(raw) {
        Some(opcode) => opcode,
        None => {
            log::warn!("opcode 0x{raw:02X} is outside the defined range: faulting halt");
            vm.state.halt_faulting();
            vm.observers.notify_halt(true);
            return;
        }
    };
    vm.observers.notify_fetchdecodedinst(opcode);
    log::trace!("fetched {opcode:?} at ipc={}", vm.state.ipc() - 1);

    match opcode {
        Opcode::Null => match vm.null_policy.act_on_null() {
            NullOutcome::Continue => {}
            NullOutcome::CleanHalt => {
                vm.state.halt_clean();
                vm.observers.notify_halt(false);
                return;
            }
            NullOutcome::FaultingHalt => {
                vm.state.halt_faulting();
                vm.observers.notify_halt(true);
                return;
            }
        },
        Opcode::Noop => {}
        Opcode::Halt => {
            vm.state.halt_clean();
            vm.observers.notify_halt(false);
            return;
        }
        _ if opcode.is_reserved() => {
            log::warn!("reserved opcode {opcode:?} encountered: faulting halt");
            vm.state.halt_faulting();
            vm.observers.notify_halt(true);
            return;
        }
        _ => {
            #[cfg(feature = "table_dispatch")]
            let claimed = super::table::try_table_step(vm, opcode);
            #[cfg(not(feature = "table_dispatch"))]
            let claimed: Option<bool> = None;

            let ok = match claimed {
                Some(ok) => ok,
                None => dispatch_operand(vm, opcode),
            };
            if !ok {
                log::warn!("operand underflow decoding {opcode:?}: faulting halt");
                vm.state.halt_faulting();
                vm.observers.notify_halt(true);
                return;
            }
        }
    }

    if vm.state.ipc() >= vm.state.len() {
        vm.state.halt_clean();
        vm.observers.notify_halt(false);
        return;
    }

    vm.observers.notify_onstep(true);
}

/// Resets the VM, then steps until `HALTED` is set (§4.3: "`run()` resets
/// state, sets `STATUS = ZERO`, then steps until `HALTED` is set").
pub(super) fn run(vm: &mut Vm) {
    vm.reset();
    while !vm.state.is_halted() {
        step(vm);
    }
}

/// What the configured null policy does with opcode `0x00` (§4.3 step 7).
enum NullOutcome {
    Continue,
    CleanHalt,
    FaultingHalt,
}

impl super::NullPolicy {
    fn act_on_null(self) -> NullOutcome {
        match self {
            super::NullPolicy::Noop => NullOutcome::Continue,
            super::NullPolicy::Halt => NullOutcome::CleanHalt,
            super::NullPolicy::Fault => NullOutcome::FaultingHalt,
        }
    }
}

/// Classic, match-based dispatch: reads the operand block for `opcode` and
/// emits the matching observer event. Returns `false` on operand
/// underflow (the caller faulting-halts); `true` otherwise. Never called
/// for `NULL`/`NOOP`/`HALT`/reserved opcodes — those are handled by the
/// classification step above.
///
/// An operand byte that decodes to an out-of-range enumerated value (e.g. a
/// `SETORIGIN` mode byte that is not `0`, `1`, or `2`) is treated the same
/// as underflow: the opcode space for origin modes is owned, not forgiving,
/// consistent with §9's treatment of reserved opcodes.
fn dispatch_operand(vm: &mut Vm, opcode: Opcode) -> bool {
    match opcode {
        Opcode::Position => vm
            .state
            .read_i64_pair()
            .map(|(x, y)| vm.observers.notify_position(x, y))
            .is_some(),
        Opcode::Center => {
            vm.observers.notify_center();
            true
        }
        Opcode::Origin => {
            vm.observers.notify_origin();
            true
        }
        Opcode::SetOrigin => vm
            .state
            .read_u8()
            .and_then(SetOrigin::from_u8)
            .map(|mode| vm.observers.notify_setorigin(mode))
            .is_some(),
        Opcode::Brightness => vm
            .state
            .read_u8()
            .map(|level| vm.observers.notify_brightness(level))
            .is_some(),
        Opcode::Scale => vm
            .state
            .read_u8()
            .map(|scale| vm.observers.notify_scale(scale))
            .is_some(),
        Opcode::Color => vm
            .state
            .read_u8()
            .map(|index| {
                let rgb = crate::color::palette_color(index);
                vm.observers.notify_color(index, rgb);
            })
            .is_some(),
        Opcode::Draw => vm
            .state
            .read_i64_pair()
            .map(|(dx, dy)| vm.observers.notify_draw(dx, dy))
            .is_some(),
        Opcode::Forward => vm
            .state
            .read_i64()
            .map(|dist| vm.observers.notify_forward(dist))
            .is_some(),
        Opcode::Backwards => vm
            .state
            .read_i64()
            .map(|dist| vm.observers.notify_backward(dist))
            .is_some(),
        Opcode::DrawForward => vm
            .state
            .read_i64()
            .map(|dist| vm.observers.notify_drawforward(dist))
            .is_some(),
        Opcode::DrawBackwards => vm
            .state
            .read_i64()
            .map(|dist| vm.observers.notify_drawbackward(dist))
            .is_some(),
        Opcode::RotateDeg => vm
            .state
            .read_f64()
            .map(|angle| vm.observers.notify_rotatedeg(angle))
            .is_some(),
        Opcode::RotateRad => vm
            .state
            .read_f64()
            .map(|angle| vm.observers.notify_rotaterad(angle))
            .is_some(),
        Opcode::RotateRDeg => vm
            .state
            .read_f64()
            .map(|angle| vm.observers.notify_rotaterdeg(angle))
            .is_some(),
        Opcode::RotateRRad => vm
            .state
            .read_f64()
            .map(|angle| vm.observers.notify_rotaterrad(angle))
            .is_some(),
        Opcode::RotateOrigin => {
            vm.observers.notify_rotateorigin();
            true
        }
        Opcode::RotateSetOrigin => vm
            .state
            .read_u8()
            .and_then(SetOrigin::from_u8)
            .map(|mode| vm.observers.notify_rotatesetorigin(mode))
            .is_some(),
        Opcode::StPush => {
            vm.observers.notify_statepush();
            true
        }
        Opcode::StPop => {
            vm.observers.notify_statepop();
            true
        }
        Opcode::PsPush => {
            vm.observers.notify_pspush();
            true
        }
        Opcode::PsPop => {
            vm.observers.notify_pspop();
            true
        }
        Opcode::Initialize => {
            vm.observers.notify_initialize();
            true
        }
        Opcode::Null | Opcode::Noop | Opcode::Halt => {
            unreachable!("classified before dispatch_operand is reached")
        }
        _ => unreachable!("reserved opcodes are classified before dispatch_operand is reached"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{NullPolicy, Vm};
    use crate::status::StatusFlags;

    #[test]
    fn empty_bytecode_halts_cleanly_without_instruction_events() {
        let mut vm = Vm::new(NullPolicy::Noop);
        vm.load(Vec::new());
        vm.run();
        assert_eq!(vm.status(), StatusFlags::HALTED);
    }

    #[test]
    fn single_halt_byte_halts_cleanly() {
        let mut vm = Vm::new(NullPolicy::Noop);
        vm.load(vec![0x1F]);
        vm.run();
        assert_eq!(vm.status(), StatusFlags::HALTED);
    }

    #[test]
    fn truncated_operand_faults() {
        let mut vm = Vm::new(NullPolicy::Noop);
        vm.load(vec![0x05]); // BRIGHTNESS with no operand byte
        vm.run();
        assert!(vm.is_fault());
        assert!(vm.is_halted());
    }

    #[test]
    fn out_of_range_opcode_faults_with_no_decode_event() {
        let mut vm = Vm::new(NullPolicy::Noop);
        vm.load(vec![0x22]);
        vm.run();
        assert!(vm.is_fault());
    }

    #[test]
    fn null_policy_matrix() {
        for (policy, expect_halted, expect_fault) in [
            (NullPolicy::Noop, false, false),
            (NullPolicy::Halt, true, false),
            (NullPolicy::Fault, true, true),
        ] {
            let mut vm = Vm::new(policy);
            vm.load(vec![0x00, 0x21]); // NULL followed by a successor so the Noop row doesn't end-of-stream halt
            vm.step();
            assert_eq!(vm.is_halted(), expect_halted, "{:?}", vm.status());
            assert_eq!(vm.is_fault(), expect_fault, "{:?}", vm.status());
        }
    }

    #[test]
    fn scenario_1_noop_noop_halt() {
        let mut vm = Vm::new(NullPolicy::Fault);
        vm.load(vec![0x21, 0x21, 0x1F]);
        vm.run();
        assert_eq!(vm.status(), StatusFlags::HALTED);
    }

    #[test]
    fn scenario_5_fault_policy_on_loaded_vqsxi_payload() {
        use crate::container::VqsxiImage;
        let mut bytes = b"VQsXi".to_vec();
        bytes.extend_from_slice(&0x16u64.to_le_bytes());
        bytes.extend_from_slice(&0x16u64.to_le_bytes());
        bytes.push(0);
        bytes.extend_from_slice(&2u64.to_le_bytes());
        bytes.extend_from_slice(&[0x00, 0x00]);
        let image = VqsxiImage::parse(&bytes).unwrap();

        let mut vm = Vm::new(NullPolicy::Fault);
        vm.load(image.bytecode);
        vm.step();
        assert!(vm.is_fault());
        assert!(vm.is_halted());
    }
}
