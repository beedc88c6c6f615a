//! The observer protocol (§4.4): a capability set with one method per VM
//! event, plus a stub adapter and the registration set the executor drives
//! notifications through.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::color::RgbColor;
use crate::opcode::{Opcode, SetOrigin};

/// One method per VM event. Deliberately has no default bodies — this is
/// the abstract interface; [`StubObserver`] is the separate
/// default-implementing adapter partial adopters delegate to.
pub trait VqsxObserver {
    fn onstep(&mut self, post: bool);
    fn fetchinst(&mut self, raw: u8);
    fn fetchdecodedinst(&mut self, opcode: Opcode);
    fn halt(&mut self, faulty: bool);
    fn reset(&mut self);

    fn position(&mut self, x: i64, y: i64);
    fn center(&mut self);
    fn origin(&mut self);
    fn setorigin(&mut self, mode: SetOrigin);
    fn brightness(&mut self, level: u8);
    fn scale(&mut self, scale: u8);
    fn color(&mut self, index: u8, rgb: RgbColor);
    fn draw(&mut self, dx: i64, dy: i64);
    fn forward(&mut self, dist: i64);
    fn backward(&mut self, dist: i64);
    fn drawforward(&mut self, dist: i64);
    fn drawbackward(&mut self, dist: i64);
    fn rotatedeg(&mut self, angle: f64);
    fn rotaterad(&mut self, angle: f64);
    fn rotaterdeg(&mut self, angle: f64);
    fn rotaterrad(&mut self, angle: f64);
    fn rotateorigin(&mut self);
    fn rotatesetorigin(&mut self, mode: SetOrigin);
    fn statepush(&mut self);
    fn statepop(&mut self);
    fn pspush(&mut self);
    fn pspop(&mut self);
    fn initialize(&mut self);
}

/// A concrete observer implementing every event as a no-op, for hosts that
/// only care about a handful of events (they compose one of these and only
/// override what they need by writing their own trait impl that delegates
/// the rest — Rust has no implementation inheritance to lean on here).
#[derive(Debug, Default, Clone, Copy)]
pub struct StubObserver;

impl VqsxObserver for StubObserver {
    fn onstep(&mut self, _post: bool) {}
    fn fetchinst(&mut self, _raw: u8) {}
    fn fetchdecodedinst(&mut self, _opcode: Opcode) {}
    fn halt(&mut self, _faulty: bool) {}
    fn reset(&mut self) {}
    fn position(&mut self, _x: i64, _y: i64) {}
    fn center(&mut self) {}
    fn origin(&mut self) {}
    fn setorigin(&mut self, _mode: SetOrigin) {}
    fn brightness(&mut self, _level: u8) {}
    fn scale(&mut self, _scale: u8) {}
    fn color(&mut self, _index: u8, _rgb: RgbColor) {}
    fn draw(&mut self, _dx: i64, _dy: i64) {}
    fn forward(&mut self, _dist: i64) {}
    fn backward(&mut self, _dist: i64) {}
    fn drawforward(&mut self, _dist: i64) {}
    fn drawbackward(&mut self, _dist: i64) {}
    fn rotatedeg(&mut self, _angle: f64) {}
    fn rotaterad(&mut self, _angle: f64) {}
    fn rotaterdeg(&mut self, _angle: f64) {}
    fn rotaterrad(&mut self, _angle: f64) {}
    fn rotateorigin(&mut self) {}
    fn rotatesetorigin(&mut self, _mode: SetOrigin) {}
    fn statepush(&mut self) {}
    fn statepop(&mut self) {}
    fn pspush(&mut self) {}
    fn pspop(&mut self) {}
    fn initialize(&mut self) {}
}

pub type ObserverHandle = Rc<RefCell<dyn VqsxObserver>>;

/// A deduplicated, unordered collection of non-owning observer handles.
///
/// "Non-owning" is modeled with [`Weak`]: the host retains the strong
/// `Rc`, the VM only ever upgrades transiently to deliver one event. An
/// observer the host has dropped simply stops receiving notifications
/// instead of being a dangling reference, which is the safest available
/// reading of "must not outlive them" in safe Rust.
#[derive(Default)]
pub struct ObserverSet {
    handles: Vec<Weak<RefCell<dyn VqsxObserver>>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        ObserverSet { handles: Vec::new() }
    }

    /// Registers `observer`. Idempotent: registering the same handle twice
    /// leaves the set unchanged and returns `false`.
    pub fn register(&mut self, observer: &ObserverHandle) -> bool {
        let already_present = self.handles.iter().any(|w| match w.upgrade() {
            Some(existing) => Rc::ptr_eq(&existing, observer),
            None => false,
        });
        if already_present {
            return false;
        }
        self.handles.push(Rc::downgrade(observer));
        true
    }

    /// Deregisters `observer`. Returns whether it was present.
    pub fn deregister(&mut self, observer: &ObserverHandle) -> bool {
        let before = self.handles.len();
        self.handles.retain(|w| match w.upgrade() {
            Some(existing) => !Rc::ptr_eq(&existing, observer),
            None => false,
        });
        self.handles.len() != before
    }

    /// Invokes `f` once for every live observer. Takes a snapshot of the
    /// handle list before iterating (§9: "the safest portable choice is to
    /// snapshot the set before iterating"), so an observer deregistering
    /// itself mid-notification does not perturb this delivery.
    fn notify(&mut self, mut f: impl FnMut(&mut dyn VqsxObserver)) {
        let snapshot: Vec<_> = self.handles.clone();
        for weak in &snapshot {
            if let Some(strong) = weak.upgrade() {
                f(&mut *strong.borrow_mut());
            }
        }
        self.handles.retain(|w| w.strong_count() > 0);
    }

    pub fn notify_onstep(&mut self, post: bool) {
        self.notify(|o| o.onstep(post));
    }
    pub fn notify_fetchinst(&mut self, raw: u8) {
        self.notify(|o| o.fetchinst(raw));
    }
    pub fn notify_fetchdecodedinst(&mut self, opcode: Opcode) {
        self.notify(|o| o.fetchdecodedinst(opcode));
    }
    pub fn notify_halt(&mut self, faulty: bool) {
        self.notify(|o| o.halt(faulty));
    }
    pub fn notify_reset(&mut self) {
        self.notify(|o| o.reset());
    }
    pub fn notify_position(&mut self, x: i64, y: i64) {
        self.notify(|o| o.position(x, y));
    }
    pub fn notify_center(&mut self) {
        self.notify(|o| o.center());
    }
    pub fn notify_origin(&mut self) {
        self.notify(|o| o.origin());
    }
    pub fn notify_setorigin(&mut self, mode: SetOrigin) {
        self.notify(|o| o.setorigin(mode));
    }
    pub fn notify_brightness(&mut self, level: u8) {
        self.notify(|o| o.brightness(level));
    }
    pub fn notify_scale(&mut self, scale: u8) {
        self.notify(|o| o.scale(scale));
    }
    pub fn notify_color(&mut self, index: u8, rgb: RgbColor) {
        self.notify(|o| o.color(index, rgb));
    }
    pub fn notify_draw(&mut self, dx: i64, dy: i64) {
        self.notify(|o| o.draw(dx, dy));
    }
    pub fn notify_forward(&mut self, dist: i64) {
        self.notify(|o| o.forward(dist));
    }
    pub fn notify_backward(&mut self, dist: i64) {
        self.notify(|o| o.backward(dist));
    }
    pub fn notify_drawforward(&mut self, dist: i64) {
        self.notify(|o| o.drawforward(dist));
    }
    pub fn notify_drawbackward(&mut self, dist: i64) {
        self.notify(|o| o.drawbackward(dist));
    }
    pub fn notify_rotatedeg(&mut self, angle: f64) {
        self.notify(|o| o.rotatedeg(angle));
    }
    pub fn notify_rotaterad(&mut self, angle: f64) {
        self.notify(|o| o.rotaterad(angle));
    }
    pub fn notify_rotaterdeg(&mut self, angle: f64) {
        self.notify(|o| o.rotaterdeg(angle));
    }
    pub fn notify_rotaterrad(&mut self, angle: f64) {
        self.notify(|o| o.rotaterrad(angle));
    }
    pub fn notify_rotateorigin(&mut self) {
        self.notify(|o| o.rotateorigin());
    }
    pub fn notify_rotatesetorigin(&mut self, mode: SetOrigin) {
        self.notify(|o| o.rotatesetorigin(mode));
    }
    pub fn notify_statepush(&mut self) {
        self.notify(|o| o.statepush());
    }
    pub fn notify_statepop(&mut self) {
        self.notify(|o| o.statepop());
    }
    pub fn notify_pspush(&mut self) {
        self.notify(|o| o.pspush());
    }
    pub fn notify_pspop(&mut self) {
        self.notify(|o| o.pspop());
    }
    pub fn notify_initialize(&mut self) {
        self.notify(|o| o.initialize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl VqsxObserver for Recorder {
        fn onstep(&mut self, post: bool) {
            self.events.push(format!("onstep({post})"));
        }
        fn fetchinst(&mut self, raw: u8) {
            self.events.push(format!("fetchinst({raw:#04x})"));
        }
        fn fetchdecodedinst(&mut self, opcode: Opcode) {
            self.events.push(format!("fetchdecodedinst({opcode:?})"));
        }
        fn halt(&mut self, faulty: bool) {
            self.events.push(format!("halt({faulty})"));
        }
        fn reset(&mut self) {
            self.events.push("reset".to_string());
        }
        fn position(&mut self, x: i64, y: i64) {
            self.events.push(format!("position({x},{y})"));
        }
        fn center(&mut self) {}
        fn origin(&mut self) {}
        fn setorigin(&mut self, _mode: SetOrigin) {}
        fn brightness(&mut self, _level: u8) {}
        fn scale(&mut self, _scale: u8) {}
        fn color(&mut self, index: u8, rgb: RgbColor) {
            self.events.push(format!("color({index},{rgb:?})"));
        }
        fn draw(&mut self, _dx: i64, _dy: i64) {}
        fn forward(&mut self, dist: i64) {
            self.events.push(format!("forward({dist})"));
        }
        fn backward(&mut self, _dist: i64) {}
        fn drawforward(&mut self, _dist: i64) {}
        fn drawbackward(&mut self, _dist: i64) {}
        fn rotatedeg(&mut self, _angle: f64) {}
        fn rotaterad(&mut self, _angle: f64) {}
        fn rotaterdeg(&mut self, _angle: f64) {}
        fn rotaterrad(&mut self, _angle: f64) {}
        fn rotateorigin(&mut self) {}
        fn rotatesetorigin(&mut self, _mode: SetOrigin) {}
        fn statepush(&mut self) {}
        fn statepop(&mut self) {}
        fn pspush(&mut self) {}
        fn pspop(&mut self) {}
        fn initialize(&mut self) {}
    }

    #[test]
    fn stub_observer_accepts_every_event_as_a_no_op() {
        let mut stub = StubObserver;
        stub.onstep(true);
        stub.fetchinst(0x21);
        stub.fetchdecodedinst(Opcode::Noop);
        stub.halt(false);
        stub.reset();
        stub.position(1, 2);
        stub.color(0, RgbColor::new(1, 2, 3));
    }

    #[test]
    fn registration_is_idempotent() {
        let observer: ObserverHandle = Rc::new(RefCell::new(Recorder::default()));
        let mut set = ObserverSet::new();
        assert!(set.register(&observer));
        assert!(!set.register(&observer));
        assert_eq!(set.handles.len(), 1);
    }

    #[test]
    fn deregister_reports_whether_it_was_present() {
        let observer: ObserverHandle = Rc::new(RefCell::new(Recorder::default()));
        let mut set = ObserverSet::new();
        assert!(!set.deregister(&observer));
        set.register(&observer);
        assert!(set.deregister(&observer));
        assert!(!set.deregister(&observer));
    }

    #[test]
    fn notify_delivers_to_every_registered_observer() {
        let a: ObserverHandle = Rc::new(RefCell::new(Recorder::default()));
        let b: ObserverHandle = Rc::new(RefCell::new(Recorder::default()));
        let mut set = ObserverSet::new();
        set.register(&a);
        set.register(&b);
        set.notify_onstep(false);
        set.notify_fetchinst(0x09);
        set.notify_forward(5);

        for handle in [&a, &b] {
            let recorder = handle.borrow();
            assert_eq!(
                recorder.events,
                vec!["onstep(false)", "fetchinst(0x09)", "forward(5)"]
            );
        }
    }

    #[test]
    fn dropped_observer_stops_receiving_events_without_panicking() {
        let mut set = ObserverSet::new();
        {
            let observer: ObserverHandle = Rc::new(RefCell::new(Recorder::default()));
            set.register(&observer);
        }
        // `observer` has been dropped; the weak handle should upgrade to
        // None and simply be skipped.
        set.notify_onstep(true);
        assert!(set.handles.iter().all(|w| w.upgrade().is_none()) || set.handles.is_empty());
    }
}
