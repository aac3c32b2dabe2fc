use crate::link::{ActivityIndicator, SubmitError, UsbLink};
use crate::scan::{KeyState, MAX_SIMULTANEOUS_KEYS};
use fugit::{MicrosDurationU64, TimerInstantU64};
use usbd_hid::descriptor::KeyboardReport;

/// Same as the rp2040 timer instant, microsecond ticks
pub type Instant = TimerInstantU64<1_000_000>;

pub const REPORT_INTERVAL: MicrosDurationU64 = MicrosDurationU64::millis(10);

/// Fixed cadence clock for report emission.
///
/// Advances by exactly one interval per emission instead of jumping to `now`,
/// if the loop falls behind it emits on consecutive calls until it has caught up.
#[derive(Debug, Copy, Clone)]
pub struct ReportTimer {
    last: Instant,
    interval: MicrosDurationU64,
}

impl ReportTimer {
    #[must_use]
    pub const fn new(interval: MicrosDurationU64) -> Self {
        Self {
            last: Instant::from_ticks(0),
            interval,
        }
    }

    #[inline]
    #[must_use]
    pub const fn last(&self) -> Instant {
        self.last
    }

    #[inline]
    pub fn try_advance(&mut self, now: Instant) -> bool {
        match now.checked_duration_since(self.last) {
            Some(elapsed) if elapsed >= self.interval => {
                self.last = self.last + self.interval;
                true
            }
            _ => false,
        }
    }
}

/// Boot keyboard report for `state`, modifiers are bound as plain keycodes so the
/// modifier byte is always zero.
#[must_use]
pub fn encode(state: &KeyState) -> KeyboardReport {
    let mut keycodes = [0u8; MAX_SIMULTANEOUS_KEYS];
    for (slot, key) in keycodes.iter_mut().zip(state.iter()) {
        *slot = key.byte();
    }
    KeyboardReport {
        modifier: 0,
        reserved: 0,
        leds: 0,
        keycodes,
    }
}

/// What a single call to [`HidReportDriver::maybe_emit`] ended up doing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Emission {
    /// Interval hasn't elapsed
    Waiting,
    NotReady,
    Sent { active: bool },
    Dropped(SubmitError),
}

pub struct HidReportDriver<A> {
    timer: ReportTimer,
    indicator: A,
    suspended: bool,
}

impl<A: ActivityIndicator> HidReportDriver<A> {
    pub const fn new(indicator: A) -> Self {
        Self::with_interval(indicator, REPORT_INTERVAL)
    }

    pub const fn with_interval(indicator: A, interval: MicrosDurationU64) -> Self {
        Self {
            timer: ReportTimer::new(interval),
            indicator,
            suspended: false,
        }
    }

    #[inline]
    pub const fn timer(&self) -> &ReportTimer {
        &self.timer
    }

    #[inline]
    pub const fn indicator(&self) -> &A {
        &self.indicator
    }

    /// Called every loop iteration. Requests a wakeup whenever the link is suspended,
    /// then at most once per interval encodes `state` and hands it to `link`.
    /// Nothing is kept for later, a skipped or dropped report is replaced by the next scan.
    pub fn maybe_emit<L: UsbLink>(&mut self, state: &KeyState, now: Instant, link: &mut L) -> Emission {
        self.check_suspend(link);
        if !self.timer.try_advance(now) {
            return Emission::Waiting;
        }
        if !link.is_ready() {
            return Emission::NotReady;
        }
        let active = !state.is_empty();
        match link.submit(&encode(state)) {
            Ok(()) => {
                self.indicator.show(active);
                Emission::Sent { active }
            }
            Err(e) => {
                log::trace!("Dropped report: {e:?}");
                Emission::Dropped(e)
            }
        }
    }

    fn check_suspend<L: UsbLink>(&mut self, link: &mut L) {
        if link.is_suspended() {
            if !self.suspended {
                log::debug!("Link suspended, requesting remote wakeup");
                self.suspended = true;
            }
            link.request_remote_wakeup();
        } else if self.suspended {
            log::debug!("Link resumed");
            self.suspended = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, PinKeyBinding};
    use crate::scan::{KeyScanner, PinBank};

    #[derive(Default)]
    struct RecordingLink {
        ready: bool,
        suspended: bool,
        reject: Option<SubmitError>,
        submitted: Vec<(u8, [u8; 6])>,
        wakeups: usize,
    }

    impl RecordingLink {
        fn ready() -> Self {
            Self {
                ready: true,
                ..Self::default()
            }
        }
    }

    impl UsbLink for RecordingLink {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn submit(&mut self, report: &KeyboardReport) -> Result<(), SubmitError> {
            if let Some(e) = self.reject {
                return Err(e);
            }
            self.submitted.push((report.modifier, report.keycodes));
            Ok(())
        }

        fn is_suspended(&self) -> bool {
            self.suspended
        }

        fn request_remote_wakeup(&mut self) {
            self.wakeups += 1;
        }
    }

    #[derive(Default)]
    struct Led {
        history: Vec<bool>,
    }

    impl ActivityIndicator for Led {
        fn show(&mut self, active: bool) {
            self.history.push(active);
        }
    }

    struct Pressed(&'static [u8]);

    impl PinBank for Pressed {
        fn is_low(&mut self, pin: u8) -> bool {
            self.0.contains(&pin)
        }
    }

    const AB: [PinKeyBinding; 2] = [
        PinKeyBinding::new(0, KeyCode::A),
        PinKeyBinding::new(1, KeyCode::B),
    ];
    const SCANNER: KeyScanner = KeyScanner::new(&AB);

    fn at(ms: u64) -> Instant {
        Instant::from_ticks(ms * 1000)
    }

    #[test]
    fn encodes_padded() {
        let state = SCANNER.scan(&mut Pressed(&[0, 1]));
        let report = encode(&state);
        assert_eq!(0, report.modifier);
        assert_eq!(0, report.reserved);
        assert_eq!([0x04, 0x05, 0, 0, 0, 0], report.keycodes);
    }

    #[test]
    fn sends_pressed_key() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink::ready();
        let state = SCANNER.scan(&mut Pressed(&[0]));
        assert_eq!(
            Emission::Sent { active: true },
            driver.maybe_emit(&state, at(10), &mut link)
        );
        assert_eq!(vec![(0, [KeyCode::A.byte(), 0, 0, 0, 0, 0])], link.submitted);
        assert_eq!(vec![true], driver.indicator().history);
    }

    #[test]
    fn sends_release_when_idle() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink::ready();
        let state = SCANNER.scan(&mut Pressed(&[]));
        assert_eq!(
            Emission::Sent { active: false },
            driver.maybe_emit(&state, at(10), &mut link)
        );
        assert_eq!(vec![(0, [0u8; 6])], link.submitted);
        assert_eq!(vec![false], driver.indicator().history);
    }

    #[test]
    fn rate_limited() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink::ready();
        let state = KeyState::new();
        assert_eq!(Emission::Waiting, driver.maybe_emit(&state, at(9), &mut link));
        assert!(matches!(
            driver.maybe_emit(&state, at(10), &mut link),
            Emission::Sent { .. }
        ));
        assert_eq!(Emission::Waiting, driver.maybe_emit(&state, at(19), &mut link));
        assert_eq!(1, link.submitted.len());
        assert!(matches!(
            driver.maybe_emit(&state, at(20), &mut link),
            Emission::Sent { .. }
        ));
        assert_eq!(2, link.submitted.len());
    }

    #[test]
    fn cadence_keeps_phase() {
        let mut timer = ReportTimer::new(REPORT_INTERVAL);
        assert_eq!(at(0), timer.last());
        for tick in 1..=50 {
            assert!(timer.try_advance(at(tick * 10)));
            assert_eq!(at(tick * 10), timer.last());
        }
        // Late calls still only move one interval at a time
        let mut timer = ReportTimer::new(REPORT_INTERVAL);
        assert!(timer.try_advance(at(15)));
        assert_eq!(at(10), timer.last());
        assert!(timer.try_advance(at(25)));
        assert_eq!(at(20), timer.last());
        assert!(!timer.try_advance(at(29)));
    }

    #[test]
    fn catches_up_after_stall() {
        let mut timer = ReportTimer::new(REPORT_INTERVAL);
        let now = at(35);
        assert!(timer.try_advance(now));
        assert!(timer.try_advance(now));
        assert!(timer.try_advance(now));
        assert!(!timer.try_advance(now));
        assert_eq!(at(30), timer.last());
    }

    #[test]
    fn not_ready_never_submits() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink::default();
        let state = SCANNER.scan(&mut Pressed(&[0, 1]));
        for ms in (10..200).step_by(10) {
            assert_eq!(Emission::NotReady, driver.maybe_emit(&state, at(ms), &mut link));
        }
        assert!(link.submitted.is_empty());
        assert!(driver.indicator().history.is_empty());
        // The skipped ticks are not replayed once the link comes up
        link.ready = true;
        assert_eq!(
            Emission::Sent { active: true },
            driver.maybe_emit(&state, at(200), &mut link)
        );
        assert_eq!(1, link.submitted.len());
    }

    #[test]
    fn rejected_submit_is_dropped() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink {
            reject: Some(SubmitError::Busy),
            ..RecordingLink::ready()
        };
        let state = SCANNER.scan(&mut Pressed(&[1]));
        assert_eq!(
            Emission::Dropped(SubmitError::Busy),
            driver.maybe_emit(&state, at(10), &mut link)
        );
        assert!(driver.indicator().history.is_empty());
        assert_eq!(at(10), driver.timer().last());
        link.reject = None;
        assert_eq!(Emission::Waiting, driver.maybe_emit(&state, at(15), &mut link));
        assert!(link.submitted.is_empty());
    }

    #[test]
    fn wakes_every_tick_while_suspended() {
        let mut driver = HidReportDriver::new(Led::default());
        let mut link = RecordingLink {
            suspended: true,
            ..RecordingLink::default()
        };
        let state = KeyState::new();
        for ms in 0..25 {
            driver.maybe_emit(&state, at(ms), &mut link);
        }
        assert_eq!(25, link.wakeups);
        assert!(link.submitted.is_empty());
        link.suspended = false;
        driver.maybe_emit(&state, at(25), &mut link);
        assert_eq!(25, link.wakeups);
    }
}
