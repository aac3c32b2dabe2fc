use crate::hid::usb_keyboard::UsbKeyboard;
use crate::keyboard::activity_led::ActivityLed;
use crate::keyboard::ButtonPins;
use crate::keymap::SCANNER;
use pico_hid_kbd_lib::report::{Emission, HidReportDriver};
use rp2040_hal::Timer;

/// The whole keyboard, one cooperative loop that never blocks:
/// scan the buttons, service usb, maybe send a report.
pub fn run(mut buttons: ButtonPins, mut usb: UsbKeyboard<'_>, led: ActivityLed, timer: Timer) -> ! {
    let mut driver = HidReportDriver::new(led);
    let mut last_emission = Emission::Waiting;
    loop {
        let state = SCANNER.scan(&mut buttons);
        usb.poll();
        let emission = driver.maybe_emit(&state, timer.get_counter(), &mut usb);
        if let Emission::Sent { active } = emission {
            if last_emission != emission {
                log::trace!("Keys {}", if active { "down" } else { "up" });
            }
            last_emission = emission;
        }
        #[cfg(feature = "serial")]
        usb.flush_log();
    }
}
