use embedded_hal::digital::{OutputPin, PinState};
use pico_hid_kbd_lib::link::ActivityIndicator;
use rp2040_hal::gpio::{DynPinId, FunctionSio, Pin, PullDown, SioOutput};

pub type LedPin = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;

/// Lit while the last report sent carried a pressed key.
pub struct ActivityLed {
    pin: LedPin,
}

impl ActivityLed {
    pub fn new(pin: LedPin) -> Self {
        Self { pin }
    }
}

impl ActivityIndicator for ActivityLed {
    #[inline]
    fn show(&mut self, active: bool) {
        let _ = self.pin.set_state(PinState::from(active));
    }
}
