pub(crate) mod activity_led;

use pico_hid_kbd_lib::keymap::NUM_GPIO;
use pico_hid_kbd_lib::scan::PinArray;
use rp2040_hal::gpio::{DynPinId, FunctionSio, Pin, PullUp, SioInput};

pub type ButtonPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
pub type ButtonPins = PinArray<ButtonPin, { NUM_GPIO as usize }>;

pub struct PinMap {
    pub buttons: ButtonPins,
    pub led: activity_led::ActivityLed,
}
