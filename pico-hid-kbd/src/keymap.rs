use crate::keyboard::activity_led::{ActivityLed, LedPin};
use crate::keyboard::{ButtonPins, PinMap};
use paste::paste;
use pico_hid_kbd_lib::keymap::{KeyCode, PinKeyBinding};
use pico_hid_kbd_lib::scan::KeyScanner;
use rp2040_hal::gpio::Pins;

/// Declares the button table and how the board's pins are taken for it,
/// both generated from the same list so they can't disagree.
macro_rules! pin_map {
    (activity_led: $led: literal, buttons: { $($gpio: literal => $key: ident),* $(,)? }) => {
        pub const BINDINGS: &[PinKeyBinding] = &[$(PinKeyBinding::new($gpio, KeyCode::$key)),*];

        /// Pulls every button pin up, a pressed button shorts its pin to ground.
        pub fn configure_pins(pins: Pins) -> PinMap {
            let mut buttons = ButtonPins::new();
            $(
                let _ = buttons.insert($gpio, paste!(pins.[<gpio $gpio>]).into_pull_up_input().into_dyn_pin());
            )*
            let led: LedPin = paste!(pins.[<gpio $led>]).into_push_pull_output().into_dyn_pin();
            PinMap {
                buttons,
                led: ActivityLed::new(led),
            }
        }
    };
}

// Gpio 23-25 are taken on the pico (smps, vbus sense, led), 29 senses vsys.
pin_map! {
    activity_led: 25,
    buttons: {
        0 => A,
        1 => B,
        2 => C,
        3 => D,
        4 => E,
        5 => F,
        6 => G,
        7 => H,
        8 => I,
        9 => J,
        10 => K,
        11 => L,
        12 => M,
        13 => N,
        14 => O,
        15 => P,
        16 => Q,
        17 => R,
        18 => S,
        19 => T,
        20 => U,
        21 => V,
        22 => W,
        26 => X,
        27 => Y,
        28 => Z,
    }
}

pub const SCANNER: KeyScanner = KeyScanner::new(BINDINGS);
