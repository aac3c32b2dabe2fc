use crate::keymap::{validate, KeyCode, PinKeyBinding};
use embedded_hal::digital::InputPin;

/// Slots in a boot keyboard report
pub const MAX_SIMULTANEOUS_KEYS: usize = 6;

/// Read access to the current level of the input pins.
pub trait PinBank {
    /// `true` if the line is pulled to ground, a pin that can't be read is never low.
    fn is_low(&mut self, pin: u8) -> bool;
}

/// Pins indexed by gpio number, unconfigured slots read as released.
pub struct PinArray<P, const N: usize> {
    pins: [Option<P>; N],
}

impl<P, const N: usize> PinArray<P, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pins: core::array::from_fn(|_| None),
        }
    }

    /// Puts `pin` in slot `gpio`, returning whatever was there before.
    /// An out of range `gpio` hands the pin back.
    pub fn insert(&mut self, gpio: u8, pin: P) -> Option<P> {
        match self.pins.get_mut(gpio as usize) {
            Some(slot) => slot.replace(pin),
            None => Some(pin),
        }
    }
}

impl<P: InputPin, const N: usize> PinBank for PinArray<P, N> {
    #[inline]
    fn is_low(&mut self, pin: u8) -> bool {
        self.pins
            .get_mut(pin as usize)
            .and_then(Option::as_mut)
            .is_some_and(|p| matches!(p.is_low(), Ok(true)))
    }
}

/// Keycodes of the pressed buttons, in binding order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct KeyState {
    keys: heapless::Vec<KeyCode, MAX_SIMULTANEOUS_KEYS>,
}

impl KeyState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: heapless::Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.keys.is_full()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[KeyCode] {
        &self.keys
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct KeyScanner {
    bindings: &'static [PinKeyBinding],
}

impl KeyScanner {
    /// # Panics
    /// The table binds a pin twice or a pin outside of the gpio bank, in a const
    /// context this is a build failure.
    #[must_use]
    pub const fn new(bindings: &'static [PinKeyBinding]) -> Self {
        assert!(validate(bindings).is_ok(), "Invalid pin to keycode table");
        Self { bindings }
    }

    #[inline]
    #[must_use]
    pub const fn bindings(&self) -> &'static [PinKeyBinding] {
        self.bindings
    }

    /// Collects the keycodes of every low pin, stopping at [`MAX_SIMULTANEOUS_KEYS`].
    /// Presses past the cap are dropped for this scan.
    pub fn scan<B: PinBank>(&self, bank: &mut B) -> KeyState {
        let mut state = KeyState::new();
        for binding in self.bindings {
            if !bank.is_low(binding.pin) {
                continue;
            }
            // Never full here, checked after each push
            let _ = state.keys.push(binding.keycode);
            if state.is_full() {
                break;
            }
        }
        state
    }
}
