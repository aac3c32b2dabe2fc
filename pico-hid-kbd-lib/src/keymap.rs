/// Addressable bank0 range on the rp2040, `GPIO0..=GPIO29`
pub const NUM_GPIO: u8 = 30;

/// A HID keyboard page usage id.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const NONE: Self = Self(0x00);
    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);

    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }
}

/// One physical button, wired between `pin` and ground.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PinKeyBinding {
    pub pin: u8,
    pub keycode: KeyCode,
}

impl PinKeyBinding {
    #[must_use]
    pub const fn new(pin: u8, keycode: KeyCode) -> Self {
        Self { pin, keycode }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BindingError {
    PinOutOfRange { pin: u8 },
    DuplicatePin { pin: u8 },
}

/// Checks that every pin is addressable and bound at most once.
///
/// `const` so that a bad table fails the build when checked in a const context.
///
/// # Errors
/// The first offending pin in table order.
pub const fn validate(bindings: &[PinKeyBinding]) -> Result<(), BindingError> {
    let mut seen = [false; NUM_GPIO as usize];
    let mut i = 0;
    while i < bindings.len() {
        let pin = bindings[i].pin;
        if pin >= NUM_GPIO {
            return Err(BindingError::PinOutOfRange { pin });
        }
        if seen[pin as usize] {
            return Err(BindingError::DuplicatePin { pin });
        }
        seen[pin as usize] = true;
        i += 1;
    }
    Ok(())
}
