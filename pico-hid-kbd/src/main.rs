#![no_std]
#![no_main]

mod hid;
pub(crate) mod keyboard;
mod keymap;
#[cfg(feature = "serial")]
mod logger;
mod runtime;

// A shorter alias for the Peripheral Access Crate, which provides low-level
// register access
use rp2040_hal::pac;

// A shorter alias for the Hardware Abstraction Layer, which provides
// higher-level drivers.
use rp2040_hal as hal;

use crate::hid::usb_keyboard::UsbKeyboard;
use usb_device::bus::UsbBusAllocator;

/// Second stage bootloader for the pico's W25Q080 flash
#[link_section = ".boot2"]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

/// The pico's crystal, 12Mhz
const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// Entry point to our bare-metal application.
///
/// The `#[entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables are initialised.
#[hal::entry]
fn main() -> ! {
    setup_kbd()
}

fn setup_kbd() -> ! {
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Default 125Mhz system clock, 48Mhz usb clock
    let clocks = hal::clocks::init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let pin_map = keymap::configure_pins(pins);

    #[cfg(feature = "serial")]
    logger::init(log::LevelFilter::Trace);

    // Set up the USB driver
    let usb_bus = UsbBusAllocator::new(hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));
    let usb = UsbKeyboard::new(&usb_bus);
    log::info!("Scanning {} buttons", keymap::BINDINGS.len());

    runtime::run(pin_map.buttons, usb, pin_map.led, timer)
}

#[panic_handler]
#[inline(never)]
fn halt(_info: &core::panic::PanicInfo) -> ! {
    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
