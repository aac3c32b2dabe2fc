use pico_hid_kbd_lib::link::{SubmitError, UsbLink};
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};
use usb_device::UsbError;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};
use usbd_hid::hid_class::{
    HIDClass, HidClassSettings, HidCountryCode, HidProtocol, HidSubClass, ProtocolModeConfig,
};

const VID_PID: UsbVidPid = UsbVidPid(0x16c0, 0x27db);
/// Host polling interval for the interrupt endpoint, matches the report cadence
const POLL_MS: u8 = 10;

pub struct UsbKeyboard<'a> {
    hid: HIDClass<'a, UsbBus>,
    #[cfg(feature = "serial")]
    serial: usbd_serial::SerialPort<'a, UsbBus>,
    dev: UsbDevice<'a, UsbBus>,
}

impl<'a> UsbKeyboard<'a> {
    pub fn new(allocator: &'a UsbBusAllocator<UsbBus>) -> Self {
        // Ordering here is extremely important, classes before device.
        let hid = HIDClass::new_ep_in_with_settings(
            allocator,
            KeyboardReport::desc(),
            POLL_MS,
            HidClassSettings {
                subclass: HidSubClass::Boot,
                protocol: HidProtocol::Keyboard,
                config: ProtocolModeConfig::DefaultBehavior,
                locale: HidCountryCode::NotSupported,
            },
        );
        #[cfg(feature = "serial")]
        let serial = usbd_serial::SerialPort::new(allocator);
        let builder = UsbDeviceBuilder::new(allocator, VID_PID)
            .strings(&[StringDescriptors::default()
                .manufacturer("pico-hid-kbd")
                .product("Pico Keyboard")
                .serial_number("1")])
            .unwrap()
            .supports_remote_wakeup(true);
        #[cfg(feature = "serial")]
        let builder = builder.composite_with_iads();
        #[cfg(not(feature = "serial"))]
        let builder = builder.device_class(0);
        Self {
            hid,
            #[cfg(feature = "serial")]
            serial,
            dev: builder.build(),
        }
    }

    /// Services the device stack, needs to run often to keep up with the host.
    #[inline]
    pub fn poll(&mut self) -> bool {
        #[cfg(feature = "serial")]
        {
            self.dev.poll(&mut [&mut self.hid, &mut self.serial])
        }
        #[cfg(not(feature = "serial"))]
        {
            self.dev.poll(&mut [&mut self.hid])
        }
    }

    /// Moves whatever fits of the buffered log into the serial port, never waits on the host.
    #[cfg(feature = "serial")]
    pub fn flush_log(&mut self) {
        // Nothing is sent from the host side, keep the out endpoint from stalling
        let mut discard = [0u8; 64];
        let _ = self.serial.read(&mut discard);
        if !self.serial.dtr() {
            // No terminal attached
            crate::logger::drain(<[u8]>::len);
            return;
        }
        crate::logger::drain(|chunk| match self.serial.write(chunk) {
            Ok(wrote) => wrote,
            Err(_e) => 0,
        });
    }
}

impl UsbLink for UsbKeyboard<'_> {
    #[inline]
    fn is_ready(&self) -> bool {
        self.dev.state() == UsbDeviceState::Configured
    }

    fn submit(&mut self, report: &KeyboardReport) -> Result<(), SubmitError> {
        match self.hid.push_input(report) {
            Ok(_) => Ok(()),
            Err(UsbError::WouldBlock) => Err(SubmitError::Busy),
            Err(_e) => Err(SubmitError::Rejected),
        }
    }

    #[inline]
    fn is_suspended(&self) -> bool {
        self.dev.state() == UsbDeviceState::Suspend
    }

    fn request_remote_wakeup(&mut self) {
        if self.dev.remote_wakeup_enabled() {
            self.dev.bus().remote_wakeup();
        }
    }
}
