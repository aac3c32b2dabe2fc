use usbd_hid::descriptor::KeyboardReport;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SubmitError {
    /// The endpoint still holds the previous report
    Busy,
    Rejected,
}

/// The keyboard's view of the usb device stack.
pub trait UsbLink {
    /// Configured by the host and able to take an input report
    fn is_ready(&self) -> bool;

    /// # Errors
    /// The lower layer didn't accept the report, it is not retried.
    fn submit(&mut self, report: &KeyboardReport) -> Result<(), SubmitError>;

    fn is_suspended(&self) -> bool;

    /// Ask the host to resume the bus, a no-op if the host hasn't enabled remote wakeup.
    fn request_remote_wakeup(&mut self);
}

/// Something that can show whether keys are currently being reported, like an led.
pub trait ActivityIndicator {
    fn show(&mut self, active: bool);
}
