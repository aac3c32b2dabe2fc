pub mod usb_keyboard;
