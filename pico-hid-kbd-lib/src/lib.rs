#![cfg_attr(not(test), no_std)]

pub mod keymap;
pub mod link;
pub mod log_ring;
pub mod report;
pub mod scan;
