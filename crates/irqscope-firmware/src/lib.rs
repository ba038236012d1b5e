//! ESP32-S3 firmware-specific modules for irqscope
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: the GPIO edge tasks that timestamp interrupt sources and the
//! front-panel button tasks.

#![no_std]

pub mod inputs;
