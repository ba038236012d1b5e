//! Hardware-independent core of irqscope
//!
//! Records interrupt timestamps for up to three sources and renders them as
//! an overlaid rate chart: time lists and recorders, series computation,
//! chart drawing, screens and the menu driver.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod chart;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod interrupts;
pub mod screens;
pub mod ui;
