//! Surf report watch face
//!
//! Hardware-independent core of the watch face: time formatting, the tick
//! timer, the battery model and the embedded-graphics rendering of the face.
//! The firmware binary feeds host events into [`ui::WatchFace`] and hands it
//! a draw target on every redraw pass.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod battery;
pub mod config;
pub mod error;
pub mod time;
pub mod ui;

pub use error::Error;
