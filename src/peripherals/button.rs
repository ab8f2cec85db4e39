//! Side button of the PineTime

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};
use surfreport::ui;

/// Debounced side button, reported to the watch face as
/// [`ui::Button::Select`] on press.
pub struct SideButton<'a> {
    /// High while pressed
    input: Input<'a, P0_13>,
    /// Powers the button circuit
    enable: Output<'a, P0_15>,
    debouncer: Debouncer<u8, Repeat2>,
}

impl<'a> SideButton<'a> {
    pub fn init(input: Input<'a, P0_13>, enable: Output<'a, P0_15>) -> Self {
        Self {
            input,
            enable,
            debouncer: debounce_2(false),
        }
    }

    /// Sample the button once. Yields an event on the press edge only.
    pub async fn poll(&mut self) -> Option<ui::Button> {
        self.enable.set_high();
        // Outputs settle shortly after enabling
        Timer::after(Duration::from_nanos(1)).await;
        let edge = self.debouncer.update(self.input.is_high());
        // Around 34µA are drawn while P0.15 stays high
        self.enable.set_low();

        match edge {
            Some(Edge::Rising) => Some(ui::Button::Select),
            _ => None,
        }
    }
}
