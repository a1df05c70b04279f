//! Reusable UI components

mod alert;
mod button;

pub use alert::{alerts_height, render_alerts};
pub use button::{render_action_button, BUTTON_HEIGHT};
