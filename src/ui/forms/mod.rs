//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `lead_form`: Contact and financing forms

mod field_renderer;
mod lead_form;

pub use lead_form::draw as draw_lead_form;
