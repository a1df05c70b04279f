//! Form submission over HTTP

mod client;
mod error;
mod page;
mod traits;

pub use client::HttpSubmitter;
pub use error::SubmissionError;
pub use page::FormPage;
pub use traits::FormSubmitter;

#[cfg(test)]
pub use traits::MockFormSubmitter;
