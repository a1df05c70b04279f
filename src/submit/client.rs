//! HTTP client for submitting the site's forms
//!
//! Mirrors what the browser does on submit: one request to the form's
//! action, fields encoded as multipart form data, and the anti-forgery token
//! repeated in the `X-CSRFToken` header.

use super::error::SubmissionError;
use super::page::{parse_form_page, FormPage};
use super::traits::FormSubmitter;
use crate::state::{FormMethod, FormPayload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use std::time::Duration;
use url::Url;

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Client that submits forms to the dealership site
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
}

impl HttpSubmitter {
    /// Create a new submitter with a per-request timeout
    ///
    /// The cookie store keeps the session cookie that pairs with the token
    /// fetched by [`HttpSubmitter::fetch_form_page`].
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .user_agent(concat!("regional-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Build the request for a payload without sending it
    pub fn build_request(&self, payload: &FormPayload) -> Result<reqwest::Request, SubmissionError> {
        let builder = match payload.method {
            FormMethod::Post => {
                let form = payload
                    .entries
                    .iter()
                    .fold(multipart::Form::new(), |form, (name, value)| {
                        form.text(name.clone(), value.clone())
                    });
                self.client.post(payload.action.clone()).multipart(form)
            }
            FormMethod::Get => self
                .client
                .get(payload.action.clone())
                .query(&payload.entries),
        };

        let builder = match &payload.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        };

        builder.build().map_err(SubmissionError::from)
    }

    /// Load the form page and read its token, method and select choices
    pub async fn fetch_form_page(&self, page: &Url) -> Result<FormPage> {
        tracing::debug!("Loading form page {page}");

        let response = self
            .client
            .get(page.clone())
            .send()
            .await
            .with_context(|| format!("Failed to load {page}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected status loading {page}"))?;

        let html = response.text().await?;
        Ok(parse_form_page(&html))
    }
}

#[async_trait]
impl FormSubmitter for HttpSubmitter {
    async fn submit(&self, payload: FormPayload) -> Result<u16, SubmissionError> {
        let request = self.build_request(&payload)?;
        tracing::info!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            tracing::warn!("Form submission rejected with status {status}");
            Err(SubmissionError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
