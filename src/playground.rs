//! "Run Code" buttons on tutorial pages.
//!
//! Nothing is executed. [`SimulatedRunner`] checks whether the pasted code
//! contains the exercise's expected snippet and answers with canned output;
//! [`HttpCodeRunner`] forwards to `POST /api/run-code`.

use std::{future::Future, time::Duration};

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const NO_OUTPUT: &str = "No output";

pub trait CodeRunner: Send + Sync {
    fn run(&self, code: &str, language: &str) -> impl Future<Output = Result<String>> + Send;
}

/// One exercise's expected code and the output shown when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedExercise {
    pub expected: String,
    pub output: String,
}

pub struct SimulatedRunner {
    exercises: Vec<CannedExercise>,
    delay: Duration,
}

impl SimulatedRunner {
    pub fn new(exercises: Vec<CannedExercise>, delay: Duration) -> Self {
        Self { exercises, delay }
    }

    fn matching(&self, code: &str) -> Option<&CannedExercise> {
        let pasted = squash_whitespace(code);
        self.exercises
            .iter()
            .find(|exercise| pasted.contains(&squash_whitespace(&exercise.expected)))
    }
}

/// Collapse runs of whitespace so indentation differences still match.
fn squash_whitespace(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl CodeRunner for SimulatedRunner {
    async fn run(&self, code: &str, _language: &str) -> Result<String> {
        time::sleep(self.delay).await;
        match self.matching(code) {
            Some(exercise) => Ok(exercise.output.clone()),
            None => bail!("code does not match any exercise"),
        }
    }
}

#[derive(Serialize)]
struct RunCodeRequest<'a> {
    code: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
struct RunCodeResponse {
    output: String,
}

/// Client for `POST /api/run-code`.
pub struct HttpCodeRunner {
    client: Client,
    base_url: String,
}

impl HttpCodeRunner {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build run-code HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl CodeRunner for HttpCodeRunner {
    async fn run(&self, code: &str, language: &str) -> Result<String> {
        let url = format!("{}/api/run-code", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RunCodeRequest { code, language })
            .send()
            .await
            .with_context(|| format!("run-code request to {url} failed"))?
            .error_for_status()
            .context("run-code endpoint returned an error status")?
            .json::<RunCodeResponse>()
            .await
            .context("run-code response missing output")?;
        Ok(response.output)
    }
}

/// What the output panel shows: the output verbatim, or [`NO_OUTPUT`]
/// when there is none or the run failed.
pub async fn run_for_display<R: CodeRunner>(runner: &R, code: &str, language: &str) -> String {
    match runner.run(code, language).await {
        Ok(output) if output.is_empty() => NO_OUTPUT.to_string(),
        Ok(output) => output,
        Err(err) => {
            log_warn!("code run failed: {err:#}");
            NO_OUTPUT.to_string()
        }
    }
}
