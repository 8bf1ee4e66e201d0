//! AI weather insight generation
//!
//! Optional enhancement that asks a generative-text service for a short,
//! friendly summary of the current conditions. This path is never allowed to
//! fail the dashboard: a missing key or any request/parse failure degrades to
//! a fixed fallback string.

use crate::config::InsightConfig;
use crate::models::CurrentConditions;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Hint shown when no insight API key is configured
pub const MISSING_KEY_HINT: &str = "Add your Gemini API key to enable smart weather insights!";

/// Fallback shown when the insight request fails for any reason
pub const UNAVAILABLE_FALLBACK: &str = "AI insights currently unavailable. Enjoy the day!";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Request a short natural-language insight for the current conditions.
///
/// Always returns a displayable string; errors are logged and converted to
/// the fixed fallback.
pub async fn weather_insight(config: &InsightConfig, current: &CurrentConditions) -> String {
    let Some(api_key) = config.api_key.as_deref() else {
        return MISSING_KEY_HINT.to_string();
    };

    match request_insight(config, api_key, current).await {
        Some(text) => text,
        None => UNAVAILABLE_FALLBACK.to_string(),
    }
}

async fn request_insight(
    config: &InsightConfig,
    api_key: &str,
    current: &CurrentConditions,
) -> Option<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(20))
        .build()
        .map_err(|e| warn!("Failed to create insight HTTP client: {}", e))
        .ok()?;

    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.base_url.trim_end_matches('/'),
        config.model,
        api_key
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": build_prompt(current) }] }]
    });

    debug!("Requesting weather insight from model {}", config.model);

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| warn!("Insight request failed: {}", e))
        .ok()?;

    if !response.status().is_success() {
        warn!("Insight request returned status {}", response.status());
        return None;
    }

    let parsed: GenerateResponse = response
        .json()
        .await
        .map_err(|e| warn!("Failed to parse insight response: {}", e))
        .ok()?;

    let text = parsed
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .next()?
        .text
        .trim()
        .to_string();

    if text.is_empty() { None } else { Some(text) }
}

/// Assemble the prompt from the merged current reading.
fn build_prompt(current: &CurrentConditions) -> String {
    let sample = &current.sample;
    let description = sample
        .primary_condition()
        .map(|c| c.description.as_str())
        .unwrap_or("unknown");

    let mut prompt = format!(
        "You are a friendly, witty weather assistant for the app \"Hamro Weather\".\n\
         Current weather in {}:\n\
         - Condition: {}\n\
         - Temp: {:.0}°\n\
         - Feels Like: {:.0}°\n\
         - Humidity: {}%\n\
         - Wind: {} speed\n",
        current.name, description, sample.temp, sample.feels_like, sample.humidity,
        sample.wind_speed
    );

    if let Some(uv) = sample.uv_index {
        prompt.push_str(&format!("- UV Index: {uv}\n"));
    }
    if let Some(aqi) = sample.aqi {
        prompt.push_str(&format!(
            "- Air Quality Index: {aqi} (Scale: 1 Good to 5 Very Poor)\n"
        ));
    }

    prompt.push_str(
        "\nProvide a SHORT (max 2 sentences) output:\n\
         1. A practical clothing recommendation.\n\
         2. A fun or useful activity suggestion.\n",
    );
    if sample.aqi.is_some_and(|aqi| aqi > 3) {
        prompt.push_str("Include a brief warning about the poor air quality.\n");
    }
    prompt.push_str("Do not use markdown formatting like bolding. Keep it conversational.");

    prompt
}
