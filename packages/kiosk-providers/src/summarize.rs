use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

const SYSTEM_PROMPT: &str = "You summarize news articles. Reply with a neutral, \
self-contained summary of the provided text in at most three sentences. \
Do not add commentary or headlines.";

pub async fn summarize(cfg: &kiosk_config::SummarizerProviderConfig, text: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": SYSTEM_PROMPT },
			{ "role": "user", "content": text },
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let summary = parse_summary_response(json)?;

	Ok(truncate_chars(&summary, cfg.max_summary_chars as usize))
}

fn parse_summary_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Summarizer response is missing content."))?;
	let trimmed = content.trim();

	if trimmed.is_empty() {
		return Err(eyre::eyre!("Summarizer returned an empty summary."));
	}

	Ok(trimmed.to_string())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}

	text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "  A tidy summary.  " } }
			]
		});
		let summary = parse_summary_response(json).expect("parse failed");
		assert_eq!(summary, "A tidy summary.");
	}

	#[test]
	fn rejects_empty_summaries() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "   " } }
			]
		});
		assert!(parse_summary_response(json).is_err());
	}

	#[test]
	fn truncates_on_char_boundaries() {
		assert_eq!(truncate_chars("héllo world", 5), "héllo");
		assert_eq!(truncate_chars("short", 10), "short");
	}
}
