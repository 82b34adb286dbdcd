//! Title/year inference. One request per submitted description, each on its
//! own worker thread; results drain back into the event loop through a
//! channel polled every tick. The provisional event is never blocked on any
//! of this.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::model::config::InferenceConfig;
use crate::model::event::EventId;
use crate::parse::date::{is_valid_year, parse_date, year_start_timestamp};

/// Max length of a locally-derived fallback title, in grapheme clusters
const FALLBACK_TITLE_LEN: usize = 50;

const SYSTEM_PROMPT: &str = "Generate a concise title of at most 8 words for the event described \
                             below. Reply with the title alone, no quotes and no trailing \
                             punctuation. If the description clearly names a year, reply instead \
                             with a JSON object with title and year fields.";

/// Error type for inference calls. None of these reach the user as a
/// failure; they all degrade to the local fallback.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no api key in ${0}")]
    MissingApiKey(String),
    #[error("malformed completion payload")]
    MalformedResponse,
    #[error("running offline")]
    Offline,
}

/// Result of one title/year call, keyed to the event that asked for it
#[derive(Debug, Clone, PartialEq)]
pub struct TitleResolution {
    pub event_id: EventId,
    pub title: String,
    pub year: Option<String>,
    pub timestamp: Option<i64>,
}

// ── wire types (OpenAI-style chat completions) ─────────────────────

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The model may answer with JSON instead of a bare title
#[derive(Debug, Deserialize)]
struct StructuredTitle {
    title: String,
    #[serde(default)]
    year: Option<String>,
}

/// Fire-and-poll client. `request` spawns a worker per call; `poll` drains
/// finished resolutions without blocking.
pub struct InferenceClient {
    config: InferenceConfig,
    offline: bool,
    tx: mpsc::Sender<TitleResolution>,
    rx: mpsc::Receiver<TitleResolution>,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig, offline: bool) -> Self {
        let (tx, rx) = mpsc::channel();
        InferenceClient {
            config,
            offline,
            tx,
            rx,
        }
    }

    /// Kick off a title/year request for an event. Returns immediately;
    /// the resolution arrives via `poll`.
    pub fn request(&self, event_id: EventId, description: String) {
        let tx = self.tx.clone();
        let config = self.config.clone();
        let offline = self.offline;
        thread::spawn(move || {
            let resolution = resolve(&config, offline, event_id, &description);
            // The receiver only goes away at shutdown
            let _ = tx.send(resolution);
        });
    }

    /// Non-blocking poll for finished resolutions. Called once per tick.
    pub fn poll(&self) -> Vec<TitleResolution> {
        let mut done = Vec::new();
        while let Ok(resolution) = self.rx.try_recv() {
            done.push(resolution);
        }
        done
    }
}

fn resolve(
    config: &InferenceConfig,
    offline: bool,
    event_id: EventId,
    description: &str,
) -> TitleResolution {
    let fetched = if offline {
        Err(InferenceError::Offline)
    } else {
        fetch_title(config, description)
    };

    match fetched {
        Ok((title, structured_year)) => {
            // A structured year must be a real 4-digit year; otherwise fall
            // back to reading a date out of the description itself.
            let (year, timestamp) = match structured_year.filter(|y| is_valid_year(y)) {
                Some(year) => {
                    let ts = year.parse::<i32>().ok().and_then(year_start_timestamp);
                    (Some(year), ts)
                }
                None => match parse_date(description) {
                    Some(d) => (Some(d.year), Some(d.timestamp)),
                    None => (None, None),
                },
            };
            tracing::debug!(%event_id, "title resolved");
            TitleResolution {
                event_id,
                title,
                year,
                timestamp,
            }
        }
        Err(err) => {
            tracing::warn!(%event_id, error = %err, "title inference failed; using fallback");
            TitleResolution {
                event_id,
                title: fallback_title(description),
                year: None,
                timestamp: None,
            }
        }
    }
}

fn fetch_title(
    config: &InferenceConfig,
    description: &str,
) -> Result<(String, Option<String>), InferenceError> {
    let api_key = std::env::var(&config.api_key_env)
        .map_err(|_| InferenceError::MissingApiKey(config.api_key_env.clone()))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()?;

    let request = CompletionRequest {
        model: &config.model,
        messages: vec![
            Message {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            Message {
                role: "user",
                content: description,
            },
        ],
    };

    let response: CompletionResponse = client
        .post(&config.endpoint)
        .bearer_auth(api_key)
        .json(&request)
        .send()?
        .error_for_status()?
        .json()?;

    let content = response
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InferenceError::MalformedResponse)?;

    // Either a bare title or {"title": ..., "year": ...}; anything that
    // isn't valid JSON is just a title.
    match serde_json::from_str::<StructuredTitle>(content) {
        Ok(structured) => Ok((structured.title, structured.year)),
        Err(_) => Ok((content.to_string(), None)),
    }
}

/// The local stand-in when the service can't be reached: the description
/// itself, cut to a displayable length.
fn fallback_title(description: &str) -> String {
    let graphemes: Vec<&str> = description.graphemes(true).collect();
    if graphemes.len() > FALLBACK_TITLE_LEN {
        let mut title: String = graphemes[..FALLBACK_TITLE_LEN].concat();
        title.push_str("...");
        title
    } else {
        description.to_string()
    }
}
