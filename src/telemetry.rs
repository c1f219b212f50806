//! Structured event logging.
//!
//! Every record is one JSON object: `ts`, `level`, `event`, then whatever
//! fields the caller attached. Records below the configured level are
//! dropped. In the browser they go to the devtools console, natively to
//! stdout.

use std::cell::Cell;

use serde_json::{json, Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

pub fn set_min_level(level: LogLevel) {
    MIN_LEVEL.with(|min| min.set(level));
}

pub fn enabled(level: LogLevel) -> bool {
    MIN_LEVEL.with(|min| level >= min.get())
}

pub fn log_event(level: LogLevel, event: &str, fields: Value) {
    if !enabled(level) {
        return;
    }

    emit(level, &format_record(now_unix_seconds(), level, event, fields));
}

fn format_record(ts: u64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::from(ts));
    payload.insert("level".to_string(), Value::from(level.as_str()));
    payload.insert("event".to_string(), Value::from(event));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

/// Analytics hook. Records the event locally; nothing leaves the page.
pub fn track_event(category: &str, action: &str, label: &str) {
    log_event(
        LogLevel::Info,
        "track_event",
        json!({ "category": category, "action": action, "label": label }),
    );
}

/// Contact form hook. Submission is not implemented; only the attempt is logged.
pub fn record_contact_submission() {
    log_event(LogLevel::Info, "contact_form_submitted", json!({}));
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, record: &Value) {
    let line = wasm_bindgen::JsValue::from_str(&record.to_string());
    match level {
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, record: &Value) {
    println!("{record}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1_000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}
