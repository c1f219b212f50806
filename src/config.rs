use serde::Deserialize;

use crate::{telemetry::LogLevel, typing::TypingTimings};

pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_ROLES: [&str; 4] = [
    "AI Engineer",
    "Data Scientist",
    "ML Engineer",
    "Full-stack Developer",
];
const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;
const DEFAULT_SECTION_ACTIVATION_OFFSET_PX: f64 = 100.0;
const DEFAULT_SCROLL_HINT_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_TYPE_INTERVAL_MS: u32 = 100;
const DEFAULT_DELETE_INTERVAL_MS: u32 = 50;
const DEFAULT_HOLD_MS: u32 = 2_000;
const DEFAULT_NEXT_ROLE_DELAY_MS: u32 = 500;
const DEFAULT_TYPING_START_DELAY_MS: u32 = 1_000;
const DEFAULT_BAR_GROW_DELAY_MS: u32 = 300;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_PRELOAD: [&str; 1] = ["css/modern-style.css"];

const HEADER_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const SECTION_ACTIVATION_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const SCROLL_HINT_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const TYPE_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 1_000);
const DELETE_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 1_000);
const HOLD_MS_BOUNDS: (u32, u32) = (0, 30_000);
const NEXT_ROLE_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const TYPING_START_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const BAR_GROW_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);

/// Tunables for the page, read from an optional JSON block in the markup.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub roles: Vec<String>,
    pub header_offset_px: f64,
    pub section_activation_offset_px: f64,
    pub scroll_hint_threshold_px: f64,
    pub typing: TypingTimings,
    pub bar_grow_delay_ms: u32,
    pub log_level: LogLevel,
    pub content_url: Option<String>,
    pub preload: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSiteConfig {
    roles: Option<Vec<String>>,
    header_offset_px: Option<f64>,
    section_activation_offset_px: Option<f64>,
    scroll_hint_threshold_px: Option<f64>,
    type_interval_ms: Option<u32>,
    delete_interval_ms: Option<u32>,
    hold_ms: Option<u32>,
    next_role_delay_ms: Option<u32>,
    typing_start_delay_ms: Option<u32>,
    bar_grow_delay_ms: Option<u32>,
    log_level: Option<String>,
    content_url: Option<String>,
    preload: Option<Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_raw(RawSiteConfig::default())
    }
}

impl SiteConfig {
    /// Parses the config block. A value that is out of bounds falls back to
    /// its default; only malformed JSON is an error.
    pub fn from_json(raw: &str) -> Result<Self, &'static str> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: RawSiteConfig = serde_json::from_str(raw).map_err(|_| "invalid_config_json")?;
        Ok(Self::from_raw(parsed))
    }

    fn from_raw(raw: RawSiteConfig) -> Self {
        let typing = TypingTimings {
            type_interval_ms: with_bounds(
                raw.type_interval_ms,
                DEFAULT_TYPE_INTERVAL_MS,
                TYPE_INTERVAL_MS_BOUNDS,
            ),
            delete_interval_ms: with_bounds(
                raw.delete_interval_ms,
                DEFAULT_DELETE_INTERVAL_MS,
                DELETE_INTERVAL_MS_BOUNDS,
            ),
            hold_ms: with_bounds(raw.hold_ms, DEFAULT_HOLD_MS, HOLD_MS_BOUNDS),
            next_role_delay_ms: with_bounds(
                raw.next_role_delay_ms,
                DEFAULT_NEXT_ROLE_DELAY_MS,
                NEXT_ROLE_DELAY_MS_BOUNDS,
            ),
            start_delay_ms: with_bounds(
                raw.typing_start_delay_ms,
                DEFAULT_TYPING_START_DELAY_MS,
                TYPING_START_DELAY_MS_BOUNDS,
            ),
        };

        Self {
            roles: non_empty_strings(raw.roles).unwrap_or_else(|| owned(&DEFAULT_ROLES)),
            header_offset_px: with_bounds(
                raw.header_offset_px,
                DEFAULT_HEADER_OFFSET_PX,
                HEADER_OFFSET_PX_BOUNDS,
            ),
            section_activation_offset_px: with_bounds(
                raw.section_activation_offset_px,
                DEFAULT_SECTION_ACTIVATION_OFFSET_PX,
                SECTION_ACTIVATION_OFFSET_PX_BOUNDS,
            ),
            scroll_hint_threshold_px: with_bounds(
                raw.scroll_hint_threshold_px,
                DEFAULT_SCROLL_HINT_THRESHOLD_PX,
                SCROLL_HINT_THRESHOLD_PX_BOUNDS,
            ),
            typing,
            bar_grow_delay_ms: with_bounds(
                raw.bar_grow_delay_ms,
                DEFAULT_BAR_GROW_DELAY_MS,
                BAR_GROW_DELAY_MS_BOUNDS,
            ),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
            content_url: raw
                .content_url
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            preload: raw
                .preload
                .map(|paths| {
                    paths
                        .into_iter()
                        .map(|value| value.trim().to_string())
                        .filter(|value| !value.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| owned(&DEFAULT_PRELOAD)),
        }
    }
}

fn with_bounds<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T)) -> T {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty_strings(values: Option<Vec<String>>) -> Option<Vec<String>> {
    let values = values?
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>();

    (!values.is_empty()).then_some(values)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
