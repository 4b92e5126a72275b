// Time-of-day derived presentation state
use chrono::{DateTime, Local, Timelike};

/// Discrete presentation mode for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Sunrise,
    Day,
    Sunset,
    Night,
}

impl UiMode {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=6 => UiMode::Sunrise,
            7..=16 => UiMode::Day,
            17..=18 => UiMode::Sunset,
            _ => UiMode::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiMode::Sunrise => "sunrise",
            UiMode::Day => "day",
            UiMode::Sunset => "sunset",
            UiMode::Night => "night",
        }
    }
}

/// Salutation category. Bucketed independently from [`UiMode`]; the two
/// tables intentionally disagree at the edges (e.g. hour 12 is mid-day but
/// already afternoon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            17..=21 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
            Greeting::Night => "Good night",
        }
    }
}

/// Hour-range to background asset key. Every range currently resolves to
/// the same asset; the ranges exist so they can be split later.
const BACKGROUND_ASSETS: &[(u32, u32, &str)] = &[(0, 24, "backgroundblock1")];

pub fn background_asset(hour: u32) -> &'static str {
    BACKGROUND_ASSETS
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&hour))
        .map(|(_, _, asset)| *asset)
        .unwrap_or(BACKGROUND_ASSETS[0].2)
}

/// 24-hour clock string, e.g. "19:05:09".
pub fn format_clock(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Long-form date string, e.g. "Monday, January 1, 2024".
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// Everything the header derives from the wall clock. Pure and total for
/// any instant; recomputed on each clock tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    pub mode: UiMode,
    pub greeting: Greeting,
    pub background: &'static str,
    pub clock: String,
    pub date: String,
}

impl DerivedState {
    pub fn at(now: &DateTime<Local>) -> Self {
        let hour = now.hour();
        Self {
            mode: UiMode::for_hour(hour),
            greeting: Greeting::for_hour(hour),
            background: background_asset(hour),
            clock: format_clock(now),
            date: format_date(now),
        }
    }
}
