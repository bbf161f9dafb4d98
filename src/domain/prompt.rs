use std::fmt::Write;

use crate::domain::stats::{TextUsage, TrendStats};

/// Brightness above this reads as a "bright" trend; at or below, "dark".
pub const BRIGHTNESS_THRESHOLD: f64 = 127.0;

/// Contrast above this reads as "high contrast"; at or below, "soft contrast".
pub const CONTRAST_THRESHOLD: f64 = 50.0;

/// Build the text-to-image prompt for a title.
///
/// With no stats available the prompt falls back to a generic template, so
/// generation works identically whether or not the analysis job has run.
/// The same inputs always produce the same prompt.
#[must_use]
pub fn build_prompt(title: &str, stats: Option<&TrendStats>) -> String {
    let mut prompt = format!("Create a YouTube thumbnail with the title '{title}'");

    let Some(stats) = stats else {
        prompt.push_str(". Make it vibrant and attention-grabbing.");
        return prompt;
    };

    let brightness = if stats.brightness_avg > BRIGHTNESS_THRESHOLD {
        "bright"
    } else {
        "dark"
    };
    let contrast = if stats.contrast_avg > CONTRAST_THRESHOLD {
        "high contrast"
    } else {
        "soft contrast"
    };

    let _ = write!(prompt, ". Make it {brightness} with {contrast}. ");
    prompt.push_str(match stats.text_usage {
        TextUsage::Yes => "Include text overlay. ",
        TextUsage::No => "Minimize text. ",
    });
    prompt.push_str(
        "Use vibrant, attention-grabbing design similar to trending YouTube thumbnails.",
    );

    prompt
}
