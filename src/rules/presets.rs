#![forbid(unsafe_code)]

//! Preset format patterns
//!
//! The registry is compiled once, on first use, and shared read-only by every
//! validation call afterwards.

use crate::rules::grammar::Format;
use regex::Regex;
use std::sync::LazyLock;

const BYTE: &str = "(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])";
const PERCENT: &str = "(?:100|[1-9]?[0-9])%";
const HUE: &str = "(?:360|3[0-5][0-9]|[12][0-9][0-9]|[1-9]?[0-9])";
const ALPHA_CHANNEL: &str = r"(?:0|1|1\.0+|0?\.[0-9]+)";
const CRON_ATOM: &str = "(?:[0-9]+|[A-Za-z]{3})";

static REGISTRY: LazyLock<PresetRegistry> = LazyLock::new(PresetRegistry::build);

/// Compiled patterns for every [`Format`]
#[derive(Debug)]
pub struct PresetRegistry {
    patterns: [Regex; Format::ALL.len()],
}

impl PresetRegistry {
    fn build() -> Self {
        PresetRegistry {
            patterns: Format::ALL.map(|format| {
                Regex::new(&pattern_source(format)).expect("preset patterns are valid regexes")
            }),
        }
    }

    /// The compiled pattern for `format`
    pub fn pattern(&self, format: Format) -> &Regex {
        &self.patterns[format as usize]
    }

    /// Returns true if `value` is a well-formed `format` string
    pub fn is_match(&self, format: Format, value: &str) -> bool {
        self.pattern(format).is_match(value)
    }
}

/// The process-wide preset registry
pub fn registry() -> &'static PresetRegistry {
    &REGISTRY
}

fn pattern_source(format: Format) -> String {
    let rgb_body = format!(
        r"(?:{b}\s*,\s*{b}\s*,\s*{b}|{p}\s*,\s*{p}\s*,\s*{p})",
        b = BYTE,
        p = PERCENT
    );
    let cron_field = format!(
        r"(?:\*|\?|{a}(?:-{a})?(?:,{a}(?:-{a})?)*)(?:/[0-9]+)?",
        a = CRON_ATOM
    );

    match format {
        Format::Alpha => "^[a-zA-Z]+$".to_string(),
        Format::AlphaNumeric => "^[a-zA-Z0-9]+$".to_string(),
        Format::Numeric => r"^[-+]?[0-9]+(?:\.[0-9]+)?$".to_string(),
        Format::Hexadecimal => "^(?:0[xX])?[0-9a-fA-F]+$".to_string(),
        Format::HexColor => {
            "^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$".to_string()
        }
        Format::Rgb => format!(r"^rgb\(\s*{}\s*\)$", rgb_body),
        Format::Rgba => format!(r"^rgba\(\s*{}\s*,\s*{}\s*\)$", rgb_body, ALPHA_CHANNEL),
        Format::Hsl => format!(
            r"^hsl\(\s*{h}\s*,\s*{p}\s*,\s*{p}\s*\)$",
            h = HUE,
            p = PERCENT
        ),
        Format::Hsla => format!(
            r"^hsla\(\s*{h}\s*,\s*{p}\s*,\s*{p}\s*,\s*{a}\s*\)$",
            h = HUE,
            p = PERCENT,
            a = ALPHA_CHANNEL
        ),
        Format::Email => concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        )
        .to_string(),
        Format::Cron => format!(
            r"^(?:@(?:annually|yearly|monthly|weekly|daily|hourly|reboot)|@every (?:[0-9]+(?:ns|us|µs|ms|s|m|h))+|{f}(?: {f}){{4,6}})$",
            f = cron_field
        ),
    }
}
