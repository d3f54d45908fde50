//! Individual text-mining rules. Each returns `None` when the text carries no
//! usable value so the caller decides the fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::defaults::TEMPERATURE_RANGE_C;
use crate::schemas::Snippet;

static SUCCESS_RATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:tingkat|persentase)\s*(?:keberhasilan|kesesuaian)[^0-9]*([0-9]+)").unwrap()
});

static CROP_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Tanaman [0-9]+|tanaman yang cocok):\s*[^.\n]+").unwrap());

static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());

static TEMP_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*[-–]\s*([0-9]+)\s*°C").unwrap());

static TEMP_LABELED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:suhu|temperature|temp)[^0-9]*([0-9]+)\s*°C").unwrap());

static TEMP_FEEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:RealFeel®|actual)[^0-9]*([0-9]+)°").unwrap());

static HUMIDITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:kelembaban|humidity)[^0-9]*([0-9]+)").unwrap());

static RAINFALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:curah hujan|rainfall)[^0-9]*([0-9]+)").unwrap());

// Snippet text that mentions any of these is treated as weather context
const WEATHER_MARKERS: [&str; 3] = ["°c", "suhu", "temperature"];

/// Integer captured by the first match of `re`, if it fits in a u32
fn first_integer(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn success_rate(narrative: &str) -> Option<u32> {
    first_integer(&SUCCESS_RATE_RE, narrative)
}

pub fn humidity(narrative: &str) -> Option<u32> {
    first_integer(&HUMIDITY_RE, narrative)
}

pub fn rainfall(narrative: &str) -> Option<u32> {
    first_integer(&RAINFALL_RE, narrative)
}

/// Crop names listed as `Tanaman N:` or `tanaman yang cocok:`, first
/// occurrence order, without duplicates or empty entries
pub fn crop_names(narrative: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for m in CROP_LINE_RE.find_iter(narrative) {
        let Some(raw) = m.as_str().split(':').nth(1) else {
            continue;
        };
        let name = EMPHASIS_RE.replace_all(raw.trim(), "").trim().to_string();
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

fn plausible(temp: u32) -> Option<u32> {
    TEMPERATURE_RANGE_C.contains(&temp).then_some(temp)
}

fn range_midpoint(caps: &regex::Captures<'_>) -> Option<u32> {
    let low: u64 = caps.get(1)?.as_str().parse().ok()?;
    let high: u64 = caps.get(2)?.as_str().parse().ok()?;
    // round half up
    let sum = low.checked_add(high)?.checked_add(1)?;
    u32::try_from(sum / 2).ok()
}

fn single_reading(caps: &regex::Captures<'_>) -> Option<u32> {
    caps.get(1)?.as_str().parse().ok()
}

/// First plausible temperature in `text`. Patterns are tried in priority
/// order; within a pattern, matches are tried in order of appearance.
pub fn temperature(text: &str) -> Option<u32> {
    let patterns: [(&Regex, fn(&regex::Captures<'_>) -> Option<u32>); 3] = [
        (&*TEMP_RANGE_RE, range_midpoint),
        (&*TEMP_LABELED_RE, single_reading),
        (&*TEMP_FEEL_RE, single_reading),
    ];

    patterns.iter().find_map(|(re, read)| {
        re.captures_iter(text)
            .find_map(|caps| read(&caps).and_then(plausible))
    })
}

/// Snippets that look like weather reports, joined with single spaces
pub fn weather_text(snippets: &[Snippet]) -> String {
    snippets
        .iter()
        .filter(|s| {
            let lower = s.snippet.to_lowercase();
            WEATHER_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(|s| s.snippet.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_cases() {
        let cases: &[(&str, Option<u32>)] = &[
            ("Tingkat keberhasilan mencapai 92%", Some(92)),
            ("persentase kesesuaian: **78**%", Some(78)),
            ("TINGKAT KESESUAIAN lahan sekitar 64 persen", Some(64)),
            ("tingkatkeberhasilan 70", Some(70)),
            ("keberhasilan 90%", None),
            ("Tingkat keberhasilan tinggi", None),
            ("", None),
            ("tingkat keberhasilan 99999999999999999999", None),
        ];
        for (text, expected) in cases {
            assert_eq!(success_rate(text), *expected, "input: {text:?}");
        }
    }

    #[test]
    fn success_rate_takes_first_match() {
        let text = "Tingkat keberhasilan 70%. Persentase keberhasilan lain 95%.";
        assert_eq!(success_rate(text), Some(70));
    }

    #[test]
    fn crop_names_strip_emphasis_and_keep_order() {
        let text = "Tanaman 1: **Padi Gogo**\nTanaman 2: *Jagung Manis*.\ntanaman yang cocok: Kedelai";
        let expected = ["Padi Gogo", "Jagung Manis", "Kedelai"];
        assert_eq!(crop_names(text), expected);
    }

    #[test]
    fn crop_names_cut_at_period_and_second_colon() {
        let names = crop_names("Tanaman 3: Cabai Rawit. Panen cepat");
        assert_eq!(names, vec!["Cabai Rawit"]);
        let names = crop_names("Tanaman 4: Tomat: varietas Servo");
        assert_eq!(names, vec!["Tomat"]);
    }

    #[test]
    fn crop_names_drop_empty_and_duplicates() {
        let text = "Tanaman 1: ***\nTanaman 2: Jagung\nTANAMAN 3: Jagung\nTanaman 4: Ubi";
        assert_eq!(crop_names(text), vec!["Jagung", "Ubi"]);
    }

    #[test]
    fn crop_names_require_label() {
        let names = crop_names("Padi, Jagung, dan Kedelai cocok ditanam");
        assert!(names.is_empty());
        assert!(crop_names("Tanaman: Padi").is_empty());
    }

    #[test]
    fn temperature_cases() {
        let cases: &[(&str, Option<u32>)] = &[
            ("Suhu sekitar 24-30°C", Some(27)),
            ("rentang 25 – 30 °C", Some(28)),
            ("suhu 31°C siang hari", Some(31)),
            ("Temperature: 22 °C", Some(22)),
            ("RealFeel® 35°", Some(35)),
            ("actual temp 29°", Some(29)),
            ("suhu 45°C", None),
            ("suhu 5°C", None),
            ("50-60°C", None),
            ("curah hujan 30 mm", None),
            ("", None),
        ];
        for (text, expected) in cases {
            assert_eq!(temperature(text), *expected, "input: {text:?}");
        }
    }

    #[test]
    fn temperature_skips_implausible_candidates() {
        assert_eq!(temperature("suhu 45°C lalu suhu 33°C"), Some(33));
        assert_eq!(temperature("80-90°C dan 20-22°C"), Some(21));
    }

    #[test]
    fn temperature_prefers_range_over_label() {
        assert_eq!(temperature("suhu 35°C, rata-rata 20-24°C"), Some(22));
    }

    #[test]
    fn temperature_falls_through_to_feel_pattern() {
        assert_eq!(temperature("suhu 48°C. RealFeel® 30°"), Some(30));
    }

    #[test]
    fn humidity_and_rainfall_cases() {
        assert_eq!(humidity("Kelembaban udara 80%"), Some(80));
        assert_eq!(humidity("Humidity: 120"), Some(120));
        assert_eq!(humidity("lembab sekali"), None);
        assert_eq!(rainfall("Curah hujan tahunan 2500 mm"), Some(2500));
        assert_eq!(rainfall("rainfall 1800mm"), Some(1800));
        assert_eq!(rainfall("hujan deras"), None);
    }

    #[test]
    fn weather_text_filters_and_joins() {
        let snippets = vec![
            Snippet::new("a", "l1", "Cerah 31°C"),
            Snippet::new("b", "l2", "Harga cabai naik"),
            Snippet::new("c", "l3", "SUHU udara tinggi"),
            Snippet::new("d", "l4", "Temperature today"),
        ];
        assert_eq!(
            weather_text(&snippets),
            "Cerah 31°C SUHU udara tinggi Temperature today"
        );
        assert_eq!(weather_text(&[]), "");
    }
}
