//! The article type returned by a feed endpoint.
//!
//! `NewsItem` mirrors the JSON objects found in the `data` array of a feed
//! response.  Feeds are loosely shaped, so every field is optional and the
//! rendering helpers ([`NewsItem::image_url`], [`NewsItem::excerpt`],
//! [`NewsItem::display_date`]) decide how gaps are filled.

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shown instead of an article image when the feed provides none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/240x150";

/// How many characters of the snippet are shown on a card.
pub const EXCERPT_CHARS: usize = 90;

/// Rendered when `isoDate` is missing or cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Offset-less datetime layouts, read as wall-clock time.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A single article from a feed.
///
/// Decoding never fails on a JSON object: fields of an unexpected type are
/// read as absent (numbers and booleans are stringified), so one odd article
/// cannot take the rest of the feed down with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Key used for list identity.  Feeds send either a string or a number.
    #[serde(default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub iso_date: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub content_snippet: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de_image")]
    pub image: Option<NewsImage>,
}

/// The `image` field: either a bare URL or a set of sized variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsImage {
    Url(String),
    Sized {
        small: Option<String>,
        large: Option<String>,
    },
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?))
}

fn de_image<'de, D>(deserializer: D) -> Result<Option<NewsImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(url) => Some(NewsImage::Url(url)),
        Value::Object(mut sizes) => Some(NewsImage::Sized {
            small: sizes.remove("small").and_then(text),
            large: sizes.remove("large").and_then(text),
        }),
        _ => None,
    })
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Parse a feed timestamp into `tz`.
///
/// Accepts RFC 3339 and RFC 2822 timestamps, offset-less ISO datetimes (wall
/// time in `tz`) and bare `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?).with_timezone(tz))
}

impl NewsItem {
    /// URL of the image to show for this card.
    ///
    /// A bare string wins when non-empty; sized variants prefer `small`, then
    /// `large`.  Anything else falls back to [`PLACEHOLDER_IMAGE`].
    pub fn image_url(&self) -> &str {
        let url = match &self.image {
            Some(NewsImage::Url(url)) => Some(url.as_str()).filter(|u| !u.is_empty()),
            Some(NewsImage::Sized { small, large }) => non_empty(small).or(non_empty(large)),
            None => None,
        };
        url.unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// First [`EXCERPT_CHARS`] characters of the snippet, followed by `...`.
    ///
    /// `contentSnippet` is used when present and non-empty, otherwise `content`.
    pub fn excerpt(&self) -> String {
        let source = non_empty(&self.content_snippet)
            .or(self.content.as_deref())
            .unwrap_or_default();
        let mut out: String = source.chars().take(EXCERPT_CHARS).collect();
        out.push_str("...");
        out
    }

    /// Title for display, empty when the feed omits it.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Publication date parsed from `isoDate`, in local time.
    pub fn published(&self) -> Option<DateTime<Local>> {
        parse_date_in(self.iso_date.as_deref()?, &Local)
    }

    /// Publication date in Indonesian long form, e.g. `Senin, 1 Januari 2024`.
    pub fn display_date(&self) -> String {
        self.published()
            .map(|dt| format_long_date_id(dt.date_naive()))
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }
}

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn weekday_id(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Format a date the way the `id-ID` locale writes a long date.
pub fn format_long_date_id(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_id(date.weekday()),
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn parse(json: &str) -> NewsItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_full_item() {
        let item = parse(
            r#"{
                "id": "abc",
                "title": "Judul",
                "link": "https://example.com/a",
                "isoDate": "2024-01-01T10:00:00.000Z",
                "contentSnippet": "snippet",
                "content": "content",
                "image": {"small": "https://img/s.jpg", "large": "https://img/l.jpg"}
            }"#,
        );

        assert_eq!(item.id.as_deref(), Some("abc"));
        assert_eq!(item.title(), "Judul");
        assert_eq!(item.link.as_deref(), Some("https://example.com/a"));
        assert_eq!(item.image_url(), "https://img/s.jpg");
    }

    #[test]
    fn mistyped_fields_are_read_leniently() {
        let item = parse(r#"{"id": 2, "title": 42, "link": null, "image": 123, "content": ["x"]}"#);
        assert_eq!(item.id.as_deref(), Some("2"));
        assert_eq!(item.title(), "42");
        assert!(item.link.is_none());
        assert!(item.content.is_none());
        assert_eq!(item.image_url(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn sized_image_ignores_non_string_sizes() {
        let item = parse(r#"{"image": {"small": 5, "large": "https://img/l.jpg"}}"#);
        assert_eq!(item.image_url(), "https://img/l.jpg");
    }

    #[test]
    fn numeric_id_is_stringified() {
        let item = parse(r#"{"id": 42}"#);
        assert_eq!(item.id.as_deref(), Some("42"));
    }

    #[test]
    fn missing_image_uses_placeholder() {
        let item = parse(r#"{"title": "t"}"#);
        assert_eq!(item.image_url(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn empty_string_image_uses_placeholder() {
        let item = parse(r#"{"image": ""}"#);
        assert_eq!(item.image_url(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn string_image_is_used_verbatim() {
        let item = parse(r#"{"image": "https://img/x.png"}"#);
        assert_eq!(item.image_url(), "https://img/x.png");
    }

    #[test]
    fn sized_image_falls_back_to_large_then_placeholder() {
        let large_only = parse(r#"{"image": {"small": "", "large": "https://img/l.jpg"}}"#);
        assert_eq!(large_only.image_url(), "https://img/l.jpg");

        let neither = parse(r#"{"image": {}}"#);
        assert_eq!(neither.image_url(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn excerpt_truncates_snippet_to_90_chars() {
        let long = "a".repeat(200);
        let item = NewsItem {
            content_snippet: Some(long),
            content: Some("ignored".into()),
            ..Default::default()
        };
        let excerpt = item.excerpt();
        assert_eq!(excerpt, format!("{}...", "a".repeat(90)));
    }

    #[test]
    fn excerpt_falls_back_to_content() {
        let item = NewsItem {
            content_snippet: None,
            content: Some("isi berita".into()),
            ..Default::default()
        };
        assert_eq!(item.excerpt(), "isi berita...");

        let empty_snippet = NewsItem {
            content_snippet: Some(String::new()),
            content: Some("isi".into()),
            ..Default::default()
        };
        assert_eq!(empty_snippet.excerpt(), "isi...");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let item = NewsItem {
            content_snippet: Some("é".repeat(100)),
            ..Default::default()
        };
        assert_eq!(item.excerpt().chars().count(), 93);
    }

    #[test]
    fn excerpt_without_any_text_is_just_ellipsis() {
        assert_eq!(NewsItem::default().excerpt(), "...");
    }

    #[test]
    fn formats_indonesian_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_long_date_id(date), "Senin, 1 Januari 2024");

        let date = NaiveDate::from_ymd_opt(2023, 8, 17).unwrap();
        assert_eq!(format_long_date_id(date), "Kamis, 17 Agustus 2023");
    }

    fn day_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<String> {
        parse_date_in(raw, tz).map(|dt| format_long_date_id(dt.date_naive()))
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(day_in("2024-03-15", &Utc).as_deref(), Some("Jumat, 15 Maret 2024"));

        // West of UTC the same instant is still the previous evening.
        let los_angeles = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(
            day_in("2024-03-15", &los_angeles).as_deref(),
            Some("Kamis, 14 Maret 2024")
        );
    }

    #[test]
    fn offsetless_datetime_is_wall_clock_time() {
        let item = NewsItem {
            iso_date: Some("2024-01-01T10:00:00".into()),
            ..Default::default()
        };
        assert_eq!(item.display_date(), "Senin, 1 Januari 2024");

        let with_fraction = NewsItem {
            iso_date: Some("2024-01-01T23:59:59.500".into()),
            ..Default::default()
        };
        assert_eq!(with_fraction.display_date(), "Senin, 1 Januari 2024");

        let far_east = FixedOffset::east_opt(14 * 3600).unwrap();
        assert_eq!(
            day_in("2024-01-01 10:00:00", &far_east).as_deref(),
            Some("Senin, 1 Januari 2024")
        );
    }

    #[test]
    fn parses_rfc2822_dates() {
        assert_eq!(
            day_in("Mon, 01 Jan 2024 10:00:00 GMT", &Utc).as_deref(),
            Some("Senin, 1 Januari 2024")
        );
        assert_eq!(
            day_in("Tue, 02 Jan 2024 01:00:00 +0700", &Utc).as_deref(),
            Some("Senin, 1 Januari 2024")
        );
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            day_in("2024-01-01T23:30:00-02:00", &Utc).as_deref(),
            Some("Selasa, 2 Januari 2024")
        );
    }

    #[test]
    fn invalid_or_missing_date() {
        let bad = NewsItem {
            iso_date: Some("kemarin".into()),
            ..Default::default()
        };
        assert_eq!(bad.display_date(), INVALID_DATE);
        assert_eq!(NewsItem::default().display_date(), INVALID_DATE);
    }
}
