// crates/reviewlink-core/src/text.rs

//! Pattern helpers for pulling a place id or a place name out of whatever the
//! user pasted. None of these parse URLs; they only look for the pieces.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static PLACE_ID_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&](?:place_id|ftid)=([^&]+)").expect("valid place id pattern"));

static PERCENT_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("valid escape pattern"));

static PLACE_PATH_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/place/([^/]+)").expect("valid place path pattern"));

/// Finds a `place_id=` or `ftid=` parameter preceded by `?` or `&`.
///
/// The value runs up to the next `&` or the end of the input and is returned
/// exactly as written (no decoding).
///
/// # Examples
/// ```rust
/// use reviewlink_core::text::extract_place_id;
///
/// assert_eq!(
///     extract_place_id("https://maps.google.com/?q=x&ftid=0x89c2:0x1f"),
///     Some("0x89c2:0x1f")
/// );
/// assert_eq!(extract_place_id("place_id=abc"), None);
/// ```
pub fn extract_place_id(input: &str) -> Option<&str> {
    PLACE_ID_PARAM
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Pulls the human readable name out of a `/place/<name>/` path segment.
///
/// `+` becomes a space and percent escapes are decoded. Returns `None` when
/// there is no such segment, when decoding fails, or when the decoded name
/// is blank.
///
/// # Examples
/// ```rust
/// use reviewlink_core::text::extract_place_name;
///
/// let url = "https://www.google.com/maps/place/Caf%C3%A9+Central/@48.21,16.36,17z";
/// assert_eq!(extract_place_name(url).as_deref(), Some("Café Central"));
/// ```
pub fn extract_place_name(input: &str) -> Option<String> {
    let segment = PLACE_PATH_SEGMENT.captures(input)?.get(1)?.as_str();
    let decoded = percent_decode(&segment.replace('+', " "))?;
    let name = decoded.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// The string sent to text search: the place-path name when present,
/// otherwise the trimmed input.
pub fn search_text(input: &str) -> String {
    extract_place_name(input).unwrap_or_else(|| input.trim().to_string())
}

/// Decodes `%XX` escapes.
///
/// Fails on a truncated or non-hex escape and on bytes that do not form
/// valid UTF-8.
pub fn percent_decode(s: &str) -> Option<String> {
    // urlencoding passes stray `%` through untouched; a pasted link with one is not a name.
    if s.matches('%').count() != PERCENT_ESCAPE.find_iter(s).count() {
        return None;
    }
    urlencoding::decode(s).ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_id_after_question_mark() {
        assert_eq!(
            extract_place_id("https://search.google.com/local/writereview?placeid=x&place_id=ChIJ123"),
            Some("ChIJ123")
        );
        assert_eq!(extract_place_id("?place_id=ChIJabc"), Some("ChIJabc"));
    }

    #[test]
    fn ftid_after_ampersand_stops_at_next_param() {
        assert_eq!(
            extract_place_id("https://maps.google.com/maps?cid=1&ftid=0x1:0x2&hl=en"),
            Some("0x1:0x2")
        );
    }

    #[test]
    fn place_id_without_separator_is_ignored() {
        assert_eq!(extract_place_id("myplace_id=ChIJ"), None);
        assert_eq!(extract_place_id("Joe's Pizza"), None);
        assert_eq!(extract_place_id("?place_id="), None);
    }

    #[test]
    fn place_id_found_in_malformed_url() {
        assert_eq!(extract_place_id("not a url &place_id=ID 42"), Some("ID 42"));
    }

    #[test]
    fn name_from_place_path() {
        let url = "https://maps.google.com/maps/place/Joe's+Pizza/@40.73,-73.99,17z";
        assert_eq!(extract_place_name(url).as_deref(), Some("Joe's Pizza"));
        assert_eq!(search_text(url), "Joe's Pizza");
    }

    #[test]
    fn name_runs_to_end_without_trailing_slash() {
        assert_eq!(
            extract_place_name("maps/place/Blue%20Bottle%20Coffee").as_deref(),
            Some("Blue Bottle Coffee")
        );
    }

    #[test]
    fn bad_escape_falls_back_to_raw_input() {
        let url = "  https://maps.google.com/place/100%+Juice/  ";
        assert_eq!(extract_place_name(url), None);
        assert_eq!(search_text(url), url.trim());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(percent_decode("%FF%FE"), None);
        assert_eq!(percent_decode("%C3%A9").as_deref(), Some("é"));
    }

    #[test]
    fn plain_text_is_searched_verbatim() {
        assert_eq!(search_text("  Starbucks  "), "Starbucks");
    }

    #[test]
    fn stray_percent_is_rejected() {
        assert_eq!(percent_decode("100%"), None);
        assert_eq!(percent_decode("%%41"), None);
        assert_eq!(percent_decode("%2541").as_deref(), Some("%41"));
    }

    #[test]
    fn encoded_plus_survives_space_substitution() {
        assert_eq!(
            extract_place_name("/place/A%2BB+C/").as_deref(),
            Some("A+B C")
        );
    }
}
