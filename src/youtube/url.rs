//! Video URL helpers.
//!
//! Usable outside the search flow, e.g. to check a link pasted by the user.

use super::domain::YoutubeError;

/// Marker of the compact `https://youtu.be/<id>` form
pub const SHORT_LINK_MARKER: &str = "youtu.be/";

/// Marker of the canonical `https://www.youtube.com/watch?v=<id>` form
pub const WATCH_MARKER: &str = "watch?v=";

/// Playlist reference inside a watch URL
pub const PLAYLIST_MARKER: &str = "&list=";

/// Path segment of a user channel
pub const USER_MARKER: &str = "/user/";

/// Case-insensitive substring search returning the byte offset in `haystack`.
///
/// ASCII lowercasing keeps byte offsets intact, so the index is valid for
/// slicing the original string.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(needle)
}

pub(crate) fn is_short_link(url: &str) -> bool {
    find_ignore_case(url, SHORT_LINK_MARKER).is_some()
}

pub(crate) fn is_watch_link(url: &str) -> bool {
    find_ignore_case(url, WATCH_MARKER).is_some()
}

pub(crate) fn is_playlist_link(url: &str) -> bool {
    find_ignore_case(url, PLAYLIST_MARKER).is_some()
}

/// Extract the video identifier from a watch or short link.
///
/// Trailing query parameters and playlist references are dropped:
///
/// ```ignore
/// assert_eq!(extract_video_id("https://youtu.be/abc123?t=42")?, "abc123");
/// assert_eq!(extract_video_id("https://www.youtube.com/watch?v=abc123&list=PL")?, "abc123");
/// ```
pub fn extract_video_id(url: &str) -> Result<String, YoutubeError> {
    let id_part = if let Some(start) = find_ignore_case(url, SHORT_LINK_MARKER) {
        &url[start + SHORT_LINK_MARKER.len()..]
    } else if let Some(start) = find_ignore_case(url, WATCH_MARKER) {
        &url[start + WATCH_MARKER.len()..]
    } else {
        return Err(YoutubeError::NotAVideoUrl(url.to_string()));
    };

    let id_part = id_part.split('?').next().unwrap_or_default();
    let id_part = id_part.split("&list").next().unwrap_or_default();
    Ok(id_part.to_string())
}

/// Check that a URL points to a single video.
pub fn validate_url(url: &str) -> Result<(), YoutubeError> {
    if !is_short_link(url) && !is_watch_link(url) {
        return Err(YoutubeError::NotAVideoUrl(url.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=abc123").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_from_short_link() {
        let id = extract_video_id("https://youtu.be/abc123").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_strips_query() {
        let id = extract_video_id("https://youtu.be/abc123?t=42").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_strips_playlist() {
        let id = extract_video_id("https://www.youtube.com/watch?v=abc123&list=PLxyz&index=2")
            .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_keeps_other_parameters() {
        // Only `?` and `&list` terminate the identifier
        let id = extract_video_id("https://www.youtube.com/watch?v=abc123&t=10").unwrap();
        assert_eq!(id, "abc123&t=10");
    }

    #[test]
    fn test_extract_is_case_insensitive_on_markers() {
        let id = extract_video_id("https://YOUTU.BE/AbC123").unwrap();
        assert_eq!(id, "AbC123");
    }

    #[test]
    fn test_extract_without_marker() {
        let result = extract_video_id("https://example.com/abc");
        assert!(matches!(result, Err(YoutubeError::NotAVideoUrl(url)) if url == "https://example.com/abc"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://youtu.be/abc123").is_ok());
        assert!(validate_url("https://www.youtube.com/watch?v=abc123").is_ok());
        assert!(validate_url("https://example.com/abc").is_err());
        assert!(validate_url("https://www.youtube.com/user/someone").is_err());
    }

    #[test]
    fn test_link_kinds() {
        assert!(is_short_link("https://youtu.be/x"));
        assert!(is_watch_link("/watch?v=x"));
        assert!(is_playlist_link("/watch?v=x&LIST=y"));
        assert!(!is_playlist_link("/watch?v=x"));
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Video ids use the URL-safe base64 alphabet
    fn video_id() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z0-9_-]{1,16}").unwrap()
    }

    /// Optional trailing junk that must be stripped
    fn suffix() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            prop::string::string_regex("\\?[a-z]{1,5}=[0-9]{1,4}").unwrap(),
            prop::string::string_regex("&list=[A-Za-z0-9]{1,12}").unwrap(),
        ]
    }

    proptest! {
        /// Watch URLs always yield exactly the id
        #[test]
        fn watch_url_yields_id(id in video_id(), tail in suffix()) {
            let url = format!("https://www.youtube.com/watch?v={}{}", id, tail);
            prop_assert_eq!(extract_video_id(&url).unwrap(), id);
        }

        /// Short links always yield exactly the id
        #[test]
        fn short_link_yields_id(id in video_id(), tail in suffix()) {
            let url = format!("https://youtu.be/{}{}", id, tail);
            prop_assert_eq!(extract_video_id(&url).unwrap(), id);
        }

        /// Anything accepted by extraction also validates
        #[test]
        fn extracted_urls_validate(id in video_id()) {
            let url = format!("https://youtu.be/{}", id);
            prop_assert!(validate_url(&url).is_ok());
        }
    }
}
