//! Accept/reject gate for search candidates.
//!
//! This is not a ranker: the first candidate passing every check wins.

use super::domain::{Candidate, YoutubeError};
use super::url::{PLAYLIST_MARKER, USER_MARKER};
use crate::track::Track;

/// Default maximum distance, in seconds, between expected and reported duration
pub const DURATION_TOLERANCE_SECONDS: u32 = 20;

/// Candidate evaluator
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    tolerance: u32,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DURATION_TOLERANCE_SECONDS)
    }
}

impl Matcher {
    pub fn new(tolerance: u32) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// Check `candidate` against `track`, returning the first failed check.
    pub fn evaluate(&self, candidate: &Candidate, track: &Track) -> Result<(), YoutubeError> {
        let delta = track.duration.abs_diff(candidate.duration);
        if delta > self.tolerance {
            return Err(YoutubeError::DurationMismatch {
                expected: track.duration,
                actual: candidate.duration,
                delta,
                tolerance: self.tolerance,
            });
        }

        if candidate.url.contains(PLAYLIST_MARKER) || candidate.url.contains(USER_MARKER) {
            return Err(YoutubeError::StructuralMismatch(candidate.url.clone()));
        }

        track.seems(&candidate.title)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_candidate, mock_track};

    #[test]
    fn test_accepts_exact_match() {
        let track = mock_track();
        let candidate = mock_candidate("abc123", track.duration);
        assert!(Matcher::default().evaluate(&candidate, &track).is_ok());
    }

    #[test]
    fn test_tolerance_boundary() {
        let track = mock_track();
        let tolerance = DURATION_TOLERANCE_SECONDS;

        let longer = mock_candidate("a", track.duration + tolerance);
        assert!(Matcher::default().evaluate(&longer, &track).is_ok());

        let shorter = mock_candidate("b", track.duration - tolerance);
        assert!(Matcher::default().evaluate(&shorter, &track).is_ok());

        let too_long = mock_candidate("c", track.duration + tolerance + 1);
        match Matcher::default().evaluate(&too_long, &track) {
            Err(YoutubeError::DurationMismatch {
                expected,
                actual,
                delta,
                tolerance: max,
            }) => {
                assert_eq!(expected, track.duration);
                assert_eq!(actual, track.duration + tolerance + 1);
                assert_eq!(delta, tolerance + 1);
                assert_eq!(max, tolerance);
            }
            other => panic!("expected duration mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_tolerance() {
        let track = mock_track();
        let candidate = mock_candidate("abc", track.duration + 5);
        assert!(Matcher::new(5).evaluate(&candidate, &track).is_ok());
        assert!(Matcher::new(4).evaluate(&candidate, &track).is_err());
    }

    #[test]
    fn test_rejects_playlist_url() {
        let track = mock_track();
        let mut candidate = mock_candidate("abc", track.duration);
        candidate.url = "https://www.youtube.com/watch?v=abc&list=PL1".to_string();
        assert!(matches!(
            Matcher::default().evaluate(&candidate, &track),
            Err(YoutubeError::StructuralMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_user_url() {
        let track = mock_track();
        let mut candidate = mock_candidate("abc", track.duration);
        candidate.url = "https://www.youtube.com/user/someone".to_string();
        assert!(matches!(
            Matcher::default().evaluate(&candidate, &track),
            Err(YoutubeError::StructuralMismatch(_))
        ));
    }

    #[test]
    fn test_duration_checked_before_structure() {
        let track = mock_track();
        let mut candidate = mock_candidate("abc", track.duration + 100);
        candidate.url = "https://www.youtube.com/user/someone".to_string();
        assert!(matches!(
            Matcher::default().evaluate(&candidate, &track),
            Err(YoutubeError::DurationMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_title_mismatch() {
        let track = mock_track();
        let mut candidate = mock_candidate("abc", track.duration);
        candidate.title = "Something Else Entirely".to_string();
        assert!(matches!(
            Matcher::default().evaluate(&candidate, &track),
            Err(YoutubeError::TitleMismatch(_))
        ));
    }
}
