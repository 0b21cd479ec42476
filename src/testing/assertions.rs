//! Assertion checking for scenario expectations

use crate::story::StoryScene;

/// Error when an assertion fails
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// The live scene must match
pub fn check_scene(
    step: usize,
    frame: u64,
    expected: StoryScene,
    actual: StoryScene,
) -> Result<(), AssertionError> {
    if expected == actual {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Wrong scene after step {} (frame {})", step, frame),
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    })
}

/// Rocks left in the challenge must match; `None` means no challenge is running
pub fn check_rocks_left(
    step: usize,
    frame: u64,
    expected: u32,
    actual: Option<u32>,
) -> Result<(), AssertionError> {
    if actual == Some(expected) {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Wrong rock count after step {} (frame {})", step, frame),
        expected: expected.to_string(),
        actual: match actual {
            Some(n) => n.to_string(),
            None => "no challenge running".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_scene_passes() {
        assert!(check_scene(1, 10, StoryScene::Intro, StoryScene::Intro).is_ok());
    }

    #[test]
    fn test_wrong_scene_reports_both() {
        let err = check_scene(3, 99, StoryScene::LandReveal, StoryScene::FinalMessage).unwrap_err();
        assert_eq!(err.expected, "LandReveal");
        assert_eq!(err.actual, "FinalMessage");
        assert!(err.to_string().contains("step 3"));
    }

    #[test]
    fn test_rocks_without_challenge() {
        let err = check_rocks_left(1, 1, 13, None).unwrap_err();
        assert_eq!(err.actual, "no challenge running");
        assert!(check_rocks_left(1, 1, 0, Some(0)).is_ok());
    }
}
