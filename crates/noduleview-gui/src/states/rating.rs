use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Ratings run from 1 to this value.
pub const RATING_SCALE: u8 = 5;

/// Post-evaluation review filled in after a classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRatings {
    pub classification_accuracy: Option<u8>,
    pub localization_accuracy: Option<u8>,
    pub ease_of_use: Option<u8>,
    pub feedback: String,
}

impl FeedbackRatings {
    /// All three scores are set; free text is optional.
    pub fn is_complete(&self) -> bool {
        [
            self.classification_accuracy,
            self.localization_accuracy,
            self.ease_of_use,
        ]
        .iter()
        .all(|r| r.is_some_and(|v| (1..=RATING_SCALE).contains(&v)))
    }
}

/// One JSON line in the feedback log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub submitted_at: u64,
    pub source: String,
    pub label: String,
    pub confidence: String,
    pub ratings: FeedbackRatings,
}

impl FeedbackRecord {
    pub fn new(context: &RatedClassification, ratings: FeedbackRatings) -> Self {
        let submitted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            submitted_at,
            source: context.source.clone(),
            label: context.label.clone(),
            confidence: context.confidence.clone(),
            ratings,
        }
    }
}

/// The classification a rating refers to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RatedClassification {
    pub source: String,
    pub label: String,
    pub confidence: String,
}

/// Rating window state.
#[derive(Default)]
pub struct RatingState {
    pub open: bool,
    pub ratings: FeedbackRatings,
    pub context: RatedClassification,
}

impl RatingState {
    /// Open a fresh form for the given classification.
    pub fn prompt(&mut self, context: RatedClassification) {
        self.open = true;
        self.ratings = FeedbackRatings::default();
        self.context = context;
    }

    /// Close the form and hand back a record if it can be submitted.
    pub fn submit(&mut self) -> Option<FeedbackRecord> {
        if !self.ratings.is_complete() {
            return None;
        }
        self.open = false;
        let ratings = std::mem::take(&mut self.ratings);
        Some(FeedbackRecord::new(&self.context, ratings))
    }

    pub fn dismiss(&mut self) {
        self.open = false;
        self.ratings = FeedbackRatings::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RatedClassification {
        RatedClassification {
            source: "chest.png".into(),
            label: "Nodule".into(),
            confidence: "87.00%".into(),
        }
    }

    #[test]
    fn test_incomplete_until_all_three_set() {
        let mut r = FeedbackRatings::default();
        assert!(!r.is_complete());
        r.classification_accuracy = Some(4);
        r.localization_accuracy = Some(3);
        assert!(!r.is_complete());
        r.ease_of_use = Some(5);
        assert!(r.is_complete());
    }

    #[test]
    fn test_out_of_scale_is_incomplete() {
        let r = FeedbackRatings {
            classification_accuracy: Some(0),
            localization_accuracy: Some(3),
            ease_of_use: Some(6),
            feedback: String::new(),
        };
        assert!(!r.is_complete());
    }

    #[test]
    fn test_submit_requires_complete_form() {
        let mut state = RatingState::default();
        state.prompt(context());
        assert!(state.submit().is_none());
        assert!(state.open);

        state.ratings.classification_accuracy = Some(5);
        state.ratings.localization_accuracy = Some(4);
        state.ratings.ease_of_use = Some(3);
        state.ratings.feedback = "heatmap was helpful".into();
        let record = state.submit().unwrap();
        assert!(!state.open);
        assert_eq!(record.label, "Nodule");
        assert_eq!(record.ratings.ease_of_use, Some(3));
        assert_eq!(state.ratings, FeedbackRatings::default());
    }

    #[test]
    fn test_prompt_resets_previous_answers() {
        let mut state = RatingState::default();
        state.prompt(context());
        state.ratings.ease_of_use = Some(2);
        state.dismiss();
        state.prompt(context());
        assert_eq!(state.ratings.ease_of_use, None);
    }

    #[test]
    fn test_record_serializes_to_one_line() {
        let ratings = FeedbackRatings {
            classification_accuracy: Some(5),
            localization_accuracy: Some(4),
            ease_of_use: Some(4),
            feedback: "line one\nline two".into(),
        };
        let record = FeedbackRecord::new(&context(), ratings.clone());
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains('\n'));
        let back: FeedbackRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back.ratings, ratings);
    }
}
