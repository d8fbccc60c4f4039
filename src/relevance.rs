//! Exam relevance scoring.

use crate::Note;

/// Areas that weigh most in the exam.
pub const HIGH_PRIORITY_AREAS: &[&str] = &[
    "Política Internacional",
    "História do Brasil",
    "DIREITO",
    "ECONOMIA",
    "Geografia",
];

const BASE_SCORE: i32 = 3;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 5;

/// Scores how important a note is for exam preparation, from 1 to 5.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    threshold: f64,
}

impl RelevanceScorer {
    /// Creates a scorer that gives the minimum score below `threshold` confidence.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Scores a classified note.
    ///
    /// Without an area, or below the confidence threshold, the score is 1.
    /// Otherwise it starts at 3 and each adjustment applies independently:
    /// high-priority area +1, confidence above 0.7 +1 or below 0.4 -1,
    /// body over 1000 characters +1 or under 200 -1. The sum is clamped
    /// to `[1, 5]` once at the end.
    pub fn score(&self, note: &Note, area: Option<&str>, confidence: f64) -> u8 {
        let Some(area) = area else {
            return MIN_SCORE as u8;
        };
        if confidence < self.threshold {
            return MIN_SCORE as u8;
        }

        let mut score = BASE_SCORE;

        if HIGH_PRIORITY_AREAS.contains(&area) {
            score += 1;
        }

        if confidence > 0.7 {
            score += 1;
        } else if confidence < 0.4 {
            score -= 1;
        }

        let length = note.content_length();
        if length > 1000 {
            score += 1;
        } else if length < 200 {
            score -= 1;
        }

        score.clamp(MIN_SCORE, MAX_SCORE) as u8
    }
}
