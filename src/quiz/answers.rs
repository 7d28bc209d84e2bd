//! Raw answer validation and axis-score computation.

use crate::error::ClassifyError;
use crate::taste::{Axis, AxisScores};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of quiz questions. Questions map onto the 7 axes three at a time
/// in [`Axis::ALL`] order: 1-3 boldness, 4-6 acidity, ..., 19-21 umami.
pub const QUESTION_COUNT: u8 = 21;

pub const QUESTIONS_PER_AXIS: u8 = 3;

/// Neutral Likert value substituted for missing answers.
pub const NEUTRAL_RAW: u8 = 3;

/// Raw quiz submission: question id (1..=21) → Likert value (1..=5).
pub type AnswerSheet = BTreeMap<u8, u8>;

/// The 7 integer axis scores in canonical axis order, each in [-2, 2].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector(pub [i8; 7]);

impl ScoreVector {
    /// Comma-joined lookup key, e.g. `"-2,-2,-2,-2,-2,-2,-2"`.
    pub fn lookup_key(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn get(&self, axis: Axis) -> i8 {
        let idx = Axis::ALL.iter().position(|a| *a == axis).unwrap_or(0);
        self.0[idx]
    }

    pub fn to_axis_scores(self) -> AxisScores {
        Axis::ALL
            .iter()
            .zip(self.0)
            .map(|(axis, value)| (*axis, f64::from(value)))
            .collect()
    }
}

/// Reject empty submissions and out-of-range Likert values.
///
/// Question ids outside 1..=21 are ignored by the scorer, so they are not an
/// error here.
pub fn validate_answers(answers: &AnswerSheet) -> Result<(), ClassifyError> {
    if answers.is_empty() {
        return Err(ClassifyError::EmptyAnswers);
    }
    for (&question, &value) in answers {
        if !(1..=5).contains(&value) {
            return Err(ClassifyError::AnswerOutOfRange { question, value });
        }
    }
    Ok(())
}

/// Compute the 7 axis scores from raw answers.
///
/// Per axis: score = round(mean(raw - 3 over its 3 questions)), clamped to
/// [-2, 2]. Missing answers default to the neutral raw value 3. The mean of
/// three integers can never land on an exact .5, so the rounding mode is
/// immaterial on reachable inputs.
pub fn compute_axis_scores(answers: &AnswerSheet) -> ScoreVector {
    let mut vector = [0i8; 7];
    for (axis_idx, slot) in vector.iter_mut().enumerate() {
        let mut sum = 0i32;
        for offset in 0..QUESTIONS_PER_AXIS {
            #[allow(clippy::cast_possible_truncation)]
            let question = (axis_idx as u8) * QUESTIONS_PER_AXIS + offset + 1;
            let raw = answers.get(&question).copied().unwrap_or(NEUTRAL_RAW);
            sum += i32::from(raw) - i32::from(NEUTRAL_RAW);
        }
        let avg = f64::from(sum) / f64::from(QUESTIONS_PER_AXIS);
        #[allow(clippy::cast_possible_truncation)]
        let rounded = avg.round() as i8;
        *slot = rounded.clamp(-2, 2);
    }
    ScoreVector(vector)
}
