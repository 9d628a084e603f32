//! Scenario, archetype and score types shared by the game and profile crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the four scoring axes. Chaos/order and emotion/logic form the two
/// bipolar dimensions of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Chaos pole of the chaos/order dimension.
    Chaos,
    /// Order pole of the chaos/order dimension.
    Order,
    /// Emotion pole of the emotion/logic dimension.
    Emotion,
    /// Logic pole of the emotion/logic dimension.
    Logic,
}

impl Axis {
    /// All axes in canonical order.
    pub const ALL: [Self; 4] = [Self::Chaos, Self::Order, Self::Emotion, Self::Logic];
}

/// Score deltas carried by a choice. Axes left as `None` are not touched
/// when the impact is applied. Unknown keys in content are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impact {
    /// Delta for the chaos axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos: Option<i32>,
    /// Delta for the order axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Delta for the emotion axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<i32>,
    /// Delta for the logic axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<i32>,
}

impl Impact {
    /// Returns the delta for `axis`, if present.
    #[must_use]
    pub fn delta(&self, axis: Axis) -> Option<i32> {
        match axis {
            Axis::Chaos => self.chaos,
            Axis::Order => self.order,
            Axis::Emotion => self.emotion,
            Axis::Logic => self.logic,
        }
    }

    /// Iterates over the axes present in this impact.
    pub fn deltas(&self) -> impl Iterator<Item = (Axis, i32)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(|axis| self.delta(axis).map(|delta| (axis, delta)))
    }
}

/// One side of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown for this option.
    pub text: String,
    /// Score deltas applied when this option is picked.
    pub impact: Option<Impact>,
}

/// A forced-choice question with a left and a right option.
///
/// On the wire the option labels sit next to the question (`left`, `right`)
/// while their impacts live under `leftChoice` / `rightChoice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScenarioRecord", into = "ScenarioRecord")]
pub struct Scenario {
    /// The question text.
    pub question: String,
    /// The left option.
    pub left: Choice,
    /// The right option.
    pub right: Choice,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChoiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    impact: Option<Impact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioRecord {
    question: String,
    #[serde(default)]
    left: String,
    #[serde(default)]
    right: String,
    #[serde(default)]
    left_choice: Option<ChoiceRecord>,
    #[serde(default)]
    right_choice: Option<ChoiceRecord>,
}

impl From<ScenarioRecord> for Scenario {
    fn from(record: ScenarioRecord) -> Self {
        Self {
            question: record.question,
            left: Choice {
                text: record.left,
                impact: record.left_choice.and_then(|c| c.impact),
            },
            right: Choice {
                text: record.right,
                impact: record.right_choice.and_then(|c| c.impact),
            },
        }
    }
}

impl From<Scenario> for ScenarioRecord {
    fn from(scenario: Scenario) -> Self {
        Self {
            question: scenario.question,
            left: scenario.left.text,
            right: scenario.right.text,
            left_choice: Some(ChoiceRecord {
                impact: scenario.left.impact,
            }),
            right_choice: Some(ChoiceRecord {
                impact: scenario.right.impact,
            }),
        }
    }
}

/// A personality outcome a playthrough can resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Display title.
    pub title: String,
    /// Main description.
    pub description: String,
    /// Alternate "shadow" description, revealed on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    /// Ordered trait labels.
    #[serde(default)]
    pub traits: Vec<String>,
}

/// Running four-axis tally for one playthrough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    /// Chaos score.
    pub chaos: i32,
    /// Order score.
    pub order: i32,
    /// Emotion score.
    pub emotion: i32,
    /// Logic score.
    pub logic: i32,
}

impl ScoreVector {
    /// Creates a score vector from explicit axis values.
    #[must_use]
    pub fn new(chaos: i32, order: i32, emotion: i32, logic: i32) -> Self {
        Self {
            chaos,
            order,
            emotion,
            logic,
        }
    }

    /// Returns the value of `axis`.
    #[must_use]
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Chaos => self.chaos,
            Axis::Order => self.order,
            Axis::Emotion => self.emotion,
            Axis::Logic => self.logic,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::Chaos => &mut self.chaos,
            Axis::Order => &mut self.order,
            Axis::Emotion => &mut self.emotion,
            Axis::Logic => &mut self.logic,
        }
    }

    /// Adds every delta present in `impact`. Missing axes keep their value.
    pub fn apply(&mut self, impact: &Impact) {
        let mut next = *self;
        for (axis, delta) in impact.deltas() {
            let value = next.get_mut(axis);
            *value = value.saturating_add(delta);
        }
        *self = next;
    }

    /// Sum of all four axes.
    #[must_use]
    pub fn total(&self) -> i64 {
        Axis::ALL.iter().map(|axis| i64::from(self.get(*axis))).sum()
    }

    /// `chaos - order`.
    #[must_use]
    pub fn chaos_vs_order(&self) -> i64 {
        i64::from(self.chaos) - i64::from(self.order)
    }

    /// `emotion - logic`.
    #[must_use]
    pub fn emotion_vs_logic(&self) -> i64 {
        i64::from(self.emotion) - i64::from(self.logic)
    }

    /// Chaos share of the chaos/order dimension, in percent.
    #[must_use]
    pub fn chaos_share(&self) -> f64 {
        share(self.chaos, self.order)
    }

    /// Emotion share of the emotion/logic dimension, in percent.
    #[must_use]
    pub fn emotion_share(&self) -> f64 {
        share(self.emotion, self.logic)
    }
}

/// `a / (a + b)` as a percentage; 50 when both sides sum to zero.
fn share(a: i32, b: i32) -> f64 {
    if i64::from(a) + i64::from(b) == 0 {
        return 50.0;
    }
    let a = f64::from(a);
    let b = f64::from(b);
    (a / (a + b) * 100.0).clamp(0.0, 100.0)
}

/// The outcome of a finished playthrough: the selected archetype, the
/// scores that produced it and when it was completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaythroughResult {
    /// The selected archetype.
    #[serde(flatten)]
    pub archetype: Archetype,
    /// Final score vector.
    pub dimensions: ScoreVector,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_apply_adds_present_axes_and_leaves_missing_untouched() {
        let mut scores = ScoreVector::new(1, 2, 3, 4);
        let impact = Impact {
            chaos: Some(2),
            logic: Some(-1),
            ..Impact::default()
        };

        scores.apply(&impact);

        assert_eq!(scores, ScoreVector::new(3, 2, 3, 3));
    }

    #[test]
    fn test_apply_empty_impact_is_noop() {
        let mut scores = ScoreVector::new(5, 0, 0, 1);

        scores.apply(&Impact::default());

        assert_eq!(scores, ScoreVector::new(5, 0, 0, 1));
    }

    #[test]
    fn test_total_and_differences() {
        let scores = ScoreVector::new(5, 5, 10, 0);

        assert_eq!(scores.total(), 20);
        assert_eq!(scores.chaos_vs_order(), 0);
        assert_eq!(scores.emotion_vs_logic(), 10);
    }

    #[test]
    fn test_shares_fall_back_to_half_when_both_sides_zero() {
        let scores = ScoreVector::default();

        assert!((scores.chaos_share() - 50.0).abs() < f64::EPSILON);
        assert!((scores.emotion_share() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shares_are_percentages_clamped_to_range() {
        let scores = ScoreVector::new(3, 1, -2, 4);

        assert!((scores.chaos_share() - 75.0).abs() < 1e-9);
        assert!(scores.emotion_share().abs() < f64::EPSILON);
    }

    #[test]
    fn test_scenario_deserializes_from_locale_shape() {
        let json = serde_json::json!({
            "question": "A stranger asks for help.",
            "left": "Ignore",
            "right": "Help",
            "leftChoice": { "impact": { "logic": 2 } },
            "rightChoice": { "impact": { "emotion": 3, "unknown": 9 } }
        });

        let scenario: Scenario = serde_json::from_value(json).unwrap();

        assert_eq!(scenario.question, "A stranger asks for help.");
        assert_eq!(scenario.left.text, "Ignore");
        assert_eq!(scenario.left.impact.unwrap().logic, Some(2));
        assert_eq!(scenario.right.text, "Help");
        assert_eq!(scenario.right.impact.unwrap().emotion, Some(3));
        assert_eq!(scenario.right.impact.unwrap().chaos, None);
    }

    #[test]
    fn test_scenario_without_choice_records_has_no_impacts() {
        let json = serde_json::json!({ "question": "?", "left": "a", "right": "b" });

        let scenario: Scenario = serde_json::from_value(json).unwrap();

        assert!(scenario.left.impact.is_none());
        assert!(scenario.right.impact.is_none());
    }

    #[test]
    fn test_result_serializes_archetype_fields_flat() {
        let result = PlaythroughResult {
            archetype: Archetype {
                title: "Athena".to_owned(),
                description: "Strategist".to_owned(),
                shadow: None,
                traits: vec!["calm".to_owned()],
            },
            dimensions: ScoreVector::new(0, 6, 0, 6),
            completed_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["title"], "Athena");
        assert_eq!(json["traits"][0], "calm");
        assert_eq!(json["dimensions"]["order"], 6);
        assert_eq!(json["completedAt"], "2026-01-15T10:00:00Z");
        assert!(json.get("shadow").is_none());
    }
}
