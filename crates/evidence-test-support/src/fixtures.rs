//! Content fixtures shared by the game, profile and API tests.

use evidence_content::domain::document::ContentDocument;
use serde_json::{Value, json};

/// Titles of the four archetypes in [`sample_document`], in quadrant order.
pub const ARCHETYPE_TITLES: [&str; 4] = ["Ares", "Hermes", "Aphrodite", "Athena"];

/// A scenario whose left option pushes chaos/emotion and whose right option
/// pushes order/logic.
#[must_use]
pub fn scenario(question: &str, left_impact: &Value, right_impact: &Value) -> Value {
    json!({
        "question": question,
        "left": "Follow the impulse",
        "right": "Think it through",
        "leftChoice": { "impact": left_impact },
        "rightChoice": { "impact": right_impact },
    })
}

/// `count` archetypes titled after [`ARCHETYPE_TITLES`] (then `Archetype N`).
#[must_use]
pub fn archetypes(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            let title = ARCHETYPE_TITLES
                .get(i)
                .map_or_else(|| format!("Archetype {i}"), |t| (*t).to_owned());
            json!({
                "title": title,
                "description": format!("{title} description"),
                "shadow": format!("{title} shadow"),
                "traits": [format!("{title} trait")],
            })
        })
        .collect();
    Value::Array(items)
}

/// Builds a document with the sample text table and the given lists.
///
/// # Panics
///
/// Panics if the lists are not valid content.
#[must_use]
pub fn document_with(scenarios: Value, archetypes: Value) -> ContentDocument {
    ContentDocument::from_value(json!({
        "app": { "title": "Evidence", "subtitle": "Discover your archetype" },
        "buttons": { "startJourney": "Start journey", "restart": "Restart" },
        "archetype": { "label": "Your archetype", "shadowLabel": "Your shadow" },
        "scenarios": scenarios,
        "archetypes": archetypes,
    }))
    .expect("fixture content is valid")
}

/// Three scenarios (left: `{chaos: 3, emotion: 2}`, right: `{order: 2,
/// logic: 2}`) and the four quadrant archetypes.
#[must_use]
pub fn sample_document() -> ContentDocument {
    let left = json!({ "chaos": 3, "emotion": 2 });
    let right = json!({ "order": 2, "logic": 2 });
    document_with(
        json!([
            scenario("The alarm rings early.", &left, &right),
            scenario("A friend asks for a favour.", &left, &right),
            scenario("The map is wrong.", &left, &right),
        ]),
        archetypes(4),
    )
}

/// A document with a text table but no scenarios or archetypes.
#[must_use]
pub fn empty_document() -> ContentDocument {
    document_with(json!([]), json!([]))
}
