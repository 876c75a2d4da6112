use serde::{Deserialize, Serialize};

/// A short motivational card shown under the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UspCard {
    pub title: String,
    pub body: String,
}

impl UspCard {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[must_use]
pub fn default_usp_cards() -> Vec<UspCard> {
    vec![
        UspCard::new(
            "Clarity under pressure",
            "Everything you need, nothing you don’t.",
        ),
        UspCard::new("Action > motivation", "Small tasks, fast feedback loops."),
        UspCard::new("Review that sticks", "Mistake → cause → fix, every time."),
    ]
}
