use serde::Deserialize;

/// One selectable option for a question.
#[derive(Clone, Debug, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(rename = "correct", default)]
    pub is_correct: bool,
}

/// A prompt plus its ordered choices.
///
/// A well-formed question has at least two choices, exactly one of them
/// correct. This is checked when a session is constructed, not here.
#[derive(Clone, Debug, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Index of the correct choice, if the question has exactly one.
    pub fn correct_index(&self) -> Option<usize> {
        let mut found = None;
        for (index, choice) in self.choices.iter().enumerate() {
            if choice.is_correct {
                if found.is_some() {
                    return None;
                }
                found = Some(index);
            }
        }
        found
    }
}
