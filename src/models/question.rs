/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Values of this type are only built by the source validator, so the
/// option list always has four distinct entries and `correct_answer`
/// always indexes into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub code: Option<String>,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, correct_answer: usize) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Question {id}?"),
        code: None,
        options: [
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
            "delta".to_string(),
        ],
        correct_answer,
        explanation: format!("Because of {id}."),
    }
}
