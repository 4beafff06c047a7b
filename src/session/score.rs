use crate::models::Question;

/// Share of correct answers as a percentage; zero for an empty quiz.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Feedback tier shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    KeepLearning,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Grade::Excellent
        } else if percentage >= 50.0 {
            Grade::Good
        } else {
            Grade::KeepLearning
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent Work!",
            Grade::Good => "Good Progress!",
            Grade::KeepLearning => "Keep Learning!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub grade: Grade,
}

impl QuizResults {
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = percentage(score, total);
        Self {
            score,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }
}

/// One line of the post-quiz breakdown.
#[derive(Debug, Clone, Copy)]
pub struct AnswerReview<'a> {
    pub question: &'a Question,
    pub chosen: usize,
    pub is_correct: bool,
}

pub fn review<'a>(questions: &'a [Question], answers: &[usize]) -> Vec<AnswerReview<'a>> {
    questions
        .iter()
        .zip(answers.iter())
        .map(|(question, &chosen)| AnswerReview {
            question,
            chosen,
            is_correct: question.is_correct(chosen),
        })
        .collect()
}
