//! Forward-only progress through one fetched question batch.

use shared::protocol::{AnswerPayload, Question};

use crate::error::ValidationError;

/// Answers are kept in question order: `answers[i]` always answers `questions[i]`,
/// and there are never more answers than questions.
#[derive(Debug, Clone, Default)]
pub struct AssessmentProgress {
    questions: Vec<Question>,
    index: usize,
    answers: Vec<AnswerPayload>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based position of the question on screen.
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64 * 100.0
    }
}

impl AssessmentProgress {
    /// Starts a fresh run. An empty batch is not a valid assessment.
    pub fn begin(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            index: 0,
            answers: Vec::new(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn current_answer(&self) -> Option<&AnswerPayload> {
        self.answers.get(self.index)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.index + 1,
            total: self.questions.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.index >= self.questions.len()
    }

    pub fn answers(&self) -> &[AnswerPayload] {
        &self.answers
    }

    /// Records (or overwrites) the answer for the question on screen.
    pub fn select(&mut self, option_index: usize) -> Result<AnswerPayload, ValidationError> {
        let question = self
            .current_question()
            .ok_or(ValidationError::NoActiveQuestion)?;
        if option_index >= question.options.len() {
            return Err(ValidationError::InvalidOption {
                option_index,
                option_count: question.options.len(),
            });
        }

        let answer = AnswerPayload {
            question_id: question.id,
            option_index,
        };
        match self.answers.get_mut(self.index) {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
        Ok(answer)
    }

    /// Moves past the current question; it must already be answered.
    pub fn advance(&mut self) -> Result<(), ValidationError> {
        if self.current_question().is_none() {
            return Err(ValidationError::NoActiveQuestion);
        }
        if self.current_answer().is_none() {
            return Err(ValidationError::UnansweredQuestion);
        }
        self.index += 1;
        Ok(())
    }

    /// The full answer sequence, only once every question has one.
    pub fn submission(&self) -> Result<Vec<AnswerPayload>, ValidationError> {
        if self.answers.len() != self.questions.len() {
            return Err(ValidationError::IncompleteAssessment {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }
        Ok(self.answers.clone())
    }
}
