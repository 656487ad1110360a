use std::sync::Arc;
use std::time::Instant;

use mathgen_core::model::{AiSettings, Difficulty, MathProblem, answers_match};

use crate::ai::prompts::{
    FEEDBACK_MAX_TOKENS, FEEDBACK_TEMPERATURE, PROBLEM_TEMPERATURE, feedback_prompt,
    problem_prompt,
};
use crate::ai::{GenerationRequest, TextGenerator, decode_problem, strip_code_fences};
use crate::error::ProblemRequestError;

pub const CORRECT_FEEDBACK: &str =
    "Excellent work! Your answer is correct. You demonstrated strong problem-solving skills!";
pub const FALLBACK_FEEDBACK: &str = "Good try! Check your calculations and try again.";

/// Where a feedback message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackSource {
    /// Fixed message for a correct answer; no service call was made.
    Congratulation,
    /// Text produced by the generation service.
    Generated,
    /// Fixed encouragement used when the service failed or replied with nothing.
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
    pub source: FeedbackSource,
}

/// Round-trip client for problem generation and answer feedback.
#[derive(Clone)]
pub struct ProblemClient {
    generator: Arc<dyn TextGenerator>,
    problem_model: String,
    feedback_model: String,
}

impl ProblemClient {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, settings: &AiSettings) -> Self {
        Self {
            generator,
            problem_model: settings.problem_model().to_string(),
            feedback_model: settings.feedback_model().to_string(),
        }
    }

    /// Ask the service for a new problem at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `ProblemRequestError` if the call fails or the reply cannot be decoded.
    pub async fn request_problem(
        &self,
        difficulty: Difficulty,
    ) -> Result<MathProblem, ProblemRequestError> {
        let started = Instant::now();
        let request = GenerationRequest {
            prompt: problem_prompt(difficulty, rand::random::<u64>()),
            model: self.problem_model.clone(),
            temperature: PROBLEM_TEMPERATURE,
            max_tokens: None,
        };

        let reply = self.generator.generate(&request).await.map_err(|err| {
            tracing::error!(%difficulty, error = %err, "problem generation failed");
            ProblemRequestError::from(err)
        })?;
        let problem = decode_problem(&reply).map_err(|err| {
            tracing::warn!(%difficulty, error = %err, "could not decode problem reply");
            ProblemRequestError::from(err)
        })?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(%difficulty, elapsed_ms, "generated problem");
        Ok(problem)
    }

    /// Judge `user_answer` and produce feedback.
    ///
    /// Correct answers get a fixed message without a service call. Wrong answers
    /// get generated feedback, or a fixed fallback if the service fails or is silent.
    pub async fn request_feedback(
        &self,
        problem_text: &str,
        correct_answer: f64,
        user_answer: f64,
    ) -> Feedback {
        if answers_match(user_answer, correct_answer) {
            return Feedback {
                is_correct: true,
                message: CORRECT_FEEDBACK.to_string(),
                source: FeedbackSource::Congratulation,
            };
        }

        let request = GenerationRequest {
            prompt: feedback_prompt(problem_text, correct_answer, user_answer),
            model: self.feedback_model.clone(),
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: Some(FEEDBACK_MAX_TOKENS),
        };

        let generated = match self.generator.generate(&request).await {
            Ok(reply) => Some(strip_code_fences(&reply)).filter(|text| !text.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "feedback generation failed");
                None
            }
        };

        match generated {
            Some(message) => Feedback {
                is_correct: false,
                message,
                source: FeedbackSource::Generated,
            },
            None => Feedback {
                is_correct: false,
                message: FALLBACK_FEEDBACK.to_string(),
                source: FeedbackSource::Fallback,
            },
        }
    }
}
