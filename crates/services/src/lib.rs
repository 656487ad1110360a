#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod config;
pub mod error;
pub mod practice_service;
pub mod problem_client;
pub mod progress_service;

pub use mathgen_core::Clock;

pub use ai::{ChatCompletionsGenerator, GenerationRequest, TextGenerator};
pub use app_services::AppServices;
pub use error::{
    AppServicesError, DecodeError, GenerationError, ProblemRequestError, SubmitError,
};
pub use practice_service::{PracticeService, ProblemAttempt, SubmissionOutcome};
pub use problem_client::{Feedback, FeedbackSource, ProblemClient};
pub use progress_service::ProgressService;
