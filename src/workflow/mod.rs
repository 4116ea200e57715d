pub mod interview_flow;

pub use interview_flow::{InterviewApi, InterviewFlow, InterviewState, AI_GREETING};
