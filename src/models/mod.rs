pub mod chat;
pub mod envelope;
pub mod meeting;

pub use chat::{ChatMessage, Speaker};
pub use envelope::ResponseEnvelope;
pub use meeting::{Meeting, MeetingUpdate};
