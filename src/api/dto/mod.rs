pub mod board;
pub mod review;

pub use board::{BoardResponse, CreateIssueRequest};
pub use review::{
    AssistantModeRequest, AssistantResponse, CreateTicketRequest, ExampleSummary,
    NavigateRequest, PromptRequest, ReviewResponse, SelectIssueRequest, SessionResponse,
};
