pub mod assistant;
pub mod hub;
pub mod import_bridge;
pub mod issue_store;
pub mod notification_service;
pub mod reorder;
pub mod review_session;
pub mod signal;
pub mod ticket_link;

pub use assistant::{Assistant, AssistantMessage, AssistantMode};
pub use hub::Hub;
pub use import_bridge::ImportBridge;
pub use issue_store::IssueStore;
pub use notification_service::NotificationService;
pub use reorder::{DragEnd, DragLocation, ReorderEngine, ReorderOutcome};
pub use review_session::ReviewSession;
pub use signal::{PageSignal, SignalBus};
pub use ticket_link::TicketCreated;
