pub mod board;
pub mod error;
pub mod event;
pub mod issue;
pub mod review;
pub mod route;

pub use board::{Board, Column, ColumnId};
pub use error::HubError;
pub use event::{HubEvent, ToastVariant};
pub use issue::{Issue, IssueType, NewIssue, Priority, UNASSIGNED};
pub use review::{count_by_severity, CodeExample, ReviewIssue, Severity, SeverityFilter};
pub use route::{Route, TrackerTab};
