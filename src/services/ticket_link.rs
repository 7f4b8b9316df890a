//! Links between board tickets and the review findings they came from.
//!
//! Board to review: open the review page, then signal it to select the
//! finding. Review to board: record a ticket on the finding, hand the review
//! off through the scratchpad, and open the board, whose mount imports it.

use serde::Serialize;

use crate::domain::{HubError, HubEvent, Route};
use crate::services::hub::review_not_open;
use crate::services::signal::PageSignal;
use crate::services::Hub;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreated {
    pub ticket_id: String,
    pub review_issue_id: String,
    pub route: Route,
}

impl Hub {
    /// Opens the review page and, after a short delay, asks it to select the
    /// finding `issue_id` was raised from. The selection is best effort.
    pub async fn view_code_review(&self, issue_id: &str) -> Result<Route, HubError> {
        let review_id = {
            let store = self.store.read().await;
            let issue = store
                .issue(issue_id)
                .ok_or_else(|| HubError::NotFound(format!("Issue not found: {}", issue_id)))?;
            issue.code_review_id.clone().ok_or_else(|| {
                HubError::BadRequest(format!("Issue {} has no linked code review", issue_id))
            })?
        };

        let route = self.navigate(Route::Review).await?;

        self.signals.dispatch_after(
            PageSignal::SelectIssue {
                issue_id: review_id,
            },
            self.config.select_signal_delay(),
        );
        Ok(route)
    }

    /// Raises a ticket for the selected finding and opens the board.
    pub async fn create_ticket(&self, assignee: &str) -> Result<TicketCreated, HubError> {
        let (ticket_id, review_issue_id) = {
            let mut guard = self.review.write().await;
            let session = guard.as_mut().ok_or_else(review_not_open)?;

            let mut proposed = session.clone();
            let ticket_id = match proposed.assign_ticket(assignee) {
                Ok(ticket_id) => ticket_id,
                Err(err) => {
                    if let HubError::Validation(msg) = &err {
                        self.notifications.publish(HubEvent::error_toast(msg.clone()));
                    }
                    return Err(err);
                }
            };
            proposed.persist(self.scratchpad.as_ref()).await?;

            let review_issue_id = proposed
                .selected_issue_id()
                .map(str::to_owned)
                .unwrap_or_default();
            *session = proposed;
            (ticket_id, review_issue_id)
        };

        self.notifications.toast(
            "Ticket Created",
            format!(
                "Ticket {} has been created and linked to the issue",
                ticket_id
            ),
        );

        let route = self.navigate(Route::board()).await?;
        Ok(TicketCreated {
            ticket_id,
            review_issue_id,
            route,
        })
    }

    /// "View Ticket": hands the review off and opens the board for a finding
    /// that already has a ticket.
    pub async fn open_ticket(&self) -> Result<Route, HubError> {
        {
            let guard = self.review.read().await;
            let session = guard.as_ref().ok_or_else(review_not_open)?;
            let selected = session
                .selected()
                .ok_or_else(|| HubError::BadRequest("No review issue selected".into()))?;
            if !selected.has_ticket() {
                return Err(HubError::BadRequest(format!(
                    "Review issue {} has no ticket yet",
                    selected.id
                )));
            }
            session.persist(self.scratchpad.as_ref()).await?;
        }

        self.notifications
            .toast("Navigating", "Taking you to the issue tracker");
        self.navigate(Route::board()).await
    }
}
