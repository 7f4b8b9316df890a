use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    #[default]
    General,
    Ticket,
    Schedule,
    Strategy,
}

impl AssistantMode {
    pub fn title(&self) -> &'static str {
        match self {
            AssistantMode::General => "AI Assistant",
            AssistantMode::Ticket => "Ticket Generator",
            AssistantMode::Schedule => "Meeting Scheduler",
            AssistantMode::Strategy => "Strategy Advisor",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            AssistantMode::General => "Ask me anything about your project...",
            AssistantMode::Ticket => "Describe the task or issue you want to create...",
            AssistantMode::Schedule => "Describe the meeting you want to schedule...",
            AssistantMode::Strategy => {
                "What kind of project management strategy do you need help with?"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub id: String,
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl AssistantMessage {
    fn new(speaker: Speaker, text: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker,
            text,
            timestamp,
        }
    }
}

const STRATEGY_ADVICE: &str = "Based on your requirements, I recommend using an Agile Scrum methodology:\n\n\
• 2-week sprints\n\
• Daily standups at 9:30 AM\n\
• Sprint planning on Mondays\n\
• Retrospectives on Fridays\n\n\
This will help maintain flexibility while ensuring regular delivery of working features.";

/// Canned chat responder. Replies are templates, not inference.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    mode: AssistantMode,
    transcript: Vec<AssistantMessage>,
}

impl Assistant {
    pub fn mode(&self) -> AssistantMode {
        self.mode
    }

    pub fn transcript(&self) -> &[AssistantMessage] {
        &self.transcript
    }

    /// Switching mode starts a fresh conversation.
    pub fn set_mode(&mut self, mode: AssistantMode) {
        self.mode = mode;
        self.transcript.clear();
    }

    /// Records the user's prompt. Blank prompts are ignored.
    pub fn push_prompt(&mut self, prompt: &str, now: DateTime<Utc>) -> Option<AssistantMessage> {
        if prompt.trim().is_empty() {
            return None;
        }
        let message = AssistantMessage::new(Speaker::User, prompt.to_string(), now);
        self.transcript.push(message.clone());
        Some(message)
    }

    pub fn push_reply(&mut self, reply: AssistantMessage) {
        self.transcript.push(reply);
    }

    pub fn compose_reply(
        mode: AssistantMode,
        prompt: &str,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> AssistantMessage {
        let excerpt: String = prompt.chars().take(30).collect();
        let date = |days: i64| (now + Duration::days(days)).format("%-m/%-d/%Y").to_string();

        let text = match mode {
            AssistantMode::Ticket => format!(
                "Creating ticket: \"{}...\"\n\nAssigned to: Team Lead\nPriority: Medium\nDue Date: {}\n\nWould you like to edit any of these details?",
                excerpt,
                date(7)
            ),
            AssistantMode::Schedule => format!(
                "I've scheduled a meeting for \"{}...\"\n\nDate: {}\nTime: 10:00 AM\nAttendees: Team\nLocation: Main Conference Room\n\nI've sent calendar invites to all team members.",
                excerpt,
                date(1)
            ),
            AssistantMode::Strategy => STRATEGY_ADVICE.to_string(),
            AssistantMode::General => format!(
                "I analyzed your request: \"{}...\"\n\nThis seems like a {} priority task. Would you like me to create a ticket for this, schedule a meeting to discuss it, or suggest a project management strategy?",
                excerpt,
                if rng.gen_bool(0.5) { "medium" } else { "high" }
            ),
        };

        AssistantMessage::new(Speaker::Assistant, text, now)
    }
}
