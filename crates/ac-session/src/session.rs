use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversation step of one sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    #[default]
    Menu,
    Service,
    Date,
    Time,
    LookupRef,
    PayRef,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Menu => write!(f, "menu"),
            Step::Service => write!(f, "service"),
            Step::Date => write!(f, "date"),
            Step::Time => write!(f, "time"),
            Step::LookupRef => write!(f, "lookupRef"),
            Step::PayRef => write!(f, "payRef"),
        }
    }
}

/// Values collected so far in the current conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub service: Option<String>,
    pub price: Option<f64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reference: Option<String>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        *self == SessionData::default()
    }
}

/// Per-sender conversational state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub sender: String,
    pub step: Step,
    pub data: SessionData,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            step: Step::Menu,
            data: SessionData::default(),
            updated_at: Utc::now(),
        }
    }

    /// Back to `menu` with nothing collected.
    pub fn reset(&mut self) {
        self.step = Step::Menu;
        self.data = SessionData::default();
        self.touch();
    }

    pub fn goto(&mut self, step: Step) {
        self.step = step;
        self.touch();
    }

    pub fn is_idle(&self) -> bool {
        self.step == Step::Menu
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(sender={}, step={})", self.sender, self.step)
    }
}
