use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Lifecycle of the session's search request.
///
/// ```text
/// Idle | Success | Failed --submit--> Pending
/// Pending --backend ok--> Success
/// Pending --backend error--> Failed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

impl RequestStatus {
    #[inline]
    pub fn is_pending(self) -> bool {
        self == RequestStatus::Pending
    }
}

/// Display-mode selector of the panel. Independent of the request lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ActiveTab {
    #[default]
    Qa,
    History,
}

impl ActiveTab {
    pub fn as_str(self) -> &'static str {
        match self {
            ActiveTab::Qa => "qa",
            ActiveTab::History => "history",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qa" => Ok(ActiveTab::Qa),
            "history" => Ok(ActiveTab::History),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}
