use std::fmt;

pub type LeadId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parses the exact wire spelling (`High`, `Medium`, `Low`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "High" => Some(Priority::High),
            "Medium" => Some(Priority::Medium),
            "Low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business lead as returned by a search. Immutable once loaded; `id` is
/// the only stable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: LeadId,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub contact: Option<String>,
    pub employees: Option<String>,
    pub priority: Priority,
    pub outreach_angle: Option<String>,
    pub last_updated: String,
}

impl Lead {
    /// Case-insensitive substring match over company, industry and contact.
    /// `lowered_term` must already be lowercase.
    pub(crate) fn matches_lowered(&self, lowered_term: &str) -> bool {
        self.company.to_lowercase().contains(lowered_term)
            || self.industry.to_lowercase().contains(lowered_term)
            || self
                .contact
                .as_deref()
                .is_some_and(|contact| contact.to_lowercase().contains(lowered_term))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub industry: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(industry: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            location: location.into(),
        }
    }

    /// Both fields must be non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.industry.trim().is_empty() && !self.location.trim().is_empty()
    }

    pub(crate) fn trimmed(&self) -> Self {
        Self::new(self.industry.trim(), self.location.trim())
    }
}
