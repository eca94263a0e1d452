use crate::{LeadSearchSession, OutreachComposer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Leads,
    Outreach,
}

/// Top-level two-state machine. The outreach state only exists while its
/// view is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Leads,
    Outreach(OutreachComposer),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Leads => ScreenKind::Leads,
            Screen::Outreach(_) => ScreenKind::Outreach,
        }
    }

    /// Snapshots the selected leads into a fresh composer. The session keeps
    /// its own selection.
    pub(crate) fn enter_outreach(&mut self, session: &LeadSearchSession) -> bool {
        if matches!(self, Screen::Outreach(_)) {
            return false;
        }
        *self = Screen::Outreach(OutreachComposer::new(session.selected_leads()));
        true
    }

    pub(crate) fn back(&mut self) -> bool {
        if matches!(self, Screen::Leads) {
            return false;
        }
        *self = Screen::Leads;
        true
    }

    pub fn composer(&self) -> Option<&OutreachComposer> {
        match self {
            Screen::Outreach(composer) => Some(composer),
            Screen::Leads => None,
        }
    }

    pub(crate) fn composer_mut(&mut self) -> Option<&mut OutreachComposer> {
        match self {
            Screen::Outreach(composer) => Some(composer),
            Screen::Leads => None,
        }
    }
}
