#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    ColdEmail,
    LinkedinMessage,
    ColdCallScript,
}

impl MessageType {
    pub const ALL: [MessageType; 3] = [
        MessageType::ColdEmail,
        MessageType::LinkedinMessage,
        MessageType::ColdCallScript,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            MessageType::ColdEmail => "cold_email",
            MessageType::LinkedinMessage => "linkedin_message",
            MessageType::ColdCallScript => "cold_call_script",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MessageType::ColdEmail => "Cold Email",
            MessageType::LinkedinMessage => "LinkedIn Message",
            MessageType::ColdCallScript => "Cold Call Script",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_wire() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Friendly,
    Casual,
    Urgent,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Friendly, Tone::Casual, Tone::Urgent];

    pub fn as_wire(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_wire() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalizationLevel {
    Low,
    Medium,
    High,
}

impl PersonalizationLevel {
    pub const ALL: [PersonalizationLevel; 3] = [
        PersonalizationLevel::Low,
        PersonalizationLevel::Medium,
        PersonalizationLevel::High,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            PersonalizationLevel::Low => "low",
            PersonalizationLevel::Medium => "medium",
            PersonalizationLevel::High => "high",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_wire() == raw)
    }
}

/// The six fields that must be filled before any generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Tone,
    PersonalizationLevel,
    TargetRole,
    CompanyDescription,
    ValueProposition,
    SenderName,
}

impl ConfigField {
    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Tone => "tone",
            ConfigField::PersonalizationLevel => "personalization level",
            ConfigField::TargetRole => "target role",
            ConfigField::CompanyDescription => "company description",
            ConfigField::ValueProposition => "value proposition",
            ConfigField::SenderName => "sender name",
        }
    }
}

/// A single user edit to the message configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    MessageType(MessageType),
    Tone(Tone),
    PersonalizationLevel(PersonalizationLevel),
    TargetRole(String),
    CompanyDescription(String),
    ValueProposition(String),
    SenderName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutreachConfig {
    pub message_type: MessageType,
    pub tone: Option<Tone>,
    pub personalization_level: Option<PersonalizationLevel>,
    pub target_role: String,
    pub company_description: String,
    pub value_proposition: String,
    pub sender_name: String,
}

impl OutreachConfig {
    pub fn apply(&mut self, edit: ConfigEdit) {
        match edit {
            ConfigEdit::MessageType(value) => self.message_type = value,
            ConfigEdit::Tone(value) => self.tone = Some(value),
            ConfigEdit::PersonalizationLevel(value) => self.personalization_level = Some(value),
            ConfigEdit::TargetRole(value) => self.target_role = value,
            ConfigEdit::CompanyDescription(value) => self.company_description = value,
            ConfigEdit::ValueProposition(value) => self.value_proposition = value,
            ConfigEdit::SenderName(value) => self.sender_name = value,
        }
    }

    /// Required fields that are unset or blank, in form order.
    pub fn missing_fields(&self) -> Vec<ConfigField> {
        let mut missing = Vec::new();
        if self.tone.is_none() {
            missing.push(ConfigField::Tone);
        }
        if self.personalization_level.is_none() {
            missing.push(ConfigField::PersonalizationLevel);
        }
        let texts = [
            (ConfigField::TargetRole, &self.target_role),
            (ConfigField::CompanyDescription, &self.company_description),
            (ConfigField::ValueProposition, &self.value_proposition),
            (ConfigField::SenderName, &self.sender_name),
        ];
        for (field, value) in texts {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
