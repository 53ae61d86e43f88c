use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

/// The executive seat an agent occupies.
///
/// Serialised and displayed upper-case (`"CFO"`), parsed case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(into = "String", try_from = "String")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    Cfo,
    Cmo,
    Coo,
    Chro,
    Cto,
    Cco,
}

impl Role {
    /// Every role, in declaration order.
    pub fn all() -> Vec<Role> {
        Role::iter().collect()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Cfo => "Chief Financial Officer",
            Role::Cmo => "Chief Marketing Officer",
            Role::Coo => "Chief Operating Officer",
            Role::Chro => "Chief Human Resources Officer",
            Role::Cto => "Chief Technology Officer",
            Role::Cco => "Chief Customer Officer",
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl TryFrom<String> for Role {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Addressee of a message: one role, or every active agent except the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Recipient {
    Role(Role),
    All,
}

impl Recipient {
    /// The addressed role, or `None` for a broadcast.
    pub fn role(self) -> Option<Role> {
        match self {
            Recipient::Role(role) => Some(role),
            Recipient::All => None,
        }
    }

    pub fn is_all(self) -> bool {
        matches!(self, Recipient::All)
    }
}

impl From<Role> for Recipient {
    fn from(role: Role) -> Self {
        Recipient::Role(role)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Role(role) => fmt::Display::fmt(role, f),
            Recipient::All => f.write_str("ALL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recipient `{0}`")]
pub struct ParseRecipientError(String);

impl FromStr for Recipient {
    type Err = ParseRecipientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Recipient::All);
        }
        Role::from_str(s)
            .map(Recipient::Role)
            .map_err(|_| ParseRecipientError(s.to_string()))
    }
}

impl From<Recipient> for String {
    fn from(recipient: Recipient) -> Self {
        recipient.to_string()
    }
}

impl TryFrom<String> for Recipient {
    type Error = ParseRecipientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
