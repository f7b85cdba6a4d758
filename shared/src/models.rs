use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoterStatus {
    #[default]
    Active,
    Pending,
}

impl VoterStatus {
    pub const ALL: [VoterStatus; 2] = [VoterStatus::Active, VoterStatus::Pending];

    pub const fn as_str(self) -> &'static str {
        match self {
            VoterStatus::Active => "ACTIVE",
            VoterStatus::Pending => "PENDING",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier that the service may send either as a JSON number or a string.
/// The original representation is kept so a PUT echoes it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Text(String::new())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Number(value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    pub status: VoterStatus,
    pub voter_registration: Identifier,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub registration_date: String,
    #[serde(deserialize_with = "string_or_number")]
    pub dl_state_id: String,
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub county: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub party: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Voter {
    /// Text of every displayed field, in column order.
    pub fn searchable_fields(&self) -> [String; 11] {
        [
            self.status.to_string(),
            self.voter_registration.to_string(),
            self.registration_date.clone(),
            self.dl_state_id.clone(),
            self.ssn.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.date_of_birth.clone(),
            self.county.clone(),
            self.party.clone(),
            self.address.clone(),
        ]
    }
}

/// Optional text fields arrive as a string, `null` or not at all.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    })
}
