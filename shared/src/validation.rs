use regex::Regex;
use crate::models::{Voter, VoterStatus};

pub const DL_STATE_ID_PATTERN: &str = r"^[0-9]{6}$";
pub const SSN_PATTERN: &str = r"^xxx-xxx-[0-9]{4}$";

lazy_static::lazy_static! {
    static ref DL_STATE_ID_RE: Regex = Regex::new(DL_STATE_ID_PATTERN).expect("DL/State ID pattern is valid");
    static ref SSN_RE: Regex = Regex::new(SSN_PATTERN).expect("SSN pattern is valid");
}

/// Editable fields of the voter form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VoterField {
    Status,
    VoterRegistration,
    DlStateId,
    Ssn,
    LastName,
    FirstName,
    DateOfBirth,
    County,
    Party,
    Address,
    RegistrationDate,
}

impl VoterField {
    pub const fn label(self) -> &'static str {
        match self {
            VoterField::Status => "Status*",
            VoterField::VoterRegistration => "Voter Registration*",
            VoterField::DlStateId => "DL/State ID*",
            VoterField::Ssn => "SSN*",
            VoterField::LastName => "Last Name*",
            VoterField::FirstName => "First Name*",
            VoterField::DateOfBirth => "Date Of Birth",
            VoterField::County => "County",
            VoterField::Party => "Party",
            VoterField::Address => "Address",
            VoterField::RegistrationDate => "Registration Date",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(
            self,
            VoterField::Status
                | VoterField::VoterRegistration
                | VoterField::DlStateId
                | VoterField::Ssn
                | VoterField::LastName
                | VoterField::FirstName
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Status is required")]
    StatusRequired,
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
    #[error("Voter Registration is required")]
    RegistrationRequired,
    #[error("Voter Registration already exists")]
    DuplicateRegistration,
    #[error("DL/State ID is required")]
    DlStateIdRequired,
    #[error("Incorrect DL/State ID")]
    InvalidDlStateId,
    #[error("SSN is required")]
    SsnRequired,
    #[error("Incorrect SSN")]
    InvalidSsn,
    #[error("Last Name is required")]
    LastNameRequired,
    #[error("First Name is required")]
    FirstNameRequired,
}

impl ValidationError {
    pub const fn field(&self) -> VoterField {
        match self {
            ValidationError::StatusRequired | ValidationError::UnknownStatus(_) => VoterField::Status,
            ValidationError::RegistrationRequired | ValidationError::DuplicateRegistration => VoterField::VoterRegistration,
            ValidationError::DlStateIdRequired | ValidationError::InvalidDlStateId => VoterField::DlStateId,
            ValidationError::SsnRequired | ValidationError::InvalidSsn => VoterField::Ssn,
            ValidationError::LastNameRequired => VoterField::LastName,
            ValidationError::FirstNameRequired => VoterField::FirstName,
        }
    }
}

pub fn validate_status(value: &str) -> Result<VoterStatus, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::StatusRequired);
    }
    VoterStatus::parse(value).ok_or_else(|| ValidationError::UnknownStatus(value.to_string()))
}

pub fn validate_dl_state_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() { return Err(ValidationError::DlStateIdRequired); }
    if !DL_STATE_ID_RE.is_match(value) { return Err(ValidationError::InvalidDlStateId); }
    Ok(())
}

pub fn validate_ssn(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() { return Err(ValidationError::SsnRequired); }
    if !SSN_RE.is_match(value) { return Err(ValidationError::InvalidSsn); }
    Ok(())
}

pub fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() { return Err(ValidationError::LastNameRequired); }
    Ok(())
}

pub fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() { return Err(ValidationError::FirstNameRequired); }
    Ok(())
}

/// A new registration must be present and must not already be in `existing`.
pub fn validate_new_registration(value: &str, existing: &[Voter]) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() { return Err(ValidationError::RegistrationRequired); }
    let taken = existing.iter()
        .any(|voter| voter.voter_registration.to_string() == value);
    if taken { return Err(ValidationError::DuplicateRegistration); }
    Ok(())
}
