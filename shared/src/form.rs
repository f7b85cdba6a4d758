//! State machine behind the "Change Voter" form and the submit protocol that
//! writes an edit back to the service and reconciles the shared list.

use std::collections::BTreeMap;
use tracing::{error, info, warn};
use crate::client::VoterApi;
use crate::error::Error;
use crate::models::{Identifier, Voter, VoterStatus};
use crate::store::VoterStore;
use crate::validation::*;

/// Raw text of every form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterDraft {
    pub status: String,
    pub voter_registration: String,
    pub registration_date: String,
    pub dl_state_id: String,
    pub ssn: String,
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: String,
    pub county: String,
    pub party: String,
    pub address: String,
}

impl Default for VoterDraft {
    fn default() -> Self {
        Self {
            status: VoterStatus::default().as_str().to_string(),
            voter_registration: String::new(),
            registration_date: String::new(),
            dl_state_id: String::new(),
            ssn: String::new(),
            last_name: String::new(),
            first_name: String::new(),
            date_of_birth: String::new(),
            county: String::new(),
            party: String::new(),
            address: String::new(),
        }
    }
}

impl VoterDraft {
    pub fn from_voter(voter: &Voter) -> Self {
        Self {
            status: voter.status.as_str().to_string(),
            voter_registration: voter.voter_registration.to_string(),
            registration_date: voter.registration_date.clone(),
            dl_state_id: voter.dl_state_id.clone(),
            ssn: voter.ssn.clone(),
            last_name: voter.last_name.clone(),
            first_name: voter.first_name.clone(),
            date_of_birth: voter.date_of_birth.clone(),
            county: voter.county.clone(),
            party: voter.party.clone(),
            address: voter.address.clone(),
        }
    }

    pub fn get(&self, field: VoterField) -> &str {
        match field {
            VoterField::Status => &self.status,
            VoterField::VoterRegistration => &self.voter_registration,
            VoterField::RegistrationDate => &self.registration_date,
            VoterField::DlStateId => &self.dl_state_id,
            VoterField::Ssn => &self.ssn,
            VoterField::LastName => &self.last_name,
            VoterField::FirstName => &self.first_name,
            VoterField::DateOfBirth => &self.date_of_birth,
            VoterField::County => &self.county,
            VoterField::Party => &self.party,
            VoterField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: VoterField, value: String) {
        let slot = match field {
            VoterField::Status => &mut self.status,
            VoterField::VoterRegistration => &mut self.voter_registration,
            VoterField::RegistrationDate => &mut self.registration_date,
            VoterField::DlStateId => &mut self.dl_state_id,
            VoterField::Ssn => &mut self.ssn,
            VoterField::LastName => &mut self.last_name,
            VoterField::FirstName => &mut self.first_name,
            VoterField::DateOfBirth => &mut self.date_of_birth,
            VoterField::County => &mut self.county,
            VoterField::Party => &mut self.party,
            VoterField::Address => &mut self.address,
        };
        *slot = value;
    }

    fn check(&self, field: VoterField, mode: &FormMode, existing: &[Voter]) -> Result<(), ValidationError> {
        match field {
            VoterField::Status => validate_status(&self.status).map(|_| ()),
            VoterField::VoterRegistration => match mode {
                FormMode::Create => validate_new_registration(&self.voter_registration, existing),
                FormMode::Edit(_) => Ok(()),
            },
            VoterField::DlStateId => validate_dl_state_id(&self.dl_state_id),
            VoterField::Ssn => validate_ssn(&self.ssn),
            VoterField::LastName => validate_last_name(&self.last_name),
            VoterField::FirstName => validate_first_name(&self.first_name),
            _ => Ok(()),
        }
    }

    /// Every failing rule, in field order.
    pub fn validate(&self, mode: &FormMode, existing: &[Voter]) -> Vec<ValidationError> {
        FormMode::FIELDS.iter()
            .filter_map(|field| self.check(*field, mode, existing).err())
            .collect()
    }

    fn status(&self) -> VoterStatus {
        VoterStatus::parse(&self.status).unwrap_or_default()
    }

    /// The bound record with every form field replaced by the draft's value.
    pub fn merge_over(&self, original: &Voter) -> Voter {
        Voter {
            status: self.status(),
            registration_date: self.registration_date.clone(),
            dl_state_id: self.dl_state_id.clone(),
            ssn: self.ssn.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            county: self.county.clone(),
            party: self.party.clone(),
            address: self.address.clone(),
            ..original.clone()
        }
    }

    pub fn to_new_voter(&self) -> Voter {
        Voter {
            voter_registration: Identifier::from(self.voter_registration.trim()),
            ..self.merge_over(&Voter::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Voter),
}

impl FormMode {
    pub const FIELDS: [VoterField; 11] = [
        VoterField::Status,
        VoterField::VoterRegistration,
        VoterField::DlStateId,
        VoterField::Ssn,
        VoterField::LastName,
        VoterField::FirstName,
        VoterField::DateOfBirth,
        VoterField::County,
        VoterField::Party,
        VoterField::Address,
        VoterField::RegistrationDate,
    ];

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    /// Inputs shown in this mode; the registration number is only typed in for new records.
    pub fn fields(&self) -> impl Iterator<Item = VoterField> + '_ {
        Self::FIELDS.into_iter()
            .filter(move |field| *field != VoterField::VoterRegistration || !self.is_edit())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPlan {
    Update(Voter),
    Append(Voter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoterForm {
    pub mode: FormMode,
    pub draft: VoterDraft,
    pub errors: BTreeMap<VoterField, ValidationError>,
    pub submitting: bool,
    pub submit_error: Option<String>,
}

impl VoterForm {
    pub fn new(current: Option<&Voter>) -> Self {
        let mut form = Self {
            mode: FormMode::Create,
            draft: VoterDraft::default(),
            errors: BTreeMap::new(),
            submitting: false,
            submit_error: None,
        };
        form.bind(current);
        form
    }

    /// Edit mode pre-populates from `current`; create mode clears every field.
    /// Refused while a submit is in flight, returning `false`.
    pub fn bind(&mut self, current: Option<&Voter>) -> bool {
        if self.submitting {
            warn!("voter form rebind ignored while a submit is in flight");
            return false;
        }
        match current {
            Some(voter) => {
                self.mode = FormMode::Edit(voter.clone());
                self.draft = VoterDraft::from_voter(voter);
            }
            None => {
                self.mode = FormMode::Create;
                self.draft = VoterDraft::default();
            }
        }
        self.errors.clear();
        self.submit_error = None;
        true
    }

    pub fn is_edit_mode(&self) -> bool {
        self.mode.is_edit()
    }

    /// Ignored while a submit is in flight. A field that already shows an error is re-checked.
    pub fn set_field(&mut self, field: VoterField, value: String, existing: &[Voter]) {
        if self.submitting {
            return;
        }
        self.draft.set(field, value);
        if self.errors.contains_key(&field) {
            match self.draft.check(field, &self.mode, existing) {
                Ok(()) => { self.errors.remove(&field); }
                Err(e) => { self.errors.insert(field, e); }
            }
        }
    }

    pub fn error_for(&self, field: VoterField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// A field's error message replaces its label.
    pub fn label_for(&self, field: VoterField) -> String {
        self.error_for(field)
            .map(|e| e.to_string())
            .unwrap_or_else(|| field.label().to_string())
    }

    /// Validates and, if the draft is clean, locks the form and returns what to write.
    pub fn begin_submit(&mut self, existing: &[Voter]) -> Option<SubmitPlan> {
        if self.submitting {
            return None;
        }
        let failures = self.draft.validate(&self.mode, existing);
        self.errors = failures.into_iter().map(|e| (e.field(), e)).collect();
        if !self.errors.is_empty() {
            warn!(fields = self.errors.len(), "voter form has invalid fields");
            return None;
        }

        self.submitting = true;
        self.submit_error = None;
        Some(match &self.mode {
            FormMode::Edit(original) => SubmitPlan::Update(self.draft.merge_over(original)),
            FormMode::Create => SubmitPlan::Append(self.draft.to_new_voter()),
        })
    }

    /// Unlocks the form; a failure keeps the draft and surfaces the message.
    pub fn finish_submit(&mut self, result: &Result<(), Error>) {
        self.submitting = false;
        self.submit_error = result.as_ref().err().map(|e| e.to_string());
    }
}

/// Full list with the record sharing `updated`'s registration replaced.
pub fn replace_voter(voters: &[Voter], updated: &Voter) -> Vec<Voter> {
    voters.iter()
        .map(|voter| if voter.voter_registration == updated.voter_registration {
            updated.clone()
        } else {
            voter.clone()
        })
        .collect()
}

pub fn append_voter(voters: &[Voter], voter: Voter) -> Vec<Voter> {
    let mut next = voters.to_vec();
    next.push(voter);
    next
}

/// Carries out a [`SubmitPlan`] and commits the resulting list to `store`.
/// Nothing is committed when the service rejects the write.
pub async fn submit_voter(api: &dyn VoterApi, store: &VoterStore, plan: SubmitPlan) -> Result<(), Error> {
    match plan {
        SubmitPlan::Update(voter) => {
            let Some(id) = voter.id.clone() else {
                error!(registration = %voter.voter_registration, "Error updating voter data: no service id");
                return Err(Error::write("Voter has no service id"));
            };
            let echoed = api.update(&id, &voter).await.map_err(|e| {
                error!(%id, error = %e, "Error updating voter data");
                Error::write(e)
            })?;
            if echoed != voter {
                info!(%id, "service returned a different canonical record");
            }
            store.set_voters(replace_voter(&store.voters(), &voter));
            info!(%id, registration = %voter.voter_registration, "voter updated");
        }
        SubmitPlan::Append(voter) => {
            info!(registration = %voter.voter_registration, "voter added locally");
            store.set_voters(append_voter(&store.voters(), voter));
        }
    }
    Ok(())
}
