pub mod client;
pub mod dates;
pub mod error;
pub mod form;
pub mod models;
pub mod query;
pub mod store;
pub mod table;
pub mod validation;

pub use client::{ClientConfig, ClientError, VoterApi};
pub use error::{Error, ErrorCode};
pub use form::{submit_voter, FormMode, SubmitPlan, VoterDraft, VoterForm};
pub use models::*;
pub use query::{CancelToken, QueryClient, QueryState, RefetchPolicy, VOTERS_KEY};
pub use store::{Subscription, VoterStore};
pub use table::{TableAction, TableState};
pub use validation::{ValidationError, VoterField};

#[cfg(test)]
mod tests;
