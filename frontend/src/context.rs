use std::rc::Rc;
use shared::{ClientConfig, QueryClient, RefetchPolicy, Voter, VoterApi, VoterStore};
use crate::api::HttpVoterClient;

/// Application state handed to every component through a `ContextProvider`.
#[derive(Clone)]
pub struct AppContext {
    pub store: VoterStore,
    pub api: Rc<dyn VoterApi>,
    pub queries: QueryClient<Vec<Voter>>,
}

impl AppContext {
    pub fn new(client: ClientConfig, policy: RefetchPolicy) -> Self {
        Self {
            store: VoterStore::new(),
            api: Rc::new(HttpVoterClient::new(client)),
            queries: QueryClient::new(policy),
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
            && self.queries == other.queries
            && Rc::ptr_eq(&self.api, &other.api)
    }
}
