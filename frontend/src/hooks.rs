use std::rc::Rc;
use shared::{CancelToken, QueryState, Voter, VoterStore, VOTERS_KEY};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::context::AppContext;

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}

/// Current voter list; re-renders the caller whenever the store changes.
#[hook]
pub fn use_voter_list(store: &VoterStore) -> Rc<Vec<Voter>> {
    let voters = use_state(|| store.voters());
    {
        let voters = voters.clone();
        use_effect_with_deps(move |store: &VoterStore| {
            let subscription = store.subscribe(move |next| voters.set(next));
            move || subscription.unsubscribe()
        }, store.clone());
    }
    (*voters).clone()
}

/// Fetches the voter list once per mount. The request's result is dropped if
/// the caller unmounts first.
#[hook]
pub fn use_voters() -> QueryState<Vec<Voter>> {
    let app = use_app();
    let state = use_state(|| app.queries.initial_state(VOTERS_KEY));
    {
        let state = state.clone();
        use_effect_with_deps(move |app: &AppContext| {
            let token = CancelToken::new();
            let pending = token.clone();
            let api = app.api.clone();
            let queries = app.queries.clone();
            spawn_local(async move {
                if let Some(next) = queries.fetch(VOTERS_KEY, &pending, api.fetch_all()).await {
                    state.set(next);
                }
            });
            move || token.cancel()
        }, app);
    }
    (*state).clone()
}
