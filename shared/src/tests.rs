#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use time::Duration;
    use crate::client::{check_status, decode_update, decode_voters, ClientConfig, ClientError, VoterApi};
    use crate::dates::{input_to_stored, stored_to_input};
    use crate::error::ErrorCode;
    use crate::form::{append_voter, replace_voter, submit_voter, FormMode, SubmitPlan, VoterForm};
    use crate::models::{Identifier, Voter, VoterStatus};
    use crate::query::{CancelToken, QueryClient, QueryState, RefetchPolicy, VOTERS_KEY};
    use crate::store::VoterStore;
    use crate::table::{
        has_next_page, has_previous_page, matches_filter, page_window, range_label, TableAction, TableState,
    };
    use crate::validation::*;

    fn voter(registration: &str, first: &str, last: &str) -> Voter {
        Voter {
            id: Some(Identifier::Text(format!("id-{registration}"))),
            status: VoterStatus::Active,
            voter_registration: registration.into(),
            registration_date: "01/02/2020".into(),
            dl_state_id: "123456".into(),
            ssn: "xxx-xxx-1234".into(),
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: "03/04/1980".into(),
            county: "Travis".into(),
            party: "Independent".into(),
            address: "1 Main St".into(),
            extra: Default::default(),
        }
    }

    fn roster() -> Vec<Voter> {
        vec![
            voter("V100", "John", "Smith"),
            voter("V101", "Ada", "Lovelace"),
            Voter { status: VoterStatus::Pending, county: "Harris".into(), ..voter("V102", "Grace", "Hopper") },
        ]
    }

    #[derive(Default)]
    struct FakeApi {
        voters: Vec<Voter>,
        fail_writes: bool,
        writes: RefCell<Vec<(Identifier, Voter)>>,
    }

    #[async_trait(?Send)]
    impl VoterApi for FakeApi {
        async fn fetch_all(&self) -> Result<Vec<Voter>, ClientError> {
            Ok(self.voters.clone())
        }

        async fn update(&self, id: &Identifier, voter: &Voter) -> Result<Voter, ClientError> {
            self.writes.borrow_mut().push((id.clone(), voter.clone()));
            if self.fail_writes {
                Err(ClientError::network("connection refused"))
            } else {
                Ok(voter.clone())
            }
        }
    }

    #[test]
    fn test_decode_service_payload() {
        let body = r#"[
            {"id": 7, "status": "PENDING", "voterRegistration": 100200, "registrationDate": "05/06/2019",
             "dlStateId": 654321, "ssn": "xxx-xxx-9876", "firstName": "Jane", "lastName": "Doe",
             "precinct": "12B"},
            {"id": "abc", "status": "ACTIVE", "voterRegistration": "V9", "dlStateId": "111111",
             "ssn": "xxx-xxx-0000", "firstName": "Sam", "lastName": "Lee", "county": "Bexar"}
        ]"#;
        let voters = decode_voters(body).unwrap();
        assert_eq!(voters.len(), 2);

        let jane = &voters[0];
        assert_eq!(jane.id, Some(Identifier::Number(7)));
        assert_eq!(jane.status, VoterStatus::Pending);
        assert_eq!(jane.voter_registration, Identifier::Number(100200));
        assert_eq!(jane.dl_state_id, "654321");
        assert_eq!(jane.county, "");
        assert_eq!(jane.extra.get("precinct"), Some(&serde_json::json!("12B")));

        let json = serde_json::to_value(jane).unwrap();
        assert_eq!(json["voterRegistration"], serde_json::json!(100200));
        assert_eq!(json["status"], serde_json::json!("PENDING"));
        assert_eq!(json["precinct"], serde_json::json!("12B"));

        assert_eq!(voters[1].id, Some(Identifier::Text("abc".into())));
        assert_eq!(voters[1].county, "Bexar");
    }

    #[test]
    fn test_decode_null_optional_fields() {
        let body = r#"[{"id": 1, "status": "ACTIVE", "voterRegistration": "V1", "dlStateId": "123456",
            "ssn": "xxx-xxx-1234", "firstName": "Jane", "lastName": "Doe", "county": null,
            "party": null, "address": null, "dateOfBirth": null, "registrationDate": null}]"#;
        let voters = decode_voters(body).unwrap();
        assert_eq!(voters.len(), 1);
        assert_eq!(voters[0].county, "");
        assert_eq!(voters[0].date_of_birth, "");
        assert_eq!(voters[0].registration_date, "");

        let null_name = r#"[{"status": "ACTIVE", "voterRegistration": "V1", "dlStateId": "123456",
            "ssn": "xxx-xxx-1234", "firstName": null, "lastName": "Doe"}]"#;
        assert!(matches!(decode_voters(null_name), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_schema_mismatch() {
        let missing_name = r#"[{"status": "ACTIVE", "voterRegistration": "V1", "dlStateId": "123456",
            "ssn": "xxx-xxx-1234", "lastName": "Doe"}]"#;
        assert!(matches!(decode_voters(missing_name), Err(ClientError::Decode(_))));

        let bad_status = r#"[{"status": "RETIRED", "voterRegistration": "V1", "dlStateId": "123456",
            "ssn": "xxx-xxx-1234", "firstName": "J", "lastName": "Doe"}]"#;
        assert!(matches!(decode_voters(bad_status), Err(ClientError::Decode(_))));

        assert!(matches!(decode_voters(r#"{"voters": []}"#), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_status_and_update_responses() {
        assert!(check_status(200, "").is_ok());
        assert!(matches!(
            check_status(500, "boom"),
            Err(ClientError::Transport { status: Some(500), .. })
        ));
        assert!(matches!(
            check_status(404, ""),
            Err(ClientError::Transport { status: Some(404), .. })
        ));

        let sent = voter("V1", "Jane", "Doe");
        assert_eq!(decode_update("", &sent), sent);
        let canonical = serde_json::to_string(&Voter { county: "Dallas".into(), ..sent.clone() }).unwrap();
        assert_eq!(decode_update(&canonical, &sent).county, "Dallas");
    }

    #[test]
    fn test_client_config_urls() {
        let config = ClientConfig::new("http://voters.local:3001/");
        assert_eq!(config.voters_url(), "http://voters.local:3001/voters");
        assert_eq!(config.voter_url(&Identifier::Number(4)), "http://voters.local:3001/voters/4");
        assert_eq!(ClientConfig::default().voters_url(), "http://localhost:3001/voters");

        let parsed: ClientConfig = serde_json::from_str(r#"{"serviceBaseUrl": "https://x"}"#).unwrap();
        assert_eq!(parsed.service_base_url, "https://x");
    }

    #[test]
    fn test_field_rules() {
        assert!(validate_dl_state_id("123456").is_ok());
        assert_eq!(validate_dl_state_id("12a456"), Err(ValidationError::InvalidDlStateId));
        assert_eq!(validate_dl_state_id("12345"), Err(ValidationError::InvalidDlStateId));
        assert_eq!(validate_dl_state_id("1234567"), Err(ValidationError::InvalidDlStateId));
        assert_eq!(validate_dl_state_id(""), Err(ValidationError::DlStateIdRequired));

        assert!(validate_ssn("xxx-xxx-1234").is_ok());
        assert_eq!(validate_ssn("xxx-xx-1234"), Err(ValidationError::InvalidSsn));
        assert_eq!(validate_ssn("123-45-6789"), Err(ValidationError::InvalidSsn));
        assert_eq!(validate_ssn(""), Err(ValidationError::SsnRequired));

        assert_eq!(validate_status("PENDING"), Ok(VoterStatus::Pending));
        assert_eq!(validate_status(""), Err(ValidationError::StatusRequired));
        assert!(matches!(validate_status("active"), Err(ValidationError::UnknownStatus(_))));

        assert_eq!(validate_first_name("  "), Err(ValidationError::FirstNameRequired));
        assert_eq!(validate_last_name(""), Err(ValidationError::LastNameRequired));

        let existing = roster();
        assert_eq!(validate_new_registration("V100", &existing), Err(ValidationError::DuplicateRegistration));
        assert_eq!(validate_new_registration(" ", &existing), Err(ValidationError::RegistrationRequired));
        assert!(validate_new_registration("V200", &existing).is_ok());
    }

    #[test]
    fn test_date_of_birth_conversion() {
        assert_eq!(stored_to_input("03/04/1980"), "1980-03-04");
        assert_eq!(input_to_stored("1980-03-04"), "03/04/1980");
        assert_eq!(stored_to_input("3/4/1980"), "1980-03-04");
        assert_eq!(stored_to_input("12/25/1975"), "1975-12-25");
        assert_eq!(stored_to_input("1980-03-04"), "1980-03-04");
        assert_eq!(stored_to_input("1980-03-04T00:00:00.000Z"), "1980-03-04");
        assert_eq!(stored_to_input("1980-03-04junk"), "");
        assert_eq!(stored_to_input("13/40/1980"), "");
        assert_eq!(stored_to_input("sometime in 1980"), "");
        assert_eq!(input_to_stored(""), "");
    }

    #[test]
    fn test_store_notifies_subscribers() {
        let store = VoterStore::new();
        assert!(store.voters().is_empty());
        assert!(!store.is_primed());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = seen.clone();
            store.subscribe(move |voters| seen.borrow_mut().push(voters.len()))
        };

        let fetched = roster();
        store.set_voters(fetched.clone());
        assert_eq!(*store.voters(), fetched);
        assert!(store.is_primed());
        assert_eq!(*seen.borrow(), vec![3]);

        subscription.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);
        store.set_voters(Vec::new());
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_store_allows_reentrant_listeners() {
        let store = VoterStore::new();
        let observed = Rc::new(Cell::new(0));
        let _subscription = {
            let reader = store.clone();
            let observed = observed.clone();
            store.subscribe(move |_| observed.set(reader.voters().len()))
        };
        store.set_voters(roster());
        assert_eq!(observed.get(), 3);

        let other = store.clone();
        assert_eq!(store, other);
        assert_ne!(store, VoterStore::new());
    }

    #[test]
    fn test_query_success_is_cached() {
        let client = QueryClient::<Vec<Voter>>::default();
        assert!(client.initial_state(VOTERS_KEY).is_loading());

        let api = FakeApi { voters: roster(), ..Default::default() };
        let token = CancelToken::new();
        let state = block_on(client.fetch(VOTERS_KEY, &token, api.fetch_all())).unwrap();
        assert_eq!(state.data().map(|d| d.len()), Some(3));
        assert!(matches!(client.initial_state(VOTERS_KEY), QueryState::Success(_)));
    }

    #[test]
    fn test_query_failure_is_fetch_failure() {
        let client = QueryClient::<Vec<Voter>>::default();
        let token = CancelToken::new();
        let state = block_on(client.fetch(VOTERS_KEY, &token, async {
            Err(ClientError::network("offline"))
        })).unwrap();
        assert_eq!(state.error().map(|e| e.code), Some(ErrorCode::FetchFailure));
        assert!(client.cached(VOTERS_KEY).is_none());
    }

    #[test]
    fn test_query_discards_result_after_unmount() {
        let client = QueryClient::<Vec<Voter>>::default();
        let token = CancelToken::new();
        let unmount = token.clone();
        let state = block_on(client.fetch(VOTERS_KEY, &token, async move {
            unmount.cancel();
            Ok(roster())
        }));
        assert!(state.is_none());
        assert_eq!(client.cached(VOTERS_KEY).map(|d| d.len()), Some(3));
    }

    #[test]
    fn test_refetch_policy() {
        let fresh = QueryClient::<Vec<Voter>>::new(RefetchPolicy::StaleAfter(Duration::minutes(5)));
        let token = CancelToken::new();
        block_on(fresh.fetch(VOTERS_KEY, &token, async { Ok(roster()) }));
        let cached = fresh.cached(VOTERS_KEY).unwrap();

        let called = Cell::new(false);
        let state = block_on(fresh.fetch(VOTERS_KEY, &token, async {
            called.set(true);
            Ok(Vec::new())
        })).unwrap();
        assert!(!called.get());
        assert!(Rc::ptr_eq(state.data().unwrap(), &cached));

        let on_mount = QueryClient::<Vec<Voter>>::default();
        block_on(on_mount.fetch(VOTERS_KEY, &token, async { Ok(roster()) }));
        let state = block_on(on_mount.fetch(VOTERS_KEY, &token, async {
            called.set(true);
            Ok(Vec::new())
        })).unwrap();
        assert!(called.get());
        assert_eq!(state.data().map(|d| d.len()), Some(0));
    }

    #[test]
    fn test_filter_matches_any_field() {
        let voters = roster();
        let table = |filter: &str| {
            let mut state = TableState::default();
            state.apply(TableAction::SetFilter(filter.into()));
            state.filtered(&voters).iter().map(|v| v.voter_registration.to_string()).collect::<Vec<_>>()
        };

        assert_eq!(table(""), vec!["V100", "V101", "V102"]);
        assert_eq!(table("lovelace"), vec!["V101"]);
        assert_eq!(table("HARRIS"), vec!["V102"]);
        assert_eq!(table("pending"), vec!["V102"]);
        assert_eq!(table("pend").len(), 3);
        assert_eq!(table("v10"), vec!["V100", "V101", "V102"]);
        assert_eq!(table("xxx-xxx-12"), vec!["V100", "V101", "V102"]);
        assert!(table("nobody").is_empty());

        let v = voter("V1", "Jane", "Doe");
        assert!(matches_filter(&v, "main st"));
        assert!(matches_filter(&v, "03/04"));
        assert!(!matches_filter(&v, "jane doe"));
    }

    #[test]
    fn test_pagination_window() {
        let rows: Vec<usize> = (0..23).collect();
        assert_eq!(page_window(&rows, 0, 10), &rows[0..10]);
        assert_eq!(page_window(&rows, 2, 10), &rows[20..23]);
        assert!(page_window(&rows, 3, 10).is_empty());

        assert_eq!(range_label(23, 2, 10), "21–23 of 23");
        assert_eq!(range_label(0, 0, 10), "0–0 of 0");
    }

    #[test]
    fn test_page_reset_rules() {
        let voters: Vec<Voter> = (0..12).map(|i| voter(&format!("V{i:03}"), "Pat", "Doe")).collect();
        let mut state = TableState::default();
        state.apply(TableAction::SetRowsPerPage(5));
        state.apply(TableAction::SetPage(2));
        assert_eq!(state.visible(&voters).len(), 2);
        assert!(has_previous_page(state.page));
        assert!(!has_next_page(voters.len(), state.page, state.rows_per_page));
        assert!(has_next_page(voters.len(), 1, state.rows_per_page));

        // Changing the filter keeps page 2, which is now past the end.
        state.apply(TableAction::SetFilter("V001".into()));
        assert_eq!(state.page, 2);
        assert!(state.visible(&voters).is_empty());

        state.apply(TableAction::SetRowsPerPage(20));
        assert_eq!(state.page, 0);
        assert_eq!(state.visible(&voters).len(), 1);

        state.apply(TableAction::SetRowsPerPage(7));
        assert_eq!(state.rows_per_page, 20);
    }

    #[test]
    fn test_row_menu_actions() {
        let voters = roster();
        let mut state = TableState::default();
        state.apply(TableAction::OpenMenu(voters[1].clone()));
        assert_eq!(state.menu_for, Some("V101".into()));

        state.apply(TableAction::ViewVoter);
        assert!(state.menu_for.is_none());
        assert!(!state.form_open());

        state.apply(TableAction::OpenMenu(voters[1].clone()));
        state.apply(TableAction::TransferVoter);
        assert!(!state.form_open());

        state.apply(TableAction::OpenMenu(voters[1].clone()));
        state.apply(TableAction::ChangeVoter);
        assert!(state.edit_mode);
        assert_eq!(state.form_voter(), Some(&voters[1]));

        state.apply(TableAction::CloseForm);
        assert!(!state.form_open());

        state.apply(TableAction::AddVoter);
        assert!(state.form_open());
        assert!(state.form_voter().is_none());
    }

    #[test]
    fn test_form_keeps_binding_while_submitting() {
        let voters = roster();
        let mut form = VoterForm::new(Some(&voters[0]));
        assert!(form.begin_submit(&voters).is_some());

        assert!(!form.bind(None));
        assert!(!form.bind(Some(&voters[1])));
        assert_eq!(form.mode, FormMode::Edit(voters[0].clone()));
        assert_eq!(form.draft.get(VoterField::FirstName), "John");

        form.finish_submit(&Ok(()));
        assert!(form.bind(None));
        assert_eq!(form.mode, FormMode::Create);
    }

    #[test]
    fn test_busy_table_locks_form_actions() {
        let voters = roster();
        let mut state = TableState::default();
        state.apply(TableAction::OpenMenu(voters[0].clone()));
        state.apply(TableAction::ChangeVoter);
        state.apply(TableAction::SetBusy(true));

        state.apply(TableAction::AddVoter);
        state.apply(TableAction::OpenMenu(voters[1].clone()));
        state.apply(TableAction::ChangeVoter);
        assert!(!state.creating);
        assert!(state.menu_for.is_none());
        assert_eq!(state.form_voter(), Some(&voters[0]));

        state.apply(TableAction::SetBusy(false));
        state.apply(TableAction::CloseForm);
        state.apply(TableAction::AddVoter);
        assert!(state.form_open());
        assert!(state.form_voter().is_none());
    }

    #[test]
    fn test_form_binding() {
        let jane = voter("V100", "Jane", "Doe");
        let mut form = VoterForm::new(Some(&jane));
        assert!(form.is_edit_mode());
        assert_eq!(form.draft.get(VoterField::FirstName), "Jane");
        assert_eq!(form.draft.get(VoterField::DlStateId), "123456");
        assert!(!form.mode.fields().any(|f| f == VoterField::VoterRegistration));

        form.bind(None);
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.draft.get(VoterField::FirstName), "");
        assert_eq!(form.draft.get(VoterField::Status), "ACTIVE");
        assert!(form.mode.fields().any(|f| f == VoterField::VoterRegistration));
    }

    #[test]
    fn test_form_validation_blocks_submit() {
        let voters = roster();
        let mut form = VoterForm::new(Some(&voters[0]));
        form.set_field(VoterField::DlStateId, "12a456".into(), &voters);
        form.set_field(VoterField::Ssn, "xxx-xx-1234".into(), &voters);
        form.set_field(VoterField::FirstName, "".into(), &voters);

        assert!(form.begin_submit(&voters).is_none());
        assert!(!form.submitting);
        assert_eq!(form.errors.len(), 3);
        assert_eq!(form.label_for(VoterField::DlStateId), "Incorrect DL/State ID");
        assert_eq!(form.label_for(VoterField::FirstName), "First Name is required");
        assert_eq!(form.label_for(VoterField::LastName), "Last Name*");

        form.set_field(VoterField::DlStateId, "654321".into(), &voters);
        assert!(form.error_for(VoterField::DlStateId).is_none());
        assert!(form.error_for(VoterField::Ssn).is_some());
    }

    #[test]
    fn test_edit_updates_only_matching_record() {
        let voters = roster();
        let store = VoterStore::new();
        store.set_voters(voters.clone());
        let api = FakeApi::default();

        let mut form = VoterForm::new(Some(&voters[0]));
        form.set_field(VoterField::FirstName, "Jane".into(), &voters);
        let plan = form.begin_submit(&store.voters()).unwrap();
        assert!(form.submitting);
        assert!(form.begin_submit(&store.voters()).is_none());

        let result = block_on(submit_voter(&api, &store, plan));
        form.finish_submit(&result);
        assert!(result.is_ok());
        assert!(form.submit_error.is_none());

        let writes = api.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, Identifier::Text("id-V100".into()));

        let after = store.voters();
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], Voter { first_name: "Jane".into(), ..voters[0].clone() });
        assert_eq!(after[1], voters[1]);
        assert_eq!(after[2], voters[2]);
    }

    #[test]
    fn test_write_failure_leaves_store_and_form() {
        let voters = roster();
        let store = VoterStore::new();
        store.set_voters(voters.clone());
        let api = FakeApi { fail_writes: true, ..Default::default() };

        let mut form = VoterForm::new(Some(&voters[1]));
        form.set_field(VoterField::LastName, "Byron".into(), &voters);
        let plan = form.begin_submit(&store.voters()).unwrap();
        let result = block_on(submit_voter(&api, &store, plan));
        form.finish_submit(&result);

        assert_eq!(result.as_ref().map_err(|e| e.code), Err(ErrorCode::WriteFailure));
        assert_eq!(*store.voters(), voters);
        assert!(!form.submitting);
        assert!(form.is_edit_mode());
        assert_eq!(form.draft.get(VoterField::LastName), "Byron");
        assert!(form.submit_error.is_some());
    }

    #[test]
    fn test_create_appends_without_remote_call() {
        let voters = roster();
        let store = VoterStore::new();
        store.set_voters(voters.clone());
        let api = FakeApi::default();

        let mut form = VoterForm::new(None);
        form.set_field(VoterField::VoterRegistration, "V100".into(), &voters);
        form.set_field(VoterField::DlStateId, "222222".into(), &voters);
        form.set_field(VoterField::Ssn, "xxx-xxx-2222".into(), &voters);
        form.set_field(VoterField::FirstName, "New".into(), &voters);
        form.set_field(VoterField::LastName, "Voter".into(), &voters);
        assert!(form.begin_submit(&store.voters()).is_none());
        assert_eq!(form.error_for(VoterField::VoterRegistration), Some(&ValidationError::DuplicateRegistration));

        form.set_field(VoterField::VoterRegistration, "V200".into(), &voters);
        let plan = form.begin_submit(&store.voters()).unwrap();
        assert!(matches!(plan, SubmitPlan::Append(_)));
        block_on(submit_voter(&api, &store, plan)).unwrap();

        assert!(api.writes.borrow().is_empty());
        let after = store.voters();
        assert_eq!(after.len(), 4);
        assert_eq!(after[3].voter_registration, Identifier::from("V200"));
        assert_eq!(after[3].status, VoterStatus::Active);
        assert!(after[3].id.is_none());
    }

    #[test]
    fn test_update_without_service_id_fails() {
        let store = VoterStore::new();
        let orphan = Voter { id: None, ..voter("V300", "No", "Id") };
        store.set_voters(vec![orphan.clone()]);
        let api = FakeApi::default();

        let result = block_on(submit_voter(&api, &store, SubmitPlan::Update(orphan.clone())));
        assert_eq!(result.map_err(|e| e.code), Err(ErrorCode::WriteFailure));
        assert!(api.writes.borrow().is_empty());
        assert_eq!(*store.voters(), vec![orphan]);
    }

    #[test]
    fn test_list_reconciliation() {
        let voters = roster();
        let updated = Voter { party: "Green".into(), ..voters[2].clone() };
        let next = replace_voter(&voters, &updated);
        assert_eq!(next[2].party, "Green");
        assert_eq!(&next[..2], &voters[..2]);

        let unknown = voter("V999", "Not", "Listed");
        assert_eq!(replace_voter(&voters, &unknown), voters);
        assert_eq!(append_voter(&voters, unknown.clone()).last(), Some(&unknown));
    }
}
