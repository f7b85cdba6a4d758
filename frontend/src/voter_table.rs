use shared::{QueryState, TableAction, TableState, Voter, VoterStatus};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use crate::change_voter::ChangeVoter;
use crate::hooks::{use_app, use_voter_list, use_voters};
use crate::pagination::TablePagination;
use crate::row_actions::RowActions;
use crate::styles::*;

const COLUMNS: [&str; 12] = [
    "Status",
    "Voter Registration",
    "Registration Date",
    "DL/State ID",
    "SSN",
    "Last Name",
    "First Name",
    "Date Of Birth",
    "County",
    "Party",
    "Address",
    "Actions",
];

#[function_component]
pub fn VoterTable() -> Html {
    let app = use_app();
    let query = use_voters();
    let voters = use_voter_list(&app.store);
    let table = use_reducer(TableState::default);

    {
        let store = app.store.clone();
        use_effect_with_deps(move |query: &QueryState<Vec<Voter>>| {
            if let QueryState::Success(fetched) = query {
                if !store.is_primed() {
                    store.set_voters(fetched.as_ref().clone());
                }
            }
            || ()
        }, query.clone());
    }

    match &query {
        QueryState::Loading => return html! {
            <div class="flex justify-center p-8">
                <div class={combine_classes("animate-pulse text-lg", TEXT_MUTED)}>{"Loading..."}</div>
            </div>
        },
        QueryState::Error(_) => return html! {
            <div class={CONTAINER}>
                <div class={alert_style("error")}>{"Error while fetching voters"}</div>
            </div>
        },
        QueryState::Success(_) => {}
    }

    let dispatch = {
        let table = table.clone();
        Callback::from(move |action: TableAction| table.dispatch(action))
    };
    let on_filter = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatch.emit(TableAction::SetFilter(input.value()));
        })
    };
    let on_add = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(TableAction::AddVoter))
    };
    let on_close_form = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: ()| dispatch.emit(TableAction::CloseForm))
    };
    let on_busy = dispatch.reform(TableAction::SetBusy);

    let filtered = table.filtered(&voters);
    let displayed = table.visible(&voters);

    html! {
        <div class={CONTAINER}>
            if table.form_open() {
                <ChangeVoter
                    current_voter={table.form_voter().cloned()}
                    app={app.clone()}
                    on_close={on_close_form}
                    {on_busy}
                />
            }
            <div class={PAPER}>
                <div class={TOOLBAR}>
                    <h1 class={combine_classes(HEADING_MD, "flex-grow mb-0")}>{"Voters"}</h1>
                    <button type="button" class={button_primary(false)} disabled={table.busy} onclick={on_add}>
                        {"Add Voter"}
                    </button>
                    <input
                        type="text"
                        class={INPUT_COMPACT}
                        placeholder="Filter"
                        value={table.filter.clone()}
                        oninput={on_filter}
                    />
                    <TablePagination
                        count={filtered.len()}
                        page={table.page}
                        rows_per_page={table.rows_per_page}
                        on_page_change={dispatch.reform(TableAction::SetPage)}
                        on_rows_per_page_change={dispatch.reform(TableAction::SetRowsPerPage)}
                    />
                </div>
                <div class="overflow-x-auto">
                    <table class={TABLE}>
                        <thead>
                            <tr>
                                {for COLUMNS.iter().map(|column| html! { <th class={TABLE_HEAD_CELL}>{*column}</th> })}
                            </tr>
                        </thead>
                        <tbody>
                            {for displayed.into_iter().map(|voter| render_row(voter, &table, &dispatch))}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

fn render_row(voter: &Voter, table: &TableState, dispatch: &Callback<TableAction>) -> Html {
    let chip = match voter.status {
        VoterStatus::Active => STATUS_ACTIVE,
        VoterStatus::Pending => STATUS_PENDING,
    };
    let menu_open = table.menu_for.as_ref() == Some(&voter.voter_registration);

    html! {
        <tr key={voter.voter_registration.to_string()} class={TABLE_ROW}>
            <td class={TABLE_CELL}><div class={chip}>{voter.status.as_str()}</div></td>
            <td class={TABLE_CELL}>{voter.voter_registration.to_string()}</td>
            <td class={TABLE_CELL}>{&voter.registration_date}</td>
            <td class={TABLE_CELL}>{&voter.dl_state_id}</td>
            <td class={TABLE_CELL}>{&voter.ssn}</td>
            <td class={TABLE_CELL}>{&voter.last_name}</td>
            <td class={TABLE_CELL}>{&voter.first_name}</td>
            <td class={TABLE_CELL}>{&voter.date_of_birth}</td>
            <td class={TABLE_CELL}>{&voter.county}</td>
            <td class={TABLE_CELL}>{&voter.party}</td>
            <td class={TABLE_CELL}>{&voter.address}</td>
            <td class={TABLE_CELL}>
                <RowActions voter={voter.clone()} open={menu_open} disabled={table.busy} on_action={dispatch.clone()} />
            </td>
        </tr>
    }
}
