use shared::{TableAction, Voter};
use yew::prelude::*;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct RowActionsProps {
    pub voter: Voter,
    pub open: bool,
    #[prop_or_default]
    pub disabled: bool,
    pub on_action: Callback<TableAction>,
}

/// The "⋮" button of a row and its menu.
#[function_component(RowActions)]
pub fn row_actions(props: &RowActionsProps) -> Html {
    let item = |label: &'static str, action: TableAction| {
        let on_action = props.on_action.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_action.emit(action.clone()));
        html! {
            <li>
                <button type="button" class={MENU_ITEM} {onclick}>{label}</button>
            </li>
        }
    };

    let on_toggle = {
        let on_action = props.on_action.clone();
        let voter = props.voter.clone();
        let open = props.open;
        Callback::from(move |_: MouseEvent| {
            if open {
                on_action.emit(TableAction::CloseMenu);
            } else {
                on_action.emit(TableAction::OpenMenu(voter.clone()));
            }
        })
    };

    html! {
        <div class="relative">
            <button type="button" class={ICON_BUTTON} disabled={props.disabled} onclick={on_toggle} aria-label="Voter actions">
                {"⋮"}
            </button>
            if props.open && !props.disabled {
                <ul class={MENU_PAPER}>
                    {item("View Voter", TableAction::ViewVoter)}
                    {item("Change Voter", TableAction::ChangeVoter)}
                    {item("Transfer Voter", TableAction::TransferVoter)}
                </ul>
            }
        </div>
    }
}
