use shared::table::{has_next_page, has_previous_page, range_label, ROWS_PER_PAGE_OPTIONS};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct TablePaginationProps {
    pub count: usize,
    pub page: usize,
    pub rows_per_page: usize,
    pub on_page_change: Callback<usize>,
    pub on_rows_per_page_change: Callback<usize>,
}

#[function_component(TablePagination)]
pub fn table_pagination(props: &TablePaginationProps) -> Html {
    let has_previous = has_previous_page(props.page);
    let has_next = has_next_page(props.count, props.page, props.rows_per_page);

    let on_rows = {
        let on_change = props.on_rows_per_page_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(rows) = select.value().parse::<usize>() {
                on_change.emit(rows);
            }
        })
    };
    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        let page = props.page;
        Callback::from(move |_: MouseEvent| on_page_change.emit(page.saturating_sub(1)))
    };
    let on_next = {
        let on_page_change = props.on_page_change.clone();
        let page = props.page;
        Callback::from(move |_: MouseEvent| on_page_change.emit(page + 1))
    };

    html! {
        <div class="flex items-center gap-4 text-sm text-gray-300">
            <label class="flex items-center gap-2">
                {"Rows per page:"}
                <select class={SELECT_COMPACT} onchange={on_rows}>
                    {for ROWS_PER_PAGE_OPTIONS.iter().map(|rows| html! {
                        <option value={rows.to_string()} selected={*rows == props.rows_per_page}>{rows.to_string()}</option>
                    })}
                </select>
            </label>
            <span>{range_label(props.count, props.page, props.rows_per_page)}</span>
            <button type="button" class={ICON_BUTTON} disabled={!has_previous} onclick={on_previous}
                aria-label="Previous page">{"‹"}</button>
            <button type="button" class={ICON_BUTTON} disabled={!has_next} onclick={on_next}
                aria-label="Next page">{"›"}</button>
        </div>
    }
}
