use crate::models::{Identifier, Voter};

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Case-insensitive substring match against any displayed field.
pub fn matches_filter(voter: &Voter, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    voter.searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_voters<'a>(voters: &'a [Voter], filter: &str) -> Vec<&'a Voter> {
    voters.iter().filter(|voter| matches_filter(voter, filter)).collect()
}

/// `rows[page * rows_per_page .. page * rows_per_page + rows_per_page]`, clamped to the slice.
pub fn page_window<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page).min(rows.len());
    let end = start.saturating_add(rows_per_page).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 { 0 } else { total.div_ceil(rows_per_page) }
}

pub fn has_previous_page(page: usize) -> bool {
    page > 0
}

pub fn has_next_page(total: usize, page: usize, rows_per_page: usize) -> bool {
    page + 1 < page_count(total, rows_per_page)
}

/// Footer text in the `from–to of count` form.
pub fn range_label(total: usize, page: usize, rows_per_page: usize) -> String {
    let from = if total == 0 { 0 } else { page * rows_per_page + 1 };
    let to = ((page + 1) * rows_per_page).min(total);
    format!("{from}–{to} of {total}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    SetFilter(String),
    SetPage(usize),
    SetRowsPerPage(usize),
    OpenMenu(Voter),
    CloseMenu,
    ViewVoter,
    ChangeVoter,
    TransferVoter,
    AddVoter,
    CloseForm,
    SetBusy(bool),
}

/// Local UI state of the voter table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub filter: String,
    pub page: usize,
    pub rows_per_page: usize,
    pub selected: Option<Voter>,
    pub menu_for: Option<Identifier>,
    pub edit_mode: bool,
    pub creating: bool,
    /// A form submit is in flight; row menus and "Add Voter" are locked.
    pub busy: bool,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            selected: None,
            menu_for: None,
            edit_mode: false,
            creating: false,
            busy: false,
        }
    }
}

impl TableState {
    pub fn apply(&mut self, action: TableAction) {
        if self.busy && matches!(
            action,
            TableAction::OpenMenu(_) | TableAction::ChangeVoter | TableAction::AddVoter
        ) {
            return;
        }
        match action {
            // Filter edits keep the current page.
            TableAction::SetFilter(filter) => self.filter = filter,
            TableAction::SetPage(page) => self.page = page,
            TableAction::SetRowsPerPage(rows) => {
                if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
                    self.rows_per_page = rows;
                    self.page = 0;
                }
            }
            TableAction::OpenMenu(voter) => {
                self.menu_for = Some(voter.voter_registration.clone());
                self.selected = Some(voter);
            }
            TableAction::CloseMenu | TableAction::ViewVoter | TableAction::TransferVoter => {
                self.menu_for = None;
            }
            TableAction::ChangeVoter => {
                self.menu_for = None;
                if self.selected.is_some() {
                    self.edit_mode = true;
                    self.creating = false;
                }
            }
            TableAction::AddVoter => {
                self.menu_for = None;
                self.selected = None;
                self.edit_mode = false;
                self.creating = true;
            }
            TableAction::CloseForm => {
                self.edit_mode = false;
                self.creating = false;
            }
            TableAction::SetBusy(busy) => {
                self.busy = busy;
                if busy {
                    self.menu_for = None;
                }
            }
        }
    }

    pub fn form_open(&self) -> bool {
        (self.edit_mode && self.selected.is_some()) || self.creating
    }

    /// Record the form is bound to, `None` in create mode.
    pub fn form_voter(&self) -> Option<&Voter> {
        if self.edit_mode { self.selected.as_ref() } else { None }
    }

    pub fn filtered<'a>(&self, voters: &'a [Voter]) -> Vec<&'a Voter> {
        filter_voters(voters, &self.filter)
    }

    pub fn visible<'a>(&self, voters: &'a [Voter]) -> Vec<&'a Voter> {
        let filtered = self.filtered(voters);
        page_window(&filtered, self.page, self.rows_per_page).to_vec()
    }
}

#[cfg(feature = "frontend")]
mod frontend_impl {
    use super::{TableAction, TableState};
    use std::rc::Rc;

    impl yew::Reducible for TableState {
        type Action = TableAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            let mut next = (*self).clone();
            next.apply(action);
            Rc::new(next)
        }
    }
}
