use shared::{dates, submit_voter, Error, Voter, VoterField, VoterForm, VoterStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use crate::context::AppContext;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// `None` opens the form in create mode.
    pub current_voter: Option<Voter>,
    pub app: AppContext,
    pub on_close: Callback<()>,
    /// Raised while a submit is in flight.
    pub on_busy: Callback<bool>,
}

pub enum Msg {
    UpdateField(VoterField, String),
    Submit,
    SubmitResult(Result<(), Error>),
    Cancel,
}

pub struct ChangeVoter {
    form: VoterForm,
}

impl Component for ChangeVoter {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: VoterForm::new(ctx.props().current_voter.as_ref()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if old_props.current_voter != ctx.props().current_voter {
            self.form.bind(ctx.props().current_voter.as_ref());
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateField(field, value) => {
                let voters = ctx.props().app.store.voters();
                self.form.set_field(field, value, &voters);
                true
            }
            Msg::Submit => {
                let app = ctx.props().app.clone();
                let Some(plan) = self.form.begin_submit(&app.store.voters()) else {
                    return true;
                };
                ctx.props().on_busy.emit(true);
                ctx.link().send_future(async move {
                    Msg::SubmitResult(submit_voter(app.api.as_ref(), &app.store, plan).await)
                });
                true
            }
            Msg::SubmitResult(result) => {
                self.form.finish_submit(&result);
                ctx.props().on_busy.emit(false);
                if result.is_ok() {
                    ctx.props().on_close.emit(());
                }
                true
            }
            Msg::Cancel => {
                if !self.form.submitting {
                    ctx.props().on_close.emit(());
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let title = if self.form.is_edit_mode() { "Change Voter" } else { "Add Voter" };

        html! {
            <div class={combine_classes(CARD_SECTION, "relative mb-6")}>
                {if self.form.submitting {
                    html! {
                        <div class={LOADER_OVERLAY}>
                            <div class={SPINNER}/>
                        </div>
                    }
                } else { html! {} }}
                <h2 class={HEADING_SM}>{title}</h2>
                {if let Some(error) = &self.form.submit_error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}
                <form {onsubmit}>
                    <fieldset class={FORM_GRID} disabled={self.form.submitting}>
                        {for self.form.mode.fields().map(|field| self.render_field(ctx, field))}
                        <div class="col-span-full flex justify-end gap-4">
                            <button
                                type="button"
                                class={combine_classes(BUTTON_BASE, BUTTON_NEUTRAL)}
                                onclick={ctx.link().callback(|_| Msg::Cancel)}
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="submit"
                                class={button_primary(false)}
                                disabled={self.form.submitting}
                            >
                                {"Save"}
                            </button>
                        </div>
                    </fieldset>
                </form>
            </div>
        }
    }
}

impl ChangeVoter {
    fn render_field(&self, ctx: &Context<Self>, field: VoterField) -> Html {
        match field {
            VoterField::Status => self.render_status(ctx),
            VoterField::DateOfBirth => self.render_date_of_birth(ctx),
            VoterField::Address => self.render_input(ctx, field, "col-span-full"),
            _ => self.render_input(ctx, field, ""),
        }
    }

    fn render_label(&self, field: VoterField) -> Html {
        let class = if self.form.error_for(field).is_some() { TEXT_ERROR } else { TEXT_LABEL };
        html! { <label class={class}>{self.form.label_for(field)}</label> }
    }

    fn render_input(&self, ctx: &Context<Self>, field: VoterField, extra: &str) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateField(field, input.value())
        });

        html! {
            <div class={combine_classes(SPACE_Y_BASE, extra)}>
                {self.render_label(field)}
                <input type="text"
                    class={input_style(self.form.error_for(field).is_some())}
                    value={self.form.draft.get(field).to_string()}
                    aria-required={field.is_required().to_string()}
                    {oninput} />
            </div>
        }
    }

    fn render_status(&self, ctx: &Context<Self>) -> Html {
        let current = self.form.draft.get(VoterField::Status);
        let onchange = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::UpdateField(VoterField::Status, select.value())
        });

        html! {
            <div class={SPACE_Y_BASE}>
                {self.render_label(VoterField::Status)}
                <select class={input_style(self.form.error_for(VoterField::Status).is_some())} {onchange}>
                    {for VoterStatus::ALL.iter().map(|status| html! {
                        <option value={status.as_str()} selected={status.as_str() == current}>
                            {status.as_str()}
                        </option>
                    })}
                </select>
            </div>
        }
    }

    fn render_date_of_birth(&self, ctx: &Context<Self>) -> Html {
        let onchange = ctx.link().callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateField(VoterField::DateOfBirth, dates::input_to_stored(&input.value()))
        });

        html! {
            <div class={SPACE_Y_BASE}>
                {self.render_label(VoterField::DateOfBirth)}
                <input type="date"
                    class={input_style(false)}
                    value={dates::stored_to_input(self.form.draft.get(VoterField::DateOfBirth))}
                    {onchange} />
            </div>
        }
    }
}
