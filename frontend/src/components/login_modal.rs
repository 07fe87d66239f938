use log::debug;
use web_sys::HtmlInputElement;
use yew::events::SubmitEvent;
use yew::prelude::*;

use crate::dashboard::DashboardContext;

#[function_component(LoginModal)]
pub fn login_modal() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let password = use_state(String::new);
    let loading = use_state(|| false);

    let onsubmit = {
        let ctx = ctx.clone();
        let password = password.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let secret = (*password).clone();
            let password = password.clone();
            let loading = loading.clone();
            loading.set(true);
            ctx.spawn(move |controller| async move {
                let outcome = controller.login(&secret).await;
                loading.set(false);
                if outcome.success {
                    password.set(String::new());
                } else {
                    debug!("Login form rejected: {:?}", outcome.error);
                }
            });
        })
    };

    let oninput = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_close = {
        let ctx = ctx.clone();
        let password = password.clone();
        Callback::from(move |_: MouseEvent| {
            password.set(String::new());
            ctx.controller.close_login_modal();
        })
    };

    let state = ctx.state();
    if !state.login_modal_open {
        return html! {};
    }

    html! {
        <div id="login-modal" class="modal" onclick={on_close.clone()}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <h2>{"Admin Login"}</h2>
                <form id="login-form" {onsubmit}>
                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            {oninput}
                            disabled={*loading}
                            required=true
                        />
                    </div>
                    if let Some(error) = &state.login_error {
                        <p id="login-error" class="error-message">{error.clone()}</p>
                    }
                    <div class="modal-actions">
                        <button type="button" id="cancel-login" class="btn btn-secondary" onclick={on_close}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={*loading}>
                            if *loading { {"Logging in..."} } else { {"Login"} }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
