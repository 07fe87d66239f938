use shared::Section;
use yew::prelude::*;

use crate::dashboard::DashboardContext;

#[function_component(Nav)]
pub fn nav() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state().clone();

    let on_login_click = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.controller.open_login_modal();
        })
    };

    let on_logout_click = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.spawn(|controller| async move { controller.logout().await });
        })
    };

    let links = Section::ALL
        .into_iter()
        .filter(|section| state.is_nav_visible(*section))
        .map(|section| {
            let onclick = {
                let ctx = ctx.clone();
                Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    ctx.spawn(move |controller| async move { controller.show_section(section).await });
                })
            };
            html! {
                <a
                    href={format!("#{}", section.name())}
                    class={classes!("nav-link", state.is_active(section).then_some("active"))}
                    data-section={section.name()}
                    {onclick}
                >
                    {section.title()}
                </a>
            }
        })
        .collect::<Html>();

    html! {
        <nav class="navbar">
            <div class="nav-brand">
                <span class="nav-logo">{"⛏"}</span>
                <span class="nav-title">{"SMPStats"}</span>
            </div>
            <div class="nav-links">
                {links}
            </div>
            <div class="nav-auth">
                if state.is_login_button_visible() {
                    <button id="admin-login-btn" class="btn btn-secondary" onclick={on_login_click}>
                        {"Admin Login"}
                    </button>
                }
                if state.is_logout_button_visible() {
                    <button id="admin-logout-btn" class="btn btn-secondary" onclick={on_logout_click}>
                        {"Logout"}
                    </button>
                }
            </div>
        </nav>
    }
}
