use shared::{Region, Section};
use yew::prelude::*;

use crate::components::choice::Choice;
use crate::components::region::RegionView;
use crate::dashboard::DashboardContext;

const LIMIT_OPTIONS: [(u32, &str); 3] = [(10, "10"), (20, "20"), (50, "50")];

#[function_component(Moments)]
pub fn moments() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state();

    let on_limit = {
        let ctx = ctx.clone();
        Callback::from(move |limit: Option<u32>| {
            ctx.spawn(move |controller| async move { controller.set_moments_limit(limit).await });
        })
    };

    html! {
        <section
            id={Section::Moments.element_id()}
            class={classes!("section", state.is_active(Section::Moments).then_some("active"))}
        >
            <div class="section-header">
                <h2>{"Recent Moments"}</h2>
                <div class="filters">
                    <Choice id="moments-limit" label="Show" options={LIMIT_OPTIONS.to_vec()}
                        selected={state.moments_query.limit()} on_change={on_limit} />
                </div>
            </div>
            <div class="card-list" id={Region::Moments.element_id()}>
                <RegionView region={Region::Moments} />
            </div>
        </section>
    }
}
