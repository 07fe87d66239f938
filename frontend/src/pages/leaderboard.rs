use shared::{Region, Section};
use yew::prelude::*;

use crate::components::choice::Choice;
use crate::components::region::RegionView;
use crate::dashboard::DashboardContext;

const DAY_OPTIONS: [(u32, &str); 4] = [(1, "Today"), (7, "7 days"), (30, "30 days"), (365, "1 year")];
const LIMIT_OPTIONS: [(u32, &str); 3] = [(10, "Top 10"), (25, "Top 25"), (50, "Top 50")];

#[function_component(Leaderboard)]
pub fn leaderboard() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state();
    let query = state.leaderboard_query;

    let on_days = {
        let ctx = ctx.clone();
        Callback::from(move |days: Option<u32>| {
            ctx.spawn(move |controller| async move { controller.set_leaderboard_days(days).await });
        })
    };

    let on_limit = {
        let ctx = ctx.clone();
        Callback::from(move |limit: Option<u32>| {
            ctx.spawn(move |controller| async move { controller.set_leaderboard_limit(limit).await });
        })
    };

    html! {
        <section
            id={Section::Leaderboard.element_id()}
            class={classes!("section", state.is_active(Section::Leaderboard).then_some("active"))}
        >
            <div class="section-header">
                <h2>{"Leaderboard"}</h2>
                <div class="filters">
                    <Choice id="leaderboard-days" label="Period" options={DAY_OPTIONS.to_vec()}
                        selected={query.days()} on_change={on_days} />
                    <Choice id="leaderboard-limit" label="Show" options={LIMIT_OPTIONS.to_vec()}
                        selected={query.limit()} on_change={on_limit} />
                </div>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"#"}</th>
                        <th>{"Player"}</th>
                        <th>{"Playtime"}</th>
                        <th>{"Blocks Broken"}</th>
                        <th>{"Deaths"}</th>
                        <th>{"Mob Kills"}</th>
                    </tr>
                </thead>
                <tbody id={Region::Leaderboard.element_id()}>
                    <RegionView region={Region::Leaderboard} />
                </tbody>
            </table>
        </section>
    }
}
