use shared::{Region, Section};
use yew::prelude::*;

use crate::components::region::RegionView;
use crate::dashboard::DashboardContext;

#[derive(Properties, PartialEq)]
struct StatCardProps {
    region: Region,
    label: &'static str,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-value" id={props.region.element_id()}>
                <RegionView region={props.region} />
            </div>
            <div class="stat-label">{props.label}</div>
        </div>
    }
}

#[function_component(Overview)]
pub fn overview() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state();
    let flags = state.flags();

    let on_toggle_biomes = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.controller.toggle_biomes();
        })
    };

    let (arrow, title) = if state.biomes_expanded {
        ("▲", "Hide biomes list")
    } else {
        ("▼", "Show biomes list")
    };

    html! {
        <section
            id={Section::Overview.element_id()}
            class={classes!("section", state.is_active(Section::Overview).then_some("active"))}
        >
            if flags.show_online_players {
                <div class="card online-card">
                    <h2>
                        {"Online Now "}
                        <span class="badge" id={Region::OnlineCount.element_id()}>
                            <RegionView region={Region::OnlineCount} />
                        </span>
                    </h2>
                    <div class="player-tags" id={Region::OnlineList.element_id()}>
                        <RegionView region={Region::OnlineList} />
                    </div>
                </div>
            }
            if flags.show_server_stats {
                <div class="stats-grid">
                    <StatCard region={Region::TotalPlaytime} label="Total Playtime" />
                    <StatCard region={Region::TotalDeaths} label="Deaths" />
                    <StatCard region={Region::TotalKills} label="Kills" />
                    <StatCard region={Region::TotalPlayers} label="Players" />
                    <StatCard region={Region::BlocksBroken} label="Blocks Broken" />
                    <StatCard region={Region::BlocksPlaced} label="Blocks Placed" />
                    <StatCard region={Region::DistanceTraveled} label="Distance Traveled" />
                    <div class="stat-card">
                        <div class="stat-value" id={Region::BiomesDiscovered.element_id()}>
                            <RegionView region={Region::BiomesDiscovered} />
                        </div>
                        <div class="stat-label">
                            {"Biomes Discovered "}
                            <button id="biomes-toggle" class="toggle" {title} onclick={on_toggle_biomes}>
                                {arrow}
                            </button>
                        </div>
                    </div>
                </div>
                <div
                    class={classes!("biomes-list", (!state.biomes_expanded).then_some("hidden"))}
                    id={Region::BiomesList.element_id()}
                >
                    <RegionView region={Region::BiomesList} />
                </div>
            }
        </section>
    }
}
