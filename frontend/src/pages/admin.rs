use shared::api::{DEFAULT_HEATMAP_TYPE, DEFAULT_HEATMAP_WORLD};
use shared::heatmap::heatmap_color;
use shared::{AdminTab, Region, Section};
use uuid::Uuid;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::region::RegionView;
use crate::dashboard::DashboardContext;

const HEATMAP_TYPES: [&str; 6] = ["MINING", "BREAK", "PLACE", "DEATH", "KILL", "POSITION"];

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[derive(Properties, PartialEq)]
struct GaugeProps {
    region: Region,
    label: &'static str,
}

#[function_component(Gauge)]
fn gauge(props: &GaugeProps) -> Html {
    html! {
        <div class="health-item">
            <span class="health-label">{props.label}</span>
            <span class="health-value" id={props.region.element_id()}>
                <RegionView region={props.region} />
            </span>
        </div>
    }
}

#[function_component(HealthPanel)]
fn health_panel() -> Html {
    html! {
        <>
            <div class="health-grid">
                <Gauge region={Region::HealthTps} label="TPS" />
                <Gauge region={Region::HealthMemory} label="Memory" />
                <Gauge region={Region::HealthChunks} label="Loaded Chunks" />
                <Gauge region={Region::HealthEntities} label="Entities" />
                <Gauge region={Region::HealthHoppers} label="Hoppers" />
                <Gauge region={Region::HealthRedstone} label="Redstone" />
            </div>
            <div class="cost-index">
                <h3>{"Cost Index"}</h3>
                <div class="cost-index-bar" id={Region::CostIndexFill.element_id()}>
                    <RegionView region={Region::CostIndexFill} />
                </div>
                <span id={Region::CostIndexValue.element_id()}>
                    <RegionView region={Region::CostIndexValue} />
                </span>
            </div>
        </>
    }
}

#[function_component(HeatmapPanel)]
fn heatmap_panel() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state();

    let on_type = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            ctx.controller.set_heatmap_type(non_empty(select.value()));
        })
    };

    let on_world = {
        let ctx = ctx.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ctx.controller.set_heatmap_world(non_empty(input.value()));
        })
    };

    let on_load = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.spawn(|controller| async move { controller.load_heatmap().await });
        })
    };

    let selected_type = state.heatmap_query.kind().to_string();
    let legend = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|stop| format!("{} {}%", heatmap_color(*stop).css(), stop * 100.0))
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <>
            <div class="filters">
                <label class="filter">
                    {"Type"}
                    <select id="heatmap-type" onchange={on_type}>
                        { for HEATMAP_TYPES.iter().map(|kind| html! {
                            <option value={*kind} selected={*kind == selected_type}>{*kind}</option>
                        }) }
                    </select>
                </label>
                <label class="filter">
                    {"World"}
                    <input
                        type="text"
                        id="heatmap-world"
                        placeholder={DEFAULT_HEATMAP_WORLD}
                        value={state.heatmap_query.world.clone().unwrap_or_default()}
                        oninput={on_world}
                    />
                </label>
                <button id="load-heatmap" class="btn btn-primary" onclick={on_load}>
                    {"Load Heatmap"}
                </button>
            </div>
            <div class="heatmap-container" id={Region::Heatmap.element_id()}>
                <RegionView region={Region::Heatmap} />
            </div>
            <div
                id="heatmap-legend"
                class={classes!("heatmap-legend", (!state.heatmap_legend_visible).then_some("hidden"))}
            >
                <span>{"Low"}</span>
                <div class="legend-gradient" style={format!("background: linear-gradient(to right, {})", legend)}></div>
                <span>{"High"}</span>
            </div>
            <p class="hint">{format!("Defaults: {} in {}", DEFAULT_HEATMAP_TYPE, DEFAULT_HEATMAP_WORLD)}</p>
        </>
    }
}

#[function_component(PlayersPanel)]
fn players_panel() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");

    let on_search = {
        let ctx = ctx.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ctx.controller.filter_players(&input.value());
        })
    };

    let on_select = {
        let ctx = ctx.clone();
        Callback::from(move |uuid: Uuid| {
            ctx.spawn(move |controller| async move { controller.show_player(uuid).await });
        })
    };

    html! {
        <>
            <input
                type="search"
                id="player-search"
                class="search-input"
                placeholder="Search players..."
                value={ctx.state().player_search.clone()}
                oninput={on_search}
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Player"}</th>
                        <th>{"Playtime"}</th>
                        <th>{"Deaths"}</th>
                        <th>{"Kills"}</th>
                        <th>{"Last Seen"}</th>
                    </tr>
                </thead>
                <tbody id={Region::Players.element_id()}>
                    <RegionView region={Region::Players} on_select={on_select} />
                </tbody>
            </table>
            <div class="player-detail" id={Region::PlayerDetail.element_id()}>
                <RegionView region={Region::PlayerDetail} />
            </div>
        </>
    }
}

fn tab_content(tab: AdminTab) -> Html {
    match tab {
        AdminTab::Health => html! { <HealthPanel /> },
        AdminTab::Heatmap => html! { <HeatmapPanel /> },
        AdminTab::Social => html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Players"}</th>
                        <th>{"Time Together"}</th>
                        <th>{"Shared Kills"}</th>
                    </tr>
                </thead>
                <tbody id={Region::Social.element_id()}>
                    <RegionView region={Region::Social} />
                </tbody>
            </table>
        },
        AdminTab::Deaths => html! {
            <div class="card-list" id={Region::Deaths.element_id()}>
                <RegionView region={Region::Deaths} />
            </div>
        },
        AdminTab::Players => html! { <PlayersPanel /> },
    }
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");
    let state = ctx.state();

    if !state.is_admin {
        return html! {};
    }

    let tabs = AdminTab::ALL
        .into_iter()
        .map(|tab| {
            let onclick = {
                let ctx = ctx.clone();
                Callback::from(move |_: MouseEvent| {
                    ctx.spawn(move |controller| async move { controller.select_admin_tab(tab).await });
                })
            };
            html! {
                <button
                    class={classes!("admin-tab", (state.admin_tab == tab).then_some("active"))}
                    data-tab={tab.name()}
                    {onclick}
                >
                    {tab.title()}
                </button>
            }
        })
        .collect::<Html>();

    let panels = AdminTab::ALL
        .into_iter()
        .map(|tab| {
            html! {
                <div
                    id={tab.element_id()}
                    class={classes!("admin-content", (state.admin_tab == tab).then_some("active"))}
                >
                    {tab_content(tab)}
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <section
            id={Section::Admin.element_id()}
            class={classes!("section", state.is_active(Section::Admin).then_some("active"))}
        >
            <div class="admin-tabs">{tabs}</div>
            {panels}
        </section>
    }
}
