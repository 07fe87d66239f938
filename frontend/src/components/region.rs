use shared::view::{Card, TableRow};
use shared::{Region, View};
use uuid::Uuid;
use yew::prelude::*;

use crate::components::heatmap_canvas::HeatmapCanvas;
use crate::dashboard::DashboardContext;

#[derive(Properties, Clone, PartialEq)]
pub struct RegionViewProps {
    pub region: Region,
    /// Fired with the player of a clicked table row.
    #[prop_or_default]
    pub on_select: Option<Callback<Uuid>>,
}

fn is_table(region: Region) -> bool {
    matches!(region, Region::Leaderboard | Region::Social | Region::Players)
}

fn placeholder(region: Region, text: &str) -> Html {
    if is_table(region) {
        html! {
            <tr>
                <td colspan={region.columns().to_string()} class="empty-state">{text.to_string()}</td>
            </tr>
        }
    } else {
        html! { <p class="empty-state">{text.to_string()}</p> }
    }
}

fn table_row(row: &TableRow, on_select: &Option<Callback<Uuid>>) -> Html {
    let cells = row
        .cells
        .iter()
        .map(|cell| html! { <td class={cell.class.clone()}>{cell.text.clone()}</td> })
        .collect::<Html>();

    match (row.link, on_select) {
        (Some(uuid), Some(on_select)) => {
            let on_select = on_select.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_select.emit(uuid));
            html! { <tr class="clickable" {onclick}>{cells}</tr> }
        }
        _ => html! { <tr>{cells}</tr> },
    }
}

fn card(card: &Card) -> Html {
    html! {
        <div class="card">
            <div class="card-header">
                if let Some(icon) = &card.icon {
                    <span class="card-icon">{icon.clone()}</span>
                }
                <span class="card-title">{card.title.clone()}</span>
            </div>
            { for card.lines.iter().map(|line| html! { <div class="card-detail">{line.clone()}</div> }) }
            <div class="card-meta">
                { for card.meta.iter().map(|meta| html! { <span>{meta.clone()}</span> }) }
            </div>
        </div>
    }
}

/// Renders the latest view the controller sent to `region`.
#[function_component(RegionView)]
pub fn region_view(props: &RegionViewProps) -> Html {
    let ctx = use_context::<DashboardContext>().expect("Dashboard context not found");

    let Some(view) = ctx.view(props.region) else {
        return html! {};
    };

    match view {
        View::Text(text) => html! { {text.clone()} },
        View::Placeholder(text) => placeholder(props.region, text),
        View::Tags(tags) => tags
            .iter()
            .map(|tag| html! { <span class="tag">{tag.clone()}</span> })
            .collect::<Html>(),
        View::Table(rows) => rows
            .iter()
            .map(|row| table_row(row, &props.on_select))
            .collect::<Html>(),
        View::Cards(cards) => cards.iter().map(card).collect::<Html>(),
        View::Meter(percent) => html! {
            <div class="meter-fill" style={format!("width: {}%", percent)}></div>
        },
        View::Details(rows) => html! {
            <dl class="details">
                { for rows.iter().map(|(label, value)| html! {
                    <>
                        <dt>{label.clone()}</dt>
                        <dd>{value.clone()}</dd>
                    </>
                }) }
            </dl>
        },
        View::Heatmap(image) => html! { <HeatmapCanvas image={image.clone()} /> },
    }
}
