//! View models: what each page region shows, built from server DTOs.
//!
//! Builders are pure so the browser and the tests see the same output.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::admin::{DeathsResponse, HealthSnapshot, HeatmapResponse, SocialResponse};
use crate::dto::overview::{OnlinePlayers, ServerStats};
use crate::dto::player::PlayerRecord;
use crate::dto::public::{LeaderboardResponse, MomentsResponse};
use crate::format::{
    fixed_one, format_biome_name, format_duration, format_hours, format_number, format_timestamp,
    round_half_up,
};
use crate::heatmap::{rasterize, HeatmapImage};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// A fixed slot on the page whose content is replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    OnlineCount,
    OnlineList,
    TotalPlaytime,
    TotalDeaths,
    TotalKills,
    TotalPlayers,
    BlocksBroken,
    BlocksPlaced,
    DistanceTraveled,
    BiomesDiscovered,
    BiomesList,
    Leaderboard,
    Moments,
    HealthChunks,
    HealthEntities,
    HealthHoppers,
    HealthRedstone,
    HealthTps,
    HealthMemory,
    CostIndexFill,
    CostIndexValue,
    Heatmap,
    Social,
    Deaths,
    Players,
    PlayerDetail,
}

impl Region {
    /// Regions only an authenticated admin may see.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Region::HealthChunks
                | Region::HealthEntities
                | Region::HealthHoppers
                | Region::HealthRedstone
                | Region::HealthTps
                | Region::HealthMemory
                | Region::CostIndexFill
                | Region::CostIndexValue
                | Region::Heatmap
                | Region::Social
                | Region::Deaths
                | Region::Players
                | Region::PlayerDetail
        )
    }

    pub fn element_id(&self) -> &'static str {
        match self {
            Region::OnlineCount => "online-count",
            Region::OnlineList => "online-players-list",
            Region::TotalPlaytime => "total-playtime",
            Region::TotalDeaths => "total-deaths",
            Region::TotalKills => "total-kills",
            Region::TotalPlayers => "total-players",
            Region::BlocksBroken => "blocks-broken",
            Region::BlocksPlaced => "blocks-placed",
            Region::DistanceTraveled => "distance-traveled",
            Region::BiomesDiscovered => "biomes-discovered",
            Region::BiomesList => "biomes-list",
            Region::Leaderboard => "leaderboard-body",
            Region::Moments => "moments-list",
            Region::HealthChunks => "health-chunks",
            Region::HealthEntities => "health-entities",
            Region::HealthHoppers => "health-hoppers",
            Region::HealthRedstone => "health-redstone",
            Region::HealthTps => "health-tps",
            Region::HealthMemory => "health-memory",
            Region::CostIndexFill => "cost-index-fill",
            Region::CostIndexValue => "cost-index-value",
            Region::Heatmap => "heatmap-container",
            Region::Social => "social-body",
            Region::Deaths => "deaths-list",
            Region::Players => "players-body",
            Region::PlayerDetail => "player-detail",
        }
    }

    /// Column count for table regions, used to span placeholder rows.
    pub fn columns(&self) -> usize {
        match self {
            Region::Leaderboard => 6,
            Region::Players => 5,
            Region::Social => 3,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub class: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    /// Player the row opens when clicked.
    pub link: Option<Uuid>,
}

impl TableRow {
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub icon: Option<String>,
    pub title: String,
    pub lines: Vec<String>,
    pub meta: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Text(String),
    /// Empty-state or loading message.
    Placeholder(String),
    Tags(Vec<String>),
    Table(Vec<TableRow>),
    Cards(Vec<Card>),
    /// Bar fill, in percent of the track.
    Meter(f64),
    Details(Vec<(String, String)>),
    Heatmap(HeatmapImage),
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        View::Placeholder(text.into())
    }

    /// The message of a placeholder view.
    pub fn placeholder_text(&self) -> Option<&str> {
        match self {
            View::Placeholder(text) => Some(text),
            _ => None,
        }
    }
}

pub const LOADING_HEATMAP: &str = "Loading heatmap...";
pub const HEATMAP_FAILED: &str = "Failed to load heatmap";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn online_views(online: &OnlinePlayers) -> Vec<(Region, View)> {
    let list = if online.players.is_empty() {
        View::placeholder("No players online")
    } else {
        View::Tags(online.players.clone())
    };
    vec![
        (Region::OnlineCount, View::text(online.count.to_string())),
        (Region::OnlineList, list),
    ]
}

pub fn stats_views(stats: &ServerStats) -> Vec<(Region, View)> {
    let distance = format!(
        "{} km",
        format_number(stats.total_distance_km.map(round_half_up))
    );
    let biomes = if stats.biomes_list.is_empty() {
        View::placeholder("No biomes discovered yet")
    } else {
        View::Tags(
            stats
                .biomes_list
                .iter()
                .map(|biome| format_biome_name(biome))
                .collect(),
        )
    };

    vec![
        (Region::TotalPlaytime, View::text(format_hours(stats.total_playtime_hours))),
        (Region::TotalDeaths, View::text(format_number(stats.total_deaths))),
        (Region::TotalKills, View::text(format_number(stats.total_kills()))),
        (Region::TotalPlayers, View::text(format_number(stats.total_players))),
        (Region::BlocksBroken, View::text(format_number(stats.total_blocks_broken))),
        (Region::BlocksPlaced, View::text(format_number(stats.total_blocks_placed))),
        (Region::DistanceTraveled, View::text(distance)),
        (
            Region::BiomesDiscovered,
            View::text(format_number(stats.unique_biomes_discovered)),
        ),
        (Region::BiomesList, biomes),
    ]
}

pub fn leaderboard_view(response: &LeaderboardResponse) -> View {
    if response.leaderboard.is_empty() {
        return View::placeholder("No data available");
    }

    let rows = response
        .leaderboard
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let rank = index + 1;
            let mut rank_cell = Cell::new(rank.to_string());
            if rank <= 3 {
                rank_cell = rank_cell.with_class(format!("rank-{}", rank));
            }
            TableRow {
                cells: vec![
                    rank_cell,
                    Cell::new(non_empty(row.name.as_deref()).unwrap_or("Unknown")),
                    Cell::new(format_duration(row.playtime_ms.unwrap_or(0))),
                    Cell::new(format_number(row.blocks_broken.unwrap_or(0))),
                    Cell::new(format_number(row.deaths.unwrap_or(0))),
                    Cell::new(format_number(row.mob_kills.unwrap_or(0))),
                ],
                link: None,
            }
        })
        .collect();
    View::Table(rows)
}

pub fn moments_view(response: &MomentsResponse, now: DateTime<Utc>) -> View {
    if response.moments.is_empty() {
        return View::placeholder("No moments recorded yet");
    }

    View::Cards(
        response
            .moments
            .iter()
            .map(|moment| Card {
                icon: None,
                title: moment.title.clone().unwrap_or_default(),
                lines: vec![moment.detail.clone().unwrap_or_default()],
                meta: vec![
                    moment.position.label(),
                    format_timestamp(moment.ended_at, now),
                ],
            })
            .collect(),
    )
}

fn megabytes(bytes: Option<i64>) -> Option<f64> {
    bytes.map(|b| round_half_up(b as f64 / BYTES_PER_MB))
}

/// Health gauges. `None` is the "no sample yet" answer and leaves the bar alone.
pub fn health_views(snapshot: Option<&HealthSnapshot>) -> Vec<(Region, View)> {
    let Some(health) = snapshot else {
        return vec![
            (Region::HealthChunks, View::text("-")),
            (Region::HealthEntities, View::text("-")),
            (Region::HealthHoppers, View::text("-")),
            (Region::HealthRedstone, View::text("-")),
            (Region::HealthTps, View::text("-")),
            (Region::HealthMemory, View::text("-")),
            (Region::CostIndexValue, View::text("No data yet")),
        ];
    };

    let cost = health.cost_index.unwrap_or(0.0);
    let tps = health.tps.map(fixed_one).unwrap_or_else(|| "-".to_string());
    let memory = match (megabytes(health.memory_used), megabytes(health.memory_max)) {
        (Some(used), Some(max)) => format!("{} / {} MB", used, max),
        _ => "-".to_string(),
    };

    vec![
        (Region::HealthChunks, View::text(format_number(health.chunks))),
        (Region::HealthEntities, View::text(format_number(health.entities))),
        (Region::HealthHoppers, View::text(format_number(health.hoppers))),
        (Region::HealthRedstone, View::text(format_number(health.redstone))),
        (Region::HealthTps, View::text(tps)),
        (Region::HealthMemory, View::text(memory)),
        (Region::CostIndexFill, View::Meter(cost.min(100.0))),
        (
            Region::CostIndexValue,
            View::text(format!("{} / 100", fixed_one(cost))),
        ),
    ]
}

pub fn heatmap_view(response: &HeatmapResponse) -> View {
    match rasterize(&response.bins) {
        Some(image) => View::Heatmap(image),
        None => View::placeholder("No data for this heatmap"),
    }
}

pub fn social_view(response: &SocialResponse) -> View {
    if response.pairs.is_empty() {
        return View::placeholder("No social data yet");
    }

    View::Table(
        response
            .pairs
            .iter()
            .map(|pair| TableRow {
                cells: vec![
                    Cell::new(format!(
                        "{} & {}",
                        pair.player_a.name.as_deref().unwrap_or_default(),
                        pair.player_b.name.as_deref().unwrap_or_default()
                    )),
                    Cell::new(format_duration(pair.time_together_seconds * 1000)),
                    Cell::new(format_number(pair.shared_kills)),
                ],
                link: None,
            })
            .collect(),
    )
}

pub fn deaths_view(response: &DeathsResponse, now: DateTime<Utc>) -> View {
    if response.deaths.is_empty() {
        return View::placeholder("No death replays yet");
    }

    View::Cards(
        response
            .deaths
            .iter()
            .map(|death| {
                let mut lines = vec![non_empty(death.cause.as_deref())
                    .unwrap_or("Unknown cause")
                    .to_string()];
                if !death.nearby_players.is_empty() {
                    lines.push(format!("Nearby: {}", death.nearby_players.join(", ")));
                }
                Card {
                    icon: Some("💀".to_string()),
                    title: death.name.clone().unwrap_or_default(),
                    lines,
                    meta: vec![death.position.label(), format_timestamp(death.timestamp, now)],
                }
            })
            .collect(),
    )
}

pub fn players_view(players: &[&PlayerRecord], now: DateTime<Utc>) -> View {
    if players.is_empty() {
        return View::placeholder("No players found");
    }

    View::Table(
        players
            .iter()
            .map(|player| TableRow {
                cells: vec![
                    Cell::new(player.name.clone()),
                    Cell::new(format_duration(player.playtime_millis)),
                    Cell::new(format_number(player.deaths)),
                    Cell::new(format_number(player.total_kills())),
                    Cell::new(format_timestamp(player.last_join, now)),
                ],
                link: player.uuid,
            })
            .collect(),
    )
}

pub fn player_detail_view(player: Option<&PlayerRecord>, now: DateTime<Utc>) -> View {
    let Some(player) = player else {
        return View::placeholder("Player not found");
    };

    let km = |blocks: f64| format!("{} km", fixed_one(blocks / 1000.0));
    let biomes = if player.biomes_visited.is_empty() {
        "-".to_string()
    } else {
        player
            .biomes_visited
            .iter()
            .map(|biome| format_biome_name(biome))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let rows = [
        ("Name", player.name.clone()),
        ("First join", format_timestamp(player.first_join, now)),
        ("Last join", format_timestamp(player.last_join, now)),
        ("Playtime", format_duration(player.playtime_millis)),
        ("Deaths", format_number(player.deaths)),
        (
            "Last death cause",
            non_empty(player.last_death_cause.as_deref())
                .unwrap_or("-")
                .to_string(),
        ),
        ("Player kills", format_number(player.player_kills)),
        ("Mob kills", format_number(player.mob_kills)),
        ("Blocks placed", format_number(player.blocks_placed)),
        ("Blocks broken", format_number(player.blocks_broken)),
        ("Overworld distance", km(player.distance_overworld)),
        ("Nether distance", km(player.distance_nether)),
        ("End distance", km(player.distance_end)),
        ("Biomes visited", biomes),
        ("Damage dealt", format_number(player.damage_dealt)),
        ("Damage taken", format_number(player.damage_taken)),
        ("Items crafted", format_number(player.items_crafted)),
        ("Items consumed", format_number(player.items_consumed)),
    ];

    View::Details(
        rows.into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    )
}
