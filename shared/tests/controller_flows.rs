#![cfg(not(target_arch = "wasm32"))]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

use smpstats_shared::api::HttpResponse;
use smpstats_shared::{
    AdminTab, DashboardController, DashboardError, MemoryTarget, Region, Result, Section,
    Transport, View,
};

#[derive(Clone)]
enum Reply {
    Status(u16, String),
    Offline,
}

#[derive(Default)]
struct FakeTransport {
    replies: RefCell<HashMap<String, Reply>>,
    delays: RefCell<HashMap<String, u64>>,
    calls: RefCell<Vec<String>>,
    posted: RefCell<Vec<String>>,
}

impl FakeTransport {
    fn reply(&self, path: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .insert(path.to_string(), Reply::Status(status, body.to_string()));
    }

    fn offline(&self, path: &str) {
        self.replies.borrow_mut().insert(path.to_string(), Reply::Offline);
    }

    fn delay(&self, path: &str, millis: u64) {
        self.delays.borrow_mut().insert(path.to_string(), millis);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn call_count(&self, path: &str) -> usize {
        self.calls.borrow().iter().filter(|p| p.as_str() == path).count()
    }

    async fn answer(&self, path: &str) -> Result<HttpResponse> {
        self.calls.borrow_mut().push(path.to_string());
        let delay = self.delays.borrow().get(path).copied();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
        let reply = self.replies.borrow().get(path).cloned();
        match reply {
            Some(Reply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Offline) => Err(DashboardError::Network("connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"error":"Not found"}"#.to_string(),
            }),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.answer(path).await
    }

    async fn post_json(&self, path: &str, body: String) -> Result<HttpResponse> {
        self.posted.borrow_mut().push(body);
        self.answer(path).await
    }
}

fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap()
}

type Controller = DashboardController<Rc<FakeTransport>, Rc<MemoryTarget>>;

fn setup() -> (Rc<FakeTransport>, Rc<MemoryTarget>, Controller) {
    let transport = Rc::new(FakeTransport::default());
    let target = Rc::new(MemoryTarget::new());
    let controller =
        DashboardController::new(transport.clone(), target.clone()).with_clock(fixed_now);
    (transport, target, controller)
}

const ALL_ENABLED: &str = r#"{"publicEnabled":true,"showOnlinePlayers":true,"showLeaderboards":true,"showRecentMoments":true,"showServerStats":true,"adminEnabled":true}"#;

fn public_server(transport: &FakeTransport) {
    transport.reply("/api/public/config", 200, ALL_ENABLED);
    transport.reply("/api/admin/check", 200, r#"{"authenticated":false,"adminEnabled":true}"#);
    transport.reply("/api/public/online", 200, r#"{"count":0,"players":[]}"#);
    transport.reply(
        "/api/public/stats",
        200,
        r#"{"totalPlaytimeHours":12,"totalDeaths":3,"totalPlayerKills":1,"totalMobKills":4,
            "totalPlayers":2,"totalBlocksBroken":1500,"totalBlocksPlaced":20,
            "totalDistanceKm":3.4,"uniqueBiomesDiscovered":0,"biomesList":[]}"#,
    );
}

fn admin_server(transport: &FakeTransport) {
    public_server(transport);
    transport.reply("/api/admin/check", 200, r#"{"authenticated":true,"adminEnabled":true}"#);
    transport.reply("/api/admin/health", 404, r#"{"error":"No health data"}"#);
}

#[test_log::test(tokio::test)]
async fn test_init_renders_overview() {
    let (transport, target, controller) = setup();
    public_server(&transport);

    controller.init().await;

    assert_eq!(target.text(Region::OnlineCount).as_deref(), Some("0"));
    assert_eq!(target.text(Region::OnlineList).as_deref(), Some("No players online"));
    assert_eq!(target.text(Region::TotalPlaytime).as_deref(), Some("12h"));
    assert_eq!(target.text(Region::TotalKills).as_deref(), Some("5"));
    assert_eq!(target.text(Region::BlocksBroken).as_deref(), Some("1.5K"));
    assert_eq!(target.text(Region::DistanceTraveled).as_deref(), Some("3 km"));
    assert_eq!(
        target.text(Region::BiomesList).as_deref(),
        Some("No biomes discovered yet")
    );

    let state = target.last_state().unwrap();
    assert!(state.is_active(Section::Overview));
    assert!(!state.is_admin);
    assert!(state.is_login_button_visible());
}

#[test_log::test(tokio::test)]
async fn test_config_failure_enables_everything() {
    let (transport, target, controller) = setup();
    public_server(&transport);
    transport.offline("/api/public/config");

    controller.init().await;

    let state = controller.state();
    assert!(state.config.unwrap().show_leaderboards);
    assert!(state.is_nav_visible(Section::Leaderboard));
    assert!(state.is_nav_visible(Section::Moments));
    assert_eq!(target.text(Region::OnlineCount).as_deref(), Some("0"));
}

#[test_log::test(tokio::test)]
async fn test_disabled_features_are_not_fetched() {
    let (transport, target, controller) = setup();
    public_server(&transport);
    transport.reply(
        "/api/public/config",
        200,
        r#"{"showOnlinePlayers":false,"showServerStats":false,"showLeaderboards":false,"adminEnabled":false}"#,
    );

    controller.init().await;

    assert_eq!(transport.call_count("/api/public/online"), 0);
    assert_eq!(transport.call_count("/api/public/stats"), 0);
    assert_eq!(target.view(Region::OnlineCount), None);

    let state = controller.state();
    assert!(!state.is_nav_visible(Section::Leaderboard));
    assert!(state.is_nav_visible(Section::Moments));
    assert!(!state.is_login_button_visible());
}

#[test_log::test(tokio::test)]
async fn test_auth_check_failure_is_anonymous() {
    let (transport, _target, controller) = setup();
    public_server(&transport);
    transport.offline("/api/admin/check");

    controller.init().await;

    assert!(!controller.state().is_admin);
}

#[test_log::test(tokio::test)]
async fn test_leaderboard_defaults() {
    let (transport, target, controller) = setup();
    public_server(&transport);
    transport.reply(
        "/api/public/leaderboard?days=7&limit=10",
        200,
        r#"{"days":7,"leaderboard":[{"uuid":"u1","name":"Alice","playtime_ms":90000000,
            "blocks_broken":12,"deaths":1,"mob_kills":40}]}"#,
    );

    controller.load_config().await;
    controller.show_section(Section::Leaderboard).await;

    assert!(transport.calls().contains(&"/api/public/leaderboard?days=7&limit=10".to_string()));
    let Some(View::Table(rows)) = target.view(Region::Leaderboard) else {
        panic!("expected leaderboard rows");
    };
    assert_eq!(rows[0].texts(), vec!["1", "Alice", "25h 0m", "12", "1", "40"]);
    assert_eq!(rows[0].cells[0].class.as_deref(), Some("rank-1"));
}

#[test_log::test(tokio::test)]
async fn test_leaderboard_filters_refetch() {
    let (transport, _target, controller) = setup();
    public_server(&transport);
    transport.reply("/api/public/leaderboard?days=30&limit=10", 200, r#"{"leaderboard":[]}"#);
    transport.reply("/api/public/leaderboard?days=30&limit=50", 200, r#"{"leaderboard":[]}"#);

    controller.set_leaderboard_days(Some(30)).await;
    controller.set_leaderboard_limit(Some(50)).await;

    assert_eq!(
        transport.calls(),
        vec![
            "/api/public/leaderboard?days=30&limit=10".to_string(),
            "/api/public/leaderboard?days=30&limit=50".to_string(),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_moments_render_cards() {
    let (transport, target, controller) = setup();
    transport.reply(
        "/api/public/moments?limit=5",
        200,
        r#"{"moments":[{"id":1,"type":"diamond_run","title":"Diamond rush","detail":"12 diamonds",
            "world":"world","x":1,"y":12,"z":-3,"startedAt":1699999000000,"endedAt":1699999700000}]}"#,
    );

    controller.set_moments_limit(Some(5)).await;

    let Some(View::Cards(cards)) = target.view(Region::Moments) else {
        panic!("expected moment cards");
    };
    assert_eq!(cards[0].title, "Diamond rush");
    assert_eq!(cards[0].meta, vec!["world (1, 12, -3)".to_string(), "5m ago".to_string()]);
}

#[test_log::test(tokio::test)]
async fn test_anonymous_cannot_open_admin() {
    let (transport, _target, controller) = setup();
    public_server(&transport);
    controller.init().await;
    controller.show_section(Section::Moments).await;
    let before = transport.calls().len();

    controller.show_section(Section::Admin).await;

    assert!(controller.state().is_active(Section::Moments));
    assert_eq!(transport.calls().len(), before);

    controller.select_admin_tab(AdminTab::Social).await;
    assert_eq!(transport.call_count("/api/admin/social?limit=20"), 0);
}

#[test_log::test(tokio::test)]
async fn test_health_without_sample() {
    let (transport, target, controller) = setup();
    admin_server(&transport);
    controller.init().await;

    controller.show_section(Section::Admin).await;

    for region in [
        Region::HealthChunks,
        Region::HealthEntities,
        Region::HealthHoppers,
        Region::HealthRedstone,
    ] {
        assert_eq!(target.text(region).as_deref(), Some("-"));
    }
    assert_eq!(target.text(Region::CostIndexValue).as_deref(), Some("No data yet"));
    assert_eq!(target.view(Region::CostIndexFill), None);
    assert_eq!(controller.state().admin_tab, AdminTab::Health);
}

#[test_log::test(tokio::test)]
async fn test_health_snapshot() {
    let (transport, target, controller) = setup();
    admin_server(&transport);
    transport.reply(
        "/api/admin/health",
        200,
        r#"{"timestamp":1699999999000,"tps":19.5,"memoryUsed":1073741824,"memoryMax":2147483648,
            "chunks":800,"entities":1200,"hoppers":40,"redstone":12,"costIndex":37.5}"#,
    );
    controller.init().await;

    controller.show_section(Section::Admin).await;

    assert_eq!(target.text(Region::HealthEntities).as_deref(), Some("1.2K"));
    assert_eq!(target.text(Region::HealthTps).as_deref(), Some("19.5"));
    assert_eq!(target.text(Region::HealthMemory).as_deref(), Some("1024 / 2048 MB"));
    assert_eq!(target.view(Region::CostIndexFill), Some(View::Meter(37.5)));
    assert_eq!(target.text(Region::CostIndexValue).as_deref(), Some("37.5 / 100"));
}

#[test_log::test(tokio::test)]
async fn test_login_success_loads_admin() {
    let (transport, target, controller) = setup();
    public_server(&transport);
    transport.reply("/api/admin/login", 200, r#"{"success":true,"expiresIn":86400}"#);
    controller.init().await;
    controller.open_login_modal();

    let outcome = controller.login("hunter2").await;

    assert!(outcome.success);
    assert_eq!(outcome.error, None);
    assert_eq!(
        transport.posted.borrow().as_slice(),
        &[r#"{"password":"hunter2"}"#.to_string()]
    );
    let state = target.last_state().unwrap();
    assert!(state.is_admin);
    assert!(!state.login_modal_open);
    assert!(state.is_nav_visible(Section::Admin));
    assert_eq!(transport.call_count("/api/admin/health"), 1);
}

#[test_log::test(tokio::test)]
async fn test_login_rejection_message() {
    let (transport, _target, controller) = setup();
    transport.reply("/api/admin/login", 401, r#"{"error":"Invalid password"}"#);

    let outcome = controller.login("wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid password"));
    let state = controller.state();
    assert!(!state.is_admin);
    assert_eq!(state.login_error.as_deref(), Some("Invalid password"));
}

#[test_log::test(tokio::test)]
async fn test_login_rejection_without_body() {
    let (transport, _target, controller) = setup();
    transport.reply("/api/admin/login", 500, "oops");

    let outcome = controller.login("pw").await;

    assert_eq!(outcome.error.as_deref(), Some("Login failed"));
}

#[test_log::test(tokio::test)]
async fn test_login_network_error() {
    let (transport, _target, controller) = setup();
    transport.offline("/api/admin/login");

    let outcome = controller.login("pw").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Network error"));
}

#[test_log::test(tokio::test)]
async fn test_logout_always_clears_admin() {
    let (transport, _target, controller) = setup();
    admin_server(&transport);
    transport.offline("/api/admin/logout");
    controller.init().await;
    controller.show_section(Section::Admin).await;
    assert!(controller.state().is_active(Section::Admin));

    controller.logout().await;

    let state = controller.state();
    assert!(!state.is_admin);
    assert!(state.is_active(Section::Overview));
    assert!(!state.is_nav_visible(Section::Admin));
}

#[test_log::test(tokio::test)]
async fn test_logout_forgets_roster_and_tab() {
    let (transport, _target, controller) = setup();
    admin_server(&transport);
    transport.reply(
        "/api/admin/player/all",
        200,
        r#"{"players":[{"uuid":"8667ba71-b85a-4004-af54-457a9734eed7","name":"Alice"}]}"#,
    );
    controller.init().await;
    controller.select_admin_tab(AdminTab::Players).await;
    controller.filter_players("ali");
    assert!(controller.state().roster.is_some());

    controller.logout().await;

    let state = controller.state();
    assert_eq!(state.roster, None);
    assert_eq!(state.player_search, "");
    assert_eq!(state.admin_tab, AdminTab::Health);
}

#[test_log::test(tokio::test)]
async fn test_player_search_uses_cache() {
    let (transport, target, controller) = setup();
    admin_server(&transport);
    transport.reply(
        "/api/admin/player/all",
        200,
        r#"{"players":[
            {"uuid":"8667ba71-b85a-4004-af54-457a9734eed7","name":"Alice","playtimeMillis":3600000,"deaths":2,"playerKills":1,"mobKills":2},
            {"uuid":"11111111-2222-3333-4444-555555555555","name":"Bob","playtimeMillis":0},
            {"uuid":"66666666-7777-8888-9999-000000000000","name":"Malice","playtimeMillis":60000}
        ]}"#,
    );
    controller.init().await;
    controller.select_admin_tab(AdminTab::Players).await;

    controller.filter_players("ali");

    let Some(View::Table(rows)) = target.view(Region::Players) else {
        panic!("expected player rows");
    };
    let names: Vec<&str> = rows.iter().map(|r| r.cells[0].text.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Malice"]);
    assert_eq!(rows[0].texts()[1..4].to_vec(), vec!["1h 0m", "2", "3"]);

    controller.filter_players("zzz");
    assert_eq!(target.text(Region::Players).as_deref(), Some("No players found"));

    controller.filter_players("");
    let Some(View::Table(rows)) = target.view(Region::Players) else {
        panic!("expected player rows");
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(transport.call_count("/api/admin/player/all"), 1);
}

#[test_log::test(tokio::test)]
async fn test_search_before_roster_is_ignored() {
    let (_transport, target, controller) = setup();

    controller.filter_players("ali");

    assert_eq!(target.view(Region::Players), None);
    assert_eq!(controller.state().player_search, "ali");
}

#[test_log::test(tokio::test)]
async fn test_player_detail() {
    let (transport, target, controller) = setup();
    let uuid = uuid::Uuid::parse_str("8667ba71-b85a-4004-af54-457a9734eed7").unwrap();
    transport.reply(
        &format!("/api/admin/player/{}", uuid),
        200,
        r#"{"uuid":"8667ba71-b85a-4004-af54-457a9734eed7","name":"Alice","deaths":3,"lastDeathCause":"Lava"}"#,
    );

    controller.show_player(uuid).await;
    let Some(View::Details(rows)) = target.view(Region::PlayerDetail) else {
        panic!("expected player details");
    };
    assert!(rows.contains(&("Last death cause".to_string(), "Lava".to_string())));

    let missing = uuid::Uuid::nil();
    controller.show_player(missing).await;
    assert_eq!(target.text(Region::PlayerDetail).as_deref(), Some("Player not found"));
}

#[test_log::test(tokio::test)]
async fn test_heatmap_flow() {
    let (transport, target, controller) = setup();
    transport.reply(
        "/api/admin/heatmap?type=DEATH&world=world_nether",
        200,
        r#"{"type":"DEATH","world":"world_nether","gridSize":16,
            "bins":[{"chunkX":0,"chunkZ":0,"count":2},{"chunkX":1,"chunkZ":1,"count":4}]}"#,
    );
    controller.set_heatmap_type(Some("DEATH".to_string()));
    controller.set_heatmap_world(Some("world_nether".to_string()));

    controller.load_heatmap().await;

    let Some(View::Heatmap(image)) = target.view(Region::Heatmap) else {
        panic!("expected a heatmap");
    };
    assert_eq!((image.width, image.height), (8, 8));
    assert!(controller.state().heatmap_legend_visible);
    assert_eq!(
        target.writes(),
        vec![Region::Heatmap, Region::Heatmap],
        "loading placeholder first, then the image"
    );
}

#[test_log::test(tokio::test)]
async fn test_heatmap_failure_and_empty() {
    let (transport, target, controller) = setup();
    transport.offline("/api/admin/heatmap?type=MINING&world=world");

    controller.load_heatmap().await;
    assert_eq!(target.text(Region::Heatmap).as_deref(), Some("Failed to load heatmap"));
    assert!(!controller.state().heatmap_legend_visible);

    transport.reply("/api/admin/heatmap?type=MINING&world=world", 200, r#"{"bins":[]}"#);
    controller.load_heatmap().await;
    assert_eq!(target.text(Region::Heatmap).as_deref(), Some("No data for this heatmap"));
}

#[test_log::test(tokio::test)]
async fn test_social_and_deaths_tabs() {
    let (transport, target, controller) = setup();
    admin_server(&transport);
    transport.reply(
        "/api/admin/social?limit=20",
        200,
        r#"{"pairs":[{"playerA":{"uuid":"a","name":"Alice"},"playerB":{"uuid":"b","name":"Bob"},
            "timeTogetherSeconds":7200,"sharedKills":3}]}"#,
    );
    transport.reply("/api/admin/deaths?limit=20", 200, r#"{"deaths":[]}"#);
    controller.init().await;

    controller.select_admin_tab(AdminTab::Social).await;
    controller.select_admin_tab(AdminTab::Deaths).await;

    let Some(View::Table(rows)) = target.view(Region::Social) else {
        panic!("expected social rows");
    };
    assert_eq!(rows[0].texts(), vec!["Alice & Bob", "2h 0m", "3"]);
    assert_eq!(target.text(Region::Deaths).as_deref(), Some("No death replays yet"));
    assert_eq!(controller.state().admin_tab, AdminTab::Deaths);
}

#[test_log::test(tokio::test)]
async fn test_stale_leaderboard_response_is_discarded() {
    let (transport, target, controller) = setup();
    transport.reply(
        "/api/public/leaderboard?days=30&limit=10",
        200,
        r#"{"leaderboard":[{"name":"Slow"}]}"#,
    );
    transport.delay("/api/public/leaderboard?days=30&limit=10", 50);
    transport.reply(
        "/api/public/leaderboard?days=1&limit=10",
        200,
        r#"{"leaderboard":[{"name":"Fast"}]}"#,
    );

    futures::join!(
        controller.set_leaderboard_days(Some(30)),
        controller.set_leaderboard_days(Some(1)),
    );

    let Some(View::Table(rows)) = target.view(Region::Leaderboard) else {
        panic!("expected leaderboard rows");
    };
    assert_eq!(rows[0].cells[1].text, "Fast");
    assert_eq!(target.writes(), vec![Region::Leaderboard]);
}

#[test_log::test(tokio::test)]
async fn test_poll_refreshes_only_on_overview() {
    let (transport, _target, controller) = setup();
    public_server(&transport);
    transport.reply("/api/public/moments?limit=20", 200, r#"{"moments":[]}"#);
    controller.init().await;

    controller.poll().await;
    assert_eq!(transport.call_count("/api/public/online"), 2);

    controller.show_section(Section::Moments).await;
    controller.poll().await;
    assert_eq!(transport.call_count("/api/public/online"), 2);
}

#[test_log::test(tokio::test)]
async fn test_biomes_toggle_and_modal() {
    let (_transport, target, controller) = setup();

    controller.toggle_biomes();
    assert!(target.last_state().unwrap().biomes_expanded);

    controller.open_login_modal();
    assert!(controller.state().login_modal_open);
    controller.close_login_modal();
    assert!(!controller.state().login_modal_open);
}
