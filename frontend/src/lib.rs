use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::components::login_modal::LoginModal;
use crate::components::nav::Nav;
use crate::dashboard::DashboardProvider;
use crate::pages::{admin::AdminPage, leaderboard::Leaderboard, moments::Moments, overview::Overview};

pub mod api;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod pages {
    pub mod admin;
    pub mod leaderboard;
    pub mod moments;
    pub mod overview;
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <DashboardProvider>
            <div class="app-container">
                <Nav />
                <main class="main-content">
                    <Overview />
                    <Leaderboard />
                    <Moments />
                    <AdminPage />
                </main>
                <LoginModal />
            </div>
        </DashboardProvider>
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    console_error_panic_hook::set_once();

    info!("Mounting dashboard (api base: {:?})", config::Config::api_base_url());
    yew::Renderer::<App>::new().render();

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        run_app().await.expect("Failed to run app");
    });
    Ok(())
}
