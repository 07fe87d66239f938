use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use log::{debug, info};
use shared::{DashboardController, DashboardState, Region, RenderTarget, View};
use wasm_bindgen_futures::spawn_local;
use yew::functional::use_reducer_eq;
use yew::prelude::*;

use crate::api::GlooTransport;
use crate::config::Config;

pub type Controller = DashboardController<GlooTransport, YewTarget>;

/// Everything the page renders from: app state plus the latest view per region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStore {
    pub state: DashboardState,
    pub regions: HashMap<Region, View>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreAction {
    Sync(DashboardState),
    Render(Region, View),
}

impl Reducible for DashboardStore {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            StoreAction::Sync(state) => {
                if state == self.state {
                    return self;
                }
                let mut regions = self.regions.clone();
                if !state.is_admin {
                    regions.retain(|region, _| !region.is_admin_only());
                }
                Rc::new(Self { state, regions })
            }
            StoreAction::Render(region, view) => {
                let mut regions = self.regions.clone();
                regions.insert(region, view);
                Rc::new(Self {
                    state: self.state.clone(),
                    regions,
                })
            }
        }
    }
}

/// Feeds controller output into the Yew store.
pub struct YewTarget {
    dispatcher: UseReducerDispatcher<DashboardStore>,
}

impl YewTarget {
    pub fn new(dispatcher: UseReducerDispatcher<DashboardStore>) -> Self {
        Self { dispatcher }
    }
}

impl RenderTarget for YewTarget {
    fn set_content(&self, region: Region, view: View) {
        self.dispatcher.dispatch(StoreAction::Render(region, view));
    }

    fn apply_state(&self, state: &DashboardState) {
        self.dispatcher.dispatch(StoreAction::Sync(state.clone()));
    }
}

#[derive(Clone)]
pub struct DashboardContext {
    pub store: UseReducerHandle<DashboardStore>,
    pub controller: Rc<Controller>,
}

impl PartialEq for DashboardContext {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && Rc::ptr_eq(&self.controller, &other.controller)
    }
}

impl DashboardContext {
    pub fn state(&self) -> &DashboardState {
        &self.store.state
    }

    pub fn view(&self, region: Region) -> Option<&View> {
        self.store.regions.get(&region)
    }

    /// Runs a controller flow on the browser event loop.
    pub fn spawn<F, Fut>(&self, flow: F)
    where
        F: FnOnce(Rc<Controller>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(flow(self.controller.clone()));
    }
}

/// Wall clock from the browser, for relative timestamps.
pub fn browser_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[derive(Properties, Clone, PartialEq)]
pub struct DashboardProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(DashboardProvider)]
pub fn dashboard_provider(props: &DashboardProviderProps) -> Html {
    let store = use_reducer_eq(DashboardStore::default);

    let controller = {
        let dispatcher = store.dispatcher();
        use_memo((), move |_| {
            DashboardController::new(GlooTransport::new(), YewTarget::new(dispatcher))
                .with_clock(browser_now)
        })
    };

    // Boot once, then keep the online list fresh
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            {
                let controller = controller.clone();
                spawn_local(async move {
                    controller.init().await;
                    info!("Dashboard ready");
                });
            }

            let interval = Interval::new(Config::refresh_interval_ms(), move || {
                let controller = controller.clone();
                spawn_local(async move {
                    controller.poll().await;
                });
            });
            debug!("Polling every {} ms", Config::refresh_interval_ms());

            move || {
                interval.cancel();
            }
        });
    }

    let context = DashboardContext { store, controller };

    html! {
        <ContextProvider<DashboardContext> context={context}>
            {props.children.clone()}
        </ContextProvider<DashboardContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared::{DashboardAction, Section};

    #[test]
    fn test_render_replaces_region() {
        let store = Rc::new(DashboardStore::default());
        let store = store.reduce(StoreAction::Render(Region::OnlineCount, View::text("3")));
        let store = store.reduce(StoreAction::Render(Region::OnlineCount, View::text("4")));
        assert_eq!(store.regions.get(&Region::OnlineCount), Some(&View::text("4")));
        assert_eq!(store.regions.len(), 1);
    }

    #[test]
    fn test_sync_keeps_regions() {
        let store = Rc::new(DashboardStore::default())
            .reduce(StoreAction::Render(Region::Moments, View::placeholder("No moments recorded yet")));
        let state = DashboardState::default().reduce(DashboardAction::Navigate(Section::Moments));

        let store = store.reduce(StoreAction::Sync(state.clone()));

        assert_eq!(store.state, state);
        assert!(store.regions.contains_key(&Region::Moments));
    }

    #[test]
    fn test_logout_sync_drops_admin_regions() {
        let admin = DashboardState::default().reduce(DashboardAction::AuthChecked(true));
        let store = Rc::new(DashboardStore::default())
            .reduce(StoreAction::Sync(admin.clone()))
            .reduce(StoreAction::Render(Region::Players, View::placeholder("No players found")))
            .reduce(StoreAction::Render(Region::OnlineCount, View::text("2")));

        let store = store.reduce(StoreAction::Sync(admin.reduce(DashboardAction::LoggedOut)));

        assert!(!store.regions.contains_key(&Region::Players));
        assert_eq!(store.regions.get(&Region::OnlineCount), Some(&View::text("2")));
    }

    #[test]
    fn test_identical_sync_is_a_no_op() {
        let store = Rc::new(DashboardStore::default());
        let same = store.clone().reduce(StoreAction::Sync(DashboardState::default()));
        assert!(Rc::ptr_eq(&store, &same));
    }
}
