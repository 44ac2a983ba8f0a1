use std::{collections::HashMap, path::PathBuf, sync::Arc, time::SystemTime};

use dioxus::{prelude::*, signals::Signal};
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::{
    domain::{AppState, DataSources, FreightChart, FreightSeries, LoadState, TradeTable},
    infra::{load_freight_series, load_trade_table, LoadError, Loaded},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{FreightPage, RankingPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Ranking {},
    #[route("/freight")]
    Freight {},
    #[route("/settings")]
    Settings {},
}

/// Bumping the generation re-reads every data file from `AppState::sources`.
#[derive(Clone, Copy)]
pub struct DataReload(Signal<u64>);

impl DataReload {
    pub fn request(mut self) {
        self.0.with_mut(|generation| *generation += 1);
    }
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state;
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let generation = use_signal(|| 0u64);
    use_context_provider(|| DataReload(generation));

    let _sources = use_resource(move || async move {
        let generation = generation();
        // peek: loading writes back into `state` and must not re-trigger itself.
        let sources = state.peek().sources.clone();
        info!(generation, "loading data sources");
        load_sources(state, toasts, sources).await;
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!("failed to persist user state: {err}");
    }
}

async fn load_sources(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    sources: DataSources,
) {
    state.with_mut(|st| {
        st.trade = LoadState::NotLoaded;
        st.freight.clear();
    });

    let trade_path = sources.trade_table.clone();
    let trade = into_load_state(
        &sources.trade_table,
        tokio::task::spawn_blocking(move || load_trade_table(&trade_path)).await,
    );
    match &trade {
        LoadState::Loaded { skipped_rows, .. } if *skipped_rows > 0 => push_toast(
            toasts,
            ToastKind::Warning,
            format!("Skipped {skipped_rows} rows without a numeric HS code."),
        ),
        LoadState::Failed(message) => push_toast(
            toasts,
            ToastKind::Error,
            format!("Failed to load trade table: {message}"),
        ),
        _ => {}
    }
    state.with_mut(|st| st.trade = trade);

    let mut freight: HashMap<FreightChart, LoadState<FreightSeries>> = HashMap::new();
    for (chart, path) in freight_paths(&sources) {
        let task_path = path.clone();
        let loaded = into_load_state(
            &path,
            tokio::task::spawn_blocking(move || load_freight_series(&task_path)).await,
        );
        freight.insert(chart, loaded);
    }
    let failures = freight.values().filter(|st| st.error().is_some()).count();
    if failures > 0 {
        push_toast(
            toasts,
            ToastKind::Warning,
            format!("{failures} freight file(s) could not be loaded."),
        );
    }
    state.with_mut(|st| st.freight = freight);
}

pub fn freight_paths(sources: &DataSources) -> [(FreightChart, PathBuf); 3] {
    [
        (FreightChart::SeaExport, sources.sea_export.clone()),
        (FreightChart::SeaImport, sources.sea_import.clone()),
        (FreightChart::Air, sources.air.clone()),
    ]
}

fn into_load_state<T>(
    path: &std::path::Path,
    outcome: Result<Result<Loaded<T>, LoadError>, JoinError>,
) -> LoadState<T> {
    match outcome {
        Ok(Ok(loaded)) => LoadState::Loaded {
            data: Arc::new(loaded.data),
            loaded_at: SystemTime::now(),
            skipped_rows: loaded.skipped_rows,
        },
        Ok(Err(err)) => {
            warn!(path = %path.display(), "load failed: {err}");
            LoadState::Failed(err.to_string())
        }
        Err(err) => {
            warn!(path = %path.display(), "load task aborted: {err}");
            LoadState::Failed(format!("load task aborted: {err}"))
        }
    }
}

/// Trade table of the current session, if it loaded.
pub fn current_table(state: &Signal<AppState>) -> Option<Arc<TradeTable>> {
    state.with(|st| st.trade_table())
}

#[component]
pub fn Ranking() -> Element {
    rsx! { Shell { RankingPage {} } }
}

#[component]
pub fn Freight() -> Element {
    rsx! { Shell { FreightPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn load_errors_become_failed_states() {
        let outcome: Result<Result<Loaded<TradeTable>, LoadError>, JoinError> =
            Ok(Err(LoadError::MissingColumn("HS코드")));
        let state = into_load_state(Path::new("x.csv"), outcome);
        assert_eq!(state.error(), Some("missing required column 'HS코드'"));
    }

    #[test]
    fn loaded_data_is_shared() {
        let outcome = Ok(Ok(Loaded {
            data: TradeTable::default(),
            skipped_rows: 2,
        }));
        let state = into_load_state(Path::new("x.csv"), outcome);
        assert!(state.data().is_some());
        assert!(matches!(state, LoadState::Loaded { skipped_rows: 2, .. }));
    }

    #[test]
    fn every_freight_chart_has_a_path() {
        let paths = freight_paths(&DataSources::default());
        assert_eq!(paths[2], (FreightChart::Air, PathBuf::from("cost_air.csv")));
    }
}
