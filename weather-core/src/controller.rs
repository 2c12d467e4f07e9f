use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::Local;
use parking_lot::Mutex;

use crate::{
    error::WeatherError,
    geolocation::Geolocator,
    model::LocationQuery,
    provider::WeatherProvider,
    render::{Renderer, ViewBindings},
    theme::{Theme, ThemeStore, toggle_stored},
};

/// What happened to one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The bundle was drawn.
    Rendered,
    /// The query failed and the error panel was drawn.
    Failed(WeatherError),
    /// A newer query was issued while this one was in flight; nothing was drawn.
    Stale,
    /// Blank input, nothing to look up.
    Skipped,
}

struct ViewState<V> {
    renderer: Renderer<V>,
    in_flight: usize,
}

/// Wires user actions (search, locate, theme toggle) to the provider and the renderer.
pub struct AppController<P, V, T, G> {
    provider: P,
    state: Mutex<ViewState<V>>,
    themes: T,
    geolocator: G,
    generation: AtomicU64,
}

impl<P, V, T, G> AppController<P, V, T, G>
where
    P: WeatherProvider,
    V: ViewBindings,
    T: ThemeStore,
    G: Geolocator,
{
    pub fn new(provider: P, view: V, themes: T, geolocator: G) -> Self {
        Self {
            provider,
            state: Mutex::new(ViewState { renderer: Renderer::new(view), in_flight: 0 }),
            themes,
            geolocator,
            generation: AtomicU64::new(0),
        }
    }

    /// Apply the stored theme, then show weather for `default_city`.
    pub async fn initialize(&self, default_city: &str) -> Outcome {
        self.apply_stored_theme();
        self.search(default_city).await
    }

    pub fn apply_stored_theme(&self) -> Theme {
        let theme = self.themes.get();
        self.state.lock().renderer.view_mut().set_theme(theme);
        theme
    }

    pub async fn search(&self, input: &str) -> Outcome {
        match LocationQuery::parse(input) {
            Some(query) => self.fetch_weather(query).await,
            None => Outcome::Skipped,
        }
    }

    /// Look up weather for wherever the geolocator says we are.
    ///
    /// Geolocation failures are drawn in the error panel like fetch failures.
    ///
    /// Locating counts as a new query: anything still in flight becomes stale.
    pub async fn locate(&self) -> Outcome {
        let generation = self.next_generation();

        match self.geolocator.locate().await {
            Ok(position) => self.fetch_weather(position.into()).await,
            Err(err) => {
                tracing::warn!(error = %err, detail = err.detail(), "geolocation failed");
                let mut state = self.state.lock();
                if !self.is_latest(generation) {
                    return Outcome::Stale;
                }
                state.renderer.render_error(&err);
                Outcome::Failed(err)
            }
        }
    }

    pub async fn fetch_weather(&self, query: LocationQuery) -> Outcome {
        let generation = self.next_generation();
        let _loading = LoadingGuard::start(&self.state);

        let result = self.provider.fetch_bundle(&query).await;

        let mut state = self.state.lock();
        if !self.is_latest(generation) {
            tracing::debug!(%query, generation, "discarding stale weather response");
            return Outcome::Stale;
        }

        match result {
            Ok(bundle) => {
                state.renderer.render_bundle(&bundle, Local::now().time());
                Outcome::Rendered
            }
            Err(err) => {
                state.renderer.render_error(&err);
                Outcome::Failed(err)
            }
        }
    }

    /// Flip the theme, persist it and apply it to the view.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = toggle_stored(&self.themes)?;
        self.state.lock().renderer.view_mut().set_theme(next);
        Ok(next)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(self.state.lock().renderer.view())
    }
}

/// Keeps the loading indicator up while at least one query is running.
struct LoadingGuard<'a, V: ViewBindings> {
    state: &'a Mutex<ViewState<V>>,
}

impl<'a, V: ViewBindings> LoadingGuard<'a, V> {
    fn start(state: &'a Mutex<ViewState<V>>) -> Self {
        let mut s = state.lock();
        s.in_flight += 1;
        s.renderer.view_mut().set_loading(true);
        Self { state }
    }
}

impl<V: ViewBindings> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        let mut s = self.state.lock();
        s.in_flight = s.in_flight.saturating_sub(1);
        if s.in_flight == 0 {
            s.renderer.view_mut().set_loading(false);
        }
    }
}
