//! SkyFetch - weather lookup TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use skyfetch::action::Action;
use skyfetch::api::WeatherClient;
use skyfetch::components::{
    Component, ConfirmDialog, ConfirmDialogProps, WeatherDisplay, WeatherDisplayProps,
};
use skyfetch::config::{DEFAULT_CURRENT_URL, DEFAULT_FORECAST_URL, WeatherConfig};
use skyfetch::effect::Effect;
use skyfetch::logging;
use skyfetch::reducer::reducer;
use skyfetch::state::{AppState, SPINNER_TICK_MS};
use skyfetch::storage::LocalStore;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// SkyFetch - current weather and 5-day forecast for any city
#[derive(Parser, Debug)]
#[command(name = "skyfetch")]
#[command(about = "Look up current weather and a 5-day forecast by city name")]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// City to look up at startup (defaults to the last city searched)
    #[arg(long, short)]
    city: Option<String>,

    /// Directory for recent searches and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Provider request timeout in seconds (minimum 1)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    #[arg(long, hide = true, default_value = DEFAULT_CURRENT_URL)]
    current_url: String,

    #[arg(long, hide = true, default_value = DEFAULT_FORECAST_URL)]
    forecast_url: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SkyComponentId {
    Search,
    ConfirmClear,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SkyContext {
    Main,
    Confirm,
}

impl EventRoutingState<SkyComponentId, SkyContext> for AppState {
    fn focused(&self) -> Option<SkyComponentId> {
        if self.confirm_clear {
            Some(SkyComponentId::ConfirmClear)
        } else {
            Some(SkyComponentId::Search)
        }
    }

    fn modal(&self) -> Option<SkyComponentId> {
        if self.confirm_clear {
            Some(SkyComponentId::ConfirmClear)
        } else {
            None
        }
    }

    fn binding_context(&self, id: SkyComponentId) -> SkyContext {
        match id {
            SkyComponentId::Search => SkyContext::Main,
            SkyComponentId::ConfirmClear => SkyContext::Confirm,
        }
    }

    fn default_context(&self) -> SkyContext {
        SkyContext::Main
    }
}

/// What effect handlers need to reach the outside world
#[derive(Clone, Debug)]
struct Services {
    client: WeatherClient,
    store: LocalStore,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        city,
        data_dir,
        timeout_secs,
        current_url,
        forecast_url,
        debug: debug_args,
    } = Args::parse();

    let store = LocalStore::new(data_dir.unwrap_or_else(LocalStore::default_dir));
    logging::init(store.dir());

    let config = WeatherConfig {
        current_url,
        forecast_url,
        ..WeatherConfig::new(api_key)
    }
    .with_timeout(Duration::from_secs(timeout_secs));
    tracing::info!(?config, data_dir = %store.dir().display(), "starting skyfetch");

    let client = WeatherClient::new(config).map_err(io::Error::other)?;
    let services = Services {
        client,
        store: store.clone(),
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let state = load_persisted_state(&store).await;
            Ok::<AppState, io::Error>(state.with_startup_city(city))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("skyfetch exited");
    Ok(())
}

/// History and last city from a previous session; unreadable files start fresh.
async fn load_persisted_state(store: &LocalStore) -> AppState {
    let history = store.load_history().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable search history");
        Default::default()
    });
    let last_city = store.load_last_city().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable last city");
        None
    });
    tracing::info!(recent = history.len(), ?last_city, "loaded saved searches");
    AppState::new(history, last_city)
}

struct SkyUi {
    display: WeatherDisplay,
    confirm: ConfirmDialog,
}

impl SkyUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
            confirm: ConfirmDialog::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SkyComponentId>,
    ) {
        event_ctx.set_component_area(SkyComponentId::Search, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);

        if state.confirm_clear {
            event_ctx.set_component_area(SkyComponentId::ConfirmClear, area);
            let props = ConfirmDialogProps {
                is_open: true,
                is_focused: render_ctx.is_focused(),
                count: state.history.len(),
            };
            self.confirm.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&SkyComponentId::ConfirmClear);
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_confirm_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ConfirmDialogProps {
            is_open: state.confirm_clear,
            is_focused: true,
            count: state.history.len(),
        };
        let actions: Vec<_> = self
            .confirm
            .handle_event(event, props)
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Services,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SkyUi::new()));
    let mut bus: EventBus<AppState, Action, SkyComponentId, SkyContext> = EventBus::new();
    let keybindings: Keybindings<SkyContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(SkyComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_confirm = Rc::clone(&ui);
    bus.register(SkyComponentId::ConfirmClear, move |event, state| {
        ui_confirm
            .borrow_mut()
            .handle_confirm_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects by spawning tasks
///
/// Every weather fetch shares one task key, so starting a new search aborts
/// the one still in flight.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::FetchWeather { city, request_id } => {
            let client = services.client.clone();
            ctx.tasks().spawn("weather", async move {
                tracing::info!(%city, request_id, "searching");
                match client.fetch_weather_and_forecast(&city).await {
                    Ok(report) => Action::WeatherDidLoad {
                        request_id,
                        city,
                        report,
                    },
                    Err(e) => {
                        tracing::warn!(%city, request_id, error = %e, "search failed");
                        Action::WeatherDidError {
                            request_id,
                            failure: e.into(),
                        }
                    }
                }
            });
        }
        // Storage futures are created here, in effect order, so the store
        // applies writes in that order even when tasks finish out of order.
        Effect::SaveHistory { cities } => {
            let save = services.store.save_history(&cities);
            ctx.tasks().spawn("history", async move {
                match save.await {
                    Ok(()) => Action::StorageDidSave,
                    Err(e) => storage_failed(e),
                }
            });
        }
        Effect::SaveLastCity { city } => {
            let save = services.store.save_last_city(&city);
            ctx.tasks().spawn("last_city", async move {
                match save.await {
                    Ok(()) => Action::StorageDidSave,
                    Err(e) => storage_failed(e),
                }
            });
        }
        Effect::ClearHistory => {
            tracing::info!("clearing search history");
            let clear = services.store.clear_history();
            ctx.tasks().spawn("history", async move {
                match clear.await {
                    Ok(()) => Action::StorageDidSave,
                    Err(e) => storage_failed(e),
                }
            });
        }
    }
}

fn storage_failed(error: skyfetch::storage::StorageError) -> Action {
    tracing::warn!(error = %error, "persisting searches failed");
    Action::StorageDidError(error.to_string())
}
