//! Weathering Heights - terminal weather lookup

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weathering_heights::action::Action;
use weathering_heights::api::{DEFAULT_BASE_URL, WeatherClient};
use weathering_heights::components::{
    Component, NoticeModal, NoticeModalProps, WeatherDisplay, WeatherDisplayProps,
};
use weathering_heights::effect::Effect;
use weathering_heights::favicon::{FaviconSink, NoFavicon, TerminalTitle};
use weathering_heights::reducer::reducer;
use weathering_heights::state::{AppState, TICK_MS};
use weathering_heights::theme::GradientPolicy;

/// Weathering Heights - current weather, themed by temperature
#[derive(Parser, Debug)]
#[command(name = "weathering-heights")]
#[command(about = "Look up the current weather for a city")]
struct Args {
    /// weatherapi.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// City to look up on startup
    #[arg(long, short)]
    city: Option<String>,

    /// Weather API base URL
    #[arg(long, env = "WEATHER_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// How the background gradient is chosen
    #[arg(long, value_enum, default_value_t = GradientPolicy::TemperatureOnly)]
    gradient_policy: GradientPolicy,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Display,
    Notice,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
    Notice,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.notice.is_some() {
            Some(WeatherComponentId::Notice)
        } else {
            Some(WeatherComponentId::Display)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        self.notice.as_ref().map(|_| WeatherComponentId::Notice)
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Display => WeatherContext::Main,
            WeatherComponentId::Notice => WeatherContext::Notice,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        city,
        base_url,
        gradient_policy,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_tracing(path)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let client = WeatherClient::new(base_url, api_key);
    if !client.has_api_key() {
        warn!("no API key configured; lookups are disabled");
    }

    let api_key_present = client.has_api_key();
    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(api_key_present))
        })
        .await
        .map_err(debug_error)?;
    // Configuration wins over a loaded snapshot
    state.api_key_present = client.has_api_key();
    state.gradient_policy = gradient_policy;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let favicon: Arc<dyn FaviconSink + Send + Sync> = if use_alt_screen {
        Arc::new(TerminalTitle)
    } else {
        Arc::new(NoFavicon)
    };

    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("starting");
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        EffectHandler { client, favicon },
        city.map(Action::CitySubmit),
        replay_actions,
    )
    .await;

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

    info!("exiting");
    Ok(())
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("logging setup failed: {e}")))
}

struct WeatherUi {
    display: WeatherDisplay,
    notice: NoticeModal,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
            notice: NoticeModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        event_ctx.set_component_area(WeatherComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && state.notice.is_none(),
        };
        self.display.render(frame, area, props);

        if let Some(notice) = &state.notice {
            event_ctx.set_component_area(WeatherComponentId::Notice, area);
            let props = NoticeModalProps {
                notice,
                is_focused: render_ctx.is_focused(),
            };
            self.notice.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&WeatherComponentId::Notice);
        }
    }

    fn handle_display_event(
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

    fn handle_notice_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(notice) = &state.notice else {
            return HandlerResponse::ignored();
        };
        let props = NoticeModalProps {
            notice,
            is_focused: true,
        };
        let actions: Vec<_> = self.notice.handle_event(event, props).into_iter().collect();
        // Modal: swallow everything while open
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
    effects: EffectHandler,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(WeatherComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_notice = Rc::clone(&ui);
    bus.register(WeatherComponentId::Notice, move |event, state| {
        ui_notice
            .borrow_mut()
            .handle_notice_event(&event.kind, state)
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
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
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
            move |effect, ctx| effects.handle(effect, ctx),
        )
        .await
}

/// Runs effects against the configured client and window icon sink
struct EffectHandler {
    client: WeatherClient,
    favicon: Arc<dyn FaviconSink + Send + Sync>,
}

impl EffectHandler {
    fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FetchWeather { city } => {
                let client = self.client.clone();
                // Same key: a newer lookup replaces one still in flight
                ctx.tasks().spawn("weather", async move {
                    let result = client.fetch_current(&city).await;
                    if let Err(e) = &result {
                        warn!(%city, error = %e, "weather lookup failed");
                    }
                    Action::from_fetch(result)
                });
            }
            Effect::SetFavicon(icon) => self.favicon.set_favicon(icon),
        }
    }
}
