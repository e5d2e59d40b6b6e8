use std::env;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use history_logging::{history_info, history_warn};
use merchant_history_core::{
    update, ClientContext, ClientState, HistoryState, Lifecycle, Msg,
};
use merchant_history_engine::{EngineHandle, HttpDataSource, LocalSessionStore, SessionValidator};

use super::config::{self, CONFIG_ENV};
use super::effects::EffectRunner;
use super::logging;
use super::sinks::{RouteRecorder, TerminalNotifier};
use super::ui::input::{self, Command, SelectTarget, HELP};
use super::ui::render;

const MERCHANT_ROLE: &str = "merchant";

/// Everything the app loop reacts to: user input and engine results.
pub enum AppInput {
    Dispatch(Msg),
    Command(Command),
    Unknown(String),
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path(env::args().nth(1), env::var(CONFIG_ENV).ok());
    let (config, problem) = config::load(&config_path);
    logging::initialize(config.log_destination, &config.log_file);
    config::report(&config_path, problem);

    let session = Arc::new(LocalSessionStore::new(&config.session_file));
    let source = HttpDataSource::new(&config.api_base_url, config.fetch_settings())
        .with_context(|| format!("invalid api_base_url {:?}", config.api_base_url))?
        .with_bearer_token(session.token());
    let source = Arc::new(source);
    let engine = Arc::new(EngineHandle::new(
        source.clone(),
        source,
        session.clone(),
    ));

    let navigator = Arc::new(RouteRecorder::default());
    let runner = EffectRunner::new(engine.clone(), Box::new(TerminalNotifier), navigator.clone());
    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    runner.spawn_event_loop(input_tx.clone());

    let mut view = HistoryView::new(ClientState::new().into_context(), runner);
    view.dispatch(Msg::Mounted {
        merchant_session: session.validate(MERCHANT_ROLE),
    });

    if view.is_active() {
        println!("{HELP}");
        input::spawn_reader(input_tx);
    } else {
        drop(input_tx);
    }

    while view.is_active() {
        let Ok(input) = input_rx.recv() else {
            break;
        };
        match input {
            AppInput::Dispatch(msg) => view.dispatch(msg),
            AppInput::Command(Command::Quit) => break,
            AppInput::Command(Command::Help) => println!("{HELP}"),
            AppInput::Command(command) => view.handle_command(command),
            AppInput::Unknown(line) => println!("unknown command {line:?}; {HELP}"),
        }
    }

    // Lets a pending logout complete before exiting.
    engine.shutdown();
    if let Some(route) = navigator.current() {
        println!("-> {route}");
    }
    history_info!("Merchant history view closed");
    Ok(())
}

/// Owns the view state and feeds it messages.
struct HistoryView {
    state: HistoryState,
    client: ClientContext,
    runner: EffectRunner,
}

impl HistoryView {
    fn new(client: ClientContext, runner: EffectRunner) -> Self {
        Self {
            state: HistoryState::new(),
            client,
            runner,
        }
    }

    fn is_active(&self) -> bool {
        self.state.lifecycle() == Lifecycle::Active
    }

    fn dispatch(&mut self, msg: Msg) {
        let effects = {
            let Ok(mut client) = self.client.lock() else {
                history_warn!("Client state lock poisoned; dropping {:?}", msg);
                return;
            };
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, &mut client, msg);
            self.state = state;
            effects
        };
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            for line in render::render(&self.state.view()) {
                println!("{line}");
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        if let Some(msg) = self.command_msg(command) {
            self.dispatch(msg);
        }
    }

    fn command_msg(&self, command: Command) -> Option<Msg> {
        match command {
            Command::Toggle => Some(Msg::ToggleListClicked),
            Command::Select(target) => {
                let identifier = resolve(self.state.view().dropdown.as_deref(), target);
                if identifier.is_none() {
                    println!("open the list with `toggle` and pick one of its parcels");
                }
                identifier.map(Msg::ParcelChosen)
            }
            Command::Home => Some(Msg::ReturnHomeClicked),
            Command::Logout => Some(Msg::LogoutClicked),
            // Handled by the app loop.
            Command::Help | Command::Quit => None,
        }
    }
}

/// Maps a selection to an entry of the open dropdown.
fn resolve(dropdown: Option<&[String]>, target: SelectTarget) -> Option<String> {
    let identifiers = dropdown?;
    match target {
        SelectTarget::Index(index) => identifiers.get(index.checked_sub(1)?).cloned(),
        SelectTarget::Identifier(identifier) => identifiers
            .iter()
            .find(|candidate| **candidate == identifier)
            .cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::platform::ui::input::SelectTarget;

    fn dropdown() -> Vec<String> {
        vec!["TRK1".to_string(), "TRK2".to_string()]
    }

    #[test]
    fn selection_needs_an_open_dropdown() {
        assert_eq!(resolve(None, SelectTarget::Index(1)), None);
        assert_eq!(
            resolve(None, SelectTarget::Identifier("TRK1".to_string())),
            None
        );
    }

    #[test]
    fn selection_resolves_index_or_listed_identifier() {
        let entries = dropdown();
        assert_eq!(
            resolve(Some(entries.as_slice()), SelectTarget::Index(2)).as_deref(),
            Some("TRK2")
        );
        assert_eq!(resolve(Some(entries.as_slice()), SelectTarget::Index(3)), None);
        assert_eq!(
            resolve(Some(entries.as_slice()), SelectTarget::Identifier("TRK1".to_string())).as_deref(),
            Some("TRK1")
        );
        assert_eq!(
            resolve(Some(entries.as_slice()), SelectTarget::Identifier("GHOST".to_string())),
            None
        );
    }
}
