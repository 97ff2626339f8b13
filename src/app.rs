use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::io::{Event as IoEvent, Handler as IoEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::focus::Dispatcher;
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::State;
use crate::store::project::ProjectStore;
use crate::store::Stores;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type IoEventSender = std::sync::mpsc::Sender<IoEvent>;
type IoEventReceiver = std::sync::mpsc::Receiver<IoEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. The
    /// board in `open` is registered and opened; otherwise the last project,
    /// falling back to the working directory. Returns the result of the
    /// application execution.
    ///
    pub async fn start(config: Config, open: Option<PathBuf>) -> Result<()> {
        let logs = LogBuffer::new();
        CustomLogger::init(config.level_filter()?, logs.clone())?;

        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<IoEvent>();
        let mut projects = ProjectStore::new(config.projects.clone());
        let initial = App::initial_project(&mut projects, &config, open)?;
        let stores = Stores::new(projects).with_sender(tx.clone());
        let dispatcher = Dispatcher::new(config.key_bindings()?)?;
        let theme = Theme::from_name(&config.theme).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using the default", config.theme);
            Theme::default()
        });
        let app = App {
            state: Arc::new(Mutex::new(State::new(stores, dispatcher, logs).with_theme(theme))),
            config,
        };
        app.start_io(rx)?;
        tx.send(IoEvent::LoadProject { id: initial })?;
        app.start_ui().await?;

        // Save board and registry on exit
        let mut config = app.config.clone();
        if let Err(e) = IoEventHandler::new(&app.state, &mut config).save_all().await {
            error!("Failed to save on exit: {}", e);
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Pick the project opened at startup, registering a directory when
    /// none of the known projects applies.
    ///
    fn initial_project(projects: &mut ProjectStore, config: &Config, open: Option<PathBuf>) -> Result<String> {
        let known = config
            .last_project
            .as_deref()
            .filter(|id| projects.get(id).is_some())
            .map(str::to_string);
        let dir = match (open, known) {
            (Some(dir), _) => dir,
            (None, Some(id)) => return Ok(id),
            (None, None) => match projects.projects().first() {
                Some(project) => return Ok(project.id.clone()),
                None => std::env::current_dir()?,
            },
        };
        let dir = dir.canonicalize().unwrap_or(dir);
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "board".to_string());
        let project = projects.add_project(&name, dir);
        info!("Registered project '{}' at {}", project.id, project.path.display());
        Ok(project.id)
    }

    /// Start a separate thread for asynchronous board and registry I/O.
    ///
    fn start_io(&self, io_receiver: IoEventReceiver) -> AppResult<()> {
        debug!("Creating new thread for asynchronous I/O...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let cloned_state = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut io_event_handler = IoEventHandler::new(&cloned_state, &mut config);
                while let Ok(io_event) = io_receiver.recv() {
                    match io_event_handler.handle(io_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle I/O event: {}", e),
                    }
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        enable_raw_mode().map_err(terminal_error)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)?;
        terminal.hide_cursor().map_err(terminal_error)?;

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            };
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &state)) {
                break Err(terminal_error(e));
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(AppError::Terminal(e.to_string())),
            }
        };

        disable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen).map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result
    }
}

fn terminal_error(e: io::Error) -> AppError {
    AppError::Terminal(e.to_string())
}
