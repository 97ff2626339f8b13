use crate::config::Config;
use crate::state::State;
use crate::store::persist;
use crate::store::StoreError;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different I/O event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Write the open board to its project directory.
    SaveBoard,
    /// Make a registered project current and load its board.
    LoadProject { id: String },
    /// Write the project registry to the configuration file.
    SaveRegistry,
}

/// Specify struct for managing state with I/O events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    config: &'a mut Config,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, config: &'a mut Config) -> Self {
        Handler { state, config }
    }

    /// Handle I/O events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing I/O event '{:?}'...", event);
        match event {
            Event::SaveBoard => self.save_board().await?,
            Event::LoadProject { id } => self.load_project(id).await?,
            Event::SaveRegistry => self.save_registry().await?,
        }
        Ok(())
    }

    /// Snapshot the board under the lock, then write it without holding it.
    ///
    async fn save_board(&mut self) -> Result<()> {
        let (dir, data) = {
            let state = self.state.lock().await;
            let project = state.stores().project.current().ok_or(StoreError::NoProjectOpen)?;
            (project.path.clone(), state.stores().board_file())
        };
        persist::save_board(&dir, &data).await?;
        info!("Saved {} tasks to {}", data.tasks.len(), dir.display());
        Ok(())
    }

    /// Switch to another project. The outgoing board is written first and
    /// nothing changes unless the incoming board loads. The state stays
    /// locked for the whole switch so no edit lands in between.
    ///
    async fn load_project(&mut self, id: String) -> Result<()> {
        let mut state = self.state.lock().await;
        let dir = state
            .stores()
            .project
            .get(&id)
            .ok_or_else(|| StoreError::ProjectNotFound { id: id.clone() })?
            .path
            .clone();
        if let Some(current) = state.stores().project.current() {
            let current_dir = current.path.clone();
            persist::save_board(&current_dir, &state.stores().board_file()).await?;
            debug!("Saved outgoing board to {}", current_dir.display());
        }

        info!("Loading project '{}' from {}...", id, dir.display());
        let data = persist::load_board(&dir).await?;
        state.stores_mut().project.set_current(&id)?;
        state.load_board(data);
        drop(state);
        self.save_registry().await
    }

    /// Commit any field edit, then write the open board and the registry.
    /// Run once the interface has shut down.
    ///
    pub async fn save_all(&mut self) -> Result<()> {
        let open = {
            let mut state = self.state.lock().await;
            state.stores_mut().commit_edit();
            state.stores().project.current().is_some()
        };
        if open {
            self.save_board().await?;
        }
        self.save_registry().await
    }

    async fn save_registry(&mut self) -> Result<()> {
        {
            let state = self.state.lock().await;
            let project = &state.stores().project;
            self.config.projects = project.projects().to_vec();
            self.config.last_project = project.current_id().map(str::to_string);
        }
        self.config.save()?;
        debug!("Saved project registry with {} projects", self.config.projects.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keybindings::KeyBindings;
    use crate::focus::Dispatcher;
    use crate::logger::LogBuffer;
    use crate::store::project::ProjectStore;
    use crate::store::task::TaskPatch;
    use crate::store::ui::EditField;
    use crate::store::Stores;

    struct Fixture {
        state: Arc<Mutex<State>>,
        config: Config,
        _config_dir: tempfile::TempDir,
        board_dir: tempfile::TempDir,
        other_dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let config_dir = tempfile::tempdir().unwrap();
            let board_dir = tempfile::tempdir().unwrap();
            let other_dir = tempfile::tempdir().unwrap();
            let mut config = Config::new();
            config.load(Some(&config_dir.path().to_string_lossy())).unwrap();

            let mut projects = ProjectStore::default();
            projects.add_project("Home", board_dir.path().to_path_buf());
            projects.add_project("Work", other_dir.path().to_path_buf());
            let state = State::new(
                Stores::new(projects),
                Dispatcher::new(KeyBindings::default()).unwrap(),
                LogBuffer::new(),
            );
            Fixture {
                state: Arc::new(Mutex::new(state)),
                config,
                _config_dir: config_dir,
                board_dir,
                other_dir,
            }
        }

        async fn handle(&mut self, event: Event) -> Result<()> {
            Handler::new(&self.state, &mut self.config).handle(event).await
        }

        async fn save_all(&mut self) -> Result<()> {
            Handler::new(&self.state, &mut self.config).save_all().await
        }

        async fn open(&mut self, id: &str) -> Result<()> {
            self.handle(Event::LoadProject { id: id.to_string() }).await
        }

        async fn add_task(&self, title: &str) {
            let mut state = self.state.lock().await;
            state.stores_mut().task.create_task(
                "todo",
                TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                },
            );
        }

        async fn titles(&self) -> Vec<String> {
            let state = self.state.lock().await;
            state.stores().task.tasks().iter().map(|t| t.title.clone()).collect()
        }
    }

    #[tokio::test]
    async fn save_without_project_fails() {
        let mut fixture = Fixture::new();
        let result = fixture.handle(Event::SaveBoard).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn load_then_save_round_trips_the_board() {
        let mut fixture = Fixture::new();
        fixture.open("home").await.unwrap();
        {
            let mut state = fixture.state.lock().await;
            assert_eq!(state.focus().current(), &"kanban.board.todo.new-task");
            state.stores_mut().task.create_task(
                "process",
                TaskPatch {
                    title: Some("persist me".to_string()),
                    ..TaskPatch::default()
                },
            );
        }
        fixture.handle(Event::SaveBoard).await.unwrap();
        assert!(persist::board_file_path(fixture.board_dir.path()).exists());

        {
            let mut state = fixture.state.lock().await;
            state.stores_mut().task.clear();
        }
        fixture.open("home").await.unwrap();
        let state = fixture.state.lock().await;
        let tasks = state.stores().task.tasks_by_column("process");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "persist me");
    }

    #[tokio::test]
    async fn load_project_updates_registry() {
        let mut fixture = Fixture::new();
        fixture.open("home").await.unwrap();
        assert_eq!(fixture.config.last_project.as_deref(), Some("home"));
        assert_eq!(fixture.config.projects.len(), 2);
        assert!(fixture.config.file_path().map_or(false, |p| p.exists()));
    }

    #[tokio::test]
    async fn unknown_project_is_an_error() {
        let mut fixture = Fixture::new();
        let result = fixture.open("nope").await;
        assert!(result.is_err());
        let state = fixture.state.lock().await;
        assert!(state.stores().project.current().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_the_open_project() {
        let mut fixture = Fixture::new();
        fixture.open("home").await.unwrap();
        fixture.add_task("home only").await;
        let broken = persist::board_file_path(fixture.other_dir.path());
        std::fs::write(&broken, "tasks: [unclosed").unwrap();

        assert!(fixture.open("work").await.is_err());
        {
            let state = fixture.state.lock().await;
            assert_eq!(state.stores().project.current_id(), Some("home"));
        }
        assert_eq!(fixture.titles().await, vec!["home only".to_string()]);

        fixture.handle(Event::SaveBoard).await.unwrap();
        assert_eq!(std::fs::read_to_string(&broken).unwrap(), "tasks: [unclosed");
        let home = std::fs::read_to_string(persist::board_file_path(fixture.board_dir.path())).unwrap();
        assert!(home.contains("home only"));
    }

    #[tokio::test]
    async fn switching_projects_keeps_unsaved_work() {
        let mut fixture = Fixture::new();
        fixture.open("home").await.unwrap();
        fixture.add_task("not saved yet").await;

        fixture.open("work").await.unwrap();
        assert!(fixture.titles().await.is_empty());
        fixture.add_task("work item").await;

        fixture.open("home").await.unwrap();
        assert_eq!(fixture.titles().await, vec!["not saved yet".to_string()]);
        fixture.open("work").await.unwrap();
        assert_eq!(fixture.titles().await, vec!["work item".to_string()]);
    }

    #[tokio::test]
    async fn save_all_writes_pending_edit_and_registry() {
        let mut fixture = Fixture::new();
        fixture.open("home").await.unwrap();
        fixture.add_task("draft").await;
        {
            let mut state = fixture.state.lock().await;
            let stores = state.stores_mut();
            stores.begin_edit("TASK-001", EditField::Title);
            if let Some(edit) = stores.ui.edit_mut() {
                edit.textarea.insert_str(" final");
            }
        }

        fixture.save_all().await.unwrap();
        let home = std::fs::read_to_string(persist::board_file_path(fixture.board_dir.path())).unwrap();
        assert!(home.contains("draft final"));
        assert_eq!(fixture.config.last_project.as_deref(), Some("home"));
    }

    #[tokio::test]
    async fn save_all_without_project_only_writes_registry() {
        let mut fixture = Fixture::new();
        fixture.save_all().await.unwrap();
        assert!(fixture.config.file_path().map_or(false, |p| p.exists()));
        assert!(!persist::board_file_path(fixture.board_dir.path()).exists());
    }
}
