//! Board file persistence.
//!
//! Every project directory holds one `kanban.yml` with the board
//! configuration and all tasks. Archived tasks live next to it in
//! `archive.yml`.

use super::board::BoardConfig;
use super::error::StoreError;
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const BOARD_FILE_NAME: &str = "kanban.yml";
pub const ARCHIVE_FILE_NAME: &str = "archive.yml";

/// Define specification for board file.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFile {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(skip)]
    pub archived: Vec<Task>,
}

pub fn board_file_path(dir: &Path) -> PathBuf {
    dir.join(BOARD_FILE_NAME)
}

pub fn archive_file_path(dir: &Path) -> PathBuf {
    dir.join(ARCHIVE_FILE_NAME)
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

async fn read_yaml<T>(path: &Path) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned,
{
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::LoadFailed {
            path: path.to_path_buf(),
            message: format!("IO error: {}", e),
        })?;
    serde_yaml::from_str(&contents).map_err(|e| StoreError::LoadFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

async fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content =
        serde_yaml::to_string(value).map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
    fs::write(path, content)
        .await
        .map_err(|e| StoreError::SaveFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read a project's board and archive. A directory without a board file
/// yields the default board with no tasks.
///
pub async fn load_board(dir: &Path) -> Result<BoardFile, StoreError> {
    let file_path = board_file_path(dir);
    let mut data = if exists(&file_path).await {
        read_yaml::<BoardFile>(&file_path).await?
    } else {
        BoardFile::default()
    };
    data.board.validate()?;
    let archive_path = archive_file_path(dir);
    if exists(&archive_path).await {
        data.archived = read_yaml(&archive_path).await?;
    }
    Ok(data)
}

/// Write a project's board, creating the directory when needed. The
/// archive file is only written once something was archived.
///
pub async fn save_board(dir: &Path, data: &BoardFile) -> Result<(), StoreError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| StoreError::SaveFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
    write_yaml(&board_file_path(dir), data).await?;
    let archive_path = archive_file_path(dir);
    if !data.archived.is_empty() || exists(&archive_path).await {
        write_yaml(&archive_path, &data.archived).await?;
    }
    Ok(())
}
