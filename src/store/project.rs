//! Project registry store.

use super::error::StoreError;
use chrono::Local;
use log::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A board directory known to the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Dot-free slug, used as the sidebar path segment.
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub last_access: String,
}

/// Ordered list of projects plus the one currently open.
///
#[derive(Clone, Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current: Option<String>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        ProjectStore {
            projects,
            current: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Mark a project as open and stamp its access time.
    ///
    pub fn set_current(&mut self, id: &str) -> Result<(), StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::ProjectNotFound { id: id.to_string() })?;
        project.last_access = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.current = Some(id.to_string());
        Ok(())
    }

    /// Register a board directory. Returns the existing entry if the path is
    /// already known.
    ///
    pub fn add_project(&mut self, name: &str, path: PathBuf) -> Project {
        if let Some(existing) = self.projects.iter().find(|p| p.path == path) {
            return existing.clone();
        }
        let base = slugify(name);
        let mut id = base.clone();
        let mut n = 2;
        while self.get(&id).is_some() {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        let project = Project {
            id,
            name: name.to_string(),
            path,
            last_access: String::new(),
        };
        info!("Registered project '{}' at {}", project.id, project.path.display());
        self.projects.push(project.clone());
        project
    }

    /// Remove a project from the registry. The board files are left alone.
    ///
    pub fn delete_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        before != self.projects.len()
    }
}

/// Lower-case slug made of alphanumerics and single dashes.
///
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_dot_free() {
        assert_eq!(slugify("My Project"), "my-project");
        assert_eq!(slugify("v1.2 release"), "v1-2-release");
        assert_eq!(slugify("..."), "project");
        assert_eq!(slugify("  lead"), "lead");
    }

    #[test]
    fn add_project_deduplicates_ids_and_paths() {
        let mut store = ProjectStore::default();
        let a = store.add_project("Work", PathBuf::from("/a"));
        let b = store.add_project("Work", PathBuf::from("/b"));
        let again = store.add_project("Other", PathBuf::from("/a"));
        assert_eq!(a.id, "work");
        assert_eq!(b.id, "work-2");
        assert_eq!(again, a);
        assert_eq!(store.projects().len(), 2);
    }

    #[test]
    fn current_project_follows_deletion() {
        let mut store = ProjectStore::default();
        store.add_project("Home", PathBuf::from("/home"));
        store.set_current("home").unwrap();
        assert_eq!(store.current().map(|p| p.name.as_str()), Some("Home"));
        assert!(!store.current().unwrap().last_access.is_empty());
        assert!(store.delete_project("home"));
        assert!(store.current().is_none());
        assert!(!store.delete_project("home"));
    }

    #[test]
    fn set_current_rejects_unknown_project() {
        let mut store = ProjectStore::default();
        assert!(matches!(
            store.set_current("nope"),
            Err(StoreError::ProjectNotFound { .. })
        ));
    }
}
