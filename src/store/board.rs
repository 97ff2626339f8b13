//! Board configuration store: columns and the vocabularies used by the task
//! detail view.

use super::error::StoreError;
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Number of date fields listed at the end of the meta panel.
///
pub const DATE_FIELD_COUNT: usize = 4;

#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
}

impl Column {
    pub fn new(id: &str, name: &str) -> Column {
        Column {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub icon: String,
    pub name: String,
    pub value: String,
}

impl Priority {
    fn new(icon: &str, name: &str, value: &str) -> Priority {
        Priority {
            icon: icon.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// One entry of the task detail meta panel.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaItem {
    Priority(String),
    Category(String),
    User(String),
    Tag(String),
    Created,
    Started,
    Due,
    Completed,
}

impl MetaItem {
    /// Read-only entries the cursor skips over.
    ///
    pub fn is_disabled(&self) -> bool {
        matches!(self, MetaItem::Created | MetaItem::Completed)
    }
}

/// Columns and vocabularies of one board.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default = "default_priorities")]
    pub priorities: Vec<Priority>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            columns: vec![
                Column::new("todo", "Todo"),
                Column::new("process", "Process"),
                Column::new("review", "Review"),
                Column::new("done", "Done"),
            ],
            categories: vec![],
            users: vec![],
            priorities: default_priorities(),
            tags: ["bug", "feature", "docs", "refactor"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

fn default_priorities() -> Vec<Priority> {
    vec![
        Priority::new("!!!", "Critical", "critical"),
        Priority::new("!!", "High", "high"),
        Priority::new("!", "Medium", "medium"),
        Priority::new("-", "Low", "low"),
    ]
}

impl BoardConfig {
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    /// Items shown in the task detail meta panel: priorities, categories,
    /// users and tags followed by the date fields.
    ///
    pub fn meta_item_count(&self) -> usize {
        self.priorities.len() + self.categories.len() + self.users.len() + self.tags.len() + DATE_FIELD_COUNT
    }

    /// Meta panel entries in display order.
    ///
    pub fn meta_items(&self) -> Vec<MetaItem> {
        let mut items: Vec<MetaItem> = vec![];
        items.extend(self.priorities.iter().map(|p| MetaItem::Priority(p.value.clone())));
        items.extend(self.categories.iter().cloned().map(MetaItem::Category));
        items.extend(self.users.iter().map(|u| MetaItem::User(u.id.clone())));
        items.extend(self.tags.iter().cloned().map(MetaItem::Tag));
        items.extend([
            MetaItem::Created,
            MetaItem::Started,
            MetaItem::Due,
            MetaItem::Completed,
        ]);
        items
    }

    /// Column ids become focus path segments, so they must be non-empty,
    /// dot-free and unique.
    ///
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.columns.is_empty() {
            return Err(StoreError::InvalidColumn("board has no columns".to_string()));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if column.id.is_empty() || column.id.contains('.') {
                return Err(StoreError::InvalidColumn(format!(
                    "column id '{}' must be non-empty and must not contain '.'",
                    column.id
                )));
            }
            if self.columns[..i].iter().any(|c| c.id == column.id) {
                return Err(StoreError::InvalidColumn(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }
        Ok(())
    }
}
