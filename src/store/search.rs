//! Search filtering over the task store.

use super::task::{Task, TaskStore};

/// One whitespace-separated token of a search query.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchToken {
    /// `#tag`
    Tag(String),
    /// `@user`
    User(String),
    /// `!priority`
    Priority(String),
    /// `+category`, matched exactly
    Category(String),
    /// Case-insensitive substring of title, description or notes.
    Text(String),
}

impl SearchToken {
    fn parse(token: &str) -> SearchToken {
        let lower = token.to_lowercase();
        let (kind, rest) = lower.split_at(lower.chars().next().map_or(0, char::len_utf8));
        match kind {
            "#" if !rest.is_empty() => SearchToken::Tag(rest.to_string()),
            "@" if !rest.is_empty() => SearchToken::User(rest.to_string()),
            "!" if !rest.is_empty() => SearchToken::Priority(rest.to_string()),
            "+" if !rest.is_empty() => SearchToken::Category(rest.to_string()),
            _ => SearchToken::Text(lower),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            SearchToken::Tag(tag) => task.tags.iter().any(|t| t.to_lowercase() == *tag),
            SearchToken::User(user) => task.assignees.iter().any(|a| a.to_lowercase() == *user),
            SearchToken::Priority(priority) => task.priority.to_lowercase().contains(priority.as_str()),
            SearchToken::Category(category) => task.category.to_lowercase() == *category,
            SearchToken::Text(text) => {
                task.title.to_lowercase().contains(text.as_str())
                    || task.description.to_lowercase().contains(text.as_str())
                    || task.notes.to_lowercase().contains(text.as_str())
            }
        }
    }
}

pub fn parse_query(query: &str) -> Vec<SearchToken> {
    query.split_whitespace().map(SearchToken::parse).collect()
}

/// Tasks matching every token of the query, in board order. An empty query
/// matches nothing.
///
pub fn search<'a>(tasks: &'a TaskStore, query: &str) -> Vec<&'a Task> {
    let tokens = parse_query(query);
    if tokens.is_empty() {
        return vec![];
    }
    tasks
        .tasks()
        .iter()
        .filter(|task| tokens.iter().all(|token| token.matches(task)))
        .collect()
}
