//! Glob-style matching of focus paths.
//!
//! Pattern segments:
//! - `**` matches the remainder of the path, including nothing
//! - `*` matches exactly one segment
//! - anything else must equal the path segment at that position
//!
//! Matching is by prefix: a path with more segments than the pattern still
//! matches when every pattern segment does. Handler dispatch relies on this,
//! e.g. `kanban.sidebar` claims both `kanban.sidebar` and
//! `kanban.sidebar.project-x`.

/// Return whether `path` satisfies `pattern`.
///
pub fn matches(path: &str, pattern: &str) -> bool {
    let path_parts: Vec<&str> = path.split('.').collect();
    let pattern_parts: Vec<&str> = pattern.split('.').collect();

    for (i, pattern_part) in pattern_parts.iter().enumerate() {
        match *pattern_part {
            "**" => return true,
            "*" => {
                if i >= path_parts.len() {
                    return false;
                }
            }
            exact => {
                if path_parts.get(i) != Some(&exact) {
                    return false;
                }
            }
        }
    }

    path_parts.len() >= pattern_parts.len()
}
