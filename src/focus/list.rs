//! Stepping through linear lists whose entries may be disabled.

/// Direction of a vertical step.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

/// Find the next enabled index from `current` in `direction`.
///
/// Disabled entries are skipped. Returns `None` when no enabled entry lies
/// in that direction, which callers treat as "at the boundary": the action
/// is consumed and focus stays put.
///
pub fn step(disabled: &[bool], current: usize, direction: Step) -> Option<usize> {
    let len = disabled.len();
    if len == 0 {
        return None;
    }
    let mut index = current.min(len - 1);
    for _ in 0..len {
        index = match (direction, index) {
            (Step::Prev, 0) => return None,
            (Step::Prev, i) => i - 1,
            (Step::Next, i) if i + 1 >= len => return None,
            (Step::Next, i) => i + 1,
        };
        if !disabled[index] {
            return Some(index);
        }
    }
    None
}

/// First enabled index, if any.
///
pub fn first_enabled(disabled: &[bool]) -> Option<usize> {
    disabled.iter().position(|d| !d)
}

/// Step over a list without disabled entries.
///
pub fn step_plain(len: usize, current: usize, direction: Step) -> Option<usize> {
    step(&vec![false; len], current, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_one_position() {
        let items = [false, false, false];
        assert_eq!(step(&items, 0, Step::Next), Some(1));
        assert_eq!(step(&items, 2, Step::Prev), Some(1));
    }

    #[test]
    fn skips_disabled_middle_item() {
        let items = [false, true, false];
        assert_eq!(step(&items, 0, Step::Next), Some(2));
        assert_eq!(step(&items, 2, Step::Prev), Some(0));
    }

    #[test]
    fn clamps_at_ends() {
        let items = [false, false, false];
        assert_eq!(step(&items, 0, Step::Prev), None);
        assert_eq!(step(&items, 2, Step::Next), None);
    }

    #[test]
    fn disabled_tail_counts_as_boundary() {
        let items = [false, false, true];
        assert_eq!(step(&items, 1, Step::Next), None);
    }

    #[test]
    fn empty_list() {
        assert_eq!(step(&[], 0, Step::Next), None);
        assert_eq!(first_enabled(&[]), None);
        assert_eq!(first_enabled(&[true, false]), Some(1));
    }

    #[test]
    fn plain_steps() {
        assert_eq!(step_plain(3, 1, Step::Next), Some(2));
        assert_eq!(step_plain(3, 2, Step::Next), None);
        assert_eq!(step_plain(0, 0, Step::Prev), None);
    }
}
