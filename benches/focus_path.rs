//! Benchmarks for focus path handling and key resolution.
//!
//! These run on every key press, so they need to stay cheap next to a
//! terminal redraw.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crossterm::event::KeyCode;
use kanban_tui::config::keybindings::{KeyBindings, KeyPress};
use kanban_tui::focus::path::{self, FocusPath};
use kanban_tui::focus::pattern;

fn bench_parse_build(c: &mut Criterion) {
    let paths = [
        "kanban.board.todo.task-001",
        "kanban.sidebar.project-home",
        "fullTask.2.subtasks.subtask-014",
        "dialog.confirm",
        "search.result-7",
    ];
    c.bench_function("focus_path_parse_build", |b| {
        b.iter(|| {
            for raw in paths.iter() {
                let parsed = path::parse(black_box(raw));
                black_box(path::build(&parsed));
            }
        })
    });
}

fn bench_pattern_match(c: &mut Criterion) {
    let current = FocusPath::from("fullTask.0.subtasks.subtask-002");
    let patterns = ["kanban.board.*", "fullTask.*.subtasks", "dialog.*", "search.**", "kanban.sidebar"];
    c.bench_function("focus_pattern_match", |b| {
        b.iter(|| {
            patterns
                .iter()
                .filter(|p| pattern::matches(black_box(current.as_str()), p))
                .count()
        })
    });
}

fn bench_key_resolution(c: &mut Criterion) {
    let bindings = KeyBindings::default();
    let presses = [
        KeyPress::new(KeyCode::Char('s')).with_ctrl(),
        KeyPress::new(KeyCode::Char('h')),
        KeyPress::new(KeyCode::Esc),
        KeyPress::new(KeyCode::Char('z')),
    ];
    c.bench_function("key_resolution", |b| {
        b.iter(|| {
            for press in presses.iter() {
                black_box(bindings.event_to_action(black_box(press)));
            }
        })
    });
}

criterion_group!(benches, bench_parse_build, bench_pattern_match, bench_key_resolution);
criterion_main!(benches);
