//! Terminal front-end for the light lab.
//!
//! Keys: Tab/Shift-Tab switch experiment, Up/Down pick a control,
//! Left/Right change it (or move the option cursor of a multi-select),
//! Space toggles the option under the cursor, y/n/u answer the reflection
//! check, e edits the notes for the experiment (Enter saves, Esc cancels),
//! PageUp/PageDown scroll the page, q or Esc quits.

use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{event, execute, terminal};
use light_lab::render::{experiment_markdown, value_label};
use light_lab::{Catalog, Config, ControlKind, ControlValue, Emphasis, LabSession, Outcome};
use ratatui::prelude::*;
use ratatui::widgets::*;

struct App<'a> {
    session: LabSession<'a>,
    config: Config,
    control_idx: usize,
    option_idx: usize,
    scroll: u16,
    status: String,
    /// Notes being typed; `Some` while the editor is open
    draft: Option<String>,
}

impl<'a> App<'a> {
    fn new(catalog: &'a Catalog, config: Config) -> Self {
        let session = LabSession::new(catalog, config.default_experiment());
        Self {
            session,
            config,
            control_idx: 0,
            option_idx: 0,
            scroll: 0,
            status: String::new(),
            draft: None,
        }
    }

    fn switch_experiment(&mut self, forward: bool) {
        self.session.cycle(forward);
        self.control_idx = 0;
        self.option_idx = 0;
        self.scroll = 0;
        self.status.clear();
    }

    fn control_count(&self) -> usize {
        self.session.current().map(|e| e.controls.len()).unwrap_or(0)
    }

    fn move_control(&mut self, down: bool) {
        let count = self.control_count();
        if count == 0 {
            return;
        }
        self.control_idx = if down {
            (self.control_idx + 1) % count
        } else {
            (self.control_idx + count - 1) % count
        };
        self.option_idx = 0;
    }

    /// Left/Right: nudge the value, or move the multi-select cursor
    fn adjust(&mut self, forward: bool) {
        let Ok(experiment) = self.session.current() else {
            return;
        };
        let Some(spec) = experiment.controls.get(self.control_idx) else {
            return;
        };
        if let ControlKind::MultiChoice { options, .. } = &spec.kind {
            let len = options.len().max(1);
            self.option_idx = if forward {
                (self.option_idx + 1) % len
            } else {
                (self.option_idx + len - 1) % len
            };
            return;
        }
        if let Err(err) = self.session.nudge(&spec.key, forward) {
            self.status = err.to_string();
        }
    }

    fn toggle_option(&mut self) {
        let Ok(experiment) = self.session.current() else {
            return;
        };
        let Some(spec) = experiment.controls.get(self.control_idx) else {
            return;
        };
        if let ControlKind::MultiChoice { options, .. } = &spec.kind {
            if let Some(option) = options.get(self.option_idx) {
                if let Err(err) = self.session.toggle(&spec.key, option) {
                    self.status = err.to_string();
                }
            }
        }
    }

    /// Apply one key press. Returns false when the app should quit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return false;
        }
        if let Some(draft) = self.draft.as_mut() {
            match code {
                KeyCode::Enter => {
                    let notes = std::mem::take(draft);
                    self.session.set_notes(notes);
                    self.draft = None;
                    self.status = "notes saved".to_string();
                }
                KeyCode::Esc => self.draft = None,
                KeyCode::Backspace => {
                    draft.pop();
                }
                KeyCode::Char(c) => draft.push(c),
                _ => {}
            }
            return true;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => self.switch_experiment(true),
            KeyCode::BackTab => self.switch_experiment(false),
            KeyCode::Up => self.move_control(false),
            KeyCode::Down => self.move_control(true),
            KeyCode::Left => self.adjust(false),
            KeyCode::Right => self.adjust(true),
            KeyCode::Char(' ') => self.toggle_option(),
            KeyCode::Char('y') => self.session.set_outcome(Some(Outcome::Worked)),
            KeyCode::Char('n') => self.session.set_outcome(Some(Outcome::DidNotWork)),
            KeyCode::Char('u') => self.session.set_outcome(None),
            KeyCode::Char('e') => self.draft = Some(self.session.reflection().notes),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
        true
    }
}

fn main() -> anyhow::Result<()> {
    // The TUI owns the terminal, so no log subscriber is installed here.
    let config = Config::load()?;
    let catalog = Catalog::load()?;
    for warning in &config.load_warnings {
        eprintln!("warning: {warning}");
    }
    if let Err(err) = config.validate(catalog) {
        eprintln!("warning: {err}; starting on the first experiment");
    }
    let mut app = App::new(catalog, config);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let event::Event::Key(k) = event::read()? {
            if k.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(k.code, k.modifiers) {
                break;
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(f.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.config.lab.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(app.config.lab.intro.trim().to_string()),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Light lab"));
    f.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(chunks[1]);

    render_sidebar(f, app, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(12)])
        .split(body[1]);

    match app.session.current() {
        Ok(experiment) => {
            let page = Paragraph::new(experiment_markdown(experiment, &app.config.display))
                .wrap(Wrap { trim: false })
                .scroll((app.scroll, 0))
                .block(Block::default().borders(Borders::ALL).title("Experiment"));
            f.render_widget(page, right[0]);
        }
        Err(err) => {
            let msg = Paragraph::new(err.to_string())
                .block(Block::default().borders(Borders::ALL).title("Experiment"));
            f.render_widget(msg, right[0]);
        }
    }

    render_try_it(f, app, right[1]);

    let reflection = app.session.reflection();
    let answer = match reflection.outcome {
        Some(Outcome::Worked) => "Yes, it was successful",
        Some(Outcome::DidNotWork) => "No, it did not work well",
        None => "not answered",
    };
    let notes_line = match &app.draft {
        Some(draft) => Line::from(Span::styled(
            format!("Notes: {draft}_   (Enter save, Esc cancel)"),
            Style::default().fg(Color::Yellow),
        )),
        None if reflection.notes.is_empty() => Line::raw("Notes: (none, press e to write)"),
        None => Line::raw(format!("Notes: {}", reflection.notes)),
    };
    let footer = Paragraph::new(vec![
        Line::raw(format!(
            "Worked as expected? {answer}   |   Tab exp  ↑↓ control  ←→ change  Space toggle  y/n/u answer  e notes  q quit   {}",
            app.status
        )),
        notes_line,
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

fn render_sidebar(f: &mut Frame, app: &App<'_>, area: Rect) {
    let Ok(catalog) = Catalog::load() else {
        return;
    };
    let entries = catalog.list();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|e| ListItem::new(format!("{} - {}", e.number, e.title)))
        .collect();
    let mut state = ListState::default();
    state.select(
        entries
            .iter()
            .position(|e| e.id == app.session.current_id()),
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Choose an experiment"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_try_it(f: &mut Frame, app: &App<'_>, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Ok(experiment) = app.session.current() {
        for (i, spec) in experiment.controls.iter().enumerate() {
            let selected = i == app.control_idx;
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if selected { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!(
                    "{marker}{}: {}",
                    spec.label,
                    value_label(app.session.value(&spec.key))
                ),
                style,
            )));
            if let (true, ControlKind::MultiChoice { options, .. }) = (selected, &spec.kind) {
                let chosen: &[String] = match app.session.value(&spec.key) {
                    Some(ControlValue::Selection(items)) => items,
                    _ => &[],
                };
                let spans: Vec<Span> = options
                    .iter()
                    .enumerate()
                    .map(|(j, option)| {
                        let mark = if chosen.contains(option) { "x" } else { " " };
                        let text = format!("  [{mark}] {option}");
                        if j == app.option_idx {
                            Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                        } else {
                            Span::raw(text)
                        }
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }
    }

    lines.push(Line::raw(""));
    match app.session.observe() {
        Ok(observations) => {
            for obs in observations {
                let color = match obs.emphasis {
                    Emphasis::Success => Color::Green,
                    Emphasis::Info => Color::Cyan,
                };
                lines.push(Line::from(Span::styled(obs.text, Style::default().fg(color))));
            }
        }
        Err(err) => lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        ))),
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Try it on the screen"));
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use light_lab::ExperimentId;

    fn app() -> App<'static> {
        let mut config = Config::default();
        config.lab.default_experiment = 4;
        App::new(Catalog::load().unwrap(), config)
    }

    fn type_keys(app: &mut App<'_>, text: &str) {
        for c in text.chars() {
            assert!(app.handle_key(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_notes_are_saved_per_experiment() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'), KeyModifiers::NONE);
        type_keys(&mut app, "bent at 40x");
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.draft.is_none());
        assert_eq!(app.session.reflection().notes, "bent at 40");

        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.session.current_id(), ExperimentId(5));
        assert!(app.session.reflection().notes.is_empty());
    }

    #[test]
    fn test_cancelled_notes_are_dropped() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'), KeyModifiers::NONE);
        type_keys(&mut app, "draft");
        assert!(app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.draft.is_none());
        assert!(app.session.reflection().notes.is_empty());
    }

    #[test]
    fn test_editor_captures_command_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'), KeyModifiers::NONE);
        // 'q' and 'y' are text while editing
        type_keys(&mut app, "qy");
        assert!(app.session.reflection().outcome.is_none());
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.session.reflection().notes, "qy");
        assert!(!app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
    }
}
