use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use double_colon_conceal_config::Settings;
use double_colon_conceal_engine::{
    ConcealPlugin, EditorExtension, EditorMode, EditorState, LiveOverlayController, RenderPipeline,
    ViewUpdate, Workspace, live::TextBuffer, rendered::PostProcessor,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env, fs,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// Glyphs F3 and F4 cycle through.
const GLYPHS: [&str; 4] = [":", "→", "·", ""];

/// The plugin's host: one editor and one reading view over the same file.
struct Host {
    editor: EditorState,
    controller: Option<LiveOverlayController>,
    pipeline: RenderPipeline,
    reading_lines: Vec<String>,
}

impl Host {
    fn new(editor: EditorState) -> Self {
        Self {
            editor,
            controller: None,
            pipeline: RenderPipeline::new(),
            reading_lines: Vec::new(),
        }
    }

    /// Passes an editor update on to the overlay and the reading view.
    fn apply(&mut self, update: ViewUpdate) {
        if let Some(controller) = self.controller.as_mut() {
            controller.update(&self.editor, update);
        }
        if update.doc_changed {
            self.rerender_active_view();
        }
    }

    fn displayed_line(&self, number: usize) -> String {
        let line = self.editor.line(number);
        match &self.controller {
            Some(controller) => controller.decorations().display_line(&line),
            None => line.text,
        }
    }
}

impl Workspace for Host {
    fn register_post_processor(&mut self, processor: PostProcessor) {
        self.pipeline.register_post_processor(processor);
    }

    fn update_options(&mut self, extension: Option<&EditorExtension>) {
        self.controller = extension.map(|ext| ext.attach(&self.editor));
    }

    fn rerender_active_view(&mut self) {
        self.reading_lines = self.pipeline.render(&self.editor.text()).to_plain_lines();
    }
}

struct App {
    path: PathBuf,
    host: Host,
    plugin: ConcealPlugin,
    first_line: usize,
    status: String,
}

impl App {
    fn new(path: PathBuf, editor: EditorState, settings: Settings) -> Self {
        let mut host = Host::new(editor);
        let mut plugin = ConcealPlugin::new(settings);
        plugin.load(&mut host);
        Self {
            path,
            host,
            plugin,
            first_line: 1,
            status: String::new(),
        }
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let update = match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('q') if ctrl => return false,
            KeyCode::Char('s') if ctrl => {
                self.save_document();
                return true;
            }
            KeyCode::Tab => {
                let next = match self.host.editor.mode() {
                    EditorMode::LivePreview => EditorMode::Source,
                    EditorMode::Source => EditorMode::LivePreview,
                };
                self.host.editor.set_mode(next)
            }
            KeyCode::F(2) => {
                let enabled = !self.plugin.settings().edit_mode;
                self.plugin.set_edit_mode(enabled, &mut self.host);
                self.save_settings();
                return true;
            }
            KeyCode::F(3) => {
                let glyph = next_glyph(&self.plugin.settings().read_replacement);
                self.plugin.set_read_replacement(Some(glyph), &mut self.host);
                self.save_settings();
                return true;
            }
            KeyCode::F(4) => {
                let glyph = next_glyph(&self.plugin.settings().edit_replacement);
                self.plugin.set_edit_replacement(Some(glyph), &mut self.host);
                self.save_settings();
                return true;
            }
            KeyCode::Left => self.host.editor.move_left(),
            KeyCode::Right => self.host.editor.move_right(),
            KeyCode::Up => self.host.editor.move_up(),
            KeyCode::Down => self.host.editor.move_down(),
            KeyCode::Enter => self.host.editor.insert("\n"),
            KeyCode::Backspace => self.host.editor.delete_backward(),
            KeyCode::Char(c) if !ctrl => self.host.editor.insert(c.encode_utf8(&mut [0; 4])),
            _ => ViewUpdate::none(),
        };
        self.host.apply(update);
        true
    }

    /// Scrolls so the caret line is inside a viewport of `height` lines.
    fn follow_cursor(&mut self, height: usize) {
        let height = height.max(1);
        let caret_line = self.host.editor.line_at(self.host.editor.head()).number;
        if caret_line < self.first_line {
            self.first_line = caret_line;
        } else if caret_line >= self.first_line + height {
            self.first_line = caret_line + 1 - height;
        }
        let update = self.host.editor.set_viewport(self.first_line, height);
        self.host.apply(update);
    }

    fn save_document(&mut self) {
        self.status = match fs::write(&self.path, self.host.editor.text()) {
            Ok(()) => format!("Saved {}", self.path.display()),
            Err(e) => format!("Error saving {}: {e}", self.path.display()),
        };
    }

    fn save_settings(&mut self) {
        self.status = match self.plugin.settings().save() {
            Ok(()) => format!("Settings saved to {}", Settings::config_path().display()),
            Err(e) => format!("Error saving settings: {e}"),
        };
    }
}

fn next_glyph(current: &str) -> String {
    let next = GLYPHS
        .iter()
        .position(|g| *g == current)
        .map_or(0, |i| (i + 1) % GLYPHS.len());
    GLYPHS[next].to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let (print_only, path) = match args.as_slice() {
        [_, flag, path] if flag == "--print" => (true, PathBuf::from(path)),
        [_, path] => (false, PathBuf::from(path)),
        _ => {
            eprintln!("Usage: {} [--print] <markdown-file>", args[0]);
            process::exit(1);
        }
    };

    let settings = match Settings::load_or_default() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: Failed to load settings: {e}");
            process::exit(1);
        }
    };
    log::info!("Config path: {}", Settings::config_path().display());

    let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let editor = EditorState::from_bytes(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;

    if print_only {
        let mut host = Host::new(editor);
        ConcealPlugin::new(settings).load(&mut host);
        println!("{}", host.pipeline.render(&host.editor.text()).to_html());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, editor, settings);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[0]);

    draw_editor(f, app, panes[0]);

    let reading: Vec<Line> = app
        .host
        .reading_lines
        .iter()
        .map(|line| Line::from(vec![Span::raw(line.clone())]))
        .collect();
    let reading = Paragraph::new(reading)
        .block(Block::default().borders(Borders::ALL).title("Reading"))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(reading, panes[1]);

    let settings = app.plugin.settings();
    let help = vec![
        Line::from(vec![Span::raw(
            "Esc: Quit | Ctrl-S: Save | Tab: Live/Source | F2: Edit mode | F3: Reading glyph | F4: Editing glyph",
        )]),
        Line::from(vec![Span::styled(
            format!(
                "reading {:?} | editing {:?} ({}) | {}",
                settings.read_replacement,
                settings.edit_replacement,
                if settings.edit_mode { "on" } else { "off" },
                app.status
            ),
            Style::default().fg(Color::DarkGray),
        )]),
    ];
    f.render_widget(Paragraph::new(help), rows[1]);
}

fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let height = usize::from(area.height.saturating_sub(2));
    app.follow_cursor(height);

    let editor = &app.host.editor;
    let last_line = editor.line_count().min(app.first_line + height.max(1) - 1);
    let lines: Vec<Line> = (app.first_line..=last_line)
        .map(|n| Line::from(vec![Span::raw(app.host.displayed_line(n))]))
        .collect();

    let title = match editor.mode() {
        EditorMode::LivePreview => "Editing (live preview)",
        EditorMode::Source => "Editing (source)",
    };
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);

    // The caret line is never concealed, so raw columns line up
    let caret = editor.line_at(editor.head());
    if caret.number >= app.first_line && caret.number <= last_line {
        let column = caret
            .text
            .get(..editor.head().saturating_sub(caret.from))
            .unwrap_or(&caret.text)
            .chars()
            .count();
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
        let y = area
            .y
            .saturating_add(1)
            .saturating_add(u16::try_from(caret.number - app.first_line).unwrap_or(0));
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}
