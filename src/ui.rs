use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::Margin,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::io;

use people_screen::{AvatarCatalog, AvatarColor, AvatarView, Contact, ContactDirectory, Presence};

// Export types needed by main module
pub use ratatui::backend::CrosstermBackend;
pub use ratatui::Terminal;

const BAR_BG: Color = Color::Rgb(0x11, 0x11, 0x11);
const BADGE_GREEN: Color = Color::Rgb(0xC7, 0xF0, 0xBB);
const MUTED: Color = Color::Rgb(0x8E, 0x8E, 0x93);
const DIM: Color = Color::Rgb(0x80, 0x80, 0x80);
const RULE: Color = Color::Rgb(0x1A, 0x1A, 0x1A);
const IMAGE_BG: Color = Color::Rgb(0x3C, 0x3C, 0x3C);

const RECENTLY_ACTIVE: &str = "Recently active";
const TABS: [&str; 3] = ["Chats", "People", "Discover"];
const ACTIVE_TAB: usize = 1;
// avatar column plus badge column, where separators start
const ROW_INSET: u16 = 6;
const BADGE_WIDTH: usize = 9;

/// One horizontal band of the screen, top to bottom.
#[derive(Debug, Clone, PartialEq)]
enum Section<'a> {
    StatusBar,
    Header,
    Search,
    Story,
    Spacer,
    Contact(&'a Contact),
    Separator,
    Heading(&'static str),
    Filler,
    TabBar,
    HomeIndicator,
}

impl Section<'_> {
    fn constraint(&self) -> Constraint {
        match self {
            Section::StatusBar => Constraint::Length(1),
            Section::Header => Constraint::Length(3),
            Section::Search => Constraint::Length(3),
            Section::Story => Constraint::Length(2),
            Section::Spacer => Constraint::Length(1),
            Section::Contact(_) => Constraint::Length(1),
            Section::Separator => Constraint::Length(1),
            Section::Heading(_) => Constraint::Length(2),
            Section::Filler => Constraint::Min(0),
            Section::TabBar => Constraint::Length(2),
            Section::HomeIndicator => Constraint::Length(1),
        }
    }
}

pub struct PeopleScreen<'a> {
    directory: &'a ContactDirectory,
    catalog: &'a AvatarCatalog,
    clock_label: String,
}

impl<'a> PeopleScreen<'a> {
    pub fn new(directory: &'a ContactDirectory, catalog: &'a AvatarCatalog, clock_label: &str) -> Self {
        PeopleScreen {
            directory,
            catalog,
            clock_label: clock_label.to_string(),
        }
    }

    // The "Recently active" heading is left out when nothing would sit under it.
    fn sections(&self) -> Vec<Section<'a>> {
        let mut sections = vec![
            Section::StatusBar,
            Section::Header,
            Section::Search,
            Section::Story,
            Section::Spacer,
        ];

        push_group(&mut sections, self.directory.first_group());

        let recent = self.directory.second_group();
        if !recent.is_empty() {
            sections.push(Section::Heading(RECENTLY_ACTIVE));
            push_group(&mut sections, recent);
        }

        sections.extend([Section::Filler, Section::TabBar, Section::HomeIndicator]);
        sections
    }

    pub fn draw<B: Backend>(&self, frame: &mut Frame<B>) {
        let size = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), size);

        let sections = self.sections();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(sections.iter().map(Section::constraint).collect::<Vec<_>>())
            .split(size);

        for (section, area) in sections.iter().zip(chunks.iter()) {
            let area = *area;
            match section {
                Section::StatusBar => draw_status_bar(frame, &self.clock_label, area),
                Section::Header => draw_header(frame, area),
                Section::Search => draw_search(frame, area),
                Section::Story => draw_story(frame, area),
                Section::Contact(contact) => draw_contact_row(frame, contact, self.catalog, area),
                Section::Separator => draw_separator(frame, area),
                Section::Heading(text) => draw_heading(frame, text, area),
                Section::TabBar => draw_tab_bar(frame, area),
                Section::HomeIndicator => draw_home_indicator(frame, area),
                Section::Spacer | Section::Filler => {}
            }
        }
    }
}

// Rows inside a group get a rule between them, none after the last one.
fn push_group<'a>(sections: &mut Vec<Section<'a>>, group: &'a [Contact]) {
    for (i, contact) in group.iter().enumerate() {
        if i > 0 {
            sections.push(Section::Separator);
        }
        sections.push(Section::Contact(contact));
    }
}

fn palette_color(color: AvatarColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

fn middle_row(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area)[1]
}

fn draw_status_bar<B: Backend>(f: &mut Frame<B>, clock_label: &str, area: Rect) {
    let clock = Paragraph::new(Span::styled(
        format!(" {}", clock_label),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(clock, area);

    // cellular, wifi, battery
    let indicators = Paragraph::new(Span::styled("▂▄▆█ ◠ ▮▮▮ ", Style::default().fg(Color::White)))
        .alignment(Alignment::Right);
    f.render_widget(indicators, area);
}

fn draw_header<B: Backend>(f: &mut Frame<B>, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(BAR_BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),  // Profile avatar
            Constraint::Min(6),     // Title
            Constraint::Length(24), // Actions
        ])
        .split(middle_row(area));

    f.render_widget(Paragraph::new(Span::styled(" ◉", Style::default().fg(Color::White))), chunks[0]);

    let title = Paragraph::new(Span::styled(
        "People",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let actions = Paragraph::new(Line::from(vec![
        Span::styled("Requests", Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled("Add Contact", Style::default().fg(Color::White)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(actions, chunks[2]);
}

fn draw_search<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let area = area.inner(&Margin { horizontal: 1, vertical: 0 });
    let search = Paragraph::new(Span::styled(" ⌕ Search", Style::default().fg(MUTED))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MUTED)),
    );
    f.render_widget(search, area);
}

fn draw_story<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let story = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ◌  ", Style::default().fg(Color::White)),
            Span::styled("Your story", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled("    Add to your story", Style::default().fg(DIM))),
    ]);
    f.render_widget(story, area);
}

fn avatar_span(view: &AvatarView) -> Span<'static> {
    match view {
        AvatarView::Image(_) => Span::styled(" ◕◕ ", Style::default().fg(Color::White).bg(IMAGE_BG)),
        AvatarView::Placeholder { color, initials } => Span::styled(
            format!(" {:<2} ", initials),
            Style::default()
                .fg(Color::White)
                .bg(palette_color(*color))
                .add_modifier(Modifier::BOLD),
        ),
    }
}

fn presence_spans(presence: Presence<'_>) -> Vec<Span<'static>> {
    let (marker, width) = match presence {
        Presence::Online => (Span::styled("●", Style::default().fg(BADGE_GREEN)), 1),
        Presence::RecentlyActive(label) => {
            let badge = format!(" {} ", label);
            let width = badge.chars().count();
            let style = Style::default()
                .fg(Color::Black)
                .bg(BADGE_GREEN)
                .add_modifier(Modifier::BOLD);
            (Span::styled(badge, style), width)
        }
        Presence::Offline => (Span::raw(""), 0),
    };
    vec![marker, Span::raw(" ".repeat(BADGE_WIDTH.saturating_sub(width)))]
}

fn draw_contact_row<B: Backend>(f: &mut Frame<B>, contact: &Contact, catalog: &AvatarCatalog, area: Rect) {
    let avatar = AvatarView::for_contact(contact, catalog);
    if let AvatarView::Placeholder { color, .. } = &avatar {
        debug!("No avatar image for {}, using {} placeholder", contact.id, color.hex());
    }

    let mut spans = vec![Span::raw(" "), avatar_span(&avatar), Span::raw(" ")];
    spans.extend(presence_spans(contact.presence()));
    spans.push(Span::styled(
        contact.name.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let wave = Paragraph::new("👋 ").alignment(Alignment::Right);
    f.render_widget(wave, area);
}

fn draw_separator<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let rule = format!(
        "{}{}",
        " ".repeat(ROW_INSET as usize),
        "─".repeat(area.width.saturating_sub(ROW_INSET) as usize)
    );
    f.render_widget(Paragraph::new(Span::styled(rule, Style::default().fg(RULE))), area);
}

fn draw_heading<B: Backend>(f: &mut Frame<B>, text: &str, area: Rect) {
    let heading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(DIM).add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(heading, area);
}

fn draw_tab_bar<B: Backend>(f: &mut Frame<B>, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(BAR_BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(middle_row(area));

    for (i, (label, chunk)) in TABS.iter().zip(chunks.iter()).enumerate() {
        let style = if i == ACTIVE_TAB {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        f.render_widget(Paragraph::new(Span::styled(*label, style)).alignment(Alignment::Center), *chunk);
    }
}

fn draw_home_indicator<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let bar = Paragraph::new(Span::styled("━".repeat(14), Style::default().fg(Color::White)))
        .alignment(Alignment::Center);
    f.render_widget(bar, area);
}

fn render_buffer(screen: &PeopleScreen<'_>, width: u16, height: u16) -> Result<Buffer> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| screen.draw(f))?;
    Ok(terminal.backend().buffer().clone())
}

/// Render one frame off-screen and return it as plain text, one line per row.
pub fn snapshot(screen: &PeopleScreen<'_>, width: u16, height: u16) -> Result<String> {
    let buffer = render_buffer(screen, width, height)?;
    Ok(buffer_lines(&buffer).join("\n"))
}

fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    (0..buffer.area.height)
        .map(|y| {
            let line: String = (0..buffer.area.width)
                .map(|x| buffer.get(x, y).symbol.as_str())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn is_exit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Keep the screen up until the user asks to leave; resizes trigger a redraw.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, screen: &PeopleScreen<'_>) -> Result<()> {
    loop {
        terminal.draw(|f| screen.draw(f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_exit_key(key.code, key.modifiers) {
                    info!("Exit requested with {:?}", key.code);
                    return Ok(());
                }
            }
            Event::Resize(width, height) => debug!("Terminal resized to {}x{}", width, height),
            _ => {}
        }
    }
}

/// Run `step`; if it fails, run `undo` before handing back the error.
fn or_undo<T>(step: impl FnOnce() -> io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> Result<T> {
    step().map_err(|e| {
        let _ = undo();
        e.into()
    })
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    or_undo(|| execute!(stdout, EnterAlternateScreen), disable_raw_mode)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
