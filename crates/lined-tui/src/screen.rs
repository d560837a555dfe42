use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lined_core::{Document, MenuCommand, Session};

const NUMBER_WIDTH: usize = 3;
const SEPARATOR: &str = " | ";
const HINT: &str = "Enter=submit | Esc=cancel | Up/Down/PgUp/PgDn=scroll | Ctrl-C=quit";

const TITLE_BG: Color = Color::Blue;
const TITLE_FG: Color = Color::White;
const CURRENT_LINE_BG: Color = Color::Yellow;
const CURRENT_LINE_FG: Color = Color::Black;
const NUMBER_FG: Color = Color::Cyan;
const DATA_FG: Color = Color::Green;
const MENU_FG: Color = Color::Cyan;
const PROMPT_FG: Color = Color::Cyan;
const MSG_FG: Color = Color::Yellow;

/// Rows taken by everything except the file area
pub const CHROME_ROWS: u16 = 4;

/// Identification text: file name, dirty marker and new-file marker
pub fn title_text(doc: &Document) -> String {
    let name = doc
        .filename()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "UNNAMED".to_string());
    let mut text = format!("{}{}", name, if doc.is_changed() { "*" } else { "" });
    if doc.is_new() {
        text.push_str(" (new file)");
    }
    text
}

/// One numbered row of the file listing
pub fn numbered_line(line_num: usize, text: &str) -> String {
    format!("{:>w$}{}{}", line_num, SEPARATOR, text, w = NUMBER_WIDTH)
}

/// The menu, e.g. "a=Append  i=Insert ..."
pub fn menu_text() -> String {
    MenuCommand::all()
        .map(|cmd| {
            let name = cmd.name();
            format!("{}={}{}", cmd.key(), &name[..1], name[1..].to_lowercase())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// First line number (1-based) to show so that `current` stays on screen
pub fn first_visible(count: usize, current: usize, scroll: usize, height: usize) -> usize {
    if count == 0 || height == 0 {
        return 1;
    }
    let max_first = count.saturating_sub(height) + 1;
    let mut first = scroll.clamp(1, max_first);
    if current >= 1 {
        if current < first {
            first = current;
        } else if current >= first + height {
            first = current + 1 - height;
        }
    }
    first
}

/// Render the complete editor screen
pub fn render(frame: &mut Frame, session: &Session, input_text: &str, first_line: usize) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title line
        Constraint::Min(1),    // file area
        Constraint::Length(1), // message line
        Constraint::Length(1), // menu line
        Constraint::Length(1), // prompt line
    ])
    .split(area);

    render_title_line(frame, chunks[0], session.document());
    render_file_area(
        frame,
        chunks[1],
        session.document(),
        session.current_line(),
        first_line,
    );
    render_message_line(frame, chunks[2], session.message());
    render_menu_line(frame, chunks[3]);
    render_prompt_line(frame, chunks[4], &session.prompt_text(), input_text);
}

fn render_title_line(frame: &mut Frame, area: Rect, doc: &Document) {
    let text = format!(
        " lined {}  {}  Lines={}",
        env!("CARGO_PKG_VERSION"),
        title_text(doc),
        doc.line_count()
    );
    let style = Style::default().fg(TITLE_FG).bg(TITLE_BG);
    let line = Line::from(Span::styled(
        format!("{:<width$}", text, width = area.width as usize),
        style,
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_file_area(
    frame: &mut Frame,
    area: Rect,
    doc: &Document,
    current: usize,
    first_line: usize,
) {
    let height = area.height as usize;
    let width = area.width as usize;

    if doc.is_empty() {
        let row = numbered_line(0, "");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(row, Style::default().fg(NUMBER_FG)))),
            area,
        );
        return;
    }

    let last = doc.line_count().min(first_line + height.saturating_sub(1));
    let mut rows: Vec<Line> = Vec::with_capacity(height);
    for line_num in first_line..=last {
        let Some(line) = doc.get(line_num) else {
            break;
        };
        rows.push(make_data_line(line_num, &line.text(), line_num == current, width));
    }

    frame.render_widget(Paragraph::new(rows), area);
}

fn make_data_line(line_num: usize, text: &str, is_current: bool, width: usize) -> Line<'static> {
    let number = format!("{:>w$}{}", line_num, SEPARATOR, w = NUMBER_WIDTH);
    let data_width = width.saturating_sub(number.len());
    let data: String = text.chars().take(data_width).collect();

    if is_current {
        let full = format!("{}{:<dw$}", number, data, dw = data_width);
        Line::from(Span::styled(
            full,
            Style::default()
                .fg(CURRENT_LINE_FG)
                .bg(CURRENT_LINE_BG)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(number, Style::default().fg(NUMBER_FG)),
            Span::styled(data, Style::default().fg(DATA_FG)),
        ])
    }
}

fn render_message_line(frame: &mut Frame, area: Rect, message: Option<&str>) {
    let (text, style) = match message {
        Some(msg) => (msg, Style::default().fg(MSG_FG)),
        None => (HINT, Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(Span::styled(
        format!("{:<width$}", text, width = area.width as usize),
        style,
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_menu_line(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(menu_text(), Style::default().fg(MENU_FG)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_prompt_line(frame: &mut Frame, area: Rect, prompt: &str, input_text: &str) {
    let prompt_len = prompt.chars().count();
    let remaining = (area.width as usize).saturating_sub(prompt_len + 1);
    let input_len = input_text.chars().count();
    let display_text: String = input_text
        .chars()
        .skip(input_len.saturating_sub(remaining))
        .collect();

    let line = Line::from(vec![
        Span::styled(
            prompt.to_string(),
            Style::default().fg(PROMPT_FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(display_text.clone(), Style::default().fg(DATA_FG)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let x = area.x + (prompt_len + display_text.chars().count()) as u16;
    frame.set_cursor_position((x.min(area.x + area.width.saturating_sub(1)), area.y));
}
