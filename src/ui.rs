use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::Record;
use crate::session::Status;
use crate::view::{CharClass, ViewModel};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Rows a piece of text takes once wrapped to `width`, at least one.
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.width().div_ceil(width).max(1) as u16
}

fn stat_box<'a>(title: &'a str, value: String, style: Style) -> Paragraph<'a> {
    Paragraph::new(Span::styled(value, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title))
}

impl Widget for &ViewModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);
        let target: String = self.chars.iter().map(|(c, _)| *c).collect();
        let target_rows = wrapped_rows(&target, text_width);
        let typed_rows = wrapped_rows(&self.typed, text_width);
        let result_rows = if self.result.is_some() { 4 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),               // title
                Constraint::Length(3),               // stats
                Constraint::Length(target_rows + 2), // target text
                Constraint::Length(typed_rows + 2),  // typed text
                Constraint::Length(result_rows),     // race summary
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "Type Racer",
                Style::default().patch(bold_style).fg(Color::Magenta),
            )),
            Line::from(Span::styled(
                "Type the text below as fast and accurately as possible",
                italic_style,
            )),
        ])
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let mut stats = vec![
            stat_box(
                "WPM",
                self.metrics.wpm.to_string(),
                Style::default().patch(bold_style).fg(Color::Magenta),
            ),
            stat_box(
                "Accuracy",
                format!("{}%", self.metrics.accuracy),
                Style::default().patch(bold_style).fg(Color::Cyan),
            ),
            stat_box(
                "Time",
                format!("{:.1}s", self.metrics.elapsed_secs),
                bold_style,
            ),
        ];
        if let Some(best) = self.high_score {
            stats.push(stat_box(
                "High Score",
                format!("{best} WPM"),
                Style::default().patch(bold_style).fg(Color::Yellow),
            ));
        }
        let stat_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, stats.len() as u32); stats.len()])
            .split(chunks[1]);
        for (widget, chunk) in stats.into_iter().zip(stat_chunks.iter()) {
            widget.render(*chunk, buf);
        }

        let spans = self
            .chars
            .iter()
            .map(|&(c, class)| match class {
                CharClass::Correct => Span::styled(c.to_string(), green_bold_style),
                CharClass::Error => Span::styled(
                    match c {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                ),
                CharClass::Current => Span::styled(c.to_string(), underlined_dim_bold_style),
                CharClass::Pending => Span::styled(c.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(if target.width() <= text_width as usize {
                // a prompt that fits on one line reads best centered
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        let input = match self.placeholder {
            Some(placeholder) => Span::styled(placeholder, italic_style.add_modifier(Modifier::DIM)),
            None => Span::raw(self.typed.as_str()),
        };
        let input_border = if self.status == Status::Finished {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Magenta)
        };
        Paragraph::new(Line::from(input))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(input_border),
            )
            .wrap(Wrap { trim: false })
            .render(chunks[3], buf);

        if let Some(result) = self.result {
            let banner = match result.record {
                Record::New { .. } => Span::styled(
                    "New High Score!",
                    Style::default().patch(bold_style).fg(Color::Yellow),
                ),
                Record::Matched => Span::styled("Matched your high score", italic_style),
                Record::Below => Span::raw(""),
            };
            let m = result.metrics;
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "Race Complete!",
                    Style::default().patch(bold_style).fg(Color::Magenta),
                )),
                Line::from(Span::styled(
                    format!(
                        "{} wpm   {}% acc   {} errors   {:.1}s",
                        m.wpm, m.accuracy, m.errors, m.elapsed_secs
                    ),
                    bold_style,
                )),
                Line::from(banner),
            ])
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        let legend = if self.status == Status::Finished {
            "(n)ew text / (r)etry / (q)uit"
        } else {
            "(tab) new text / (ctrl+r) retry / (esc) quit"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[6], buf);
    }
}
