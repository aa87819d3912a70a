use std::fs;
use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::error::ResultsError;
use crate::training::WinRateRecord;

pub const PLOT_WIDTH: u16 = 100;
pub const PLOT_HEIGHT: u16 = 30;

const TITLE: &str = "Win Rate Improvement Over Training";

/// Render the win-rate series as a line chart into text, one line per row.
pub fn render_win_rate_chart(win_rates: &WinRateRecord, width: u16, height: u16) -> String {
    let data = win_rates.points();

    let (x_min, x_max) = if let (Some(first), Some(last)) = (data.first(), data.last()) {
        (first.0, last.0.max(first.0 + 1.0))
    } else {
        (0.0, 1.0)
    };

    let datasets = vec![Dataset::default()
        .name("Win Rate")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Blue))
        .data(&data)];

    let x_labels = vec![
        Span::raw(format!("{}", x_min as usize)),
        Span::raw(format!("{}", x_max as usize)),
    ];
    let y_labels = vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(TITLE))
        .x_axis(
            Axis::default()
                .title("Game Number")
                .labels(x_labels)
                .bounds([x_min, x_max]),
        )
        .y_axis(
            Axis::default()
                .title("Win Rate")
                .labels(y_labels)
                .bounds([0.0, 1.0]),
        );

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);
    buffer_to_text(&buf)
}

/// Render the chart at the default size and write it to `path`.
pub fn write_win_rate_chart(win_rates: &WinRateRecord, path: &Path) -> Result<(), ResultsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = render_win_rate_chart(win_rates, PLOT_WIDTH, PLOT_HEIGHT);
    fs::write(path, text).map_err(|source| ResultsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
