use std::{fmt::Write as _, io, time::Duration};

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, BorderType, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::app::{Chart, YScale};
use crate::constants::TICK_RATE_MS;
use crate::error::PlotResult;
use crate::ticks;
use crate::util::{fade, format_count, format_ms};

// Fraction of the plot height reserved below zero for the x tick labels.
const LABEL_BAND: f64 = 0.08;
const BAR_OFFSETS: [f64; 3] = [-0.25, 0.0, 0.25];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Quit,
}

/// Shows each chart full screen, one after another. Any key moves on,
/// `q` or `Esc` stops early.
pub fn run(charts: &[Chart]) -> PlotResult<()> {
    // Initialize terminal
    enable_raw_mode()?;
    let res = run_on_alternate_screen(charts);

    // Cleanup, even when drawing failed
    disable_raw_mode()?;
    res
}

fn run_on_alternate_screen(charts: &[Chart]) -> PlotResult<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(err) => {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            return Err(err.into());
        }
    };

    let res = show_charts(&mut terminal, charts);

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn show_charts<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    charts: &[Chart],
) -> PlotResult<()> {
    for (index, chart) in charts.iter().enumerate() {
        if show_chart(terminal, chart, index, charts.len())? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn show_chart<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    chart: &Chart,
    index: usize,
    total: usize,
) -> PlotResult<Flow> {
    let tick_rate = Duration::from_millis(TICK_RATE_MS);
    let rendered_at = Local::now();

    loop {
        terminal.draw(|f| draw_chart(f, chart, index, total, rendered_at))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => Flow::Quit,
                    _ => Flow::Next,
                });
            }
        }
    }
}

fn bar_height(count: u64, scale: YScale) -> f64 {
    match (count, scale) {
        (0, _) => 0.0,
        (c, YScale::Linear) => c as f64,
        // a single sample still gets one decade of height
        (c, YScale::Log) => (c as f64).log10() + 1.0,
    }
}

fn y_top(chart: &Chart) -> f64 {
    bar_height(chart.peak_count(), chart.y_scale).max(1.0)
}

pub fn draw_chart(
    f: &mut Frame,
    chart: &Chart,
    index: usize,
    total: usize,
    rendered_at: DateTime<Local>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Length(1), // legend
                Constraint::Min(5),    // plot
                Constraint::Length(1), // x label
                Constraint::Length(1), // status bar
            ]
            .as_ref(),
        )
        .split(f.size());

    // ============= Legend ============
    let mut legend = vec![Span::raw(" ")];
    for layer in &chart.layers {
        let color = fade(layer.color, layer.emphasis);
        legend.push(Span::styled("■ ", Style::default().fg(color)));
        legend.push(Span::styled(
            format!("{}  ", layer.label),
            Style::default().fg(Color::White),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(legend)), chunks[0]);

    // ============= Histogram ============
    let top = y_top(chart) * 1.05;
    let bottom = -top * LABEL_BAND;
    let plot_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", chart.title))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(plot_block)
        .marker(Marker::Braille)
        .x_bounds([chart.edges.first(), chart.edges.last()])
        .y_bounds([bottom, top])
        .paint(|ctx| {
            for layer in &chart.layers {
                let color = fade(layer.color, layer.emphasis);
                for (bin, &count) in layer.counts.iter().enumerate() {
                    let height = bar_height(count, chart.y_scale);
                    if height <= 0.0 {
                        continue;
                    }
                    for dx in BAR_OFFSETS {
                        let x = bin as f64 + dx;
                        ctx.draw(&CanvasLine { x1: x, y1: 0.0, x2: x, y2: height, color });
                    }
                }
                // later layers cover earlier ones
                ctx.layer();
            }

            for tick in chart.visible_ticks() {
                ctx.print(
                    tick as f64,
                    bottom,
                    Span::styled(tick.to_string(), Style::default().fg(Color::DarkGray)),
                );
            }

            if chart.y_scale == YScale::Log {
                let mut decade = 1u32;
                while f64::from(decade) <= top {
                    let label = 10u64.saturating_pow(decade - 1);
                    ctx.print(
                        chart.edges.first(),
                        f64::from(decade),
                        Span::styled(format_count(label), Style::default().fg(Color::DarkGray)),
                    );
                    decade += 1;
                }
            }
        });
    f.render_widget(canvas, chunks[1]);

    f.render_widget(
        Paragraph::new(chart.x_label.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[2],
    );

    // ============ Bottom Status Bar ============
    let status = Line::from(vec![
        Span::styled(
            format!(" CHART {}/{} ", index + 1, total),
            Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("SAMPLES: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(format!("{} ", format_count(chart.total_samples() as u64))),
        Span::raw(" | "),
        Span::styled("MAX: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(format!("{} ", format_ms(chart.max_sample()))),
        Span::styled(
            format!("(@{})", rendered_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" | Press 'q' to quit, any key for next"),
    ]);
    f.render_widget(
        Paragraph::new(status).style(Style::default().bg(Color::Rgb(20, 20, 20))),
        chunks[3],
    );
}

/// Plain text description of the charts, for use without a terminal.
pub fn summary(charts: &[Chart]) -> String {
    let mut out = String::new();
    for chart in charts {
        let scale = match chart.y_scale {
            YScale::Linear => "linear",
            YScale::Log => "log",
        };
        let _ = writeln!(out, "{}", chart.title);
        let _ = writeln!(
            out,
            "  edges {} .. {} ({} bins, {} labels, {} y)",
            chart.edges.first(),
            chart.edges.last(),
            chart.edges.bin_count(),
            ticks::visible_count(&chart.ticks),
            scale
        );
        for layer in &chart.layers {
            let _ = writeln!(
                out,
                "  {:<34} samples {:>8}  max {:>10}  alpha {:.1}",
                layer.label,
                layer.samples,
                format_ms(layer.max),
                layer.emphasis
            );
        }
    }
    out
}
