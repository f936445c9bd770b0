//! Terminal line chart with one curve per outer sweep value.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};
use rectisweep_core::sweep::SeriesSink;
use rectisweep_core::{Series, SweepConfig};

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
];

/// Accumulates plotted series and draws them as a line chart.
///
/// Curves are added as the sweep produces them; the legend is attached
/// once at the end with [`SweepChart::set_legend`], matching the order the
/// curves were plotted in.
#[derive(Debug, Clone, Default)]
pub struct SweepChart {
    title: String,
    x_title: String,
    y_title: String,
    curves: Vec<Vec<(f64, f64)>>,
    legend: Vec<String>,
}

impl SweepChart {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            curves: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Axis titles taken from the sweep configuration
    pub fn for_config(config: &SweepConfig) -> Self {
        Self::new(
            format!(
                "{} ({}) vs {} for each {}",
                config.metric.short_label(),
                config.metric.label(&config.signal),
                config.inner.label(),
                config.outer.label()
            ),
            config.inner.label(),
            config.metric.label(&config.signal),
        )
    }

    pub fn add_series(&mut self, series: &Series) {
        self.curves.push(series.xy());
    }

    pub fn set_legend(&mut self, labels: Vec<String>) {
        self.legend = labels;
    }

    pub fn legend(&self) -> &[String] {
        &self.legend
    }

    pub fn curves(&self) -> &[Vec<(f64, f64)>] {
        &self.curves
    }

    /// Axis bounds over every finite point, with a little padding so curves
    /// do not sit on the frame.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let points = self
            .curves
            .iter()
            .flatten()
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !x_min.is_finite() {
            return ([0.0, 1.0], [0.0, 1.0]);
        }

        (pad([x_min, x_max], 0.02), pad([y_min, y_max], 0.1))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(self.title.clone()).bold());

        if self.curves.is_empty() {
            let paragraph = Paragraph::new(vec![Line::from("  No data to display.")]).block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let datasets: Vec<Dataset> = self
            .curves
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let dataset = Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                    .data(data);
                match self.legend.get(i) {
                    Some(label) => dataset.name(label.clone()),
                    None => dataset,
                }
            })
            .collect();

        let (x_bounds, y_bounds) = self.bounds();
        let x_axis = Axis::default()
            .title(self.x_title.clone().dark_gray())
            .bounds(x_bounds)
            .labels(axis_labels(x_bounds));
        let y_axis = Axis::default()
            .title(self.y_title.clone().dark_gray())
            .bounds(y_bounds)
            .labels(axis_labels(y_bounds));

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Percentage(60), Constraint::Percentage(60)));

        frame.render_widget(chart, area);
    }

    /// Show the chart full screen until the user quits (q, Esc or Ctrl+C)
    pub fn show(&self) -> color_eyre::Result<()> {
        let mut viewer = ChartViewer {
            chart: self,
            exit: false,
        };
        ratatui::run(|terminal| viewer.run(terminal))
    }
}

impl SeriesSink for SweepChart {
    fn plot(&mut self, series: &Series) {
        self.add_series(series);
    }
}

fn pad([min, max]: [f64; 2], fraction: f64) -> [f64; 2] {
    let span = max - min;
    let padding = if span > 0.0 {
        span * fraction
    } else {
        min.abs().max(1.0) * fraction
    };
    [min - padding, max + padding]
}

fn axis_labels([min, max]: [f64; 2]) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{min:.2}")),
        Span::raw(format!("{:.2}", (min + max) / 2.0)),
        Span::raw(format!("{max:.2}")),
    ]
}

struct ChartViewer<'a> {
    chart: &'a SweepChart,
    exit: bool,
}

impl ChartViewer<'_> {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        self.chart.render(frame, chunks[0]);

        let help = Paragraph::new(Line::from(Span::styled(
            " q/Esc: quit",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, chunks[1]);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit = true
            }
            _ => {}
        }
    }
}
