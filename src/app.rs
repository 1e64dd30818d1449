use log::debug;
use ratatui::style::Color;

use crate::bins::{self, BinEdges};
use crate::constants::{
    ATOMIC_LABELS, ATOMIC_SERIES, ATOMIC_TITLE, FULL_EMPHASIS, PALETTE, REDUCED_EMPHASIS,
    SEM_KERNEL_LABEL, SEM_TITLES, SEM_USER_LABEL, X_LABEL,
};
use crate::error::{PlotError, PlotResult};
use crate::record::SemRecord;
use crate::store::{Series, SeriesId, SeriesStore};
use crate::ticks::{self, TickDensity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    Linear,
    Log,
}

// One histogram drawn on a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub label: String,
    pub series: SeriesId,
    pub counts: Vec<u64>,
    pub samples: usize,
    pub max: u64,
    pub color: Color,
    pub emphasis: f64,
}

impl Layer {
    pub fn peak_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Everything needed to draw one chart. Layers are drawn in order, so later
/// layers cover earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub edges: BinEdges,
    pub ticks: Vec<bool>,
    pub y_scale: YScale,
    pub layers: Vec<Layer>,
}

impl Chart {
    pub fn new(title: impl Into<String>, edges: BinEdges, density: TickDensity) -> Self {
        let ticks = ticks::visibility(edges.len(), density);
        Self {
            title: title.into(),
            x_label: X_LABEL.to_string(),
            edges,
            ticks,
            y_scale: YScale::Linear,
            layers: Vec::new(),
        }
    }

    fn log_planned(self) -> Self {
        debug!(
            "chart {:?}: {} bins, {} visible ticks, {} samples",
            self.title,
            self.edges.bin_count(),
            ticks::visible_count(&self.ticks),
            self.total_samples()
        );
        self
    }

    pub fn with_y_scale(mut self, y_scale: YScale) -> Self {
        self.y_scale = y_scale;
        self
    }

    pub fn with_layer(
        mut self,
        label: impl Into<String>,
        series: Series<'_>,
        color: Color,
        emphasis: f64,
    ) -> Self {
        self.layers.push(Layer {
            label: label.into(),
            series: series.id,
            counts: self.edges.counts(series.samples),
            samples: series.len(),
            max: series.max().unwrap_or(0),
            color,
            emphasis,
        });
        self
    }

    pub fn total_samples(&self) -> usize {
        self.layers.iter().map(|l| l.samples).sum()
    }

    pub fn max_sample(&self) -> u64 {
        self.layers.iter().map(|l| l.max).max().unwrap_or(0)
    }

    pub fn peak_count(&self) -> u64 {
        self.layers.iter().map(Layer::peak_count).max().unwrap_or(0)
    }

    /// Integer tick values whose labels are shown.
    pub fn visible_ticks(&self) -> impl Iterator<Item = u64> + '_ {
        self.ticks
            .iter()
            .enumerate()
            .filter(|(_, shown)| **shown)
            .map(|(i, _)| i as u64)
    }
}

// A missing id counts as an empty series.
fn resolve<'a>(store: &'a SeriesStore, ids: &[SeriesId]) -> PlotResult<Vec<Series<'a>>> {
    ids.iter()
        .map(|&id| store.series(id).ok_or(PlotError::EmptySeries { series: id }))
        .collect()
}

/// All lock variants overlaid on one chart; only the first two series at
/// full opacity.
pub fn atomic_charts(store: &SeriesStore) -> PlotResult<Vec<Chart>> {
    let ids: Vec<SeriesId> = (0..ATOMIC_SERIES).collect();
    let group = resolve(store, &ids)?;
    let edges = bins::plan(&group)?;

    let chart = group.iter().enumerate().fold(
        Chart::new(ATOMIC_TITLE, edges, TickDensity::FIXED),
        |chart, (i, series)| {
            let emphasis = if i > 1 { REDUCED_EMPHASIS } else { FULL_EMPHASIS };
            chart.with_layer(ATOMIC_LABELS[i], *series, PALETTE[i % PALETTE.len()], emphasis)
        },
    );
    Ok(vec![chart.log_planned()])
}

/// One log-scaled chart per semaphore metric, kernel-mode bucket drawn first
/// so the user-space bucket stays visible on top.
pub fn sem_charts(store: &SeriesStore) -> PlotResult<Vec<Chart>> {
    let bases = [
        SemRecord::UNCONTENDED_BASE,
        SemRecord::WAIT_TIMEOUT_BASE,
        SemRecord::TRYWAIT_BASE,
    ];

    bases
        .iter()
        .zip(SEM_TITLES)
        .map(|(&base, title)| -> PlotResult<Chart> {
            let group = resolve(store, &[base + 1, base])?;
            let edges = bins::plan(&group)?;
            let (kernel, user) = (group[0], group[1]);
            Ok(Chart::new(title, edges, TickDensity::ADAPTIVE)
                .with_y_scale(YScale::Log)
                .with_layer(SEM_KERNEL_LABEL, kernel, PALETTE[0], FULL_EMPHASIS)
                .with_layer(SEM_USER_LABEL, user, PALETTE[1], FULL_EMPHASIS)
                .log_planned())
        })
        .collect()
}
