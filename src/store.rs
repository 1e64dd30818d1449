pub type SeriesId = usize;

/// A borrowed view of one series, as handed to the bin planner.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub id: SeriesId,
    pub samples: &'a [u64],
}

impl Series<'_> {
    pub fn max(&self) -> Option<u64> {
        self.samples.iter().copied().max()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// Latency samples per series, filled by the parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesStore {
    series: Vec<Vec<u64>>,
}

impl SeriesStore {
    /// Creates a store with `count` empty series, ids `0..count`.
    pub fn with_series(count: usize) -> Self {
        Self {
            series: vec![Vec::new(); count],
        }
    }

    pub(crate) fn push(&mut self, id: SeriesId, value: u64) {
        self.series[id].push(value);
    }

    pub fn series(&self, id: SeriesId) -> Option<Series<'_>> {
        self.series.get(id).map(|samples| Series { id, samples })
    }

    pub fn samples(&self, id: SeriesId) -> &[u64] {
        self.series.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn total_samples(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }
}
