// Benchmark log lines decoded into a SeriesStore, one typed record per layout.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use log::{debug, info};

use crate::constants::{ATOMIC_SERIES, SEM_SERIES};
use crate::error::{PlotError, PlotResult};
use crate::store::{SeriesId, SeriesStore};

pub trait Record: Sized {
    const FIELDS: usize;
    const SERIES: usize;

    fn decode(fields: &[&str]) -> Result<Self, String>;

    fn route(self, store: &mut SeriesStore);
}

// <series_index> <value>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicRecord {
    pub series: SeriesId,
    pub value: u64,
}

impl Record for AtomicRecord {
    const FIELDS: usize = 2;
    const SERIES: usize = ATOMIC_SERIES;

    fn decode(fields: &[&str]) -> Result<Self, String> {
        let series: SeriesId = field(fields, 0, "series index")?;
        if series >= Self::SERIES {
            return Err(format!(
                "series index {} out of range 0..{}",
                series,
                Self::SERIES
            ));
        }
        Ok(Self {
            series,
            value: field(fields, 1, "value")?,
        })
    }

    fn route(self, store: &mut SeriesStore) {
        store.push(self.series, self.value);
    }
}

// <kernel_flag> <uncontended> <wait_timeout> <trywait>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemRecord {
    pub kernel_flag: i64,
    pub uncontended: u64,
    pub wait_timeout: u64,
    pub trywait: u64,
}

impl SemRecord {
    pub const UNCONTENDED_BASE: SeriesId = 0;
    pub const WAIT_TIMEOUT_BASE: SeriesId = 2;
    pub const TRYWAIT_BASE: SeriesId = 4;

    // Only 0 and 1 are ever written; any other nonzero flag is treated as set.
    pub fn kernel_mode(&self) -> bool {
        self.kernel_flag != 0
    }

    pub fn bucket(&self, metric_base: SeriesId) -> SeriesId {
        metric_base + usize::from(self.kernel_mode())
    }
}

impl Record for SemRecord {
    const FIELDS: usize = 4;
    const SERIES: usize = SEM_SERIES;

    fn decode(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            kernel_flag: field(fields, 0, "kernel flag")?,
            uncontended: field(fields, 1, "uncontended value")?,
            wait_timeout: field(fields, 2, "wait timeout value")?,
            trywait: field(fields, 3, "trywait value")?,
        })
    }

    fn route(self, store: &mut SeriesStore) {
        store.push(self.bucket(Self::UNCONTENDED_BASE), self.uncontended);
        store.push(self.bucket(Self::WAIT_TIMEOUT_BASE), self.wait_timeout);
        store.push(self.bucket(Self::TRYWAIT_BASE), self.trywait);
    }
}

fn field<T: FromStr>(fields: &[&str], index: usize, name: &str) -> Result<T, String> {
    let raw = fields
        .get(index)
        .ok_or_else(|| format!("missing {}", name))?;
    raw.parse()
        .map_err(|_| format!("{} {:?} is not a valid integer", name, raw))
}

pub fn parse_reader<R: BufRead, T: Record>(reader: R) -> PlotResult<SeriesStore> {
    let mut store = SeriesStore::with_series(T::SERIES);
    let mut records = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| PlotError::MalformedRecord {
            line: line_no,
            reason: e.to_string(),
        })?;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != T::FIELDS {
            return Err(PlotError::MalformedRecord {
                line: line_no,
                reason: format!("expected {} fields, found {}", T::FIELDS, fields.len()),
            });
        }

        let record = T::decode(&fields).map_err(|reason| PlotError::MalformedRecord {
            line: line_no,
            reason,
        })?;
        record.route(&mut store);
        records += 1;
    }

    info!(
        "parsed {} records into {} samples across {} series",
        records,
        store.total_samples(),
        store.series_count()
    );
    Ok(store)
}

pub fn load<T: Record>(path: &Path) -> PlotResult<SeriesStore> {
    debug!("opening {}", path.display());
    let file = File::open(path).map_err(|source| PlotError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader::<_, T>(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atomic(input: &str) -> PlotResult<SeriesStore> {
        parse_reader::<_, AtomicRecord>(input.as_bytes())
    }

    fn sem(input: &str) -> PlotResult<SeriesStore> {
        parse_reader::<_, SemRecord>(input.as_bytes())
    }

    #[test]
    fn atomic_routes_by_index() {
        let store = atomic("0 5\n1 10\n2 3\n0 7\n").unwrap();
        assert_eq!(store.samples(0), &[5, 7]);
        assert_eq!(store.samples(1), &[10]);
        assert_eq!(store.samples(2), &[3]);
        assert_eq!(store.total_samples(), 4);
    }

    #[test]
    fn sem_routes_by_kernel_flag() {
        let store = sem("0 1 2 3\n1 4 5 6\n").unwrap();
        let expected: [&[u64]; 6] = [&[1], &[4], &[2], &[5], &[3], &[6]];
        for (id, samples) in expected.iter().enumerate() {
            assert_eq!(store.samples(id), *samples, "series {}", id);
        }
    }

    #[test]
    fn any_nonzero_flag_is_kernel_mode() {
        let store = sem("-1 10 20 30\n7 11 21 31\n").unwrap();
        assert_eq!(store.samples(1), &[10, 11]);
        assert!(store.samples(0).is_empty());
    }

    #[test]
    fn tolerates_blank_and_trailing_lines() {
        let store = atomic("0 5\n\t 1   9  \n\n   \n").unwrap();
        assert_eq!(store.total_samples(), 2);
        assert_eq!(store.samples(1), &[9]);
    }

    #[test]
    fn too_few_fields_is_malformed() {
        match atomic("abc") {
            Err(PlotError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_integer_field_is_malformed() {
        let err = sem("0 1 2 3\n0 1 x 3\n").unwrap_err();
        assert!(matches!(err, PlotError::MalformedRecord { line: 2, .. }));
        assert!(err.to_string().contains("wait timeout"));
    }

    #[test]
    fn negative_latency_is_malformed() {
        assert!(matches!(
            atomic("0 -4\n"),
            Err(PlotError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn series_index_out_of_range_is_malformed() {
        let err = atomic("0 1\n3 1\n").unwrap_err();
        assert!(matches!(err, PlotError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn extra_fields_are_malformed() {
        assert!(matches!(
            atomic("0 1 2\n"),
            Err(PlotError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let path = Path::new("definitely/not/here/testsem.csv");
        assert!(matches!(
            load::<SemRecord>(path),
            Err(PlotError::MissingFile { .. })
        ));
    }
}
