use latency_hist::bins::{self, BinEdges};
use latency_hist::error::PlotError;
use latency_hist::record::{parse_reader, AtomicRecord, SemRecord};
use latency_hist::store::Series;
use latency_hist::ticks::{self, TickDensity};
use proptest::prelude::*;

fn atomic_lines() -> impl Strategy<Value = Vec<(usize, u64)>> {
    prop::collection::vec((0usize..3, 0u64..5_000), 0..200)
}

fn sem_lines() -> impl Strategy<Value = Vec<(i64, u64, u64, u64)>> {
    prop::collection::vec((-3i64..4, 0u64..5_000, 0u64..5_000, 0u64..5_000), 0..200)
}

fn nonempty_samples() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..100_000, 1..64)
}

fn assert_unit_edges(edges: &BinEdges) {
    for pair in edges.edges().windows(2) {
        assert!(pair[1] > pair[0]);
        assert_eq!(pair[1] - pair[0], 1.0);
    }
}

proptest! {
    // Every atomic line lands in exactly the series it names
    #[test]
    fn atomic_sample_count_matches_lines(lines in atomic_lines()) {
        let text: String = lines.iter().map(|(s, v)| format!("{} {}\n", s, v)).collect();
        let store = parse_reader::<_, AtomicRecord>(text.as_bytes()).unwrap();
        prop_assert_eq!(store.total_samples(), lines.len());
        for id in 0..3 {
            let expected: Vec<u64> = lines.iter().filter(|(s, _)| *s == id).map(|(_, v)| *v).collect();
            prop_assert_eq!(store.samples(id), expected.as_slice());
        }
    }

    // Three samples per line, one per metric, one bucket each
    #[test]
    fn sem_sample_count_is_three_per_line(lines in sem_lines()) {
        let text: String = lines
            .iter()
            .map(|(k, a, b, c)| format!("{}\t{}  {} {}\n", k, a, b, c))
            .collect();
        let store = parse_reader::<_, SemRecord>(text.as_bytes()).unwrap();
        prop_assert_eq!(store.total_samples(), 3 * lines.len());
        let kernel_lines = lines.iter().filter(|(k, ..)| *k != 0).count();
        for base in [0usize, 2, 4] {
            prop_assert_eq!(store.samples(base).len(), lines.len() - kernel_lines);
            prop_assert_eq!(store.samples(base + 1).len(), kernel_lines);
        }
    }

    // Group max sits strictly between two edges, inside the range
    #[test]
    fn edges_cover_max(a in nonempty_samples(), b in nonempty_samples()) {
        let group = [Series { id: 0, samples: &a }, Series { id: 1, samples: &b }];
        let edges = bins::plan(&group).unwrap();
        assert_unit_edges(&edges);

        let max = *a.iter().chain(b.iter()).max().unwrap() as f64;
        prop_assert_eq!(edges.first(), -0.5);
        prop_assert!(max < edges.last());
        prop_assert!(edges.edges().iter().all(|e| *e != max));

        let counts = edges.counts(&a);
        prop_assert_eq!(counts.iter().sum::<u64>(), a.len() as u64);
        prop_assert_eq!(bins::plan(&group).unwrap(), edges);
    }

    #[test]
    fn empty_member_fails_planning(a in nonempty_samples(), pos in 0usize..3) {
        let mut group = vec![Series { id: 0, samples: &a }, Series { id: 1, samples: &a }];
        group.insert(pos.min(group.len()), Series { id: 9, samples: &[] });
        let is_empty_series = matches!(bins::plan(&group), Err(PlotError::EmptySeries { series: 9 }));
        prop_assert!(is_empty_series);
    }

    // floor(m * 1.05) + 1 without overflow, saturating at u64::MAX
    #[test]
    fn upper_bound_is_exact_for_any_max(m in any::<u64>()) {
        let upper = bins::upper_bound(m);
        let scaled = u128::from(m) * 105;
        if upper == u64::MAX {
            prop_assert!(scaled / 100 + 1 >= u128::from(u64::MAX));
        } else {
            prop_assert!(u128::from(upper - 1) * 100 <= scaled);
            prop_assert!(scaled < u128::from(upper) * 100);
        }
    }

    // At least one label survives thinning
    #[test]
    fn thinning_keeps_a_label(n in 1usize..50_000, target in 0usize..100, stride in 0usize..100) {
        for density in [TickDensity::Target(target), TickDensity::Stride(stride), TickDensity::ADAPTIVE] {
            let mask = ticks::visibility(n, density);
            prop_assert_eq!(mask.len(), n);
            prop_assert!(mask[0]);
            prop_assert!(ticks::visible_count(&mask) >= 1);
        }
    }
}
