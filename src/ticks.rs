use crate::constants::{ATOMIC_TICK_STRIDE, TARGET_VISIBLE_TICKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDensity {
    Target(usize), // about this many labels whatever the range
    Stride(usize), // every Nth label
}

impl TickDensity {
    pub const ADAPTIVE: Self = TickDensity::Target(TARGET_VISIBLE_TICKS);
    pub const FIXED: Self = TickDensity::Stride(ATOMIC_TICK_STRIDE);

    pub fn stride(self, num_edges: usize) -> usize {
        match self {
            // round half up, as num_edges / target + 0.5 truncated
            TickDensity::Target(target) => {
                let target = target.max(1);
                (num_edges + target / 2) / target
            }
            TickDensity::Stride(n) => n,
        }
        .max(1)
    }
}

pub fn visibility(num_edges: usize, density: TickDensity) -> Vec<bool> {
    let stride = density.stride(num_edges);
    (0..num_edges).map(|i| i % stride == 0).collect()
}

pub fn visible_count(mask: &[bool]) -> usize {
    mask.iter().filter(|v| **v).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_stride_rounds_half_up() {
        assert_eq!(TickDensity::ADAPTIVE.stride(12), 1);
        assert_eq!(TickDensity::ADAPTIVE.stride(29), 1);
        assert_eq!(TickDensity::ADAPTIVE.stride(30), 2);
        assert_eq!(TickDensity::ADAPTIVE.stride(400), 20);
        assert_eq!(TickDensity::ADAPTIVE.stride(409), 20);
        assert_eq!(TickDensity::ADAPTIVE.stride(410), 21);
    }

    #[test]
    fn tiny_ranges_keep_every_label() {
        assert_eq!(visibility(3, TickDensity::ADAPTIVE), vec![true; 3]);
        assert_eq!(visibility(1, TickDensity::ADAPTIVE), vec![true]);
    }

    #[test]
    fn zero_edges_is_an_empty_mask() {
        assert!(visibility(0, TickDensity::ADAPTIVE).is_empty());
        assert!(visibility(0, TickDensity::Stride(0)).is_empty());
    }

    #[test]
    fn fixed_stride_marks_multiples() {
        let mask = visibility(25, TickDensity::FIXED);
        let shown: Vec<usize> = (0..25).filter(|i| mask[*i]).collect();
        assert_eq!(shown, vec![0, 10, 20]);
    }

    #[test]
    fn degenerate_policies_are_clamped() {
        assert_eq!(TickDensity::Stride(0).stride(50), 1);
        assert_eq!(TickDensity::Target(0).stride(50), 50);
    }

    #[test]
    fn label_count_stays_near_target() {
        for n in [200usize, 1_000, 12_345] {
            let shown = visible_count(&visibility(n, TickDensity::ADAPTIVE));
            assert!((15..=25).contains(&shown), "{} edges -> {} labels", n, shown);
        }
    }
}
