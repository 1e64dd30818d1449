use ratatui::style::Color;

pub const TICK_RATE_MS: u64 = 250; // redraw interval while waiting for a key

pub const ATOMIC_DEFAULT_FILE: &str = "testatomic.csv";
pub const SEM_DEFAULT_FILE: &str = "testsem.csv";

pub const ATOMIC_SERIES: usize = 3;
pub const SEM_SERIES: usize = 6;

// Headroom above the group maximum, as a percentage.
pub const BIN_HEADROOM_PCT: u64 = 105;

// Widest range planned, in one-millisecond bins (about 16 minutes).
pub const MAX_BINS: u64 = 1_000_000;

pub const TARGET_VISIBLE_TICKS: usize = 20;
pub const ATOMIC_TICK_STRIDE: usize = 10;

pub const REDUCED_EMPHASIS: f64 = 0.5;
pub const FULL_EMPHASIS: f64 = 1.0;

pub const X_LABEL: &str = "ms";

pub const ATOMIC_TITLE: &str = "Lock latency";
pub const ATOMIC_LABELS: [&str; ATOMIC_SERIES] = [
    "SRW Locks reentrant (this patch)",
    "CriticalSections",
    "SRW Locks non reentrant",
];

pub const SEM_TITLES: [&str; 3] = ["Uncontended", "Contended WaitTimeout", "Contended TryWait"];
pub const SEM_KERNEL_LABEL: &str = "kernel wait";
pub const SEM_USER_LABEL: &str = "user-space wait";

pub const PALETTE: [Color; 3] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
];
