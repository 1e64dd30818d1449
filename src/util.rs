use ratatui::style::Color;

// Blend `color` toward the (black) background by `alpha`; terminals have no
// real transparency.
pub fn fade(color: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (c as f64 * alpha).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other if alpha < 1.0 => match other {
            Color::Reset | Color::Black => other,
            _ => Color::DarkGray,
        },
        other => other,
    }
}

pub fn format_ms(ms: u64) -> String {
    const SEC: u64 = 1000;
    const MIN: u64 = 60 * SEC;
    if ms >= MIN {
        format!("{:.2} min", ms as f64 / MIN as f64)
    } else if ms >= SEC {
        format!("{:.2} s", ms as f64 / SEC as f64)
    } else {
        format!("{} ms", ms)
    }
}

pub fn format_count(count: u64) -> String {
    const K: u64 = 1000;
    const M: u64 = 1000 * K;
    if count >= M {
        format!("{:.2}M", count as f64 / M as f64)
    } else if count >= K {
        format!("{:.1}k", count as f64 / K as f64)
    } else {
        format!("{}", count)
    }
}
