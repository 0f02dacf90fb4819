// src/services/format.rs

/// Compact magnitude notation: `1.50B`, `250.00M`, `12.30K`, `42.00`.
pub fn human_readable_number(value: Option<f64>) -> String {
    let num = match value {
        Some(v) if !v.is_nan() => v,
        _ => return "N/A".to_string(),
    };

    let abs_num = num.abs();
    if abs_num >= 1_000_000_000.0 {
        format!("{:.2}B", num / 1_000_000_000.0)
    } else if abs_num >= 1_000_000.0 {
        format!("{:.2}M", num / 1_000_000.0)
    } else if abs_num >= 1_000.0 {
        format!("{:.2}K", num / 1_000.0)
    } else {
        format!("{:.2}", num)
    }
}

/// Values too large to scale by 100 are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// `0.2` -> `"20.0%"`
pub fn percent1(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_number() {
        assert_eq!(human_readable_number(Some(2_500_000_000.0)), "2.50B");
        assert_eq!(human_readable_number(Some(-3_250_000.0)), "-3.25M");
        assert_eq!(human_readable_number(Some(1_000.0)), "1.00K");
        assert_eq!(human_readable_number(Some(50.0)), "50.00");
        assert_eq!(human_readable_number(Some(0.0)), "0.00");
        assert_eq!(human_readable_number(None), "N/A");
        assert_eq!(human_readable_number(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_round2_and_percent() {
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-0.666), -0.67);
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(percent1(0.2), "20.0%");
        assert_eq!(percent1(-0.5), "-50.0%");
    }
}
