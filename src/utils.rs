use ordered_float::OrderedFloat;

/// Rounds `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Non-null values of a bucket column, in hour order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().map(OrderedFloat).min().map(OrderedFloat::into_inner)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().map(OrderedFloat).max().map(OrderedFloat::into_inner)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sorted-array median; even lengths average the two centre values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1].0 + sorted[mid].0) / 2.0)
    } else {
        Some(sorted[mid].0)
    }
}

/// Most frequent value. Ties go to whichever value was seen first.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.first().map(|(value, _)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mode_prefers_first_seen_on_tie() {
        assert_eq!(mode(["rain", "dry", "dry", "rain"]), Some("rain"));
        assert_eq!(mode(["dry", "rain", "rain"]), Some("rain"));
        assert_eq!(mode(std::iter::empty()), None);
    }

    #[test]
    fn test_min_max_of_empty_is_none() {
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(min(&[2.0, -1.5, 7.0]), Some(-1.5));
        assert_eq!(max(&[2.0, -1.5, 7.0]), Some(7.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.2345, 2), 1.23);
        assert_eq!(round_to(0.125, 1), 0.1);
        assert_eq!(round_to(12.5, 0), 13.0);
    }
}
