//! Descriptive statistics over plain `f64` series.
//!
//! Every helper returns `None` instead of NaN when its result is undefined for
//! the input, leaving it to the caller to decide whether that is an error.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Finds the item with the largest key. Ties go to the earliest item.
pub fn first_max_by<T, F>(items: &[T], key: F) -> Option<(&T, f64)>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            // Strictly greater, so an equal value later on never replaces the first one.
            Some((_, current)) if value <= current => {}
            _ => best = Some((item, value)),
        }
    }
    best
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` when the lengths differ, when there are fewer than two points,
/// or when either series has zero variance. The result is clamped to `[-1, 1]`.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    if is_constant(xs) || is_constant(ys) {
        return None;
    }

    // r is scale-invariant; working on values in [-1, 1] keeps the sums of
    // squares finite for any finite input.
    let xs = unit_scaled(xs);
    let ys = unit_scaled(ys);
    let mean_x = mean(&xs)?;
    let mean_y = mean(&ys)?;

    let (mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denominator = sum_xx.sqrt() * sum_yy.sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return None;
    }

    Some((sum_xy / denominator).clamp(-1.0, 1.0))
}

/// Divides every value by the largest magnitude in the series.
fn unit_scaled(values: &[f64]) -> Vec<f64> {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale > 0.0 {
        values.iter().map(|v| v / scale).collect()
    } else {
        values.to_vec()
    }
}

fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10.0, 20.0, 30.0, 40.0]), Some(25.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn first_max_prefers_earliest_tie() {
        let items = [(1, 5.0), (2, 9.0), (3, 9.0), (4, 1.0)];
        let (item, value) = first_max_by(&items, |i| i.1).unwrap();
        assert_eq!(item.0, 2);
        assert_eq!(value, 9.0);
    }

    #[test]
    fn first_max_of_empty_is_none() {
        let items: [f64; 0] = [];
        assert!(first_max_by(&items, |v| *v).is_none());
    }

    #[test]
    fn pearson_perfect_relationships() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up = [10.0, 20.0, 30.0, 40.0];
        let down = [40.0, 30.0, 20.0, 10.0];
        assert!((pearson(&xs, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_known_value() {
        // Hand-computed: sum_xy = 6, sum_xx = 10, sum_yy = 6 -> r = 6 / sqrt(60)
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 5.0, 4.0, 5.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 6.0 / 60f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn pearson_survives_large_magnitudes() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1e155, 2e155, 3e155];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);

        let huge = [f64::MAX / 2.0, -f64::MAX / 2.0, f64::MAX / 4.0];
        let r = pearson(&huge, &[3.0, 1.0, 2.0]).unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn pearson_undefined_cases() {
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]), None);
    }
}
