//! Rolling and exponential smoothing kernels shared by the indicators.
//!
//! Rolling windows are partial at the start of the data: the first outputs
//! average over however many values exist so far. Every kernel returns one
//! output per input.

/// Mean of the last `window` values (fewer if the data is shorter).
pub fn mean_of_last(data: &[f64], window: usize) -> Option<f64> {
    if data.is_empty() || window == 0 {
        return None;
    }
    let tail = &data[data.len().saturating_sub(window)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

/// Rolling mean with partial leading windows.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "Window must be greater than 0");
    let mut result = Vec::with_capacity(data.len());
    let mut sum = 0.0;

    for i in 0..data.len() {
        sum += data[i];
        if i >= window {
            sum -= data[i - window];
        }
        let count = (i + 1).min(window) as f64;
        result.push(sum / count);
    }

    result
}

/// Rolling minimum with partial leading windows.
pub fn rolling_min(data: &[f64], window: usize) -> Vec<f64> {
    rolling_fold(data, window, f64::INFINITY, f64::min)
}

/// Rolling maximum with partial leading windows.
pub fn rolling_max(data: &[f64], window: usize) -> Vec<f64> {
    rolling_fold(data, window, f64::NEG_INFINITY, f64::max)
}

fn rolling_fold(data: &[f64], window: usize, init: f64, f: fn(f64, f64) -> f64) -> Vec<f64> {
    assert!(window > 0, "Window must be greater than 0");
    (0..data.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            data[start..=i].iter().copied().fold(init, f)
        })
        .collect()
}

/// Exponentially weighted mean seeded with the first value:
/// `y[0] = x[0]`, `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]`.
pub fn ewm(data: &[f64], alpha: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(data.len());
    let mut iter = data.iter();

    if let Some(&first) = iter.next() {
        let mut current = first;
        result.push(current);
        for &value in iter {
            current = alpha * value + (1.0 - alpha) * current;
            result.push(current);
        }
    }

    result
}

/// Smoothing factor for a span, `2 / (span + 1)`.
#[inline]
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}
