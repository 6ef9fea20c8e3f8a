use std::collections::HashSet;

/// Picks up to `target` evenly spaced items from `urls`, keeping order.
///
/// When downsampling, the first and last items are always included and the
/// rest are taken at `round(i / (target - 1) * (len - 1))`, rounding halves
/// away from zero. Rounding can pick the same index twice when `target` is
/// close to `urls.len()`; repeats are dropped, so the result may be shorter
/// than `target`.
///
/// Lists no longer than `target` come back unchanged.
#[must_use]
pub fn representative_sample<S: AsRef<str>>(urls: &[S], target: usize) -> Vec<String> {
    if urls.is_empty() || target == 0 {
        return Vec::new();
    }
    if urls.len() <= target {
        return urls.iter().map(|u| u.as_ref().to_owned()).collect();
    }
    if target == 1 {
        return vec![urls[0].as_ref().to_owned()];
    }

    #[allow(clippy::cast_precision_loss)]
    let last_index = (urls.len() - 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let steps = (target - 1) as f64;

    let mut seen = HashSet::with_capacity(target);
    (0..target)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let ratio = i as f64 / steps;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = (ratio * last_index).round() as usize;
            urls[index.min(urls.len() - 1)].as_ref()
        })
        .filter(|url| seen.insert(*url))
        .map(str::to_owned)
        .collect()
}
