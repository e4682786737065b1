/// Identify maximal runs of consecutive integers in an ordered sequence.
///
/// Returns inclusive `(start, end)` index pairs into `arr`, one per run, in
/// ascending order. A run ends wherever the next element is not exactly the
/// previous element plus one, so the pairs partition `0..arr.len()` with no
/// gaps or overlaps.
///
/// The input is assumed non-decreasing; nothing is validated. Unsorted or
/// duplicate-carrying input yields spurious single-element runs rather than
/// an error.
///
/// ```
/// use runcorr::consecutive_intervals;
///
/// let data = [2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 20];
/// assert_eq!(consecutive_intervals(&data), vec![(0, 3), (4, 9), (10, 10)]);
/// ```
pub fn consecutive_intervals(arr: &[i64]) -> Vec<(usize, usize)> {
    if arr.is_empty() {
        return Vec::new();
    }

    let mut intervals = Vec::new();
    let mut start = 0;
    for i in 1..arr.len() {
        if arr[i] - arr[i - 1] != 1 {
            intervals.push((start, i - 1));
            start = i;
        }
    }
    intervals.push((start, arr.len() - 1));
    intervals
}

/// Materialize the runs found by [`consecutive_intervals`] as value runs.
///
/// Each run is rebuilt as the full integer range `arr[start]..=arr[end]`
/// rather than copied out of the slice. Both forms agree whenever each run
/// is itself consecutive, which holds by construction for sorted integer
/// input; for anything else the reconstruction silently diverges from the
/// slice contents.
pub fn consecutive_groups(arr: &[i64]) -> Vec<Vec<i64>> {
    consecutive_intervals(arr)
        .into_iter()
        .map(|(start, end)| (arr[start]..=arr[end]).collect())
        .collect()
}
