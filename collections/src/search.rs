//! Searches over slices. Everything except [`linear_search`] expects the
//! input sorted ascending.

pub fn linear_search<T: PartialEq>(items: &[T], target: &T) -> Option<usize> {
    items.iter().position(|item| item == target)
}

/// Iterative binary search, O(log n).
pub fn binary_search<T: PartialOrd>(sorted: &[T], target: &T) -> Option<usize> {
    let (mut lo, mut hi) = (0, sorted.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let value = &sorted[mid];
        if value == target {
            return Some(mid);
        } else if value < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    None
}

pub fn binary_search_recursive<T: PartialOrd>(sorted: &[T], target: &T) -> Option<usize> {
    binary_search_range(sorted, target, 0, sorted.len())
}

// Searches `sorted[lo..hi]`.
fn binary_search_range<T: PartialOrd>(
    sorted: &[T],
    target: &T,
    lo: usize,
    hi: usize,
) -> Option<usize> {
    if lo >= hi {
        return None;
    }
    let mid = lo + (hi - lo) / 2;
    let value = &sorted[mid];
    if value == target {
        Some(mid)
    } else if value < target {
        binary_search_range(sorted, target, mid + 1, hi)
    } else {
        binary_search_range(sorted, target, lo, mid)
    }
}

/// Doubles a probe index until it passes `target`, then binary searches the
/// last doubling window. Cheap when the target sits near the front.
pub fn exponential_search<T: PartialOrd>(sorted: &[T], target: &T) -> Option<usize> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if sorted[0] == *target {
        return Some(0);
    }
    let mut bound = 1;
    while bound < n && sorted[bound] <= *target {
        bound *= 2;
    }
    binary_search_range(sorted, target, bound / 2, bound.min(n - 1) + 1)
}

/// Walks the slice in `sqrt(n)` strides, then scans one block linearly.
pub fn jump_search<T: PartialOrd>(sorted: &[T], target: &T) -> Option<usize> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let step = ((n as f64).sqrt() as usize).max(1);
    let mut block_start = 0;
    let mut block_end = step.min(n);
    while sorted[block_end - 1] < *target {
        block_start = block_end;
        if block_start >= n {
            return None;
        }
        block_end = (block_end + step).min(n);
    }
    for (offset, value) in sorted[block_start..block_end].iter().enumerate() {
        if value == target {
            return Some(block_start + offset);
        }
        if !(value < target) {
            break;
        }
    }
    None
}

/// Probes where `target` would sit if values were evenly spread between the
/// ends of the window. O(log log n) on uniform data, O(n) worst case.
pub fn interpolation_search<T>(sorted: &[T], target: &T) -> Option<usize>
where
    T: Copy + PartialOrd + Into<f64>,
{
    if sorted.is_empty() {
        return None;
    }
    let wanted: f64 = (*target).into();
    let (mut lo, mut hi) = (0, sorted.len() - 1);
    while lo <= hi {
        let lo_value: f64 = sorted[lo].into();
        let hi_value: f64 = sorted[hi].into();
        if wanted < lo_value || wanted > hi_value {
            return None;
        }
        if hi_value == lo_value {
            return if lo_value == wanted { Some(lo) } else { None };
        }
        let ratio = (wanted - lo_value) / (hi_value - lo_value);
        let pos = (lo + (ratio * (hi - lo) as f64) as usize).clamp(lo, hi);
        let value: f64 = sorted[pos].into();
        if value == wanted {
            return Some(pos);
        }
        if value < wanted {
            lo = pos + 1;
        } else {
            if pos == 0 {
                return None;
            }
            hi = pos - 1;
        }
    }
    None
}

/// Index of the first element for which `pred` is false, given that `pred`
/// holds for a prefix of `items` and fails for the rest.
pub fn partition_point_by<T, F>(items: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let (mut lo, mut hi) = (0, items.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(&items[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
