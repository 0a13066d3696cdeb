//! In-place sorts driven by a "goes before" predicate.
//!
//! `before(a, b)` returns `true` when `a` must be placed ahead of `b`, so
//! `|a, b| a < b` sorts ascending and `|a, b| a > b` descending.

/// Quicksort with a Lomuto partition around the last element.
///
/// O(n log n) on average, O(n^2) on adversarial input. Not stable. Recursion
/// always goes into the smaller partition, so stack depth stays O(log n).
pub fn quick_sort<T: PartialOrd>(items: &mut [T]) {
    quick_sort_by(items, |a, b| a < b);
}

pub fn quick_sort_by<T, F>(items: &mut [T], mut before: F)
where
    F: FnMut(&T, &T) -> bool,
{
    quick_sort_range(items, &mut before);
}

fn quick_sort_range<T, F>(mut items: &mut [T], before: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while items.len() > 1 {
        let pivot = partition(items, before);
        let (left, right) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quick_sort_range(left, before);
            items = right;
        } else {
            quick_sort_range(right, before);
            items = left;
        }
    }
}

fn partition<T, F>(items: &mut [T], before: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let high = items.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if before(&items[j], &items[high]) {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, high);
    store
}

/// Top-down merge sort. Stable: equal elements keep their input order.
/// Needs O(n) scratch space.
pub fn merge_sort<T: PartialOrd + Clone>(items: &mut [T]) {
    merge_sort_by(items, |a, b| a < b);
}

pub fn merge_sort_by<T, F>(items: &mut [T], mut before: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    merge_sort_range(items, &mut before);
}

fn merge_sort_range<T, F>(items: &mut [T], before: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort_range(&mut items[..mid], before);
    merge_sort_range(&mut items[mid..], before);

    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();
    let (mut i, mut j) = (0, 0);
    for slot in items.iter_mut() {
        // Right wins only when strictly ahead.
        let take_left = j >= right.len() || (i < left.len() && !before(&right[j], &left[i]));
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

pub fn is_sorted_by<T, F>(items: &[T], mut before: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    items.windows(2).all(|pair| !before(&pair[1], &pair[0]))
}
