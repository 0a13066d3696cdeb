use std::fmt;

struct HeapNode<T> {
    item: T,
    priority: f32,
}

/// Array-backed binary min-heap: the lowest priority is served first.
///
/// Equal priorities come out in no particular order. An optional maximum
/// capacity turns the queue into a bounded one, where `enqueue` rejects
/// input instead of growing.
pub struct PriorityQueue<T> {
    heap: Vec<HeapNode<T>>,
    max_capacity: Option<usize>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::with_capacity(16),
            max_capacity: None,
        }
    }

    pub fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(max_capacity.min(1024)),
            max_capacity: Some(max_capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max_capacity
            .map_or(false, |max_capacity| self.heap.len() >= max_capacity)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Returns `false` without storing anything when the queue is full or
    /// `priority` is NaN.
    pub fn enqueue(&mut self, item: T, priority: f32) -> bool {
        if priority.is_nan() || self.is_full() {
            return false;
        }
        self.heap.push(HeapNode { item, priority });
        self.sift_up(self.heap.len() - 1);
        true
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.dequeue_with_priority().map(|(item, _)| item)
    }

    pub fn dequeue_with_priority(&mut self) -> Option<(T, f32)> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((root.item, root.priority))
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|node| &node.item)
    }

    pub fn peek_priority(&self) -> Option<f32> {
        self.heap.first().map(|node| node.priority)
    }

    /// Items with their priorities in heap-array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&T, f32)> + '_ {
        self.heap.iter().map(|node| (&node.item, node.priority))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].priority < self.heap[parent].priority {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.heap[right].priority < self.heap[left].priority {
                smaller = right;
            }
            if self.heap[index].priority <= self.heap[smaller].priority {
                break;
            }
            self.heap.swap(index, smaller);
            index = smaller;
        }
    }
}

impl<T: PartialEq> PriorityQueue<T> {
    /// Linear scan for `item`, then re-heapifies in the direction of the
    /// change. Returns `false` when the item is absent or the priority is
    /// NaN.
    pub fn update_priority(&mut self, item: &T, new_priority: f32) -> bool {
        if new_priority.is_nan() {
            return false;
        }
        let Some(index) = self.heap.iter().position(|node| node.item == *item) else {
            return false;
        };
        let old_priority = self.heap[index].priority;
        self.heap[index].priority = new_priority;
        if new_priority < old_priority {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.heap.iter().any(|node| node.item == *item)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("max_capacity", &self.max_capacity)
            .field("peek", &self.peek())
            .finish()
    }
}
