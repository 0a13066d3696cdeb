/// LIFO stack with an optional size limit.
///
/// A push past the limit is rejected, never truncated.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    data: Vec<T>,
    max_capacity: Option<usize>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(32),
            max_capacity: None,
        }
    }

    /// `0` means unbounded.
    pub fn with_max_capacity(max_capacity: usize) -> Self {
        let mut stack = Self::new();
        stack.set_max_capacity(max_capacity);
        stack
    }

    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.data.push(item);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max_capacity
            .map_or(false, |max_capacity| self.data.len() >= max_capacity)
    }

    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Applies a new limit (`0` for unbounded). Entries above the limit are
    /// dropped from the top.
    pub fn set_max_capacity(&mut self, max_capacity: usize) {
        if max_capacity == 0 {
            self.max_capacity = None;
            return;
        }
        self.max_capacity = Some(max_capacity);
        self.data.truncate(max_capacity);
        self.data.reserve(max_capacity.saturating_sub(self.data.len()).min(1024));
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
