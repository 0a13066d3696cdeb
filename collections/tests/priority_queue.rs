use collections::PriorityQueue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_heap_property<T>(queue: &PriorityQueue<T>) {
    let priorities: Vec<f32> = queue.iter().map(|(_, priority)| priority).collect();
    for index in 1..priorities.len() {
        let parent = (index - 1) / 2;
        assert!(
            priorities[index] >= priorities[parent],
            "node {} ({}) is smaller than parent {} ({})",
            index,
            priorities[index],
            parent,
            priorities[parent]
        );
    }
}

#[test]
fn test_empty_queue() {
    let mut queue: PriorityQueue<u32> = PriorityQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.peek(), None);
    assert_eq!(queue.peek_priority(), None);
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn test_lowest_priority_first() {
    let mut queue = PriorityQueue::new();
    assert!(queue.enqueue("far", 30.0));
    assert!(queue.enqueue("near", 1.0));
    assert!(queue.enqueue("mid", 10.0));
    assert_eq!(queue.peek(), Some(&"near"));
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.dequeue_with_priority(), Some(("near", 1.0)));
    assert_eq!(queue.dequeue(), Some("mid"));
    assert_eq!(queue.dequeue(), Some("far"));
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn test_dequeue_order_is_non_decreasing() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(42);
    let mut queue = PriorityQueue::new();
    for i in 0..1000u32 {
        queue.enqueue(i, rng.gen_range(-500.0..500.0));
        if i % 97 == 0 {
            assert_heap_property(&queue);
        }
    }
    assert_heap_property(&queue);

    let mut last = f32::NEG_INFINITY;
    let mut count = 0;
    while let Some((_, priority)) = queue.dequeue_with_priority() {
        assert!(priority >= last);
        last = priority;
        count += 1;
        if count % 101 == 0 {
            assert_heap_property(&queue);
        }
    }
    assert_eq!(count, 1000);
}

#[test]
fn test_interleaved_operations_keep_heap_property() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(9);
    let mut queue = PriorityQueue::new();
    for i in 0..5000u32 {
        if rng.gen_bool(0.6) {
            queue.enqueue(i, rng.gen_range(0.0..100.0));
        } else {
            let _ = queue.dequeue();
        }
        assert_heap_property(&queue);
    }
}

#[test]
fn test_update_priority() {
    let mut queue = PriorityQueue::new();
    for (item, priority) in [(1u32, 5.0), (2, 10.0), (3, 15.0), (4, 20.0)] {
        queue.enqueue(item, priority);
    }

    // Decrease moves towards the root.
    assert!(queue.update_priority(&4, 1.0));
    assert_eq!(queue.peek(), Some(&4));
    assert_heap_property(&queue);

    // Increase sinks.
    assert!(queue.update_priority(&4, 100.0));
    assert_eq!(queue.peek(), Some(&1));
    assert_heap_property(&queue);

    assert!(!queue.update_priority(&99, 0.0));
    assert!(!queue.update_priority(&1, f32::NAN));

    let order: Vec<u32> = std::iter::from_fn(|| queue.dequeue()).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
}

#[test]
fn test_contains() {
    let mut queue = PriorityQueue::new();
    queue.enqueue('a', 1.0);
    queue.enqueue('b', 2.0);
    assert!(queue.contains(&'a'));
    assert!(!queue.contains(&'z'));
    let _ = queue.dequeue();
    assert!(!queue.contains(&'a'));
}

#[test]
fn test_bounded_queue_rejects_when_full() {
    let mut queue = PriorityQueue::with_max_capacity(2);
    assert!(queue.enqueue(1, 1.0));
    assert!(queue.enqueue(2, 2.0));
    assert!(queue.is_full());
    assert!(!queue.enqueue(3, 0.0));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.peek(), Some(&1));

    let _ = queue.dequeue();
    assert!(queue.enqueue(3, 0.0));
    assert_eq!(queue.peek(), Some(&3));
}

#[test]
fn test_nan_priority_is_rejected() {
    let mut queue = PriorityQueue::new();
    assert!(!queue.enqueue(1, f32::NAN));
    assert!(queue.is_empty());
}

#[test]
fn test_clear() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(1, 1.0);
    queue.enqueue(2, 0.5);
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), None);
}
