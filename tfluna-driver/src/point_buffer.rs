use std::collections::VecDeque;
use tfluna_data::Point;

/// Sliding window over the most recent points.
///
/// Once `capacity` points are held, every push evicts the oldest one.
#[derive(Clone, Debug)]
pub struct PointBuffer {
    points: VecDeque<Point>,
    capacity: usize,
}

impl PointBuffer {
    /// Creates an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> PointBuffer {
        let capacity = capacity.max(1);
        PointBuffer {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `point`, returning the evicted point if the buffer was full.
    pub fn push(&mut self, point: Point) -> Option<Point> {
        let evicted = if self.points.len() == self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Copies the points out, oldest first.
    pub fn to_vec(&self) -> Vec<Point> {
        self.points.iter().copied().collect()
    }
}
