//! Sliding-window smoothing of raw gaze estimates.

use std::collections::VecDeque;

/// Averages the most recent raw gaze points.
#[derive(Debug, Clone)]
pub struct GazeSmoother {
    window: VecDeque<[f32; 2]>,
    capacity: usize,
}

impl GazeSmoother {
    /// Creates a smoother over the last `capacity` points (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Adds a raw point, dropping the oldest on overflow, and returns the mean
    /// of the buffered points.
    pub fn push(&mut self, x: f32, y: f32) -> [f32; 2] {
        self.window.push_back([x, y]);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        let n = self.window.len() as f32;
        let (sum_x, sum_y) = self
            .window
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        [sum_x / n, sum_y / n]
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
