//! Rolling Window Implementation

use crate::WindowError;
use std::collections::VecDeque;

/// Fixed-capacity window that evicts its oldest sample on overflow
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> RollingWindow<T> {
    /// Create an empty window; capacity must be non-zero
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Create a window already holding `capacity` copies of `value`
    pub fn prefilled(capacity: usize, value: T) -> Result<Self, WindowError> {
        let mut window = Self::new(capacity)?;
        window.fill(value);
        Ok(window)
    }

    /// Append a sample, evicting the oldest when full
    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Replace the contents with `capacity` copies of `value`
    pub fn fill(&mut self, value: T) {
        self.data.clear();
        self.data.extend(std::iter::repeat(value).take(self.capacity));
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<T> {
        self.data.back().copied()
    }

    /// Oldest sample still held
    pub fn oldest(&self) -> Option<T> {
        self.data.front().copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Copy + Into<f64>> RollingWindow<T> {
    /// Arithmetic mean of the current contents
    pub fn mean(&self) -> Result<f64, WindowError> {
        if self.data.is_empty() {
            return Err(WindowError::Empty);
        }
        let sum: f64 = self.data.iter().map(|&v| v.into()).sum();
        Ok(sum / self.data.len() as f64)
    }

    /// Sample standard deviation (N-1 denominator)
    pub fn standard_deviation(&self) -> Result<f64, WindowError> {
        let n = self.data.len();
        if n < 2 {
            return Err(WindowError::InsufficientSamples {
                required: 2,
                actual: n,
            });
        }

        let mean = self.mean()?;
        let sum_sq: f64 = self
            .data
            .iter()
            .map(|&v| {
                let d = v.into() - mean;
                d * d
            })
            .sum();

        Ok((sum_sq / (n - 1) as f64).sqrt())
    }
}
