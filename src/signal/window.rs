use std::collections::VecDeque;

/// Fixed-capacity sliding view over a session's sample sequence.
///
/// The window advances one sample per call and loops the sequence
/// indefinitely. Replacing the sequence must go through [`reset`], so a
/// cursor never outlives the samples it indexes.
///
/// [`reset`]: WindowBuffer::reset
pub struct WindowBuffer {
    points: VecDeque<f32>,
    cursor: usize,
    capacity: usize,
}

impl WindowBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Appends the sample under the cursor and evicts from the head once
    /// capacity is exceeded. At the end of the sequence the cursor wraps
    /// to 0 and the call appends nothing; appending resumes from the
    /// start on the next call. One idle tick per loop is observable and
    /// intended. An empty sequence pins the cursor at 0.
    pub fn advance(&mut self, samples: &[f32]) -> Option<f32> {
        if self.cursor >= samples.len() {
            self.cursor = 0;
            return None;
        }
        let value = samples[self.cursor];
        self.cursor += 1;
        self.points.push_back(value);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        Some(value)
    }

    /// Empties the window and rewinds the cursor. Called whenever the
    /// underlying sequence is replaced; nothing carries over.
    pub fn reset(&mut self) {
        self.points.clear();
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn snapshot(&self) -> Vec<f32> {
        self.points.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let mut window = WindowBuffer::new(3);
        window.advance(&samples);
        assert_eq!(window.snapshot(), vec![1.0]);
        window.advance(&samples);
        assert_eq!(window.snapshot(), vec![1.0, 2.0]);
        window.advance(&samples);
        assert_eq!(window.snapshot(), vec![1.0, 2.0, 3.0]);
        window.advance(&samples);
        assert_eq!(window.snapshot(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn wrap_produces_one_idle_tick() {
        let samples = [7.0, 9.0];
        let mut window = WindowBuffer::new(4);
        assert_eq!(window.advance(&samples), Some(7.0));
        assert_eq!(window.advance(&samples), Some(9.0));
        // The tick that would read past the end appends nothing.
        assert_eq!(window.advance(&samples), None);
        assert_eq!(window.cursor(), 0);
        assert_eq!(window.snapshot(), vec![7.0, 9.0]);
        // The following tick resumes from the start.
        assert_eq!(window.advance(&samples), Some(7.0));
        assert_eq!(window.snapshot(), vec![7.0, 9.0, 7.0]);
    }

    #[test]
    fn empty_sequence_never_appends() {
        let mut window = WindowBuffer::new(3);
        for _ in 0..5 {
            assert_eq!(window.advance(&[]), None);
        }
        assert_eq!(window.cursor(), 0);
        assert!(window.is_empty());
    }

    #[test]
    fn reset_discards_window_and_cursor() {
        let samples = [1.0, 2.0, 3.0];
        let mut window = WindowBuffer::new(3);
        window.advance(&samples);
        window.advance(&samples);
        window.reset();
        assert!(window.is_empty());
        assert_eq!(window.cursor(), 0);
    }
}
