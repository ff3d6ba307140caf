/// Fixed-capacity circular buffer of recently rendered samples. Once the buffer has wrapped, the
/// sample at `write_index` is the oldest one.
#[derive(Debug, Clone)]
pub struct History {
    samples: Vec<f32>,
    write_index: usize,
}

impl History {
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        Self {
            samples: vec![0.0; capacity],
            write_index: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % self.samples.len();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// All samples from oldest to newest, starting at `write_index`.
    pub fn iter_chronological(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = self.samples.split_at(self.write_index);
        older.iter().chain(newer.iter()).copied()
    }
}

/// Decides which rendered frames get recorded into the history. Counts continuously across
/// blocks so the stride is respected whatever block size the audio device picks.
#[derive(Debug, Clone, Copy)]
pub struct Decimation {
    stride: usize,
    count: usize,
}

impl Decimation {
    /// Panics if `stride` is 0.
    pub fn new(stride: usize) -> Self {
        assert!(stride > 0, "decimation stride must be non-zero");
        Self { stride, count: 0 }
    }

    /// Returns true if the current frame should be recorded.
    pub fn tick(&mut self) -> bool {
        let record = self.count == 0;
        self.count += 1;
        if self.count == self.stride {
            self.count = 0;
        }
        record
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_silent() {
        let history = History::new(4);
        assert_eq!(history.iter_chronological().collect::<Vec<_>>(), [0.0; 4]);
    }

    #[test]
    fn chronological_after_wrap() {
        let mut history = History::new(4);
        for sample in 1..=6 {
            history.push(sample as f32);
        }
        assert_eq!(history.write_index(), 2);
        assert_eq!(
            history.iter_chronological().collect::<Vec<_>>(),
            [3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn write_index_returns_to_zero_after_full_lap() {
        let mut history = History::new(3);
        for _ in 0..3 {
            history.push(1.0);
        }
        assert_eq!(history.write_index(), 0);
    }

    #[test]
    fn decimation_records_every_stride_frames() {
        let mut decimation = Decimation::new(4);
        let recorded = (0..12).filter(|_| decimation.tick()).count();
        assert_eq!(recorded, 3);
        let mut decimation = Decimation::new(4);
        let pattern = (0..5).map(|_| decimation.tick()).collect::<Vec<_>>();
        assert_eq!(pattern, [true, false, false, false, true]);
    }

    #[test]
    fn stride_of_one_records_everything() {
        let mut decimation = Decimation::new(1);
        assert!((0..10).all(|_| decimation.tick()));
    }
}
