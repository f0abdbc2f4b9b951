use std::fmt;

/// Flat output of one forward pass for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub values: Vec<f32>,
}

/// A class index together with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub score: f32,
}

impl Features {
    pub fn new(values: Vec<f32>) -> Self {
        Features { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// numpy-style shape, e.g. `(2048,)`
    pub fn shape(&self) -> Shape {
        Shape(self.values.len())
    }

    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Returns up to `k` predictions ordered by descending score.
    ///
    /// Ties keep ascending index order. Scores are ordered with
    /// [`f32::total_cmp`], so a positive NaN ranks first and a negative NaN
    /// ranks last, without panicking.
    pub fn top_k(&self, k: usize) -> Vec<Prediction> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();

        // stable, so equal scores stay in index order
        order.sort_by(|&a, &b| self.values[b].total_cmp(&self.values[a]));
        order.truncate(k);

        order
            .into_iter()
            .map(|index| Prediction {
                index,
                score: self.values[index],
            })
            .collect()
    }
}

impl From<Vec<f32>> for Features {
    fn from(values: Vec<f32>) -> Self {
        Features::new(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(pub usize);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},)", self.0)
    }
}
