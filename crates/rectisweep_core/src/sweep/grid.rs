//! Row-major storage for sweep results.

use serde::{Deserialize, Serialize};

/// N-dimensional grid with a flat backing array.
///
/// The last dimension varies fastest, so for a `[outer, inner]` sweep one
/// outer value's results are contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T: Clone> SweepGrid<T> {
    /// Create a grid of the given shape with every cell set to `fill`.
    pub fn new(shape: Vec<usize>, fill: T) -> Self {
        let len = shape.iter().product();
        let strides = strides_for(&shape);
        Self {
            data: vec![fill; len],
            shape,
            strides,
        }
    }
}

impl<T> SweepGrid<T> {
    /// Wrap row-major data. Returns `None` when the length does not match the shape.
    pub fn from_data(shape: Vec<usize>, data: Vec<T>) -> Option<Self> {
        if data.len() != shape.iter().product::<usize>() {
            return None;
        }
        let strides = strides_for(&shape);
        Some(Self {
            data,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    fn offset(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        indices
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .try_fold(0, |acc, ((&idx, &size), &stride)| {
                (idx < size).then_some(acc + idx * stride)
            })
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.offset(indices).map(|i| &self.data[i])
    }

    /// Store a value. Returns false when the indices are out of range.
    pub fn set(&mut self, indices: &[usize], value: T) -> bool {
        match self.offset(indices) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// All index tuples in storage order
    pub fn indices(&self) -> GridIndices {
        GridIndices {
            shape: self.shape.clone(),
            current: vec![0; self.shape.len()],
            done: self.data.is_empty(),
        }
    }

    /// Walk one dimension with every other index fixed.
    ///
    /// `fixed` must name an index for every dimension except `dim`. Returns
    /// `(index along dim, value)` pairs.
    pub fn slice_1d(&self, dim: usize, fixed: &[Option<usize>]) -> Option<Vec<(usize, &T)>> {
        if dim >= self.ndim() || fixed.len() != self.ndim() {
            return None;
        }
        let mut indices = Vec::with_capacity(fixed.len());
        for (d, f) in fixed.iter().enumerate() {
            match f {
                Some(i) if d != dim => indices.push(*i),
                None if d != dim => return None,
                _ => indices.push(0),
            }
        }

        (0..self.shape[dim])
            .map(|idx| {
                indices[dim] = idx;
                self.get(&indices).map(|v| (idx, v))
            })
            .collect()
    }
}

fn strides_for(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Iterator over grid indices, last dimension fastest
#[derive(Debug, Clone)]
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        self.done = true;
        for d in (0..self.shape.len()).rev() {
            self.current[d] += 1;
            if self.current[d] < self.shape[d] {
                self.done = false;
                break;
            }
            self.current[d] = 0;
        }

        Some(item)
    }
}
