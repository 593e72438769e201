/// A grid of backpointers indexed by (seq 1 position, seq 2 position),
/// where row 0 and column 0 hold the boundary cells.
pub trait TraceGrid<T: Copy> {
    fn get(&self, row: usize, col: usize) -> T;
    fn set(&mut self, row: usize, col: usize, value: T);
}

/// A dense (n+1) x (m+1) backpointer matrix stored as a flat vector.
#[derive(Debug, Clone)]
pub struct TraceMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> TraceMatrix<T> {
    pub fn new(seq_1_length: usize, seq_2_length: usize) -> Self {
        let rows = seq_1_length + 1;
        let cols = seq_2_length + 1;
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    #[inline(always)]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}

impl<T: Copy + Default> TraceGrid<T> for TraceMatrix<T> {
    #[inline(always)]
    fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline(always)]
    fn set(&mut self, row: usize, col: usize, value: T) {
        let idx = self.idx(row, col);
        self.data[idx] = value;
    }
}

/// A backpointer matrix that only stores the cells within
/// `band_width` of the main diagonal.
///
/// Each row is a window of 2 * `band_width` + 1 cells, where
/// window offset k holds column `row + k - band_width`.
#[derive(Debug, Clone)]
pub struct BandedTraceMatrix<T> {
    band_width: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> BandedTraceMatrix<T> {
    /// Only the seq 1 length sizes the storage; columns are addressed through the band.
    pub fn new(seq_1_length: usize, band_width: usize) -> Self {
        Self {
            band_width,
            data: vec![T::default(); (seq_1_length + 1) * Self::window_width(band_width)],
        }
    }

    pub fn window_width(band_width: usize) -> usize {
        2 * band_width + 1
    }

    /// The window offset of a cell, if it lies inside the band.
    #[inline(always)]
    pub fn offset(&self, row: usize, col: usize) -> Option<usize> {
        let k = (col + self.band_width).checked_sub(row)?;
        (k < Self::window_width(self.band_width)).then_some(k)
    }
}

impl<T: Copy + Default> TraceGrid<T> for BandedTraceMatrix<T> {
    /// Cells outside of the band read as the default value.
    #[inline(always)]
    fn get(&self, row: usize, col: usize) -> T {
        match self.offset(row, col) {
            Some(k) => self.data[row * Self::window_width(self.band_width) + k],
            None => T::default(),
        }
    }

    #[inline(always)]
    fn set(&mut self, row: usize, col: usize, value: T) {
        match self.offset(row, col) {
            Some(k) => {
                let idx = row * Self::window_width(self.band_width) + k;
                self.data[idx] = value;
            }
            None => debug_assert!(false, "write outside of band: ({row}, {col})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_dense_get_set() {
        let mut matrix: TraceMatrix<u8> = TraceMatrix::new(3, 4);
        matrix.set(3, 4, 7);
        matrix.set(0, 1, 2);
        check!(matrix.get(3, 4) == 7);
        check!(matrix.get(0, 1) == 2);
        check!(matrix.get(1, 0) == 0);
    }

    #[test]
    fn test_banded_offsets() {
        let mut matrix: BandedTraceMatrix<u8> = BandedTraceMatrix::new(10, 2);
        check!(matrix.offset(5, 3) == Some(0));
        check!(matrix.offset(5, 7) == Some(4));
        check!(matrix.offset(5, 8) == None);
        check!(matrix.offset(5, 2) == None);

        matrix.set(5, 6, 9);
        check!(matrix.get(5, 6) == 9);
        check!(matrix.get(5, 9) == 0);
    }
}
