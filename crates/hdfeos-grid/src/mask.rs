//! Fill-value masking for extracted grid layers.

use ndarray::Array2;
use tracing::debug;

/// A 2-D field with its fill cells replaced by NaN.
///
/// AIRS grids mark cells with no retrieval by writing the dataset's
/// `_FillValue` verbatim, so masking compares for exact equality. The
/// canonical -9999.0 pattern survives the f32 to f64 widening done on read,
/// which keeps the comparison exact.
#[derive(Debug, Clone)]
pub struct MaskedField {
    values: Array2<f64>,
    fill_value: f64,
    masked: usize,
}

impl MaskedField {
    /// Replace every cell exactly equal to `fill_value` with NaN.
    pub fn new(mut values: Array2<f64>, fill_value: f64) -> Self {
        let mut masked = 0;
        for cell in values.iter_mut() {
            if *cell == fill_value {
                *cell = f64::NAN;
                masked += 1;
            }
        }

        debug!(masked, fill_value, "masked fill cells");
        Self {
            values,
            fill_value,
            masked,
        }
    }

    /// The masked data, NaN where the fill value was.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// (rows, cols) of the field.
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Fill value the mask was built from.
    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Number of cells that were masked.
    pub fn masked_cells(&self) -> usize {
        self.masked
    }

    /// Minimum and maximum over the unmasked cells.
    ///
    /// Returns `None` when every cell is masked.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &value in self.values.iter() {
            if !value.is_finite() {
                continue;
            }
            range = match range {
                Some((min, max)) => Some((min.min(value), max.max(value))),
                None => Some((value, value)),
            };
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_masks_exact_matches_only() {
        let field = array![[1.0, -9999.0], [-9998.5, 2.0]];
        let masked = MaskedField::new(field, -9999.0);

        assert!(masked.values()[[0, 1]].is_nan());
        assert_eq!(masked.values()[[0, 0]], 1.0);
        assert_eq!(masked.values()[[1, 0]], -9998.5);
        assert_eq!(masked.masked_cells(), 1);
    }

    #[test]
    fn test_mask_preserves_shape() {
        let field = Array2::from_elem((4, 7), 3.0);
        let masked = MaskedField::new(field, -9999.0);
        assert_eq!(masked.dim(), (4, 7));
        assert_eq!(masked.masked_cells(), 0);
    }

    #[test]
    fn test_finite_range_skips_masked_cells() {
        let field = array![[1.5, -9999.0], [0.5, 4.0]];
        let masked = MaskedField::new(field, -9999.0);
        assert_eq!(masked.finite_range(), Some((0.5, 4.0)));
    }

    #[test]
    fn test_finite_range_all_masked() {
        let field = Array2::from_elem((2, 2), -9999.0);
        let masked = MaskedField::new(field, -9999.0);
        assert_eq!(masked.masked_cells(), 4);
        assert_eq!(masked.finite_range(), None);
    }
}
