//! Calibration block sorting and wafer-relative position computation.

use super::types::{CalibrationBlock, RelativeBlock, WaferGeometry};

/// Sort calibration blocks by `(block_number, x, y)` ascending, in place.
pub fn sort_blocks(blocks: &mut [CalibrationBlock]) {
    blocks.sort_by(|a, b| {
        (a.block_number, a.x_mm, a.y_mm)
            .partial_cmp(&(b.block_number, b.x_mm, b.y_mm))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Compute block positions relative to the wafer center.
///
/// Blocks are sorted by `(block_number, x, y)` before the translation, and
/// the relative results are re-sorted by the same key afterwards. The second
/// sort is an order-preserving no-op (translation by a fixed vector keeps
/// the key order) and is retained so the output order is self-evidently the
/// sort order.
///
/// # Parameters
///
/// * `blocks` - Calibration blocks in appearance order
/// * `geometry` - Wafer geometry providing the center reference
///
/// # Returns
///
/// Relative positions sorted by `(block_number, rel_x, rel_y)`.
pub fn relative_positions(blocks: &[CalibrationBlock], geometry: &WaferGeometry) -> Vec<RelativeBlock> {
    let mut sorted: Vec<CalibrationBlock> = blocks.to_vec();
    sort_blocks(&mut sorted);

    let mut relative: Vec<RelativeBlock> = sorted
        .iter()
        .map(|block| RelativeBlock {
            block_number: block.block_number,
            rel_x_mm: block.x_mm - geometry.center_x_mm,
            rel_y_mm: block.y_mm - geometry.center_y_mm,
        })
        .collect();

    relative.sort_by(|a, b| {
        (a.block_number, a.rel_x_mm, a.rel_y_mm)
            .partial_cmp(&(b.block_number, b.rel_x_mm, b.rel_y_mm))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> WaferGeometry {
        WaferGeometry {
            center_x_mm: 50.0,
            center_y_mm: 50.0,
            size_x_mm: 100.0,
            size_y_mm: 100.0,
        }
    }

    #[test]
    fn test_relative_position_subtracts_center() {
        let blocks = [CalibrationBlock {
            block_number: 1,
            x_mm: 45.0,
            y_mm: 55.0,
        }];
        let relative = relative_positions(&blocks, &geometry());

        assert_eq!(relative[0].rel_x_mm, -5.0);
        assert_eq!(relative[0].rel_y_mm, 5.0);
    }

    #[test]
    fn test_sort_key_is_block_then_x_then_y() {
        let mut blocks = vec![
            CalibrationBlock { block_number: 2, x_mm: 1.0, y_mm: 1.0 },
            CalibrationBlock { block_number: 1, x_mm: 9.0, y_mm: 1.0 },
            CalibrationBlock { block_number: 1, x_mm: 3.0, y_mm: 7.0 },
            CalibrationBlock { block_number: 1, x_mm: 3.0, y_mm: 2.0 },
        ];
        sort_blocks(&mut blocks);

        let order: Vec<(u32, f64, f64)> = blocks.iter().map(|b| (b.block_number, b.x_mm, b.y_mm)).collect();
        assert_eq!(order, vec![(1, 3.0, 2.0), (1, 3.0, 7.0), (1, 9.0, 1.0), (2, 1.0, 1.0)]);
    }

    #[test]
    fn test_translation_preserves_sort_order() {
        let blocks = vec![
            CalibrationBlock { block_number: 2, x_mm: 10.0, y_mm: 20.0 },
            CalibrationBlock { block_number: 1, x_mm: 70.0, y_mm: 30.0 },
            CalibrationBlock { block_number: 1, x_mm: 40.0, y_mm: 60.0 },
        ];
        let relative = relative_positions(&blocks, &geometry());

        let mut sorted = blocks.clone();
        sort_blocks(&mut sorted);
        let absolute_order: Vec<(u32, f64)> = sorted.iter().map(|b| (b.block_number, b.x_mm)).collect();
        let relative_order: Vec<(u32, f64)> = relative.iter().map(|b| (b.block_number, b.rel_x_mm + 50.0)).collect();
        assert_eq!(absolute_order, relative_order);
    }
}
