use log::{debug, trace};

use crate::{address::Resolver, geometry::div_ceil, geometry::Viewport};

use super::Bitmap;

/// Number of full rows to pack before the final one.
///
/// One row more than visible is produced so that partially visible rows at
/// the bottom edge are drawn too.
fn leading_rows(total_bits: usize, start: usize, viewport: &Viewport) -> usize {
    if start >= total_bits {
        return 0;
    }
    let available = div_ceil(total_bits - start, viewport.row_width);
    available.min(viewport.visible_rows.saturating_add(1)) - 1
}

/// Pack the rows of `bytes` that are visible in `viewport`.
///
/// Returns `None` for an empty buffer. Rows are packed while all of their
/// bits are inside the buffer, with zero bits after the row width. The first
/// row that is cut off by the end of the buffer ends the bitmap and its bits
/// are returned as [`Bitmap::remainder`].
pub fn compute_bitmap(bytes: &[u8], viewport: &Viewport) -> Option<Bitmap> {
    if bytes.is_empty() {
        return None;
    }
    let resolver = Resolver::new(bytes);
    let total_bits = resolver.total_bits();
    let mut start = viewport.start_bit();
    let num_rows = leading_rows(total_bits, start, viewport);
    let bits_per_row = viewport.bits_per_row();
    let bytes_per_row = div_ceil(bits_per_row, 8);
    debug!(
        "Packing {}+1 rows of {} bits ({} bytes) from bit {} of {}",
        num_rows, bits_per_row, bytes_per_row, start, total_bits
    );

    let capacity = num_rows
        .saturating_add(1)
        .saturating_mul(bytes_per_row)
        .min(bytes.len() * 2);
    let mut data = Vec::with_capacity(capacity);
    let mut remainder = Vec::new();
    for row in 0..=num_rows {
        match resolver.row(start, bits_per_row) {
            Some(packed) => data.extend_from_slice(&packed),
            None => {
                trace!("Row {} at bit {} does not fit, keeping its bits", row, start);
                remainder = resolver.tail(start);
                break;
            }
        }
        start = start.saturating_add(viewport.row_width);
    }

    Some(Bitmap {
        data,
        width: bits_per_row,
        bytes_per_row,
        remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::compute_bitmap;
    use crate::geometry::Viewport;

    fn viewport(row_width: usize, visible_rows: usize, visible_columns: usize) -> Viewport {
        Viewport::new(row_width, visible_rows, visible_columns).unwrap()
    }

    #[test]
    fn single_row() {
        let bitmap = compute_bitmap(&[0xAC], &viewport(8, 1, 8)).unwrap();
        assert_eq!(bitmap.rows(), 1);
        assert_eq!(bitmap.bytes_per_row, 1);
        assert_eq!(bitmap.width, 8);
        assert_eq!(bitmap.data, vec![0xAC]);
        assert!(bitmap.remainder.is_empty());
    }

    #[test]
    fn further_row_is_packed_when_it_fits() {
        let bitmap = compute_bitmap(&[0xAC], &viewport(8, 5, 8)).unwrap();
        assert_eq!(bitmap.data, vec![0xAC]);
        assert!(bitmap.remainder.is_empty());
    }

    #[test]
    fn last_row_that_does_not_fit() {
        // 101011|00
        let bitmap = compute_bitmap(&[0xAC], &viewport(6, 5, 6)).unwrap();
        assert_eq!(bitmap.data, vec![0b1010_1000]);
        assert_eq!(bitmap.remainder, vec![false, false]);

        // the second row only has 4 of its 12 bits
        let bitmap = compute_bitmap(&[0xAC, 0x35], &viewport(12, 3, 12)).unwrap();
        assert_eq!(bitmap.bytes_per_row, 2);
        assert_eq!(bitmap.data, vec![0xAC, 0x30]);
        assert_eq!(bitmap.remainder, vec![false, true, false, true]);
    }

    #[test]
    fn offset_and_scroll() {
        let bytes = [0b1111_0000, 0b1010_1010, 0b0101_0101, 0xFF];
        let vp = viewport(8, 1, 8).with_offset(4).scrolled_to(0, 1);
        let bitmap = compute_bitmap(&bytes, &vp).unwrap();
        assert_eq!(bitmap.data, vec![0b1010_0101, 0b0101_1111]);
        assert!(bitmap.remainder.is_empty());

        let vp = viewport(8, 1, 4).scrolled_to(2, 0);
        let bitmap = compute_bitmap(&bytes, &vp).unwrap();
        assert_eq!(bitmap.width, 4);
        assert_eq!(bitmap.data, vec![0b1100_0010, 0b1010_1001]);
    }

    #[test]
    fn scrolled_past_the_end() {
        let vp = viewport(8, 4, 8).scrolled_to(0, 1);
        let bitmap = compute_bitmap(&[0xAC], &vp).unwrap();
        assert_eq!(bitmap.rows(), 0);
        assert!(bitmap.remainder.is_empty());

        let vp = viewport(8, 4, 8).with_offset(1000);
        let bitmap = compute_bitmap(&[0xAC], &vp).unwrap();
        assert_eq!(bitmap.rows(), 0);
        assert!(bitmap.remainder.is_empty());
    }

    #[test]
    fn unaligned_rows_that_end_on_the_last_byte() {
        let bitmap = compute_bitmap(&[0xAC, 0x35, 0xF0], &viewport(12, 2, 12)).unwrap();
        assert_eq!(bitmap.rows(), 2);
        assert_eq!(bitmap.data, vec![0xAC, 0x30, 0x5F, 0x00]);
        assert!(bitmap.remainder.is_empty());
    }

    #[test]
    fn padding_is_zero() {
        // 1010110 0001101 0111110 000
        let bitmap = compute_bitmap(&[0xAC, 0x35, 0xF0], &viewport(7, 2, 7)).unwrap();
        assert_eq!(bitmap.data, vec![0xAC, 0x1A, 0x7C]);
        assert_eq!(bitmap.remainder, Vec::<bool>::new());
    }

    #[test]
    fn huge_geometry_does_not_overflow() {
        let vp = Viewport::from_signed(0, i64::MAX, 0, i64::MAX, i64::MAX, i64::MAX).unwrap();
        let bitmap = compute_bitmap(&[0xAC], &vp).unwrap();
        assert_eq!(bitmap.rows(), 0);
        assert!(bitmap.remainder.is_empty());
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(compute_bitmap(&[], &viewport(8, 4, 8)), None);
    }

    #[test]
    fn rows_are_limited_to_the_viewport() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let bitmap = compute_bitmap(&bytes, &viewport(8, 2, 8)).unwrap();
        assert_eq!(bitmap.data, vec![0x01, 0x02, 0x03]);
        assert!(bitmap.remainder.is_empty());
    }
}
