use num_traits::PrimInt;

/// Averages two `PrimInt`s without overflowing.
pub fn average<P: PrimInt>(x: P, y: P) -> P {
    let almost_average = (x >> 1) + (y >> 1);
    let extra_bit = ((x & P::one()) + (y & P::one())) >> 1;

    almost_average + extra_bit
}

/// Finds the smallest `d` in `start .. limit` such that `f(d) >= value`,
/// or `limit` if there is none; requires that `f` be monotonically
/// non-decreasing.
///
/// Does not call `f` outside the specified interval.
pub fn lower_bound<D, R, F>(mut start: D, mut limit: D, value: R, f: F) -> D
where
    D: PrimInt,
    R: Ord,
    F: Fn(D) -> R,
{
    while start < limit {
        let mid = average(start, limit);

        if f(mid) < value {
            start = mid + D::one();
        } else {
            limit = mid;
        }
    }

    start
}

/// Finds the last `d` in `start .. limit` with `f(d) < value`, given that
/// `f(start) < value`.
///
/// This is the summary entry (group or block) that contains the
/// `value`th matching bit when `f` yields cumulative counts.
pub fn last_below<D, R, F>(start: D, limit: D, value: R, f: F) -> D
where
    D: PrimInt,
    R: Ord,
    F: Fn(D) -> R,
{
    let found = lower_bound(start, limit, value, f);
    if found > start {
        found - D::one()
    } else {
        start
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn avg_2_4() {
        assert_eq!(3, average(2, 4));
    }

    #[test]
    fn avg_2_5() {
        assert_eq!(3, average(2, 5));
    }

    #[test]
    fn avg_3_4() {
        assert_eq!(3, average(3, 4));
    }

    #[test]
    fn avg_3_5() {
        assert_eq!(4, average(3, 5));
    }

    #[test]
    fn avg_big() {
        let big: usize = !0;
        assert_eq!(big - 1, average(big, big - 1));
        assert_eq!(big - 1, average(big, big - 2));
        assert_eq!(big - 1, average(big - 1, big - 1));
        assert_eq!(big - 2, average(big - 2, big - 1));
        assert_eq!(big - 2, average(big - 2, big - 2));
        assert_eq!(big - 2, average(big - 1, big - 3));
    }

    fn search_slice(value: usize, slice: &[usize]) -> usize {
        lower_bound(0, slice.len(), value, |index| slice[index])
    }

    const MAX_LEN: usize = 32;

    #[test]
    fn lower_bound_01() {
        let mut vec = Vec::<usize>::with_capacity(MAX_LEN);

        for len in 0..MAX_LEN + 1 {
            for result in 0..len {
                vec.clear();
                vec.extend((0..result).map(|_| 0));
                vec.extend((result..len).map(|_| 1));
                assert_eq!(result, search_slice(1, &vec));
            }

            vec.clear();
            vec.extend((0..len).map(|_| 0));
            assert_eq!(len, search_slice(1, &vec));
        }
    }

    #[test]
    fn lower_bound_ties_go_left() {
        let vec = vec![0, 2, 2, 2, 5, 5, 9];
        assert_eq!(0, search_slice(0, &vec));
        assert_eq!(1, search_slice(1, &vec));
        assert_eq!(1, search_slice(2, &vec));
        assert_eq!(4, search_slice(3, &vec));
        assert_eq!(6, search_slice(9, &vec));
        assert_eq!(7, search_slice(10, &vec));
    }

    #[test]
    fn last_below_cumulative_counts() {
        // Cumulative counts before each of four groups.
        let vec = vec![0, 3, 3, 7];
        let find = |rank| last_below(0, vec.len(), rank, |i| vec[i]);

        assert_eq!(0, find(1));
        assert_eq!(0, find(3));
        // The empty group at index 1 is skipped.
        assert_eq!(2, find(4));
        assert_eq!(2, find(7));
        assert_eq!(3, find(8));
    }

    #[test]
    fn last_below_respects_start() {
        let vec = vec![9, 9, 0, 4, 4, 6];
        assert_eq!(4, last_below(2, 5, 5, |i| vec[i]));
        assert_eq!(2, last_below(2, 5, 1, |i| vec[i]));
    }
}
