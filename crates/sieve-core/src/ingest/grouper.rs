/// Splits `items` into consecutive chunks of `group_size`, keeping order.
/// The last chunk may be shorter. A `group_size` of zero is treated as one.
#[must_use]
pub fn group<T: Clone>(items: &[T], group_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(group_size.max(1))
        .map(<[T]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let items: Vec<u32> = (0..57).collect();
        let groups = group(&items, 25);

        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![25, 25, 7]);
    }

    #[test]
    fn test_lossless_partition() {
        for n in [0_usize, 1, 24, 25, 26, 50, 101] {
            let items: Vec<usize> = (0..n).collect();
            let groups = group(&items, 25);

            assert_eq!(groups.len(), n.div_ceil(25));
            assert_eq!(groups.concat(), items);
        }
    }

    #[test]
    fn test_zero_group_size() {
        let groups = group(&[1, 2, 3], 0);
        assert_eq!(groups, vec![vec![1], vec![2], vec![3]]);
    }
}
