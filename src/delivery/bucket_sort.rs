//! Bucket sort for small sets of route distances.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort `values` in place by spreading them over `buckets` equal-width
/// ranges between the minimum and maximum, insertion-sorting each bucket.
pub fn bucket_sort(values: &mut Vec<i64>, buckets: usize, order: SortOrder) {
    if values.len() < 2 {
        return;
    }
    let buckets = buckets.max(1);

    let min = *values.iter().min().unwrap_or(&0);
    let max = *values.iter().max().unwrap_or(&0);
    let span = (max - min) as i128 + 1;

    let mut bins: Vec<Vec<i64>> = vec![Vec::new(); buckets];
    for &value in values.iter() {
        let idx = ((value - min) as i128 * buckets as i128 / span) as usize;
        bins[idx].push(value);
    }

    values.clear();
    match order {
        SortOrder::Ascending => {
            for bin in bins.iter_mut() {
                insertion_sort(bin, order);
                values.extend_from_slice(bin);
            }
        }
        SortOrder::Descending => {
            for bin in bins.iter_mut().rev() {
                insertion_sort(bin, order);
                values.extend_from_slice(bin);
            }
        }
    }
}

fn insertion_sort(bin: &mut [i64], order: SortOrder) {
    for i in 1..bin.len() {
        let item = bin[i];
        let mut j = i;
        while j > 0 && out_of_order(bin[j - 1], item, order) {
            bin[j] = bin[j - 1];
            j -= 1;
        }
        bin[j] = item;
    }
}

fn out_of_order(before: i64, item: i64, order: SortOrder) -> bool {
    match order {
        SortOrder::Ascending => before > item,
        SortOrder::Descending => before < item,
    }
}
