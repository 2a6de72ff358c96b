//! Property tests for batch iteration coverage

use super::*;
use proptest::prelude::*;

fn indexed_dataset(n: usize) -> DataSet {
    let mut data = DataSet::new();
    for i in 0..n {
        data.push(Instance::new().with_field("idx", i as i64)).unwrap();
    }
    data.set_input(&["idx"]).unwrap();
    data
}

fn seen_indices(batch: &Batch) -> Vec<usize> {
    batch.inputs["idx"]
        .flatten_numeric()
        .unwrap_or_default()
        .into_iter()
        .map(|v| v as usize)
        .collect()
}

proptest! {
    #[test]
    fn prop_batches_cover_dataset_once(n in 0usize..200, batch_size in 1usize..32, seed in any::<u64>()) {
        let data = indexed_dataset(n);
        let mut sampler = RandomSampler::with_seed(seed);
        let iter = BatchIter::new(&data, batch_size, &mut sampler).unwrap();

        let batches: Vec<Batch> = iter.collect();
        prop_assert_eq!(batches.len(), n.div_ceil(batch_size));

        let total: usize = batches.iter().map(Batch::size).sum();
        prop_assert_eq!(total, n);

        for batch in batches.iter().take(batches.len().saturating_sub(1)) {
            prop_assert_eq!(batch.size(), batch_size);
        }

        let mut seen: Vec<usize> = batches.iter().flat_map(seen_indices).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_size_hint_tracks_remaining(n in 1usize..100, batch_size in 1usize..16) {
        let data = indexed_dataset(n);
        let mut iter = BatchIter::new(&data, batch_size, &mut SequentialSampler).unwrap();
        let mut expected = n.div_ceil(batch_size);
        while expected > 0 {
            prop_assert_eq!(iter.len(), expected);
            prop_assert!(iter.next().is_some());
            expected -= 1;
        }
        prop_assert!(iter.next().is_none());
    }
}
