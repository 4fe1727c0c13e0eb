#[cfg(test)]
mod tests {
    use tbox_gist::{
        pick_split, union_all, Axis, GistError, GistOpClass, SplitConfig, SplitKind, TBox,
        TBoxOpClass,
    };
    use tbox_int_test::test_util::{random_grid_boxes, random_sequences, MemoryGist, TFloatSeq};

    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    fn assert_valid_split(entries: &[TBox], config: &SplitConfig) {
        let split = pick_split(entries, config).unwrap();

        let mut seen = vec![0usize; entries.len()];
        for &i in split.left.iter().chain(split.right.iter()) {
            seen[i] += 1;
        }
        assert!(seen.iter().all(|&c| c == 1), "not a partition: {:?}", seen);
        assert!(!split.left.is_empty() && !split.right.is_empty());
        assert_eq!(
            split.left_box.union(&split.right_box),
            union_all(entries).unwrap()
        );

        if !split.is_fallback() {
            assert!(
                split.ratio() > config.min_split_ratio(),
                "ratio {} with {} entries",
                split.ratio(),
                entries.len()
            );
        }
    }

    #[test]
    fn test_three_boxes_split_along_value_axis() {
        let op: TBoxOpClass<TBox> = TBoxOpClass::default();
        let a = TBox::new(0.0, 10.0, 0.0, 5.0);
        let b = TBox::new(20.0, 30.0, 0.0, 5.0);
        let c = TBox::new(5.0, 15.0, 10.0, 20.0);

        let split = op.pick_split(&[a, b, c]).unwrap();
        assert_eq!(split.left, vec![0, 2]);
        assert_eq!(split.right, vec![1]);
        assert_eq!(split.left_box, a.union(&c));
        assert_eq!(split.right_box, b);
        assert!(matches!(split.kind, SplitKind::DoubleSorting(s) if s.axis == Axis::Value));
    }

    #[test]
    fn test_random_grid_nodes() {
        let config = SplitConfig::default();
        for seed in 0..200u64 {
            let size = 2 + (seed as usize * 7) % 150;
            assert_valid_split(&random_grid_boxes(seed, size), &config);
        }
    }

    #[test]
    fn test_random_grid_nodes_with_custom_ratio() {
        let config = SplitConfig::new(0.1).unwrap();
        for seed in 0..100u64 {
            assert_valid_split(&random_grid_boxes(seed, 40), &config);
        }
    }

    #[test]
    fn test_sequence_keys() {
        let op: TBoxOpClass<TFloatSeq> = TBoxOpClass::default();
        let keys: Vec<TBox> = random_sequences(3, 120)
            .iter()
            .map(|s| op.compress(s))
            .collect();
        assert_valid_split(&keys, op.config());
    }

    #[test]
    fn test_identical_boxes_bisect() {
        let entries = vec![TBox::new(5.0, 5.0, 100.0, 200.0); 33];
        let split = pick_split(&entries, &SplitConfig::default()).unwrap();
        assert!(split.is_fallback());
        assert_eq!(split.left, (0..16).collect::<Vec<_>>());
        assert_eq!(split.right, (16..33).collect::<Vec<_>>());
        assert_eq!(split.left_box, entries[0]);
        assert_eq!(split.right_box, entries[0]);
    }

    #[test]
    fn test_infinite_and_nan_bounds() {
        let mut entries = random_grid_boxes(11, 30);
        entries.push(TBox::new(f64::NEG_INFINITY, f64::INFINITY, 0.0, 1.0));
        entries.push(TBox::new(3.0, f64::NAN, 4.0, f64::NAN));
        entries.push(TBox::new(-0.0, 0.0, -0.0, 0.0));
        assert_valid_split(&entries, &SplitConfig::default());
    }

    #[test]
    fn test_degenerate_input_errors() {
        let config = SplitConfig::default();
        assert_eq!(pick_split(&[], &config), Err(GistError::EmptyInput));
        assert_eq!(
            pick_split(&[TBox::default()], &config),
            Err(GistError::TooFewEntries(1))
        );
    }

    #[test]
    fn test_tree_built_from_splits_stays_consistent() {
        let mut tree: MemoryGist<TBoxOpClass<TBox>> = MemoryGist::with_default_opclass(8);
        for (id, key) in random_grid_boxes(99, 2_000).into_iter().enumerate() {
            tree.insert(&key, id).unwrap();
        }
        assert_eq!(tree.len(), 2_000);
        assert!(tree.depth() > 2);
        tree.check_invariants().unwrap();
    }
}
