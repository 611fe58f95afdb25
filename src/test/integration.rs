use std::thread;

use crate::kdtree::KDTree;
use crate::rangetree::RangeTree;
use crate::test::{
    brute_force, init_logging, random_points, random_region, rng, sample_points, sorted,
};
use crate::{merge_coincident, IndexableNum, Point, Region, SpatialIndex};

fn query_ids<N: IndexableNum>(index: &impl SpatialIndex<N, usize>, region: &Region<N>) -> Vec<usize> {
    sorted(index.range_ids(region).unwrap())
}

/// Ids stay borrowed from the index, whichever index it is.
fn ids_in<'a, N: IndexableNum, T>(index: &'a impl SpatialIndex<N, T>, region: &Region<N>) -> Vec<&'a T> {
    index.range_ids(region).unwrap()
}

#[test]
fn ids_are_borrowed_from_either_index() {
    let points = vec![
        Point::new([1., 1.], String::from("a")),
        Point::new([2., 4.], String::from("b")),
        Point::new([3., 1.], String::from("c")),
        Point::new([4., 3.], String::from("d")),
    ];
    let kdtree = KDTree::try_new(points.clone()).unwrap();
    let rangetree = RangeTree::try_new(points).unwrap();
    let region = Region::new([(1., 3.), (1., 4.)]);

    for mut ids in [ids_in(&kdtree, &region), ids_in(&rangetree, &region)] {
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}

#[test]
fn both_indexes_agree_on_sample_points() {
    init_logging();
    let points = sample_points();
    let kdtree = KDTree::try_new(points.clone()).unwrap();
    let rangetree = RangeTree::try_new(points.clone()).unwrap();

    for bounds in [
        [(20., 50.), (30., 70.)],
        [(0., 100.), (0., 100.)],
        [(33., 33.), (0., 100.)],
        [(90., 10.), (60., 40.)],
        [(55.5, 56.5), (0., 100.)],
    ] {
        let region = Region::new(bounds);
        let expected = brute_force(&points, &region);
        assert_eq!(query_ids(&kdtree, &region), expected, "{region}");
        assert_eq!(query_ids(&rangetree, &region), expected, "{region}");
    }
}

#[test]
fn both_indexes_agree_on_random_points() {
    init_logging();
    let mut rng = rng(42);
    for dimensions in 1..=3 {
        let points = random_points(&mut rng, 250, dimensions, 25);
        let kdtree = KDTree::try_new(points.clone()).unwrap();
        let rangetree = RangeTree::try_new(points.clone()).unwrap();
        assert_eq!(kdtree.num_items(), rangetree.num_items());

        for _ in 0..100 {
            let region = random_region(&mut rng, dimensions, 25);
            let expected = brute_force(&points, &region);
            assert_eq!(query_ids(&kdtree, &region), expected, "{region}");
            assert_eq!(query_ids(&rangetree, &region), expected, "{region}");
        }
    }
}

#[test]
fn range_tree_is_larger_than_kdtree() {
    let mut rng = rng(1);
    let points = random_points(&mut rng, 128, 2, 1_000_000);
    let kdtree = KDTree::try_new(points.clone()).unwrap();
    let rangetree = RangeTree::try_new(points).unwrap();
    assert!(kdtree.size() < rangetree.size());
}

#[test]
fn merged_points_in_both_indexes() {
    let points = vec![
        Point::new([1, 1], "a"),
        Point::new([2, 4], "b"),
        Point::new([1, 1], "c"),
        Point::new([3, 1], "d"),
    ];
    let merged = merge_coincident(points);
    assert_eq!(merged.len(), 3);

    let kdtree = KDTree::try_new(merged.clone()).unwrap();
    let rangetree = RangeTree::try_new(merged).unwrap();
    let region = Region::new([(0, 2), (0, 2)]);
    assert_eq!(kdtree.range_ids(&region).unwrap(), vec![&vec!["a", "c"]]);
    assert_eq!(rangetree.range_ids(&region).unwrap(), vec![&vec!["a", "c"]]);
}

#[test]
fn indexes_are_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KDTree<f64, usize>>();
    assert_send_sync::<RangeTree<f64, usize>>();

    let mut rng = rng(9);
    let points = random_points(&mut rng, 500, 2, 50);
    let kdtree = KDTree::try_new(points.clone()).unwrap();
    let rangetree = RangeTree::try_new(points.clone()).unwrap();
    let regions: Vec<_> = (0..8).map(|_| random_region(&mut rng, 2, 50)).collect();

    thread::scope(|s| {
        for region in &regions {
            let (kdtree, rangetree, points) = (&kdtree, &rangetree, &points);
            s.spawn(move || {
                let expected = brute_force(points, region);
                assert_eq!(query_ids(kdtree, region), expected);
                assert_eq!(query_ids(rangetree, region), expected);
            });
        }
    });
}
