//! Shared fixtures for the crate's tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::region::Region;

mod integration;

/// 100 distinct points on a 100 x 100 grid, identified by their position in the list.
pub(crate) fn sample_points() -> Vec<Point<f64, usize>> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
        [49, 60],
        [4, 98],
        [71, 15],
        [60, 25],
        [38, 84],
        [52, 38],
        [94, 51],
        [13, 25],
        [77, 73],
        [88, 87],
        [6, 27],
        [58, 22],
        [53, 28],
        [27, 91],
        [96, 98],
        [93, 14],
        [22, 93],
        [45, 94],
        [18, 28],
        [35, 15],
        [19, 81],
        [20, 81],
        [67, 53],
        [43, 3],
        [47, 66],
        [48, 34],
        [46, 12],
        [32, 38],
        [43, 12],
        [39, 94],
        [88, 62],
        [66, 14],
        [84, 30],
        [72, 81],
        [41, 92],
        [26, 4],
        [6, 76],
        [47, 21],
        [57, 70],
        [71, 82],
        [50, 68],
        [96, 18],
        [40, 31],
        [78, 53],
        [71, 90],
        [32, 14],
        [55, 6],
        [32, 88],
        [62, 32],
        [21, 67],
        [73, 81],
        [44, 64],
        [29, 50],
        [70, 5],
        [6, 22],
        [68, 3],
        [11, 23],
        [20, 42],
        [21, 73],
        [63, 86],
        [9, 40],
        [99, 2],
        [99, 76],
        [56, 77],
        [83, 6],
        [21, 72],
        [78, 30],
        [75, 53],
        [41, 11],
        [95, 20],
        [30, 38],
        [96, 82],
        [65, 48],
        [33, 18],
        [87, 28],
        [10, 10],
        [40, 34],
        [10, 20],
        [47, 29],
        [46, 78],
    ];

    coords
        .into_iter()
        .enumerate()
        .map(|(i, [x, y])| Point::new([f64::from(x), f64::from(y)], i))
        .collect()
}

/// Seeded random points with small integer coordinates, so ties on every axis are common.
pub(crate) fn random_points(
    rng: &mut StdRng,
    num_items: usize,
    dimensions: usize,
    max: i32,
) -> Vec<Point<i32, usize>> {
    (0..num_items)
        .map(|i| Point::new((0..dimensions).map(|_| rng.gen_range(0..=max)), i))
        .collect()
}

/// A seeded random region, with roughly half of its bounds given in reverse.
pub(crate) fn random_region(rng: &mut StdRng, dimensions: usize, max: i32) -> Region<i32> {
    Region::new(
        (0..dimensions).map(|_| (rng.gen_range(-1..=max + 1), rng.gen_range(-1..=max + 1))),
    )
}

/// Route `log` output through the test harness; set `RUST_LOG=debug` to see it.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The ids of every point in `region`, sorted, found by checking each point.
pub(crate) fn brute_force<N: IndexableNum>(
    points: &[Point<N, usize>],
    region: &Region<N>,
) -> Vec<usize> {
    let mut ids: Vec<usize> = points
        .iter()
        .filter(|p| region.contains_point(*p))
        .map(|p| *p.id())
        .collect();
    ids.sort_unstable();
    ids
}

/// Sort ids for comparison against [`brute_force`].
pub(crate) fn sorted<'a>(ids: impl IntoIterator<Item = &'a usize>) -> Vec<usize> {
    let mut ids: Vec<usize> = ids.into_iter().copied().collect();
    ids.sort_unstable();
    ids
}
