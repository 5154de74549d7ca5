use super::BvhNode;
use crate::bounding_volume::Aabb;
use crate::math::Real;

const NUM_BINS: usize = 8;

#[derive(Copy, Clone)]
struct Bin {
    aabb: Aabb,
    count: usize,
}

impl Bin {
    fn empty() -> Self {
        Self {
            aabb: Aabb::new_invalid(),
            count: 0,
        }
    }

    fn absorb(&mut self, aabb: &Aabb, count: usize) {
        self.aabb.merge(aabb);
        self.count += count;
    }

    /// Surface-area heuristic: half the box area, times the number of leaves it holds.
    fn cost(&self) -> Real {
        if self.count == 0 {
            return 0.0;
        }

        let e = self.aabb.extents();
        (e.x * e.y + e.y * e.z + e.z * e.x) * self.count as Real
    }
}

/// Reorders `leaves` so that the first `mid` leaves form the left subtree, and returns `mid`.
///
/// The leaf centroids are binned along their widest axis and the boundary between two bins
/// with the lowest cost is selected. When every centroid falls on the same side, the leaves
/// are split at the median instead.
pub(super) fn split_binned(leaves: &mut [BvhNode]) -> usize {
    debug_assert!(leaves.len() > 1);
    let median = leaves.len() / 2;

    let centroids = Aabb::from_points(leaves.iter().map(|leaf| leaf.aabb().center()));
    let axis = centroids.extents().imax();
    let (start, width) = (centroids.mins[axis], centroids.extents()[axis]);
    if width <= 0.0 {
        return median;
    }

    let bin_of = |leaf: &BvhNode| -> usize {
        let t = (leaf.aabb().center()[axis] - start) / width;
        ((t * NUM_BINS as Real) as usize).min(NUM_BINS - 1)
    };

    let mut bins = [Bin::empty(); NUM_BINS];
    for leaf in leaves.iter() {
        bins[bin_of(leaf)].absorb(leaf.aabb(), 1);
    }

    // Costs of everything right of each boundary, accumulated from the last bin.
    let mut above = [Bin::empty(); NUM_BINS];
    let mut acc = Bin::empty();
    for (bin, slot) in bins.iter().zip(above.iter_mut()).rev() {
        acc.absorb(&bin.aabb, bin.count);
        *slot = acc;
    }

    let mut below = Bin::empty();
    let mut best = (Real::MAX, 0, 0);
    for boundary in 0..NUM_BINS - 1 {
        below.absorb(&bins[boundary].aabb, bins[boundary].count);
        let cost = below.cost() + above[boundary + 1].cost();
        if cost < best.0 {
            best = (cost, boundary, below.count);
        }
    }

    let (_, boundary, num_below) = best;
    if num_below == 0 || num_below == leaves.len() {
        return median;
    }

    let mut mid = 0;
    for i in 0..leaves.len() {
        if bin_of(&leaves[i]) <= boundary {
            leaves.swap(i, mid);
            mid += 1;
        }
    }

    mid
}
