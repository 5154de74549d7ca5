use super::{Bvh, BvhNode};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::query::Ray;
use smallvec::SmallVec;

// Traversal stacks spill on the heap past this depth.
const STACK_SIZE: usize = 32;

/// Depth-first iterator over the leaves of a [`Bvh`] whose node boxes pass a predicate.
///
/// Returned by [`Bvh::leaves`].
pub struct Leaves<'a, Check> {
    bvh: &'a Bvh,
    stack: SmallVec<[&'a BvhNode; STACK_SIZE]>,
    check: Check,
}

impl<'a, Check: Fn(&BvhNode) -> bool> Iterator for Leaves<'a, Check> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while let Some(node) = self.stack.pop() {
            if !(self.check)(node) {
                continue;
            }

            if let Some(index) = node.leaf_index() {
                return Some(index);
            }

            let [left, right] = self.bvh.children(node);
            self.stack.push(right);
            self.stack.push(left);
        }

        None
    }
}

impl Bvh {
    /// Iterates through the leaves, in depth-first order.
    ///
    /// `check` is called on every visited node, internal or leaf. Returning `false` skips
    /// the node and its whole subtree.
    pub fn leaves<Check: Fn(&BvhNode) -> bool>(&self, check: Check) -> Leaves<'_, Check> {
        Leaves {
            bvh: self,
            stack: self.root.iter().collect(),
            check,
        }
    }

    /// Iterates through all the leaves with an AABB intersecting the given `aabb`.
    pub fn intersect_aabb<'a>(
        &'a self,
        aabb: &'a Aabb,
    ) -> Leaves<'a, impl Fn(&BvhNode) -> bool + 'a> {
        self.leaves(move |node: &BvhNode| node.aabb().intersects(aabb))
    }

    /// Iterates through all the leaves with an AABB crossed by the vertical line through
    /// `(x, y)`.
    ///
    /// These are the only candidates for the hits of a ray cast along `±Z` from that column.
    pub fn column_leaves(&self, x: Real, y: Real) -> Leaves<'_, impl Fn(&BvhNode) -> bool> {
        self.leaves(move |node: &BvhNode| node.crosses_column(x, y))
    }

    /// Finds the leaf with the lowest cost.
    ///
    /// `node_cost` gives a lower bound of the cost of every leaf below a node, `Real::MAX`
    /// excluding the node altogether. `leaf_cost` gives the actual cost of a leaf along with
    /// any data to report with it. Both closures receive the best cost found so far. Only
    /// costs strictly smaller than `max_cost` are reported.
    pub fn find_best<T>(
        &self,
        max_cost: Real,
        node_cost: impl Fn(&BvhNode, Real) -> Real,
        leaf_cost: impl Fn(u32, Real) -> Option<(Real, T)>,
    ) -> Option<(u32, T)> {
        let mut best = None;
        let mut best_cost = max_cost;
        let mut stack: SmallVec<[(Real, &BvhNode); STACK_SIZE]> = SmallVec::new();

        if let Some(root) = &self.root {
            stack.push((node_cost(root, best_cost), root));
        }

        while let Some((bound, node)) = stack.pop() {
            if bound >= best_cost {
                continue;
            }

            if let Some(index) = node.leaf_index() {
                if let Some((cost, data)) = leaf_cost(index, best_cost) {
                    if cost < best_cost {
                        best_cost = cost;
                        best = Some((index, data));
                    }
                }
                continue;
            }

            let [left, right] = self.children(node);
            let left = (node_cost(left, best_cost), left);
            let right = (node_cost(right, best_cost), right);

            // The most promising child is popped first.
            if left.0 <= right.0 {
                stack.push(right);
                stack.push(left);
            } else {
                stack.push(left);
                stack.push(right);
            }
        }

        best
    }

    /// Casts a ray on this BVH using the provided leaf ray-cast function.
    ///
    /// `primitive_check` maps a leaf index and the time of impact of the nearest hit so far
    /// to the time of impact of that leaf's primitive, if hit.
    ///
    /// Returns the index of the leaf with the nearest hit, and its time of impact.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        primitive_check: impl Fn(u32, Real) -> Option<Real>,
    ) -> Option<(u32, Real)> {
        self.find_best(
            max_time_of_impact,
            |node: &BvhNode, best_so_far| node.cast_ray(ray, best_so_far),
            |leaf, best_so_far| primitive_check(leaf, best_so_far).map(|toi| (toi, toi)),
        )
    }
}
