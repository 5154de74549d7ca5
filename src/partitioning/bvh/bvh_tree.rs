use super::bvh_build;
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::query::Ray;
use alloc::vec::Vec;

/// A node of a [`Bvh`].
///
/// A leaf bounds one primitive and stores the index it was given at construction. An internal
/// node bounds its two children and stores the index of their pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhNode {
    aabb: Aabb,
    index: u32,
    num_leaves: u32,
}

impl BvhNode {
    /// A leaf bounding the primitive `index`.
    #[inline]
    pub fn leaf(aabb: Aabb, index: u32) -> Self {
        Self {
            aabb,
            index,
            num_leaves: 1,
        }
    }

    #[inline]
    pub(super) fn internal(pair: u32, [left, right]: &[BvhNode; 2]) -> Self {
        Self {
            aabb: left.aabb.merged(&right.aabb),
            index: pair,
            num_leaves: left.num_leaves + right.num_leaves,
        }
    }

    /// The box bounding everything below this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.num_leaves == 1
    }

    /// The primitive index of this node, if it is a leaf.
    #[inline]
    pub fn leaf_index(&self) -> Option<u32> {
        self.is_leaf().then_some(self.index)
    }

    /// The number of leaves below this node (1 for a leaf).
    #[inline]
    pub fn num_leaves(&self) -> u32 {
        self.num_leaves
    }

    #[inline]
    pub(super) fn pair(&self) -> usize {
        self.index as usize
    }

    /// Does the vertical line through `(x, y)` cross this node's box?
    #[inline]
    pub fn crosses_column(&self, x: Real, y: Real) -> bool {
        let (mins, maxs) = (&self.aabb.mins, &self.aabb.maxs);
        x >= mins.x && x <= maxs.x && y >= mins.y && y <= maxs.y
    }

    /// The time of impact of `ray` with this node's box, `Real::MAX` if it misses.
    #[inline]
    pub fn cast_ray(&self, ray: &Ray, max_toi: Real) -> Real {
        self.aabb
            .cast_local_ray(ray, max_toi, true)
            .unwrap_or(Real::MAX)
    }
}

/// A static Bounding Volume Hierarchy, built once from a set of leaf AABBs.
///
/// This is the acceleration structure of [`TriMesh`](crate::shape::TriMesh): each leaf is
/// the AABB of one triangle and carries the triangle index. The tree is binary and its
/// internal nodes are split with a binned surface-area heuristic.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvh {
    pub(super) root: Option<BvhNode>,
    pub(super) pairs: Vec<[BvhNode; 2]>,
}

impl Bvh {
    /// An empty BVH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new BVH with a slice of AABBs.
    ///
    /// The leaf bounding `leaves[i]` is given the index `i`.
    pub fn from_leaves(leaves: &[Aabb]) -> Self {
        Self::from_iter(leaves.iter().copied().enumerate())
    }

    /// Creates a new BVH from `(index, aabb)` pairs.
    ///
    /// The indices are the ones reported by the queries.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<It>(leaves: It) -> Self
    where
        It: IntoIterator<Item = (usize, Aabb)>,
    {
        let mut leaves: Vec<_> = leaves
            .into_iter()
            .map(|(index, aabb)| BvhNode::leaf(aabb, index as u32))
            .collect();
        let mut result = Self::new();

        if !leaves.is_empty() {
            result.pairs.reserve(leaves.len() - 1);
            result.root = Some(result.build_subtree(&mut leaves));
        }

        result
    }

    fn build_subtree(&mut self, leaves: &mut [BvhNode]) -> BvhNode {
        if let [leaf] = leaves {
            return *leaf;
        }

        let mid = bvh_build::split_binned(leaves);
        let pair = self.pairs.len();
        // Reserve the slot so the parent of a pair always precedes it.
        self.pairs.push([BvhNode::leaf(Aabb::new_invalid(), 0); 2]);

        let (left, right) = leaves.split_at_mut(mid);
        let children = [self.build_subtree(left), self.build_subtree(right)];
        self.pairs[pair] = children;
        BvhNode::internal(pair as u32, &children)
    }

    /// The AABB bounding every leaf, or an invalid AABB if the tree is empty.
    pub fn root_aabb(&self) -> Aabb {
        self.root.map_or_else(Aabb::new_invalid, |root| *root.aabb())
    }

    /// Does this tree not contain any leaf?
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> u32 {
        self.root.map_or(0, |root| root.num_leaves())
    }

    /// The number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, |root| self.node_depth(root))
    }

    fn node_depth(&self, node: &BvhNode) -> u32 {
        if node.is_leaf() {
            return 1;
        }

        let [left, right] = self.children(node);
        1 + self.node_depth(left).max(self.node_depth(right))
    }

    /// The children of an internal node.
    pub(super) fn children(&self, node: &BvhNode) -> &[BvhNode; 2] {
        &self.pairs[node.pair()]
    }

    /// The AABBs of every node of this tree, root, internal nodes and leaves alike.
    ///
    /// Meant for debug-drawing the acceleration structure.
    pub fn node_aabbs(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.root
            .iter()
            .chain(self.pairs.iter().flatten())
            .map(|node| *node.aabb())
    }
}
