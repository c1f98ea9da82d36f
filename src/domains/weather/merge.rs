use geo::{BooleanOps, BoundingRect, Intersects, MultiPolygon, Rect};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};

/// How the connected components of the overlap graph are found.
/// Both strategies yield the same groups in the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Pairwise overlap tests into a disjoint-set, then one union fold per component.
    #[default]
    UnionFind,
    /// Repeated sweeps over a worklist of groups until a sweep merges nothing.
    Sweep,
}

/// A merged region and the input indices absorbed into it, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub shape: MultiPolygon<f64>,
    pub members: Vec<usize>,
}

impl Group {
    fn singleton(index: usize, shape: MultiPolygon<f64>) -> Self {
        Self { shape, members: vec![index] }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub sweeps: usize,
    pub pair_tests: usize,
    pub merges: usize,
}

/// Merge every chain of overlapping shapes into one group.
///
/// Groups come back ordered by their lowest member index. With zero or one
/// shape nothing is merged and the input is returned as singleton groups.
pub fn merge_overlapping(
    shapes: Vec<MultiPolygon<f64>>,
    strategy: MergeStrategy,
) -> (Vec<Group>, MergeStats) {
    if shapes.len() < 2 {
        let groups = shapes
            .into_iter()
            .enumerate()
            .map(|(i, shape)| Group::singleton(i, shape))
            .collect();
        return (groups, MergeStats::default());
    }

    merge_with(shapes, strategy, &union_groups)
}

/// Computes the union of two overlapping groups, or `None` if the geometry
/// kernel cannot. `None` makes the pair count as non-overlapping.
type UnionFn<'a> = &'a dyn Fn(&Group, &Group) -> Option<MultiPolygon<f64>>;

fn merge_with(
    shapes: Vec<MultiPolygon<f64>>,
    strategy: MergeStrategy,
    union: UnionFn<'_>,
) -> (Vec<Group>, MergeStats) {
    let mut stats = MergeStats::default();
    let groups = match strategy {
        MergeStrategy::UnionFind => merge_union_find(shapes, union, &mut stats),
        MergeStrategy::Sweep => {
            let singletons = shapes
                .into_iter()
                .enumerate()
                .map(|(i, shape)| Group::singleton(i, shape))
                .collect();
            sweep(singletons, union, &mut stats)
        }
    };
    (groups, stats)
}

fn sweep(mut groups: Vec<Group>, union: UnionFn<'_>, stats: &mut MergeStats) -> Vec<Group> {
    loop {
        stats.sweeps += 1;
        let mut merged = 0;
        let mut pending: VecDeque<Group> = groups.into();
        let mut survivors = Vec::with_capacity(pending.len());

        while let Some(mut current) = pending.pop_front() {
            let mut untouched = VecDeque::with_capacity(pending.len());
            while let Some(candidate) = pending.pop_front() {
                stats.pair_tests += 1;
                let absorbed = if current.shape.intersects(&candidate.shape) {
                    union(&current, &candidate)
                } else {
                    None
                };
                match absorbed {
                    Some(shape) => {
                        current.shape = shape;
                        current.members.extend(candidate.members);
                        merged += 1;
                    }
                    None => untouched.push_back(candidate),
                }
            }
            pending = untouched;
            survivors.push(current);
        }

        groups = survivors;
        stats.merges += merged;
        tracing::debug!(sweep = stats.sweeps, merged, groups = groups.len(), "merge sweep finished");
        if merged == 0 {
            break;
        }
    }

    for group in &mut groups {
        group.members.sort_unstable();
    }
    groups.sort_by_key(|g| g.members[0]);
    groups
}

fn merge_union_find(shapes: Vec<MultiPolygon<f64>>, union: UnionFn<'_>, stats: &mut MergeStats) -> Vec<Group> {
    let n = shapes.len();
    stats.sweeps = 1;
    let bounds: Vec<Option<Rect<f64>>> = shapes.iter().map(|s| s.bounding_rect()).collect();

    let mut sets = UnionFind::<usize>::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if !rects_overlap(bounds[i], bounds[j]) {
                continue;
            }
            stats.pair_tests += 1;
            if shapes[i].intersects(&shapes[j]) {
                sets.union(i, j);
            }
        }
    }

    // Components keyed by representative, in order of first appearance.
    let labels = sets.into_labeling();
    let mut slot_of: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    for (index, root) in labels.into_iter().enumerate() {
        let slot = *slot_of.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(index);
    }

    let mut groups = Vec::with_capacity(components.len());
    for members in components {
        match fold_component(&shapes, &members, union) {
            Some(group) => {
                stats.merges += members.len() - 1;
                groups.push(group);
            }
            // A union inside the component failed: the overlap graph no
            // longer holds, so rebuild this component pair by pair.
            None => {
                let singletons = members
                    .iter()
                    .map(|&m| Group::singleton(m, shapes[m].clone()))
                    .collect();
                groups.extend(sweep(singletons, union, stats));
            }
        }
    }

    groups.sort_by_key(|g| g.members[0]);
    tracing::debug!(groups = groups.len(), pair_tests = stats.pair_tests, "union-find merge finished");
    groups
}

/// Union of a whole component in ascending member order, `None` if any step fails.
fn fold_component(shapes: &[MultiPolygon<f64>], members: &[usize], union: UnionFn<'_>) -> Option<Group> {
    let (&first, rest) = members.split_first()?;
    let mut acc = Group::singleton(first, shapes[first].clone());
    for &m in rest {
        let next = Group::singleton(m, shapes[m].clone());
        acc.shape = union(&acc, &next)?;
        acc.members.push(m);
    }
    Some(acc)
}

fn union_groups(a: &Group, b: &Group) -> Option<MultiPolygon<f64>> {
    guard_kernel(|| a.shape.union(&b.shape))
}

/// A panic inside the geometry kernel becomes `None`.
fn guard_kernel(op: impl FnOnce() -> MultiPolygon<f64>) -> Option<MultiPolygon<f64>> {
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(shape) => Some(shape),
        Err(_) => {
            tracing::warn!("polygon union failed; keeping shapes apart");
            None
        }
    }
}

fn rects_overlap(a: Option<Rect<f64>>, b: Option<Rect<f64>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.min().x <= b.max().x
                && b.min().x <= a.max().x
                && a.min().y <= b.max().y
                && b.min().y <= a.max().y
        }
        _ => false,
    }
}
