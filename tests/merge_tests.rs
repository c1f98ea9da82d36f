use geo::{Contains, Intersects, MultiPolygon, Point};
use std::collections::BTreeSet;
use weather_clusters::domains::weather::{geodesic_buffer, merge_overlapping, Group, MergeStrategy};

const RADIUS_M: f64 = 5_000.0;

/// (name, lat, lng)
type Site = (&'static str, f64, f64);

// A-B and B-C are ~8.9 km apart (buffers overlap), A-C ~17.8 km (they do not).
const A: Site = ("A", 0.0, 0.0);
const B: Site = ("B", 0.0, 0.08);
const C: Site = ("C", 0.0, 0.16);

fn buffers(sites: &[Site]) -> Vec<MultiPolygon<f64>> {
    sites
        .iter()
        .map(|&(_, lat, lng)| MultiPolygon::from(geodesic_buffer(Point::new(lng, lat), RADIUS_M, 64).unwrap()))
        .collect()
}

fn partition(sites: &[Site], groups: &[Group]) -> BTreeSet<BTreeSet<&'static str>> {
    groups
        .iter()
        .map(|g| g.members.iter().map(|&m| sites[m].0).collect())
        .collect()
}

/// Connected components of the pairwise overlap graph, by brute force.
fn reference_partition(sites: &[Site]) -> BTreeSet<BTreeSet<&'static str>> {
    let shapes = buffers(sites);
    let n = shapes.len();
    let mut component: Vec<usize> = (0..n).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in 0..n {
                if i != j && shapes[i].intersects(&shapes[j]) && component[j] > component[i] {
                    component[j] = component[i];
                    changed = true;
                }
            }
        }
    }
    let roots: BTreeSet<usize> = component.iter().copied().collect();
    roots
        .into_iter()
        .map(|r| (0..n).filter(|&i| component[i] == r).map(|i| sites[i].0).collect())
        .collect()
}

fn scattered() -> Vec<Site> {
    vec![
        ("P5", 18.70, 73.50),
        ("P2", 19.00, 73.12),
        ("P3", 19.30, 73.00),
        ("P0", 19.00, 73.00),
        ("P6", 19.00, 73.30),
        ("P7", 19.08, 73.12),
        ("P4", 19.35, 73.00),
        ("P1", 19.00, 73.06),
    ]
}

const STRATEGIES: [MergeStrategy; 2] = [MergeStrategy::Sweep, MergeStrategy::UnionFind];

#[test]
fn test_transitive_chain_forms_one_cluster() {
    let sites = [A, B, C];
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        assert_eq!(groups.len(), 1, "{strategy:?}");
        assert_eq!(groups[0].members, vec![0, 1, 2]);
    }
}

#[test]
fn test_chain_discovered_late_needs_extra_sweep() {
    // A is compared with C before it absorbs B, so the A+B / C overlap only
    // shows up on the next sweep.
    let sites = [A, C, B];
    let (groups, stats) = merge_overlapping(buffers(&sites), MergeStrategy::Sweep);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![0, 1, 2]);
    assert_eq!(stats.sweeps, 3);
    assert_eq!(stats.merges, 2);
}

#[test]
fn test_disjoint_buffers_stay_singletons() {
    let sites = [("near", 0.0, 0.0), ("far", 0.0, 0.2)];
    for strategy in STRATEGIES {
        let (groups, stats) = merge_overlapping(buffers(&sites), strategy);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members, vec![0]);
        assert_eq!(groups[1].members, vec![1]);
        assert_eq!(stats.merges, 0);
    }
}

#[test]
fn test_clusters_match_overlap_components() {
    let sites = scattered();
    let expected = reference_partition(&sites);
    assert_eq!(expected.len(), 4);
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        assert_eq!(partition(&sites, &groups), expected, "{strategy:?}");
    }
}

#[test]
fn test_partition_is_independent_of_input_order() {
    let mut sites = scattered();
    let (groups, _) = merge_overlapping(buffers(&sites), MergeStrategy::Sweep);
    let baseline = partition(&sites, &groups);

    sites.reverse();
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        assert_eq!(partition(&sites, &groups), baseline);
    }

    sites.rotate_left(3);
    let (groups, _) = merge_overlapping(buffers(&sites), MergeStrategy::Sweep);
    assert_eq!(partition(&sites, &groups), baseline);
}

#[test]
fn test_strategies_agree_on_members_and_order() {
    let sites = scattered();
    let (sweep, _) = merge_overlapping(buffers(&sites), MergeStrategy::Sweep);
    let (union_find, _) = merge_overlapping(buffers(&sites), MergeStrategy::UnionFind);
    let members = |groups: &[Group]| groups.iter().map(|g| g.members.clone()).collect::<Vec<_>>();
    assert_eq!(members(&sweep), members(&union_find));
    // ordered by lowest member, members ascending
    for groups in [&sweep, &union_find] {
        let firsts: Vec<usize> = groups.iter().map(|g| g.members[0]).collect();
        assert!(firsts.windows(2).all(|w| w[0] < w[1]));
        assert!(groups.iter().all(|g| g.members.windows(2).all(|w| w[0] < w[1])));
    }
}

#[test]
fn test_every_entity_in_exactly_one_cluster() {
    let sites = scattered();
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        let mut seen: Vec<usize> = groups.iter().flat_map(|g| g.members.iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..sites.len()).collect::<Vec<_>>());

        for g in &groups {
            for &m in &g.members {
                let (_, lat, lng) = sites[m];
                assert!(g.shape.contains(&Point::new(lng, lat)));
            }
        }
    }
}

#[test]
fn test_final_clusters_do_not_overlap() {
    let sites = scattered();
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                assert!(!groups[i].shape.intersects(&groups[j].shape), "clusters {i} and {j} overlap");
            }
        }
    }
}

#[test]
fn test_merging_merged_output_is_a_no_op() {
    let sites = scattered();
    for strategy in STRATEGIES {
        let (groups, _) = merge_overlapping(buffers(&sites), strategy);
        let count = groups.len();
        let shapes: Vec<MultiPolygon<f64>> = groups.into_iter().map(|g| g.shape).collect();
        let (again, stats) = merge_overlapping(shapes, strategy);
        assert_eq!(again.len(), count);
        assert_eq!(stats.merges, 0);
    }
}
