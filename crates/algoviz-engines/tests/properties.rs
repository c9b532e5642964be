//! Cross-algorithm properties over shared inputs.

use std::collections::BTreeMap;

use algoviz_core::models::{BipartiteSpec, GraphSpec, MatrixSpec, PairSpec, RowSpec, TrainingSpec};
use algoviz_core::{StepEvent, Summarize};
use algoviz_engines::{bayes, dijkstra, floyd, matching, prim, tsp};

/// Reference MST weight via Kruskal with a label-keyed union-find,
/// independent of the engine under test.
fn kruskal_weight(spec: &GraphSpec) -> f64 {
    let mut parent: BTreeMap<&str, &str> = spec.nodes.iter().map(|n| (n.as_str(), n.as_str())).collect();

    fn find<'a>(parent: &mut BTreeMap<&'a str, &'a str>, mut x: &'a str) -> &'a str {
        while parent[x] != x {
            let up = parent[parent[x]];
            parent.insert(x, up);
            x = up;
        }
        x
    }

    let mut edges: Vec<(&str, &str, f64)> = spec
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.weight))
        .collect();
    edges.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap());

    let mut total = 0.0;
    for (from, to, weight) in edges {
        let root_from = find(&mut parent, from);
        let root_to = find(&mut parent, to);
        if root_from != root_to {
            parent.insert(root_from, root_to);
            total += weight;
        }
    }
    total
}

fn mesh_graph() -> GraphSpec {
    GraphSpec::new(
        &["A", "B", "C", "D", "E"],
        &[
            ("A", "B", 4.0),
            ("A", "C", 2.0),
            ("B", "C", 1.0),
            ("B", "D", 5.0),
            ("C", "D", 8.0),
            ("C", "E", 10.0),
            ("D", "E", 2.0),
        ],
        false,
    )
}

#[test]
fn prim_matches_kruskal_on_held_out_graphs() {
    let graphs = [
        mesh_graph(),
        GraphSpec::new(
            &["A", "B", "C"],
            &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)],
            false,
        ),
        GraphSpec::new(
            &["N1", "N2", "N3", "N4"],
            &[
                ("N1", "N2", 3.0),
                ("N2", "N3", 3.0),
                ("N3", "N4", 3.0),
                ("N4", "N1", 3.0),
                ("N1", "N3", 1.0),
            ],
            false,
        ),
    ];
    for spec in &graphs {
        let output = prim::run(spec, None).unwrap();
        assert!(
            (output.result.total_weight - kruskal_weight(spec)).abs() < 1e-9,
            "MST weight mismatch for nodes {:?}",
            spec.nodes
        );
    }
}

#[test]
fn dijkstra_agrees_with_floyd_row() {
    let spec = mesh_graph();
    let all_pairs = floyd::run(&spec).unwrap().result;

    for (source_index, source) in spec.nodes.iter().enumerate() {
        let single_source = dijkstra::run(&spec, source).unwrap().result;
        for (target_index, path) in single_source.paths.iter().enumerate() {
            let floyd_distance = all_pairs.distances[source_index][target_index];
            match (path.distance, floyd_distance) {
                (Some(a), Some(b)) => assert!(
                    (a - b).abs() < 1e-9,
                    "{source} -> {}: dijkstra {a} vs floyd {b}",
                    path.node
                ),
                (a, b) => assert_eq!(a, b, "{source} -> {} reachability", path.node),
            }
        }
    }
}

#[test]
fn floyd_is_idempotent() {
    let first = floyd::run(&mesh_graph()).unwrap().result;

    // Feed the computed distances back in as direct edges.
    let mut edges = Vec::new();
    for (i, row) in first.distances.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            if i != j {
                if let Some(weight) = entry {
                    edges.push((first.nodes[i].as_str(), first.nodes[j].as_str(), *weight));
                }
            }
        }
    }
    let node_refs: Vec<&str> = first.nodes.iter().map(String::as_str).collect();
    let second = floyd::run(&GraphSpec::new(&node_refs, &edges, true))
        .unwrap()
        .result;

    assert_eq!(first.distances, second.distances);
}

#[test]
fn bayes_posteriors_sum_to_one_for_any_valid_vector() {
    let train = TrainingSpec {
        rows: [
            (&[("color", "red"), ("size", "small")][..], "apple"),
            (&[("color", "red"), ("size", "large")][..], "apple"),
            (&[("color", "yellow"), ("size", "large")][..], "melon"),
            (&[("color", "green"), ("size", "large")][..], "melon"),
            (&[("color", "green"), ("size", "small")][..], "apple"),
        ]
        .iter()
        .map(|(features, label)| RowSpec {
            features: features
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            label: label.to_string(),
        })
        .collect(),
    };

    for (color, size) in [
        ("red", "small"),
        ("yellow", "small"),
        ("green", "large"),
        ("purple", "huge"), // unseen values, still smoothed
    ] {
        let input = algoviz_core::models::ClassifySpec {
            features: [("color", color), ("size", size)]
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let output = bayes::run(&train, &input).unwrap();
        let total: f64 = output.result.posteriors.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "posteriors for {color}/{size}");
    }
}

#[test]
fn matching_grows_monotonically_and_stays_bounded() {
    let spec = BipartiteSpec {
        left: ["L1", "L2", "L3", "L4"].iter().map(|s| s.to_string()).collect(),
        right: ["R1", "R2", "R3"].iter().map(|s| s.to_string()).collect(),
        edges: [
            ("L1", "R1"),
            ("L1", "R2"),
            ("L2", "R1"),
            ("L3", "R2"),
            ("L3", "R3"),
            ("L4", "R3"),
        ]
        .iter()
        .map(|&(from, to)| PairSpec {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect(),
    };
    let output = matching::run(&spec).unwrap();

    assert!(output.result.size <= 3);
    // Each augmentation event grows the matching by exactly one, so the
    // count of events equals the final cardinality and never regresses.
    let augmentations = output
        .trace
        .events()
        .iter()
        .filter(|e| matches!(e, StepEvent::AugmentationApplied { .. }))
        .count();
    assert_eq!(augmentations, output.result.size);
    assert_eq!(output.result.size, 3);
}

#[test]
fn tsp_tour_is_a_closed_permutation_with_consistent_cost() {
    let spec = MatrixSpec {
        cities: ["W", "X", "Y", "Z"].iter().map(|s| s.to_string()).collect(),
        distances: vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![1.0, 0.0, 6.0, 4.0],
            vec![15.0, 7.0, 0.0, 8.0],
            vec![6.0, 3.0, 12.0, 0.0],
        ],
    };
    let output = tsp::run(&spec).unwrap();
    let tour = &output.result.tour;

    assert_eq!(tour.len(), spec.cities.len() + 1);
    assert_eq!(tour.first(), tour.last());
    let mut visited: Vec<&String> = tour[..tour.len() - 1].iter().collect();
    visited.sort();
    let mut expected: Vec<&String> = spec.cities.iter().collect();
    expected.sort();
    assert_eq!(visited, expected);

    let index = |label: &String| spec.cities.iter().position(|c| c == label).unwrap();
    let walked: f64 = tour
        .windows(2)
        .map(|pair| spec.distances[index(&pair[0])][index(&pair[1])])
        .sum();
    assert!((walked - output.result.cost).abs() < 1e-9);

    // Optimum over all six tours from W is W-Y-Z-X-W = 9+8+3+1.
    assert!((output.result.cost - 21.0).abs() < 1e-9);
    assert_eq!(tour, &["W", "Y", "Z", "X", "W"]);
}

#[test]
fn summaries_render_one_line_per_display_row() {
    let spec = mesh_graph();

    let mst = prim::run(&spec, None).unwrap().result;
    let summary = mst.summarize();
    assert!(summary.headline.contains("spanning tree"));
    assert_eq!(summary.details.len(), mst.edges.len());

    let sssp = dijkstra::run(&spec, "A").unwrap().result;
    let summary = sssp.summarize();
    assert_eq!(summary.details.len(), sssp.paths.len());

    let apsp = floyd::run(&spec).unwrap().result;
    assert!(apsp.summarize().headline.contains("5 nodes"));
}
