//! Integration tests for the dependency graph engine.
//!
//! These tests drive the public API the way workflow tooling would: build a
//! task graph, analyze it, and hand it to the algorithm library.

use girder::algo::{self, AlgoError};
use girder::{
    ContractViolation, DependencyGraph, EdgeId, EdgeKind, Error, ErrorKind, GraphOptions, NodeId,
    Precomputed, Scc,
};
use rstest::rstest;
use std::io::Write;

fn build(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for n in nodes {
        graph.add_node(*n, None).unwrap();
    }
    for (from, to) in edges {
        graph.add_edge(*from, *to, None).unwrap();
    }
    graph
}

fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|n| NodeId::from(*n)).collect()
}

/// Diamond with a tail:
///
/// ```text
///   A
///  / \
/// B   C
///  \ /
///   D
///   |
///   E
/// ```
fn diamond() -> DependencyGraph {
    build(
        &["A", "B", "C", "D", "E"],
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")],
    )
}

// ========== Usage Errors ==========

#[rstest]
#[case::duplicate_node(|g: &mut DependencyGraph| g.add_node("A", None).map(|_| ()))]
#[case::unknown_source(|g: &mut DependencyGraph| g.add_edge("Z", "A", None).map(|_| ()))]
#[case::unknown_target(|g: &mut DependencyGraph| g.add_edge("A", "Z", None).map(|_| ()))]
#[case::duplicate_edge(|g: &mut DependencyGraph| g.add_edge("A", "B", None).map(|_| ()))]
#[case::strict_unknown(|g: &mut DependencyGraph| g.successors_strict("Z").map(|_| ()))]
fn misuse_is_a_usage_error_and_mutates_nothing(
    #[case] misuse: fn(&mut DependencyGraph) -> girder::Result<()>,
) {
    let mut graph = diamond();
    let before = graph.analyze().unwrap();

    let err = misuse(&mut graph).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(err.is_usage_error());
    assert_eq!(graph.analyze().unwrap(), before);
}

#[test]
fn disabled_self_loop_is_rejected_before_storage() {
    let mut graph: DependencyGraph = DependencyGraph::with_options(GraphOptions {
        allow_self_loops: false,
        ..GraphOptions::default()
    });
    graph.add_node("A", None).unwrap();

    let err = graph.add_edge("A", "A", None).unwrap_err();

    assert!(matches!(err, Error::SelfLoopNotAllowed(ref id) if id.as_str() == "A"));
    assert!(!graph.has_edge("A", "A"));
    assert_eq!(graph.topological_sort(), Some(ids(&["A"])));
}

// ========== Analysis ==========

#[test]
fn diamond_analysis() {
    let graph = diamond();
    let analysis = graph.analyze().unwrap();

    assert!(analysis.is_acyclic);
    assert_eq!(
        analysis.topological_order,
        Some(ids(&["A", "B", "C", "D", "E"]))
    );
    assert_eq!(analysis.sccs.len(), 5);
    assert!(analysis.cycles.is_empty());
    assert_eq!(analysis.classification.count(EdgeKind::Tree), 4);
    assert_eq!(analysis.classification.count(EdgeKind::Cross), 1);
    assert_eq!(analysis.condensation.topological_order.len(), 5);
}

#[test]
fn workflow_with_a_retry_loop() {
    // fetch -> parse -> validate -> parse (retry), validate -> publish
    let graph = build(
        &["fetch", "parse", "validate", "publish"],
        &[
            ("fetch", "parse"),
            ("parse", "validate"),
            ("validate", "parse"),
            ("validate", "publish"),
        ],
    );
    let analysis = graph.analyze().unwrap();

    assert!(!analysis.is_acyclic);
    assert_eq!(analysis.cycles.len(), 1);
    let cycle = &analysis.cycles[0];
    let mut members = cycle.nodes.clone();
    members.sort();
    assert_eq!(members, ids(&["parse", "validate"]));
    assert_eq!(cycle.back_edges, vec![EdgeId::from("8:validate|5:parse")]);

    let loop_component = analysis
        .condensation
        .component(analysis.condensation.component_of("parse").unwrap())
        .unwrap();
    assert!(loop_component.has_loop);
    assert_eq!(loop_component.feedback_edges, cycle.back_edges);
    assert_eq!(loop_component.entry_edges, vec![EdgeId::from("5:fetch|5:parse")]);
    assert_eq!(
        loop_component.exit_edges,
        vec![EdgeId::from("8:validate|7:publish")]
    );
    assert_eq!(analysis.condensation.len(), 3);
}

#[test]
fn precomputed_sccs_must_cover_the_graph() {
    let graph = diamond();
    let too_few = vec![Scc {
        id: 7,
        nodes: ids(&["A", "B", "C", "D"]),
        acyclic: false,
    }];

    let err = graph
        .build_condensation_graph_with(&Precomputed {
            sccs: Some(&too_few),
            classification: None,
        })
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Contract);
    assert!(matches!(
        err,
        Error::ContractViolation(ContractViolation::UnresolvedComponent { ref node, .. })
            if node.as_str() == "E"
    ));
}

#[test]
fn clear_then_rebuild_gives_the_same_analysis() {
    let edges = [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")];
    let mut graph = build(&["a", "b", "c", "d"], &edges);
    let before = graph.analyze().unwrap();

    graph.clear();
    assert!(graph.is_empty());
    for n in ["a", "b", "c", "d"] {
        graph.add_node(n, None).unwrap();
    }
    for (from, to) in edges {
        graph.add_edge(from, to, None).unwrap();
    }
    let rebuilt = graph.analyze().unwrap();

    assert_eq!(rebuilt.sccs.len(), before.sccs.len());
    assert_eq!(rebuilt.cycles.len(), before.cycles.len());
    assert_eq!(rebuilt.topological_order.is_some(), before.topological_order.is_some());
}

#[test]
fn independent_graphs_do_not_share_state() {
    let mut first = build(&["a"], &[]);
    let second = build(&["a"], &[]);

    first.add_node("b", None).unwrap();
    first.add_edge("a", "b", None).unwrap();

    assert_eq!(first.node_count(), 2);
    assert_eq!(second.node_count(), 1);
    assert!(second.successors("a").is_empty());
}

// ========== Algorithm Library Over The Engine ==========

#[test]
fn longest_path_over_the_diamond() {
    let graph = diamond();
    let order = graph.topological_sort().unwrap();

    let longest = algo::longest_path_dag(graph.node_ids(), &graph, &order).unwrap();

    assert_eq!(longest.length, 3);
    assert_eq!(longest.path.len(), 4);
    assert_eq!(longest.path.first(), Some(&NodeId::from("A")));
    assert_eq!(longest.path.last(), Some(&NodeId::from("E")));
}

#[test]
fn longest_path_rejects_an_order_for_a_cyclic_graph() {
    let graph = build(&["a", "b"], &[("a", "b"), ("b", "a")]);

    let err = algo::longest_path_dag(graph.node_ids(), &graph, &ids(&["a", "b"])).unwrap_err();

    assert!(matches!(err, AlgoError::BackwardEdge { .. }));
}

#[test]
fn reachability_and_paths_over_the_engine() {
    let graph = diamond();
    let (a, e) = (NodeId::from("A"), NodeId::from("E"));

    assert!(algo::is_reachable(&a, &e, &graph));
    assert!(!algo::is_reachable(&e, &a, &graph));
    assert_eq!(
        algo::shortest_path(&a, &e, &graph),
        Some(ids(&["A", "B", "D", "E"]))
    );
    assert_eq!(
        algo::find_all_paths(&a, &e, &graph, algo::DEFAULT_MAX_DEPTH)
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn bipartite_check_over_the_engine() {
    let chain = build(&["1", "2", "3"], &[("1", "2"), ("2", "3")]);
    let partition = algo::is_bipartite(chain.node_ids(), &chain).unwrap();
    assert_eq!(partition.left, ids(&["1", "3"]));
    assert_eq!(partition.right, ids(&["2"]));

    let triangle = build(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
    assert!(algo::is_bipartite(triangle.node_ids(), &triangle).is_none());
}

// ========== Configuration ==========

#[test]
fn options_load_from_a_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "allow-self-loops: false").unwrap();
    writeln!(file, "allow-multi-edges: true").unwrap();

    let options = GraphOptions::load(file.path()).unwrap();
    let mut graph: DependencyGraph = DependencyGraph::with_options(options);
    graph.add_node("a", None).unwrap();
    graph.add_node("b", None).unwrap();

    assert!(graph.add_edge("a", "a", None).is_err());
    assert_eq!(
        graph.add_edge("a", "b", None).unwrap(),
        EdgeId::from("1:a|1:b")
    );
    assert_eq!(
        graph.add_edge("a", "b", None).unwrap(),
        EdgeId::from("1:a|1:b#1")
    );
}

#[test]
fn missing_options_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GraphOptions::load(&dir.path().join("graph.yaml")).unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.kind(), ErrorKind::Config);
}
