use mail_corpus_graph::*;
use proptest::prelude::*;

fn corpus() -> Batch {
    parse_batch([
        "From: a@x.com\nTo: b@y.com, c@y.com\n\nfirst",
        "From: b@y.com\nTo: a@x.com, b@y.com\n\nsecond",
        "From: \nTo: a@x.com\n\nno sender",
        "From: a@x.com\nTo: b@y.com\n\nagain",
    ])
}

// --- one_to_one_mapping ---

#[test]
fn test_expansion_fans_out_destinations() {
    let mapping = one_to_one_mapping(&["a", "b"], &[vec!["x", "y"], vec![]]).unwrap();

    assert_eq!(mapping.sources, vec!["a", "a"]);
    assert_eq!(mapping.destinations, vec!["x", "y"]);
    assert_eq!(mapping.len(), 2);
}

#[test]
fn test_counts_and_unique_pairs() {
    let mapping =
        one_to_one_mapping(&["a", "b", "a"], &[vec!["x"], vec!["x"], vec!["x", "y"]]).unwrap();

    assert_eq!(mapping.count("a", "x"), 2);
    assert_eq!(mapping.count("b", "x"), 1);
    assert_eq!(mapping.count("b", "y"), 0);
    assert_eq!(
        mapping.unique_pairs,
        vec![
            ("a".to_string(), "x".to_string()),
            ("a".to_string(), "y".to_string()),
            ("b".to_string(), "x".to_string()),
        ]
    );
}

#[test]
fn test_mismatched_lengths() {
    let result = one_to_one_mapping(&["a", "b"], &[vec!["x"]]);
    assert!(matches!(
        result,
        Err(CorpusError::MismatchedLengths {
            sources: 2,
            destinations: 1
        })
    ));
}

#[test]
fn test_empty_input() {
    let sources: [&str; 0] = [];
    let destinations: [Vec<&str>; 0] = [];
    let mapping = one_to_one_mapping(&sources, &destinations).unwrap();
    assert!(mapping.is_empty());
    assert!(mapping.nodes().is_empty());
}

#[test]
fn test_edges() {
    let mapping = one_to_one_mapping(&["a", "a"], &[vec!["x"], vec!["x", "y"]]).unwrap();
    let edges = mapping.edges();

    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].source, "a");
    assert_eq!(edges[0].destination, "x");
    assert_eq!(edges[0].count, 2);
    assert_eq!(edges[1].destination, "y");
    assert_eq!(edges[1].count, 1);
}

#[test]
fn test_without_blank_destinations() {
    let mapping = one_to_one_mapping(&["a", "b"], &[vec!["x", ""], vec![" "]])
        .unwrap()
        .without_blank_destinations();

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.count("a", "x"), 1);
    assert_eq!(mapping.count("a", ""), 0);
}

#[test]
fn test_sankey_indices() {
    let mapping = one_to_one_mapping(&["a", "b"], &[vec!["x", "y"], vec!["x"]]).unwrap();
    let (nodes, links) = mapping.sankey();

    assert_eq!(nodes, vec!["a", "b", "x", "y"]);
    assert_eq!(
        links,
        vec![
            SankeyLink { source: 0, target: 2, value: 1 },
            SankeyLink { source: 0, target: 3, value: 1 },
            SankeyLink { source: 1, target: 2, value: 1 },
        ]
    );
}

// --- graphs from records ---

#[test]
fn test_domain_flow() {
    let batch = corpus();
    let flow = domain_flow(&batch.records);

    assert_eq!(flow.count("x", "y"), 2);
    assert_eq!(flow.count("y", "x"), 1);
    assert_eq!(flow.count("y", "y"), 1);
    assert_eq!(flow.len(), 4);
}

#[test]
fn test_sender_network_drops_self_sends() {
    let batch = corpus();
    let network = sender_network(&batch.records);

    assert_eq!(network.count("a@x.com", "b@y.com"), 2);
    assert_eq!(network.count("a@x.com", "c@y.com"), 1);
    assert_eq!(network.count("b@y.com", "a@x.com"), 1);
    assert_eq!(network.count("b@y.com", "b@y.com"), 0);
    assert_eq!(network.len(), 4);
}

#[test]
fn test_graphs_are_deterministic() {
    let first = corpus();
    let second = corpus();
    assert_eq!(domain_flow(&first.records), domain_flow(&second.records));
    assert_eq!(sender_network(&first.records).edges(), sender_network(&second.records).edges());
}

// --- NodeClassifier ---

#[test]
fn test_default_classifier() {
    let classifier = NodeClassifier::default();

    assert_eq!(classifier.classify("jeff.skilling@enron.com"), NodeCategory::Interest);
    assert_eq!(classifier.classify("Tim Belden"), NodeCategory::Interest);
    assert_eq!(classifier.classify("kenneth.lay@ENRON.com"), NodeCategory::Affiliated);
    assert_eq!(classifier.classify("bob@aol.com"), NodeCategory::Other);
}

#[test]
fn test_classifier_colors() {
    assert_eq!(NodeCategory::Interest.color(), "red");
    assert_eq!(NodeCategory::Affiliated.color(), "#AEF359");
    assert_eq!(NodeCategory::Other.color(), "#3944BC");
}

#[test]
fn test_custom_classifier() {
    let classifier = NodeClassifier::new("lay", None).unwrap();
    assert_eq!(classifier.classify("Kenneth LAY"), NodeCategory::Interest);
    assert_eq!(classifier.classify("someone@enron.com"), NodeCategory::Other);
}

#[test]
fn test_invalid_interest_pattern() {
    assert!(matches!(
        NodeClassifier::new("(unclosed", None),
        Err(CorpusError::Pattern(_))
    ));
}

// --- properties ---

proptest! {
    #[test]
    fn prop_pair_count_is_sum_of_destinations(
        records in proptest::collection::vec(
            ("[a-c]", proptest::collection::vec("[x-z]", 0..4)),
            0..20,
        )
    ) {
        let (sources, destinations): (Vec<String>, Vec<Vec<String>>) =
            records.into_iter().unzip();
        let mapping = one_to_one_mapping(&sources, &destinations).unwrap();

        let expected: usize = destinations.iter().map(Vec::len).sum();
        prop_assert_eq!(mapping.len(), expected);
        prop_assert_eq!(mapping.counts.values().sum::<usize>(), expected);
        prop_assert_eq!(mapping.unique_pairs.len(), mapping.counts.len());
    }
}
