//! Scoring properties of the structural comparison engine
//!
//! Locks down the arithmetic of merging, emphasis and normalization through
//! the public API.

use structsim::core::Fraction;
use structsim::matching::engine::{compare_nodes, compare_to_placeholder};
use structsim::utils::validation::MAX_TREE_DEPTH;
use structsim::{compare, EngineError, Node, SyntaxTree};

fn leaf(s: &str) -> Node {
    Node::leaf(s)
}

fn ordered(tokens: &[&str]) -> Node {
    Node::ordered(tokens.iter().map(|t| leaf(t)))
}

fn unordered(tokens: &[&str]) -> Node {
    Node::unordered(tokens.iter().map(|t| leaf(t)))
}

#[test]
fn test_leaf_pairs() {
    for a in ["A", "B", "class", ""] {
        for b in ["A", "B", "class", ""] {
            let expected = if a == b {
                Fraction::MATCH
            } else {
                Fraction::MISMATCH
            };
            assert_eq!(compare_nodes(&leaf(a), &leaf(b)), expected, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn test_scenario_identical_leaves() {
    let score = compare_nodes(&leaf("A"), &leaf("A"));
    assert_eq!(score, Fraction::new(1.0, 1.0));
    assert_eq!(score.percent().unwrap(), 1.0);
}

#[test]
fn test_scenario_ordered_one_difference() {
    let score = compare_nodes(&ordered(&["A", "B"]), &ordered(&["A", "C"]));
    assert_eq!(score, Fraction::new(1.0, 2.0));
    assert_eq!(score.percent().unwrap(), 0.5);
}

#[test]
fn test_scenario_ordered_padding() {
    let score = compare_nodes(&ordered(&["A"]), &ordered(&["A", "B"]));
    assert_eq!(score, Fraction::new(1.0, 2.0));
    assert_eq!(score.percent().unwrap(), 0.5);
}

#[test]
fn test_ordered_padding_contributes_one_mismatch() {
    let longer = compare_nodes(&ordered(&["A", "B", "C"]), &ordered(&["A", "B"]));
    let same = compare_nodes(&ordered(&["A", "B"]), &ordered(&["A", "B"]));
    assert_eq!(longer, same.merge(Fraction::MISMATCH));
}

#[test]
fn test_scenario_unordered_perfect_match() {
    let score = compare_nodes(&unordered(&["A", "B"]), &unordered(&["A", "B"]));
    assert_eq!(score, Fraction::new(2.0, 2.0));
    assert_eq!(score.percent().unwrap(), 1.0);
}

#[test]
fn test_unordered_normalization_denominator() {
    // Sizes m = 4, n = 2: each row has denominator 2, four rows sum to 8,
    // divided by (4 + 2) / 2 = 3
    let score = compare_nodes(
        &unordered(&["A", "B", "C", "D"]),
        &unordered(&["A", "B"]),
    );
    assert!((score.total - 8.0 / 3.0).abs() < 1e-12);
    assert!((score.matches - 2.0).abs() < 1e-12);
}

#[test]
fn test_self_comparison_with_equal_size_siblings_is_perfect() {
    let trees = [
        leaf("x"),
        ordered(&["a", "b", "c"]),
        unordered(&["a", "b", "c", "d"]),
        Node::ordered([
            leaf("class"),
            Node::unordered([ordered(&["int", "x"]), ordered(&["void", "f"])]),
            Node::ordered([leaf("if"), unordered(&["p", "q"]), ordered(&["r", "s"])]),
        ]),
        Node::unordered([unordered(&["a", "b"]), unordered(&["c", "d"])]),
    ];

    for tree in &trees {
        let score = compare_nodes(tree, tree);
        assert!(score.is_measured(), "{tree}");
        assert!(
            (score.matches - score.total).abs() < 1e-9,
            "{tree} scored {score}"
        );
    }
}

#[test]
fn test_self_comparison_with_unequal_siblings_is_weighted() {
    // Row for (a b c): 3/6 after emphasis; row for (d): 1/4. Merged 4/10,
    // normalised by (2 + 2) / 2.
    let tree = Node::unordered([ordered(&["a", "b", "c"]), ordered(&["d"])]);
    let score = compare_nodes(&tree, &tree);
    assert_eq!(score, Fraction::new(4.0, 5.0));
    assert!(!score.is_perfect());
}

#[test]
fn test_kind_mismatch_is_symmetric() {
    let cases = [
        (ordered(&["A", "B", "C"]), unordered(&["A"])),
        (ordered(&[]), unordered(&["A", "B"])),
        (
            Node::ordered([ordered(&["x", "y"]), leaf("z")]),
            Node::unordered([unordered(&["x"]), leaf("z"), leaf("w")]),
        ),
    ];

    for (o, u) in &cases {
        assert_eq!(compare_nodes(o, u), compare_nodes(u, o), "{o} vs {u}");
    }
}

#[test]
fn test_kind_mismatch_scores_nothing() {
    let score = compare_nodes(&ordered(&["A", "B"]), &unordered(&["A", "B"]));
    assert_eq!(score, Fraction::new(0.0, 4.0));
}

#[test]
fn test_placeholder_scores_grow_with_children() {
    assert_eq!(compare_to_placeholder(&leaf("A")), Fraction::MISMATCH);
    assert_eq!(
        compare_to_placeholder(&ordered(&["A", "B", "C"])),
        Fraction::new(0.0, 3.0)
    );
    assert_eq!(
        compare_to_placeholder(&unordered(&["A", "B"])),
        Fraction::new(0.0, 2.0)
    );
}

#[test]
fn test_scores_never_exceed_total() {
    let trees = [
        unordered(&["A", "A", "A", "B"]),
        unordered(&["A"]),
        Node::unordered([ordered(&["a", "b"]), ordered(&["a", "c"]), ordered(&["a", "b"])]),
        Node::unordered([ordered(&["a", "b"])]),
        ordered(&["A", "A"]),
    ];

    for a in &trees {
        for b in &trees {
            let score = compare_nodes(a, b);
            assert!(score.matches >= 0.0);
            assert!(
                score.matches <= score.total + 1e-9,
                "{a} vs {b} scored {score}"
            );
        }
    }
}

#[test]
fn test_compare_is_deterministic() {
    let a = SyntaxTree::new(
        "java",
        Node::unordered([ordered(&["a", "b"]), unordered(&["c", "d", "e"]), leaf("f")]),
    );
    let b = SyntaxTree::new(
        "java",
        Node::unordered([unordered(&["e", "c"]), ordered(&["a", "x"]), leaf("g")]),
    );

    let first = compare(&a, &b).unwrap();
    for _ in 0..20 {
        let again = compare(&a, &b).unwrap();
        assert_eq!(first.matches.to_bits(), again.matches.to_bits());
        assert_eq!(first.total.to_bits(), again.total.to_bits());
    }
}

#[test]
fn test_incompatible_grammars_fail_the_pair() {
    let a = SyntaxTree::new("java", leaf("A"));
    let b = SyntaxTree::new("python", leaf("A"));
    assert!(matches!(
        compare(&a, &b),
        Err(EngineError::IncompatibleUnits { .. })
    ));
}

#[test]
fn test_percent_of_empty_comparison_fails() {
    let a = SyntaxTree::new("java", Node::ordered([]));
    let score = compare(&a, &a).unwrap();
    assert_eq!(score, Fraction::ZERO);
    assert!(matches!(score.percent(), Err(EngineError::ZeroDenominator)));
}

#[test]
fn test_concurrent_comparisons_share_trees() {
    let a = Node::unordered([ordered(&["a", "b"]), unordered(&["c", "d"])]);
    let b = Node::unordered([ordered(&["a", "c"]), unordered(&["d", "c"])]);
    let expected = compare_nodes(&a, &b);
    let (a, b) = (&a, &b);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || compare_nodes(a, b)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_trees_at_depth_limit_compare_on_default_stack() {
    let mut root = leaf("x");
    for _ in 1..MAX_TREE_DEPTH {
        root = Node::ordered([root]);
    }
    let tree = SyntaxTree::new("java", root);
    assert_eq!(tree.root.depth(), MAX_TREE_DEPTH);

    let score = std::thread::spawn(move || compare(&tree, &tree))
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(score, Fraction::MATCH);
}
