
use proptest::prelude::*;
use rulebuilder::{
    translate_expression, ExpressionLeaf, FieldService, InputRecord, LogicalOp, RuleNode,
    RuleRecord, Translator,
};
use strategies::{arb_leaf, arb_leaves, expected, join};

fn customers(expr: &str) -> RuleRecord {
    translate_expression(expr, &FieldService::customer())
        .unwrap_or_else(|e| panic!("failed to translate {expr:?}: {e}"))
}

fn leaves_only(record: &RuleRecord) -> Vec<ExpressionLeaf> {
    record
        .children
        .iter()
        .map(|node| match node {
            RuleNode::Leaf(leaf) => leaf.clone(),
            RuleNode::Group(g) => panic!("unexpected nested group {g:?}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Invariant 1: Connective shapes
//
// A single comparison is an AND record with one leaf; N-term chains of one
// connective are a single flat group holding the leaves in source order.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn single_comparison_is_one_leaf(leaf in arb_leaf()) {
        let record = customers(&leaf.source);
        prop_assert_eq!(record.group_operator, LogicalOp::And);
        prop_assert_eq!(leaves_only(&record), vec![leaf.expected]);
        prop_assert_eq!(record.quantity, None);
    }

    #[test]
    fn conjunction_is_flat_and(leaves in arb_leaves(6)) {
        let record = customers(&join(&leaves, "&&"));
        prop_assert_eq!(record.group_operator, LogicalOp::And);
        prop_assert_eq!(leaves_only(&record), expected(&leaves));
    }

    #[test]
    fn disjunction_is_flat_or(leaves in arb_leaves(6)) {
        let record = customers(&join(&leaves, "||"));
        prop_assert_eq!(record.group_operator, LogicalOp::Or);
        prop_assert_eq!(leaves_only(&record), expected(&leaves));
    }

    #[test]
    fn negated_conjunction_is_flat_not(leaves in arb_leaves(6)) {
        let record = customers(&format!("!({})", join(&leaves, "&&")));
        prop_assert_eq!(record.group_operator, LogicalOp::Not);
        prop_assert_eq!(leaves_only(&record), expected(&leaves));
    }

    #[test]
    fn bare_negation_negates_operator(leaf in arb_leaf()) {
        let record = customers(&format!("!{}", leaf.source));
        let mut want = leaf.expected;
        want.operator = want.operator.negated();
        prop_assert_eq!(record.group_operator, LogicalOp::And);
        prop_assert_eq!(leaves_only(&record), vec![want]);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Precedence
//
// `a||b&&c` groups the conjunction under the disjunction, never the reverse.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn and_binds_tighter_than_or(a in arb_leaf(), bc in arb_leaves(4)) {
        let record = customers(&format!("{}||{}", a.source, join(&bc, "&&")));
        prop_assert_eq!(record.group_operator, LogicalOp::Or);
        prop_assert_eq!(record.children.len(), 2);
        prop_assert_eq!(&record.children[0], &RuleNode::Leaf(a.expected));
        match &record.children[1] {
            RuleNode::Group(g) => {
                prop_assert_eq!(g.group_operator, LogicalOp::And);
                prop_assert_eq!(g.children.len(), bc.len());
            }
            other => prop_assert!(false, "expected AND group, got {:?}", other),
        }
    }

    #[test]
    fn padding_does_not_change_the_tree(leaves in arb_leaves(4)) {
        let compact = customers(&join(&leaves, "&&"));
        let padded = customers(&format!("  {}  ", join(&leaves, " \t&&\n ")));
        prop_assert_eq!(compact, padded);
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Batch shape
//
// The wrapper has one record per input, in input order, and each record is
// exactly what translating it alone produces.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn batch_preserves_length_and_order(
        batch in prop::collection::vec((arb_leaves(3), prop::option::of(0_i64..50)), 0..10)
    ) {
        let records: Vec<InputRecord> = batch
            .iter()
            .map(|(leaves, qty)| {
                let record = InputRecord::new().set("matchRule", join(leaves, "||"));
                match qty {
                    Some(q) => record.set("quantity", q.to_string()),
                    None => record,
                }
            })
            .collect();

        let translator = Translator::builder().quantity_attribute("quantity").build();
        let wrapper = translator.translate(&records, &FieldService::customer()).unwrap();

        prop_assert_eq!(wrapper.len(), records.len());
        for (record, (leaves, qty)) in wrapper.iter().zip(&batch) {
            let alone = customers(&join(leaves, "||"));
            prop_assert_eq!(&record.children, &alone.children);
            prop_assert_eq!(record.quantity, *qty);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Totality
//
// Arbitrary input never panics; it either translates or returns an error.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn arbitrary_input_never_panics(input in r#"[a-zA-Z.()!&|=<> "0-9\\-]{0,40}"#) {
        let _ = translate_expression(&input, &FieldService::customer());
    }
}
