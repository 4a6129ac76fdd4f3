use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use vibeplan::expression::{extract_plan_info, ArithOpType, Expr, OpType};
use vibeplan::plan::{AnalyzerConfig, Eligibility, ExtractedPlanInfo};
use vibeplan::schema::FieldId;

fn extract(expr: &Expr) -> ExtractedPlanInfo {
    extract_plan_info(expr, &AnalyzerConfig::default()).unwrap()
}

fn ids(fields: &[i64]) -> Vec<FieldId> {
    fields.iter().map(|&f| FieldId(f)).collect()
}

fn field(rng: &mut StdRng) -> FieldId {
    FieldId(rng.gen_range(0..8))
}

/// Random tree over fields 0..8, mixing every node kind
fn random_tree(rng: &mut StdRng, depth: usize) -> Expr {
    if depth == 0 || rng.gen_bool(0.3) {
        return match rng.gen_range(0..5) {
            0 => Expr::term(field(rng), [rng.gen_range(0..100i64)]),
            1 => Expr::unary_range(field(rng), OpType::GreaterEqual, 3i64),
            2 => Expr::binary_range(field(rng), 1i64, true, 10i64, false),
            3 => Expr::arith_range(field(rng), ArithOpType::Mul, 2i64, OpType::NotEqual, 8i64),
            _ => Expr::compare(field(rng), OpType::LessEqual, field(rng)),
        };
    }
    match rng.gen_range(0..3) {
        0 => Expr::not(random_tree(rng, depth - 1)),
        1 => Expr::and(random_tree(rng, depth - 1), random_tree(rng, depth - 1)),
        _ => Expr::or(random_tree(rng, depth - 1), random_tree(rng, depth - 1)),
    }
}

/// Independent walk: (all fields, scan-only fields, compare count)
fn oracle(expr: &Expr, all: &mut BTreeSet<FieldId>, scan: &mut BTreeSet<FieldId>) -> usize {
    match expr {
        Expr::LogicalUnary(e) => oracle(&e.child, all, scan),
        Expr::LogicalBinary(e) => oracle(&e.left, all, scan) + oracle(&e.right, all, scan),
        Expr::Term(e) => {
            all.insert(e.field_id);
            0
        }
        Expr::UnaryRange(e) => {
            all.insert(e.field_id);
            0
        }
        Expr::BinaryRange(e) => {
            all.insert(e.field_id);
            0
        }
        Expr::BinaryArithOpEvalRange(e) => {
            all.insert(e.field_id);
            scan.insert(e.field_id);
            0
        }
        Expr::Compare(e) => {
            for id in [e.left_field_id, e.right_field_id] {
                all.insert(id);
                scan.insert(id);
            }
            1
        }
    }
}

#[test]
fn test_term_scenario() {
    let info = extract(&Expr::term(FieldId(3), [1i64, 2]));

    assert_eq!(info.involved_fields().collect::<Vec<_>>(), ids(&[3]));
    assert!(info.is_index_eligible(FieldId(3)));
    assert!(!info.has_cross_field_compare());
}

#[test]
fn test_range_and_arith_scenario() {
    let expr = Expr::and(
        Expr::unary_range(FieldId(5), OpType::LessThan, 10i64),
        Expr::arith_range(FieldId(5), ArithOpType::Mod, 2i64, OpType::Equal, 0i64),
    );
    let info = extract(&expr);

    assert_eq!(info.involved_fields().collect::<Vec<_>>(), ids(&[5]));
    assert_eq!(info.eligibility(FieldId(5)), Some(Eligibility::ScanOnly));
    assert!(!info.has_cross_field_compare());
}

#[test]
fn test_compare_scenario() {
    let info = extract(&Expr::compare(FieldId(1), OpType::Equal, FieldId(2)));

    assert_eq!(info.involved_fields().collect::<Vec<_>>(), ids(&[1, 2]));
    assert!(info.index_eligible_fields().is_empty());
    assert!(info.has_cross_field_compare());
}

#[test]
fn test_not_term_scenario() {
    let info = extract(&Expr::not(Expr::term(FieldId(7), ["a"])));

    assert_eq!(info.involved_fields().collect::<Vec<_>>(), ids(&[7]));
    assert!(info.is_index_eligible(FieldId(7)));
    assert!(!info.has_cross_field_compare());
}

#[test]
fn test_or_compare_term_scenario() {
    let expr = Expr::or(
        Expr::compare(FieldId(1), OpType::GreaterThan, FieldId(2)),
        Expr::term(FieldId(1), [5i64]),
    );
    let info = extract(&expr);

    assert_eq!(info.involved_fields().collect::<Vec<_>>(), ids(&[1, 2]));
    assert_eq!(info.eligibility(FieldId(1)), Some(Eligibility::ScanOnly));
    assert!(info.has_cross_field_compare());
}

#[test]
fn test_random_trees_match_independent_walk() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let expr = random_tree(&mut rng, 6);
        let info = extract(&expr);

        let mut all = BTreeSet::new();
        let mut scan = BTreeSet::new();
        let compares = oracle(&expr, &mut all, &mut scan);

        assert_eq!(info.involved_fields().collect::<BTreeSet<_>>(), all, "{}", expr);
        assert_eq!(
            info.scan_only_fields().into_iter().collect::<BTreeSet<_>>(),
            scan,
            "{}",
            expr
        );
        assert_eq!(info.has_cross_field_compare(), compares > 0, "{}", expr);
    }
}

#[test]
fn test_reanalysis_is_identical() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let expr = random_tree(&mut rng, 5);
        let first = extract(&expr);
        let second = extract(&expr);

        assert_eq!(first, second);
        assert_eq!(
            bincode::serialize(&first).unwrap(),
            bincode::serialize(&second).unwrap()
        );
    }
}

#[test]
fn test_negation_never_changes_info() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..100 {
        let expr = random_tree(&mut rng, 5);
        let plain = extract(&expr);
        assert_eq!(extract(&Expr::not(expr.clone())), plain);
        assert_eq!(extract(&Expr::not(Expr::not(expr))), plain);
    }
}

#[test]
fn test_one_scan_only_leaf_outweighs_many_eligible_ones() {
    let mut expr = Expr::arith_range(FieldId(4), ArithOpType::Add, 1i64, OpType::Equal, 3i64);
    for i in 0..20 {
        let eligible = match i % 3 {
            0 => Expr::term(FieldId(4), [i as i64]),
            1 => Expr::unary_range(FieldId(4), OpType::NotEqual, i as i64),
            _ => Expr::binary_range(FieldId(4), 0i64, false, i as i64, true),
        };
        expr = if i % 2 == 0 {
            Expr::and(eligible, expr)
        } else {
            Expr::or(expr, eligible)
        };
    }

    let info = extract(&expr);
    assert_eq!(info.eligibility(FieldId(4)), Some(Eligibility::ScanOnly));
    assert!(!info.is_index_servable());
}

#[test]
fn test_duplicate_leaves() {
    let leaf = Expr::unary_range(FieldId(2), OpType::Equal, 1i64);
    let info = extract(&Expr::and(leaf.clone(), leaf.clone()));

    assert_eq!(info, extract(&leaf));
    assert_eq!(info.len(), 1);
}
