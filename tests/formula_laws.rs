use cooklevin::{Assignment, Formula};
use proptest::prelude::*;

const NUM_VARS: u8 = 4;

fn formula() -> impl Strategy<Value = Formula<u8>> {
    let leaf = prop_oneof![
        3 => (0..NUM_VARS).prop_map(Formula::var),
        1 => any::<bool>().prop_map(Formula::Const),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(|args| Formula::conjoin(args)),
            proptest::collection::vec(inner.clone(), 0..4).prop_map(|args| Formula::disjoin(args)),
            inner.prop_map(Formula::negate),
        ]
    })
}

fn assignment() -> impl Strategy<Value = Assignment<u8>> {
    proptest::collection::vec(any::<bool>(), NUM_VARS as usize)
        .prop_map(|bits| (0..NUM_VARS).zip(bits).collect())
}

fn all_assignments() -> Vec<Assignment<u8>> {
    (0u32..(1 << NUM_VARS))
        .map(|mask| (0..NUM_VARS).map(|v| (v, mask & (1 << v) != 0)).collect())
        .collect()
}

proptest! {
    #[test]
    fn nesting_depth_does_not_change_meaning(
        a in formula(),
        b in formula(),
        c in formula(),
        asst in assignment(),
    ) {
        let left = Formula::conjoin([Formula::conjoin([a.clone(), b.clone()]), c.clone()]);
        let right = Formula::conjoin([a.clone(), Formula::conjoin([b.clone(), c.clone()])]);
        let flat = Formula::conjoin([a.clone(), b.clone(), c.clone()]);
        prop_assert_eq!(left.variables(), flat.variables());
        prop_assert_eq!(right.variables(), flat.variables());
        prop_assert_eq!(left.evaluate(&asst).unwrap(), flat.evaluate(&asst).unwrap());
        prop_assert_eq!(right.evaluate(&asst).unwrap(), flat.evaluate(&asst).unwrap());

        let left = Formula::disjoin([Formula::disjoin([a.clone(), b.clone()]), c.clone()]);
        let flat = Formula::disjoin([a, b, c]);
        prop_assert_eq!(left.variables(), flat.variables());
        prop_assert_eq!(left.evaluate(&asst).unwrap(), flat.evaluate(&asst).unwrap());
    }

    #[test]
    fn constructors_match_boolean_semantics(
        args in proptest::collection::vec(formula(), 0..5),
        asst in assignment(),
    ) {
        let values: Vec<bool> = args.iter().map(|f| f.evaluate(&asst).unwrap()).collect();
        prop_assert_eq!(
            Formula::conjoin(args.clone()).evaluate(&asst).unwrap(),
            values.iter().all(|v| *v)
        );
        prop_assert_eq!(
            Formula::disjoin(args.clone()).evaluate(&asst).unwrap(),
            values.iter().any(|v| *v)
        );
        for (f, v) in args.into_iter().zip(values) {
            prop_assert_eq!(Formula::negate(f).evaluate(&asst).unwrap(), !v);
        }
    }

    #[test]
    fn de_morgan(a in formula(), b in formula(), asst in assignment()) {
        let lhs = !(a.clone() & b.clone());
        let rhs = !a | !b;
        prop_assert_eq!(lhs.evaluate(&asst).unwrap(), rhs.evaluate(&asst).unwrap());
    }

    #[test]
    fn restriction_agrees_with_full_evaluation(
        f in formula(),
        asst in assignment(),
        keep in proptest::collection::vec(any::<bool>(), NUM_VARS as usize),
    ) {
        let partial: Assignment<u8> = asst
            .iter()
            .filter(|(v, _)| keep[**v as usize])
            .map(|(v, b)| (*v, *b))
            .collect();
        let restricted = f.restrict(&partial);
        prop_assert!(restricted.variables().iter().all(|v| !partial.contains_key(v)));
        prop_assert_eq!(restricted.evaluate(&asst).unwrap(), f.evaluate(&asst).unwrap());
    }

    #[test]
    fn exhaustive_search_is_complete(f in formula()) {
        match f.satisfying_assignment().unwrap() {
            Some(found) => prop_assert!(f.evaluate(&found).unwrap()),
            None => {
                for asst in all_assignments() {
                    prop_assert!(!f.evaluate(&asst).unwrap());
                }
            }
        }
    }

    #[test]
    fn pretty_printing_is_display_only(f in formula(), limit in 0usize..4) {
        let before = f.clone();
        let rendered = f.pretty(limit).to_string();
        prop_assert!(!rendered.is_empty());
        prop_assert_eq!(f, before);
    }
}

#[test]
fn empty_connectives_under_every_assignment() {
    for asst in all_assignments() {
        assert!(Formula::<u8>::conjoin([]).evaluate(&asst).unwrap());
        assert!(!Formula::<u8>::disjoin([]).evaluate(&asst).unwrap());
    }
}
