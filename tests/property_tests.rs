//! Property tests over the arithmetic semantics, the widening lattice, and
//! the overload resolver.

use mjava::interpreter::classes::ClassTable;
use mjava::interpreter::overload::{resolve, ResolveFailure};
use mjava::memory::value::Kind;
use mjava::run_source;
use proptest::prelude::*;

fn run_main(body: &str) -> String {
    let source = format!("class Main {{ void main() {{ {} }} }}", body);
    run_source(&source).expect("program should run")
}

fn primitive_kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Byte),
        Just(Kind::Short),
        Just(Kind::Int),
        Just(Kind::Long),
        Just(Kind::Float),
        Just(Kind::Double),
        Just(Kind::Char),
        Just(Kind::Bool),
    ]
}

proptest! {
    #[test]
    fn division_identity_holds(a in -1_000_000i32..1_000_000, b in -1000i32..1000) {
        prop_assume!(b != 0);
        let output = run_main(&format!(
            "int q = ({}) / ({}); int r = ({}) % ({}); println(q * ({}) + r);",
            a, b, a, b, b
        ));
        prop_assert_eq!(output, format!("{}\n", a));
    }

    #[test]
    fn integer_division_matches_truncation(a in -1_000_000i32..1_000_000, b in -1000i32..1000) {
        prop_assume!(b != 0);
        let output = run_main(&format!("println(({}) / ({}));", a, b));
        prop_assert_eq!(output, format!("{}\n", a.wrapping_div(b)));
    }

    #[test]
    fn remainder_takes_dividend_sign(a in -1_000_000i32..1_000_000, b in -1000i32..1000) {
        prop_assume!(b != 0);
        let output = run_main(&format!("println(({}) % ({}));", a, b));
        prop_assert_eq!(output, format!("{}\n", a.wrapping_rem(b)));
    }

    #[test]
    fn ternary_parity_matches(n in -1_000_000i32..1_000_000) {
        let output = run_main(&format!(
            "println(({}) % 2 == 0 ? \"Par\" : \"Impar\");",
            n
        ));
        let expected = if n % 2 == 0 { "Par\n" } else { "Impar\n" };
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn string_concat_matches_display(n in -2_000_000_000i32..2_000_000_000) {
        let output = run_main(&format!("println(\"n = \" + ({}));", n));
        prop_assert_eq!(output, format!("n = {}\n", n));
    }

    #[test]
    fn widening_is_transitive(
        a in primitive_kind(),
        b in primitive_kind(),
        c in primitive_kind(),
    ) {
        if a.widens_to(&b) && b.widens_to(&c) {
            prop_assert!(a.widens_to(&c));
        }
    }

    #[test]
    fn widening_is_antisymmetric(a in primitive_kind(), b in primitive_kind()) {
        if a != b && a.widens_to(&b) {
            prop_assert!(!b.widens_to(&a));
        }
    }

    #[test]
    fn resolver_is_deterministic(
        candidates in prop::collection::vec(
            prop::collection::vec(primitive_kind(), 0..4),
            1..6,
        ),
        args in prop::collection::vec(primitive_kind(), 0..4),
    ) {
        let table = ClassTable::from_programs(&[]).unwrap();
        let first = resolve(&table, &candidates, &args);
        let second = resolve(&table, &candidates, &args);
        prop_assert_eq!(first, second);

        if let Ok(index) = first {
            prop_assert!(index < candidates.len());
            prop_assert_eq!(candidates[index].len(), args.len());
        }
    }

    #[test]
    fn unique_exact_candidate_always_wins(
        candidates in prop::collection::vec(
            prop::collection::vec(primitive_kind(), 0..4),
            1..6,
        ),
        args in prop::collection::vec(primitive_kind(), 0..4),
    ) {
        let exact: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == args)
            .map(|(i, _)| i)
            .collect();

        let table = ClassTable::from_programs(&[]).unwrap();
        match exact.as_slice() {
            [only] => prop_assert_eq!(resolve(&table, &candidates, &args), Ok(*only)),
            [_, _, ..] => prop_assert_eq!(
                resolve(&table, &candidates, &args),
                Err(ResolveFailure::Ambiguous)
            ),
            [] => {}
        }
    }
}
