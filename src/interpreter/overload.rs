//! Overload resolution over a set of candidate signatures.
//!
//! Resolution runs in three stages: keep candidates with matching arity,
//! keep those every argument can reach by an implicit conversion, then pick
//! the candidate converting the fewest arguments. A tie at minimal cost is
//! ambiguous and resolution fails rather than picking arbitrarily.

use super::classes::ClassTable;
use crate::memory::value::Kind;

/// Why resolution produced no candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    NoMatch,
    Ambiguous,
}

/// Cost of passing an argument of kind `arg` to a parameter declared as
/// `param`: 0 for an exact match, 1 for an implicit conversion, `None` when
/// the argument is not accepted.
fn conversion_cost(table: &ClassTable, arg: &Kind, param: &Kind) -> Option<u32> {
    if arg == param {
        return Some(0);
    }

    if arg.widens_to(param) {
        return Some(1);
    }

    match (arg, param) {
        // null is accepted by any reference parameter
        (Kind::Null, p) if p.is_reference() && *p != Kind::Null => Some(1),
        // an instance is accepted where an ancestor class is declared
        (Kind::Object(arg_class), Kind::Object(param_class)) => {
            if table.is_same_or_descendant(arg_class, param_class) {
                Some(1)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Resolve a call against candidate parameter kind lists.
///
/// Returns the index of the winning candidate in `candidates`.
pub fn resolve(
    table: &ClassTable,
    candidates: &[Vec<Kind>],
    args: &[Kind],
) -> Result<usize, ResolveFailure> {
    let mut best: Option<(usize, u32)> = None;
    let mut tied = false;

    for (index, params) in candidates.iter().enumerate() {
        if params.len() != args.len() {
            continue;
        }

        let mut total = 0u32;
        let mut applicable = true;
        for (arg, param) in args.iter().zip(params.iter()) {
            match conversion_cost(table, arg, param) {
                Some(cost) => total += cost,
                None => {
                    applicable = false;
                    break;
                }
            }
        }
        if !applicable {
            continue;
        }

        match best {
            None => {
                best = Some((index, total));
                tied = false;
            }
            Some((_, best_cost)) if total < best_cost => {
                best = Some((index, total));
                tied = false;
            }
            Some((_, best_cost)) if total == best_cost => {
                tied = true;
            }
            Some(_) => {}
        }
    }

    match best {
        Some((index, _)) if !tied => Ok(index),
        Some(_) => Err(ResolveFailure::Ambiguous),
        None => Err(ResolveFailure::NoMatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_table() -> ClassTable {
        ClassTable::from_programs(&[]).unwrap()
    }

    /// The overload set of the four-signature adder:
    /// (int, int), (double, double), (int, int, int), (int, double)
    fn somar_candidates() -> Vec<Vec<Kind>> {
        vec![
            vec![Kind::Int, Kind::Int],
            vec![Kind::Double, Kind::Double],
            vec![Kind::Int, Kind::Int, Kind::Int],
            vec![Kind::Int, Kind::Double],
        ]
    }

    #[test]
    fn test_exact_int_pair() {
        let table = empty_table();
        let picked = resolve(&table, &somar_candidates(), &[Kind::Int, Kind::Int]).unwrap();
        assert_eq!(picked, 0);
    }

    #[test]
    fn test_exact_double_pair() {
        let table = empty_table();
        let picked = resolve(&table, &somar_candidates(), &[Kind::Double, Kind::Double]).unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn test_arity_selects_triple() {
        let table = empty_table();
        let picked = resolve(
            &table,
            &somar_candidates(),
            &[Kind::Int, Kind::Int, Kind::Int],
        )
        .unwrap();
        assert_eq!(picked, 2);
    }

    #[test]
    fn test_mixed_pair_prefers_exact() {
        // somar(2, 3.5): (int, double) matches at cost 0 and beats the
        // (double, double) candidate, which costs one widening
        let table = empty_table();
        let picked = resolve(&table, &somar_candidates(), &[Kind::Int, Kind::Double]).unwrap();
        assert_eq!(picked, 3);
    }

    #[test]
    fn test_char_argument_widens_to_int_param() {
        let table = empty_table();
        let picked = resolve(&table, &[vec![Kind::Int]], &[Kind::Char]).unwrap();
        assert_eq!(picked, 0);
    }

    #[test]
    fn test_cheaper_candidate_wins() {
        let table = empty_table();
        let candidates = vec![
            vec![Kind::Long, Kind::Long],
            vec![Kind::Int, Kind::Long],
        ];
        // (int, int): two widenings against one
        let picked = resolve(&table, &candidates, &[Kind::Int, Kind::Int]).unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn test_equal_cost_is_ambiguous() {
        let table = empty_table();
        let candidates = vec![
            vec![Kind::Int, Kind::Double],
            vec![Kind::Double, Kind::Int],
        ];
        let err = resolve(&table, &candidates, &[Kind::Int, Kind::Int]).unwrap_err();
        assert_eq!(err, ResolveFailure::Ambiguous);
    }

    #[test]
    fn test_no_match_on_arity() {
        let table = empty_table();
        let err = resolve(&table, &somar_candidates(), &[Kind::Int]).unwrap_err();
        assert_eq!(err, ResolveFailure::NoMatch);
    }

    #[test]
    fn test_no_narrowing() {
        let table = empty_table();
        let candidates = vec![vec![Kind::Int]];
        let err = resolve(&table, &candidates, &[Kind::Long]).unwrap_err();
        assert_eq!(err, ResolveFailure::NoMatch);
    }

    #[test]
    fn test_bool_matches_only_bool() {
        let table = empty_table();
        let candidates = vec![vec![Kind::Int], vec![Kind::Bool]];
        let picked = resolve(&table, &candidates, &[Kind::Bool]).unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn test_null_matches_reference_param() {
        let table = empty_table();
        let candidates = vec![vec![Kind::Str], vec![Kind::Int]];
        let picked = resolve(&table, &candidates, &[Kind::Null]).unwrap();
        assert_eq!(picked, 0);
    }
}
