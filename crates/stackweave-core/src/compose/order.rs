//! Stable topological ordering of addon units
//!
//! Units are walked in caller order. Before a unit is emitted, its
//! not-yet-emitted predecessors are emitted first (recursively, also in
//! caller order). Units with no constraint between them therefore keep the
//! order the caller supplied them in.

use std::collections::HashMap;

use super::model::{AddonUnit, OrderingHint};
use crate::errors::{Result, StackError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Compute the deployment order as indices into `units`
///
/// # Errors
/// * `DuplicateAddon` - two units share a name
/// * `UnknownAddon` - a hint names an addon not in `units`
/// * `OrderingConflict` - the hints form a cycle (including a unit ordered
///   relative to itself)
pub fn stable_order(units: &[AddonUnit]) -> Result<Vec<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(units.len());
    for (idx, unit) in units.iter().enumerate() {
        if index.insert(unit.name.as_str(), idx).is_some() {
            return Err(StackError::DuplicateAddon {
                name: unit.name.clone(),
            });
        }
    }

    // preds[i] = units that must come before unit i
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); units.len()];
    for (idx, unit) in units.iter().enumerate() {
        let Some(hint) = &unit.ordering else {
            continue;
        };
        let other = *index
            .get(hint.counterpart())
            .ok_or_else(|| StackError::UnknownAddon {
                addon: unit.name.clone(),
                missing: hint.counterpart().to_string(),
            })?;
        match hint {
            OrderingHint::Before(_) => preds[other].push(idx),
            OrderingHint::After(_) => preds[idx].push(other),
        }
    }
    for list in &mut preds {
        list.sort_unstable();
    }

    let mut marks = vec![Mark::Unvisited; units.len()];
    let mut order = Vec::with_capacity(units.len());
    for idx in 0..units.len() {
        visit(idx, units, &preds, &mut marks, &mut order)?;
    }

    Ok(order)
}

/// Depth-first walk over predecessors with an explicit stack
///
/// Each stack frame is a unit plus the index of the next predecessor to
/// look at; the units on the stack are the current path.
fn visit(
    root: usize,
    units: &[AddonUnit],
    preds: &[Vec<usize>],
    marks: &mut [Mark],
    order: &mut Vec<usize>,
) -> Result<()> {
    if marks[root] == Mark::Done {
        return Ok(());
    }

    marks[root] = Mark::InProgress;
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

    while let Some(&(idx, next)) = stack.last() {
        let Some(&pred) = preds[idx].get(next) else {
            stack.pop();
            marks[idx] = Mark::Done;
            order.push(idx);
            continue;
        };

        let top = stack.len() - 1;
        stack[top].1 += 1;

        match marks[pred] {
            Mark::Done => {}
            Mark::InProgress => {
                let from = stack.iter().position(|&(p, _)| p == pred).unwrap_or(0);
                let addons = stack[from..]
                    .iter()
                    .map(|&(i, _)| i)
                    .chain(std::iter::once(pred))
                    .map(|i| units[i].name.clone())
                    .collect();
                return Err(StackError::OrderingConflict { addons });
            }
            Mark::Unvisited => {
                marks[pred] = Mark::InProgress;
                stack.push((pred, 0));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn unit(name: &str) -> AddonUnit {
        AddonUnit::with_values(name, Value::Null)
    }

    fn names(units: &[AddonUnit], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| units[i].name.clone()).collect()
    }

    #[test]
    fn test_no_hints_keeps_caller_order() {
        let units = vec![unit("a"), unit("b"), unit("c")];
        let order = stable_order(&units).unwrap();
        assert_eq!(names(&units, &order), ["a", "b", "c"]);
    }

    #[test]
    fn test_before_pulls_unit_ahead_of_counterpart() {
        let units = vec![unit("a"), unit("b"), unit("c").before("a")];
        let order = stable_order(&units).unwrap();
        assert_eq!(names(&units, &order), ["c", "a", "b"]);
    }

    #[test]
    fn test_after_pulls_counterpart_ahead() {
        let units = vec![unit("a").after("c"), unit("b"), unit("c")];
        let order = stable_order(&units).unwrap();
        assert_eq!(names(&units, &order), ["c", "a", "b"]);
    }

    #[test]
    fn test_already_satisfied_hint_changes_nothing() {
        let units = vec![unit("a").before("c"), unit("b"), unit("c")];
        let order = stable_order(&units).unwrap();
        assert_eq!(names(&units, &order), ["a", "b", "c"]);
    }

    #[test]
    fn test_chain_of_hints() {
        let units = vec![unit("a").after("b"), unit("b").after("c"), unit("c")];
        let order = stable_order(&units).unwrap();
        assert_eq!(names(&units, &order), ["c", "b", "a"]);
    }

    #[test]
    fn test_two_cycle_reports_members() {
        let units = vec![unit("a").before("b"), unit("b").before("a")];
        let err = stable_order(&units).unwrap_err();
        assert_eq!(
            err,
            StackError::OrderingConflict {
                addons: vec!["a".into(), "b".into(), "a".into()],
            }
        );
    }

    #[test]
    fn test_self_reference_is_conflict() {
        let units = vec![unit("a").after("a")];
        assert!(matches!(
            stable_order(&units),
            Err(StackError::OrderingConflict { .. })
        ));
    }

    #[test]
    fn test_three_cycle_detected() {
        let units = vec![
            unit("a").after("c"),
            unit("b").after("a"),
            unit("c").after("b"),
        ];
        let err = stable_order(&units).unwrap_err();
        match err {
            StackError::OrderingConflict { addons } => {
                assert_eq!(addons.first(), addons.last());
                assert_eq!(addons.len(), 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let units = vec![unit("x"), unit("x")];
        assert_eq!(
            stable_order(&units).unwrap_err(),
            StackError::DuplicateAddon {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_counterpart_rejected() {
        let units = vec![unit("a").before("ghost")];
        assert_eq!(
            stable_order(&units).unwrap_err(),
            StackError::UnknownAddon {
                addon: "a".to_string(),
                missing: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_long_chain_does_not_exhaust_stack() {
        // u0 after u1 after u2 ... after u(n-1)
        let n = 50_000;
        let units: Vec<AddonUnit> = (0..n)
            .map(|i| {
                let u = unit(&format!("u{i}"));
                if i + 1 < n {
                    u.after(format!("u{}", i + 1))
                } else {
                    u
                }
            })
            .collect();

        let order = stable_order(&units).unwrap();
        let expected: Vec<usize> = (0..n).rev().collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_long_cycle_reports_every_member() {
        let n = 10_000;
        let units: Vec<AddonUnit> = (0..n)
            .map(|i| unit(&format!("u{i}")).after(format!("u{}", (i + 1) % n)))
            .collect();

        match stable_order(&units).unwrap_err() {
            StackError::OrderingConflict { addons } => {
                assert_eq!(addons.len(), n + 1);
                assert_eq!(addons.first(), addons.last());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_set() {
        assert!(stable_order(&[]).unwrap().is_empty());
    }
}
