//! Propositional formula engine
//!
//! Immutable expression trees over four connectives plus literal constants.
//! The smart constructors [`Formula::conjoin`] and [`Formula::disjoin`]
//! flatten nested nodes of the same kind and short-circuit on absorbing
//! literals, so n-ary constructions stay shallow.
//!
//! Satisfiability is decided by exhaustive enumeration and is only meant to
//! validate small formulas; see [`Formula::satisfying_assignment_within`].

mod display;

pub use display::Pretty;

use crate::ReductionError;
use bitvec::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Not};

/// Variable ceiling used by [`Formula::satisfying_assignment`]
///
/// 2^24 evaluations is already on the order of seconds for small formulas.
pub const DEFAULT_BRUTE_FORCE_LIMIT: usize = 24;

/// Mapping from variable to truth value
pub type Assignment<V> = HashMap<V, bool>;

/// Boolean formula over variables of type `V`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula<V> {
    /// Literal `true` / `false`
    Const(bool),
    /// Variable reference
    Var(V),
    /// N-ary conjunction (empty = true)
    And(Vec<Formula<V>>),
    /// N-ary disjunction (empty = false)
    Or(Vec<Formula<V>>),
    /// Negation
    Not(Box<Formula<V>>),
}

impl<V> Formula<V> {
    /// Variable leaf
    pub fn var(name: V) -> Self {
        Formula::Var(name)
    }

    /// Literal `true`
    pub fn top() -> Self {
        Formula::Const(true)
    }

    /// Literal `false`
    pub fn bottom() -> Self {
        Formula::Const(false)
    }

    /// Conjunction of `args`
    ///
    /// Any `false` argument collapses the result to `false`; `true` arguments
    /// are dropped; nested conjunctions are spliced in.
    pub fn conjoin<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Formula<V>>,
    {
        let mut flat = Vec::new();
        for arg in args {
            match arg {
                Formula::Const(true) => {}
                Formula::Const(false) => return Formula::Const(false),
                Formula::And(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Formula::Const(true),
            1 => flat.remove(0),
            _ => Formula::And(flat),
        }
    }

    /// Disjunction of `args`
    ///
    /// Any `true` argument collapses the result to `true`; `false` arguments
    /// are dropped; nested disjunctions are spliced in.
    pub fn disjoin<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Formula<V>>,
    {
        let mut flat = Vec::new();
        for arg in args {
            match arg {
                Formula::Const(false) => {}
                Formula::Const(true) => return Formula::Const(true),
                Formula::Or(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Formula::Const(false),
            1 => flat.remove(0),
            _ => Formula::Or(flat),
        }
    }

    /// Negation (literals are folded)
    pub fn negate(f: Formula<V>) -> Self {
        match f {
            Formula::Const(b) => Formula::Const(!b),
            other => Formula::Not(Box::new(other)),
        }
    }

    /// Exactly one of `vars` holds: at-least-one clause plus pairwise at-most-one
    pub fn exactly_one(vars: Vec<Formula<V>>) -> Self
    where
        V: Clone,
    {
        let mut clauses = Vec::with_capacity(1 + vars.len() * vars.len() / 2);
        clauses.push(Formula::disjoin(vars.iter().cloned()));
        for (i, a) in vars.iter().enumerate() {
            for b in &vars[i + 1..] {
                clauses.push(Formula::disjoin([
                    Formula::negate(a.clone()),
                    Formula::negate(b.clone()),
                ]));
            }
        }
        Formula::conjoin(clauses)
    }

    /// Number of AST nodes
    pub fn size(&self) -> usize {
        match self {
            Formula::Const(_) | Formula::Var(_) => 1,
            Formula::And(args) | Formula::Or(args) => {
                1 + args.iter().map(Formula::size).sum::<usize>()
            }
            Formula::Not(inner) => 1 + inner.size(),
        }
    }

    /// Distinct variables, in sorted order
    pub fn variables(&self) -> BTreeSet<V>
    where
        V: Ord + Clone,
    {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<V>)
    where
        V: Ord + Clone,
    {
        match self {
            Formula::Const(_) => {}
            Formula::Var(v) => {
                if !out.contains(v) {
                    out.insert(v.clone());
                }
            }
            Formula::And(args) | Formula::Or(args) => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
            Formula::Not(inner) => inner.collect_variables(out),
        }
    }

    /// Evaluate under `assignment`
    ///
    /// Fails with [`ReductionError::UnboundVariable`] if a variable reached
    /// during evaluation is missing from the assignment.
    pub fn evaluate(&self, assignment: &Assignment<V>) -> Result<bool, ReductionError>
    where
        V: Eq + Hash + Display,
    {
        match self {
            Formula::Const(b) => Ok(*b),
            Formula::Var(v) => assignment
                .get(v)
                .copied()
                .ok_or_else(|| ReductionError::UnboundVariable(v.to_string())),
            Formula::And(args) => {
                for arg in args {
                    if !arg.evaluate(assignment)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Formula::Or(args) => {
                for arg in args {
                    if arg.evaluate(assignment)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Formula::Not(inner) => Ok(!inner.evaluate(assignment)?),
        }
    }

    /// Substitute the variables bound in `partial` and re-simplify
    ///
    /// Unbound variables are left in place, so the result ranges over the
    /// free remainder only.
    pub fn restrict(&self, partial: &Assignment<V>) -> Formula<V>
    where
        V: Clone + Eq + Hash,
    {
        match self {
            Formula::Const(b) => Formula::Const(*b),
            Formula::Var(v) => match partial.get(v) {
                Some(b) => Formula::Const(*b),
                None => Formula::Var(v.clone()),
            },
            Formula::And(args) => Formula::conjoin(args.iter().map(|a| a.restrict(partial))),
            Formula::Or(args) => Formula::disjoin(args.iter().map(|a| a.restrict(partial))),
            Formula::Not(inner) => Formula::negate(inner.restrict(partial)),
        }
    }

    /// First satisfying assignment, enumerating at most
    /// [`DEFAULT_BRUTE_FORCE_LIMIT`] variables
    pub fn satisfying_assignment(&self) -> Result<Option<Assignment<V>>, ReductionError>
    where
        V: Ord + Clone + Hash + Display,
    {
        self.satisfying_assignment_within(DEFAULT_BRUTE_FORCE_LIMIT)
    }

    /// First satisfying assignment by exhaustive enumeration
    ///
    /// Cost is 2^k evaluations for k distinct variables. Refuses with
    /// [`ReductionError::TooManyVariables`] when k exceeds `max_variables`.
    /// Assignments are visited in binary counting order over the sorted
    /// variables, all-false first, last variable varying fastest.
    pub fn satisfying_assignment_within(
        &self,
        max_variables: usize,
    ) -> Result<Option<Assignment<V>>, ReductionError>
    where
        V: Ord + Clone + Hash + Display,
    {
        let vars: Vec<V> = self.variables().into_iter().collect();
        if vars.len() > max_variables {
            return Err(ReductionError::TooManyVariables {
                variables: vars.len(),
                limit: max_variables,
            });
        }

        let mut bits = bitvec![0; vars.len()];
        loop {
            let assignment: Assignment<V> =
                vars.iter().cloned().zip(bits.iter().by_vals()).collect();
            if self.evaluate(&assignment)? {
                return Ok(Some(assignment));
            }
            if !increment(&mut bits) {
                return Ok(None);
            }
        }
    }

    /// Whether some assignment satisfies the formula (exhaustive)
    pub fn satisfiable(&self) -> Result<bool, ReductionError>
    where
        V: Ord + Clone + Hash + Display,
    {
        Ok(self.satisfying_assignment()?.is_some())
    }
}

/// Binary increment, last bit least significant. Returns false on wrap-around.
fn increment(bits: &mut BitVec) -> bool {
    for i in (0..bits.len()).rev() {
        if bits[i] {
            bits.set(i, false);
        } else {
            bits.set(i, true);
            return true;
        }
    }
    false
}

impl<V> BitAnd for Formula<V> {
    type Output = Formula<V>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::conjoin([self, rhs])
    }
}

impl<V> BitOr for Formula<V> {
    type Output = Formula<V>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::disjoin([self, rhs])
    }
}

impl<V> Not for Formula<V> {
    type Output = Formula<V>;

    fn not(self) -> Self::Output {
        Formula::negate(self)
    }
}
