//! Infix rendering with ¬ ∧ ∨
//!
//! A disjunction directly under a conjunction or negation is parenthesized;
//! conjunctions under negation are parenthesized too.

use super::Formula;
use std::fmt;

/// Display adapter truncating long connectives after `limit` arguments
#[derive(Debug, Clone, Copy)]
pub struct Pretty<'a, V> {
    formula: &'a Formula<V>,
    limit: usize,
}

impl<V> Formula<V> {
    /// Bounded-arity rendering: connectives show at most `limit` arguments
    /// followed by `...`
    pub fn pretty(&self, limit: usize) -> Pretty<'_, V> {
        Pretty {
            formula: self,
            limit,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Formula<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, None, f)
    }
}

impl<V: fmt::Display> fmt::Display for Pretty<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.formula, Some(self.limit), f)
    }
}

fn render<V: fmt::Display>(
    formula: &Formula<V>,
    limit: Option<usize>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match formula {
        Formula::Const(true) => f.write_str("⊤"),
        Formula::Const(false) => f.write_str("⊥"),
        Formula::Var(v) => write!(f, "{}", v),
        Formula::Not(inner) => {
            f.write_str("¬")?;
            match inner.as_ref() {
                Formula::And(_) | Formula::Or(_) => parenthesized(inner, limit, f),
                _ => render(inner, limit, f),
            }
        }
        Formula::And(args) if args.is_empty() => f.write_str("⊤"),
        Formula::Or(args) if args.is_empty() => f.write_str("⊥"),
        Formula::And(args) => join(args, " ∧ ", true, limit, f),
        Formula::Or(args) => join(args, " ∨ ", false, limit, f),
    }
}

fn join<V: fmt::Display>(
    args: &[Formula<V>],
    sep: &str,
    wrap_disjunctions: bool,
    limit: Option<usize>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let shown = limit.map_or(args.len(), |l| l.min(args.len()));
    for (i, arg) in args[..shown].iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        if wrap_disjunctions && matches!(arg, Formula::Or(_)) {
            parenthesized(arg, limit, f)?;
        } else {
            render(arg, limit, f)?;
        }
    }
    if shown < args.len() {
        if shown > 0 {
            f.write_str(sep)?;
        }
        f.write_str("...")?;
    }
    Ok(())
}

fn parenthesized<V: fmt::Display>(
    formula: &Formula<V>,
    limit: Option<usize>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.write_str("(")?;
    render(formula, limit, f)?;
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    type F = Formula<&'static str>;

    fn v(name: &'static str) -> F {
        Formula::var(name)
    }

    #[test_case(v("a") & v("b"), "a ∧ b" ; "conjunction")]
    #[test_case((v("a") | v("b")) & v("c"), "(a ∨ b) ∧ c" ; "disjunction under conjunction")]
    #[test_case((v("a") & v("b")) | v("c"), "a ∧ b ∨ c" ; "conjunction under disjunction")]
    #[test_case(!(v("a") | v("b")), "¬(a ∨ b)" ; "negated disjunction")]
    #[test_case(!(v("a") & v("b")), "¬(a ∧ b)" ; "negated conjunction")]
    #[test_case(!v("a") | !v("b"), "¬a ∨ ¬b" ; "negated literals")]
    #[test_case(F::conjoin([]), "⊤" ; "empty conjunction")]
    #[test_case(F::disjoin([]), "⊥" ; "empty disjunction")]
    fn test_render(formula: F, expected: &str) {
        assert_eq!(formula.to_string(), expected);
    }

    #[test]
    fn test_pretty_truncates_long_connectives() {
        let f = F::disjoin(["a", "b", "c", "d", "e", "f", "g"].map(F::var));
        assert_eq!(f.pretty(5).to_string(), "a ∨ b ∨ c ∨ d ∨ e ∨ ...");
        assert_eq!(f.pretty(10).to_string(), f.to_string());
    }

    #[test]
    fn test_pretty_limit_applies_to_nested_arguments() {
        let inner = F::disjoin(["a", "b", "c"].map(F::var));
        let f = F::conjoin([inner, v("d")]);
        assert_eq!(f.pretty(2).to_string(), "(a ∨ b ∨ ...) ∧ d");
    }
}
