//! Equation splitting
//!
//! An equation spec is `LHS = RHS`, where only the first `=` matters and the
//! right-hand side may be cut into fragments with `||`. Splitting produces the
//! part list every other operation indexes into: `[lhs, "=", fragment..]`.

use crate::error::{LayoutError, Result};

/// Separates the left-hand side from the right-hand side
pub const ANCHOR: &str = "=";

/// Separates right-hand-side fragments
pub const FRAGMENT_SEPARATOR: &str = "||";

/// Index of the left-hand side in a part list
pub const LHS_INDEX: usize = 0;

/// Index of the anchor in a part list
pub const ANCHOR_INDEX: usize = 1;

/// Index of the first right-hand-side fragment in a part list
pub const FIRST_FRAGMENT_INDEX: usize = 2;

/// Split an equation spec into `[lhs, "=", fragment_1, .., fragment_n]`.
///
/// Part text is kept verbatim, surrounding whitespace included. Any `=` after
/// the first belongs to a fragment.
pub fn split(spec: &str) -> Result<Vec<String>> {
    let (lhs, rhs) = spec
        .split_once(ANCHOR)
        .ok_or_else(|| LayoutError::MalformedSpec(spec.to_string()))?;

    let mut parts = Vec::with_capacity(FIRST_FRAGMENT_INDEX + 1);
    parts.push(lhs.to_string());
    parts.push(ANCHOR.to_string());
    parts.extend(rhs.split(FRAGMENT_SEPARATOR).map(str::to_string));
    Ok(parts)
}

/// Number of right-hand-side fragments `spec` splits into
pub fn fragment_count(spec: &str) -> Result<usize> {
    Ok(split(spec)?.len() - FIRST_FRAGMENT_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split("a=b").unwrap(), vec!["a", "=", "b"]);
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(split("c=d||e").unwrap(), vec!["c", "=", "d", "e"]);
        assert_eq!(
            split(r"m_1y_1'' = T_1cos(\theta_1) - ||T_2cos(\theta_2)||- m_1g").unwrap(),
            vec![
                "m_1y_1'' ",
                "=",
                r" T_1cos(\theta_1) - ",
                r"T_2cos(\theta_2)",
                "- m_1g"
            ]
        );
    }

    #[test]
    fn test_only_first_equals_splits() {
        let parts = split("a = b = c").unwrap();
        assert_eq!(parts, vec!["a ", "=", " b = c"]);
    }

    #[test]
    fn test_empty_sides_allowed() {
        assert_eq!(split("=").unwrap(), vec!["", "=", ""]);
        assert_eq!(split("x=||").unwrap(), vec!["x", "=", "", ""]);
    }

    #[test]
    fn test_missing_anchor_is_malformed() {
        assert_eq!(
            split("x + y"),
            Err(LayoutError::MalformedSpec("x + y".to_string()))
        );
    }

    #[test]
    fn test_fragment_count() {
        assert_eq!(fragment_count("a=b").unwrap(), 1);
        assert_eq!(fragment_count("a=b||c||d").unwrap(), 3);
        assert!(fragment_count("ab").is_err());
    }
}
