//! The mutation catalog: the fixed set of site categories and the rewrite
//! each one applies.
//!
//! Category order is significant. It defines the flat site index space
//! (all `+` sites first, then all `-` sites, and so on), so reordering the
//! variants changes which site a seeded run selects.

use mutiny_parser::{BinOp, BoolOp, CmpOp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of categories in the catalog.
pub const CATEGORY_COUNT: usize = 19;

/// A kind of mutation site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Add,
    Sub,
    Mult,
    FloorDiv,
    Div,
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
    /// Assignment whose every target name is already bound.
    RedundantAssign,
    /// Any call expression.
    Call,
    And,
    Or,
}

/// Broad grouping of categories, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Arithmetic,
    Relational,
    RedundantAssignment,
    CallNullification,
    Logical,
}

/// What a selected occurrence is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Swap the binary operator.
    BinOp(BinOp),
    /// Swap the comparison operator at the occurrence's position.
    CmpOp(CmpOp),
    /// Swap the connective of the whole boolean operation.
    BoolOp(BoolOp),
    /// Replace the statement with the constant expression statement `1`.
    NoOpStatement,
    /// Replace the expression with `None`.
    NullLiteral,
}

/// Rewrite table, indexed by category.
const REWRITES: [Rewrite; CATEGORY_COUNT] = [
    Rewrite::BinOp(BinOp::Sub),
    Rewrite::BinOp(BinOp::Add),
    Rewrite::BinOp(BinOp::FloorDiv),
    Rewrite::BinOp(BinOp::Mult),
    Rewrite::BinOp(BinOp::Mult),
    Rewrite::CmpOp(CmpOp::NotEq),
    Rewrite::CmpOp(CmpOp::Eq),
    Rewrite::CmpOp(CmpOp::GtE),
    Rewrite::CmpOp(CmpOp::Gt),
    Rewrite::CmpOp(CmpOp::LtE),
    Rewrite::CmpOp(CmpOp::Lt),
    Rewrite::CmpOp(CmpOp::IsNot),
    Rewrite::CmpOp(CmpOp::Is),
    Rewrite::CmpOp(CmpOp::NotIn),
    Rewrite::CmpOp(CmpOp::In),
    Rewrite::NoOpStatement,
    Rewrite::NullLiteral,
    Rewrite::BoolOp(BoolOp::Or),
    Rewrite::BoolOp(BoolOp::And),
];

impl Category {
    /// Every category in index order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Add,
        Category::Sub,
        Category::Mult,
        Category::FloorDiv,
        Category::Div,
        Category::Eq,
        Category::NotEq,
        Category::Lt,
        Category::LtE,
        Category::Gt,
        Category::GtE,
        Category::Is,
        Category::IsNot,
        Category::In,
        Category::NotIn,
        Category::RedundantAssign,
        Category::Call,
        Category::And,
        Category::Or,
    ];

    /// Position of this category in the flat index space.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Category> {
        Self::ALL.get(index).copied()
    }

    /// The rewrite applied to a selected occurrence of this category.
    pub fn rewrite(self) -> Rewrite {
        REWRITES[self.index()]
    }

    pub fn group(self) -> Group {
        match self {
            Category::Add | Category::Sub | Category::Mult | Category::FloorDiv | Category::Div => {
                Group::Arithmetic
            }
            Category::RedundantAssign => Group::RedundantAssignment,
            Category::Call => Group::CallNullification,
            Category::And | Category::Or => Group::Logical,
            _ => Group::Relational,
        }
    }

    /// Short identifier used in reports and manifests.
    pub fn name(self) -> &'static str {
        match self {
            Category::Add => "add",
            Category::Sub => "sub",
            Category::Mult => "mult",
            Category::FloorDiv => "floor_div",
            Category::Div => "div",
            Category::Eq => "eq",
            Category::NotEq => "not_eq",
            Category::Lt => "lt",
            Category::LtE => "lt_e",
            Category::Gt => "gt",
            Category::GtE => "gt_e",
            Category::Is => "is",
            Category::IsNot => "is_not",
            Category::In => "in",
            Category::NotIn => "not_in",
            Category::RedundantAssign => "redundant_assign",
            Category::Call => "call",
            Category::And => "and",
            Category::Or => "or",
        }
    }

    /// Source-level form of the site.
    pub fn symbol(self) -> &'static str {
        match self {
            Category::Add => "+",
            Category::Sub => "-",
            Category::Mult => "*",
            Category::FloorDiv => "//",
            Category::Div => "/",
            Category::Eq => "==",
            Category::NotEq => "!=",
            Category::Lt => "<",
            Category::LtE => "<=",
            Category::Gt => ">",
            Category::GtE => ">=",
            Category::Is => "is",
            Category::IsNot => "is not",
            Category::In => "in",
            Category::NotIn => "not in",
            Category::RedundantAssign => "x = ...",
            Category::Call => "f()",
            Category::And => "and",
            Category::Or => "or",
        }
    }

    /// Category of a binary operator; `%` and `**` are not sites.
    pub fn of_bin_op(op: BinOp) -> Option<Category> {
        match op {
            BinOp::Add => Some(Category::Add),
            BinOp::Sub => Some(Category::Sub),
            BinOp::Mult => Some(Category::Mult),
            BinOp::FloorDiv => Some(Category::FloorDiv),
            BinOp::Div => Some(Category::Div),
            BinOp::Mod | BinOp::Pow => None,
        }
    }

    pub fn of_cmp_op(op: CmpOp) -> Category {
        match op {
            CmpOp::Eq => Category::Eq,
            CmpOp::NotEq => Category::NotEq,
            CmpOp::Lt => Category::Lt,
            CmpOp::LtE => Category::LtE,
            CmpOp::Gt => Category::Gt,
            CmpOp::GtE => Category::GtE,
            CmpOp::Is => Category::Is,
            CmpOp::IsNot => Category::IsNot,
            CmpOp::In => Category::In,
            CmpOp::NotIn => Category::NotIn,
        }
    }

    pub fn of_bool_op(op: BoolOp) -> Category {
        match op {
            BoolOp::And => Category::And,
            BoolOp::Or => Category::Or,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(Category::from_index(i), Some(*category));
        }
        assert_eq!(Category::from_index(CATEGORY_COUNT), None);
    }

    #[test]
    fn test_relational_rewrites_are_pairwise_inverse() {
        for category in Category::ALL {
            if category.group() != Group::Relational {
                continue;
            }
            // GIVEN the operator a relational category rewrites to
            let Rewrite::CmpOp(swapped) = category.rewrite() else {
                panic!("Expected comparison rewrite for {}", category);
            };

            // THEN rewriting that operator's category leads back
            let back = Category::of_cmp_op(swapped).rewrite();
            assert_eq!(Category::of_cmp_op(swapped).group(), Group::Relational);
            assert!(
                matches!(back, Rewrite::CmpOp(op) if Category::of_cmp_op(op) == category),
                "{} does not invert",
                category
            );
        }
    }

    #[test]
    fn test_arithmetic_rewrites() {
        assert_eq!(Category::Add.rewrite(), Rewrite::BinOp(BinOp::Sub));
        assert_eq!(Category::Sub.rewrite(), Rewrite::BinOp(BinOp::Add));
        assert_eq!(Category::Mult.rewrite(), Rewrite::BinOp(BinOp::FloorDiv));
        assert_eq!(Category::FloorDiv.rewrite(), Rewrite::BinOp(BinOp::Mult));
        assert_eq!(Category::Div.rewrite(), Rewrite::BinOp(BinOp::Mult));
    }

    #[test]
    fn test_statement_and_call_rewrites() {
        assert_eq!(Category::RedundantAssign.rewrite(), Rewrite::NoOpStatement);
        assert_eq!(Category::Call.rewrite(), Rewrite::NullLiteral);
        assert_eq!(Category::And.rewrite(), Rewrite::BoolOp(BoolOp::Or));
        assert_eq!(Category::Or.rewrite(), Rewrite::BoolOp(BoolOp::And));
    }

    #[test]
    fn test_unmapped_operators() {
        assert_eq!(Category::of_bin_op(BinOp::Mod), None);
        assert_eq!(Category::of_bin_op(BinOp::Pow), None);
    }

    #[test]
    fn test_serde_names_match_display() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
