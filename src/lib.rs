//! # robdd-equiv: equivalence checking with Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd-equiv`** decides whether two boolean formulas denote the same
//! function. Both formulas are compiled into ROBDDs over one fixed variable
//! ordering, inside one [`Session`][crate::session::Session].
//!
//! ## Why it works
//!
//! For a fixed variable ordering, every boolean function has exactly one
//! reduced ordered diagram. The session hash-conses its nodes, so two
//! diagrams built in it are the same function exactly when their
//! [`Ref`][crate::reference::Ref] handles are equal. Equivalence checking
//! then boils down to building both sides and comparing two integers.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd_equiv::expr::Expr;
//! use robdd_equiv::session::Session;
//!
//! // 1. Fix the variable ordering
//! let s = Session::new("A B C".parse().unwrap());
//!
//! // 2. Parse two formulas in postfix notation
//! let lhs: Expr = "A B AND NOT".parse().unwrap();     // NOT (A AND B)
//! let rhs: Expr = "A NOT B NOT OR".parse().unwrap();  // NOT A OR NOT B
//!
//! // 3. Build and compare
//! let f = s.build(&lhs).unwrap();
//! let g = s.build(&rhs).unwrap();
//! assert_eq!(f, g);
//!
//! // 4. Inspect the result
//! assert_eq!(s.variable_name(f), Some("A"));
//! assert!(!s.eval(f, &[true, true, false]));
//! ```
//!
//! ## Core Components
//!
//! - **[`session`]**: The [`Session`][crate::session::Session] owning the node table, the apply cache and the ordering.
//! - **[`apply`]**: Composition of diagrams under boolean operators.
//! - **[`builder`]**: Compilation of [`Expr`][crate::expr::Expr] trees into diagrams.
//! - **[`parser`]**: Postfix notation for expressions.
//! - **[`dot`]**: Utilities for visualizing diagrams using Graphviz.
//! - **[`sat`]**: Model counting and witness extraction.

pub mod apply;
pub mod builder;
pub mod cache;
pub mod dot;
pub mod error;
pub mod eval;
pub mod expr;
pub mod node;
pub mod op;
pub mod ordering;
pub mod parser;
pub mod reference;
pub mod sat;
pub mod session;
pub mod table;
pub mod types;
pub mod utils;
