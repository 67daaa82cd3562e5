//! go-vis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the go-vis front end
//! and graph builder. It includes:
//!
//! - **Type shapes**: The closed [`type_expr::TypeExpr`] model of a declared type
//! - **Declarations**: Named shapes grouped into [`declaration::Scope`]s
//! - **Resolution**: Intra-scope dependency discovery ([`resolve`] module)
//! - **Rendering**: Type signatures and escaped node labels ([`render`] module)

pub mod declaration;
pub mod render;
pub mod resolve;
pub mod type_expr;
