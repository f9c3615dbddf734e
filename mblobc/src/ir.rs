//! Minimal lowered-function carrier handed to backend build functions.
//!
//! The packager does not interpret lowered code; the only transform it
//! applies is dropping assert markers when a build disables them.

/// One statement of a lowered function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// An assertion checked at kernel entry.
    Assert { condition: String, message: String },
    /// Any other lowered statement, carried through opaquely.
    Opaque(String),
}

/// A function lowered to backend-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredFunc {
    pub name: String,
    pub body: Vec<Stmt>,
}

impl LoweredFunc {
    pub fn new(name: &str, body: Vec<Stmt>) -> Self {
        LoweredFunc {
            name: name.to_string(),
            body,
        }
    }
}

/// Strip assert markers from `func`, leaving the rest of the body
/// untouched.
pub fn skip_assert(func: &LoweredFunc) -> LoweredFunc {
    LoweredFunc {
        name: func.name.clone(),
        body: func
            .body
            .iter()
            .filter(|stmt| !matches!(stmt, Stmt::Assert { .. }))
            .cloned()
            .collect(),
    }
}
