//! Évaluateur d’expressions pour les cellules de matrice.
//!
//! Utilisé par l’application (src/main.rs) ; utilisable seul :
//!
//! ```
//! use matrice_expr::noyau::{parse, Variables};
//!
//! let mut vars = Variables::new();
//! vars.insert("x".into(), 4.0);
//! assert_eq!(parse("pow(x, 2) - 1", Some(&vars)), Ok(15.0));
//! ```

pub mod noyau;
