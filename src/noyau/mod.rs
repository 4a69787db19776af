//! Noyau — évaluateur d’expressions infixes (f32)
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie des erreurs (EvalError)
//! - jetons.rs    : Jeton (nombre / opérateur), table de précédence in/out
//! - fonctions.rs : registre des fonctions (constantes, unaires, binaires)
//! - nombre.rs    : automate de lecture des littéraux
//! - operande.rs  : signes unaires, identifiants, appels, découpage des paramètres
//! - rpn.rs       : shunting-yard -> postfixe
//! - eval.rs      : pile postfixe + API publique

pub mod erreurs;
pub mod eval;
pub mod fonctions;
pub mod jetons;
pub mod nombre;
pub mod operande;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::EvalError;
pub use eval::{evaluate, parse, postfix_text, try_parse, Evaluation, Variables};
pub use fonctions::{list_functions, resolve, Fonction};
