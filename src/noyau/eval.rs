//! Noyau — évaluation (pipeline réel)
//!
//! texte -> (opérandes lus + fonctions appelées récursivement) -> postfixe -> pile -> f32
//!
//! Deux entrées publiques :
//! - `parse`     : stricte, erreur typée (`EvalError`)
//! - `try_parse` : tolérante, `None` pour toute erreur ET pour NaN (saisie en direct)
//!
//! Aucun état entre deux appels : même entrée + mêmes variables => même résultat.

use std::collections::HashMap;

use super::erreurs::EvalError;
use super::jetons::{format_jetons, Jeton};
use super::rpn::vers_postfixe;

/// Table de variables fournie par l’appelant (lecture seule, sensible à la casse).
pub type Variables = HashMap<String, f32>;

/// Résultat complet : valeur + “doit être réévalué à chaque image”.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f32,
    pub mise_a_jour_continue: bool,
}

impl Evaluation {
    pub fn constante(valeur: f32) -> Self {
        Self {
            valeur,
            mise_a_jour_continue: false,
        }
    }
}

/* ------------------------ API publique ------------------------ */

/// Évalue l’expression et retourne valeur + drapeau de réévaluation continue.
pub fn evaluate(expression: &str, variables: Option<&Variables>) -> Result<Evaluation, EvalError> {
    let res = evaluer_sous_expression(expression, variables);
    match &res {
        Ok(e) => log::trace!("{expression:?} = {} (continu: {})", e.valeur, e.mise_a_jour_continue),
        Err(e) if e.est_interne() => log::error!("{expression:?} : {e}"),
        Err(e) => log::debug!("{expression:?} : {e}"),
    }
    res
}

/// Entrée stricte. NaN / ±inf sont des résultats valides (ex: "0/0"), l’appelant décide.
pub fn parse(expression: &str, variables: Option<&Variables>) -> Result<f32, EvalError> {
    evaluate(expression, variables).map(|e| e.valeur)
}

/// Entrée tolérante : `None` si erreur ou NaN. Ne panique pas.
pub fn try_parse(expression: &str, variables: Option<&Variables>) -> Option<f32> {
    parse(expression, variables).ok().filter(|v| !v.is_nan())
}

/// File postfixe de premier niveau en texte (appels de fonctions déjà réduits).
/// Sert au panneau “Démarche”.
pub fn postfix_text(expression: &str, variables: Option<&Variables>) -> Result<String, EvalError> {
    let s = expression.trim();
    if s.is_empty() {
        return Err(EvalError::ExpressionVide);
    }
    let postfixe = vers_postfixe(s, variables)?;
    Ok(format_jetons(&postfixe.jetons))
}

/* ------------------------ Pipeline ------------------------ */

/// Une expression complète (niveau racine ou paramètre de fonction).
pub(crate) fn evaluer_sous_expression(
    texte: &str,
    variables: Option<&Variables>,
) -> Result<Evaluation, EvalError> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(EvalError::ExpressionVide);
    }

    let postfixe = vers_postfixe(s, variables)?;
    log::trace!("{s:?} -> postfixe [{}]", format_jetons(&postfixe.jetons));

    let valeur = evaluer_postfixe(&postfixe.jetons)?;
    Ok(Evaluation {
        valeur,
        mise_a_jour_continue: postfixe.mise_a_jour_continue,
    })
}

/// Évalue une file postfixe avec une seule pile de valeurs.
///
/// Premier dépilé = opérande de DROITE, second = opérande de GAUCHE.
/// À la fin, exactement une valeur doit rester : sinon le convertisseur est en défaut.
pub fn evaluer_postfixe(jetons: &[Jeton]) -> Result<f32, EvalError> {
    let mut pile: Vec<f32> = Vec::with_capacity(jetons.len());

    for jeton in jetons {
        match *jeton {
            Jeton::Nombre(v) => pile.push(v),
            Jeton::Operateur(op) => {
                let (Some(droite), Some(gauche)) = (pile.pop(), pile.pop()) else {
                    return Err(EvalError::Interne(format!(
                        "opérande manquant pour '{}' en postfixe",
                        op.symbole()
                    )));
                };
                let r = op.appliquer(gauche, droite).ok_or_else(|| {
                    EvalError::Interne(format!("'{}' inattendue en postfixe", op.symbole()))
                })?;
                pile.push(r);
            }
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(EvalError::Interne(format!(
            "la pile finale contient {} valeur(s) au lieu d’une",
            pile.len()
        ))),
    }
}
