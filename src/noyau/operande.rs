// src/noyau/operande.rs
//
// Lecture d’un opérande à partir d’une position dans l’expression.
//
// opérande := ('+'|'-')* ( nombre | identifiant appel? | '(' expr ')' )
//
// - signes unaires : '-' inverse, '+' neutre (espaces tolérés entre eux)
// - nombre         : délégué à nombre.rs
// - identifiant    : variable (table fournie par l’appelant) ou fonction si '(' suit
// - '(' après un signe : groupe évalué récursivement comme un seul opérande ("-(2+3)")
//
// Les paramètres d’une fonction sont des expressions complètes : c’est ici que la
// récursion entre dans le noyau (profondeur = imbrication de l’entrée).

use super::erreurs::EvalError;
use super::eval::{evaluer_sous_expression, Evaluation, Variables};
use super::fonctions::{resolve, Fonction};
use super::nombre::lire_nombre;

/* ------------------------ Curseur ------------------------ */

/// Position (en octets) dans le texte d’origine. Immuable : avancer rend un nouveau curseur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Curseur<'a> {
    texte: &'a str,
    pos: usize,
}

impl<'a> Curseur<'a> {
    pub fn new(texte: &'a str) -> Self {
        Self { texte, pos: 0 }
    }

    /// Ce qui reste à lire.
    pub fn reste(&self) -> &'a str {
        &self.texte[self.pos..]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn courant(&self) -> Option<char> {
        self.reste().chars().next()
    }

    /// Avance de `n` octets (toujours sur une frontière de caractère).
    pub fn avance(self, n: usize) -> Self {
        Self {
            texte: self.texte,
            pos: (self.pos + n).min(self.texte.len()),
        }
    }

    pub fn apres_espaces(self) -> Self {
        let reste = self.reste();
        let n = reste.len() - reste.trim_start().len();
        self.avance(n)
    }
}

/* ------------------------ Opérande ------------------------ */

/// Lit un opérande signé. Fonction pure : retourne le curseur après l’opérande.
pub fn lire_operande<'a>(
    cur: Curseur<'a>,
    variables: Option<&Variables>,
) -> Result<(Curseur<'a>, Evaluation), EvalError> {
    // 1) signes unaires en tête
    let mut cur = cur.apres_espaces();
    let mut signe = 1.0f32;
    while let Some(c @ ('+' | '-')) = cur.courant() {
        if c == '-' {
            signe = -signe;
        }
        cur = cur.avance(1).apres_espaces();
    }

    // 2) classification du premier caractère utile
    let (suite, operande) = match cur.courant() {
        Some(c) if c.is_ascii_digit() || c == '.' => {
            let (valeur, n) = lire_nombre(cur.reste())?;
            (cur.avance(n), Evaluation::constante(valeur))
        }
        Some(c) if c.is_ascii_alphabetic() => lire_identifiant(cur, variables)?,
        Some('(') => lire_groupe(cur, variables)?,
        Some(c) => return Err(EvalError::OperandeInvalide(c)),
        None => return Err(EvalError::FinInattendue),
    };

    Ok((
        suite,
        Evaluation {
            valeur: signe * operande.valeur,
            ..operande
        },
    ))
}

/* ------------------------ Identifiants ------------------------ */

/// identifiant := lettre (lettre | chiffre)*
/// Suivi de '(' (espaces permis) => appel de fonction, sinon variable.
fn lire_identifiant<'a>(
    cur: Curseur<'a>,
    variables: Option<&Variables>,
) -> Result<(Curseur<'a>, Evaluation), EvalError> {
    let reste = cur.reste();
    let n = reste
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    let nom = &reste[..n];
    let apres = cur.avance(n).apres_espaces();

    if apres.courant() == Some('(') {
        let (params, suite) = separer_parametres(apres)?;
        let fonction = resolve(nom).ok_or_else(|| EvalError::FonctionInconnue(nom.to_string()))?;
        let evaluation = appeler_fonction(fonction, &params, variables)?;
        return Ok((suite, evaluation));
    }

    let table = variables.ok_or(EvalError::VariablesAbsentes)?;
    let valeur = table
        .get(nom)
        .copied()
        .ok_or_else(|| EvalError::VariableInconnue(nom.to_string()))?;

    Ok((cur.avance(n), Evaluation::constante(valeur)))
}

/// Vérifie l’arité, évalue chaque paramètre (récursion), puis appelle.
/// Le drapeau `mise_a_jour_continue` remonte : fonction OU n’importe quel paramètre.
pub(crate) fn appeler_fonction(
    fonction: &Fonction,
    params: &[&str],
    variables: Option<&Variables>,
) -> Result<Evaluation, EvalError> {
    if params.len() != fonction.arite {
        return Err(EvalError::AriteIncorrecte {
            fonction: fonction.nom.to_string(),
            attendu: fonction.arite,
            recu: params.len(),
        });
    }

    let mut continu = fonction.mise_a_jour_continue;
    let mut valeurs = Vec::with_capacity(params.len());
    for p in params {
        let e = evaluer_sous_expression(p, variables)?;
        continu |= e.mise_a_jour_continue;
        valeurs.push(e.valeur);
    }

    Ok(Evaluation {
        valeur: fonction.appeler(&valeurs),
        mise_a_jour_continue: continu,
    })
}

/// Groupe signé "-( ... )" : exactement une expression entre les parenthèses.
fn lire_groupe<'a>(
    cur: Curseur<'a>,
    variables: Option<&Variables>,
) -> Result<(Curseur<'a>, Evaluation), EvalError> {
    let (params, suite) = separer_parametres(cur)?;
    match params.as_slice() {
        [] => Err(EvalError::OperandeManquant(')')),
        [seul] => Ok((suite, evaluer_sous_expression(seul, variables)?)),
        _ => Err(EvalError::OperandeInattendu(',')),
    }
}

/* ------------------------ Paramètres ------------------------ */

/// `cur` doit être sur '('. Découpe les paramètres de premier niveau (',' à profondeur 1)
/// jusqu’à la ')' correspondante. "f()" donne une liste vide.
///
/// Retourne les sous-chaînes (rognées) et le curseur après la ')'.
pub fn separer_parametres(cur: Curseur<'_>) -> Result<(Vec<&str>, Curseur<'_>), EvalError> {
    let reste = cur.reste();
    let mut profondeur = 0usize;
    let mut debut = 1usize;
    let mut params = Vec::new();

    for (i, c) in reste.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur = profondeur.saturating_sub(1);
                if profondeur == 0 {
                    let dernier = reste[debut..i].trim();
                    if !(params.is_empty() && dernier.is_empty()) {
                        params.push(dernier);
                    }
                    return Ok((params, cur.avance(i + 1)));
                }
            }
            ',' if profondeur == 1 => {
                params.push(reste[debut..i].trim());
                debut = i + 1;
            }
            _ => {}
        }
    }

    Err(EvalError::ParenthesesDesequilibrees(profondeur))
}
