// src/noyau/rpn.rs
//
// Shunting-yard : infixe -> postfixe (RPN)
//
// Règles:
// - Opérande (nombre, variable, appel de fonction, groupe signé) : lu par operande.rs,
//   sorti directement en `Jeton::Nombre` (jamais sur la pile d’opérateurs).
// - '(' : empilée. ')' : dépile jusqu’à '(' (jetée).
// - Opérateur binaire : comparaison précédence “hors pile” (entrant) contre
//   précédence “dans la pile” (sommet). Voir jetons.rs pour la table.
// - Signe unaire vs binaire : déterminé uniquement par ce qui précède.
//     début, opérateur, '('      => le prochain '+'/'-' est un signe (opérande attendu)
//     nombre, identifiant, ')'   => le prochain '+'/'-' est binaire

use super::erreurs::EvalError;
use super::eval::Variables;
use super::jetons::{Jeton, Op};
use super::operande::{lire_operande, Curseur};

/// File postfixe + drapeau de réévaluation continue (OU sur tous les opérandes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Postfixe {
    pub jetons: Vec<Jeton>,
    pub mise_a_jour_continue: bool,
}

/// Dépile (vers la sortie) tant que le sommet lie plus fort que l’entrant, puis empile.
fn empiler(op: Op, pile: &mut Vec<Op>, sortie: &mut Vec<Jeton>) {
    while let Some(&sommet) = pile.last() {
        if sommet.precedence_pile() > op.precedence_entree() {
            sortie.push(Jeton::Operateur(sommet));
            pile.pop();
        } else {
            break;
        }
    }
    pile.push(op);
}

/// Convertit une expression infixe (non vide) en file postfixe.
pub fn vers_postfixe(expr: &str, variables: Option<&Variables>) -> Result<Postfixe, EvalError> {
    let mut cur = Curseur::new(expr);
    let mut pile: Vec<Op> = Vec::new();
    let mut sortie: Vec<Jeton> = Vec::new();
    let mut continu = false;

    // vrai => un opérande est attendu (un '+'/'-' rencontré est un signe)
    let mut signe_unaire = true;

    loop {
        cur = cur.apres_espaces();
        let Some(c) = cur.courant() else {
            break;
        };

        match c {
            ')' => {
                if signe_unaire {
                    return Err(EvalError::OperandeManquant(')'));
                }
                loop {
                    match pile.pop() {
                        Some(Op::LPar) => break,
                        Some(op) => sortie.push(Jeton::Operateur(op)),
                        None => return Err(EvalError::ParenthesesDesequilibrees(1)),
                    }
                }
                cur = cur.avance(1);
                signe_unaire = false;
            }

            '(' if signe_unaire => {
                pile.push(Op::LPar);
                cur = cur.avance(1);
            }

            '+' | '-' | '*' | '/' if !signe_unaire => {
                let op = Op::depuis_char(c).ok_or(EvalError::OperandeInvalide(c))?;
                empiler(op, &mut pile, &mut sortie);
                cur = cur.avance(1);
                signe_unaire = true;
            }

            // '*' ou '/' là où un opérande est attendu : "*2", "1+/2", "(*"
            '*' | '/' => return Err(EvalError::OperandeManquant(c)),

            _ if signe_unaire => {
                let (suite, operande) = lire_operande(cur, variables)?;
                sortie.push(Jeton::Nombre(operande.valeur));
                continu |= operande.mise_a_jour_continue;
                cur = suite;
                signe_unaire = false;
            }

            // opérande collé à un opérande : "2x", "1 2", "2(3)"
            _ => return Err(EvalError::OperandeInattendu(c)),
        }
    }

    // une '(' non fermée prime sur l’opérande manquant : "((", "1+(", "(1+"
    let ouvertes = pile.iter().filter(|op| **op == Op::LPar).count();
    if ouvertes > 0 {
        return Err(EvalError::ParenthesesDesequilibrees(ouvertes));
    }
    if signe_unaire {
        // fin d’entrée sur un opérateur : "1+"
        return Err(EvalError::FinInattendue);
    }

    while let Some(op) = pile.pop() {
        sortie.push(Jeton::Operateur(op));
    }

    Ok(Postfixe {
        jetons: sortie,
        mise_a_jour_continue: continu,
    })
}
