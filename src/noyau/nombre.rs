// src/noyau/nombre.rs
//
// Lecture d’un littéral numérique (sans signe).
//
// Automate à phases, lu de gauche à droite, sans retour arrière :
//   Entier -> (Fraction) -> (Exposant -> SigneExposant) -> ChiffresExposant
//
// Grammaire acceptée :
//   nombre := chiffres ('.' chiffres)? (('e'|'E') ('+'|'-')? chiffres)?
//           | '.' chiffres (('e'|'E') ...)?
//
// Règles de garde (par anticipation d’un caractère, jamais de recul) :
// - '.' n’entre en phase Fraction que s’il est suivi d’un chiffre ("5." s’arrête avant '.')
// - 'e'/'E' n’est un exposant que si la mantisse a au moins un chiffre ET qu’un chiffre
//   suit (éventuellement après un signe) : "2e", "2ex", ".E5" ne sont pas des exposants.

use super::erreurs::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Entier,
    Fraction,
    Exposant,
    SigneExposant,
    ChiffresExposant,
}

fn est_chiffre(octets: &[u8], i: usize) -> bool {
    octets.get(i).is_some_and(u8::is_ascii_digit)
}

/// 'e' en position `i` : exposant seulement si un chiffre suit (après un signe éventuel).
fn exposant_valide(octets: &[u8], i: usize, chiffres_mantisse: usize) -> bool {
    if chiffres_mantisse == 0 {
        return false;
    }
    match octets.get(i + 1) {
        Some(b'+' | b'-') => est_chiffre(octets, i + 2),
        _ => est_chiffre(octets, i + 1),
    }
}

/// Lit le plus long littéral en tête de `reste`.
/// Retourne (valeur, nombre d’octets consommés).
///
/// `reste` doit commencer par un chiffre ou '.'. Un '.' seul (sans chiffre)
/// est refusé avec `OperandeInvalide('.')`.
pub fn lire_nombre(reste: &str) -> Result<(f32, usize), EvalError> {
    let octets = reste.as_bytes();
    let mut phase = Phase::Entier;
    let mut chiffres_mantisse = 0usize;
    let mut i = 0usize;

    while i < octets.len() {
        let c = octets[i];
        match phase {
            Phase::Entier => match c {
                b'0'..=b'9' => {
                    chiffres_mantisse += 1;
                    i += 1;
                }
                b'.' if est_chiffre(octets, i + 1) => {
                    phase = Phase::Fraction;
                    i += 1;
                }
                b'e' | b'E' if exposant_valide(octets, i, chiffres_mantisse) => {
                    phase = Phase::Exposant;
                    i += 1;
                }
                _ => break,
            },

            Phase::Fraction => match c {
                b'0'..=b'9' => {
                    chiffres_mantisse += 1;
                    i += 1;
                }
                b'e' | b'E' if exposant_valide(octets, i, chiffres_mantisse) => {
                    phase = Phase::Exposant;
                    i += 1;
                }
                _ => break,
            },

            // juste après 'e' : signe propre à l’exposant (distinct du signe unaire)
            Phase::Exposant => {
                if c == b'+' || c == b'-' {
                    i += 1;
                }
                phase = Phase::SigneExposant;
            }

            Phase::SigneExposant | Phase::ChiffresExposant => {
                if c.is_ascii_digit() {
                    phase = Phase::ChiffresExposant;
                    i += 1;
                } else {
                    break;
                }
            }
        }
    }

    if chiffres_mantisse == 0 {
        return Err(match reste.chars().next() {
            Some(c) => EvalError::OperandeInvalide(c),
            None => EvalError::FinInattendue,
        });
    }

    let texte = &reste[..i];
    let valeur = texte
        .parse::<f32>()
        .map_err(|_| EvalError::NombreIllisible(texte.to_string()))?;

    Ok((valeur, i))
}
