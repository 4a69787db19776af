// src/noyau/jetons.rs
//
// Jetons produits par la conversion infixe -> postfixe.
// Un jeton ne survit pas à l’appel de `parse` qui l’a créé.

use std::fmt;

/// Opérateurs admis. L’ensemble est fermé : aucun autre caractère
/// ne peut devenir un `Jeton::Operateur`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    LPar,
    RPar,
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    /// Seule porte d’entrée : '(' ')' '+' '-' '*' '/'.
    pub fn depuis_char(c: char) -> Option<Op> {
        match c {
            '(' => Some(Op::LPar),
            ')' => Some(Op::RPar),
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::LPar => '(',
            Op::RPar => ')',
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }

    /// Précédence “dans la pile” (opérateur déjà empilé).
    pub fn precedence_pile(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 2,
            Op::Star | Op::Slash => 4,
            Op::LPar | Op::RPar => 0,
        }
    }

    /// Précédence “hors pile” (opérateur entrant).
    /// in > out pour un même opérateur => associativité à gauche.
    pub fn precedence_entree(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Star | Op::Slash => 3,
            Op::LPar => 100,
            Op::RPar => 0,
        }
    }

    /// Applique l’opérateur binaire : `gauche op droite`.
    /// Les parenthèses ne s’appliquent pas (None).
    pub fn appliquer(self, gauche: f32, droite: f32) -> Option<f32> {
        match self {
            Op::Plus => Some(gauche + droite),
            Op::Minus => Some(gauche - droite),
            Op::Star => Some(gauche * droite),
            Op::Slash => Some(gauche / droite),
            Op::LPar | Op::RPar => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f32),
    Operateur(Op),
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(v) => write!(f, "{v}"),
            Jeton::Operateur(op) => write!(f, "{}", op.symbole()),
        }
    }
}

/// Format utilitaire (“démarche”) : file de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
