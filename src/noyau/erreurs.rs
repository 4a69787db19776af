// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// Toute erreur interrompt l’évaluation entière (pas de résultat partiel).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Entrée vide")]
    ExpressionVide,

    #[error("caractère inattendu à la place d’un opérande: '{0}'")]
    OperandeInvalide(char),

    /// Le lecteur de nombres a accepté un texte que `f32::from_str` refuse.
    /// Ne doit jamais arriver : signale un défaut de l’automate.
    #[error("nombre illisible: {0:?}")]
    NombreIllisible(String),

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("variable inconnue: {0}")]
    VariableInconnue(String),

    #[error("aucune table de variables fournie")]
    VariablesAbsentes,

    #[error("parenthèses déséquilibrées ({0} manquante(s))")]
    ParenthesesDesequilibrees(usize),

    #[error("{fonction} attend {attendu} paramètre(s), reçu {recu}")]
    AriteIncorrecte {
        fonction: String,
        attendu: usize,
        recu: usize,
    },

    /// Opérateur ou ')' là où un opérande était attendu.
    #[error("opérande manquant avant '{0}'")]
    OperandeManquant(char),

    /// L’expression s’arrête sur un opérateur ou un signe (ex: "1+", "-").
    #[error("opérande manquant en fin de l’expression")]
    FinInattendue,

    /// Deux opérandes à la suite (ex: "2x", "1 2").
    #[error("opérande inattendu: '{0}' (opérateur manquant)")]
    OperandeInattendu(char),

    /// Pile d’évaluation incohérente : défaut du convertisseur.
    #[error("erreur interne: {0}")]
    Interne(String),
}

impl EvalError {
    /// Vrai si l’erreur signale un défaut du noyau plutôt qu’une faute de saisie.
    pub fn est_interne(&self) -> bool {
        matches!(self, Self::NombreIllisible(_) | Self::Interne(_))
    }
}
