//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de l’éditeur de matrice (textes des cellules, valeurs lues,
//! table de variables, réglages) et offrir des opérations simples sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (l’évaluation passe par vue.rs -> noyau).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la taille de matrice.

use matrice_expr::noyau::resolve;

/// Taille de matrice par défaut (4x4 : transformation homogène).
pub const TAILLE_DEFAUT: usize = 4;

/// Garde-fou : taille maximale affichable.
pub const TAILLE_MAX: usize = 6;

#[derive(Clone, Debug, Default)]
pub struct Cellule {
    pub texte: String,
    /// None : erreur ou NaN (cellule à signaler).
    pub valeur: Option<f32>,
    /// Message de l’évaluation stricte (vide si ok).
    pub erreur: String,
    pub mise_a_jour_continue: bool,
}

impl Cellule {
    fn avec_texte(texte: &str) -> Self {
        Self {
            texte: texte.to_string(),
            ..Self::default()
        }
    }
}

/// Une ligne de la table de variables : nom + valeur saisie (expression sans variables).
#[derive(Clone, Debug, Default)]
pub struct LigneVariable {
    pub nom: String,
    pub texte: String,
}

#[derive(Clone, Debug)]
pub struct Reglages {
    pub taille: usize,
    pub colorer_erreurs: bool,
    pub afficher_demarche: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            taille: TAILLE_DEFAUT,
            colorer_erreurs: true,
            afficher_demarche: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppMatrice {
    // --- entrées utilisateur ---
    /// Cellules en ordre ligne par ligne (taille * taille).
    pub cellules: Vec<Cellule>,
    pub variables: Vec<LigneVariable>,

    // --- sorties ---
    /// Postfixe de la cellule sélectionnée (panneau “Démarche”).
    pub demarche: String,
    /// Au moins une cellule doit être réévaluée à chaque image.
    pub continu: bool,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    pub selection: Option<usize>,
    /// Une entrée a changé : vue.rs réévalue à la prochaine image.
    pub a_recalculer: bool,
}

impl Default for AppMatrice {
    fn default() -> Self {
        let mut app = Self {
            cellules: Vec::new(),
            variables: vec![
                LigneVariable {
                    nom: "angle".into(),
                    texte: "pi()/6".into(),
                },
                LigneVariable {
                    nom: "s".into(),
                    texte: "2".into(),
                },
            ],
            demarche: String::new(),
            continu: false,
            reglages: Reglages::default(),
            selection: None,
            a_recalculer: true,
        };
        app.reset_identite();
        app
    }
}

/// Nom légal pour DÉFINIR une variable : lettre ASCII, puis lettres/chiffres,
/// et pas déjà un nom de fonction (l’appel masquerait la variable).
pub fn nom_variable_valide(nom: &str) -> bool {
    let mut cs = nom.chars();
    let Some(premier) = cs.next() else {
        return false;
    };
    premier.is_ascii_alphabetic() && cs.all(|c| c.is_ascii_alphanumeric()) && resolve(nom).is_none()
}

impl AppMatrice {
    pub fn taille(&self) -> usize {
        self.reglages.taille
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Matrice identité (textes "1" / "0"), valeurs à recalculer.
    pub fn reset_identite(&mut self) {
        let n = self.taille();
        self.cellules = (0..n * n)
            .map(|i| Cellule::avec_texte(if i / n == i % n { "1" } else { "0" }))
            .collect();
        self.selection = None;
        self.demarche.clear();
        self.a_recalculer = true;
    }

    /// Toutes les cellules à "0".
    pub fn reset_zero(&mut self) {
        for c in &mut self.cellules {
            *c = Cellule::avec_texte("0");
        }
        self.demarche.clear();
        self.a_recalculer = true;
    }

    /// Change la taille en conservant le coin supérieur gauche.
    /// Les nouvelles cellules suivent l’identité.
    pub fn set_taille(&mut self, taille: usize) {
        let nouvelle = taille.clamp(1, TAILLE_MAX);
        let ancienne = self.taille();
        if nouvelle == ancienne {
            return;
        }

        let mut cellules = Vec::with_capacity(nouvelle * nouvelle);
        for l in 0..nouvelle {
            for c in 0..nouvelle {
                if l < ancienne && c < ancienne {
                    cellules.push(std::mem::take(&mut self.cellules[l * ancienne + c]));
                } else {
                    cellules.push(Cellule::avec_texte(if l == c { "1" } else { "0" }));
                }
            }
        }

        self.cellules = cellules;
        self.reglages.taille = nouvelle;
        self.selection = None;
        self.demarche.clear();
        self.a_recalculer = true;
    }

    pub fn ajouter_variable(&mut self) {
        self.variables.push(LigneVariable::default());
        self.a_recalculer = true;
    }

    pub fn retirer_variable(&mut self, i: usize) {
        if i < self.variables.len() {
            self.variables.remove(i);
            self.a_recalculer = true;
        }
    }

    /// Insère du texte à la fin de la cellule sélectionnée (bouton “fonction”).
    /// Retourne false si aucune cellule n’est sélectionnée.
    pub fn inserer_dans_selection(&mut self, texte: &str) -> bool {
        let Some(i) = self.selection else {
            return false;
        };
        let Some(cellule) = self.cellules.get_mut(i) else {
            return false;
        };
        let t = &mut cellule.texte;
        if let Some(c) = t.chars().rev().find(|c| !c.is_whitespace()) {
            // pas de multiplication implicite : on sépare d’un opérateur explicite
            if c.is_ascii_alphanumeric() || c == ')' {
                t.push_str(" * ");
            }
        }
        t.push_str(texte);
        self.a_recalculer = true;
        true
    }

    /// Valeurs lues, ligne par ligne (None = cellule invalide).
    pub fn valeurs(&self) -> Vec<Option<f32>> {
        self.cellules.iter().map(|c| c.valeur).collect()
    }
}
