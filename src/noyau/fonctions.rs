//! Registre des fonctions : nom -> arité -> appel natif + métadonnées.
//!
//! Table construite une seule fois (OnceLock), en lecture seule ensuite.
//! Partageable entre threads sans verrou.

use std::collections::HashMap;
use std::f32::consts::{E, PI, TAU};
use std::fmt;
use std::sync::OnceLock;

/// Descripteur immuable d’une fonction du langage.
#[derive(Clone, Copy)]
pub struct Fonction {
    pub nom: &'static str,
    /// 0 (constante), 1 (unaire) ou 2 (binaire).
    pub arite: usize,
    pub description: &'static str,
    pub exemple: &'static str,
    /// Fonction dépendante du temps : l’appelant doit réévaluer à chaque image.
    /// Contamine toute expression qui l’appelle, même indirectement.
    pub mise_a_jour_continue: bool,
    pub(crate) invoque: fn(&[f32]) -> f32,
}

impl fmt::Debug for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fonction")
            .field("nom", &self.nom)
            .field("arite", &self.arite)
            .field("mise_a_jour_continue", &self.mise_a_jour_continue)
            .finish_non_exhaustive()
    }
}

impl Fonction {
    /// Appel natif. `params.len()` doit valoir `arite` (vérifié par l’appelant).
    pub fn appeler(&self, params: &[f32]) -> f32 {
        debug_assert_eq!(params.len(), self.arite, "arité non vérifiée pour {}", self.nom);
        (self.invoque)(params)
    }
}

/* ------------------------ Table ------------------------ */

const fn constante(
    nom: &'static str,
    description: &'static str,
    exemple: &'static str,
    invoque: fn(&[f32]) -> f32,
) -> Fonction {
    Fonction {
        nom,
        arite: 0,
        description,
        exemple,
        mise_a_jour_continue: false,
        invoque,
    }
}

const fn unaire(
    nom: &'static str,
    description: &'static str,
    exemple: &'static str,
    invoque: fn(&[f32]) -> f32,
) -> Fonction {
    Fonction {
        nom,
        arite: 1,
        description,
        exemple,
        mise_a_jour_continue: false,
        invoque,
    }
}

const fn binaire(
    nom: &'static str,
    description: &'static str,
    exemple: &'static str,
    invoque: fn(&[f32]) -> f32,
) -> Fonction {
    Fonction {
        nom,
        arite: 2,
        description,
        exemple,
        mise_a_jour_continue: false,
        invoque,
    }
}

static FONCTIONS: &[Fonction] = &[
    // --- constantes ---
    constante("pi", "Constante π", "pi()", |_| PI),
    constante("e", "Constante d’Euler", "e()", |_| E),
    constante("tau", "Constante τ = 2π", "tau()", |_| TAU),
    // --- trigonométrie (radians) ---
    unaire("sin", "Sinus (radians)", "sin(pi()/2)", |p| p[0].sin()),
    unaire("cos", "Cosinus (radians)", "cos(0)", |p| p[0].cos()),
    unaire("tan", "Tangente (radians)", "tan(pi()/4)", |p| p[0].tan()),
    unaire("asin", "Arc sinus", "asin(1)", |p| p[0].asin()),
    unaire("acos", "Arc cosinus", "acos(0)", |p| p[0].acos()),
    unaire("atan", "Arc tangente", "atan(1)", |p| p[0].atan()),
    unaire("sinh", "Sinus hyperbolique", "sinh(1)", |p| p[0].sinh()),
    unaire("cosh", "Cosinus hyperbolique", "cosh(1)", |p| p[0].cosh()),
    unaire("tanh", "Tangente hyperbolique", "tanh(1)", |p| p[0].tanh()),
    // --- puissances / logarithmes ---
    unaire("sqrt", "Racine carrée", "sqrt(9)", |p| p[0].sqrt()),
    unaire("cbrt", "Racine cubique", "cbrt(27)", |p| p[0].cbrt()),
    unaire("exp", "Exponentielle", "exp(1)", |p| p[0].exp()),
    unaire("ln", "Logarithme népérien", "ln(e())", |p| p[0].ln()),
    unaire("log", "Logarithme décimal", "log(100)", |p| p[0].log10()),
    unaire("log2", "Logarithme en base 2", "log2(8)", |p| p[0].log2()),
    // --- arrondis / signe ---
    unaire("abs", "Valeur absolue", "abs(-3)", |p| p[0].abs()),
    unaire("floor", "Partie entière inférieure", "floor(2.7)", |p| p[0].floor()),
    unaire("ceil", "Partie entière supérieure", "ceil(2.1)", |p| p[0].ceil()),
    unaire("round", "Arrondi au plus proche", "round(2.5)", |p| p[0].round()),
    unaire("sign", "Signe (-1, 0 ou 1)", "sign(-4)", |p| {
        if p[0] == 0.0 || p[0].is_nan() {
            p[0]
        } else {
            p[0].signum()
        }
    }),
    // --- angles ---
    unaire("deg", "Radians vers degrés", "deg(pi())", |p| p[0].to_degrees()),
    unaire("rad", "Degrés vers radians", "rad(180)", |p| p[0].to_radians()),
    // --- binaires ---
    binaire("pow", "Puissance a^b", "pow(2, 3)", |p| p[0].powf(p[1])),
    binaire("atan2", "Angle du point (x, y) : atan2(y, x)", "atan2(1, 1)", |p| {
        p[0].atan2(p[1])
    }),
    binaire("min", "Plus petit des deux", "min(3, 7)", |p| p[0].min(p[1])),
    binaire("max", "Plus grand des deux", "max(3, 7)", |p| p[0].max(p[1])),
    binaire("mod", "Reste de a / b (signe de a)", "mod(7, 3)", |p| p[0] % p[1]),
    binaire("hypot", "Hypoténuse √(a² + b²)", "hypot(3, 4)", |p| p[0].hypot(p[1])),
];

static REGISTRE: OnceLock<HashMap<&'static str, &'static Fonction>> = OnceLock::new();

fn registre() -> &'static HashMap<&'static str, &'static Fonction> {
    REGISTRE.get_or_init(|| FONCTIONS.iter().map(|f| (f.nom, f)).collect())
}

/* ------------------------ API de consultation ------------------------ */

/// Toutes les fonctions, dans l’ordre d’affichage (constantes, unaires, binaires).
pub fn list_functions() -> &'static [Fonction] {
    FONCTIONS
}

/// Résolution par nom exact (sensible à la casse).
pub fn resolve(nom: &str) -> Option<&'static Fonction> {
    let trouvee = registre().get(nom).copied();
    #[cfg(test)]
    let trouvee = trouvee.or_else(|| FONCTIONS_ESSAI.iter().find(|f| f.nom == nom));
    trouvee
}

/// Résolubles en test seulement, absentes de `list_functions`.
/// `tic(x)` rend `x` mais se déclare dépendante du temps.
#[cfg(test)]
static FONCTIONS_ESSAI: &[Fonction] = &[Fonction {
    nom: "tic",
    arite: 1,
    description: "Identité marquée à réévaluer",
    exemple: "tic(1)",
    mise_a_jour_continue: true,
    invoque: |p| p[0],
}];
