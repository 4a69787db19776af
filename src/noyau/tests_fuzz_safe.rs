//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions générées avec leur valeur attendue (calculée en f32 dans le même ordre)
//! - invariant clé : try_parse ne panique jamais, même sur du bruit

use std::time::{Duration, Instant};

use super::{parse, try_parse, EvalError, Variables};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Égalité stricte, NaN == NaN.
fn meme_valeur(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn variables_fuzz() -> Variables {
    let mut vars = Variables::new();
    vars.insert("x".into(), 1.5);
    vars.insert("y".into(), -2.0);
    vars.insert("k2".into(), 0.25);
    vars
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng, vars: &Variables) -> (String, f32) {
    match rng.pick(4) {
        0 => {
            let n = rng.pick(10) as f32;
            (format!("{n:?}"), n)
        }
        1 => {
            // décimal simple : a.b
            let v = rng.pick(100) as f32 / 4.0;
            (format!("{v:?}"), v)
        }
        2 => {
            let nom = match rng.pick(3) {
                0 => "x",
                1 => "y",
                _ => "k2",
            };
            (nom.to_string(), vars[nom])
        }
        _ => ("pi()".to_string(), std::f32::consts::PI),
    }
}

fn gen_expr(rng: &mut Rng, vars: &Variables, depth: usize) -> (String, f32) {
    if depth == 0 {
        return gen_atom(rng, vars);
    }

    match rng.pick(9) {
        0 => gen_atom(rng, vars),
        1..=4 => {
            let (a, va) = gen_expr(rng, vars, depth - 1);
            let (b, vb) = gen_expr(rng, vars, depth - 1);
            match rng.pick(4) {
                0 => (format!("({a} + {b})"), va + vb),
                1 => (format!("({a} - {b})"), va - vb),
                2 => (format!("({a} * {b})"), va * vb),
                _ => (format!("({a} / {b})"), va / vb),
            }
        }
        5 => {
            let (a, va) = gen_expr(rng, vars, depth - 1);
            if rng.coin() {
                (format!("-({a})"), -va)
            } else {
                (format!("--({a})"), va)
            }
        }
        6 => {
            let (a, va) = gen_expr(rng, vars, depth - 1);
            (format!("abs({a})"), va.abs())
        }
        7 => {
            let (a, va) = gen_expr(rng, vars, depth - 1);
            let (b, vb) = gen_expr(rng, vars, depth - 1);
            if rng.coin() {
                (format!("max({a}, {b})"), va.max(vb))
            } else {
                (format!("min( {a} ,{b} )"), va.min(vb))
            }
        }
        _ => {
            let (a, va) = gen_expr(rng, vars, depth - 1);
            (format!("sqrt(abs({a}))"), va.abs().sqrt())
        }
    }
}

/// Chaîne non parenthésée a op b op c ... : vérifie précédence + associativité gauche.
fn gen_chaine(rng: &mut Rng, n: usize) -> (String, f32) {
    let mut texte = String::new();
    // somme de termes, chaque terme = produit/quotient évalué de gauche à droite
    let mut total = 0.0f32;
    for i in 0..n {
        let mut terme = (rng.pick(9) + 1) as f32;
        let mut t = format!("{terme:?}");
        for _ in 0..rng.pick(3) {
            let f = (rng.pick(9) + 1) as f32;
            if rng.coin() {
                t.push_str(&format!(" * {f:?}"));
                terme *= f;
            } else {
                t.push_str(&format!(" / {f:?}"));
                terme /= f;
            }
        }
        if i == 0 {
            texte.push_str(&t);
            total = terme;
        } else if rng.coin() {
            texte.push_str(&format!(" + {t}"));
            total += terme;
        } else {
            texte.push_str(&format!(" - {t}"));
            total -= terme;
        }
    }
    (texte, total)
}

/// Bruit : caractères du langage + quelques intrus.
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', 'e', 'E', '+', '-', '*', '/', '(', ')', ',', ' ', 'x', 'p', 'o', 'w',
        's', 'i', 'n', '^', '#', 'é',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let vars = variables_fuzz();
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, &vars, 5);
        let v = parse(&expr, Some(&vars)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!(
            meme_valeur(v, attendu),
            "expr={expr:?} : {v} != {attendu}"
        );
    }
}

#[test]
fn fuzz_safe_precedence_en_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let n = rng.pick(6) as usize + 1;
        let (expr, attendu) = gen_chaine(&mut rng, n);
        let v = parse(&expr, None).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!(meme_valeur(v, attendu), "expr={expr:?} : {v} != {attendu}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let vars = variables_fuzz();

    // Même seed => mêmes expressions => mêmes sorties
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);
    for _ in 0..50 {
        let (ea, _) = gen_expr(&mut a, &vars, 4);
        let (eb, _) = gen_expr(&mut b, &vars, 4);
        assert_eq!(ea, eb);
        assert_eq!(parse(&ea, Some(&vars)), parse(&eb, Some(&vars)));
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let vars = variables_fuzz();
    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let len = rng.pick(16) as usize;
        let s = gen_bruit(&mut rng, len);

        // aucune panique, et aucune erreur interne : le convertisseur reste cohérent
        match parse(&s, Some(&vars)) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(!e.est_interne(), "erreur interne pour {s:?}: {e}");
                seen_err += 1;
            }
        }
        let _ = try_parse(&s, None);
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: bruit trop “sale”");
    assert!(seen_err > 0, "aucune erreur vue");
}

#[test]
fn fuzz_safe_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // longue chaîne plate : pas de récursion, pile d’opérateurs bornée par l’associativité
    let expr = vec!["0.5"; 800].join(" + ");
    budget(t0, max);

    assert_eq!(parse(&expr, None), Ok(400.0));
    assert_eq!(
        parse(&format!("{expr} +"), None),
        Err(EvalError::FinInattendue)
    );
}
