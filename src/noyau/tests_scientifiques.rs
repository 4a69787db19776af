//! Tests scientifiques (campagne) : propriétés du langage + limites contrôlées.
//!
//! But : vérifier la grammaire complète, pas seulement des cas isolés.
//! - précédence / associativité / signes
//! - appels imbriqués (paramètres = expressions complètes)
//! - variables, erreurs typées
//! - aller-retour des littéraux, idempotence
//! - profondeur bornée (la récursion n’est pas défendue au-delà, limite documentée)

use std::time::{Duration, Instant};

use super::{evaluate, parse, try_parse, EvalError, Variables};

fn eval_ok(expr: &str) -> f32 {
    parse(expr, None).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_val(expr: &str, attendu: f32) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= 1e-5 * attendu.abs().max(1.0),
        "expr={expr:?} : {v} != {attendu}"
    );
}

fn assert_err(expr: &str, attendu: EvalError) {
    assert_eq!(parse(expr, None), Err(attendu), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Grammaire ------------------------ */

#[test]
fn sci_precedence() {
    assert_val("2+3*4", 14.0);
    assert_val("(2+3)*4", 20.0);
    assert_val("2*3+4*5", 26.0);
    assert_val("1+2*3-4/2", 5.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_val("8-3-2", 3.0);
    assert_val("8/4/2", 1.0);
    assert_val("2*3/4", 1.5);
    assert_val("10-4+3", 9.0);
}

#[test]
fn sci_signes_unaires() {
    assert_val("--5", 5.0);
    assert_val("-(2+3)", -5.0);
    assert_val("5 - -3", 8.0);
    assert_val("+-+4", -4.0);
    assert_val("2*-3", -6.0);
    assert_val("-2*-3", 6.0);
    assert_val("6/-(1+2)", -2.0);
    assert_val("8 / -(2+2) * 2", -4.0);
}

#[test]
fn sci_fonctions_imbriquees() {
    assert_val("pow(2, 3)", 8.0);
    assert_val("sqrt(3*3+4*4)", 5.0);
    assert_val("pow(pow(2, 2), sqrt(4))", 16.0);
    assert_val("hypot(3, 4) * -abs(-2)", -10.0);
    assert_val("sin(pi()/2)", 1.0);
    assert_val("cos(0) + e() - e()", 1.0);
}

#[test]
fn sci_exemple_de_reference() {
    assert_val("((4 - pow(2, 3) + 1) * -sqrt(3*3+4*4)) / 2", 7.5);
}

#[test]
fn sci_litteraux() {
    assert_val("1e3", 1000.0);
    assert_val("2.5E-1", 0.25);
    assert_val(".5 + .5", 1.0);
    assert_val("1e+2 - 1E2", 0.0);
}

/* ------------------------ Variables ------------------------ */

#[test]
fn sci_variables() {
    let mut vars = Variables::new();
    vars.insert("x".into(), 4.0);
    vars.insert("Rayon".into(), 2.0);
    vars.insert("a1".into(), -1.0);

    assert_eq!(parse("x+1", Some(&vars)), Ok(5.0));
    assert_eq!(parse("pow(Rayon, 2) * a1", Some(&vars)), Ok(-4.0));
    assert_eq!(parse("-x", Some(&vars)), Ok(-4.0));
    assert_eq!(
        parse("rayon", Some(&vars)),
        Err(EvalError::VariableInconnue("rayon".into()))
    );
    assert_eq!(
        parse("y", Some(&Variables::new())),
        Err(EvalError::VariableInconnue("y".into()))
    );
}

#[test]
fn sci_variables_dans_les_parametres() {
    let mut vars = Variables::new();
    vars.insert("t".into(), 0.0);
    assert_eq!(parse("max(t, cos(t))", Some(&vars)), Ok(1.0));
    assert_eq!(parse("max(1, u)", Some(&vars)), Err(EvalError::VariableInconnue("u".into())));
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_typees() {
    assert_err("", EvalError::ExpressionVide);
    assert_err("(1+2", EvalError::ParenthesesDesequilibrees(1));
    assert_err("foo(1)", EvalError::FonctionInconnue("foo".into()));
    assert_err(
        "sin(1,2)",
        EvalError::AriteIncorrecte {
            fonction: "sin".into(),
            attendu: 1,
            recu: 2,
        },
    );
    assert_err("pow(1, (2)", EvalError::ParenthesesDesequilibrees(1));
    assert_err("pow(1, (2", EvalError::ParenthesesDesequilibrees(2));
    assert_err("3 % 2", EvalError::OperandeInattendu('%'));
    assert_err("2 x", EvalError::OperandeInattendu('x'));
}

#[test]
fn sci_multiplication_implicite_refusee() {
    for expr in ["2x", "2(3)", "(1)(2)", "2 pi()", "pi() 2"] {
        assert!(
            matches!(parse(expr, None), Err(EvalError::OperandeInattendu(_))),
            "expr={expr:?} devrait être refusée"
        );
    }
}

#[test]
fn sci_erreur_interrompt_tout() {
    // erreur profonde dans un paramètre : aucun résultat partiel
    assert_err(
        "1 + max(2, sqrt(bar(3)))",
        EvalError::FonctionInconnue("bar".into()),
    );
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_aller_retour_litteraux() {
    let valeurs = [
        0.0f32, 1.0, 0.5, 3.25, 42.0, 1234.5, 0.001, 7.0e-5, 6.02e23, 1.0e-30, 123_456.79,
    ];
    for n in valeurs {
        // format Debug : forme la plus courte qui relit la même valeur (exposant si besoin)
        let texte = format!("{n:?}");
        let lu = try_parse(&texte, None).unwrap_or_else(|| panic!("{texte:?} illisible"));
        assert!(
            (lu - n).abs() <= f32::EPSILON * n.abs(),
            "{texte:?} : {lu} != {n}"
        );

        let neg = try_parse(&format!("-{texte}"), None);
        assert_eq!(neg, Some(-lu));
    }
}

#[test]
fn sci_idempotence() {
    let mut vars = Variables::new();
    vars.insert("x".into(), 1.5);
    for expr in ["x*x - 2", "atan2(x, 1) + 0.1", "pow(2, -x)", "((x))"] {
        let a = evaluate(expr, Some(&vars));
        let b = evaluate(expr, Some(&vars));
        assert_eq!(a, b, "expr={expr:?}");
    }
    assert_eq!(parse("y", None), parse("y", None));
}

#[test]
fn sci_try_parse_ne_panique_pas() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let entrees = [
        "", " ", "(", ")", ",", ".", "e", "E5", "-", "--", "1e", "1e+", "(((", ")))",
        "f(", "pow(", "pow(1,", "pow(1,2", "sin()", "pi(1)", "1..2", "é", "π", "√4",
        "1 + + 2", "1 * * 2", "((1)", "(1))", "a(b(c(", "0/0", "1/0", "x",
    ];
    for s in entrees {
        budget(t0, max);
        let _ = try_parse(s, None);
        let _ = try_parse(s, Some(&Variables::new()));
    }
}

#[test]
fn sci_profondeur_raisonnable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // parenthèses imbriquées (pile d’opérateurs, pas de récursion)
    let n = 200;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(try_parse(&expr, None), Some(1.0));
    budget(t0, max);

    // appels imbriqués (récursion réelle) : profondeur modeste
    let n = 32;
    let expr = format!("{}2{}", "abs(".repeat(n), ")".repeat(n));
    assert_eq!(try_parse(&expr, None), Some(2.0));

    // groupes signés imbriqués
    let expr = format!("{}3{}", "-(".repeat(16), ")".repeat(16));
    assert_eq!(try_parse(&expr, None), Some(3.0));
    budget(t0, max);

    // déséquilibre profond : erreur propre
    let expr = format!("{}1", "(".repeat(n));
    assert_eq!(parse(&expr, None), Err(EvalError::ParenthesesDesequilibrees(n)));
}
