//! Tests scientifiques (campagne) : propriétés de bout en bout du pipeline.
//!
//! saisie brute -> réécriture -> validation -> évaluation -> arrondi -> session
//!
//! Notes (alignées avec le comportement actuel) :
//! - la réécriture en degrés utilise le mode au moment du calcul
//! - '%' ne porte que sur le littéral qui le précède : "(2+3)%" échoue
//! - "2e+1" est un littéral à exposant (20), "2e" seul vaut 2·e

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::{calculer, evaluer};
use super::expr::Aides;
use super::postfixe::envelopper_dernier;
use super::reecriture::reecrire;
use super::session::{ModeAngle, Session};
use super::validation::valider;
use super::Calculatrice;

fn deg() -> Session {
    Session::default()
}

fn rad() -> Session {
    Session {
        mode_angle: ModeAngle::Radian,
        ..Session::default()
    }
}

fn ok_avec(expr: &str, s: &Session) -> String {
    calculer(expr, s)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .0
}

fn assert_calc(expr: &str, attendu: &str) {
    assert_eq!(ok_avec(expr, &deg()), attendu, "expr={expr:?}");
}

fn erreur(expr: &str) -> ErreurCalcul {
    match calculer(expr, &deg()) {
        Err(e) => e,
        Ok((t, _)) => panic!("attendu une erreur pour {expr:?}, obtenu {t}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identité des littéraux ------------------------ */

#[test]
fn sci_litteraux_identite() {
    for n in ["0", "7", "12.5", "0.001", "123456789", ".5", "5.", "1e+21", "1.5e-7"] {
        let texte = reecrire(n, &deg());
        let v = evaluer(&texte, &Aides::default()).unwrap();
        let attendu: f64 = n.parse().unwrap();
        assert_eq!(v, attendu, "littéral {n:?}");
    }
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_multiplication_implicite() {
    assert_calc("2(3)", "6");
    assert_calc("(2)(3)", "6");
    assert_calc("(2)3", "6");
    assert_calc("2π", "6.28318530718");
    assert_calc("π2", "6.28318530718");
    assert_calc("e(1)", "2.718281828459");
    assert_calc("2sin(30)", "1");
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence_associativite() {
    assert_calc("2^3^2", "512");
    assert_calc("2+3*4", "14");
    assert_calc("2+3×4", "14");
    assert_calc("(2+3)×4", "20");
    assert_calc("10−4−3", "3");
    assert_calc("64÷4÷2", "8");
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_trig_degres() {
    assert_calc("sin(90)", "1");
    assert_calc("cos(60)", "0.5");
    assert_calc("tan(45)", "1");
    assert_calc("sin(30)+cos(60)", "1");
    // imbrication : l’argument est un vrai sous-arbre
    assert_calc("sin(cos(0)×90)", "1");
}

#[test]
fn sci_trig_radians() {
    assert_eq!(ok_avec("sin(π÷2)", &rad()), "1");
    assert_eq!(ok_avec("cos(π)", &rad()), "-1");
    assert_eq!(ok_avec("sin(90)", &rad()), "0.893996663601");
}

#[test]
fn sci_mode_lu_au_moment_du_calcul() {
    let mut c = Calculatrice::default();
    c.ajouter("sin(90)");
    c.basculer_mode_angle();
    assert_eq!(c.calculer().as_deref(), Ok("0.893996663601"));
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle() {
    assert_calc("5!", "120");
    assert_calc("0!", "1");
    assert_calc("(2+1)!", "6");
    assert_calc("3!!", "720");
    assert_calc("(3!)!", "720");
    assert_calc("(2+1)!!", "720");
    assert_calc("2+3!×2", "14");
    assert_calc("-3!", "-6");
}

#[test]
fn sci_factorielle_hors_domaine() {
    assert!(matches!(erreur("(-1)!"), ErreurCalcul::DomaineInvalide(_)));
    assert!(matches!(erreur("(2.5)!"), ErreurCalcul::DomaineInvalide(_)));
    assert!(matches!(erreur("2.5!"), ErreurCalcul::DomaineInvalide(_)));
}

/* ------------------------ Pourcentage ------------------------ */

#[test]
fn sci_pourcentage() {
    assert_calc("50%", "0.5");
    assert_calc("200+50%", "200.5");
    assert_calc("12.5%", "0.125");
    assert!(matches!(erreur("(2+3)%"), ErreurCalcul::Syntaxe(_)));
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_racines_logarithmes() {
    assert_calc("√(16)", "4");
    assert_calc("sqrt(2)^2", "2");
    assert_calc("ln(e)", "1");
    assert_calc("log(1000)", "3");
    assert_calc("LOG(100)", "2");
}

/* ------------------------ Sécurité ------------------------ */

#[test]
fn sci_injection_jamais_evaluee() {
    for raw in [
        "2+alert(1)",
        "constructor",
        "Math.PI",
        "1;2",
        "process(0)",
        "2+E",
        "fetch(1)",
        "x",
    ] {
        let texte = reecrire(raw, &deg());
        assert!(
            matches!(valider(&texte), Err(ErreurCalcul::CaractereNonPermis(_))),
            "validation aurait dû rejeter {raw:?} (texte {texte:?})"
        );
        assert!(
            matches!(calculer(raw, &deg()), Err(ErreurCalcul::CaractereNonPermis(_))),
            "pipeline aurait dû rejeter {raw:?}"
        );
    }
}

/* ------------------------ Ans + session ------------------------ */

#[test]
fn sci_ans_texte_exact_et_echec_sans_effet() {
    let (t, s1) = calculer("2÷3", &deg()).unwrap();
    assert_eq!(t, "0.666666666667");
    assert_eq!(s1.dernier_resultat, 0.666666666667);

    // la substitution relit exactement le texte affiché
    assert_eq!(reecrire("Ans", &s1), "0.666666666667");
    assert_eq!(ok_avec("Ans×3", &s1), "2.000000000001");

    // échec : session d’entrée intacte, aucune nouvelle session produite
    assert!(calculer("Ans÷0", &s1).is_err());
    assert_eq!(s1.dernier_resultat, 0.666666666667);
}

#[test]
fn sci_ans_negatif_et_grand() {
    let s = Session {
        dernier_resultat: -3.0,
        ..deg()
    };
    assert_eq!(ok_avec("Ans^2", &s), "9");
    assert_eq!(ok_avec("2^Ans", &s), "0.125");

    let s = Session {
        dernier_resultat: 1e21,
        ..deg()
    };
    assert_eq!(ok_avec("Ans÷1e+21", &s), "1");

    // le pourcentage porte sur le littéral que devient Ans, signe compris
    let s = Session {
        dernier_resultat: -50.0,
        ..deg()
    };
    assert_eq!(ok_avec("Ans%", &s), "-0.5");
    assert_eq!(ok_avec("2×Ans%", &s), "-1");
}

/* ------------------------ Enveloppe postfixe ------------------------ */

#[test]
fn sci_envelopper_dernier_groupe() {
    assert_eq!(envelopper_dernier("3+(4*5)", "R(", ")"), "3+R((4*5))");

    let mut c = Calculatrice::default();
    c.ajouter("3+(4×5)");
    c.reciproque();
    assert_eq!(c.expression(), "3+(inv((4×5)))");
    assert_eq!(c.calculer().as_deref(), Ok("3.05"));
}

#[test]
fn sci_reciproque_de_zero_non_fini() {
    let mut c = Calculatrice::default();
    c.reciproque();
    assert_eq!(c.expression(), "(inv(0))");
    assert_eq!(c.calculer(), Err(ErreurCalcul::ResultatNonFini));
}

/* ------------------------ Une seule passe suffit ------------------------ */

#[test]
fn sci_une_passe_suffit() {
    let cas = [
        ("2(3)+π2", 6.0 + 2.0 * std::f64::consts::PI),
        ("5!!", 6.689502913449127e198),
        ("((2)!)!", 2.0),
        ("√(4)!", 2.0),
        ("200+50%", 200.5),
        ("2^3^2", 512.0),
    ];
    for (raw, attendu) in cas {
        let texte = reecrire(raw, &rad());
        valider(&texte).unwrap();
        let v = evaluer(&texte, &Aides::default()).unwrap();
        assert!(
            (v - attendu).abs() <= attendu.abs() * 1e-12,
            "{raw:?} -> {texte:?} = {v}"
        );
    }
}

#[test]
fn sci_reecrire_deux_fois_sans_danger_en_radians() {
    for raw in ["2(3)+π2", "5!!", "200+50%", "log(100)+ln(e)", "(inv(4))", "√(9)"] {
        let une = reecrire(raw, &rad());
        let deux = reecrire(&une, &rad());
        let a = evaluer(&une, &Aides::default()).unwrap();
        let b = evaluer(&deux, &Aides::default()).unwrap();
        assert_eq!(a, b, "{raw:?}: {une:?} vs {deux:?}");
    }
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_stress_somme_longue_et_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let somme = vec!["1"; 1000].join("+");
    assert_calc(&somme, "1000");
    budget(t0, max);

    // chaînes trop longues : erreur propre, jamais de débordement de pile
    let longue = vec!["1"; 10_000].join("+");
    assert!(matches!(erreur(&longue), ErreurCalcul::Syntaxe(_)));
    let negs = format!("{}1", "−".repeat(5000));
    assert!(matches!(erreur(&negs), ErreurCalcul::Syntaxe(_)));
    let trig = format!("{}1{}", "sin(".repeat(2000), ")".repeat(2000));
    assert!(matches!(erreur(&trig), ErreurCalcul::Syntaxe(_)));
    budget(t0, max);

    let profond = format!("{}2{}", "(".repeat(200), ")".repeat(200));
    assert_calc(&profond, "2");
    budget(t0, max);

    let trop = format!("{}2{}", "(".repeat(300), ")".repeat(300));
    assert!(matches!(erreur(&trop), ErreurCalcul::Syntaxe(_)));
    budget(t0, max);
}
