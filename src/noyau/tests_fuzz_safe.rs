//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline avec des séquences de touches sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - toutes les classes d’erreur sont acceptées, jamais la panique
//! - invariants clés :
//!     succès => valeur finie, texte relu identique, session mise à jour
//!     échec  => session inchangée

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::calculer;
use super::postfixe::envelopper_dernier;
use super::reecriture::reecrire;
use super::session::{ModeAngle, Session};
use super::validation::valider;

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

/* ------------------------ Génération (touches de la calculatrice) ------------------------ */

const TOUCHES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "×", "÷", "^", "(", ")",
    "π", "e", "Ans", "sin(", "cos(", "tan(", "ln(", "log(", "√(", "!", "%", "^2",
];

fn gen_touches(rng: &mut Rng, longueur: usize) -> String {
    let mut s = String::new();
    for _ in 0..longueur {
        let t = TOUCHES[rng.pick(TOUCHES.len() as u32) as usize];
        s.push_str(t);
        if rng.pick(8) == 0 {
            s = envelopper_dernier(&s, "(inv(", "))");
        }
    }
    s
}

/// Expressions bien formées (beaucoup de succès), profondeur bornée.
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    let atome = |rng: &mut Rng| match rng.pick(6) {
        0 => "π".to_string(),
        1 => "e".to_string(),
        2 => format!("{}%", rng.pick(100)),
        3 => format!("{}!", rng.pick(8)),
        _ => format!("{}.{}", rng.pick(50), rng.pick(10)),
    };
    if depth == 0 {
        return atome(rng);
    }

    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => format!("({a}+{b})"),
        1 => format!("({a}-{b})"),
        2 => format!("({a}×{b})"),
        3 => format!("({a}÷{b})"),
        4 => format!("sin({a})"),
        5 => format!("√({a}×{a})"),
        6 => format!("({a}){b}"),
        _ => atome(rng),
    }
}

fn session_aleatoire(rng: &mut Rng) -> Session {
    Session {
        dernier_resultat: rng.pick(1000) as f64 / 8.0 - 60.0,
        memoire: 0.0,
        mode_angle: if rng.coin() {
            ModeAngle::Degre
        } else {
            ModeAngle::Radian
        },
    }
}

fn check_invariants(expr: &str, s: &Session) -> Result<String, ErreurCalcul> {
    let copie = *s;
    let r = calculer(expr, s);
    match &r {
        Ok((texte, suivante)) => {
            let v: f64 = texte
                .parse()
                .unwrap_or_else(|_| panic!("texte non relisible: {texte:?} (expr={expr:?})"));
            assert!(v.is_finite(), "résultat non fini accepté: expr={expr:?}");
            assert_eq!(suivante.dernier_resultat, v, "expr={expr:?}");
            assert_eq!(suivante.memoire, copie.memoire);
            assert_eq!(suivante.mode_angle, copie.mode_angle);
        }
        Err(_) => assert_eq!(*s, copie),
    }
    r.map(|(t, _)| t)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_touches_aleatoires_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let longueur = 1 + rng.pick(12) as usize;
        let expr = gen_touches(&mut rng, longueur);
        let s = session_aleatoire(&mut rng);

        match check_invariants(&expr, &s) {
            Ok(_) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut seen_ok = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let s = session_aleatoire(&mut rng);

        // le texte réécrit d’une saisie du vocabulaire passe toujours la liste blanche
        let texte = reecrire(&expr, &s);
        assert!(valider(&texte).is_ok(), "expr={expr:?} texte={texte:?}");

        match check_invariants(&expr, &s) {
            Ok(_) => seen_ok += 1,
            Err(e) => assert!(
                matches!(
                    e,
                    ErreurCalcul::ResultatNonFini | ErreurCalcul::DomaineInvalide(_)
                ),
                "erreur non attendue: expr={expr:?} err={e}"
            ),
        }
    }

    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..100 {
        let ea = gen_touches(&mut a, 8);
        let eb = gen_touches(&mut b, 8);
        assert_eq!(ea, eb);

        let s = Session::default();
        assert_eq!(reecrire(&ea, &s), reecrire(&eb, &s));
        assert_eq!(calculer(&ea, &s), calculer(&eb, &s));
    }
}

#[test]
fn fuzz_safe_octets_hostiles_rejetes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let hostiles = [
        '$', ';', '=', '[', ']', '{', '}', '"', '\'', '`', '\\', '<', '>', '&', '|', '?', ':', '#',
        '@', '~', 'x', 'Z',
    ];
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);

        let longueur = 1 + rng.pick(6) as usize;
        let mut expr = gen_touches(&mut rng, longueur);
        let h = hostiles[rng.pick(hostiles.len() as u32) as usize];
        let pos = rng.pick(expr.chars().count() as u32 + 1) as usize;
        let octet = expr
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(expr.len());
        expr.insert(octet, h);

        assert!(
            matches!(
                calculer(&expr, &Session::default()),
                Err(ErreurCalcul::CaractereNonPermis(_))
            ),
            "expr hostile acceptée: {expr:?}"
        );
    }
}
