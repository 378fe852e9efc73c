// src/noyau/reecriture.rs
//
// Réécriture : saisie humaine -> texte arithmétique explicite.
//
// Passes (l’ordre compte, chacune suppose les précédentes faites) :
//   1. glyphes × ÷ −  -> * / -             (tokenize)
//   2. Ans             -> dernier résultat  (substituer_ans)
//   3. π, e            -> pi, e             (tokenize, mot entier)
//   4. multiplications implicites           (inserer_multiplications)
//   5. littéral%       -> (littéral/100)    (convertir_pourcentages)
//   6. ^               -> puissance, associative à droite (évaluateur)
//   7. √(              -> sqrt(             (tokenize)
//   8. ln/log/sin/cos/tan, degrés           (traduire_fonctions)
//   9. x!              -> fact(x), point fixe (convertir_factorielles)
//
// Fonction pure de (expression, dernier résultat, mode d’angle).

use tracing::debug;

use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::PROFONDEUR_MAX;
use super::session::{ModeAngle, Session};

pub fn reecrire(expr: &str, session: &Session) -> String {
    let jetons = tokenize(expr);
    let jetons = substituer_ans(jetons, session.dernier_resultat);
    let jetons = inserer_multiplications(jetons);
    let jetons = convertir_pourcentages(jetons);
    let jetons = traduire_fonctions(&jetons, session.mode_angle, 0);
    let jetons = convertir_factorielles(jetons);

    let texte = format_tokens(&jetons);
    debug!(expr = %expr, texte = %texte, mode = %session.mode_angle, "réécriture");
    texte
}

/* ------------------------ 2. Ans ------------------------ */

/// Ans -> texte décimal du dernier résultat ; négatif entre parenthèses,
/// sinon "2^Ans" deviendrait "2^-5" lu autrement que prévu par "Ans^2".
/// Exception : devant '%', le signe reste hors du littéral ("-50%" -> -(50/100)).
fn substituer_ans(jetons: Vec<Tok>, dernier: f64) -> Vec<Tok> {
    let texte = format_nombre(dernier);
    let mut out = Vec::with_capacity(jetons.len());
    let mut jetons = jetons.into_iter().peekable();

    while let Some(t) = jetons.next() {
        if t != Tok::Ans {
            out.push(t);
            continue;
        }
        match texte.strip_prefix('-') {
            Some(abs) if jetons.peek() == Some(&Tok::Percent) => {
                out.extend([Tok::Minus, Tok::Num(abs.to_string())])
            }
            Some(abs) => out.extend([
                Tok::LPar,
                Tok::Minus,
                Tok::Num(abs.to_string()),
                Tok::RPar,
            ]),
            None => out.push(Tok::Num(texte.clone())),
        }
    }

    out
}

/* ------------------------ 4. multiplication implicite ------------------------ */

fn est_constante(t: &Tok) -> bool {
    matches!(t, Tok::Pi | Tok::E)
}

/// Vrai si un '*' doit être inséré entre `a` et `b`.
fn implicite(a: &Tok, b: &Tok) -> bool {
    let a_num = matches!(a, Tok::Num(_));
    let a_ferme = matches!(a, Tok::RPar);

    match b {
        // {nombre, ')', constante} (
        Tok::LPar => a_num || a_ferme || est_constante(a),
        // ) chiffre ; constante chiffre
        Tok::Num(_) => a_ferme || est_constante(a),
        // {nombre, ')'} constante ; constante constante
        Tok::Pi | Tok::E => a_num || a_ferme || est_constante(a),
        // {nombre, ')', constante} fonction
        _ if b.est_fonction() => a_num || a_ferme || est_constante(a),
        _ => false,
    }
}

fn inserer_multiplications(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len() + 4);

    for t in jetons {
        if let Some(prev) = out.last() {
            if implicite(prev, &t) {
                out.push(Tok::Star);
            }
        }
        out.push(t);
    }

    out
}

/* ------------------------ 5. pourcentage ------------------------ */

/// Seul le littéral juste avant '%' est divisé : "(2+3)%" reste tel quel.
fn convertir_pourcentages(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());

    for t in jetons {
        if t == Tok::Percent {
            if let Some(Tok::Num(_)) = out.last() {
                if let Some(lit) = out.pop() {
                    out.extend([
                        Tok::LPar,
                        lit,
                        Tok::Slash,
                        Tok::Num("100".to_string()),
                        Tok::RPar,
                    ]);
                    continue;
                }
            }
        }
        out.push(t);
    }

    out
}

/* ------------------------ 8. fonctions nommées ------------------------ */

/// Index de la ')' qui ferme la '(' en `ouvrante`.
fn fermante_correspondante(jetons: &[Tok], ouvrante: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (k, t) in jetons.iter().enumerate().skip(ouvrante) {
        match t {
            Tok::LPar => depth += 1,
            Tok::RPar => {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index de la '(' qui ouvre la ')' en `fermante`.
fn ouvrante_correspondante(jetons: &[Tok], fermante: usize) -> Option<usize> {
    let mut depth = 0usize;
    for k in (0..=fermante).rev() {
        match jetons[k] {
            Tok::RPar => depth += 1,
            Tok::LPar => {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
            }
            _ => {}
        }
    }
    None
}

fn est_trig(t: &Tok) -> bool {
    matches!(t, Tok::Ident(nom) if matches!(nom.as_str(), "sin" | "cos" | "tan"))
}

/// log -> log10 ; en degrés, sin(a) -> sin((a)*pi/180).
///
/// L’argument est un vrai sous-intervalle équilibré, converti récursivement :
/// sin(cos(60)) convertit les deux angles. Au-delà de PROFONDEUR_MAX niveaux,
/// l’argument est recopié tel quel (le parseur rejettera cette imbrication).
fn traduire_fonctions(jetons: &[Tok], mode: ModeAngle, profondeur: usize) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());
    let mut i = 0usize;

    while i < jetons.len() {
        let t = &jetons[i];

        if let Tok::Ident(nom) = t {
            if nom == "log" {
                out.push(Tok::Ident("log10".to_string()));
                i += 1;
                continue;
            }
        }

        let ouvre = jetons.get(i + 1) == Some(&Tok::LPar);
        if mode == ModeAngle::Degre && est_trig(t) && ouvre {
            if let Some(fin) = fermante_correspondante(jetons, i + 1) {
                let interieur = &jetons[i + 2..fin];
                let argument = if profondeur < PROFONDEUR_MAX {
                    traduire_fonctions(interieur, mode, profondeur + 1)
                } else {
                    interieur.to_vec()
                };

                out.push(t.clone());
                out.extend([Tok::LPar, Tok::LPar]);
                out.extend(argument);
                out.extend([
                    Tok::RPar,
                    Tok::Star,
                    Tok::Pi,
                    Tok::Slash,
                    Tok::Num("180".to_string()),
                    Tok::RPar,
                ]);

                i = fin + 1;
                continue;
            }
        }

        out.push(t.clone());
        i += 1;
    }

    out
}

/* ------------------------ 9. factorielle ------------------------ */

/// Premier '!' dont l’opérande est un littéral ou un groupe équilibré
/// (avec sa fonction éventuelle : "fact(5)!" -> fact(fact(5))).
/// Rend (début de l’opérande, index du '!').
fn trouver_factorielle(jetons: &[Tok]) -> Option<(usize, usize)> {
    for (i, t) in jetons.iter().enumerate().skip(1) {
        if *t != Tok::Bang {
            continue;
        }
        match &jetons[i - 1] {
            Tok::Num(_) => return Some((i - 1, i)),
            Tok::RPar => {
                if let Some(ouv) = ouvrante_correspondante(jetons, i - 1) {
                    let debut = match ouv.checked_sub(1).map(|k| &jetons[k]) {
                        Some(Tok::Ident(_)) => ouv - 1,
                        _ => ouv,
                    };
                    return Some((debut, i));
                }
            }
            _ => {}
        }
    }
    None
}

fn convertir_factorielles(mut jetons: Vec<Tok>) -> Vec<Tok> {
    // point fixe : chaque tour remplace le '!' le plus à gauche (donc le plus interne)
    while let Some((debut, bang)) = trouver_factorielle(&jetons) {
        let mut appel = Vec::with_capacity(bang - debut + 3);
        appel.push(Tok::Ident("fact".to_string()));
        appel.push(Tok::LPar);
        appel.extend_from_slice(&jetons[debut..bang]);
        appel.push(Tok::RPar);

        jetons.splice(debut..=bang, appel);
    }
    jetons
}
