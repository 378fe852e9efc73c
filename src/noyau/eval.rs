//! Noyau - évaluation (pipeline réel)
//!
//! saisie -> réécriture -> validation -> jetons -> RPN -> Expr -> valeur
//!        -> contrôle fini -> arrondi 12 décimales -> texte + nouvelle session
//!
//! Tout est pur : la session entre par référence et sort (mise à jour)
//! seulement en cas de succès.

use tracing::{debug, warn};

use super::erreur::ErreurCalcul;
use super::expr::Aides;
use super::format::format_nombre;
use super::jetons::tokenize;
use super::lecture::arrondir;
use super::reecriture::reecrire;
use super::rpn::{from_rpn, to_rpn};
use super::session::Session;
use super::validation::valider;

/// Décimales gardées après un calcul (supprime le bruit flottant).
pub const DECIMALES_RESULTAT: usize = 12;

/// Évalue un texte DÉJÀ réécrit et validé.
///
/// Seules les deux aides de `aides` sont atteignables ; le résultat peut être
/// non fini (contrôlé par l’appelant).
pub fn evaluer(texte: &str, aides: &Aides) -> Result<f64, ErreurCalcul> {
    let jetons = tokenize(texte);
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;
    expr.eval(aides)
}

/// réécriture -> validation -> évaluation -> contrôle fini, sans arrondi ni
/// mise à jour de session (chemin M+ / M−).
pub fn evaluer_seulement(expr: &str, session: &Session) -> Result<f64, ErreurCalcul> {
    let texte = reecrire(expr, session);

    let resultat = valider(&texte)
        .and_then(|()| evaluer(&texte, &Aides::default()))
        .and_then(|v| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(ErreurCalcul::ResultatNonFini)
            }
        });

    if let Err(e) = &resultat {
        warn!(expr = %expr, texte = %texte, erreur = %e, "échec d’évaluation");
    }
    resultat
}

/// API publique : calcule l’expression.
///
/// Succès : (texte arrondi, session dont `dernier_resultat` vaut exactement
/// la valeur affichée). Échec : la session d’entrée reste la seule valide.
pub fn calculer(expr: &str, session: &Session) -> Result<(String, Session), ErreurCalcul> {
    let v = evaluer_seulement(expr, session)?;
    let arrondi = arrondir(v, DECIMALES_RESULTAT);

    let suivante = Session {
        dernier_resultat: arrondi,
        ..*session
    };

    let texte = format_nombre(arrondi);
    debug!(expr = %expr, resultat = %texte, "calcul");
    Ok((texte, suivante))
}
