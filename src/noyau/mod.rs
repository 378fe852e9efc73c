//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - session.rs      : dernier résultat (Ans), mémoire, mode DEG/RAD
//! - erreur.rs       : classes d’échec du pipeline
//! - jetons.rs       : tokenisation (saisie humaine ET texte réécrit)
//! - reecriture.rs   : saisie -> texte arithmétique explicite (passes ordonnées)
//! - validation.rs   : liste blanche sur le texte réécrit
//! - rpn.rs          : shunting-yard + construction Expr
//! - expr.rs         : AST fermé + évaluation + aides (fact, inv)
//! - lecture.rs      : arrondi décimal exact
//! - format.rs       : affichage des nombres
//! - eval.rs         : pipeline complet (calculer / evaluer_seulement)
//! - postfixe.rs     : enveloppe la dernière unité tapée (1/x)
//! - calculatrice.rs : façade (saisie, calcul, mémoire, ligne d’état)

pub mod calculatrice;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod postfixe;
pub mod reecriture;
pub mod rpn;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use calculatrice::Calculatrice;
pub use erreur::ErreurCalcul;
