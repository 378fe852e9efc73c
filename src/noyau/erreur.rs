// src/noyau/erreur.rs

use thiserror::Error;

/// Échecs possibles du pipeline réécriture → validation → évaluation.
///
/// L’interface ne montre qu’un seul « Error » ; la distinction sert aux
/// journaux et aux tests.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    /// Caractère ou identifiant hors liste blanche (texte réécrit).
    #[error("caractère non permis: {0:?}")]
    CaractereNonPermis(String),

    /// Infini ou NaN (division par zéro, dépassement, ln(-1)...).
    #[error("résultat non fini")]
    ResultatNonFini,

    /// Factorielle hors domaine (négatif, non entier).
    #[error("domaine numérique invalide: {0}")]
    DomaineInvalide(String),

    /// Tout autre échec de l’évaluateur (parenthèses, opérande manquant...).
    #[error("syntaxe: {0}")]
    Syntaxe(String),
}

impl ErreurCalcul {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }
}
