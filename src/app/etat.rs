//! src/app/etat.rs
//!
//! État UI (sans vue) : la calculatrice du noyau + le flash "Error".
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `noyau::Calculatrice`.
//! - Le temps est fourni par l’appelant (secondes, `egui::InputState::time`),
//!   donc l’état se teste sans egui.
//! - Une seule échéance de flash à la fois : un second échec la remplace.

use tracing::warn;

use crate::noyau::session::ModeAngle;
use crate::noyau::{Calculatrice, ErreurCalcul};

/// Durée d’affichage de "Error" avant retour à "0".
pub const DELAI_ERREUR_S: f64 = 0.9;

/// Texte affiché pendant le flash.
pub const TEXTE_ERREUR: &str = "Error";

/// Une touche du clavier de la calculatrice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// Ajoute un jeton tel quel ("7", "sin(", "×", "^2"...).
    Inserer(&'static str),
    Reciproque,
    BasculerAngle,
    /// DEL : dernier jeton.
    Effacer,
    /// AC : toute l’expression (mémoire et Ans conservés).
    ToutEffacer,
    Egal,
    MemoireEffacer,
    MemoireRappel,
    MemoirePlus,
    MemoireMoins,
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    calc: Calculatrice,

    // échéance du flash (secondes), None si aucun flash en cours
    erreur_jusqua: Option<f64>,
}

impl AppCalc {
    /* ------------------------ Lecture ------------------------ */

    /// Texte de l’afficheur principal.
    pub fn affichage(&self) -> &str {
        if self.erreur_jusqua.is_some() {
            TEXTE_ERREUR
        } else {
            self.calc.expression()
        }
    }

    /// "DEG | M:0"
    pub fn ligne_etat(&self) -> String {
        self.calc.ligne_etat()
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.calc.session().mode_angle
    }

    /// Échéance du flash en cours (pour programmer un repaint).
    pub fn echeance_erreur(&self) -> Option<f64> {
        self.erreur_jusqua
    }

    /* ------------------------ Actions ------------------------ */

    /// Applique une touche à l’instant `maintenant`.
    ///
    /// Pendant un flash, la touche annule d’abord le flash et repart de "0".
    pub fn appuyer(&mut self, touche: Touche, maintenant: f64) {
        if self.erreur_jusqua.take().is_some() {
            self.calc.effacer();
        }

        let r: Result<(), ErreurCalcul> = match touche {
            Touche::Inserer(jeton) => {
                self.calc.ajouter(jeton);
                Ok(())
            }
            Touche::Reciproque => {
                self.calc.reciproque();
                Ok(())
            }
            Touche::BasculerAngle => {
                self.calc.basculer_mode_angle();
                Ok(())
            }
            Touche::Effacer => {
                self.calc.supprimer_dernier();
                Ok(())
            }
            Touche::ToutEffacer => {
                self.clear_entree();
                Ok(())
            }
            Touche::Egal => self.calc.calculer().map(|_| ()),
            Touche::MemoireEffacer => {
                self.calc.memoire_effacer();
                Ok(())
            }
            Touche::MemoireRappel => {
                self.calc.memoire_rappel();
                Ok(())
            }
            Touche::MemoirePlus => self.calc.memoire_ajouter(),
            Touche::MemoireMoins => self.calc.memoire_soustraire(),
        };

        if let Err(e) = r {
            warn!(erreur = %e, touche = ?touche, "échec signalé à l’écran");
            self.erreur_jusqua = Some(maintenant + DELAI_ERREUR_S);
        }
    }

    /// Fin du flash : échéance atteinte => expression remise à "0".
    pub fn tick(&mut self, maintenant: f64) {
        if self.erreur_jusqua.is_some_and(|t| maintenant >= t) {
            self.erreur_jusqua = None;
            self.calc.effacer();
        }
    }

    /// AC / Échap : expression remise à "0", flash annulé.
    pub fn clear_entree(&mut self) {
        self.erreur_jusqua = None;
        self.calc.effacer();
    }
}
