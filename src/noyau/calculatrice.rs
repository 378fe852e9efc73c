// src/noyau/calculatrice.rs
//
// Façade du noyau pour la couche d’affichage / saisie.
//
// Contrats :
// - l’expression n’est jamais vide ("0" par défaut)
// - aucune présentation ici (pas de "Error" affiché, pas de minuterie)
// - un échec ne modifie ni le dernier résultat ni la mémoire

use tracing::info;

use super::erreur::ErreurCalcul;
use super::eval::{calculer, evaluer_seulement};
use super::format::format_nombre;
use super::lecture::arrondir;
use super::postfixe::envelopper_dernier;
use super::session::Session;

/// Expression par défaut.
pub const EXPRESSION_DEFAUT: &str = "0";

/// Décimales de la mémoire dans la ligne d’état.
pub const DECIMALES_MEMOIRE: usize = 10;

/// Jetons multi-caractères retirés d’un bloc par `supprimer_dernier`.
const JETONS_COMPOSES: &[&str] = &[
    "(inv(", "sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "√(", "Ans",
];

#[derive(Clone, Debug)]
pub struct Calculatrice {
    expression: String,
    session: Session,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self {
            expression: EXPRESSION_DEFAUT.to_string(),
            session: Session::default(),
        }
    }
}

/// Le jeton commence-t-il une valeur (et remplace donc le "0" initial) ?
/// Chiffre, lettre (fonction, Ans, e), π, √ ou '('.
fn commence_valeur(jeton: &str) -> bool {
    jeton.starts_with(|c: char| c.is_ascii_alphanumeric() || matches!(c, 'π' | '√' | '('))
}

impl Calculatrice {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// "DEG | M:0"
    pub fn ligne_etat(&self) -> String {
        format!(
            "{} | M:{}",
            self.session.mode_angle,
            format_nombre(arrondir(self.session.memoire, DECIMALES_MEMOIRE))
        )
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute un jeton ; remplace le "0" initial si le jeton commence une valeur.
    pub fn ajouter(&mut self, jeton: &str) {
        if jeton.is_empty() {
            return;
        }
        if self.expression == EXPRESSION_DEFAUT && commence_valeur(jeton) {
            self.expression.clear();
        }
        self.expression.push_str(jeton);
    }

    /// Retire le dernier jeton (bloc entier pour "sin(", "Ans"...), sinon un caractère.
    pub fn supprimer_dernier(&mut self) {
        match JETONS_COMPOSES.iter().find(|j| self.expression.ends_with(*j)) {
            Some(j) => {
                let n = self.expression.len() - j.len();
                self.expression.truncate(n);
            }
            None => {
                self.expression.pop();
            }
        }
        if self.expression.is_empty() {
            self.expression.push_str(EXPRESSION_DEFAUT);
        }
    }

    pub fn effacer(&mut self) {
        self.expression = EXPRESSION_DEFAUT.to_string();
    }

    /// 1/x sur la dernière unité tapée.
    pub fn reciproque(&mut self) {
        self.expression = envelopper_dernier(&self.expression, "(inv(", "))");
    }

    pub fn basculer_mode_angle(&mut self) {
        self.session.mode_angle = self.session.mode_angle.basculer();
        info!(mode = %self.session.mode_angle, "mode d’angle");
    }

    /* ------------------------ Calcul ------------------------ */

    /// Calcule ; en cas de succès l’expression devient le résultat.
    pub fn calculer(&mut self) -> Result<String, ErreurCalcul> {
        let (texte, session) = calculer(&self.expression, &self.session)?;
        self.session = session;
        self.expression = texte.clone();
        Ok(texte)
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire_effacer(&mut self) {
        self.session.memoire = 0.0;
        info!("mémoire effacée");
    }

    /// Ajoute le texte décimal de la mémoire à l’expression et le rend.
    pub fn memoire_rappel(&mut self) -> String {
        let texte = format_nombre(self.session.memoire);
        self.ajouter(&texte);
        texte
    }

    /// M+ : échec signalé, mémoire inchangée.
    pub fn memoire_ajouter(&mut self) -> Result<(), ErreurCalcul> {
        let v = evaluer_seulement(&self.expression, &self.session)?;
        self.session.memoire += v;
        info!(memoire = self.session.memoire, "M+");
        Ok(())
    }

    /// M− : échec signalé, mémoire inchangée.
    pub fn memoire_soustraire(&mut self) -> Result<(), ErreurCalcul> {
        let v = evaluer_seulement(&self.expression, &self.session)?;
        self.session.memoire -= v;
        info!(memoire = self.session.memoire, "M−");
        Ok(())
    }
}
