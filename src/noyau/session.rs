// src/noyau/session.rs
//
// État de session : dernier résultat (Ans), mémoire, mode d’angle.
// Valeur `Copy` passée explicitement à chaque étape du pipeline.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degre,
    Radian,
}

impl ModeAngle {
    pub fn basculer(self) -> Self {
        match self {
            ModeAngle::Degre => ModeAngle::Radian,
            ModeAngle::Radian => ModeAngle::Degre,
        }
    }

    /// Étiquette de la ligne d’état.
    pub fn etiquette(self) -> &'static str {
        match self {
            ModeAngle::Degre => "DEG",
            ModeAngle::Radian => "RAD",
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiquette())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Session {
    pub dernier_resultat: f64,
    pub memoire: f64,
    pub mode_angle: ModeAngle,
}
