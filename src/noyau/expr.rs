//! AST numérique + évaluation directe.
//!
//! Ensemble fermé : aucun nœud ne peut nommer autre chose qu’un nombre,
//! une constante, un opérateur ou une des fonctions de `Fonction`.

use std::f64::consts;

use super::erreur::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    /// Aide injectée `fact`.
    Factorielle,
    /// Aide injectée `inv`.
    Inverse,
}

impl Fonction {
    /// Nom tel qu’il apparaît dans le texte réécrit.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Some(match nom {
            "sqrt" => Fonction::Sqrt,
            "ln" => Fonction::Ln,
            "log10" => Fonction::Log10,
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "fact" => Fonction::Factorielle,
            "inv" => Fonction::Inverse,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(Constante),
    Neg(Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

/* ------------------------ Aides injectées ------------------------ */

/// Les deux seules fonctions externes atteignables depuis le texte évalué.
#[derive(Clone, Copy, Debug)]
pub struct Aides {
    pub factorielle: fn(f64) -> f64,
    pub inverse: fn(f64) -> f64,
}

impl Default for Aides {
    fn default() -> Self {
        Self {
            factorielle,
            inverse,
        }
    }
}

/// n! par produit itératif 2..n ; NaN si n < 0, non fini ou non entier.
pub fn factorielle(n: f64) -> f64 {
    if n < 0.0 || !n.is_finite() || n.floor() != n {
        return f64::NAN;
    }
    let mut r = 1.0;
    let mut i = 2.0;
    while i <= n {
        r *= i;
        // 171! déborde déjà : inutile de continuer
        if r.is_infinite() {
            break;
        }
        i += 1.0;
    }
    r
}

/// 1/x ; x = 0 donne un infini, traité par l’orchestrateur.
pub fn inverse(x: f64) -> f64 {
    1.0 / x
}

/* ------------------------ Évaluation ------------------------ */

impl Expr {
    pub fn eval(&self, aides: &Aides) -> Result<f64, ErreurCalcul> {
        Ok(match self {
            Expr::Nombre(x) => *x,
            Expr::Constante(Constante::Pi) => consts::PI,
            Expr::Constante(Constante::E) => consts::E,

            Expr::Neg(a) => -a.eval(aides)?,

            Expr::Binaire(op, a, b) => {
                let x = a.eval(aides)?;
                let y = b.eval(aides)?;
                match op {
                    OpBinaire::Add => x + y,
                    OpBinaire::Sub => x - y,
                    OpBinaire::Mul => x * y,
                    OpBinaire::Div => x / y,
                    OpBinaire::Pow => x.powf(y),
                }
            }

            Expr::Appel(f, a) => {
                let x = a.eval(aides)?;
                match f {
                    Fonction::Sqrt => x.sqrt(),
                    Fonction::Ln => x.ln(),
                    Fonction::Log10 => x.log10(),
                    Fonction::Sin => x.sin(),
                    Fonction::Cos => x.cos(),
                    Fonction::Tan => x.tan(),
                    Fonction::Factorielle => {
                        let r = (aides.factorielle)(x);
                        if r.is_nan() {
                            return Err(ErreurCalcul::DomaineInvalide(format!(
                                "factorielle de {x}"
                            )));
                        }
                        r
                    }
                    Fonction::Inverse => (aides.inverse)(x),
                }
            }
        })
    }
}
