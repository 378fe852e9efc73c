// src/noyau/validation.rs
//
// Liste blanche sur le texte RÉÉCRIT, refaite à chaque évaluation.
//
// Contrat :
// - caractères : chiffres, '.', + - * / ^, ( ), ',', '%', '!', espaces,
//   et les lettres des seuls noms que la réécriture peut produire
// - identifiants : chaque mot doit appartenir à NOMS_PERMIS
//
// Tout le reste échoue AVANT l’évaluateur.

use tracing::warn;

use super::erreur::ErreurCalcul;

/// Noms que la réécriture a le droit d’émettre (fonctions + aides + constantes).
pub const NOMS_PERMIS: &[&str] = &[
    "sqrt", "ln", "log10", "sin", "cos", "tan", "fact", "inv", "pi", "e",
];

const SYMBOLES_PERMIS: &str = ".+-*/^(),%!";

fn lettre_permise(c: char) -> bool {
    NOMS_PERMIS.iter().any(|nom| nom.contains(c))
}

fn caractere_permis(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || SYMBOLES_PERMIS.contains(c) || lettre_permise(c)
}

pub fn valider(texte: &str) -> Result<(), ErreurCalcul> {
    // 1) caractères
    if let Some(c) = texte.chars().find(|&c| !caractere_permis(c)) {
        warn!(texte = %texte, caractere = %c, "caractère rejeté");
        return Err(ErreurCalcul::CaractereNonPermis(c.to_string()));
    }

    // 2) identifiants (les caractères sont ASCII à ce stade)
    let b = texte.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        if b[i].is_ascii_digit() || b[i] == b'.' {
            i = fin_litteral(b, i);
            continue;
        }
        if b[i].is_ascii_alphabetic() {
            let start = i;
            while i < b.len() && b[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let mot = &texte[start..i];
            if !NOMS_PERMIS.contains(&mot) {
                warn!(texte = %texte, mot = %mot, "identifiant rejeté");
                return Err(ErreurCalcul::CaractereNonPermis(mot.to_string()));
            }
            continue;
        }
        i += 1;
    }

    Ok(())
}

/// Fin d’un littéral numérique (même forme que tokenize, exposant compris).
fn fin_litteral(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && (b[i].is_ascii_digit() || b[i] == b'.') {
        i += 1;
    }
    if i < b.len() && b[i] == b'e' {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            return j;
        }
    }
    i
}
