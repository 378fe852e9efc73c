// src/noyau/postfixe.rs
//
// Localise la dernière unité tapée d’une expression BRUTE (avant réécriture)
// pour lui appliquer un opérateur unaire (ex: 1/x).
//
// Unités reconnues en fin de chaîne (espaces finaux tolérés) :
// - groupe équilibré finissant par ')'
// - Ans (casse libre, comme tokenize), π, e
// - littéral numérique (exposant compris : 1e+21)
//
// Rien de reconnu (opérateur final...) : toute l’expression.
// Une ')' finale sans '(' correspondante compte comme "rien de reconnu" :
// on enveloppe toute l’expression, pas seulement depuis la ')' orpheline.

/// Enveloppe la dernière unité de `expr` avec `prefixe` / `suffixe`.
///
/// `envelopper_dernier("3+(4*5)", "R(", ")")` donne `"3+R((4*5))"`.
pub fn envelopper_dernier(expr: &str, prefixe: &str, suffixe: &str) -> String {
    match debut_derniere_unite(expr.trim_end()) {
        Some(i) => format!("{}{prefixe}{}{suffixe}", &expr[..i], &expr[i..]),
        None => format!("{prefixe}{expr}{suffixe}"),
    }
}

/// Index (octets) du début de la dernière unité de `s` (sans espaces finaux).
fn debut_derniere_unite(s: &str) -> Option<usize> {
    if s.ends_with(')') {
        return ouvrante_correspondante(s);
    }

    if let Some(i) = fin_mot(s, "Ans", true) {
        return Some(i);
    }
    if s.ends_with('π') {
        return Some(s.len() - 'π'.len_utf8());
    }
    if let Some(i) = fin_mot(s, "e", false) {
        return Some(i);
    }

    debut_litteral(s)
}

/// Balayage arrière : +1 sur ')', −1 sur '(', arrêt quand on revient à zéro.
fn ouvrante_correspondante(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (k, c) in s.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
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

/// `s` finit par le mot `mot`, non précédé d’une lettre ("sine" ne finit pas par e).
fn fin_mot(s: &str, mot: &str, ignorer_casse: bool) -> Option<usize> {
    let i = s.len().checked_sub(mot.len())?;
    if !s.is_char_boundary(i) {
        return None;
    }
    let fin = &s[i..];
    let egal = if ignorer_casse {
        fin.eq_ignore_ascii_case(mot)
    } else {
        fin == mot
    };
    if !egal {
        return None;
    }
    let precede_lettre = s[..i]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if precede_lettre {
        None
    } else {
        Some(i)
    }
}

/// Début du littéral numérique final : chiffres et '.', plus un éventuel
/// exposant "<mantisse>e[+-]<chiffres>".
fn debut_litteral(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let chiffres = |fin: usize| {
        let mut k = fin;
        while k > 0 && (b[k - 1].is_ascii_digit() || b[k - 1] == b'.') {
            k -= 1;
        }
        k
    };

    let debut = chiffres(b.len());
    if debut == b.len() || !b[debut..].iter().any(u8::is_ascii_digit) {
        return None;
    }

    // exposant : la partie trouvée est-elle "…e+21" ?
    let mut k = debut;
    if k > 0 && (b[k - 1] == b'+' || b[k - 1] == b'-') {
        k -= 1;
    }
    if k > 0 && b[k - 1] == b'e' {
        let mantisse = chiffres(k - 1);
        if mantisse < k - 1 {
            return Some(mantisse);
        }
    }

    Some(debut)
}
