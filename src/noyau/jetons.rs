// src/noyau/jetons.rs

/// Noms de fonctions reconnus (minuscules), saisis ou produits par la réécriture.
pub const FONCTIONS: &[&str] = &["sqrt", "ln", "log", "log10", "sin", "cos", "tan", "fact", "inv"];

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral numérique tel que tapé ("12", "0.5", ".5", "1e+21").
    Num(String),
    Pi,
    E,
    /// Référence au dernier résultat ("Ans").
    Ans,

    // Fonctions connues (normalisées en minuscules) ou mot inconnu (tel quel).
    // NOTE: la validation rejette les mots inconnus avant l’évaluation.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    /// Moins unaire : produit uniquement par to_rpn.
    Neg,

    LPar,
    RPar,
    Comma,

    Bang,    // !
    Percent, // %

    /// Caractère hors vocabulaire, conservé pour que la validation le voie.
    Autre(char),
}

impl Tok {
    /// Jeton qui termine une valeur « mot » (collé à un autre, il fusionnerait au rendu).
    fn est_mot(&self) -> bool {
        matches!(self, Tok::Num(_) | Tok::Pi | Tok::E | Tok::Ans | Tok::Ident(_))
    }

    pub fn est_fonction(&self) -> bool {
        matches!(self, Tok::Ident(nom) if FONCTIONS.contains(&nom.as_str()))
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 0.5, .5, 5.) avec exposant optionnel (1e+21, 1.5e-7)
/// - opérateurs + - * / ^ et leurs glyphes × ÷ −
/// - parenthèses ( ) et virgule
/// - π ou pi, e (mot entier, minuscule)
/// - Ans (insensible à la casse)
/// - √ (équivaut à ident("sqrt"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
/// - marques postfixes ! et %
///
/// Ne échoue jamais : tout caractère inconnu devient `Tok::Autre`.
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut i: usize = 0;

    while i < n {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            '%' => Some(Tok::Percent),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre : chiffres, un seul point, exposant e[+-]chiffres
        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && i + 1 < n && chars[i + 1].is_ascii_digit());
        if debut_nombre {
            let start = i;
            let mut point = false;
            while i < n {
                if chars[i].is_ascii_digit() {
                    i += 1;
                } else if chars[i] == '.' && !point {
                    point = true;
                    i += 1;
                } else {
                    break;
                }
            }

            // "2e" seul reste 2·e ; seul "2e5" / "2e+5" est un exposant.
            if i < n && chars[i] == 'e' {
                let mut j = i + 1;
                if j < n && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < n && chars[j].is_ascii_digit() {
                    while j < n && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            out.push(Tok::Num(chars[start..i].iter().collect()));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < n && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(classer_mot(word));
            continue;
        }

        out.push(Tok::Autre(c));
        i += 1;
    }

    out
}

fn classer_mot(word: String) -> Tok {
    // "e" : minuscule seulement (E n’est pas la constante)
    if word == "e" {
        return Tok::E;
    }

    let w = word.to_ascii_lowercase();
    match w.as_str() {
        "ans" => Tok::Ans,
        "pi" => Tok::Pi,
        _ if FONCTIONS.contains(&w.as_str()) => Tok::Ident(w),
        _ => Tok::Ident(word),
    }
}

/// Rendu texte d’une suite de jetons.
///
/// Compact, sauf un espace entre deux jetons « mots » consécutifs
/// (sinon "2" "5" deviendrait "25" à la relecture).
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = String::new();
    let mut prev_mot = false;

    for t in tokens {
        if prev_mot && t.est_mot() {
            out.push(' ');
        }
        match t {
            Tok::Num(s) => out.push_str(s),
            Tok::Pi => out.push_str("pi"),
            Tok::E => out.push('e'),
            Tok::Ans => out.push_str("Ans"),
            Tok::Ident(name) => out.push_str(name),

            Tok::Plus => out.push('+'),
            Tok::Minus | Tok::Neg => out.push('-'),
            Tok::Star => out.push('*'),
            Tok::Slash => out.push('/'),
            Tok::Caret => out.push('^'),

            Tok::LPar => out.push('('),
            Tok::RPar => out.push(')'),
            Tok::Comma => out.push(','),

            Tok::Bang => out.push('!'),
            Tok::Percent => out.push('%'),
            Tok::Autre(c) => out.push(*c),
        }
        prev_mot = t.est_mot();
    }

    out
}
