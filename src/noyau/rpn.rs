// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok (texte réécrit, explicite) en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue => fonction unaire, '(' obligatoire juste après
//    - sinon => erreur (aucune variable)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - Neg lie plus fort que * / mais moins que ^ : -2^2 = -4, 2^-1 = 0.5
// - Plus unaire: ignoré
// - Aucune multiplication implicite ici : deux valeurs collées => erreur
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurCalcul;
use super::expr::{Constante, Expr, Fonction, OpBinaire};
use super::jetons::Tok;

/// Garde-fou : profondeur de parenthèses.
pub const PROFONDEUR_MAX: usize = 256;

/// Garde-fou : hauteur de l’arbre (chaînes "1+1+…", "−−−…1").
pub const PROFONDEUR_ARBRE_MAX: usize = 1024;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;
    let mut profondeur = 0usize;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant"));
                }
                out.push(tok.clone());
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if !is_fonction(tok) {
                    return Err(ErreurCalcul::syntaxe(format!("identifiant inconnu: {name}")));
                }
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant"));
                }
                if tokens.get(i + 1) != Some(&Tok::LPar) {
                    return Err(ErreurCalcul::syntaxe(format!("'(' attendue après {name}")));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(tok.clone());
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant"));
                }
                profondeur += 1;
                if profondeur > PROFONDEUR_MAX {
                    return Err(ErreurCalcul::syntaxe("parenthèses trop imbriquées"));
                }
                ops.push(Tok::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérande manquant avant ')'"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if top == Tok::LPar {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurCalcul::syntaxe("')' sans '('"));
                }
                profondeur -= 1;

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(is_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // préfixe : ne dépile rien
                if *tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérande manquant"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if *top == Tok::LPar || is_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok.clone());
                prev_was_value = false;
            }

            Tok::Ans => return Err(ErreurCalcul::syntaxe("Ans non substitué")),
            Tok::Bang | Tok::Percent => {
                return Err(ErreurCalcul::syntaxe("marque postfixe sans opérande valide"))
            }
            Tok::Comma => return Err(ErreurCalcul::syntaxe("',' inattendue")),
            Tok::Neg => return Err(ErreurCalcul::syntaxe("jeton interne inattendu")),
            Tok::Autre(c) => return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'"))),
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Tok::LPar {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque nœud porte sa hauteur : au-delà de PROFONDEUR_ARBRE_MAX, erreur
/// (l’évaluation et la libération de l’arbre sont récursives).
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalcul> {
    let invalide = || ErreurCalcul::syntaxe("expression invalide");
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let empiler = |st: &mut Vec<(Expr, usize)>, e: Expr, h: usize| {
        if h > PROFONDEUR_ARBRE_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop profonde"));
        }
        st.push((e, h));
        Ok(())
    };

    for tok in rpn {
        match tok {
            Tok::Num(s) => {
                let x = s
                    .parse::<f64>()
                    .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {s}")))?;
                st.push((Expr::Nombre(x), 1));
            }
            Tok::Pi => st.push((Expr::Constante(Constante::Pi), 1)),
            Tok::E => st.push((Expr::Constante(Constante::E), 1)),

            Tok::Neg => {
                let (a, h) = st.pop().ok_or_else(invalide)?;
                empiler(&mut st, Expr::Neg(Box::new(a)), h + 1)?;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, hb) = st.pop().ok_or_else(invalide)?;
                let (a, ha) = st.pop().ok_or_else(invalide)?;

                let op = match tok {
                    Tok::Plus => OpBinaire::Add,
                    Tok::Minus => OpBinaire::Sub,
                    Tok::Star => OpBinaire::Mul,
                    Tok::Slash => OpBinaire::Div,
                    _ => OpBinaire::Pow,
                };
                empiler(
                    &mut st,
                    Expr::Binaire(op, Box::new(a), Box::new(b)),
                    ha.max(hb) + 1,
                )?;
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(name)
                    .ok_or_else(|| ErreurCalcul::syntaxe(format!("identifiant inconnu: {name}")))?;
                let (x, h) = st.pop().ok_or_else(|| ErreurCalcul::syntaxe("fonction sans argument"))?;
                empiler(&mut st, Expr::Appel(f, Box::new(x)), h + 1)?;
            }

            _ => return Err(ErreurCalcul::syntaxe("jeton inattendu en RPN")),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}
