// src/noyau/format.rs
//
// Affichage d’un f64 comme une calculatrice web :
// - chiffres minimaux qui relisent exactement la même valeur
// - notation exposant hors de [1e-6, 1e21) : "1e+21", "1.5e-7"
// - "-0" affiché "0"
//
// Le texte produit est relu tel quel par tokenize (substitution de Ans).

pub fn format_nombre(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let a = x.abs();
    if (1e-6..1e21).contains(&a) {
        return format!("{x}");
    }

    let s = format!("{x:e}");
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}
