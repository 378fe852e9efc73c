// src/noyau/lecture.rs
//
// Arrondi décimal exact : f64 -> rationnel exact -> entier “scalé” -> texte -> f64.
// Même règle que toFixed : demi-cas loin de zéro, sur la valeur binaire exacte.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/// Au-delà, pas d’arrondi (toFixed rend la valeur telle quelle).
const SEUIL_SANS_ARRONDI: f64 = 1e21;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// x -> entier “scalé” = round(x * 10^digits), demi-cas loin de zéro.
/// None si x n’est pas fini.
fn float_scaled(x: f64, digits: usize) -> Option<BigInt> {
    let r = BigRational::from_float(x)?;
    let scale = BigRational::from_integer(pow10(digits));
    Some((r * scale).round().to_integer())
}

/// Arrondit `x` à `decimales` chiffres après la virgule (bruit flottant).
///
/// Non fini ou |x| ≥ 1e21 : rendu tel quel. Zéro négatif : rendu +0.
pub fn arrondir(x: f64, decimales: usize) -> f64 {
    if !x.is_finite() || x.abs() >= SEUIL_SANS_ARRONDI {
        return x;
    }

    let Some(scaled) = float_scaled(x, decimales) else {
        return x;
    };

    let v = scaled_to_decimal(scaled, decimales)
        .parse::<f64>()
        .unwrap_or(x);

    if v == 0.0 {
        0.0
    } else {
        v
    }
}
