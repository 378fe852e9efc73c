// src/app.rs
//
// Calculatrice scientifique - module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte) :
// - chiffres . + - * / ^ ( ) % !   => touches du pavé ('*' -> '×', '/' -> '÷')
// - Enter / '='                    => calcul
// - Backspace                      => DEL
// - Delete / Escape                => AC

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

use etat::Touche;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (maintenant, touches) = ctx.input(|i| (i.time, touches_clavier(&i.events)));

        // fin de flash avant toute nouvelle touche
        self.tick(maintenant);
        for touche in touches {
            self.appuyer(touche, maintenant);
        }

        // sans événement, egui ne redessine pas : on programme la fin du flash
        if let Some(fin) = self.echeance_erreur() {
            ctx.request_repaint_after(Duration::from_secs_f64((fin - maintenant).max(0.0)));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

const CHIFFRES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

fn touches_clavier(events: &[egui::Event]) -> Vec<Touche> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(t) => out.extend(t.chars().filter_map(touche_caractere)),
            egui::Event::Key {
                key, pressed: true, ..
            } => out.extend(touche_speciale(*key)),
            _ => {}
        }
    }
    out
}

fn touche_caractere(c: char) -> Option<Touche> {
    if let Some(d) = c.to_digit(10) {
        return Some(Touche::Inserer(CHIFFRES[d as usize]));
    }
    let jeton = match c {
        '.' => ".",
        '+' => "+",
        '-' => "−",
        '*' => "×",
        '/' => "÷",
        '^' => "^",
        '(' => "(",
        ')' => ")",
        '%' => "%",
        '!' => "!",
        '=' => return Some(Touche::Egal),
        _ => return None,
    };
    Some(Touche::Inserer(jeton))
}

fn touche_speciale(key: egui::Key) -> Option<Touche> {
    match key {
        egui::Key::Enter => Some(Touche::Egal),
        egui::Key::Backspace => Some(Touche::Effacer),
        egui::Key::Delete | egui::Key::Escape => Some(Touche::ToutEffacer),
        _ => None,
    }
}
