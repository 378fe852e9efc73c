// src/app/vue.rs
//
// Vue (UI egui) - natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Afficheur (expression ou "Error") + ligne d’état "DEG | M:0"
// - Pavé scientifique en grille, gros boutons (tactile)
//
// Toute action passe par AppCalc::appuyer(touche, temps egui).

use eframe::egui;

use super::etat::{AppCalc, Touche};

/// Taille d’une touche du pavé.
const TAILLE_TOUCHE: [f32; 2] = [64.0, 40.0];

/// Pavé : (libellé, touche, bulle d’aide), rangée par rangée.
type Rangee = &'static [(&'static str, Touche, &'static str)];

const PAVE: &[Rangee] = &[
    &[
        ("", Touche::BasculerAngle, "Bascule degrés / radians"),
        ("MC", Touche::MemoireEffacer, "Efface la mémoire"),
        ("MR", Touche::MemoireRappel, "Rappelle la mémoire"),
        ("M+", Touche::MemoirePlus, "Ajoute le résultat à la mémoire"),
        ("M−", Touche::MemoireMoins, "Retranche le résultat de la mémoire"),
    ],
    &[
        ("sin", Touche::Inserer("sin("), "Sinus"),
        ("cos", Touche::Inserer("cos("), "Cosinus"),
        ("tan", Touche::Inserer("tan("), "Tangente"),
        ("ln", Touche::Inserer("ln("), "Logarithme népérien"),
        ("log", Touche::Inserer("log("), "Logarithme décimal"),
    ],
    &[
        ("√", Touche::Inserer("√("), "Racine carrée"),
        ("x²", Touche::Inserer("^2"), "Carré"),
        ("xʸ", Touche::Inserer("^"), "Puissance"),
        ("1/x", Touche::Reciproque, "Inverse du dernier terme"),
        ("n!", Touche::Inserer("!"), "Factorielle"),
    ],
    &[
        ("(", Touche::Inserer("("), ""),
        (")", Touche::Inserer(")"), ""),
        ("%", Touche::Inserer("%"), "Pourcentage"),
        ("Ans", Touche::Inserer("Ans"), "Dernier résultat"),
        ("÷", Touche::Inserer("÷"), ""),
    ],
    &[
        ("7", Touche::Inserer("7"), ""),
        ("8", Touche::Inserer("8"), ""),
        ("9", Touche::Inserer("9"), ""),
        ("DEL", Touche::Effacer, "Efface le dernier symbole"),
        ("×", Touche::Inserer("×"), ""),
    ],
    &[
        ("4", Touche::Inserer("4"), ""),
        ("5", Touche::Inserer("5"), ""),
        ("6", Touche::Inserer("6"), ""),
        ("AC", Touche::ToutEffacer, "Efface l’expression"),
        ("−", Touche::Inserer("−"), ""),
    ],
    &[
        ("1", Touche::Inserer("1"), ""),
        ("2", Touche::Inserer("2"), ""),
        ("3", Touche::Inserer("3"), ""),
        ("π", Touche::Inserer("π"), ""),
        ("+", Touche::Inserer("+"), ""),
    ],
    &[
        ("0", Touche::Inserer("0"), ""),
        (".", Touche::Inserer("."), ""),
        ("e", Touche::Inserer("e"), "Constante d’Euler"),
        ("=", Touche::Egal, "Calcule"),
    ],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_afficheur(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);
            });
    }

    fn ui_afficheur(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(self.ligne_etat())
                            .monospace()
                            .weak(),
                    );
                    let texte = egui::RichText::new(self.affichage()).monospace().size(30.0);
                    if self.echeance_erreur().is_some() {
                        ui.label(texte.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(texte);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for &(libelle, touche, aide) in rangee.iter() {
                        // la touche d’angle affiche le mode courant
                        let libelle = match touche {
                            Touche::BasculerAngle => self.mode_angle().etiquette(),
                            _ => libelle,
                        };
                        self.bouton_touche(ui, libelle, aide, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton_touche(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, touche: Touche) {
        let mut resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(label));
        if !tip.is_empty() {
            resp = resp.on_hover_text(tip);
        }

        if resp.clicked() {
            let maintenant = ui.input(|i| i.time);
            self.appuyer(touche, maintenant);
        }
    }
}
