// src/app.rs
//
// Éditeur de matrice — module App (racine)
// ----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppMatrice (pour main.rs: use crate::app::AppMatrice;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppMatrice;`
pub use etat::AppMatrice;

use eframe::egui;

impl eframe::App for AppMatrice {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = désélectionner la cellule (la démarche se vide)
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc && self.selection.is_some() {
            self.selection = None;
            self.a_recalculer = true;
        }

        // Cellule dépendante du temps : on réévalue à chaque image.
        if self.continu {
            log::trace!("réévaluation continue demandée");
            self.a_recalculer = true;
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
