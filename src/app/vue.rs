// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppMatrice (etat.rs) pour natif + wasm
// - Chaque cellule est une expression, réévaluée à chaque modification
// - Cellule invalide (erreur ou NaN) : texte coloré si le réglage est actif
// - Liste des fonctions du noyau, clic = insertion dans la cellule sélectionnée
// - Démarche : postfixe + message d’erreur de la cellule sélectionnée

use eframe::egui;

use matrice_expr::noyau::{self, list_functions, postfix_text, try_parse, Variables};

use super::etat::{nom_variable_valide, AppMatrice, TAILLE_MAX};

impl AppMatrice {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Matrice");
                ui.add_space(6.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                self.ui_cellules(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variables(ui);

                ui.add_space(8.0);
                self.ui_fonctions(ui);

                if self.reglages.afficher_demarche {
                    ui.add_space(8.0);
                    self.ui_demarche(ui);
                }
            });

        if self.a_recalculer {
            self.eval_via_noyau();
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Taille :");
            let mut n = self.taille() as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut n)
                    .speed(1)
                    .range(1..=TAILLE_MAX as u32),
            );
            if resp.changed() {
                self.set_taille(n as usize);
            }

            ui.separator();

            if ui
                .button("Identité")
                .on_hover_text("Remet la matrice identité")
                .clicked()
            {
                self.reset_identite();
            }
            if ui.button("Zéro").on_hover_text("Toutes les cellules à 0").clicked() {
                self.reset_zero();
            }

            ui.separator();

            ui.checkbox(&mut self.reglages.colorer_erreurs, "Colorer les erreurs");
            ui.checkbox(&mut self.reglages.afficher_demarche, "Démarche");
        });
    }

    fn ui_cellules(&mut self, ui: &mut egui::Ui) {
        let n = self.taille();
        let couleur_erreur = ui.visuals().error_fg_color;
        let colorer = self.reglages.colorer_erreurs;

        let mut modifie = false;
        let mut focus = None;

        egui::Grid::new("cellules_matrice")
            .num_columns(n)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, cellule) in self.cellules.iter_mut().enumerate() {
                    let mut edit = egui::TextEdit::singleline(&mut cellule.texte)
                        .desired_width(90.0)
                        .id_salt(("cellule", i))
                        .code_editor();
                    if colorer && cellule.valeur.is_none() {
                        edit = edit.text_color(couleur_erreur);
                    }

                    let resp = ui.add(edit);
                    let resp = if cellule.erreur.is_empty() {
                        resp
                    } else {
                        resp.on_hover_text(cellule.erreur.as_str())
                    };

                    modifie |= resp.changed();
                    if resp.has_focus() {
                        focus = Some(i);
                    }

                    if (i + 1) % n == 0 {
                        ui.end_row();
                    }
                }
            });

        if focus.is_some() && focus != self.selection {
            self.selection = focus;
            modifie = true;
        }
        if modifie {
            self.a_recalculer = true;
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Valeurs :");

        let n = self.taille();
        let couleur_erreur = ui.visuals().error_fg_color;

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                egui::Grid::new("valeurs_matrice")
                    .num_columns(n)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for (i, v) in self.valeurs().into_iter().enumerate() {
                            match v {
                                Some(x) => {
                                    ui.monospace(format!("{x:>10.4}"));
                                }
                                None if self.reglages.colorer_erreurs => {
                                    ui.colored_label(couleur_erreur, "—");
                                }
                                None => {
                                    ui.monospace("—");
                                }
                            }
                            if (i + 1) % n == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
    }

    fn ui_variables(&mut self, ui: &mut egui::Ui) {
        ui.label("Variables :");

        let couleur_erreur = ui.visuals().error_fg_color;
        let mut modifie = false;
        let mut a_retirer = None;

        egui::Grid::new("table_variables")
            .num_columns(3)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                for (i, ligne) in self.variables.iter_mut().enumerate() {
                    let nom_ok = nom_variable_valide(&ligne.nom);
                    let valeur_ok = try_parse(&ligne.texte, None).is_some();

                    let mut nom = egui::TextEdit::singleline(&mut ligne.nom)
                        .desired_width(80.0)
                        .id_salt(("variable_nom", i))
                        .hint_text("nom");
                    if !nom_ok {
                        nom = nom.text_color(couleur_erreur);
                    }
                    modifie |= ui.add(nom).changed();

                    let mut valeur = egui::TextEdit::singleline(&mut ligne.texte)
                        .desired_width(120.0)
                        .id_salt(("variable_valeur", i))
                        .hint_text("valeur");
                    if !valeur_ok {
                        valeur = valeur.text_color(couleur_erreur);
                    }
                    modifie |= ui.add(valeur).changed();

                    if ui.button("✕").on_hover_text("Retirer").clicked() {
                        a_retirer = Some(i);
                    }
                    ui.end_row();
                }
            });

        if let Some(i) = a_retirer {
            self.retirer_variable(i);
        }
        if ui.button("+ variable").clicked() {
            self.ajouter_variable();
        }
        if modifie {
            self.a_recalculer = true;
        }
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Fonctions")
            .default_open(false)
            .show(ui, |ui| {
                if self.selection.is_none() {
                    ui.label("Sélectionner une cellule pour insérer.");
                }
                egui::Grid::new("liste_fonctions")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for f in list_functions() {
                            let resp = ui.button(f.nom).on_hover_text(f.description);
                            if resp.clicked() {
                                let texte = if f.arite == 0 {
                                    format!("{}()", f.nom)
                                } else {
                                    format!("{}(", f.nom)
                                };
                                self.inserer_dans_selection(&texte);
                            }
                            ui.monospace(f.exemple);
                            ui.end_row();
                        }
                    });
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                let Some(cellule) = self.selection.and_then(|i| self.cellules.get(i)) else {
                    ui.label("Aucune cellule sélectionnée.");
                    return;
                };

                ui.label("Postfixe :");
                Self::champ_monospace(ui, "demarche_postfixe", &self.demarche, 1);

                if !cellule.erreur.is_empty() {
                    ui.add_space(4.0);
                    ui.colored_label(ui.visuals().error_fg_color, cellule.erreur.as_str());
                }
                if cellule.mise_a_jour_continue {
                    ui.label("Réévaluée à chaque image.");
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Table de variables : lignes au nom valide et à la valeur lisible seulement.
    fn table_variables(&self) -> Variables {
        self.variables
            .iter()
            .filter(|l| nom_variable_valide(&l.nom))
            .filter_map(|l| try_parse(&l.texte, None).map(|v| (l.nom.clone(), v)))
            .collect()
    }

    /// Évalue toutes les cellules via le noyau, puis dépose valeurs/erreurs/démarche dans l’état.
    pub fn eval_via_noyau(&mut self) {
        let vars = self.table_variables();
        let mut continu = false;

        for (i, cellule) in self.cellules.iter_mut().enumerate() {
            match noyau::evaluate(&cellule.texte, Some(&vars)) {
                Ok(e) if e.valeur.is_nan() => {
                    cellule.valeur = None;
                    cellule.erreur = "résultat indéfini (NaN)".into();
                    cellule.mise_a_jour_continue = e.mise_a_jour_continue;
                }
                Ok(e) => {
                    cellule.valeur = Some(e.valeur);
                    cellule.erreur.clear();
                    cellule.mise_a_jour_continue = e.mise_a_jour_continue;
                }
                Err(err) => {
                    log::debug!("cellule {i} ({:?}) : {err}", cellule.texte);
                    cellule.valeur = None;
                    cellule.erreur = err.to_string();
                    cellule.mise_a_jour_continue = false;
                }
            }
            continu |= cellule.mise_a_jour_continue;
        }

        self.continu = continu;
        self.demarche = match self.selection.and_then(|i| self.cellules.get(i)) {
            Some(c) => postfix_text(&c.texte, Some(&vars)).unwrap_or_else(|e| e.to_string()),
            None => String::new(),
        };
        self.a_recalculer = false;
    }
}
