#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//!
//! 6×3 파라미터 보드를 그리고, 칸에서 Enter를 누를 때마다 전체를 다시 해석한다.

use eframe::{egui, App, Frame};
use imaging_design_toolbox::{
    board::{Board, Cell},
    config::{self, UnitSystem},
    i18n::{self, keys},
    quantity::Quantity,
    relation::RelationSet,
    state::ParamStatus,
    units::DisplayUnit,
};
use std::{env, fs, path::Path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([980.0, 560.0]),
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Imaging Design Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 라벨용 폰트를 대체 글꼴로 등록한다.
/// 1) assets/fonts/malgun.ttf
/// 2) 운영체제별 시스템 폰트
/// 모두 없으면 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![Path::new("assets/fonts/malgun.ttf").to_path_buf()];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(|p| Path::new(p).to_path_buf()),
    );
    for path in candidates {
        if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            info!(path = %path.display(), "font loaded");
            return Ok(());
        }
    }
    Err("Korean font not found, keeping default fonts".into())
}

/// 상태별 칸 색.
fn status_color(status: ParamStatus) -> egui::Color32 {
    match status {
        ParamStatus::Unset => egui::Color32::from_gray(90),
        ParamStatus::Manual => egui::Color32::from_rgb(60, 170, 90),
        ParamStatus::Computed => egui::Color32::from_rgb(70, 130, 210),
        ParamStatus::Overconstrained => egui::Color32::from_rgb(210, 60, 60),
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    board: Board,
    /// 칸별 입력 버퍼 (레지스트리 순서).
    inputs: Vec<String>,
    error: Option<String>,
    show_relations: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, None);
        info!(lang = %lang_code, "GUI language resolved");
        let board = Board::new(&config);
        let mut s = Self {
            config,
            tr,
            board,
            inputs: vec![String::new(); Quantity::ALL.len()],
            error: None,
            show_relations: false,
        };
        s.refresh_inputs();
        s
    }

    /// 입력 버퍼를 보드 표시값으로 다시 채운다.
    fn refresh_inputs(&mut self) {
        for cell in self.board.cells() {
            self.inputs[cell.quantity().index()] = cell.display_text();
        }
    }

    fn submit(&mut self, quantity: Quantity) {
        let text = self.inputs[quantity.index()].clone();
        let cell = self.board.cell(quantity);
        // 표시 문자열은 반올림되어 있으므로 편집하지 않은 칸은 다시 고정하지 않는다.
        if cell.status() != ParamStatus::Unset && text.trim() == cell.display_text() {
            return;
        }
        match self.board.submit(quantity, &text) {
            Ok(_) => self.error = None,
            Err(e) => self.error = Some(format!("{} {e}", quantity.symbol())),
        }
        self.refresh_inputs();
    }

    fn cycle_unit(&mut self, quantity: Quantity) {
        self.board.cycle_unit(quantity);
        self.refresh_inputs();
    }

    fn clear_all(&mut self) {
        self.board.clear_all();
        self.error = None;
        self.refresh_inputs();
    }

    fn apply_unit_system(&mut self, system: UnitSystem) {
        self.config.apply_unit_system(system);
        self.board.apply_default_units(&self.config.default_units);
        self.refresh_inputs();
        if let Err(e) = self.config.save() {
            warn!("config save failed: {e}");
        }
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &Cell) {
        let q = cell.quantity();
        let color = status_color(cell.status());
        let stroke_width = if cell.is_conflicting() { 3.0 } else { 1.5 };
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(stroke_width, color))
            .fill(color.linear_multiply(0.15))
            .show(ui, |ui| {
                ui.set_width(290.0);
                ui.label(egui::RichText::new(q.name()).small());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(q.symbol()).strong().color(color));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.inputs[q.index()]).desired_width(130.0),
                    );
                    if resp.lost_focus() {
                        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            self.submit(q);
                        } else {
                            self.inputs[q.index()] = cell.display_text();
                        }
                    }
                    if cell.unit() != DisplayUnit::Unitless && ui.button(cell.unit().symbol()).clicked() {
                        self.cycle_unit(q);
                    }
                });
            });
    }

    fn status_text(&self) -> (String, egui::Color32) {
        if let Some(c) = self.board.contradiction() {
            let pins: Vec<&str> = c.pins.iter().map(|q| q.symbol()).collect();
            let text = format!(
                "{}  {}",
                self.tr.tf(
                    keys::STATUS_OVERCONSTRAINED,
                    &[("discrepancy", format!("{:.3e}", c.relative_discrepancy()))]
                ),
                self.tr.tf(keys::STATUS_CONFLICTING_PINS, &[("pins", pins.join(", "))])
            );
            return (text, status_color(ParamStatus::Overconstrained));
        }
        match self.board.degrees_of_freedom() {
            Some(0) => (self.tr.t(keys::STATUS_COMPLETE), status_color(ParamStatus::Manual)),
            Some(dof) => (
                self.tr.tf(keys::STATUS_UNDERDETERMINED, &[("dof", dof.to_string())]),
                status_color(ParamStatus::Computed),
            ),
            None => (self.tr.t(keys::GUI_HINT), egui::Color32::GRAY),
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::GUI_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_RESOLVE)).clicked() {
                    self.board.resolve();
                    self.refresh_inputs();
                }
                if ui.button(self.tr.t(keys::GUI_CLEAR_ALL)).clicked() {
                    self.clear_all();
                }
                ui.separator();
                let mut system = self.config.unit_system;
                egui::ComboBox::from_label(self.tr.t(keys::GUI_UNIT_SYSTEM))
                    .selected_text(format!("{system:?}"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut system, UnitSystem::Imperial, "Imperial");
                        ui.selectable_value(&mut system, UnitSystem::Metric, "Metric");
                    });
                if system != self.config.unit_system {
                    self.apply_unit_system(system);
                }
                ui.toggle_value(&mut self.show_relations, self.tr.t(keys::RELATIONS_HEADING));
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let (text, color) = self.status_text();
            ui.label(egui::RichText::new(text).color(color));
            if let Some(err) = &self.error {
                ui.label(
                    egui::RichText::new(format!("{} {err}", self.tr.t(keys::ERROR_PREFIX)))
                        .color(status_color(ParamStatus::Overconstrained)),
                );
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.board.is_overconstrained() {
                egui::Frame::none()
                    .fill(status_color(ParamStatus::Overconstrained).linear_multiply(0.25))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(self.status_text().0);
                    });
            }
            let rows: Vec<[Cell; 3]> = self.board.rows().map(|row| row.map(Cell::clone)).collect();
            egui::Grid::new("board_grid").spacing([8.0, 8.0]).show(ui, |ui| {
                for row in &rows {
                    for cell in row {
                        self.cell_ui(ui, cell);
                    }
                    ui.end_row();
                }
            });
        });

        if self.show_relations {
            egui::Window::new(self.tr.t(keys::RELATIONS_HEADING))
                .open(&mut self.show_relations)
                .show(ctx, |ui| {
                    for (i, relation) in RelationSet::standard().iter().enumerate() {
                        ui.monospace(format!("{:>2}) {relation}", i + 1));
                    }
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_colors_are_distinct() {
        let colors = [
            status_color(ParamStatus::Unset),
            status_color(ParamStatus::Manual),
            status_color(ParamStatus::Computed),
            status_color(ParamStatus::Overconstrained),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn submit_refreshes_computed_inputs() {
        let mut app = GuiApp::new(config::Config::default());
        app.inputs[Quantity::FocalLength.index()] = "400".into();
        app.submit(Quantity::FocalLength);
        app.inputs[Quantity::PrimaryDiameter.index()] = "100".into();
        app.submit(Quantity::PrimaryDiameter);
        assert_eq!(app.inputs[Quantity::FocalRatio.index()], "4.000");
        assert!(app.error.is_none());
    }

    #[test]
    fn bad_input_keeps_board() {
        let mut app = GuiApp::new(config::Config::default());
        app.inputs[Quantity::FocalLength.index()] = "abc".into();
        app.submit(Quantity::FocalLength);
        assert!(app.error.is_some());
        assert_eq!(app.board.cell(Quantity::FocalLength).status(), ParamStatus::Unset);
        assert_eq!(app.inputs[Quantity::FocalLength.index()], "");
    }

    #[test]
    fn unedited_enter_keeps_exact_values() {
        let mut app = GuiApp::new(config::Config::default());
        for (q, text) in [
            (Quantity::PrimaryDiameter, "120"),
            (Quantity::FocalLength, "393.70123"),
            (Quantity::PixelPitch, "0.0001476"),
            (Quantity::PixelCountX, "10000"),
            (Quantity::PixelCountY, "8000"),
            (Quantity::Altitude, "23622047"),
            (Quantity::Wavelength, "0.0000197"),
        ] {
            app.inputs[q.index()] = text.into();
            app.submit(q);
        }
        assert_eq!(app.board.degrees_of_freedom(), Some(0));
        let exact_q = app.board.cell(Quantity::SamplingRatio).value();

        // 계산된 칸과 반올림 표시된 입력 칸에서 그냥 Enter.
        app.submit(Quantity::SamplingRatio);
        app.submit(Quantity::FocalLength);

        assert!(!app.board.is_overconstrained());
        assert_eq!(app.board.cell(Quantity::SamplingRatio).status(), ParamStatus::Computed);
        assert_eq!(app.board.cell(Quantity::SamplingRatio).value(), exact_q);
        assert_eq!(app.board.pins().get(Quantity::FocalLength), Some(393.70123));
    }

    #[test]
    fn edited_computed_cell_is_pinned() {
        let mut app = GuiApp::new(config::Config::default());
        app.inputs[Quantity::FocalLength.index()] = "400".into();
        app.submit(Quantity::FocalLength);
        app.inputs[Quantity::PrimaryDiameter.index()] = "100".into();
        app.submit(Quantity::PrimaryDiameter);
        app.inputs[Quantity::FocalRatio.index()] = "5".into();
        app.submit(Quantity::FocalRatio);
        assert!(app.board.is_overconstrained());
    }
}
