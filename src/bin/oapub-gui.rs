/*!
 * Desktop viewer for oa-pubstats: open vs closed access publications per year.
 *
 * - Pick the first and last year (options that would invert the range are disabled)
 * - Hover a bar for the year's breakdown by access category
 * - Save the current selection as PNG or SVG
 *
 * Usage: `oapub-gui [config.toml]`
 */

use eframe::egui;
use oa_pubstats::color::Rgb;
use oa_pubstats::config::{AppConfig, CLOSED_ACCESS_LABEL, ChartSettings, OPEN_ACCESS_LABEL};
use oa_pubstats::filter::{Bound, RangeFilter, select, year_options};
use oa_pubstats::series::project;
use oa_pubstats::tooltip::{Tooltip, bar_label, format_tooltip};
use oa_pubstats::viz::util::{axis_upper_bound, format_count, map_locale};
use oa_pubstats::viz::{self, ImageFormat};
use oa_pubstats::{DataStore, PublicationRecord, YearRange};
use std::path::PathBuf;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let app = OapubApp::new(config_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([600.0, 420.0])
            .with_title("Open access publications - oapub"),
        ..Default::default()
    };

    eframe::run_native(
        "Open access publications",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

/// Main application state
struct OapubApp {
    store: DataStore,
    settings: ChartSettings,
    /// `None` only when the store is empty.
    range: Option<YearRange>,
    filter: RangeFilter,
    image_format: ImageFormat,

    status_message: String,
    error_message: String,
}

impl OapubApp {
    fn new(config_path: Option<PathBuf>) -> Self {
        let mut error_message = String::new();
        let cfg = AppConfig::load_or_default(config_path.as_deref()).unwrap_or_else(|err| {
            log::error!("{err:#}");
            error_message = format!("Configuration error: {err:#}");
            AppConfig::default()
        });
        let store = DataStore::open(cfg.data.as_deref()).unwrap_or_else(|err| {
            log::error!("{err:#}");
            error_message = format!("Could not load data, showing the sample instead: {err:#}");
            DataStore::sample()
        });
        let range = match cfg.range.map(|r| store.check_range(r)) {
            Some(Ok(r)) => Some(r),
            Some(Err(err)) => {
                log::warn!("configured range ignored: {err}");
                error_message = format!("Configured range ignored: {err}");
                store.full_range()
            }
            None => store.full_range(),
        };

        Self {
            settings: cfg.chart_settings(),
            store,
            range,
            filter: RangeFilter::new(),
            image_format: ImageFormat::Png,
            status_message: String::new(),
            error_message,
        }
    }

    fn selected(&mut self) -> Vec<PublicationRecord> {
        match self.range {
            Some(range) => self.filter.apply(self.store.records(), range).to_vec(),
            None => Vec::new(),
        }
    }

    fn year_combo(&mut self, ui: &mut egui::Ui, bound: Bound) {
        let Some(range) = self.range else {
            ui.label("-");
            return;
        };
        let (id, current) = match bound {
            Bound::Start => ("start_year", range.start()),
            Bound::End => ("end_year", range.end()),
        };
        let years = self.store.years();
        let mut picked = None;
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.to_string())
            .show_ui(ui, |ui| {
                for opt in year_options(&years, range, bound) {
                    let item = egui::SelectableLabel::new(opt.selected, opt.year.to_string());
                    if ui.add_enabled(opt.enabled, item).clicked() {
                        picked = Some(opt.year);
                    }
                }
            });
        if let Some(year) = picked {
            self.range = Some(select(range, bound, year));
            self.status_message.clear();
        }
    }

    fn save_image(&mut self) {
        let Some(range) = self.range else {
            return;
        };
        let records = self.selected();
        let file_name = viz::export_file_name(range, self.image_format);
        let ext = self.image_format.extension();
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(&file_name)
            .add_filter(ext.to_uppercase(), &[ext]);
        if let Some(dir) = dirs::picture_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        match viz::plot_publications(&records, &path, &self.settings) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Failed to save chart: {err:#}");
                self.status_message.clear();
            }
        }
    }
}

impl eframe::App for OapubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let records = self.selected();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.settings.title.as_str());
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Years:");
                self.year_combo(ui, Bound::Start);
                ui.label("to");
                self.year_combo(ui, Bound::End);
            });
            ui.add_space(8.0);

            draw_chart(ui, &records, &self.settings);
            draw_legend(ui, &self.settings);
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.radio_value(&mut self.image_format, ImageFormat::Png, "PNG");
                ui.radio_value(&mut self.image_format, ImageFormat::Svg, "SVG");
                let can_save = !records.is_empty();
                if ui
                    .add_enabled(can_save, egui::Button::new("Save as image"))
                    .clicked()
                {
                    self.save_image();
                }
            });

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn draw_chart(ui: &mut egui::Ui, records: &[PublicationRecord], settings: &ChartSettings) {
    use egui::{Align2, Color32, FontId, Rect, Stroke, pos2, vec2};

    let height = (ui.available_height() - 90.0).clamp(220.0, 480.0);
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), height), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    let series = project(records);
    if series.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No records in the selected years",
            FontId::proportional(14.0),
            Color32::GRAY,
        );
        return;
    }

    let locale = map_locale(&settings.format.locale_tag).0;
    let plot = Rect::from_min_max(rect.min + vec2(64.0, 16.0), rect.max - vec2(16.0, 28.0));
    let y_max = axis_upper_bound(series.max_stacked() as f64);
    let to_y = |v: f64| plot.bottom() - (v / y_max) as f32 * plot.height();

    for k in 0..=4 {
        let v = y_max * k as f64 / 4.0;
        let y = to_y(v);
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            Stroke::new(1.0, Color32::from_gray(230)),
        );
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format_count(v, locale),
            FontId::proportional(11.0),
            Color32::DARK_GRAY,
        );
    }

    let open_color = color32(settings.series.open_access);
    let closed_color = color32(settings.series.closed_access);
    let slot = plot.width() / series.len() as f32;
    let mut hovered = None;

    for (i, record) in records.iter().enumerate() {
        let cx = plot.left() + slot * (i as f32 + 0.5);
        let half = slot * 0.3;
        let open = series.open[i] as f64;
        // stored data is validated, so closed is never negative here
        let closed = series.closed[i].max(0) as f64;

        let open_rect = Rect::from_min_max(pos2(cx - half, to_y(open)), pos2(cx + half, to_y(0.0)));
        let closed_rect =
            Rect::from_min_max(pos2(cx - half, to_y(open + closed)), pos2(cx + half, to_y(open)));
        painter.rect_filled(open_rect, 0.0, open_color);
        painter.rect_filled(closed_rect, 0.0, closed_color);

        if record.open_access > 0 {
            painter.text(
                open_rect.center(),
                Align2::CENTER_CENTER,
                bar_label(record.open_access as i64, record.total, settings.format.zero_total),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
        painter.text(
            pos2(cx, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            record.year.to_string(),
            FontId::proportional(12.0),
            Color32::DARK_GRAY,
        );

        if let Some(p) = response.hover_pos()
            && (p.x - cx).abs() <= slot / 2.0
            && p.y >= plot.top()
            && p.y <= plot.bottom()
        {
            hovered = Some(i);
        }
    }

    if let Some(i) = hovered {
        let tip = format_tooltip(&records[i], &settings.categories, &settings.format);
        let _ = response.on_hover_ui_at_pointer(|ui| tooltip_ui(ui, &tip, open_color));
    }
}

fn draw_legend(ui: &mut egui::Ui, settings: &ChartSettings) {
    ui.horizontal(|ui| {
        for (label, color) in [
            (OPEN_ACCESS_LABEL, settings.series.open_access),
            (CLOSED_ACCESS_LABEL, settings.series.closed_access),
        ] {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, color32(color));
            ui.label(label);
            ui.add_space(12.0);
        }
    });
}

fn tooltip_ui(ui: &mut egui::Ui, tip: &Tooltip, open_color: egui::Color32) {
    ui.strong(format!("Year {}", tip.year));
    ui.separator();
    ui.label(format!("Total publications: {}", tip.total_text()));
    ui.colored_label(open_color, format!("Open access: {}", tip.open_access_text()));
    ui.add_space(4.0);
    egui::Grid::new("tooltip_breakdown")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for (k, row) in tip.rows.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot.center(), 4.0, color32(row.color));
                    ui.label(format!("{}:", row.label));
                    ui.strong(tip.count_text(row));
                });
                if k % 2 == 1 {
                    ui.end_row();
                }
            }
        });
}
