use std::time::Instant;

use eframe::egui;
use rand::rngs::StdRng;

use crate::app::AppState;
use crate::portfolio::Side;
use crate::price_feed::PriceFeed;

// UI Application
pub struct StockApp {
    state: AppState,
    feed: PriceFeed<StdRng>,
    symbol_input: String,
    quantity_input: String,
    notice: Option<String>,
}

impl StockApp {
    pub fn new(state: AppState, feed: PriceFeed<StdRng>) -> Self {
        Self {
            state,
            feed,
            symbol_input: String::new(),
            quantity_input: String::new(),
            notice: None,
        }
    }

    fn submit(&mut self, side: Side) {
        if let Err(e) = self
            .state
            .trade(side, &self.symbol_input, &self.quantity_input)
        {
            self.notice = Some(e.to_string());
        }
    }

    /// Trade controls stay locked while a rejection notice is open.
    fn controls_enabled(&self) -> bool {
        self.notice.is_none()
    }

    fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn market_table(&self, ui: &mut egui::Ui) {
        ui.heading("Market");
        egui::Grid::new("market_table")
            .striped(true)
            .num_columns(2)
            .min_col_width(120.0)
            .show(ui, |ui| {
                ui.strong("Symbol");
                ui.strong("Price");
                ui.end_row();
                for (symbol, price) in self.state.market_rows() {
                    ui.label(symbol);
                    ui.label(price);
                    ui.end_row();
                }
            });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Symbol:");
            ui.add(egui::TextEdit::singleline(&mut self.symbol_input).desired_width(60.0));
            ui.label("Quantity:");
            ui.add(egui::TextEdit::singleline(&mut self.quantity_input).desired_width(60.0));
            if ui.button("Buy").clicked() {
                self.submit(Side::Buy);
            }
            if ui.button("Sell").clicked() {
                self.submit(Side::Sell);
            }
        });
    }

    fn text_panes(&self, ui: &mut egui::Ui) {
        let portfolio = self.state.portfolio_text();
        let transactions = self.state.transactions_text();
        ui.columns(2, |cols| {
            for (col, text) in cols.iter_mut().zip([portfolio, transactions]) {
                egui::ScrollArea::vertical().show(col, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text.as_str())
                            .desired_rows(10)
                            .desired_width(f32::INFINITY),
                    );
                });
            }
        });
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notice.as_deref() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.dismiss_notice();
        }
    }
}

impl eframe::App for StockApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        let now = Instant::now();
        self.feed.advance(now, &mut self.state);

        let enabled = self.controls_enabled();

        egui::TopBottomPanel::top("market").show(ctx, |ui| {
            self.market_table(ui);
        });

        egui::TopBottomPanel::bottom("ledger")
            .resizable(true)
            .min_height(200.0)
            .show(ctx, |ui| {
                self.text_panes(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                self.controls(ui);
            });
        });

        self.notice_window(ctx);

        // Wake up for the next price tick even without input
        ctx.request_repaint_after(self.feed.remaining(now));
    }
}
