use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui;

use crate::color::ClassColors;
use crate::source::{spawn_load, CsvSource, LoadFailure, LoadJob, LoadOutcome};
use crate::state::{AppState, Command};
use crate::ui::{panels, table, UiEvent};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InventoryApp {
    pub state: AppState,
    startup: CsvSource,
    /// Loads still running; each yields exactly one outcome.
    pending: Vec<Receiver<LoadOutcome>>,
    class_colors: ClassColors,
    /// Search box text as typed.
    search_input: String,
    seen_revision: u64,
}

impl InventoryApp {
    /// Create the app and start loading the startup CSV.
    pub fn new(ctx: &egui::Context, startup: CsvSource) -> Self {
        let mut app = InventoryApp {
            state: AppState::default(),
            startup: startup.clone(),
            pending: Vec::new(),
            class_colors: ClassColors::default(),
            search_input: String::new(),
            seen_revision: 0,
        };
        app.start_load(ctx, LoadJob::Startup(startup));
        app
    }

    fn dispatch(&mut self, command: Command) {
        self.state = std::mem::take(&mut self.state).apply(command);
    }

    fn start_load(&mut self, ctx: &egui::Context, job: LoadJob) {
        log::info!("Loading {}", job.describe());
        self.dispatch(Command::LoadStarted(job.describe()));
        let ctx = ctx.clone();
        self.pending.push(spawn_load(job, move || ctx.request_repaint()));
    }

    /// Apply finished loads in arrival order; the last one wins.
    fn poll_loads(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|rx| match rx.try_recv() {
            Ok(outcome) => {
                finished.push(outcome);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                log::error!("Loader thread exited without a result");
                finished.push(Err(LoadFailure {
                    message: "Loading stopped unexpectedly.".to_string(),
                }));
                false
            }
        });

        for outcome in finished {
            match outcome {
                Ok(inventory) => self.dispatch(Command::Loaded(inventory)),
                Err(failure) => self.dispatch(Command::LoadFailed(failure)),
            }
        }
    }

    /// React to a recomputed view.
    fn observe_view(&mut self) {
        let view = &self.state.view;
        if view.revision == self.seen_revision {
            return;
        }
        self.seen_revision = view.revision;
        self.class_colors = ClassColors::new(view.chips.iter().map(|c| c.value.as_str()));
        log::debug!(
            "view #{}: {} of {} rows",
            view.revision,
            view.kpis.filtered,
            view.kpis.total
        );
    }

    fn open_file_dialog(&mut self, ctx: &egui::Context) {
        let file: Option<PathBuf> = rfd::FileDialog::new()
            .set_title("Open inventory CSV")
            .add_filter("CSV", &["csv", "txt"])
            .pick_file();

        if let Some(path) = file {
            self.start_load(ctx, LoadJob::Manual(path));
        }
    }

    fn handle(&mut self, ctx: &egui::Context, event: UiEvent) {
        match event {
            UiEvent::Command(command) => self.dispatch(command),
            UiEvent::OpenFile => self.open_file_dialog(ctx),
            UiEvent::Reload => self.start_load(ctx, LoadJob::Startup(self.startup.clone())),
        }
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        self.observe_view();

        let mut events = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut events);
        });

        // ---- Left side panel: filters and summary ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(
                    ui,
                    &self.state,
                    &self.class_colors,
                    &mut self.search_input,
                    &mut events,
                );
            });

        // ---- Central panel: KPIs and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::kpi_cards(ui, &self.state);
            ui.separator();
            table::inventory_table(ui, &self.state, &self.class_colors, &mut events);
        });

        for event in events {
            self.handle(ctx, event);
        }
    }
}
