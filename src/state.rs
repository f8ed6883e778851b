use crate::data::filter::{filtered_indices, QueryState};
use crate::data::model::{Column, CoverageBand, Inventory, LoadOrigin, Record};
use crate::data::sort::{sort_indices, SortState};
use crate::data::summary::{
    classification_chips, classification_summary, compute_kpis, Chip, ClassSummary, Kpis,
};
use crate::format::format_count;
use crate::source::LoadFailure;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Everything that can change the dashboard.
#[derive(Debug, Clone)]
pub enum Command {
    /// A load was triggered; carries the source description.
    LoadStarted(String),
    Loaded(Inventory),
    LoadFailed(LoadFailure),
    SetSearch(String),
    ToggleClassification(String),
    SetCoverage(CoverageBand),
    ClearFilters,
    /// Header click. `numeric_hint` forces numeric comparison.
    SortBy { column: Column, numeric_hint: bool },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::LoadStarted(_) => "load-started",
            Command::Loaded(_) => "loaded",
            Command::LoadFailed(_) => "load-failed",
            Command::SetSearch(_) => "set-search",
            Command::ToggleClassification(_) => "toggle-classification",
            Command::SetCoverage(_) => "set-coverage",
            Command::ClearFilters => "clear-filters",
            Command::SortBy { .. } => "sort-by",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// What the UI draws: recomputed whenever the inventory, query or sort
/// changes. `revision` increases with every recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Filtered and sorted indices into the inventory.
    pub rows: Vec<usize>,
    pub kpis: Kpis,
    pub summary: Vec<ClassSummary>,
    pub chips: Vec<Chip>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(s) | StatusMessage::Error(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Loaded inventory (None until the first successful load).
    pub inventory: Option<Inventory>,

    pub query: QueryState,

    pub sort: SortState,

    /// Numeric hint given with the last header click.
    pub sort_numeric_hint: bool,

    /// Derived rows, KPIs, summary and chips.
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status: Option<StatusMessage>,

    /// Loads started but not yet finished.
    pub pending_loads: usize,
}

impl AppState {
    /// Apply one command and return the resulting state.
    pub fn apply(mut self, command: Command) -> AppState {
        log::debug!("command {}", command.name());

        match command {
            Command::LoadStarted(description) => {
                self.pending_loads += 1;
                self.status = Some(StatusMessage::Info(format!(
                    "Loading CSV ({description})…"
                )));
                return self;
            }
            Command::LoadFailed(failure) => {
                // Previous data, if any, stays on screen.
                self.finish_load();
                self.status = Some(StatusMessage::Error(failure.message));
                return self;
            }
            Command::Loaded(inventory) => self.set_inventory(inventory),
            Command::SetSearch(term) => self.query.set_search(&term),
            Command::ToggleClassification(value) => self.query.toggle_classification(&value),
            Command::SetCoverage(band) => self.query.coverage = band,
            Command::ClearFilters => self.query.clear(),
            Command::SortBy {
                column,
                numeric_hint,
            } => {
                self.sort.select(column);
                self.sort_numeric_hint = numeric_hint;
            }
        }

        self.refresh();
        self
    }

    /// Whether any load is still running.
    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    fn finish_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
    }

    /// Replace the inventory wholesale and reset sorting. Query state,
    /// including chip selections, carries over.
    fn set_inventory(&mut self, inventory: Inventory) {
        let rows = format_count(inventory.len());
        let message = match &inventory.origin {
            LoadOrigin::Startup(_) => format!("CSV loaded automatically ({rows} rows)."),
            LoadOrigin::Manual(_) => format!("File loaded manually ({rows} rows)."),
        };
        log::info!("{message}");

        self.sort.reset();
        self.sort_numeric_hint = false;
        self.inventory = Some(inventory);
        self.status = Some(StatusMessage::Info(message));
        self.finish_load();
    }

    /// Recompute the derived view from inventory, query and sort state.
    fn refresh(&mut self) {
        let revision = self.view.revision + 1;
        self.view = match &self.inventory {
            Some(inventory) => {
                let records = &inventory.records;
                let mut rows = filtered_indices(records, &self.query);
                if let Some(column) = self.sort.key {
                    sort_indices(
                        records,
                        &mut rows,
                        column,
                        self.sort.direction,
                        self.sort_numeric_hint,
                    );
                }
                let visible = || rows.iter().map(move |&i| &records[i]);
                DashboardView {
                    kpis: compute_kpis(visible(), records.len()),
                    summary: classification_summary(visible()),
                    chips: classification_chips(records, &self.query.classifications),
                    rows,
                    revision,
                }
            }
            None => DashboardView {
                revision,
                ..DashboardView::default()
            },
        };
    }

    /// Records of the current view, in display order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        let records = self
            .inventory
            .as_ref()
            .map(|inv| inv.records.as_slice())
            .unwrap_or(&[]);
        self.view.rows.iter().filter_map(move |&i| records.get(i))
    }

    /// Size of the whole inventory.
    pub fn total_records(&self) -> usize {
        self.inventory.as_ref().map_or(0, Inventory::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sort::SortDirection;

    fn rec(codigo: &str, clasif: &str, inv: f64, cobertura_mes: f64) -> Record {
        Record {
            codigo: codigo.to_string(),
            clasificacion: clasif.to_string(),
            inv,
            cobertura_mes,
            cobertura_dias_30: cobertura_mes * 30.0,
            ..Record::default()
        }
    }

    fn loaded() -> AppState {
        let inventory = Inventory::new(
            vec![
                rec("P3", "B", 30.0, 0.5),
                rec("P1", "A", 10.0, 2.0),
                rec("P2", "A", 20.0, 4.0),
            ],
            LoadOrigin::Startup("inventario.csv".into()),
        );
        AppState::default().apply(Command::Loaded(inventory))
    }

    fn codes(state: &AppState) -> Vec<String> {
        state.visible_records().map(|r| r.codigo.clone()).collect()
    }

    #[test]
    fn load_populates_view_and_status() {
        let state = loaded();
        assert_eq!(codes(&state), vec!["P3", "P1", "P2"]);
        assert_eq!(state.view.kpis.total, 3);
        assert_eq!(state.view.kpis.inventory, 60.0);
        assert_eq!(state.view.chips.len(), 2);
        assert_eq!(
            state.status,
            Some(StatusMessage::Info("CSV loaded automatically (3 rows).".into()))
        );
        assert!(!state.is_loading());
        assert_eq!(state.view.revision, 1);
    }

    #[test]
    fn filters_and_sort_flow_through_view() {
        let state = loaded()
            .apply(Command::ToggleClassification("A".into()))
            .apply(Command::SortBy {
                column: Column::Inv,
                numeric_hint: true,
            });
        assert_eq!(codes(&state), vec!["P1", "P2"]);
        assert_eq!(state.view.kpis.filtered, 2);
        assert_eq!(state.view.kpis.total, 3);

        let state = state.apply(Command::SortBy {
            column: Column::Inv,
            numeric_hint: true,
        });
        assert_eq!(state.sort.direction, SortDirection::Descending);
        assert_eq!(codes(&state), vec!["P2", "P1"]);

        let state = state.apply(Command::SetCoverage(CoverageBand::Alto));
        assert_eq!(codes(&state), vec!["P2"]);

        let state = state.apply(Command::ClearFilters);
        assert_eq!(codes(&state), vec!["P3", "P2", "P1"]);
    }

    #[test]
    fn search_command_lowercases() {
        let state = loaded().apply(Command::SetSearch("p2".into()));
        assert_eq!(codes(&state), vec!["P2"]);
        let state = state.apply(Command::SetSearch("P1".into()));
        assert_eq!(state.query.search, "p1");
        assert_eq!(codes(&state), vec!["P1"]);
    }

    #[test]
    fn reload_resets_sort_and_keeps_query() {
        let state = loaded()
            .apply(Command::ToggleClassification("B".into()))
            .apply(Command::SetSearch("p".into()))
            .apply(Command::SortBy {
                column: Column::Codigo,
                numeric_hint: false,
            });

        let replacement = Inventory::new(
            vec![rec("Q1", "A", 1.0, 1.0)],
            LoadOrigin::Manual("nuevo.csv".into()),
        );
        let state = state.apply(Command::Loaded(replacement));
        assert_eq!(state.sort, SortState::default());
        assert!(state.query.classifications.contains("B"));
        assert_eq!(state.query.search, "p");
        assert_eq!(state.total_records(), 1);
        assert!(codes(&state).is_empty());
        assert_eq!(state.view.kpis.filtered, 0);

        let stale = state.view.chips.iter().find(|c| c.value == "B");
        assert_eq!(
            stale,
            Some(&Chip {
                value: "B".into(),
                count: 0,
                active: true,
            })
        );

        let state = state.apply(Command::ToggleClassification("B".into()));
        assert!(state.query.classifications.is_empty());
        assert_eq!(state.view.chips.len(), 1);
        assert_eq!(
            state.status,
            Some(StatusMessage::Info("File loaded manually (1 rows).".into()))
        );
    }

    #[test]
    fn failed_load_keeps_stale_data() {
        let state = loaded()
            .apply(Command::LoadStarted("inventario.csv".into()))
            .apply(Command::LoadFailed(LoadFailure {
                message: "HTTP 404 while reading inventario.csv".into(),
            }));
        assert!(!state.is_loading());
        assert_eq!(state.total_records(), 3);
        assert_eq!(codes(&state).len(), 3);
        assert!(matches!(state.status, Some(StatusMessage::Error(_))));
    }

    #[test]
    fn overlapping_loads_stay_busy_until_the_last_finishes() {
        let state = AppState::default()
            .apply(Command::LoadStarted("inventario.csv".into()))
            .apply(Command::LoadStarted("nuevo.csv".into()));
        assert_eq!(state.pending_loads, 2);

        let state = state.apply(Command::Loaded(Inventory::new(
            vec![rec("P1", "A", 1.0, 1.0)],
            LoadOrigin::Startup("inventario.csv".into()),
        )));
        assert!(state.is_loading());

        let state = state.apply(Command::LoadFailed(LoadFailure {
            message: "Could not load 'nuevo.csv'".into(),
        }));
        assert!(!state.is_loading());
        assert_eq!(state.total_records(), 1);
    }

    #[test]
    fn commands_before_any_load_are_harmless() {
        let state = AppState::default()
            .apply(Command::SetSearch("x".into()))
            .apply(Command::SortBy {
                column: Column::Inv,
                numeric_hint: true,
            });
        assert!(state.view.rows.is_empty());
        assert_eq!(state.view.kpis, Kpis::default());
        assert_eq!(state.view.revision, 2);
        assert_eq!(state.total_records(), 0);
    }
}
