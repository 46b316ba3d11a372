use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use opsdesk::config::Config;
use opsdesk::data::date::ISO_FORMAT;
use opsdesk::data::entity::STATUS_FIELD;
use opsdesk::data::model::ColumnIndex;
use opsdesk::data::{loader, sample};
use opsdesk::{
    filtered_indices, write_csv, ColumnSpec, Entity, FilterCriteria, MemoryStore, Record,
    RecordStore, Selection, Value,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Tab currently shown.
    pub active: Entity,

    /// One store per entity.
    stores: BTreeMap<Entity, MemoryStore>,

    /// Filter criteria per entity, kept when switching tabs.
    criteria: BTreeMap<Entity, FilterCriteria>,

    /// Column projection of the active entity.
    pub columns: Vec<ColumnSpec>,

    /// Distinct values per column of the active store.
    pub index: ColumnIndex,

    /// Indices into the active store passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Status badge colours for the active entity.
    pub color_map: Option<ColorMap>,

    /// Day shown by the date picker while the date filter is enabled.
    pub picked_date: NaiveDate,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the stores from the configured data files, falling back to the
    /// built-in samples for entities without one (or whose file fails to load).
    pub fn new(config: Config, today: NaiveDate) -> Self {
        let mut status_message = None;
        let stores = Entity::ALL
            .into_iter()
            .map(|entity| {
                let records = match config.data_files.get(&entity) {
                    Some(path) => load_entity_file(entity, path).unwrap_or_else(|e| {
                        log::error!("Failed to load {entity} data: {e:#}");
                        status_message = Some(format!("Error: {e:#}"));
                        sample::records(entity)
                    }),
                    None => sample::records(entity),
                };
                (entity, MemoryStore::new(records))
            })
            .collect();
        let criteria = Entity::ALL.into_iter().map(|e| (e, e.criteria())).collect();

        let mut state = AppState {
            active: config.default_entity,
            config,
            stores,
            criteria,
            columns: Vec::new(),
            index: ColumnIndex::default(),
            visible_indices: Vec::new(),
            color_map: None,
            picked_date: today,
            status_message,
        };
        state.set_active(state.active);
        state
    }

    fn store(&self) -> &MemoryStore {
        &self.stores[&self.active]
    }

    fn store_mut(&mut self) -> &mut MemoryStore {
        self.stores.entry(self.active).or_default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria[&self.active]
    }

    fn criteria_mut(&mut self) -> &mut FilterCriteria {
        let active = self.active;
        self.criteria.entry(active).or_insert_with(|| active.criteria())
    }

    /// All records of the active entity.
    pub fn records(&self) -> &[Record] {
        self.store().get()
    }

    /// Records of the active entity that pass the current filters.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        let records = self.records();
        self.visible_indices.iter().map(move |&i| &records[i])
    }

    /// Switch tabs and rebuild everything derived from the active store.
    pub fn set_active(&mut self, entity: Entity) {
        self.active = entity;
        self.columns = entity.columns();
        self.reindex();
    }

    /// Recompute column index and colours after the store changed.
    fn reindex(&mut self) {
        self.index = ColumnIndex::build(self.records());
        self.color_map = self.index.unique_values.get(STATUS_FIELD).map(ColorMap::new);
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.records(), self.criteria());
    }

    pub fn set_search(&mut self, text: String) {
        self.criteria_mut().search_text = text;
        self.refilter();
    }

    pub fn status_selection(&self) -> Selection {
        self.criteria()
            .exact_match
            .get(STATUS_FIELD)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_status(&mut self, selection: Selection) {
        self.criteria_mut()
            .exact_match
            .insert(STATUS_FIELD.to_string(), selection);
        self.refilter();
    }

    /// Day the date filter is pinned to, if enabled.
    pub fn date_filter(&self) -> Option<NaiveDate> {
        match self.criteria().exact_match.get(self.active.date_field()) {
            Some(Selection::Only(iso)) => NaiveDate::parse_from_str(iso, ISO_FORMAT).ok(),
            _ => None,
        }
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        let selection = match date {
            Some(d) => Selection::Only(d.format(ISO_FORMAT).to_string()),
            None => Selection::All,
        };
        let field = self.active.date_field().to_string();
        self.criteria_mut().exact_match.insert(field, selection);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.criteria_mut().clear();
        self.refilter();
    }

    /// Distinct status values of the active store, for the dropdown.
    pub fn status_options(&self) -> Vec<String> {
        self.index.distinct_text(STATUS_FIELD)
    }

    /// Replace the active store with the contents of `path`.
    pub fn load_into_active(&mut self, path: &Path) -> Result<()> {
        let records = load_entity_file(self.active, path)?;
        self.store_mut().set(records);
        self.reindex();
        self.status_message = None;
        Ok(())
    }

    /// Remove a record of the active entity by id.
    pub fn delete_record(&mut self, id: &Value) -> Option<Record> {
        let removed = self.store_mut().remove(id);
        match &removed {
            Some(_) => log::info!("Deleted {} record {id}", self.active.slug()),
            None => log::warn!("No {} record with id {id}", self.active.slug()),
        }
        self.reindex();
        removed
    }

    pub fn export_file_name(&self, today: NaiveDate) -> String {
        self.active.export_file_name(today)
    }

    /// Write the visible (or all) records of the active entity as CSV.
    pub fn export_to(&self, path: &Path, visible_only: bool) -> Result<usize> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let rows = if visible_only {
            self.visible_indices.len()
        } else {
            self.records().len()
        };
        if visible_only {
            write_csv(file, self.visible_records(), &self.columns)
        } else {
            write_csv(file, self.records(), &self.columns)
        }
        .with_context(|| format!("exporting to {}", path.display()))?;
        log::info!("Exported {rows} {} records to {}", self.active.slug(), path.display());
        Ok(rows)
    }
}

/// Load a data file for `entity`, accepting the entity's own CSV exports.
fn load_entity_file(entity: Entity, path: &Path) -> Result<Vec<Record>> {
    let records = loader::load_file(path)?;
    Ok(loader::restore_fields(records, &entity.columns()))
}
