use log::debug;
use std::sync::Arc;

use crate::analysis::CacheManager;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::FilterSelection;
use crate::types::{CacheKey, Transaction};

use super::report::{build_report, build_report_async, DashboardReport};

/// Dashboard session state: the loaded dataset, the active configuration and
/// a memo of reports keyed by filter selection.
pub struct DashboardState {
    records: Arc<[Transaction]>,
    config: DashboardConfig,
    report_cache: CacheManager<Arc<DashboardReport>>,
}

impl DashboardState {
    pub fn new(records: Vec<Transaction>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            records: records.into(),
            config,
            report_cache: CacheManager::new(),
        })
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Replace the configuration. Cached reports for the previous
    /// configuration stay keyed by its fingerprint and age out of the cache.
    pub fn set_config(&mut self, config: DashboardConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The selection covering the whole dataset, used when filters are reset.
    pub fn default_selection(&self) -> Option<FilterSelection> {
        FilterSelection::all_from(&self.records)
    }

    fn cache_key(&self, selection: &FilterSelection) -> CacheKey {
        CacheKey {
            selection: selection.fingerprint(),
            config: self.config.fingerprint(),
        }
    }

    /// Get a cached report for the given selection under the current configuration
    pub fn get_cached_report(&mut self, selection: &FilterSelection) -> Option<Arc<DashboardReport>> {
        let key = self.cache_key(selection);
        self.report_cache.get(&key).cloned()
    }

    /// Filter the dataset and compute every view, reusing a cached report
    /// for a selection seen before.
    pub fn report_for(&mut self, selection: &FilterSelection) -> Result<Arc<DashboardReport>> {
        if let Some(report) = self.get_cached_report(selection) {
            return Ok(report);
        }

        let filtered = selection.apply(&self.records)?;
        debug!(
            "Selection kept {} of {} records",
            filtered.len(),
            self.records.len()
        );
        let report = Arc::new(build_report(&filtered, &self.config)?);
        self.report_cache.store(self.cache_key(selection), Arc::clone(&report));
        Ok(report)
    }

    /// Async counterpart of [`DashboardState::report_for`].
    pub async fn report_for_async(
        &mut self,
        selection: &FilterSelection,
    ) -> Result<Arc<DashboardReport>> {
        if let Some(report) = self.get_cached_report(selection) {
            return Ok(report);
        }

        let filtered: Arc<[Transaction]> = selection.apply(&self.records)?.into();
        let report = Arc::new(build_report_async(filtered, self.config.clone()).await?);
        self.report_cache.store(self.cache_key(selection), Arc::clone(&report));
        Ok(report)
    }

    pub fn cached_reports(&self) -> usize {
        self.report_cache.len()
    }

    /// Clear the report cache
    pub fn clear_cache(&mut self) {
        self.report_cache.clear();
    }
}
