//! Report projections: store contents shaped for JSON/XML and HTML views.
//!
//! Every projection opens its own connection through [`RacerStore`] and scans
//! the table in store-native order.

use crate::error::{ReportError, ReportResult};
use crate::storage::RacerStore;
use crate::types::{DriverMap, DriverStatistic, RacerStats, SortOrder};

/// Separator used between fields of a single driver statistic.
pub const STATISTIC_SEPARATOR: &str = " |";

/// Full report keyed by driver code.
///
/// # Returns
/// Map of code -> `{position, racer_name, team, time}`, in store order
pub fn full_report_as_mapping(store: &RacerStore) -> ReportResult<DriverMap<RacerStats>> {
    let racers = store.open()?.get_racers()?;
    Ok(racers.into_iter().map(|r| r.into_entry()).collect())
}

/// Full report as display lines, one per racer, without the driver code.
///
/// # Arguments
/// * `store` - Results database
/// * `sep` - Separator placed between position, name, team and time
pub fn full_report_as_lines(store: &RacerStore, sep: &str) -> ReportResult<Vec<String>> {
    let racers = store.open()?.get_racers()?;
    Ok(racers
        .into_iter()
        .map(|r| r.into_entry().1.to_line(sep))
        .collect())
}

/// Driver code -> full name, in store order.
pub fn driver_directory(store: &RacerStore) -> ReportResult<DriverMap<String>> {
    let names = store.open()?.get_driver_names()?;
    Ok(names.into_iter().collect())
}

/// Statistic for a single driver.
///
/// # Returns
/// `{name, driver_statistic: "position |team |time"}`, or
/// [`ReportError::DriverNotFound`] when no record has this exact code
pub fn driver_statistic(store: &RacerStore, code: &str) -> ReportResult<DriverStatistic> {
    let racer = store
        .open()?
        .get_racer(code)?
        .ok_or_else(|| ReportError::DriverNotFound(code.to_string()))?;

    let driver_statistic = [racer.position.to_string(), racer.team, racer.time]
        .join(STATISTIC_SEPARATOR);

    Ok(DriverStatistic {
        name: racer.racer_name,
        driver_statistic,
    })
}

/// Insert a border after the best results, then apply the requested order.
///
/// The border is placed at a fixed index and assumes store order already
/// matches finishing order. With fewer lines than `best_results`, the border
/// goes last. `Desc` reverses the whole sequence, border included.
///
/// # Arguments
/// * `lines` - Report lines in store order
/// * `best_results` - Index at which the border is inserted
/// * `border_length` - Number of `-` characters in the border
/// * `order` - Final ordering
pub fn sectioned_lines(
    mut lines: Vec<String>,
    best_results: usize,
    border_length: usize,
    order: SortOrder,
) -> Vec<String> {
    let index = best_results.min(lines.len());
    lines.insert(index, "-".repeat(border_length));

    if order == SortOrder::Desc {
        lines.reverse();
    }
    lines
}
