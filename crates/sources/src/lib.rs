//! rg-rows-sources: Row source implementations for rg-Rows list providers.

mod month_end;
mod weekday_dates;
mod weekday_names;

pub use month_end::{month_end, MonthEndConfig, MonthEndSource};
pub use weekday_dates::{next_weekday_on_or_after, WeekdayDatesConfig, WeekdayDatesSource, STRIDE_FIELD};
pub use weekday_names::{NameStyle, WeekdayNamesConfig, WeekdayNamesSource};

use rg_rows_core::Registry;

/// Register all built-in sources with a registry
pub fn register_all(registry: &mut Registry) {
    registry.register_source_with_info("weekday_dates", "Weekday Dates", || {
        Box::new(WeekdayDatesSource::new())
    });

    registry.register_source_with_info("month_end", "Month End", || Box::new(MonthEndSource::new()));

    registry.register_source_with_info("weekday_names", "Weekday Names", || {
        Box::new(WeekdayNamesSource::new())
    });
}
