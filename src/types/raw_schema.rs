//! Column names of the raw daily-observation table, exactly as the
//! Environment and Climate Change Canada bulk CSV service emits them.
//!
//! These names are an external contract with the data provider; the feature
//! engineering step looks its inputs up by these strings verbatim.

/// Calendar date of the observation, formatted `YYYY-MM-DD`.
pub const RAW_DATE_COLUMN: &str = "Date/Time";

/// Total daily precipitation in millimeters. Empty cells mean "no reading".
pub const RAW_PRECIP_COLUMN: &str = "Total Precip (mm)";

/// Mean daily temperature in degrees Celsius. Empty cells mean "no reading".
pub const RAW_MEAN_TEMP_COLUMN: &str = "Mean Temp (°C)";

/// Every column the feature engineering boundary requires, in one place so
/// schema validation and error messages stay in sync.
pub const REQUIRED_RAW_COLUMNS: [&str; 3] =
    [RAW_DATE_COLUMN, RAW_PRECIP_COLUMN, RAW_MEAN_TEMP_COLUMN];
