use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::export::{export_file_name, ColumnSpec};
use super::filter::{FilterCriteria, Selection};

// ---------------------------------------------------------------------------
// Entity profiles: one place for the per-page search/filter/export setup
// ---------------------------------------------------------------------------

/// The record kinds managed by the console.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    #[default]
    Bookings,
    Payments,
    Carts,
    Promotions,
}

/// Every exact-match filter the console exposes uses this field.
pub const STATUS_FIELD: &str = "status";

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Bookings,
        Entity::Payments,
        Entity::Carts,
        Entity::Promotions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Entity::Bookings => "Bookings",
            Entity::Payments => "Payments",
            Entity::Carts => "Cart Details",
            Entity::Promotions => "Promotions",
        }
    }

    /// Lower-case name used in file names and config keys.
    pub fn slug(self) -> &'static str {
        match self {
            Entity::Bookings => "bookings",
            Entity::Payments => "payments",
            Entity::Carts => "carts",
            Entity::Promotions => "promotions",
        }
    }

    /// Fields the free-text search box looks at.
    pub fn search_fields(self) -> &'static [&'static str] {
        match self {
            Entity::Bookings => &["customer", "email", "service", "phone"],
            Entity::Payments => &["customer", "transaction_id", "booking_id", "method"],
            Entity::Carts => &["customer", "email", "items"],
            Entity::Promotions => &["code", "title"],
        }
    }

    /// Date field offered as an exact-match filter.
    pub fn date_field(self) -> &'static str {
        match self {
            Entity::Bookings | Entity::Payments => "date",
            Entity::Carts => "updated",
            Entity::Promotions => "valid_from",
        }
    }

    /// Column projection shared by the table view and the CSV export.
    pub fn columns(self) -> Vec<ColumnSpec> {
        match self {
            Entity::Bookings => vec![
                ColumnSpec::field("ID", "id"),
                ColumnSpec::field("Customer", "customer"),
                ColumnSpec::field("Email", "email"),
                ColumnSpec::field("Phone", "phone"),
                ColumnSpec::field("Service", "service"),
                ColumnSpec::date("Date", "date"),
                ColumnSpec::field("Time", "time"),
                ColumnSpec::field("Amount (₹)", "amount"),
                ColumnSpec::field("Status", STATUS_FIELD),
            ],
            Entity::Payments => vec![
                ColumnSpec::field("ID", "id"),
                ColumnSpec::field("Transaction", "transaction_id"),
                ColumnSpec::field("Booking", "booking_id"),
                ColumnSpec::field("Customer", "customer"),
                ColumnSpec::field("Method", "method"),
                ColumnSpec::date("Date", "date"),
                ColumnSpec::field("Amount (₹)", "amount"),
                ColumnSpec::field("Status", STATUS_FIELD),
            ],
            Entity::Carts => vec![
                ColumnSpec::field("ID", "id"),
                ColumnSpec::field("Customer", "customer"),
                ColumnSpec::field("Email", "email"),
                ColumnSpec::field("Items", "items"),
                ColumnSpec::field("Item Count", "item_count"),
                ColumnSpec::field("Total (₹)", "total"),
                ColumnSpec::date("Last Updated", "updated"),
                ColumnSpec::field("Status", STATUS_FIELD),
            ],
            Entity::Promotions => vec![
                ColumnSpec::field("ID", "id"),
                ColumnSpec::field("Code", "code"),
                ColumnSpec::field("Title", "title"),
                ColumnSpec::field("Discount", "discount"),
                ColumnSpec::date("Valid From", "valid_from"),
                ColumnSpec::date("Valid Until", "valid_until"),
                ColumnSpec::field("Uses", "usage_count"),
                ColumnSpec::field("Status", STATUS_FIELD),
            ],
        }
    }

    /// Fresh criteria: this entity's search fields, status and date unconstrained.
    pub fn criteria(self) -> FilterCriteria {
        FilterCriteria::new(self.search_fields().iter().copied())
            .with_exact(STATUS_FIELD, Selection::All)
            .with_exact(self.date_field(), Selection::All)
    }

    pub fn export_file_name(self, date: NaiveDate) -> String {
        export_file_name(self.slug(), date)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Entity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Entity::ALL.into_iter().find(|e| e.slug().eq_ignore_ascii_case(s)) {
            Some(entity) => Ok(entity),
            None => bail!("unknown entity '{s}'"),
        }
    }
}
