//! View models behind the dashboard screens. Everything here is a pure
//! function of the rows held by [`crate::client::InvestmentsState`].

pub mod chart;
pub mod form;
pub mod format;
pub mod summary;
pub mod table;

pub use chart::{chart_slices, ChartSlice};
pub use form::InvestmentForm;
pub use format::{format_brl, format_date_br};
pub use summary::DashboardSummary;
pub use table::{InvestmentTable, TableRow};
