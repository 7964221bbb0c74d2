//! Browser-side data access, expressed as an explicit state container over an
//! injected API so it can run against a fake without a network.

pub mod api;
pub mod notify;
pub mod state;

pub use api::{ClientError, HttpInvestmentApi, InvestmentApi};
pub use notify::{LogNotifier, Notification, NotificationVariant, Notifier, RecordingNotifier};
pub use state::InvestmentsState;
