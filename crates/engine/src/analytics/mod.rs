//! Stateless analytics over vehicle records.
//!
//! Every function here is pure: it borrows the records it is given and
//! returns new values. Nothing reads a clock or the store, so callers must
//! pass a consistent snapshot (and `now` where time matters).
//!
//! No function fails. Inputs that do not allow a computation degrade to a
//! sentinel: `0.0` for efficiency and cost per km, `None` for best/worst,
//! empty vectors for rollups. A `0.0` efficiency means "not computable",
//! never a real zero.

mod dashboard;
mod efficiency;
mod expenses;
mod odometer;
mod ownership;
mod service;

pub use dashboard::{
    QuickStats, ReminderStatus, TripSummary, VehicleRecords, VehicleReport, quick_stats,
    trip_summary, upcoming_reminders,
};
pub use efficiency::{
    BestWorst, FuelEfficiencyData, best_worst_fuel_economy, calculate_cost_per_km,
    calculate_fuel_efficiency, fuel_efficiency_trend,
};
pub use expenses::{
    ExpenseAlert, MaintenanceCostData, MonthlyExpenseData, YearMonth, maintenance_cost_breakdown,
    monthly_expenses, should_trigger_expense_alert,
};
pub use odometer::{OdometerValidation, validate_odometer};
pub use ownership::{TotalCostOfOwnership, total_cost_of_ownership};
pub use service::{SERVICE_INTERVALS, ServiceSuggestion, SuggestionReason, suggest_next_service};
