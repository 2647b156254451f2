//! FFI use-case API for the Flutter dashboard.
//!
//! # Responsibility
//! - Expose dashboard load/save/export/import/clear as sync calls.
//! - Flatten core types into plain structs the bridge can marshal.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the dashboard from storage, so derived totals are
//!   always recomputed from persisted slices.

use log::warn;
use payroll_core::db::open_db;
use payroll_core::{
    core_version as core_version_inner, default_log_level, export_file_name,
    init_logging as init_logging_inner, is_storable_amount, ping as ping_inner,
    validate_expense_ids, Dashboard, DashboardService, EmployeeInfo, ExpenseItem, FieldCategory,
    KeyValueStore, Period, SalaryField, SqliteStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "payroll_dashboard.sqlite3";
const DB_PATH_ENV: &str = "PAYROLL_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - A blank `level` selects the build's default level.
/// - Same `level + log_dir` repeated is a no-op.
/// - Returns an empty string on success, an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(resolve_level(&level), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

fn resolve_level(level: &str) -> &str {
    let trimmed = level.trim();
    if trimmed.is_empty() {
        default_log_level()
    } else {
        trimmed
    }
}

/// One salary input row.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryLine {
    /// Persisted field key, e.g. `basicSalary`.
    pub key: String,
    pub label: String,
    /// `earning|deduction|informational`.
    pub category: String,
    pub amount: f64,
}

/// One expense row as sent to and from the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub employee_name: String,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub current_period: String,
    pub salary: Vec<SalaryLine>,
    pub expenses: Vec<ExpenseRow>,
    pub gross_pay: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
    pub total_expenses: f64,
    pub remaining_balance: f64,
}

/// Load envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLoadResponse {
    pub ok: bool,
    pub view: Option<DashboardView>,
    pub message: String,
}

/// Outcome of a mutating action; `message` is shown as a transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Export envelope carrying the download name and document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub file_name: String,
    pub json: String,
    pub message: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_load() -> DashboardLoadResponse {
    match with_dashboard(|dashboard| Ok(to_view(dashboard))) {
        Ok(view) => DashboardLoadResponse {
            ok: true,
            view: Some(view),
            message: String::new(),
        },
        Err(err) => DashboardLoadResponse {
            ok: false,
            view: None,
            message: format!("dashboard_load failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_update_employee(
    name: String,
    employee_id: String,
    department: String,
    position: String,
) -> ActionResponse {
    let info = EmployeeInfo {
        name,
        employee_id,
        department,
        position,
    };
    run_action("dashboard_update_employee", |dashboard| {
        saved_or_err(dashboard.update_employee(info), "Profile saved.")
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_update_period(period: String) -> ActionResponse {
    let period = Period::new(period.trim());
    run_action("dashboard_update_period", |dashboard| {
        saved_or_err(dashboard.update_period(period), "Period updated.")
    })
}

/// Applies salary inputs and saves the slip.
///
/// Keys not listed keep their stored amount. Unknown keys and non-finite
/// amounts reject the whole call before anything is written.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_save_salary(lines: Vec<SalaryLine>) -> ActionResponse {
    run_action("dashboard_save_salary", |dashboard| {
        apply_salary_lines(dashboard, &lines)
    })
}

/// Replaces the expense list and saves it.
///
/// Rows with empty or repeated ids, or non-finite amounts, reject the whole
/// call before anything is written.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_save_expenses(rows: Vec<ExpenseRow>) -> ActionResponse {
    run_action("dashboard_save_expenses", |dashboard| {
        replace_expenses(dashboard, rows)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_export() -> ExportResponse {
    let file_name = export_file_name(chrono::Local::now().date_naive());
    match with_dashboard(|dashboard| dashboard.export_json().map_err(|err| err.to_string())) {
        Ok(json) => ExportResponse {
            ok: true,
            file_name,
            json,
            message: "Data exported.".to_string(),
        },
        Err(err) => ExportResponse {
            ok: false,
            file_name,
            json: String::new(),
            message: format!("Export failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_import(json: String) -> ActionResponse {
    run_action("dashboard_import", |dashboard| {
        dashboard
            .import_json(&json)
            .map(|()| "Data imported.".to_string())
            .map_err(|err| err.to_string())
    })
}

/// Deletes every stored slice.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_clear() -> ActionResponse {
    run_action("dashboard_clear", |dashboard| {
        if dashboard.reset() {
            Ok("All saved data has been removed.".to_string())
        } else {
            Err("some data could not be removed".to_string())
        }
    })
}

fn run_action(
    action: &'static str,
    f: impl FnOnce(&mut Dashboard<SqliteStore<'_>>) -> Result<String, String>,
) -> ActionResponse {
    match with_dashboard(f) {
        Ok(message) => ActionResponse::success(message),
        Err(err) => {
            warn!("event=ffi_action module=ffi status=error action={action}");
            ActionResponse::failure(format!("{action} failed: {err}"))
        }
    }
}

fn with_dashboard<T>(
    f: impl FnOnce(&mut Dashboard<SqliteStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("storage open failed: {err}"))?;
    let mut dashboard = Dashboard::open(DashboardService::new(SqliteStore::new(&conn)));
    f(&mut dashboard)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn saved_or_err(saved: bool, message: &str) -> Result<String, String> {
    if saved {
        Ok(message.to_string())
    } else {
        Err("change kept in memory but could not be saved".to_string())
    }
}

fn apply_salary_lines<S: KeyValueStore>(
    dashboard: &mut Dashboard<S>,
    lines: &[SalaryLine],
) -> Result<String, String> {
    let updates = lines
        .iter()
        .map(|line| {
            let field = SalaryField::from_key(&line.key)
                .ok_or_else(|| format!("unknown salary field `{}`", line.key))?;
            if !is_storable_amount(line.amount) {
                return Err(format!("amount for `{}` must be a finite number", line.key));
            }
            Ok((field, line.amount))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let editor = dashboard.salary_mut();
    editor.begin_edit();
    for (field, amount) in updates {
        editor.set_field(field, amount).map_err(|err| err.to_string())?;
    }

    match dashboard.commit_salary() {
        Some(saved) => saved_or_err(saved, "Salary slip saved."),
        None => Err("salary panel was not editing".to_string()),
    }
}

fn replace_expenses<S: KeyValueStore>(
    dashboard: &mut Dashboard<S>,
    rows: Vec<ExpenseRow>,
) -> Result<String, String> {
    if let Some(row) = rows.iter().find(|row| !is_storable_amount(row.amount)) {
        return Err(format!("amount for expense `{}` must be a finite number", row.id));
    }
    let items = rows
        .into_iter()
        .map(|row| ExpenseItem::with_id(row.id, row.name, row.amount))
        .collect::<Vec<_>>();
    validate_expense_ids(&items).map_err(|err| err.to_string())?;

    let editor = dashboard.expenses_mut();
    editor.begin_edit();
    if let Some(working) = editor.working_mut() {
        *working = items;
    }

    match dashboard.commit_expenses() {
        Some(saved) => saved_or_err(
            saved,
            &format!(
                "Expenses updated. Total monthly expenses: {}",
                dashboard.totals().total_expenses
            ),
        ),
        None => Err("expense panel was not editing".to_string()),
    }
}

fn to_view<S: KeyValueStore>(dashboard: &Dashboard<S>) -> DashboardView {
    let info = dashboard.employee_info();
    let record = dashboard.salary().committed();
    let totals = dashboard.totals();

    DashboardView {
        employee_name: info.name.clone(),
        employee_id: info.employee_id.clone(),
        department: info.department.clone(),
        position: info.position.clone(),
        current_period: dashboard.current_period().to_string(),
        salary: SalaryField::ALL
            .into_iter()
            .map(|field| SalaryLine {
                key: field.key().to_string(),
                label: field.label().to_string(),
                category: category_label(field.category()).to_string(),
                amount: record.get(field),
            })
            .collect(),
        expenses: dashboard
            .expenses()
            .committed()
            .iter()
            .map(|item| ExpenseRow {
                id: item.id.clone(),
                name: item.name.clone(),
                amount: item.amount,
            })
            .collect(),
        gross_pay: totals.gross_pay,
        total_deductions: totals.total_deductions,
        net_pay: totals.net_pay,
        total_expenses: totals.total_expenses,
        remaining_balance: totals.remaining_balance,
    }
}

fn category_label(category: FieldCategory) -> &'static str {
    match category {
        FieldCategory::Earning => "earning",
        FieldCategory::Deduction => "deduction",
        FieldCategory::Informational => "informational",
    }
}
