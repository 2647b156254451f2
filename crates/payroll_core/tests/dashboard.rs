use payroll_core::db::open_db;
use payroll_core::{
    keys, Dashboard, DashboardService, DashboardState, EmployeeInfo, ExpenseIdError, ExpenseItem,
    ImportError, KeyValueStore, MemoryStore, Period, SalaryField, SalaryRecord, SqliteStore,
};
use serde_json::{json, Value};

fn period() -> Period {
    Period::new("2025-05")
}

fn service(store: &MemoryStore) -> DashboardService<&MemoryStore> {
    DashboardService::with_default_period(store, period())
}

fn sample_employee() -> EmployeeInfo {
    EmployeeInfo {
        name: "Aminata Kamara".to_string(),
        employee_id: "E-1029".to_string(),
        department: "Finance".to_string(),
        position: "Analyst".to_string(),
    }
}

#[test]
fn first_load_yields_empty_state() {
    let store = MemoryStore::new();

    assert_eq!(service(&store).load_state(), DashboardState::empty(period()));
    assert!(store.is_empty());
}

#[test]
fn clearing_all_keys_reproduces_initial_state() {
    let store = MemoryStore::new();
    let service = service(&store);
    let initial = service.load_state();

    service.save_employee(&sample_employee());
    service.save_period(&Period::new("2024-12"));
    service.save_salary(&SalaryRecord::default().with(SalaryField::BasicSalary, 10.0));
    service.save_expenses(&[ExpenseItem::with_id("1", "Internet", 800.0)]);
    assert_eq!(store.len(), 4);

    assert!(service.clear_all());
    assert!(store.is_empty());
    assert_eq!(service.load_state(), initial);
}

#[test]
fn persisted_layout_uses_documented_keys_and_shapes() {
    let store = MemoryStore::new();
    let service = service(&store);

    service.save_employee(&sample_employee());
    service.save_period(&Period::new("2025-05"));
    service.save_salary(&SalaryRecord::default().with(SalaryField::Paye, 250_000.0));
    service.save_expenses(&[ExpenseItem::with_id("1", "Internet", 800.0)]);

    let raw = |key: &str| -> Value { serde_json::from_str(&store.raw(key).unwrap()).unwrap() };
    assert_eq!(raw(keys::EMPLOYEE_INFO)["employeeId"], "E-1029");
    assert_eq!(raw(keys::CURRENT_PERIOD), json!("2025-05"));
    assert_eq!(raw(keys::SALARY_DATA)["paye"], json!(250_000.0));
    assert_eq!(raw(keys::SALARY_DATA).as_object().unwrap().len(), 21);
    assert_eq!(
        raw(keys::EXPENSES),
        json!([{ "id": "1", "name": "Internet", "amount": 800.0 }])
    );
}

#[test]
fn malformed_slices_are_normalized_on_load() {
    let store = MemoryStore::new();
    store
        .set(keys::SALARY_DATA, r#"{"basicSalary": 500, "paye": "lots"}"#)
        .unwrap();
    store
        .set(keys::EMPLOYEE_INFO, r#"{"name": "Sam", "extra": true}"#)
        .unwrap();
    store.set(keys::CURRENT_PERIOD, "7").unwrap();
    store.set(keys::EXPENSES, "not json").unwrap();

    let state = service(&store).load_state();

    // Wrong field type invalidates the whole salary payload.
    assert_eq!(state.salary_data, SalaryRecord::default());
    assert_eq!(state.employee_info.name, "Sam");
    assert_eq!(state.employee_info.position, "");
    assert_eq!(state.current_period, period());
    assert!(state.expenses.is_empty());
}

#[test]
fn partial_salary_payload_merges_defaults_per_field() {
    let store = MemoryStore::new();
    store
        .set(keys::SALARY_DATA, r#"{"basicSalary": 2000000, "paye": 250000}"#)
        .unwrap();

    let totals = service(&store).totals();
    assert_eq!(totals.gross_pay, 2_000_000.0);
    assert_eq!(totals.total_deductions, 250_000.0);
    assert_eq!(totals.net_pay, 1_750_000.0);
}

#[test]
fn export_fills_missing_slices_with_typed_defaults() {
    let store = MemoryStore::new();
    let service = service(&store);
    service.save_expenses(&[ExpenseItem::with_id("1", "Internet", 800.0)]);

    let exported: Value = serde_json::from_str(&service.export_json().unwrap()).unwrap();

    assert_eq!(
        exported["employeeInfo"],
        json!({ "name": "", "employeeId": "", "department": "", "position": "" })
    );
    assert_eq!(exported["currentPeriod"], json!("2025-05"));
    assert_eq!(exported["salaryData"]["basicSalary"], json!(0.0));
    assert_eq!(exported["expenses"][0]["id"], "1");
    assert_eq!(store.len(), 1);
}

#[test]
fn export_then_import_restores_every_slice() {
    let source_store = MemoryStore::new();
    let source = service(&source_store);
    source.save_employee(&sample_employee());
    source.save_period(&Period::new("2025-04"));
    source.save_salary(&SalaryRecord::default().with(SalaryField::Bonus, 75_000.0));
    source.save_expenses(&[ExpenseItem::with_id("7", "Saving", 1000.0)]);
    let exported = source.export_json().unwrap();

    let target_store = MemoryStore::new();
    let target = service(&target_store);
    let imported = target.import_json(&exported).unwrap();

    assert_eq!(imported, source.load_state());
    assert_eq!(target.load_state(), source.load_state());
}

#[test]
fn import_rejects_incomplete_document_without_writing() {
    let store = MemoryStore::new();
    let service = service(&store);

    let err = service
        .import_json(r#"{"employeeInfo": {}, "salaryData": {}}"#)
        .unwrap_err();

    assert!(matches!(err, ImportError::Decode(_)));
    assert!(store.is_empty());
}

#[test]
fn import_reports_storage_failures() {
    let store = MemoryStore::unavailable();
    let service = DashboardService::with_default_period(&store, period());
    let document = serde_json::to_string(&DashboardState::empty(period())).unwrap();

    match service.import_json(&document).unwrap_err() {
        ImportError::Storage { failed_keys } => assert_eq!(failed_keys, keys::ALL.to_vec()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dashboard_persists_only_on_commit() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));

    dashboard.salary_mut().begin_edit();
    dashboard
        .salary_mut()
        .set_field(SalaryField::BasicSalary, 2_000_000.0)
        .unwrap();
    assert_eq!(store.raw(keys::SALARY_DATA), None);
    assert_eq!(dashboard.totals().gross_pay, 0.0);

    assert_eq!(dashboard.commit_salary(), Some(true));
    assert!(store.raw(keys::SALARY_DATA).is_some());
    assert_eq!(dashboard.totals().gross_pay, 2_000_000.0);

    assert_eq!(dashboard.commit_salary(), None);
}

#[test]
fn dashboard_cancel_discards_expense_edits() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));

    dashboard.expenses_mut().begin_expense_edit();
    dashboard.expenses_mut().add_item().unwrap();
    dashboard.cancel_expenses();

    assert!(dashboard.expenses().committed().is_empty());
    assert_eq!(store.raw(keys::EXPENSES), None);
    assert_eq!(dashboard.totals().total_expenses, 0.0);
}

#[test]
fn dashboard_commit_of_starter_rows_persists_them() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));

    dashboard.expenses_mut().begin_expense_edit();
    assert_eq!(dashboard.commit_expenses(), Some(true));

    let reopened = Dashboard::open(service(&store));
    assert_eq!(reopened.expenses().committed().len(), 7);
    assert_eq!(reopened.totals().total_expenses, 3860.0);
}

#[test]
fn dashboard_failed_save_keeps_in_memory_change() {
    let store = MemoryStore::unavailable();
    let mut dashboard = Dashboard::open(DashboardService::with_default_period(&store, period()));

    assert!(!dashboard.update_employee(sample_employee()));
    assert_eq!(dashboard.employee_info(), &sample_employee());

    assert!(!dashboard.update_period(Period::new("2025-09")));
    assert_eq!(dashboard.current_period().as_str(), "2025-09");
}

#[test]
fn dashboard_reset_returns_to_defaults() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));
    dashboard.update_employee(sample_employee());
    dashboard.update_period(Period::new("2023-01"));
    dashboard.salary_mut().begin_edit();
    dashboard
        .salary_mut()
        .set_field(SalaryField::Medical, 40.0)
        .unwrap();

    assert!(dashboard.reset());

    assert_eq!(dashboard.state(), DashboardState::empty(period()));
    assert!(!dashboard.salary().is_editing());
    assert!(store.is_empty());
}

#[test]
fn dashboard_import_reloads_live_state() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));
    let mut incoming = DashboardState::empty(Period::new("2025-02"));
    incoming.expenses = vec![ExpenseItem::with_id("1", "Internet", 800.0)];
    let document = serde_json::to_string(&incoming).unwrap();

    dashboard.import_json(&document).unwrap();

    assert_eq!(dashboard.state(), incoming);
    assert_eq!(dashboard.totals().total_expenses, 800.0);
}

#[test]
fn dashboard_state_survives_reopen_of_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payroll.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut dashboard = Dashboard::open(DashboardService::with_default_period(
            SqliteStore::new(&conn),
            period(),
        ));
        dashboard.update_employee(sample_employee());
        dashboard.salary_mut().begin_edit();
        dashboard
            .salary_mut()
            .set_field(SalaryField::BasicSalary, 2_000_000.0)
            .unwrap();
        dashboard
            .salary_mut()
            .set_field(SalaryField::GeneralAllowance, 300_000.0)
            .unwrap();
        dashboard
            .salary_mut()
            .set_field(SalaryField::NassitEmployee, 150_000.0)
            .unwrap();
        dashboard
            .salary_mut()
            .set_field(SalaryField::Paye, 250_000.0)
            .unwrap();
        assert_eq!(dashboard.commit_salary(), Some(true));
    }

    let conn = open_db(&path).unwrap();
    let dashboard = Dashboard::open(DashboardService::with_default_period(
        SqliteStore::new(&conn),
        period(),
    ));
    assert_eq!(dashboard.employee_info(), &sample_employee());
    let totals = dashboard.totals();
    assert_eq!(totals.gross_pay, 2_300_000.0);
    assert_eq!(totals.total_deductions, 400_000.0);
    assert_eq!(totals.net_pay, 1_900_000.0);
}

#[test]
fn non_finite_salary_commit_is_refused_and_stored_record_survives() {
    let store = MemoryStore::new();
    let mut dashboard = Dashboard::open(service(&store));
    dashboard.salary_mut().begin_edit();
    dashboard
        .salary_mut()
        .set_field(SalaryField::BasicSalary, 2_000_000.0)
        .unwrap();
    assert_eq!(dashboard.commit_salary(), Some(true));
    let stored = store.raw(keys::SALARY_DATA);

    // Direct working-copy access bypasses the setter check.
    dashboard.salary_mut().begin_edit();
    dashboard.salary_mut().working_mut().unwrap().bonus = f64::INFINITY;
    assert_eq!(dashboard.commit_salary(), Some(false));
    assert_eq!(store.raw(keys::SALARY_DATA), stored);

    let reopened = Dashboard::open(service(&store));
    assert_eq!(reopened.salary().committed().basic_salary, 2_000_000.0);
    assert_eq!(reopened.salary().committed().bonus, 0.0);
}

#[test]
fn non_finite_expense_amount_is_not_written() {
    let store = MemoryStore::new();
    let service = service(&store);

    assert!(!service.save_expenses(&[ExpenseItem::with_id("1", "Internet", f64::NAN)]));
    assert_eq!(store.raw(keys::EXPENSES), None);
}

#[test]
fn null_amounts_in_stored_slices_decode_as_zero() {
    let store = MemoryStore::new();
    store
        .set(keys::SALARY_DATA, r#"{"basicSalary": 2000000, "bonus": null}"#)
        .unwrap();
    store
        .set(
            keys::EXPENSES,
            r#"[{"id": "1", "name": "Internet", "amount": 800}, {"id": "2", "name": "Netflix", "amount": null}]"#,
        )
        .unwrap();

    let state = service(&store).load_state();

    assert_eq!(state.salary_data.basic_salary, 2_000_000.0);
    assert_eq!(state.salary_data.bonus, 0.0);
    assert_eq!(state.expenses.len(), 2);
    assert_eq!(state.expenses[1].amount, 0.0);
    assert_eq!(state.totals().total_expenses, 800.0);
}

#[test]
fn import_rejects_repeated_expense_ids_without_writing() {
    let store = MemoryStore::new();
    let service = service(&store);
    let mut incoming = DashboardState::empty(period());
    incoming.expenses = vec![
        ExpenseItem::with_id("1", "Internet", 800.0),
        ExpenseItem::with_id("1", "Netflix", 260.0),
    ];
    let document = serde_json::to_string(&incoming).unwrap();

    match service.import_json(&document).unwrap_err() {
        ImportError::InvalidExpenses(ExpenseIdError::Duplicate(id)) => assert_eq!(id, "1"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty());
}

#[test]
fn import_rejects_empty_expense_id_without_writing() {
    let store = MemoryStore::new();
    let service = service(&store);
    let mut incoming = DashboardState::empty(period());
    incoming.expenses = vec![ExpenseItem::with_id("", "Internet", 800.0)];
    let document = serde_json::to_string(&incoming).unwrap();

    assert!(matches!(
        service.import_json(&document).unwrap_err(),
        ImportError::InvalidExpenses(ExpenseIdError::Empty { index: 0 })
    ));
    assert!(store.is_empty());
}

#[test]
fn raw_export_keeps_stored_payloads_untouched() {
    let store = MemoryStore::new();
    store
        .set(keys::SALARY_DATA, r#"{"basicSalary": 500, "paye": "lots"}"#)
        .unwrap();
    let service = service(&store);

    let raw = service.export_raw().unwrap();

    assert_eq!(raw[keys::SALARY_DATA], json!({ "basicSalary": 500, "paye": "lots" }));
    assert_eq!(raw[keys::CURRENT_PERIOD], json!("2025-05"));
    assert_eq!(raw[keys::EXPENSES], json!([]));
    assert_eq!(raw[keys::EMPLOYEE_INFO]["name"], json!(""));
    assert_eq!(store.len(), 1);
}
