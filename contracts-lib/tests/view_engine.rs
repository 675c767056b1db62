//! Behavioural tests for the table view pipeline.
//!
//! These exercise search, filtering, sorting and pagination through the
//! public API only, with both open records and typed contracts as rows.

use chrono::NaiveDate;
use contracts_lib::config::TableConfig;
use contracts_lib::model::{Contract, ContractStatus, Record, RiskLevel, TableRow};
use contracts_lib::view::{Column, RowActions, TableView};

fn record(id: &str, name: &str, risk: &str) -> Record {
    Record::new()
        .set("doc_id", id)
        .set("contract_name", name)
        .set("risk_score", risk)
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("contract_name", "Contract Name"),
        Column::parties("parties", "Parties"),
        Column::date("expiry_date", "Expiry Date"),
        Column::status("status", "Status"),
        Column::risk("risk_score", "Risk Score"),
    ]
}

fn keys<R: TableRow>(rows: &[&R]) -> Vec<String> {
    rows.iter().filter_map(|row| row.row_key()).collect()
}

fn portfolio() -> Vec<Record> {
    vec![
        record("1", "Acme Corp Supply", "High").set("status", "Active"),
        record("2", "Globex Lease", "Low").set("status", "Expired"),
        record("3", "Initech Services", "High").set("status", "Expired"),
        record("4", "Acme Corp Renewal", "Medium").set("status", "Renewal Due"),
        record("5", "Umbrella NDA", "Low")
            .set("status", "Active")
            .set("owner", "Legal Team"),
    ]
}

#[test]
fn compute_view_is_deterministic() {
    let rows = portfolio();
    let mut table = TableView::new(columns()).config(TableConfig::new().with_page_size(2));
    table.set_search_term("corp");
    table.toggle_sort("contract_name");

    let first = keys(table.compute_view(&rows).rows());
    let second = keys(table.compute_view(&rows).rows());
    assert_eq!(first, second);
    assert_eq!(first, vec!["4", "1"]);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let rows = vec![
        record("a", "First", "High"),
        record("b", "Second", "Low"),
        record("c", "Third", "High"),
        record("d", "Fourth", "Low"),
    ];
    let mut table = TableView::new(columns()).config(TableConfig::new().with_paginated(false));

    table.toggle_sort("risk_score");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["a", "c", "b", "d"]);

    table.toggle_sort("risk_score");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["b", "d", "a", "c"]);
}

#[test]
fn filters_are_conjunctive() {
    let rows = portfolio();
    let mut table = TableView::new(columns());
    table.set_filter("risk_score", "High");
    table.set_filter("status", "Expired");

    let view = table.compute_view(&rows);
    assert_eq!(keys(view.rows()), vec!["3"]);
    assert_eq!(view.total_count(), 1);
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let rows = portfolio();
    let mut table = TableView::new(columns());

    table.set_search_term("acme");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["1", "4"]);

    // Fields without a column are searched too.
    table.set_search_term("LEGAL team");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["5"]);
}

#[test]
fn blank_search_returns_everything() {
    let rows = portfolio();
    let mut table = TableView::new(columns()).config(TableConfig::new().with_paginated(false));
    table.set_search_term("   ");
    assert_eq!(table.compute_view(&rows).total_count(), rows.len());
}

#[test]
fn pages_cover_the_filtered_set_exactly_once() {
    let rows: Vec<Record> = (1..=23)
        .map(|i| record(&i.to_string(), &format!("Contract {i:02}"), "Low"))
        .collect();
    let mut table = TableView::new(columns()).config(TableConfig::new().with_page_size(5));
    table.toggle_sort("contract_name");

    let total_pages = table.total_pages(&rows);
    assert_eq!(total_pages, 23usize.div_ceil(5));

    let mut seen = Vec::new();
    for page in 1..=total_pages {
        table.set_page(&rows, page);
        let view = table.compute_view(&rows);
        assert_eq!(view.current_page(), page);
        assert!(view.rows().len() <= 5);
        seen.extend(keys(view.rows()));
    }

    let expected: Vec<String> = (1..=23).map(|i| i.to_string()).collect();
    assert_eq!(seen, expected);

    let mut whole = TableView::new(columns()).config(TableConfig::new().with_paginated(false));
    whole.toggle_sort("contract_name");
    assert_eq!(seen, keys(whole.compute_view(&rows).rows()));
}

#[test]
fn rows_missing_the_sort_field_stay_in_source_order() {
    let rows = vec![
        record("a", "Alpha", "High").set("expiry_date", "2026-05-01"),
        Record::new().set("doc_id", "n1"),
        record("b", "Beta", "Low").set("expiry_date", "2026-01-01"),
        Record::new().set("doc_id", "n2"),
        record("c", "Gamma", "Low").set("expiry_date", "2026-05-01"),
    ];
    let mut table = TableView::new(columns()).config(TableConfig::new().with_paginated(false));

    table.toggle_sort("expiry_date");
    assert_eq!(
        keys(table.compute_view(&rows).rows()),
        vec!["n1", "n2", "b", "a", "c"]
    );

    table.toggle_sort("expiry_date");
    assert_eq!(
        keys(table.compute_view(&rows).rows()),
        vec!["a", "c", "b", "n1", "n2"]
    );
}

#[test]
fn risk_filter_fits_on_one_page() {
    let rows = vec![
        record("A", "Alpha", "High"),
        record("B", "Beta", "Low"),
        record("C", "Gamma", "High"),
    ];
    let mut table = TableView::new(columns()).config(TableConfig::new().with_page_size(2));
    table.set_filter("risk_score", "High");

    let view = table.compute_view(&rows);
    assert_eq!(keys(view.rows()), vec!["A", "C"]);
    assert_eq!(view.total_pages(), 1);
    assert!(!view.show_pager());
}

#[test]
fn out_of_range_page_lands_on_the_last() {
    let rows: Vec<Record> = (1..=25)
        .map(|i| record(&i.to_string(), "Bulk", "Low"))
        .collect();
    let mut table = TableView::new(columns());

    table.set_page(&rows, 999);
    let view = table.compute_view(&rows);
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.current_page(), 3);
    assert_eq!(view.summary(), "Showing 21 to 25 of 25 results");
}

#[test]
fn empty_result_has_no_pages() {
    let rows = portfolio();
    let mut table = TableView::new(columns());
    table.set_search_term("nothing like this");

    let view = table.compute_view(&rows);
    assert!(view.is_empty());
    assert_eq!(view.total_pages(), 0);
    assert_eq!(view.summary(), "Showing 0 to 0 of 0 results");
}

fn contract(
    id: &str,
    name: &str,
    expiry: (i32, u32, u32),
    status: &str,
    risk: &str,
) -> Contract {
    let mut contract = Contract::new(id);
    contract.contract_name = Some(name.to_string());
    contract.parties = Some("Acme Corp, Globex Inc".to_string());
    contract.expiry_date = NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2);
    contract.status = Some(ContractStatus::from(status.to_string()));
    contract.risk_score = Some(RiskLevel::from(risk.to_string()));
    contract
}

#[test]
fn typed_contracts_sort_by_date() {
    let rows = vec![
        contract("x", "Later", (2027, 3, 1), "Active", "Low"),
        contract("y", "Sooner", (2026, 1, 15), "Renewal Due", "Medium"),
        contract("z", "Middle", (2026, 6, 30), "Active", "High"),
    ];
    let mut table = TableView::new(columns());

    table.toggle_sort("expiry_date");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["y", "z", "x"]);

    table.set_filter("status", "Active");
    table.toggle_sort("expiry_date");
    assert_eq!(keys(table.compute_view(&rows).rows()), vec!["x", "z"]);
}

#[test]
fn typed_contracts_offer_filter_options() {
    let rows = vec![
        contract("x", "One", (2027, 3, 1), "Active", "Low"),
        contract("y", "Two", (2026, 1, 15), "Expired", "Low"),
        contract("z", "Three", (2026, 6, 30), "Active", "High"),
    ];
    let table = TableView::new(columns());

    let statuses: Vec<String> = table
        .filter_options(&rows, "status")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(statuses, vec!["Active", "Expired"]);
}

#[derive(Default)]
struct Recorder {
    viewed: Vec<String>,
    deleted: Vec<String>,
    allow_delete: bool,
}

impl<R: TableRow> RowActions<R> for Recorder {
    fn view(&mut self, row: &R) {
        self.viewed.extend(row.row_key());
    }

    fn delete(&mut self, row: &R) {
        self.deleted.extend(row.row_key());
    }

    fn supports_delete(&self) -> bool {
        self.allow_delete
    }
}

#[test]
fn row_actions_reach_the_host() {
    let rows = portfolio();
    let mut table = TableView::with_actions(columns(), Recorder::default());

    table.open_row(&rows[1]);
    assert!(!table.delete_row(&rows[1]));
    assert_eq!(table.actions().viewed, vec!["2"]);
    assert!(table.actions().deleted.is_empty());

    table.actions_mut().allow_delete = true;
    assert!(table.delete_row(&rows[2]));
    assert_eq!(table.actions().deleted, vec!["3"]);
}
