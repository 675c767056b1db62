use std::path::Path;

use anyhow::Context as _;
use contracts_lib::api::ContractDetail;
use contracts_lib::model::Contract;
use contracts_lib::model::Record;
use contracts_lib::model::TableRow;
use contracts_lib::stats::DashboardStats;
use contracts_lib::upload::format_file_size;
use contracts_lib::view::Column;
use contracts_lib::view::TableView;
use serde::Serialize;

use super::Context;
use super::confirm;
use crate::actions::CliActions;
use crate::actions::Opened;
use crate::cli::ListArgs;
use crate::table;

/// Server page size used when fetching the whole listing.
const FETCH_PAGE_SIZE: u32 = 100;

pub fn contract_columns() -> Vec<Column> {
    vec![
        Column::new("contract_name", "Contract Name"),
        Column::parties("parties", "Parties"),
        Column::date("expiry_date", "Expiry Date"),
        Column::status("status", "Status"),
        Column::risk("risk_score", "Risk Score"),
    ]
}

/// Every contract the user can see, across server pages.
async fn fetch_all(ctx: &Context) -> anyhow::Result<Vec<Contract>> {
    ctx.require_login().await?;
    let mut contracts = Vec::new();
    let mut page = 1;
    loop {
        let listing = ctx.client.list_contracts(page, FETCH_PAGE_SIZE).await?;
        let fetched = listing.documents.len();
        contracts.extend(listing.documents);
        if fetched == 0 || contracts.len() as u64 >= listing.total {
            break;
        }
        page += 1;
    }
    Ok(contracts)
}

/// Rows from a JSON file: an array of objects or a listing with `documents`.
fn read_rows(path: &Path) -> anyhow::Result<Vec<Record>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let json: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    let rows = match json {
        serde_json::Value::Object(mut listing) if listing.contains_key("documents") => listing
            .remove("documents")
            .unwrap_or(serde_json::Value::Array(Vec::new())),
        other => other,
    };
    serde_json::from_value(rows)
        .with_context(|| format!("{} does not hold an array of objects", path.display()))
}

/// Rows from a JSON file, read as typed contracts. The first row that does
/// not fit is reported with its position.
fn read_contracts(path: &Path) -> anyhow::Result<Vec<Contract>> {
    read_rows(path)?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Contract::try_from(record)
                .map_err(contracts_lib::error::Error::from)
                .with_context(|| format!("row {} of {}", index + 1, path.display()))
        })
        .collect()
}

pub async fn list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    match args.input.clone() {
        Some(path) => {
            let rows = read_rows(&path)?;
            let opened = show_table(ctx, &rows, &args)?;
            for opened in opened {
                println!("{}", serde_json::to_string_pretty(&opened.row)?);
            }
        }
        None => {
            let rows = fetch_all(ctx).await?;
            let opened = show_table(ctx, &rows, &args)?;
            for key in opened.iter().filter_map(|opened| opened.key.as_deref()) {
                show(ctx, key).await?;
            }
        }
    }
    Ok(())
}

/// Applies the list options, prints the page, and returns the rows the user
/// asked to open.
fn show_table<R: TableRow + Serialize>(
    ctx: &Context,
    rows: &[R],
    args: &ListArgs,
) -> anyhow::Result<Vec<Opened>> {
    let mut config = ctx.settings.table.clone().with_paginated(!args.all);
    if let Some(size) = args.page_size {
        config = config.with_page_size(size);
    }

    let mut table = TableView::with_actions(contract_columns(), CliActions::new()).config(config);
    if let Some(search) = &args.search {
        table.set_search_term(search.as_str());
    }
    if let Some(status) = &args.status {
        table.set_filter("status", status.as_str());
    }
    if let Some(risk) = &args.risk {
        table.set_filter("risk_score", risk.as_str());
    }
    for key in &args.sort {
        table.toggle_sort(key);
    }
    table.set_page(rows, args.page);

    if args.json {
        let view = table.compute_view(rows);
        println!("{}", serde_json::to_string_pretty(view.rows())?);
    } else {
        print!("{}", table::draw(&table.render(rows, false)));
    }

    if let Some(index) = args.open {
        let view = table.compute_view(rows);
        let row = index
            .checked_sub(1)
            .and_then(|i| view.rows().get(i).copied())
            .with_context(|| format!("no row {index} on this page"))?;
        table.open_row(row);
    }

    Ok(std::mem::take(&mut table.actions_mut().opened))
}

pub async fn show(ctx: &Context, doc_id: &str) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let detail = ctx.client.get_contract(doc_id).await?;
    print!("{}", describe(&detail));
    Ok(())
}

fn describe(detail: &ContractDetail) -> String {
    let doc = &detail.document;
    let mut out = String::new();
    let mut field = |label: &str, value: String| {
        out.push_str(&format!("{label:<14}{value}\n"));
    };

    field("Contract", doc.display_name().to_string());
    field("Id", doc.doc_id.clone());
    field(
        "Parties",
        doc.parties.clone().unwrap_or_else(|| "Not specified".into()),
    );
    field(
        "Expiry",
        doc.expiry_date
            .map_or("Not specified".into(), |d| d.format("%b %d, %Y").to_string()),
    );
    field(
        "Status",
        doc.status.as_ref().map_or("-".into(), ToString::to_string),
    );
    field(
        "Risk",
        doc.risk_score.as_ref().map_or("-".into(), ToString::to_string),
    );
    if let Some(size) = doc.extra.get("file_size").and_then(|v| match v {
        contracts_lib::model::Value::Int(n) => u64::try_from(*n).ok(),
        _ => None,
    }) {
        field("File size", format_file_size(size));
    }
    field("Chunks", detail.total_chunks.to_string());

    out.push_str(&format!("\nKey clauses ({})\n", detail.clauses.len()));
    for clause in &detail.clauses {
        let confidence = clause
            .confidence
            .map(|c| format!(" ({}% confidence)", (c * 100.0).round()))
            .unwrap_or_default();
        out.push_str(&format!(
            "  - {}{confidence}\n",
            clause.title.as_deref().unwrap_or("Untitled clause")
        ));
    }

    out.push_str(&format!("\nInsights ({})\n", detail.insights.len()));
    for insight in detail.risks().chain(detail.recommendations()) {
        let severity = insight
            .severity
            .as_deref()
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        out.push_str(&format!(
            "  - {}{severity}: {}\n",
            insight.title.as_deref().unwrap_or("Insight"),
            insight.description.as_deref().unwrap_or("")
        ));
    }
    out
}

pub async fn delete(ctx: &Context, doc_id: &str, yes: bool) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let detail = ctx.client.get_contract(doc_id).await?;
    let contract = detail.document;

    let prompt = format!(
        "Are you sure you want to delete \"{}\"?",
        contract.display_name()
    );
    if !yes && !confirm(&prompt)? {
        println!("Cancelled");
        return Ok(());
    }

    let mut table = TableView::with_actions(contract_columns(), CliActions::with_delete());
    table.delete_row(&contract);
    for key in std::mem::take(&mut table.actions_mut().deletions) {
        ctx.client.delete_contract(&key).await?;
    }
    println!("Contract deleted successfully");
    Ok(())
}

pub async fn stats(ctx: &Context, input: Option<&Path>) -> anyhow::Result<()> {
    let stats = match input {
        Some(path) => DashboardStats::from_rows(&read_contracts(path)?),
        None => DashboardStats::from_rows(&fetch_all(ctx).await?),
    };
    println!("Total Contracts  {}", stats.total);
    println!("Active           {}", stats.active);
    println!("Renewal Due      {}", stats.renewal_due);
    println!("Expired          {}", stats.expired);
    println!("High Risk        {}", stats.high_risk);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_or_listing() {
        let dir = tempfile::TempDir::new().unwrap();
        let array = dir.path().join("rows.json");
        std::fs::write(&array, r#"[{"contract_name":"NDA"},{"contract_name":"MSA"}]"#).unwrap();
        assert_eq!(read_rows(&array).unwrap().len(), 2);

        let listing = dir.path().join("listing.json");
        std::fs::write(&listing, r#"{"documents":[{"doc_id":"d1"}],"total":1}"#).unwrap();
        let rows = read_rows(&listing).unwrap();
        assert_eq!(rows[0].require_str("doc_id").unwrap(), "d1");
    }

    #[test]
    fn typed_rows_name_the_bad_row() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(
            &path,
            r#"[{"doc_id":"d1","status":"active"},{"doc_id":"d2","status":7}]"#,
        )
        .unwrap();

        let err = read_contracts(&path).unwrap_err();
        assert!(format!("{err:#}").starts_with("row 2 of"));
        assert!(err.downcast_ref::<contracts_lib::error::Error>().is_some());

        std::fs::write(&path, r#"[{"doc_id":"d1","status":"active"}]"#).unwrap();
        let stats = DashboardStats::from_rows(&read_contracts(&path).unwrap());
        assert_eq!(stats.active, 1);
    }

    #[test]
    fn describes_detail() {
        let detail: ContractDetail = serde_json::from_str(
            r#"{"document":{"doc_id":"d1","contract_name":"NDA","expiry_date":"2026-01-31","file_size":2048},
                "clauses":[{"title":"Termination","confidence":0.9}],
                "insights":[{"type":"risk","title":"Auto-renewal","description":"Silent","severity":"high"}],
                "total_chunks":3}"#,
        )
        .unwrap();
        let text = describe(&detail);
        assert!(text.contains("Jan 31, 2026"));
        assert!(text.contains("2 KB"));
        assert!(text.contains("Termination (90% confidence)"));
        assert!(text.contains("Auto-renewal [high]: Silent"));
    }
}
