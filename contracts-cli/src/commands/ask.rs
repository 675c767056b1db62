use contracts_lib::api::DEFAULT_ASK_LIMIT;
use contracts_lib::api::Relevance;

use super::Context;

/// Suggestions shown at most.
const MAX_SUGGESTIONS: usize = 6;
/// Past questions shown at most.
const MAX_HISTORY: usize = 5;

pub async fn ask(ctx: &Context, question: &str, limit: Option<usize>) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let response = ctx
        .client
        .ask_with_limit(question, limit.unwrap_or(DEFAULT_ASK_LIMIT))
        .await?;

    match &response.answer {
        Some(answer) => println!("{answer}\n"),
        None => println!("No direct answer.\n"),
    }
    println!("{} supporting passages", response.total_results);

    for result in &response.results {
        let tag = match result.relevance() {
            Relevance::High => "high",
            Relevance::Medium => "medium",
            Relevance::Low => "low",
        };
        let page = result
            .page_number
            .map(|p| format!(", page {p}"))
            .unwrap_or_default();
        println!(
            "\n{}{page}  {}% relevant ({tag})",
            result.source_name(),
            result.relevance_percent()
        );
        println!("  {}", result.text_chunk.trim());
        if let Some(doc_id) = &result.doc_id {
            println!("  -> contracts show {doc_id}");
        }
    }
    Ok(())
}

pub async fn suggestions(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let suggestions = ctx.client.suggestions().await?;
    let history = ctx.client.history().await?;

    println!("Suggested questions");
    if suggestions.is_empty() {
        println!("  Upload some contracts to see personalized suggestions!");
    }
    for suggestion in suggestions.iter().take(MAX_SUGGESTIONS) {
        println!("  - {suggestion}");
    }

    println!("\nRecent questions");
    if history.is_empty() {
        println!("  No questions asked yet");
    }
    for entry in history.iter().take(MAX_HISTORY) {
        let when = entry
            .timestamp
            .map(|t| t.format(" (%Y-%m-%d)").to_string())
            .unwrap_or_default();
        let count = entry
            .results_count
            .map(|n| format!(", {n} results found"))
            .unwrap_or_default();
        println!("  - {}{count}{when}", entry.question);
    }
    Ok(())
}
