use std::path::Path;

use contracts_lib::api::UploadMetadata;
use contracts_lib::upload::FileStatus;
use contracts_lib::upload::UploadFile;
use contracts_lib::upload::UploadSelection;
use contracts_lib::upload::format_file_size;

use super::Context;

pub async fn upload(
    ctx: &Context,
    path: &Path,
    name: Option<String>,
    parties: Option<String>,
) -> anyhow::Result<()> {
    ctx.require_login().await?;

    let file = UploadFile::from_path(path).await?;
    println!("{} ({})", file.name, format_file_size(file.size()));

    let mut selection = UploadSelection::default();
    selection.add(file)?;

    let metadata = UploadMetadata {
        contract_name: name,
        parties,
    };
    let outcomes = ctx.client.upload_selection(&mut selection, &metadata).await?;

    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(response) => {
                println!("{} uploaded successfully!", outcome.name);
                println!("Document id: {}", response.doc_id);
                println!("Check processing with `contracts status {}`", response.doc_id);
            }
            Err(err) => {
                failed += 1;
                if let Some(FileStatus::Error(message)) =
                    selection.get(outcome.id).map(|f| &f.status)
                {
                    eprintln!("Failed to upload {}: {message}", outcome.name);
                }
                log::error!("upload of {} failed: {err}", outcome.name);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to upload");
    }
    Ok(())
}

pub async fn status(ctx: &Context, doc_id: &str) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let status = ctx.client.upload_status(doc_id).await?;

    println!("Status: {}", status.state().unwrap_or("unknown"));
    if let Some(progress) = status.progress {
        println!("Progress: {progress:.0}%");
    }
    if let Some(message) = &status.message {
        println!("{message}");
    }
    Ok(())
}
