//! `syard text` and `syard vision`: route one request and print the result.

use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use console::style;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

use switchyard_types::routing::{RoutingOutcome, TextRequest, VisionRequest};

use crate::http::handlers::route::RouteResponse;
use crate::state::{AppState, Surface};

pub async fn text(
    state: &AppState,
    prompt: String,
    system: Option<String>,
    json: bool,
) -> Result<()> {
    let request = TextRequest::new(prompt, system);
    let cancel = cancel_on_ctrl_c();
    let outcome = state.route_text(&request, Surface::Cli, &cancel).await;
    report(outcome, json)
}

pub async fn vision(
    state: &AppState,
    image: &Path,
    prompt: String,
    system: Option<String>,
    json: bool,
) -> Result<()> {
    let image_base64 = read_image_base64(image).await?;
    let request = VisionRequest::new(image_base64, prompt, system);
    let cancel = cancel_on_ctrl_c();
    let outcome = state.route_vision(&request, Surface::Cli, &cancel).await;
    report(outcome, json)
}

/// Read an image file (or stdin for `-`) and base64-encode it.
pub async fn read_image_base64(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("failed to read image from stdin")?;
        buf
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?
    };

    if bytes.is_empty() {
        bail!("image is empty");
    }
    Ok(STANDARD.encode(bytes))
}

/// A token that fires on the first Ctrl+C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    cancel
}

fn report(outcome: RoutingOutcome, json: bool) -> Result<()> {
    let failure = outcome.error().map(String::from);

    if json {
        let body = RouteResponse::from(outcome);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if let RoutingOutcome::Success(completion) = &outcome {
        println!("{}", completion.text);
        eprintln!(
            "  {}",
            style(format!(
                "via {} ({})",
                completion.provider,
                completion.model.as_deref().unwrap_or("-")
            ))
            .dim()
        );
    }

    match failure {
        Some(reason) => bail!(reason),
        None => Ok(()),
    }
}
