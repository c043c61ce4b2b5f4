//! `proxies` command: administer the pool of a running leadscout server.

use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Subcommand)]
pub(crate) enum ProxiesCommand {
    /// List registered proxies and their health counters.
    List,
    /// Register a new proxy.
    Add {
        host: String,
        port: u16,
        #[arg(long, default_value = "http")]
        scheme: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
    /// Remove a proxy by id.
    Remove { id: Uuid },
    /// Probe every proxy and refresh its status.
    Check,
    /// Return blocked/errored proxies to active.
    Reset,
}

pub(crate) async fn run(
    command: ProxiesCommand,
    server: &str,
    api_key: Option<&str>,
) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let base = server.trim_end_matches('/');

    match command {
        ProxiesCommand::List => {
            let data = request(api_key, client.get(format!("{base}/api/v1/proxies"))).await?;
            print_proxy_table(&data);
        }
        ProxiesCommand::Add {
            host,
            port,
            scheme,
            username,
            password,
            label,
        } => {
            let body = serde_json::json!({
                "host": host,
                "port": port,
                "scheme": scheme,
                "username": username,
                "password": password,
                "label": label,
            });
            let data = request(
                api_key,
                client.post(format!("{base}/api/v1/proxies")).json(&body),
            )
            .await?;
            println!(
                "added proxy {}",
                data["id"].as_str().unwrap_or("(unknown id)")
            );
        }
        ProxiesCommand::Remove { id } => {
            let data = request(
                api_key,
                client.delete(format!("{base}/api/v1/proxies/{id}")),
            )
            .await?;
            println!(
                "removed proxy {}",
                data["endpoint"].as_str().unwrap_or("(unknown)")
            );
        }
        ProxiesCommand::Check => {
            let data = request(
                api_key,
                client.post(format!("{base}/api/v1/proxies/check")),
            )
            .await?;
            print_proxy_table(&data);
        }
        ProxiesCommand::Reset => {
            let data = request(
                api_key,
                client.post(format!("{base}/api/v1/proxies/reset")),
            )
            .await?;
            println!(
                "reactivated {} proxies",
                data["reset"].as_u64().unwrap_or(0)
            );
        }
    }
    Ok(())
}

/// Sends one admin request and unwraps the server's `{data, meta}` envelope,
/// turning its `{error}` envelope into a readable failure.
async fn request(
    api_key: Option<&str>,
    builder: reqwest::RequestBuilder,
) -> anyhow::Result<Value> {
    let builder = match api_key {
        Some(key) => builder.bearer_auth(key),
        None => builder,
    };
    let response = builder.send().await.context("server unreachable")?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("server returned a non-JSON response")?;

    if !status.is_success() {
        let code = body["error"]["code"].as_str().unwrap_or("unknown");
        let message = body["error"]["message"].as_str().unwrap_or("no detail");
        anyhow::bail!("server rejected the request ({status}): {code}: {message}");
    }
    Ok(body["data"].clone())
}

fn print_proxy_table(data: &Value) {
    let Some(proxies) = data.as_array() else {
        println!("{data}");
        return;
    };
    if proxies.is_empty() {
        println!("no proxies registered");
        return;
    }

    println!(
        "{:<38} {:<28} {:<8} {:>5} {:>5} {:>8}",
        "id", "endpoint", "status", "ok", "fail", "avg ms"
    );
    for proxy in proxies {
        println!(
            "{:<38} {:<28} {:<8} {:>5} {:>5} {:>8.0}",
            proxy["id"].as_str().unwrap_or("-"),
            proxy["endpoint"].as_str().unwrap_or("-"),
            proxy["status"].as_str().unwrap_or("-"),
            proxy["success_count"].as_u64().unwrap_or(0),
            proxy["failure_count"].as_u64().unwrap_or(0),
            proxy["avg_response_time_ms"].as_f64().unwrap_or(0.0),
        );
    }
}
