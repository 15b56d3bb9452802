use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;
use vck_core::{CheckConfig, CommitSearch, SearchRequest};
use vck_server::{AppState, HttpResponseSink, ServerConfig, SlackVerifier, VersionCheckServer};
use vck_types::{CommitRef, RefKind, SearchResult};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let text = read_config(cli.config.as_deref())?;
    let config = check_config(&cli, &text)?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Some(Command::Serve(ref args)) => cmd_serve(args, &text, &config),
        None => cmd_search(&cli, &config),
    }
}

/// Config file contents, or an empty document when no file was given.
fn read_config(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display())),
        None => Ok(String::new()),
    }
}

/// Defaults, then the config file, then command-line flags.
fn check_config(cli: &Cli, text: &str) -> anyhow::Result<CheckConfig> {
    let mut config = CheckConfig::from_toml_str(text)?;
    if let Some(git_dir) = &cli.git_dir {
        config.git_dir = git_dir.clone();
    }
    if let Some(remote) = &cli.remote {
        config.remote = remote.clone();
    }
    if let Some(policy) = cli.fetch_policy {
        config.fetch_policy = policy.into();
    }
    Ok(config)
}

fn search_request(cli: &Cli) -> SearchRequest {
    SearchRequest {
        commit: cli.commit.clone(),
        pull_request: cli.pull_request.clone(),
        branches: cli.branches.clone(),
        tags: cli.tags.clone(),
        skip_fetch: cli.skip_fetch,
    }
}

fn cmd_search(cli: &Cli, config: &CheckConfig) -> anyhow::Result<()> {
    let request = search_request(cli);
    let (target, _) = request.validate()?;
    let resolver = config.build_resolver()?;
    let result = resolver.search(&request)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&target, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn render_text(target: &CommitRef, result: &SearchResult) -> String {
    if result.is_empty() {
        return format!("The {} '{}' was not found.\n", target.label(), target);
    }

    let mut out = String::new();
    for kind in [RefKind::Branch, RefKind::Tag] {
        let names = result.refs(kind);
        if names.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", format!("{}:", kind.heading()).bold()));
        for name in names {
            out.push_str(&format!("  {name}\n"));
        }
    }
    out
}

fn cmd_serve(args: &ServeArgs, text: &str, config: &CheckConfig) -> anyhow::Result<()> {
    let mut server_config = ServerConfig::from_toml_str(text)?;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }

    let verifier = SlackVerifier::new(args.signing_secret.clone(), server_config.max_request_age())?;
    let resolver = config.build_resolver()?;
    let searcher: Arc<dyn CommitSearch> = Arc::new(resolver);
    let state = AppState::new(
        server_config,
        searcher,
        verifier,
        Arc::new(HttpResponseSink::new()),
    );

    let runtime = tokio::runtime::Runtime::new().context("could not start async runtime")?;
    runtime.block_on(VersionCheckServer::new(state).serve())?;
    Ok(())
}
