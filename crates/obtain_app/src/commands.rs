//! One-shot subcommands that talk to the server and exit.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use obtain_core::{
    update, AppState, Msg, OutputFormat, Submission, SubmitOutcome, Theme, View,
    DELETE_CONFIRM_PROMPT, THEME_STORAGE_KEY,
};
use obtain_engine::{JobApi, ProgressSink, ReqwestJobApi, SaveProgress};
use obtain_logging::{obtain_debug, obtain_info};

use crate::cli::ThemeCommand;
use crate::config::ClientConfig;
use crate::platform::persistence::PreferenceStore;
use crate::platform::ui::render;
use crate::wire::{outcome_from_response, request_from_submission, snapshot_from_job};

pub struct Commands {
    api: ReqwestJobApi,
    runtime: tokio::runtime::Runtime,
}

impl Commands {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = ReqwestJobApi::new(config.client_settings())
            .with_context(|| format!("invalid server url {}", config.server_url))?;
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        Ok(Self { api, runtime })
    }

    pub fn list(&self) -> Result<()> {
        let jobs = self
            .runtime
            .block_on(self.api.list_conversions())
            .context("failed to load conversions")?;
        obtain_debug!("listed {} jobs", jobs.len());

        // Same cards the UI shows.
        let mut state = AppState::new();
        for msg in [
            Msg::Navigate(View::Conversions),
            Msg::JobsLoaded(jobs.into_iter().map(snapshot_from_job).collect()),
        ] {
            state = update(state, msg).0;
        }
        let view = state.view();
        println!("{}", render::list_text(&view.conversions.list, self.api.base()));
        Ok(())
    }

    pub fn submit(&self, url: String, convert: Option<OutputFormat>) -> Result<()> {
        let url = url.trim().to_string();
        if url.is_empty() {
            bail!("{}", obtain_core::EMPTY_URL_MESSAGE);
        }
        let request = request_from_submission(Submission {
            url,
            convert: convert.is_some(),
            format: convert,
        });
        let response = self
            .runtime
            .block_on(self.api.submit_download(&request))
            .context(obtain_core::SUBMIT_FAILED_MESSAGE)?;

        match outcome_from_response(response) {
            Some(SubmitOutcome::Ready { download_url }) => println!("Ready: {download_url}"),
            Some(SubmitOutcome::Converting { job_id: Some(job_id) }) => {
                println!("Conversion started: job {job_id}")
            }
            Some(SubmitOutcome::Converting { job_id: None }) => println!("Conversion started"),
            Some(SubmitOutcome::Other(status)) => println!("Server answered: {status}"),
            None => bail!("server reported ready without a download url"),
        }
        Ok(())
    }

    pub fn retry(&self, job_id: &str) -> Result<()> {
        self.runtime
            .block_on(self.api.retry_job(job_id))
            .with_context(|| format!("failed to retry {job_id}"))?;
        println!("Retry requested for {job_id}");
        Ok(())
    }

    pub fn delete(&self, filename: &str, assume_yes: bool) -> Result<()> {
        if !assume_yes && !confirm(&format!("{DELETE_CONFIRM_PROMPT} ({filename})"))? {
            println!("Cancelled");
            return Ok(());
        }
        self.runtime
            .block_on(self.api.delete_file(filename))
            .with_context(|| format!("failed to delete {filename}"))?;
        println!("Deleted {filename}");
        Ok(())
    }

    pub fn save(&self, filename: &str, output: Option<PathBuf>) -> Result<()> {
        let dir = match output {
            Some(dir) => dir,
            None => std::env::current_dir().context("no current directory")?,
        };
        let saved = self
            .runtime
            .block_on(self.api.save_file(filename, &dir, &LogProgress))
            .with_context(|| format!("failed to save {filename}"))?;
        println!("Saved {}", saved.display());
        Ok(())
    }
}

pub fn theme(store: &PreferenceStore, action: ThemeCommand) -> Result<()> {
    let current = match store.get(THEME_STORAGE_KEY).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    };
    match action {
        ThemeCommand::Show => println!("{}", current.as_str()),
        ThemeCommand::Toggle => {
            let next = current.toggled();
            store
                .set(THEME_STORAGE_KEY, next.as_str())
                .context("failed to store theme")?;
            println!("{}", next.as_str());
        }
    }
    Ok(())
}

struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, progress: SaveProgress) {
        match progress.total {
            Some(total) => obtain_debug!("saved {} of {} bytes", progress.written, total),
            None => obtain_debug!("saved {} bytes", progress.written),
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let accepted = matches!(answer.trim(), "y" | "Y" | "yes" | "Yes");
    obtain_info!("delete confirmation answered {}", accepted);
    Ok(accepted)
}
