use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{debug, info, info_span};

use kita_cli::logging::redact_value;
use kita_cli::plan::ImportPlan;
use kita_cli::report::ReportFile;
use kita_cli::settings::{Settings, save_settings, settings_path};
use kita_client::{ClientConfig, HttpImportService};
use kita_import::{ImportReport, ImportWizard};
use kita_ingest::{file_fingerprint, parse_delimited, read_file_bytes};
use kita_map::{MappingState, detect_matches};

use crate::cli::{ConfigCommand, InspectArgs, RunArgs};
use crate::progress::with_spinner;
use crate::summary::{print_fields, print_inspection, print_mapping, print_preview};

/// How a `run` ended.
pub enum RunOutcome {
    /// Stopped after preview; nothing was written.
    DryRun,
    Imported(ImportReport),
}

pub fn run_fields() -> Result<()> {
    print_fields();
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let name = file_name(&args.file)?;
    let bytes =
        read_file_bytes(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let parsed =
        parse_delimited(&name, &bytes).with_context(|| format!("parse {}", args.file.display()))?;
    let matches = detect_matches(&parsed.headers);
    let state = MappingState::from_headers(parsed.headers.clone());
    info!(
        columns = parsed.column_count(),
        rows = parsed.total_rows,
        detected = matches.len(),
        "inspected file"
    );
    print_inspection(&parsed, &file_fingerprint(&bytes), &matches, &state);
    Ok(())
}

pub fn run_import(args: &RunArgs, settings: &Settings) -> Result<RunOutcome> {
    let plan = match &args.plan {
        Some(path) => ImportPlan::load(path)?,
        None => ImportPlan::default(),
    };
    let name = file_name(&args.file)?;
    let bytes =
        read_file_bytes(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let fingerprint = file_fingerprint(&bytes);
    let span = info_span!("import", file = %name);
    let _guard = span.enter();
    info!(%fingerprint, bytes = bytes.len(), plan = !plan.is_empty(), "starting import");

    let service =
        HttpImportService::new(client_config(args, settings)).context("configure import client")?;
    let skip_header = settings.import.skip_header && !args.no_skip_header;
    let mut wizard = ImportWizard::with_skip_header(skip_header);

    with_spinner("Parsing file", || wizard.run_parse(&service, &name, bytes))
        .context("parse upload")?;
    let mapping = wizard
        .mapping_mut()
        .context("no column mapping after parse")?;
    plan.apply_mapping(mapping)?;
    print_mapping(mapping);

    with_spinner("Previewing rows", || wizard.run_preview(&service))
        .context("preview import")?;
    let reconciliation = wizard
        .reconciliation_mut()
        .context("no preview rows after preview")?;
    plan.apply_reconciliation(reconciliation)?;
    for state in reconciliation.rows() {
        debug!(
            row = ImportReport::display_row(state.index()),
            member = redact_value(&state.row().child.member_number),
            status = %state.status(),
            "reconciled row"
        );
    }
    print_preview(reconciliation);

    if args.dry_run {
        let request = reconciliation
            .build_execute_request()
            .context("assemble import request")?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(RunOutcome::DryRun);
    }

    with_spinner("Importing rows", || wizard.run_execute(&service))
        .context("execute import")?;
    let results = wizard.results().context("no result after import")?;
    if let Some(path) = &args.report {
        ReportFile::new(
            &name,
            &fingerprint,
            &results.request,
            &results.result,
            Utc::now(),
        )
        .write(path)?;
    }
    Ok(RunOutcome::Imported(results.report.clone()))
}

pub fn run_config(command: &ConfigCommand, settings: &Settings) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            match settings_path() {
                Some(path) => println!("Settings file: {}", path.display()),
                None => println!("Settings file: no config directory on this platform"),
            }
            print!(
                "{}",
                toml::to_string_pretty(settings).context("serialize settings")?
            );
        }
        ConfigCommand::Init { force } => {
            let path = settings_path().context("could not determine settings path")?;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to replace it)",
                    path.display()
                );
            }
            let path = save_settings(settings)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn client_config(args: &RunArgs, settings: &Settings) -> ClientConfig {
    let server = &settings.server;
    let base_url = args
        .server
        .clone()
        .unwrap_or_else(|| server.base_url.clone());
    let timeout = args
        .timeout
        .map_or_else(|| server.timeout(), Duration::from_secs);
    let token = server.token();
    if token.is_none() {
        debug!(env = %server.token_env, "no bearer token set");
    }
    ClientConfig::new(base_url)
        .with_timeout(timeout)
        .with_token(token)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no usable file name", path.display()))
}
