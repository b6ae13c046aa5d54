use anyhow::Result;

use crate::cli::config::{effective_surface, host_fields, resolve_config, CommandName, RunConfig};
use crate::cli::flags::Cli;
use crate::config::{load_config, AppConfig};
use crate::core::calculator::DueDateCalculator;
use crate::core::output::{render_due_date, render_policy};
use crate::core::record::FindingRecord;
use crate::core::types::DueDate;

pub fn run(cli: Cli) -> Result<()> {
    let cfg = resolve_config(&cli)?;
    let app = load_config(cfg.config_path.as_deref())?;

    let rendered = match cfg.command {
        CommandName::Compute => {
            let due = compute_with_config(&cfg, &app)?;
            match due.date {
                Some(date) => tracing::info!(%date, source = ?due.source, "due date computed"),
                None => tracing::info!("no reference date; due date left empty"),
            }
            render_due_date(&due, cfg.format)?
        }
        CommandName::Table => render_policy(&app.policy, cfg.format)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

pub fn compute_with_config(cfg: &RunConfig, app: &AppConfig) -> Result<DueDate> {
    let fields = host_fields(cfg)?;
    let record = FindingRecord::from_fields(&fields, &app.fields);
    let calculator = DueDateCalculator::new(app.policy, effective_surface(cfg, app))?;
    Ok(calculator.compute(&record)?)
}
