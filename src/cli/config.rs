use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::flags::{Cli, Command};
use crate::config::AppConfig;
use crate::core::record::{load_host_record, parse_field_pair};
use crate::core::types::{OutputFormat, Surface};

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub command: CommandName,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub surface: Option<Surface>,
    pub record: Option<PathBuf>,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Compute,
    Table,
}

pub fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let cfg = match &cli.command {
        Command::Compute {
            record,
            fields,
            surface,
            format,
        } => RunConfig {
            command: CommandName::Compute,
            config_path: cli.config.clone(),
            format: (*format).into(),
            surface: surface.map(Surface::from),
            record: record.clone(),
            fields: fields
                .iter()
                .map(|pair| parse_field_pair(pair))
                .collect::<Result<_, _>>()?,
        },
        Command::Table { format } => RunConfig {
            command: CommandName::Table,
            config_path: cli.config.clone(),
            format: (*format).into(),
            surface: None,
            record: None,
            fields: Vec::new(),
        },
    };
    Ok(cfg)
}

/// The command-line surface wins over the config file.
pub fn effective_surface(cfg: &RunConfig, app: &AppConfig) -> Surface {
    cfg.surface.unwrap_or(app.surface)
}

/// Merge the record file and `--field` pairs into one host field map.
pub fn host_fields(cfg: &RunConfig) -> Result<HashMap<String, String>> {
    let mut fields = match &cfg.record {
        Some(path) => load_host_record(path)?,
        None => HashMap::new(),
    };
    for (name, value) in cfg.fields.iter() {
        fields.insert(name.clone(), value.clone());
    }
    Ok(fields)
}
