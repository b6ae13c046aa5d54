use crate::core::error::DueDateError;
use crate::core::policy::OffsetPolicy;
use crate::core::types::{DueDate, OutputFormat};

pub fn render_due_date(due: &DueDate, format: OutputFormat) -> Result<String, DueDateError> {
    match format {
        OutputFormat::Text => Ok(due.date.map(|d| d.to_string()).unwrap_or_default()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(due)?),
        OutputFormat::Markdown => Ok(due_date_markdown(due)),
    }
}

pub fn render_policy(policy: &OffsetPolicy, format: OutputFormat) -> Result<String, DueDateError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&policy.rows())?),
        OutputFormat::Markdown => Ok(policy_markdown(policy)),
        OutputFormat::Text => {
            let mut out = String::new();
            for row in policy.rows() {
                out.push_str(&format!(
                    "{:<18} {:<9} +{}\n",
                    row.risk_rating, row.internet_facing, row.offset
                ));
            }
            out.push_str(&format!("{:<18} {:<9} none\n", "anything else", "any"));
            Ok(out)
        }
    }
}

fn due_date_markdown(due: &DueDate) -> String {
    let cell = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    let mut out = String::from("| Field | Value |\n|---|---|\n");
    out.push_str(&format!(
        "| Due date | {} |\n",
        cell(due.date.map(|d| d.to_string()))
    ));
    out.push_str(&format!("| Source | {:?} |\n", due.source));
    out.push_str(&format!(
        "| Reference | {} |\n",
        cell(due.reference.map(|d| d.to_string()))
    ));
    out.push_str(&format!(
        "| Offset | {} |\n",
        cell(due.offset.map(|o| format!("+{}", o)))
    ));
    out.push_str(&format!(
        "| Risk rating | {} |\n",
        cell(due.risk_rating.as_ref().map(|r| r.to_string()))
    ));
    out.push_str(&format!(
        "| Internet facing | {} |\n",
        if due.internet_facing { "Yes" } else { "No" }
    ));
    out
}

fn policy_markdown(policy: &OffsetPolicy) -> String {
    let mut out = String::from("| RiskRating | InternetFacing | Offset |\n|---|---|---|\n");
    for row in policy.rows() {
        out.push_str(&format!(
            "| {} | {} | +{} |\n",
            row.risk_rating, row.internet_facing, row.offset
        ));
    }
    out.push_str("| anything else | any | none |\n");
    out
}
