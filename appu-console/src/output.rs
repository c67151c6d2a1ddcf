//! Plain-text rendering for stdout

use appu_client::views::{ClientDetail, ClientRow, DatabaseOverview};
use shared::{AppUpdateSetting, StatusTone};

/// Left-aligned columns sized to their widest cell
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![line(headers.to_vec())];
    out.push(line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

fn badge(label: &str, tone: StatusTone) -> String {
    match tone {
        StatusTone::Active => format!("[+] {label}"),
        StatusTone::Inactive => format!("[-] {label}"),
    }
}

pub fn client_rows(rows: &[ClientRow]) -> String {
    if rows.is_empty() {
        return "No clients found".to_string();
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.client_id.clone(),
                r.client_name.clone(),
                r.license_no.clone(),
                r.issue_date.clone(),
                r.expiry_date.clone(),
                badge(&r.status, r.tone),
            ]
        })
        .collect();
    table(
        &["ID", "Client Name", "License No", "Issue Date", "Expiry Date", "Status"],
        &cells,
    )
}

pub fn client_detail(detail: &ClientDetail) -> String {
    let width = detail
        .entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out: Vec<String> = detail
        .entries
        .iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect();
    if let Some(url) = &detail.image_url {
        out.push(format!("{:<width$}  {url}", "Image"));
    }
    out.join("\n")
}

pub fn overview(overview: &DatabaseOverview) -> String {
    if let Some(message) = overview.empty_message() {
        return message.to_string();
    }
    let cells: Vec<Vec<String>> = overview
        .rows
        .iter()
        .map(|r| {
            vec![
                r.client_id.clone(),
                r.client_name.clone(),
                r.license_no.clone(),
                badge(&r.status, r.tone),
                r.issue_date.clone(),
                r.expiry_date.clone(),
                r.last_updated.clone(),
            ]
        })
        .collect();
    table(&DatabaseOverview::HEADERS, &cells)
}

pub fn app_update(client_id: &str, setting: &AppUpdateSetting) -> String {
    let value = match setting.app_update.as_str() {
        "" => "(not set)",
        v => v,
    };
    let link = if setting.download_link.is_empty() {
        "-"
    } else {
        setting.download_link.as_str()
    };
    format!("Client      {client_id}\nApp Update  {value}\nDownload    {link}")
}
