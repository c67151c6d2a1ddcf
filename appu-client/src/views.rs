//! Read-only projections of client records
//!
//! Tables and the detail panel are plain data here; rendering is the
//! caller's business.

use crate::ClientResult;
use crate::api::PanelApi;
use crate::http::HttpClient;
use shared::util::{self, EMPTY_PLACEHOLDER};
use shared::{ClientField, ClientRecord, StatusTone};

/// Status shown when a record has none, clients table and detail panel
pub const CLIENTS_STATUS_FALLBACK: &str = "Active";

/// Status shown when a record has none, database overview
pub const OVERVIEW_STATUS_FALLBACK: &str = "Inactive";

/// Database overview empty state
pub const NO_CLIENT_DATA: &str = "No client data available";

/// Cached client collection.
///
/// A failed refresh keeps the previous rows.
#[derive(Debug, Clone, Default)]
pub struct ClientList {
    clients: Vec<ClientRecord>,
    loaded: bool,
}

impl ClientList {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<C: HttpClient>(&mut self, api: &PanelApi<C>) -> ClientResult<usize> {
        match api.list_clients().await {
            Ok(clients) => {
                tracing::debug!(count = clients.len(), "Client list refreshed");
                self.clients = clients;
                self.loaded = true;
                Ok(self.clients.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch clients");
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn find(&self, client_id: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    /// Replace or append a saved record without a round trip
    pub fn upsert(&mut self, record: ClientRecord) {
        match self
            .clients
            .iter_mut()
            .find(|c| !record.client_id.is_empty() && c.client_id == record.client_id)
        {
            Some(existing) => *existing = record,
            None => self.clients.push(record),
        }
    }

    pub fn rows(&self) -> Vec<ClientRow> {
        self.clients.iter().map(ClientRow::from).collect()
    }

    pub fn overview(&self) -> DatabaseOverview {
        DatabaseOverview::from_records(&self.clients)
    }
}

/// One line of the clients table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRow {
    pub client_id: String,
    pub client_name: String,
    pub license_no: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub status: String,
    pub tone: StatusTone,
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        Self {
            client_id: record.client_id.clone(),
            client_name: record.client_name.clone(),
            license_no: record.license_no.clone(),
            issue_date: util::format_date_long(Some(&record.issue_date)),
            expiry_date: util::format_date_long(Some(&record.expiry_date)),
            status: record.status_label(CLIENTS_STATUS_FALLBACK),
            tone: record.status_tone(),
        }
    }
}

/// Detail panel for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetail {
    pub image_url: Option<String>,
    pub tone: StatusTone,
    pub entries: Vec<(&'static str, String)>,
}

impl ClientDetail {
    pub fn new<C: HttpClient>(api: &PanelApi<C>, record: &ClientRecord) -> Self {
        let image_url =
            (!record.image.is_empty()).then(|| api.client_image_url(&record.image));

        let mut entries = Vec::with_capacity(ClientField::ALL.len() + 2);
        for field in ClientField::ALL {
            let value = match field {
                ClientField::Status => record.status_label(CLIENTS_STATUS_FALLBACK),
                ClientField::IssueDate | ClientField::ExpiryDate => {
                    util::format_date_long(Some(record.field(field)))
                }
                _ => or_placeholder(record.field(field)),
            };
            entries.push((field.label(), value));
        }
        entries.push(("Created At", util::format_datetime_dmy(record.created_at.as_deref())));
        entries.push(("Updated At", util::format_datetime_dmy(record.updated_at.as_deref())));

        Self {
            image_url,
            tone: record.status_tone(),
            entries,
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// One line of the database overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewRow {
    pub client_id: String,
    pub client_name: String,
    pub license_no: String,
    pub status: String,
    pub tone: StatusTone,
    pub issue_date: String,
    pub expiry_date: String,
    pub last_updated: String,
}

/// Database management table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseOverview {
    pub rows: Vec<OverviewRow>,
}

impl DatabaseOverview {
    pub const HEADERS: [&'static str; 7] = [
        "Client ID",
        "Client Name",
        "License No",
        "Status",
        "Issue Date",
        "Expiry Date",
        "Last Updated",
    ];

    pub fn from_records(records: &[ClientRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| OverviewRow {
                client_id: r.client_id.clone(),
                client_name: r.client_name.clone(),
                license_no: r.license_no.clone(),
                status: r.status_label(OVERVIEW_STATUS_FALLBACK),
                tone: r.status_tone(),
                issue_date: util::format_date_dmy(Some(&r.issue_date)),
                expiry_date: util::format_date_dmy(Some(&r.expiry_date)),
                last_updated: util::format_datetime_dmy(r.updated_at.as_deref()),
            })
            .collect();
        Self { rows }
    }

    /// Fetch a fresh overview
    pub async fn load<C: HttpClient>(api: &PanelApi<C>) -> ClientResult<Self> {
        let records = api.list_clients().await?;
        tracing::info!(count = records.len(), "Client data refreshed");
        Ok(Self::from_records(&records))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text to show instead of the table, when there is nothing to list
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_CLIENT_DATA)
    }
}
