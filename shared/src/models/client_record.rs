//! Client Record Model
//!
//! A client is a tenant licence held by the backend. The panel only views and
//! edits it; `client_id`, `created_at` and `updated_at` are server-assigned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::util;

/// Client record as returned by `GET /api/clients`
///
/// Every field is held as text: the backend is inconsistent about numbers vs
/// strings, and the edit form works on text anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub client_id: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub client_name: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub license_no: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub plan_name: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub status: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub issue_date: String,
    /// Plan duration in days
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub duration: String,
    /// Derived from `issue_date + duration`
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub expiry_date: String,
    /// Advertisement timer
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub adv_timer: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub client_address: String,
    /// Comma-joined role list
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub roles: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub customers_login: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub sales_mgr_login: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub superadmin_login: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub product_prefix: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub customer_prefix: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub sm_prefix: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub ord_prefix: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub inv_prefix: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub ord_prefix_num: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub hsn_length: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub default_due_on: String,
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub max_due_on: String,
    /// Server-stored image filename
    #[serde(default, deserialize_with = "util::lenient_text")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Display tone for the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Active,
    Inactive,
}

impl ClientRecord {
    pub fn field(&self, field: ClientField) -> &str {
        match field {
            ClientField::ClientName => &self.client_name,
            ClientField::LicenseNo => &self.license_no,
            ClientField::PlanName => &self.plan_name,
            ClientField::Status => &self.status,
            ClientField::IssueDate => &self.issue_date,
            ClientField::Duration => &self.duration,
            ClientField::ExpiryDate => &self.expiry_date,
            ClientField::AdvTimer => &self.adv_timer,
            ClientField::ClientAddress => &self.client_address,
            ClientField::Roles => &self.roles,
            ClientField::CustomersLogin => &self.customers_login,
            ClientField::SalesMgrLogin => &self.sales_mgr_login,
            ClientField::SuperadminLogin => &self.superadmin_login,
            ClientField::ProductPrefix => &self.product_prefix,
            ClientField::CustomerPrefix => &self.customer_prefix,
            ClientField::SmPrefix => &self.sm_prefix,
            ClientField::OrdPrefix => &self.ord_prefix,
            ClientField::InvPrefix => &self.inv_prefix,
            ClientField::OrdPrefixNum => &self.ord_prefix_num,
            ClientField::HsnLength => &self.hsn_length,
            ClientField::DefaultDueOn => &self.default_due_on,
            ClientField::MaxDueOn => &self.max_due_on,
        }
    }

    pub fn field_mut(&mut self, field: ClientField) -> &mut String {
        match field {
            ClientField::ClientName => &mut self.client_name,
            ClientField::LicenseNo => &mut self.license_no,
            ClientField::PlanName => &mut self.plan_name,
            ClientField::Status => &mut self.status,
            ClientField::IssueDate => &mut self.issue_date,
            ClientField::Duration => &mut self.duration,
            ClientField::ExpiryDate => &mut self.expiry_date,
            ClientField::AdvTimer => &mut self.adv_timer,
            ClientField::ClientAddress => &mut self.client_address,
            ClientField::Roles => &mut self.roles,
            ClientField::CustomersLogin => &mut self.customers_login,
            ClientField::SalesMgrLogin => &mut self.sales_mgr_login,
            ClientField::SuperadminLogin => &mut self.superadmin_login,
            ClientField::ProductPrefix => &mut self.product_prefix,
            ClientField::CustomerPrefix => &mut self.customer_prefix,
            ClientField::SmPrefix => &mut self.sm_prefix,
            ClientField::OrdPrefix => &mut self.ord_prefix,
            ClientField::InvPrefix => &mut self.inv_prefix,
            ClientField::OrdPrefixNum => &mut self.ord_prefix_num,
            ClientField::HsnLength => &mut self.hsn_length,
            ClientField::DefaultDueOn => &mut self.default_due_on,
            ClientField::MaxDueOn => &mut self.max_due_on,
        }
    }

    /// Recompute `expiry_date` from `issue_date` and `duration`.
    pub fn recompute_expiry(&mut self) {
        self.expiry_date = util::compute_expiry(&self.issue_date, &self.duration).unwrap_or_default();
    }

    /// First required field left blank, in form order
    pub fn first_missing_required(&self) -> Option<ClientField> {
        ClientField::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required())
            .find(|f| self.field(*f).trim().is_empty())
    }

    pub fn status_tone(&self) -> StatusTone {
        if self.status.eq_ignore_ascii_case("active") {
            StatusTone::Active
        } else {
            StatusTone::Inactive
        }
    }

    /// Status with its first letter capitalized, or `fallback` when unset
    pub fn status_label(&self, fallback: &str) -> String {
        let mut chars = self.status.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => fallback.to_string(),
        }
    }

    pub fn role_list(&self) -> Vec<&str> {
        self.roles
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Text parts for the multipart create/update body.
    ///
    /// Dates go out as `YYYY-MM-DD`. Server-assigned audit fields and the
    /// image are left to the caller.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(ClientField::ALL.len() + 1);
        if !self.client_id.is_empty() {
            fields.push(("client_id", self.client_id.clone()));
        }
        for field in ClientField::ALL {
            let value = self.field(field);
            let value = match field {
                ClientField::IssueDate | ClientField::ExpiryDate if !value.is_empty() => {
                    util::to_wire_date(value)
                }
                _ => value.to_string(),
            };
            fields.push((field.as_str(), value));
        }
        fields
    }
}

/// Editable fields of a [`ClientRecord`], in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    ClientName,
    LicenseNo,
    PlanName,
    Status,
    IssueDate,
    Duration,
    ExpiryDate,
    AdvTimer,
    ClientAddress,
    Roles,
    CustomersLogin,
    SalesMgrLogin,
    SuperadminLogin,
    ProductPrefix,
    CustomerPrefix,
    SmPrefix,
    OrdPrefix,
    InvPrefix,
    OrdPrefixNum,
    HsnLength,
    DefaultDueOn,
    MaxDueOn,
}

impl ClientField {
    pub const ALL: [ClientField; 22] = [
        ClientField::ClientName,
        ClientField::LicenseNo,
        ClientField::PlanName,
        ClientField::Status,
        ClientField::IssueDate,
        ClientField::Duration,
        ClientField::ExpiryDate,
        ClientField::AdvTimer,
        ClientField::ClientAddress,
        ClientField::Roles,
        ClientField::CustomersLogin,
        ClientField::SalesMgrLogin,
        ClientField::SuperadminLogin,
        ClientField::ProductPrefix,
        ClientField::CustomerPrefix,
        ClientField::SmPrefix,
        ClientField::OrdPrefix,
        ClientField::InvPrefix,
        ClientField::OrdPrefixNum,
        ClientField::HsnLength,
        ClientField::DefaultDueOn,
        ClientField::MaxDueOn,
    ];

    /// Wire / JSON key
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientField::ClientName => "client_name",
            ClientField::LicenseNo => "license_no",
            ClientField::PlanName => "plan_name",
            ClientField::Status => "status",
            ClientField::IssueDate => "issue_date",
            ClientField::Duration => "duration",
            ClientField::ExpiryDate => "expiry_date",
            ClientField::AdvTimer => "adv_timer",
            ClientField::ClientAddress => "client_address",
            ClientField::Roles => "roles",
            ClientField::CustomersLogin => "customers_login",
            ClientField::SalesMgrLogin => "sales_mgr_login",
            ClientField::SuperadminLogin => "superadmin_login",
            ClientField::ProductPrefix => "product_prefix",
            ClientField::CustomerPrefix => "customer_prefix",
            ClientField::SmPrefix => "sm_prefix",
            ClientField::OrdPrefix => "ord_prefix",
            ClientField::InvPrefix => "inv_prefix",
            ClientField::OrdPrefixNum => "ord_prefix_num",
            ClientField::HsnLength => "hsn_length",
            ClientField::DefaultDueOn => "default_due_on",
            ClientField::MaxDueOn => "max_due_on",
        }
    }

    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ClientField::ClientName => "Client Name",
            ClientField::LicenseNo => "License No",
            ClientField::PlanName => "Plan",
            ClientField::Status => "Status",
            ClientField::IssueDate => "Issue Date",
            ClientField::Duration => "Plan Duration (days)",
            ClientField::ExpiryDate => "Expiry Date",
            ClientField::AdvTimer => "Advt. Timer",
            ClientField::ClientAddress => "Address",
            ClientField::Roles => "Roles",
            ClientField::CustomersLogin => "Customers Login",
            ClientField::SalesMgrLogin => "Sales Manager Login",
            ClientField::SuperadminLogin => "Superadmin Login",
            ClientField::ProductPrefix => "Product Prefix",
            ClientField::CustomerPrefix => "Customer Prefix",
            ClientField::SmPrefix => "SM Prefix",
            ClientField::OrdPrefix => "Order Prefix",
            ClientField::InvPrefix => "Invoice Prefix",
            ClientField::OrdPrefixNum => "Order Prefix Number",
            ClientField::HsnLength => "HSN Length",
            ClientField::DefaultDueOn => "Default Due On",
            ClientField::MaxDueOn => "Max Due On",
        }
    }

    /// Digits-only inputs
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ClientField::Duration | ClientField::DefaultDueOn | ClientField::MaxDueOn
        )
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ClientField::ClientName
                | ClientField::LicenseNo
                | ClientField::Duration
                | ClientField::ProductPrefix
                | ClientField::CustomerPrefix
                | ClientField::SmPrefix
                | ClientField::OrdPrefix
                | ClientField::InvPrefix
                | ClientField::OrdPrefixNum
                | ClientField::DefaultDueOn
                | ClientField::MaxDueOn
        )
    }

    /// Fields the operator never types into
    pub fn is_derived(&self) -> bool {
        matches!(self, ClientField::IssueDate | ClientField::ExpiryDate)
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "_").to_ascii_lowercase();
        ClientField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}
