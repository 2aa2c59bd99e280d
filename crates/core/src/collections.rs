//! Fallback bindings for the business entities
//!
//! Teaches each domain payload how to live in a [`FallbackDataset`]: its
//! local id prefix, draft materialization, patch application, and what a
//! list query matches against.

use chrono::Utc;
use finboard_domain::{
    Company, CompanyPatch, Employee, EmployeePatch, InvoiceStatus, ListQuery, NewCompany,
    NewEmployee, NewPayable, NewReceivable, Payable, PayablePatch, Receivable, ReceivablePatch,
};

use crate::fallback::FallbackEntity;

fn search_matches(haystack: &str, query: &ListQuery) -> bool {
    query.search.as_deref().map_or(true, |term| {
        haystack.to_lowercase().contains(&term.to_lowercase())
    })
}

impl FallbackEntity for Company {
    type Draft = NewCompany;
    type Patch = CompanyPatch;

    const ID_PREFIX: &'static str = "co";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: &Self::Draft, id: String) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            tax_id: draft.tax_id.clone(),
            country: draft.country.clone(),
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(tax_id) = &patch.tax_id {
            self.tax_id = tax_id.clone();
        }
        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
    }

    fn matches(&self, query: &ListQuery) -> bool {
        search_matches(&self.name, query)
    }
}

impl FallbackEntity for Employee {
    type Draft = NewEmployee;
    type Patch = EmployeePatch;

    const ID_PREFIX: &'static str = "emp";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: &Self::Draft, id: String) -> Self {
        Self {
            id,
            company_id: draft.company_id.clone(),
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            role: draft.role.clone(),
            hired_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(role) = &patch.role {
            self.role = role.clone();
        }
    }

    fn matches(&self, query: &ListQuery) -> bool {
        search_matches(&self.full_name, query) || search_matches(&self.email, query)
    }
}

impl FallbackEntity for Payable {
    type Draft = NewPayable;
    type Patch = PayablePatch;

    const ID_PREFIX: &'static str = "pay";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: &Self::Draft, id: String) -> Self {
        Self {
            id,
            company_id: draft.company_id.clone(),
            vendor: draft.vendor.clone(),
            amount_cents: draft.amount_cents,
            currency: draft.currency.clone(),
            due_date: draft.due_date,
            status: InvoiceStatus::Open,
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(vendor) = &patch.vendor {
            self.vendor = vendor.clone();
        }
        if let Some(amount_cents) = patch.amount_cents {
            self.amount_cents = amount_cents;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn matches(&self, query: &ListQuery) -> bool {
        search_matches(&self.vendor, query)
    }
}

impl FallbackEntity for Receivable {
    type Draft = NewReceivable;
    type Patch = ReceivablePatch;

    const ID_PREFIX: &'static str = "rcv";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: &Self::Draft, id: String) -> Self {
        Self {
            id,
            company_id: draft.company_id.clone(),
            customer: draft.customer.clone(),
            amount_cents: draft.amount_cents,
            currency: draft.currency.clone(),
            due_date: draft.due_date,
            status: InvoiceStatus::Open,
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(customer) = &patch.customer {
            self.customer = customer.clone();
        }
        if let Some(amount_cents) = patch.amount_cents {
            self.amount_cents = amount_cents;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn matches(&self, query: &ListQuery) -> bool {
        search_matches(&self.customer, query)
    }
}
