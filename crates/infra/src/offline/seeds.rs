//! Seed records per domain
//!
//! Identifiers follow the `{prefix}-{nnnn}` shape; locally created fallback
//! records use `{prefix}-local-{n}`, so the two ranges can never collide.

#![allow(clippy::unwrap_used)] // literal dates below are always valid

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use finboard_domain::{Company, Employee, InvoiceStatus, Payable, Receivable};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 9, 0, 0).unwrap()
}

fn due(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap()
}

pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "co-0001".into(),
            name: "Nordwind Logistics GmbH".into(),
            tax_id: "DE-811-000-1001".into(),
            country: "DE".into(),
            created_at: day(2023, 2, 14),
        },
        Company {
            id: "co-0002".into(),
            name: "Helios Energy AG".into(),
            tax_id: "AT-902-000-2002".into(),
            country: "AT".into(),
            created_at: day(2023, 7, 3),
        },
        Company {
            id: "co-0003".into(),
            name: "Bluefjord Seafood AS".into(),
            tax_id: "NO-977-000-3003".into(),
            country: "NO".into(),
            created_at: day(2024, 1, 22),
        },
    ]
}

pub fn employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "emp-0001".into(),
            company_id: "co-0001".into(),
            full_name: "Greta Lindqvist".into(),
            email: "greta.lindqvist@nordwind.example".into(),
            role: "Operations Manager".into(),
            hired_at: day(2023, 3, 1),
        },
        Employee {
            id: "emp-0002".into(),
            company_id: "co-0001".into(),
            full_name: "Jonas Weber".into(),
            email: "jonas.weber@nordwind.example".into(),
            role: "Accountant".into(),
            hired_at: day(2023, 9, 18),
        },
        Employee {
            id: "emp-0003".into(),
            company_id: "co-0002".into(),
            full_name: "Marta Kovacs".into(),
            email: "marta.kovacs@helios.example".into(),
            role: "Controller".into(),
            hired_at: day(2024, 2, 5),
        },
        Employee {
            id: "emp-0004".into(),
            company_id: "co-0003".into(),
            full_name: "Einar Solberg".into(),
            email: "einar.solberg@bluefjord.example".into(),
            role: "Purchasing Lead".into(),
            hired_at: day(2024, 6, 10),
        },
    ]
}

pub fn payables() -> Vec<Payable> {
    vec![
        Payable {
            id: "pay-0001".into(),
            company_id: "co-0001".into(),
            vendor: "Baltic Freight Services".into(),
            amount_cents: 1_845_000,
            currency: "EUR".into(),
            due_date: due(2025, 9, 15),
            status: InvoiceStatus::Open,
        },
        Payable {
            id: "pay-0002".into(),
            company_id: "co-0002".into(),
            vendor: "Turbine Parts Direct".into(),
            amount_cents: 920_500,
            currency: "EUR".into(),
            due_date: due(2025, 7, 1),
            status: InvoiceStatus::Overdue,
        },
        Payable {
            id: "pay-0003".into(),
            company_id: "co-0003".into(),
            vendor: "Arctic Packaging".into(),
            amount_cents: 310_000,
            currency: "NOK".into(),
            due_date: due(2025, 6, 20),
            status: InvoiceStatus::Paid,
        },
    ]
}

pub fn receivables() -> Vec<Receivable> {
    vec![
        Receivable {
            id: "rcv-0001".into(),
            company_id: "co-0001".into(),
            customer: "Hansa Retail Group".into(),
            amount_cents: 2_430_000,
            currency: "EUR".into(),
            due_date: due(2025, 8, 30),
            status: InvoiceStatus::Open,
        },
        Receivable {
            id: "rcv-0002".into(),
            company_id: "co-0002".into(),
            customer: "Stadtwerke Graz".into(),
            amount_cents: 5_150_000,
            currency: "EUR".into(),
            due_date: due(2025, 5, 31),
            status: InvoiceStatus::Paid,
        },
        Receivable {
            id: "rcv-0003".into(),
            company_id: "co-0003".into(),
            customer: "North Sea Provisions".into(),
            amount_cents: 760_250,
            currency: "NOK".into(),
            due_date: due(2025, 7, 14),
            status: InvoiceStatus::Overdue,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_deterministic() {
        assert_eq!(companies(), companies());
        assert_eq!(employees(), employees());
        assert_eq!(payables(), payables());
        assert_eq!(receivables(), receivables());
    }

    #[test]
    fn seed_ids_never_use_the_local_infix() {
        assert!(companies().iter().all(|c| !c.id.contains("-local-")));
        assert!(employees().iter().all(|e| !e.id.contains("-local-")));
        assert!(payables().iter().all(|p| !p.id.contains("-local-")));
        assert!(receivables().iter().all(|r| !r.id.contains("-local-")));
    }

    #[test]
    fn seed_employees_reference_seed_companies() {
        let company_ids: Vec<_> = companies().iter().map(|c| c.id.clone()).collect();
        assert!(employees().iter().all(|e| company_ids.contains(&e.company_id)));
    }
}
