//! Domain data types
//!
//! One module per business concern. Every entity travels through the
//! data-access layer as an opaque serde payload; identifiers are strings so
//! that remote ids and locally generated fallback ids share one shape.

pub mod company;
pub mod employee;
pub mod finance;
pub mod query;

pub use company::{Company, CompanyPatch, NewCompany};
pub use employee::{Employee, EmployeePatch, NewEmployee};
pub use finance::{
    InvoiceStatus, NewPayable, NewReceivable, Payable, PayablePatch, Receivable, ReceivablePatch,
};
pub use query::ListQuery;
