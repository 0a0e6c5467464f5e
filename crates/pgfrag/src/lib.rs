//! # pgfrag
//!
//! Parameterized SQL fragment builders for PostgreSQL resource APIs.
//!
//! ## Features
//!
//! - **Partial updates**: sparse input → `col = $1, other = $2` for an `UPDATE ... SET`
//! - **Criteria filters**: optional list filters → `WHERE a ILIKE $1 AND b > $2`
//! - **Injection-safe**: user values only travel as bind parameters; column
//!   names are validated identifiers
//! - **Deterministic**: predicate order comes from a declared table, not input order
//! - **tokio-postgres ready**: [`Value`] implements `ToSql`
//!
//! ## Example
//!
//! ```ignore
//! use pgfrag::{ColumnMapping, CompanyFilter, Criteria, UpdateData, partial_update};
//!
//! // UPDATE companies SET ... WHERE handle = $n
//! let data = UpdateData::new().set("numEmployees", 12).set("logoUrl", None::<String>);
//! let set = partial_update(data, &ColumnMapping::companies())?;
//! let handle_idx = set.next_placeholder();
//! let sql = format!("UPDATE companies SET {set} WHERE handle = {handle_idx}");
//!
//! // SELECT ... FROM companies {where} ORDER BY name
//! let filter = CompanyFilter::new().name_like("net").max_employees(500);
//! let filter = filter.build(&ColumnMapping::companies())?;
//! let rows = client
//!     .query(&format!("SELECT handle, name FROM companies {filter} ORDER BY name"), &filter.params_ref())
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod ident;
pub mod mapping;
pub mod param;
pub mod update;
pub mod value;

mod trace;

pub use config::MappingConfig;
pub use error::{FragError, FragResult};
pub use filter::{CompanyFilter, CompareOp, Criteria, FilterField, JobFilter, build_filter};
pub use fragment::QueryFragment;
pub use ident::Ident;
pub use mapping::ColumnMapping;
pub use param::{Bindings, placeholder};
pub use update::{UpdateData, partial_update};
pub use value::Value;
