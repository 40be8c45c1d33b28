pub mod admin;
pub mod confidential;
pub mod ledger;
pub mod query;
