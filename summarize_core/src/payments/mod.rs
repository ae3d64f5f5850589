pub mod dto;
pub mod ledger;
