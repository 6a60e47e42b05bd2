//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps
//! them to `DomainError`.

pub mod todos_sea;
pub mod users_sea;
