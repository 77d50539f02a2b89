//! Courseflow - Multi-Tenant Learning Platform Backend
//!
//! Organizations run courses; students enroll, watch lectures, accrue
//! progress, and receive completion certificates. Paid courses gate
//! enrollment behind a payment provider checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
