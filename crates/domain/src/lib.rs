//! # thingif-domain
//!
//! Pure domain model of the Thing-IF SDK.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Application identity ([`kii_app::KiiApp`]) and site URLs
//! - **Commands** (aliased actions sent to a thing, with their results)
//! - **Triggers** (predicate → command / server code rules)
//! - **Clauses** (the condition trees of predicates and history queries)
//! - **Onboarding**, **state history**, **thing attributes** and **push** payloads
//! - The exact JSON wire format of all of the above, via `serde`
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Requests are built and sent by `thingif-app` through a transport port.

pub mod error;
pub mod id;
pub mod kii_app;
pub mod time;

pub mod clause;
pub mod command;
pub mod onboarding;
pub mod push;
pub mod query;
pub mod state;
pub mod thing;
pub mod trigger;
