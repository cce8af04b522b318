//! salvage-core
//!
//! Core library for recovering JSON payloads that a web application cached in
//! Chromium "Local Storage" by reading the LevelDB `.ldb` table files directly.
//!
//! The pipeline runs strictly forward:
//! locate -> table -> decode -> extract -> aggregate, then report and sink.
//! None of it parses the LevelDB record format; markers and bracket matching
//! are a best-effort heuristic over leniently decoded text.
//!
//! All substantive logic lives here so it is testable and reusable from the
//! CLI or any other frontend.

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod extract;
pub mod locate;
pub mod report;
pub mod scan;
pub mod sink;
pub mod table;
