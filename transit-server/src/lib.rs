//! Transit directions server.
//!
//! A JSON backend for a Boston subway app that answers: "Which of the
//! routes the map suggests can I actually catch at my walking pace, and
//! which gets me there first?" It also relays MBTA real-time data and
//! caches synthesized speech.

pub mod cache;
pub mod directions;
pub mod domain;
pub mod mbta;
pub mod planner;
pub mod tts;
pub mod web;
