// ─── launcher-deps Core ───
// Installs third-party launchers into a game's compatibility prefix before
// the game runs.
//
// Architecture:
//   core/
//     downloader/ — Streaming downloads, atomic on the destination path
//     cache/      — Keyed installer cache with an age-based freshness rule
//     runtime/    — Game runtime trait, wine layer, guest path translation
//     library/    — Game records on disk
//     dependency/ — Dependency descriptor, prefix probe, installer
//     fonts/      — Font packages through winetricks
//     notify/     — Status events and user alerts
//     setup/      — Setup coordinator (gates, status, concurrent install)
//     state/      — Application state wiring

pub mod cache;
pub mod config;
pub mod dependency;
pub mod downloader;
pub mod error;
pub mod fonts;
pub mod http;
pub mod i18n;
pub mod library;
pub mod notify;
pub mod runtime;
pub mod setup;
pub mod state;
