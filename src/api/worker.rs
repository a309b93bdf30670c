use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;

use super::client::ApiClient;
use super::types::{HealthStatus, RecKind, Track};

#[derive(Debug)]
pub enum ApiCmd {
    /// Run a search and report the results.
    Search(String),
    /// Fetch recommendations of the given kind.
    Recommendations(RecKind),
    /// Submit a rating for a song.
    Rate { song_id: i64, rating: f64 },
    /// Record a play. Best-effort: failures are logged and never reported.
    RecordPlay(i64),
    /// Probe service and storage health, reporting each separately.
    HealthCheck,
    /// Shut the worker down.
    Quit,
}

#[derive(Debug)]
pub enum ApiEvent {
    SearchResults { query: String, tracks: Vec<Track> },
    Recommendations { kind: RecKind, tracks: Vec<Track> },
    Rated { song_id: i64, new_rating: f64 },
    ServiceHealth(Result<HealthStatus, String>),
    StorageHealth(Result<HealthStatus, String>),
    /// A request failed. Exactly one of these per failed command.
    Failed { context: &'static str, message: String },
}

pub(super) fn spawn_api_thread(
    client: ApiClient,
    rx: Receiver<ApiCmd>,
    tx: Sender<ApiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = rx.recv() {
            match cmd {
                ApiCmd::Search(query) => {
                    let event = match client.search(&query) {
                        Ok(tracks) => ApiEvent::SearchResults { query, tracks },
                        Err(e) => ApiEvent::Failed {
                            context: "search failed",
                            message: e.to_string(),
                        },
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }

                ApiCmd::Recommendations(kind) => {
                    let event = match client.recommendations(kind) {
                        Ok(tracks) => ApiEvent::Recommendations { kind, tracks },
                        Err(e) => ApiEvent::Failed {
                            context: "failed to load recommendations",
                            message: e.to_string(),
                        },
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }

                ApiCmd::Rate { song_id, rating } => {
                    let event = match client.rate(song_id, rating) {
                        Ok(update) => ApiEvent::Rated {
                            song_id,
                            new_rating: update.new_rating,
                        },
                        Err(e) => ApiEvent::Failed {
                            context: "rating failed",
                            message: e.to_string(),
                        },
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }

                ApiCmd::RecordPlay(song_id) => {
                    // Play-history records must never disturb playback; a
                    // failure is worth a log line and nothing else.
                    if let Err(e) = client.record_play(song_id) {
                        log::warn!("failed to record play for song {song_id}: {e}");
                    }
                }

                ApiCmd::HealthCheck => {
                    let service = client.health().map_err(|e| e.to_string());
                    if tx.send(ApiEvent::ServiceHealth(service)).is_err() {
                        break;
                    }
                    let storage = client.storage_health().map_err(|e| e.to_string());
                    if tx.send(ApiEvent::StorageHealth(storage)).is_err() {
                        break;
                    }
                }

                ApiCmd::Quit => break,
            }
        }
    })
}
