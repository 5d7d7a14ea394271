//! Stream metadata query and prober output parsing
//!
//! The prober is asked for one media kind at a time and answers with
//! line-oriented `key=value` records, optionally wrapped in
//! `[STREAM]` / `[/STREAM]` markers:
//!
//! ```text
//! [STREAM]
//! index=2
//! codec_name=subrip
//! DISPOSITION:forced=1
//! TAG:language=eng
//! TAG:NUMBER_OF_BYTES=48213
//! [/STREAM]
//! ```

use std::path::Path;

use tracing::{debug, trace};

use crate::domain::model::{Disposition, MediaKind, StreamDescriptor};

/// Entries requested per stream. Every tag is asked for: muxers suffix some
/// keys with a language (`NUMBER_OF_BYTES-eng`) and the prober only filters
/// on exact names.
pub const SHOW_ENTRIES: &str =
    "stream=index,codec_name,channels:stream_tags:stream_disposition=default,forced,hearing_impaired";

/// Prober arguments for listing the streams of one kind
pub fn query_args(kind: MediaKind, input: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-select_streams".to_string(),
        kind.specifier().to_string(),
        "-show_entries".to_string(),
        SHOW_ENTRIES.to_string(),
        "-of".to_string(),
        "default".to_string(),
        input.to_string_lossy().into_owned(),
    ]
}

/// Parse prober output into descriptors sorted by index.
///
/// Malformed lines are skipped and records without a usable index are
/// dropped, so garbage input yields an empty list.
pub fn parse_stream_records(kind: MediaKind, output: &str) -> Vec<StreamDescriptor> {
    let mut streams = Vec::new();
    let mut current: Option<RecordBuilder> = None;

    for line in output.lines().map(str::trim) {
        match line {
            "" => {}
            "[STREAM]" | "[/STREAM]" => {
                if let Some(record) = current.take().and_then(|r| r.finish(kind)) {
                    streams.push(record);
                }
            }
            _ => {
                let Some((key, value)) = line.split_once('=') else {
                    trace!("Skipping prober line without '=': {}", line);
                    continue;
                };

                // Unwrapped output: a second index starts a new record
                if key == "index" && current.as_ref().is_some_and(|r| r.index.is_some()) {
                    if let Some(record) = current.take().and_then(|r| r.finish(kind)) {
                        streams.push(record);
                    }
                }

                current
                    .get_or_insert_with(RecordBuilder::default)
                    .apply(key.trim(), value.trim());
            }
        }
    }

    if let Some(record) = current.and_then(|r| r.finish(kind)) {
        streams.push(record);
    }

    streams.sort_by_key(|s| s.index);
    streams.dedup_by_key(|s| s.index);

    debug!("Parsed {} {} stream(s) from prober output", streams.len(), kind);
    streams
}

/// Fields collected for one record before validation
#[derive(Default)]
struct RecordBuilder {
    index: Option<u32>,
    codec_name: Option<String>,
    channels: Option<u32>,
    language: Option<String>,
    title: Option<String>,
    disposition: Disposition,
    size_bytes: Option<u64>,
}

impl RecordBuilder {
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "index" => self.index = value.parse().ok(),
            "codec_name" => self.codec_name = text(value),
            "channels" => self.channels = value.parse().ok(),
            "TAG:language" => self.language = text(value),
            "TAG:title" => self.title = text(value),
            "DISPOSITION:default" => self.disposition.default = value == "1",
            "DISPOSITION:forced" => self.disposition.forced = value == "1",
            "DISPOSITION:hearing_impaired" => self.disposition.hearing_impaired = value == "1",
            // Matroska muxers may append a language suffix to statistics tags
            k if k.starts_with("TAG:NUMBER_OF_BYTES") => {
                if self.size_bytes.is_none() {
                    self.size_bytes = value.parse().ok();
                }
            }
            _ => trace!("Ignoring prober key {}", key),
        }
    }

    fn finish(self, kind: MediaKind) -> Option<StreamDescriptor> {
        let index = self.index?;
        Some(StreamDescriptor {
            index,
            kind,
            codec_name: self.codec_name,
            channels: if kind == MediaKind::Audio {
                self.channels
            } else {
                None
            },
            language: self.language,
            title: self.title,
            disposition: self.disposition,
            size_bytes: if kind == MediaKind::Subtitle {
                self.size_bytes
            } else {
                None
            },
        })
    }
}

/// Empty and `N/A` values carry no information
fn text(value: &str) -> Option<String> {
    if value.is_empty() || value == "N/A" {
        None
    } else {
        Some(value.to_string())
    }
}
