//! Human-readable overview printed before the encoder starts

use std::fmt::Write;

use crate::app::ConversionPlan;
use crate::domain::model::*;
use crate::domain::rules::UnitConverter;
use crate::planner::command::PREVIEW_SECONDS;

/// Render the summary block for a plan
pub fn render_summary(plan: &ConversionPlan) -> String {
    let request = &plan.request;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Input:        {}", request.input.display());
    let _ = writeln!(out, "Output:       {}", request.output.display());
    let _ = writeln!(
        out,
        "Video:        {} (preset {}, {})",
        plan.video.codec.encoder(),
        plan.video.preset,
        plan.video.pixel_format
    );
    let _ = writeln!(out, "Rate control: {}", plan.video.rate_control);
    let _ = writeln!(out, "Audio tracks: {}", audio_tracks(plan));
    let _ = writeln!(out, "Audio codec:  {}", audio_codec(plan));
    let _ = writeln!(out, "Subtitles:    {}", subtitles(&plan.subtitles));
    let _ = writeln!(out, "Chapters:     {}", if request.no_chapters { "dropped" } else { "copied" });
    let _ = writeln!(out, "Filters:      {}", filters(&plan.filters));
    let _ = writeln!(out, "Threads:      {}", threads(request.threads));
    let _ = writeln!(out, "Priority:     {}", request.priority);

    if request.preview {
        let _ = writeln!(out, "Preview:      first {} seconds", PREVIEW_SECONDS);
    }
    if let Some(bytes) = request.max_size {
        let _ = writeln!(out, "Size limit:   {}", UnitConverter::format_size(bytes));
    }

    out
}

fn audio_tracks(plan: &ConversionPlan) -> String {
    if plan.audio_tracks.is_empty() {
        return "none".to_string();
    }
    plan.audio_tracks
        .iter()
        .map(|t| format!("#{} <- stream {}", t.output_position, t.source_index))
        .collect::<Vec<_>>()
        .join(", ")
}

fn audio_codec(plan: &ConversionPlan) -> String {
    if plan.request.keep_original_audio {
        return "copy (original audio kept)".to_string();
    }
    match &plan.audio_codec {
        AudioCodecChoice::Copy => "copy".to_string(),
        codec => format!("{} at {}", codec.encoder(), plan.request.audio_bitrate),
    }
}

fn subtitles(selection: &SubtitleSelection) -> String {
    match selection {
        SubtitleSelection::None => "none".to_string(),
        SubtitleSelection::Streams(indexes) => indexes
            .iter()
            .map(|i| format!("stream {}", i))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn filters(chain: &FilterChain) -> String {
    if chain.is_empty() {
        return "none".to_string();
    }
    chain
        .kinds()
        .iter()
        .map(|kind| match kind {
            StageKind::Deinterlace => "deinterlace",
            StageKind::Crop => "crop",
            StageKind::Resize => "resize",
            StageKind::HdrToSdr => "hdr-to-sdr",
            StageKind::Colorspace => "colorspace",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn threads(threads: Option<u32>) -> String {
    match threads {
        Some(n) => n.to_string(),
        None => format!("auto ({} cores)", num_cpus::get()),
    }
}
