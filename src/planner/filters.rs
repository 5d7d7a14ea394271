//! Video filter chain construction

use tracing::debug;

use crate::domain::model::*;

pub const DEINTERLACE_FILTER: &str = "yadif";
pub const CROP_DETECT_FILTER: &str = "cropdetect=limit=24:round=16:reset=0";
/// Detected values are only logged by the encoder; this stage keeps `iw:ih`
pub const CROP_FILTER: &str = "crop";

/// Linearize, tone map without desaturation, back to BT.709 transfer
pub const HDR_TO_SDR_FILTERS: [&str; 5] = [
    "zscale=t=linear:npl=100",
    "format=gbrpf32le",
    "zscale=p=bt709",
    "tonemap=tonemap=hable:desat=0",
    "zscale=t=bt709:m=bt709:r=tv",
];

/// Builds the ordered video filter chain from request flags
pub struct FilterChainBuilder;

impl FilterChainBuilder {
    /// Stages are produced independently and then placed in canonical
    /// order: deinterlace, crop, resize, hdr-to-sdr, colorspace
    pub fn build(request: &ConversionRequest) -> FilterChain {
        let mut stages = Vec::new();

        if let Some(colorspace) = request.colorspace {
            stages.push(Self::colorspace_stage(colorspace));
        }
        if request.hdr_to_sdr {
            stages.extend(
                HDR_TO_SDR_FILTERS
                    .iter()
                    .map(|f| FilterStage::new(StageKind::HdrToSdr, *f)),
            );
        }
        if let Some(ref size) = request.resize {
            stages.push(FilterStage::new(StageKind::Resize, Self::scale_expression(size)));
        }
        if request.crop {
            stages.push(FilterStage::new(StageKind::Crop, CROP_DETECT_FILTER));
            stages.push(FilterStage::new(StageKind::Crop, CROP_FILTER));
        }
        if request.deinterlace {
            stages.push(FilterStage::new(StageKind::Deinterlace, DEINTERLACE_FILTER));
        }

        let chain = FilterChain::from_stages(stages);
        debug!("Filter chain: {:?}", chain.to_graph());
        chain
    }

    /// Fixed conversion preset for a colorspace target
    pub fn colorspace_stage(colorspace: Colorspace) -> FilterStage {
        let expression = match colorspace {
            Colorspace::Bt709 => "colorspace=all=bt709:trc=bt709:format=yuv420p10",
            Colorspace::Bt2020 => "colorspace=all=bt2020:trc=bt2020-10:format=yuv420p10",
        };
        FilterStage::new(StageKind::Colorspace, expression)
    }

    /// `1280x720` becomes `scale=1280:720`; other forms are passed through
    pub fn scale_expression(size: &str) -> String {
        let trimmed = size.trim();
        let dimensions = trimmed
            .split_once(['x', 'X'])
            .filter(|(w, h)| !w.is_empty() && !h.is_empty());

        match dimensions {
            Some((width, height)) => format!("scale={}:{}", width, height),
            None => format!("scale={}", trimmed),
        }
    }

    /// Encoder arguments for the chain; empty when no stage is active
    pub fn filter_args(chain: &FilterChain) -> Vec<String> {
        match chain.to_graph() {
            Some(graph) => vec!["-vf".to_string(), graph],
            None => Vec::new(),
        }
    }
}
