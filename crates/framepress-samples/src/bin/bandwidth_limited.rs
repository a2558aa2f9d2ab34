use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::info;

use framepress::{
    error::DropReason,
    pipeline::{stage::Stage, Pipeline},
    processors::{
        error_switch::OnErrorSwitch,
        ticker::Ticker,
        time::{TimestampAdder, TimestampDiffCalculator},
    },
};

use framepress::capturers::{
    pattern::TestPatternSource, source::SourceCapturer, y4m::Y4MFrameSource,
};
use framepress::codecs::{
    jpeg::JpegCodec,
    processors::{BandwidthLimitedEncoder, JpegRoundtripDecoder},
};
use framepress::loggers::{
    csv::CSVFrameDataSerializer, errors::ConsoleDropReasonLogger, stats::ConsoleAverageStatsLogger,
};

#[derive(Parser)]
#[command(about = "Encodes a synthetic or Y4M feed under a per-frame byte budget")]
struct Args {
    /// Byte budget for each encoded frame
    #[arg(long, default_value_t = 5000)]
    ceiling: usize,

    /// Y4M file to capture from instead of the test pattern
    #[arg(long)]
    y4m: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Capture cadence in milliseconds
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,

    /// How long to keep the pipeline running
    #[arg(long, default_value_t = 5)]
    seconds: u64,

    /// CSV file for per-frame stats
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut error_pipeline = Pipeline::new()
        .tag("ErrorsHandler")
        .link(
            Stage::new().append(
                ConsoleDropReasonLogger::new()
                    .header("--- Dropped frames")
                    .log(DropReason::NoCaptureFrame)
                    .log(DropReason::EmptyFrame)
                    .log(DropReason::CodecError),
            ),
        )
        .feedable();

    // a missing JPEG backend is a configuration error, not a per-frame one
    let codec = JpegCodec::new().expect("JPEG codec unavailable");

    let capture_stage = match args.y4m.as_ref() {
        Some(path) => Stage::new()
            .tag("Capture")
            .append(Ticker::new(args.tick_ms))
            .append(TimestampAdder::new("process_start_timestamp"))
            .append(SourceCapturer::new(
                Y4MFrameSource::from_path(path).expect("failed to open the Y4M stream"),
            )),
        None => Stage::new()
            .tag("Capture")
            .append(Ticker::new(args.tick_ms))
            .append(TimestampAdder::new("process_start_timestamp"))
            .append(SourceCapturer::new(TestPatternSource::new(
                args.width,
                args.height,
            ))),
    };

    let mut logging_stage = Stage::new().tag("Stats").append(
        ConsoleAverageStatsLogger::new()
            .header("--- Encoding round")
            .log("capture_time")
            .log("encoding_time")
            .log("decode_time")
            .log("encoded_size")
            .log("chosen_quality")
            .log("search_attempts")
            .log("quality_target_met")
            .log("compression_ratio_pct")
            .log("total_time"),
    );

    if let Some(path) = args.csv.as_ref() {
        logging_stage = logging_stage.append(
            CSVFrameDataSerializer::new(path)
                .expect("failed to create the stats file")
                .log("encoded_size")
                .log("chosen_quality")
                .log("search_attempts")
                .log("quality_target_met")
                .log("encoding_time"),
        );
    }

    let pipeline = Pipeline::new()
        .tag("Encoding")
        .link(capture_stage)
        .link(
            Stage::new()
                .tag("Encode")
                .append(BandwidthLimitedEncoder::new(codec.clone(), args.ceiling))
                .append(OnErrorSwitch::new(&mut error_pipeline))
                .append(JpegRoundtripDecoder::new(codec))
                .append(OnErrorSwitch::new(&mut error_pipeline))
                .append(TimestampDiffCalculator::new(
                    "process_start_timestamp",
                    "total_time",
                )),
        )
        .link(logging_stage);

    let mut handles = error_pipeline.run();
    handles.extend(pipeline.run());

    tokio::time::sleep(Duration::from_secs(args.seconds)).await;

    info!("Finished OK");
}
