//! Deterministic demonstration dataset.
//!
//! Five real FFmpeg APIs with their exported coverage and usage, followed by
//! eighteen synthetic APIs whose metrics come from a seeded RNG. The same
//! seed and date always produce the same dataset.

use chrono::{Days, NaiveDate};
use covdash_core::{ApiRecord, TrendPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::ingest::{ApiUsage, DEFAULT_TOTAL_CLIENTS};
use crate::record_store::RecordStore;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Real coverage exports: name, full size, covered lines, apidoc.
const REAL_APIS: [(&str, u32, u32, &str); 5] = [
    (
        "av_ac3_parse_header",
        22,
        22,
        "int av_ac3_parse_header(const uint8_t *buf, size_t size, uint8_t *bitstream_id, uint16_t *frame_size)\nBrief: Extract the bitstream ID and the frame size from AC-3 data.",
    ),
    (
        "av_adts_header_parse",
        13,
        0,
        "int av_adts_header_parse(const uint8_t *buf, uint32_t *samples, uint8_t *frames)\nBrief: Extract the number of samples and frames from AAC data.\nReturns 0 on success, error code on failure.",
    ),
    (
        "av_frame_alloc",
        15,
        15,
        "AVFrame * av_frame_alloc(void)\nBrief: Allocate an AVFrame and set its fields to default values.",
    ),
    (
        "av_malloc",
        8,
        8,
        "void * av_malloc(size_t size)\nBrief: Allocate a memory block with alignment suitable for all memory accesses.",
    ),
    (
        "av_frame_free",
        12,
        12,
        "void av_frame_free(AVFrame **frame)\nBrief: Free the frame and any dynamically allocated objects in it.",
    ),
];

/// APIs with generated metrics.
const SYNTHETIC_APIS: [&str; 18] = [
    "avcodec_open2",
    "av_read_frame",
    "av_write_trailer",
    "av_strdup",
    "avcodec_alloc_context3",
    "av_frame_unref",
    "sws_scale",
    "sws_freeContext",
    "avformat_open_input",
    "av_free",
    "av_rescale_q",
    "avformat_close_input",
    "avcodec_free_context",
    "avformat_new_stream",
    "avformat_write_header",
    "av_dict_set",
    "avformat_find_stream_info",
    "sws_getContext",
];

/// Raw usage rows of the real APIs. `avcodec_find_decoder` has no coverage
/// export and is dropped.
pub fn mock_usage() -> Vec<ApiUsage> {
    vec![
        ApiUsage::new("av_frame_alloc", 25, DEFAULT_TOTAL_CLIENTS),
        ApiUsage::new("av_malloc", 25, DEFAULT_TOTAL_CLIENTS),
        ApiUsage::new("av_frame_free", 25, DEFAULT_TOTAL_CLIENTS),
        ApiUsage::new("avcodec_find_decoder", 25, DEFAULT_TOTAL_CLIENTS),
        ApiUsage::new("av_adts_header_parse", 0, DEFAULT_TOTAL_CLIENTS),
    ]
}

/// Coverage trend shipped with the demonstration dataset.
pub fn mock_trend() -> Vec<TrendPoint> {
    [
        ((2024, 1, 1), 65, 150),
        ((2024, 1, 15), 68, 155),
        ((2024, 2, 1), 72, 160),
        ((2024, 2, 15), 75, 165),
        ((2024, 3, 1), 78, 170),
        ((2024, 3, 15), 82, 175),
    ]
    .into_iter()
    .filter_map(|((y, m, d), coverage, apis)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| TrendPoint::new(date, coverage, apis))
    })
    .collect()
}

/// Builds the demonstration records.
///
/// Real APIs come first in export order and are dated `today`; synthetic
/// APIs are dated within the 30 days before `today`.
pub fn mock_records(seed: u64, today: NaiveDate) -> Vec<ApiRecord> {
    let usage = mock_usage();
    let mut records = Vec::with_capacity(REAL_APIS.len() + SYNTHETIC_APIS.len());

    for (name, full_size, covered_lines, apidoc) in REAL_APIS {
        let (usage_count, total_clients) = usage
            .iter()
            .find(|row| row.api_name == name)
            .and_then(|row| row.counts().ok())
            .unwrap_or((0, DEFAULT_TOTAL_CLIENTS));

        records.push(
            ApiRecord::builder(name)
                .lines(full_size, covered_lines)
                .usage(usage_count, total_clients)
                .documentation(apidoc)
                .last_updated(today)
                .build(),
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for name in SYNTHETIC_APIS {
        let full_size: u32 = rng.gen_range(5..105);
        let covered_lines = rng.gen_range(0..full_size);
        let usage_count = rng.gen_range(0..30);
        let age = rng.gen_range(0..30);

        records.push(
            ApiRecord::builder(name)
                .lines(full_size, covered_lines)
                .usage(usage_count, DEFAULT_TOTAL_CLIENTS)
                .documentation(format!("Mock documentation for {name}"))
                .last_updated(today.checked_sub_days(Days::new(age)).unwrap_or(today))
                .build(),
        );
    }

    debug!(seed, apis = records.len(), "Generated mock dataset");
    records
}

/// Builds the demonstration store, trend series included.
pub fn mock_dataset(seed: u64, today: NaiveDate) -> RecordStore {
    RecordStore::new(mock_records(seed, today)).with_trend(mock_trend())
}
