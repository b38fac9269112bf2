pub mod team;

pub mod bundles;

pub mod config;

pub mod event_kind;

pub mod match_snapshot;

pub mod rating;

pub mod stats_api;

pub mod drawing_support {
    pub const MAX_STRINGABLE_SECS: u32 = 5999;
    pub const ROSTER_SIZE: usize = 16;
    pub const MIN_SHIRT_NUMBER: u8 = 1;
    pub const MAX_SHIRT_NUMBER: u8 = 99;
}
