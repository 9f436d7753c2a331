pub mod api;
pub mod date_range;
pub mod match_record;
